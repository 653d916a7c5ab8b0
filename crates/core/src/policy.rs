// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure assignment decisions — pair an idle printer with a pending
//! request, or revoke an existing assignment. Both are callable and
//! testable independently of [`crate::reconcile::tick`].

use crate::error::PolicyError;
use crate::ids::IdAllocator;
use crate::model::{PrintAssignment, PrintRequest, PrintRequestState, Printer, PrinterState};

/// Attempt to bind `request` to `printer`. Preconditions are checked in
/// order, each producing a distinct [`PolicyError`]: the request must be
/// `PendingAssignment`, the printer must have no assignment, and the
/// printer must be `Idle`. On success, mints a fresh assignment id,
/// moves the request to `Assigned`, and attaches an unclaimed assignment
/// to the printer.
pub fn assign_if_possible(
    ids: &mut IdAllocator,
    request: &mut PrintRequest,
    printer: &mut Printer,
) -> Result<PrintAssignment, PolicyError> {
    if request.state != PrintRequestState::PendingAssignment {
        return Err(PolicyError::RequestAlreadyAssigned { request_id: request.id.clone() });
    }
    if let Some(existing) = &printer.assignment {
        return Err(PolicyError::PrinterAlreadyAssigned {
            printer_id: printer.id.clone(),
            assignment_id: existing.id.clone(),
        });
    }
    if printer.state != PrinterState::Idle {
        return Err(PolicyError::PrinterNotIdle { printer_id: printer.id.clone() });
    }

    let assignment = PrintAssignment {
        id: ids.next_assignment_id(),
        print_request_id: request.id.clone(),
        document_id: request.document_id.clone(),
        printer_id: printer.id.clone(),
        claimed: false,
    };
    request.state = PrintRequestState::Assigned;
    printer.assignment = Some(assignment.clone());

    tracing::debug!(
        printer_id = %printer.id,
        request_id = %request.id,
        assignment_id = %assignment.id,
        "assigned print request to printer"
    );

    Ok(assignment)
}

/// Revoke `printer`'s current assignment. Precondition: `printer` has a
/// non-null assignment — callers (the reconciler) always check this
/// first; calling `unassign` on an already-unassigned printer is a
/// no-op, keeping the function idempotent in effect rather than
/// panicking on a contract callers are expected to uphold.
///
/// Looks up the referenced request among `requests`; if present, resets
/// it to `PendingAssignment`. If the assignment references a request no
/// longer in the queue, logs the dangling reference and proceeds anyway
/// — revocation always clears the printer's assignment.
pub fn unassign(printer: &mut Printer, requests: &mut [PrintRequest]) {
    let Some(assignment) = printer.assignment.take() else {
        tracing::debug!(printer_id = %printer.id, "unassign called on an already-unassigned printer");
        return;
    };

    tracing::debug!(
        printer_id = %printer.id,
        assignment_id = %assignment.id,
        print_request_id = %assignment.print_request_id,
        "unassigning printer"
    );

    match requests.iter_mut().find(|r| r.id == assignment.print_request_id) {
        Some(request) => request.state = PrintRequestState::PendingAssignment,
        None => tracing::error!(
            printer_id = %printer.id,
            assignment_id = %assignment.id,
            print_request_id = %assignment.print_request_id,
            "assignment references a print request no longer in the queue"
        ),
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
