// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciliation `Tick` — drives every request through its state
//! machine once per cycle, using a freshly built [`WorldView`] and the
//! pure decisions in [`crate::policy`].
//!
//! ## Deviation from the original: always iterate every request
//!
//! The Go original's `Tick` breaks out of the request loop the moment
//! idle capacity is exhausted, which means a completion freeing up a
//! printer is only detected on the *next* tick once the loop reaches
//! that far again — and a request past the break point in a saturated
//! fleet is skipped even for revocation. This implementation instead
//! always iterates every request: idle-printer capacity gates only the
//! unassigned branch (new assignments); the assigned branch — revocation
//! and completion detection — runs unconditionally. This is the
//! preferred semantics called out as an open question in the source
//! spec, adopted here deliberately rather than inherited by accident.

use std::collections::VecDeque;

use crate::ids::IdAllocator;
use crate::model::{PrintQueue, PrintRequestState, PrinterState};
use crate::policy;
use crate::view::WorldView;

/// Run one reconciliation cycle over `queue`, mutating printers and
/// requests in place. Non-suspending: performs no I/O and is expected to
/// run to completion in O(requests × printers).
pub fn tick(ids: &mut IdAllocator, queue: &mut PrintQueue) {
    let view = WorldView::build(queue);
    let mut idle_printers: VecDeque<String> = view.idle_printers.iter().cloned().collect();

    // Snapshot request ids up front: the loop body mutates request state
    // but never adds or removes requests, so iterating a copy of the ids
    // is equivalent to iterating the live list in insertion order.
    let request_ids: Vec<String> = queue.requests.iter().map(|r| r.id.clone()).collect();

    for request_id in request_ids {
        if view.assignments_by_request_id.contains_key(&request_id) {
            handle_assigned_request(&view, queue, &request_id);
        } else {
            handle_unassigned_request(ids, queue, &mut idle_printers, &request_id);
        }
    }
}

fn handle_unassigned_request(
    ids: &mut IdAllocator,
    queue: &mut PrintQueue,
    idle_printers: &mut VecDeque<String>,
    request_id: &str,
) {
    let Some(printer_id) = idle_printers.pop_front() else {
        // No idle capacity left this tick; this request waits for the next cycle.
        return;
    };

    let PrintQueue { printers, requests } = queue;
    let Some(request) = requests.iter_mut().find(|r| r.id == request_id) else { return };
    let Some(printer) = printers.iter_mut().find(|p| p.id == printer_id) else { return };

    if let Err(err) = policy::assign_if_possible(ids, request, printer) {
        tracing::warn!(
            request_id = %request_id,
            printer_id = %printer_id,
            error = %err,
            "could not assign print request to printer"
        );
        // The printer was never actually bound; it is still idle for the
        // rest of this tick.
        idle_printers.push_front(printer_id);
    }
}

fn handle_assigned_request(view: &WorldView, queue: &mut PrintQueue, request_id: &str) {
    let Some(printer_id) = view.printer_by_assigned_request_id.get(request_id) else {
        tracing::error!(request_id = %request_id, "assigned print request has no owning printer");
        return;
    };

    let PrintQueue { printers, requests } = queue;
    let Some(printer) = printers.iter_mut().find(|p| &p.id == printer_id) else {
        tracing::error!(request_id = %request_id, printer_id = %printer_id, "owning printer vanished mid-tick");
        return;
    };

    if printer.assignment.is_none() {
        // WorldView only populates printer_by_assigned_request_id from
        // printers that carry a non-null assignment, so this can only
        // happen if the queue was mutated between view construction and
        // here — which never happens within a single, lock-held tick.
        // A programming-invariant breach; spec calls for an abort.
        #[allow(clippy::panic)]
        {
            panic!("printer {printer_id} should have an assignment in handle_assigned_request");
        }
    }

    if printer.state == PrinterState::Busy {
        policy::unassign(printer, requests);
        return;
    }

    if printer.state == PrinterState::Printing {
        match view.current_print_by_printer_id.get(printer_id) {
            None => {
                tracing::error!(printer_id = %printer_id, "printer is printing but has no current print");
                return;
            }
            Some(current_print) => {
                let assignment_id = printer.assignment.as_ref().map(|a| a.id.clone());
                if current_print.assignment_id != assignment_id {
                    tracing::warn!(
                        printer_id = %printer_id,
                        current_print_id = %current_print.id,
                        "printer is printing something other than its current assignment"
                    );
                    policy::unassign(printer, requests);
                    return;
                }
            }
        }
    }

    let finished = printer.prints.iter().find(|p| {
        p.print_request_id.as_deref() == Some(request_id)
            && matches!(p.state, crate::model::PrintState::Finished | crate::model::PrintState::Error)
    });

    if let Some(finished) = finished {
        tracing::debug!(
            printer_id = %printer_id,
            request_id = %request_id,
            print_id = %finished.id,
            "print finished, resolving request"
        );
        if let Some(request) = requests.iter_mut().find(|r| r.id == request_id) {
            request.state = PrintRequestState::Finished;
        }
        printer.assignment = None;
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
