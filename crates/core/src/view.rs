// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-tick snapshot (`WorldView`) built from the current queue.
//!
//! Links are kept by identifier only, never by direct reference into the
//! [`crate::model::PrintQueue`] being indexed — the view is built once,
//! used for exactly one tick, and discarded; the reconciler resolves
//! everything it needs by looking ids up in these maps or back in the
//! queue, never by holding a borrow across a mutation. This mirrors the
//! original's `computeInternalPrintQueueState`, which instead kept raw
//! pointers (safe only because Go's GC tolerates the aliasing).

use std::collections::HashMap;

use crate::model::{Print, PrintAssignment, PrintQueue, PrinterState, PrintState};

/// Immutable per-tick index derived from a [`PrintQueue`]. Built fresh by
/// [`WorldView::build`] before any mutation in a tick and discarded at
/// the end of that tick.
#[derive(Debug, Default)]
pub struct WorldView {
    /// `print_request_id -> assignment` for every printer currently holding one.
    pub assignments_by_request_id: HashMap<String, PrintAssignment>,
    /// `print_request_id -> printer_id` for the printer holding that request's assignment.
    pub printer_by_assigned_request_id: HashMap<String, String>,
    /// Printer ids with `state = Idle` and no assignment, in `Printers` order.
    pub idle_printers: Vec<String>,
    /// `printer_id -> print` for the unique `Printing`-state print per printer.
    pub current_print_by_printer_id: HashMap<String, Print>,
    /// `printer_id -> print` whose `assignment_id` matches that printer's
    /// current assignment id.
    pub assigned_print_by_printer_id: HashMap<String, Print>,
}

impl WorldView {
    /// Build a fresh view from the current state of `queue`. Does not
    /// mutate `queue`. Emits `tracing` warnings/errors for every
    /// invariant violation observed (duplicate assignment of a request,
    /// two `Printing` prints on one printer, a printing print whose
    /// document disagrees with its assignment's document) — these are
    /// observational errors, tolerated and expected to resolve on a
    /// later tick once a fresh agent snapshot arrives.
    pub fn build(queue: &PrintQueue) -> Self {
        let mut view = Self::default();

        for printer in &queue.printers {
            if printer.state == PrinterState::Idle && printer.assignment.is_none() {
                view.idle_printers.push(printer.id.clone());
            }

            if let Some(assignment) = &printer.assignment {
                if view
                    .assignments_by_request_id
                    .contains_key(&assignment.print_request_id)
                {
                    tracing::error!(
                        assignment_id = %assignment.id,
                        printer_id = %printer.id,
                        print_request_id = %assignment.print_request_id,
                        "print request is already assigned to another printer"
                    );
                }
                view.printer_by_assigned_request_id
                    .insert(assignment.print_request_id.clone(), printer.id.clone());
                view.assignments_by_request_id
                    .insert(assignment.print_request_id.clone(), assignment.clone());
            }

            for print in &printer.prints {
                if print.state == PrintState::Printing {
                    if view.current_print_by_printer_id.contains_key(&printer.id) {
                        tracing::error!(
                            printer_id = %printer.id,
                            print_id = %print.id,
                            "printer has more than one print in state Printing"
                        );
                    }
                    view.current_print_by_printer_id.insert(printer.id.clone(), print.clone());

                    if let Some(assignment) = &printer.assignment {
                        let matches_assignment =
                            print.assignment_id.as_deref() == Some(assignment.id.as_str());
                        if !matches_assignment {
                            tracing::warn!(
                                printer_id = %printer.id,
                                print_id = %print.id,
                                print_assignment_id = ?print.assignment_id,
                                printer_assignment_id = %assignment.id,
                                "printer is printing but current print is not assigned to this printer"
                            );
                        }
                        if print.document_id != assignment.document_id {
                            tracing::warn!(
                                printer_id = %printer.id,
                                print_id = %print.id,
                                print_document_id = %print.document_id,
                                assignment_document_id = %assignment.document_id,
                                "printer is printing but current print's document does not match assignment document"
                            );
                        }
                    }
                }

                if let Some(assignment) = &printer.assignment {
                    if print.assignment_id.as_deref() == Some(assignment.id.as_str()) {
                        if view.assigned_print_by_printer_id.contains_key(&printer.id) {
                            tracing::error!(
                                printer_id = %printer.id,
                                print_id = %print.id,
                                "printer has more than one print matching its current assignment"
                            );
                        }
                        view.assigned_print_by_printer_id
                            .insert(printer.id.clone(), print.clone());
                    }
                }
            }
        }

        view
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
