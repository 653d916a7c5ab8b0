// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recoverable errors produced by the assignment policy (see
//! [`crate::policy`]). Ported from `errors.go`'s three typed errors.

use std::fmt;

/// Error returned by [`crate::policy::assign_if_possible`]. Each variant
/// is recoverable and local: the reconciler logs it and moves on to the
/// next request; the offending request stays eligible for the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The request is not in `PendingAssignment` state.
    RequestAlreadyAssigned { request_id: String },
    /// The printer already has a non-null assignment.
    PrinterAlreadyAssigned { printer_id: String, assignment_id: String },
    /// The printer is not `Idle`.
    PrinterNotIdle { printer_id: String },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestAlreadyAssigned { request_id } => {
                write!(f, "print request {request_id} is already assigned")
            }
            Self::PrinterAlreadyAssigned { printer_id, assignment_id } => {
                write!(f, "printer {printer_id} already has assignment {assignment_id}")
            }
            Self::PrinterNotIdle { printer_id } => {
                write!(f, "printer {printer_id} is not idle")
            }
        }
    }
}

impl std::error::Error for PolicyError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
