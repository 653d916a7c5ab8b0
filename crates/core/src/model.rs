// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entity types and their cross-entity relations.
//!
//! Every link between entities is by identifier, never by reference, so
//! the model survives round-tripping through JSON (see
//! [`PrintQueue`]'s serde derive). Only [`Printer`] owns its
//! [`PrintAssignment`] and its [`Print`]s; [`PrintRequest`]s are owned by
//! the queue.

use serde::{Deserialize, Serialize};

/// A document the controller references by identifier only; it never
/// owns the underlying bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
}

/// Lifecycle states of a [`PrintRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintRequestState {
    PendingAssignment,
    #[serde(rename = "PrintRequestAssigned")]
    Assigned,
    PendingPrint,
    Printing,
    Finished,
}

/// A user demand to print a document. Created by the ingress, mutated
/// only by the reconciler. Never destroyed; `Finished` is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintRequest {
    pub id: String,
    pub document_id: String,
    pub state: PrintRequestState,
}

/// A binding between one request and one printer. Lives only as an
/// optional field on [`Printer`] — never free-floating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintAssignment {
    pub id: String,
    pub print_request_id: String,
    pub document_id: String,
    pub printer_id: String,
    pub claimed: bool,
}

/// Lifecycle states of a [`Print`] attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintState {
    Printing,
    Finished,
    Error,
}

/// An agent-local record of a physical print attempt. The controller
/// only observes these through printer snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Print {
    pub id: String,
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_request_id: Option<String>,
    pub state: PrintState,
}

/// Lifecycle states of a [`Printer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrinterState {
    Idle,
    Printing,
    Busy,
}

/// An out-of-process printer agent. Authoritative for its own `state`,
/// `prints`, and `documents` — the controller never mutates those
/// fields directly, only via a full snapshot replace (see
/// `ingress::update_printer`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    pub id: String,
    pub name: String,
    pub state: PrinterState,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub prints: Vec<Print>,
    #[serde(default)]
    pub last_seen: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment: Option<PrintAssignment>,
}

impl Printer {
    /// The unique `Printing`-state print for this printer, if any.
    /// Ported from the original's `Printer.GetCurrentPrint`.
    pub fn current_print(&self) -> Option<&Print> {
        self.prints.iter().find(|p| p.state == PrintState::Printing)
    }

    /// Look up a locally-reported document by id.
    /// Ported from the original's `Printer.GetDocument`.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }
}

/// The full queue of printers and requests. Owned exclusively by the
/// server under a single writer lock (see `server::state::ControllerState`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrintQueue {
    #[serde(default)]
    pub printers: Vec<Printer>,
    #[serde(default)]
    pub requests: Vec<PrintRequest>,
}

impl PrintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The de-duplicated union of every printer's reported documents, in
    /// first-seen order across printers. Ported from the original's
    /// `PrintQueue.GetDocuments`.
    pub fn documents(&self) -> Vec<Document> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for printer in &self.printers {
            for doc in &printer.documents {
                if seen.insert(doc.id.clone()) {
                    out.push(doc.clone());
                }
            }
        }
        out
    }

    pub fn printer(&self, id: &str) -> Option<&Printer> {
        self.printers.iter().find(|p| p.id == id)
    }

    pub fn printer_mut(&mut self, id: &str) -> Option<&mut Printer> {
        self.printers.iter_mut().find(|p| p.id == id)
    }

    pub fn request(&self, id: &str) -> Option<&PrintRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn request_mut(&mut self, id: &str) -> Option<&mut PrintRequest> {
        self.requests.iter_mut().find(|r| r.id == id)
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
