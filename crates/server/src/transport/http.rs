// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers for the ingress adapter (C6).

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use printq_core::{PrintRequestState, Printer};

use crate::error::ControllerError;
use crate::state::ControllerState;

// -- Request/response types ---------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPrintBody {
    #[serde(default)]
    pub document_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RequestPrintResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAssignmentBody {
    pub printer_id: String,
    pub assignment_id: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimAssignmentResponse {
    pub claimed: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub printers: usize,
    pub requests: usize,
}

// -- Handlers -----------------------------------------------------------------

/// `GET /printQueue` — the full queue as JSON, observed under the single
/// writer lock so it never reflects a partially-reconciled tick.
pub async fn print_queue(State(state): State<Arc<ControllerState>>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(store.queue.clone())
}

/// `POST /requestPrint` — append a new pending request. The document id
/// is caller-supplied when present; otherwise a fresh one is minted.
pub async fn request_print(
    State(state): State<Arc<ControllerState>>,
    body: Option<Json<RequestPrintBody>>,
) -> impl IntoResponse {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let mut store = state.store.lock().await;

    let document_id = body.document_id.unwrap_or_else(|| store.ids.next_document_id());
    let id = store.ids.next_request_id();

    store.queue.requests.push(printq_core::PrintRequest {
        id: id.clone(),
        document_id,
        state: PrintRequestState::PendingAssignment,
    });

    tracing::debug!(request_id = %id, "accepted print request");
    Json(RequestPrintResponse { id }).into_response()
}

/// `POST /updatePrinter` — replace the printer with this id, or append a
/// new one. No field-level merge: the agent snapshot is authoritative.
pub async fn update_printer(
    State(state): State<Arc<ControllerState>>,
    body: Result<Json<Printer>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let Json(snapshot) = match body {
        Ok(json) => json,
        Err(rejection) => {
            return ControllerError::BadRequest
                .to_http_response(rejection.body_text())
                .into_response();
        }
    };

    let mut store = state.store.lock().await;
    match store.queue.printers.iter_mut().find(|p| p.id == snapshot.id) {
        Some(existing) => *existing = snapshot,
        None => store.queue.printers.push(snapshot),
    }

    axum::http::StatusCode::OK.into_response()
}

/// `POST /claimAssignment` — mark an assignment claimed if the printer's
/// current assignment id matches; an unknown printer id is silently
/// ignored, per the queue's boundary law for this operation.
pub async fn claim_assignment(
    State(state): State<Arc<ControllerState>>,
    Json(body): Json<ClaimAssignmentBody>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    let claimed = match store.queue.printer_mut(&body.printer_id) {
        Some(printer) => match &mut printer.assignment {
            Some(assignment) if assignment.id == body.assignment_id => {
                assignment.claimed = true;
                true
            }
            Some(_) | None => {
                tracing::debug!(
                    printer_id = %body.printer_id,
                    assignment_id = %body.assignment_id,
                    "claim does not match printer's current assignment"
                );
                false
            }
        },
        None => {
            tracing::debug!(printer_id = %body.printer_id, "claim referenced unknown printer");
            false
        }
    };

    Json(ClaimAssignmentResponse { claimed })
}

/// `GET /healthz` — liveness probe.
pub async fn healthz(State(state): State<Arc<ControllerState>>) -> impl IntoResponse {
    let store = state.store.lock().await;
    Json(HealthResponse {
        status: "ok",
        printers: store.queue.printers.len(),
        requests: store.queue.requests.len(),
    })
}
