// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP transport for the printq ingress adapter (C6/C7).

pub mod auth;
pub mod http;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::ControllerState;

/// Build the axum `Router` with every ingress route wired up.
pub fn build_router(state: Arc<ControllerState>) -> Router {
    Router::new()
        .route("/printQueue", get(http::print_queue))
        .route("/requestPrint", post(http::request_print))
        .route("/updatePrinter", post(http::update_printer))
        .route("/claimAssignment", post(http::claim_assignment))
        .route("/healthz", get(http::healthz))
        .layer(middleware::from_fn_with_state(state.clone(), auth::auth_layer))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
