// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Printq-server: the HTTP ingress, periodic drivers, and process
//! bootstrap around `printq-core`'s reconciliation engine.

pub mod config;
pub mod driver;
pub mod error;
pub mod state;
pub mod transport;

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;
use crate::driver::{spawn_dump_loop, spawn_reconcile_loop};
use crate::state::ControllerState;
use crate::transport::build_router;

/// Run the controller until shutdown: bind the listener, spawn the two
/// periodic drivers, and serve the ingress router until the shutdown
/// signal fires.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let shutdown = CancellationToken::new();

    let state = Arc::new(ControllerState::new(config, shutdown.clone()));

    spawn_reconcile_loop(Arc::clone(&state));
    spawn_dump_loop(Arc::clone(&state));

    let router = build_router(Arc::clone(&state));
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("printq controller listening on {addr}");

    axum::serve(listener, router).with_graceful_shutdown(shutdown.cancelled_owned()).await?;

    Ok(())
}
