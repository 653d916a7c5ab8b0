// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic background tasks (C8): the reconciliation tick and the
//! diagnostic dump, each running under the shared writer lock for the
//! full duration of its cycle and nothing else.

use std::sync::Arc;

use crate::state::ControllerState;

/// Spawn the `reconcile` loop: every `config.reconcile_interval`, acquire
/// the lock, run one `Tick`, release. Ticks are skipped rather than
/// queued if the previous one overran, matching the teacher's health
/// checker's `MissedTickBehavior::Skip`.
pub fn spawn_reconcile_loop(state: Arc<ControllerState>) {
    let interval = state.config.reconcile_interval();

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => break,
                _ = timer.tick() => {}
            }

            let mut store = state.store.lock().await;
            printq_core::tick(&mut store.ids, &mut store.queue);
        }

        tracing::debug!("reconcile loop stopped");
    });
}

/// Spawn the `dump` loop: every `config.dump_interval`, acquire the
/// lock and emit a diagnostic snapshot via `tracing`, release. Ported
/// from the original's `pq.Print()`, through `tracing` rather than
/// stdout.
pub fn spawn_dump_loop(state: Arc<ControllerState>) {
    let interval = state.config.dump_interval();

    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => break,
                _ = timer.tick() => {}
            }

            let store = state.store.lock().await;
            let queue = &store.queue;
            tracing::info!(
                printers = queue.printers.len(),
                requests = queue.requests.len(),
                "queue dump"
            );
            for printer in &queue.printers {
                tracing::info!(
                    printer_id = %printer.id,
                    state = ?printer.state,
                    assignment = ?printer.assignment.as_ref().map(|a| &a.print_request_id),
                    "printer"
                );
            }
            for request in &queue.requests {
                tracing::info!(
                    request_id = %request.id,
                    document_id = %request.document_id,
                    state = ?request.state,
                    "request"
                );
            }
        }

        tracing::debug!("dump loop stopped");
    });
}
