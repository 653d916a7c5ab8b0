// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use printq_core::{IdAllocator, PrintQueue};

use crate::config::ServerConfig;

/// Everything guarded by the controller's single writer lock: the queue
/// itself and the id allocator. Bundled into one struct behind one
/// `Mutex` — per spec.md §5, "Identifier counters (C1) are process-global
/// and accessed only under `mu`" — rather than a separate lock per field,
/// so there is no lock-ordering invariant for callers to keep straight.
#[derive(Default)]
pub struct QueueState {
    pub queue: PrintQueue,
    pub ids: IdAllocator,
}

/// Shared controller state. A single `Mutex<QueueState>` rather than the
/// per-field `RwLock` split elsewhere in this codebase's lineage: every
/// mutation path here — `Tick`, `UpdatePrinter`, `RequestPrint`,
/// `ClaimAssignment` — and every read (`GET /printQueue`) needs the whole
/// queue (and the id allocator that mints into it) consistent for its
/// full duration, so one exclusive lock is the direct expression of
/// that, not an optimization opportunity.
pub struct ControllerState {
    pub store: Mutex<QueueState>,
    pub config: ServerConfig,
    pub shutdown: CancellationToken,
}

impl ControllerState {
    pub fn new(config: ServerConfig, shutdown: CancellationToken) -> Self {
        Self { store: Mutex::new(QueueState::default()), config, shutdown }
    }
}
