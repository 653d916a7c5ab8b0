// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

/// Configuration for the printq controller.
#[derive(Debug, Clone, clap::Args)]
pub struct ServerConfig {
    /// Host to bind on.
    #[arg(long, default_value = "0.0.0.0", env = "PRINTQ_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080, env = "PRINTQ_PORT")]
    pub port: u16,

    /// Reconciliation tick interval in milliseconds.
    #[arg(long, default_value_t = 100, env = "PRINTQ_RECONCILE_INTERVAL_MS")]
    pub reconcile_interval_ms: u64,

    /// Diagnostic dump interval in milliseconds.
    #[arg(long, default_value_t = 5000, env = "PRINTQ_DUMP_INTERVAL_MS")]
    pub dump_interval_ms: u64,

    /// Bearer token for ingress auth. If unset, auth is disabled.
    #[arg(long, env = "PRINTQ_AUTH_TOKEN")]
    pub auth_token: Option<String>,
}

impl ServerConfig {
    pub fn reconcile_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.reconcile_interval_ms)
    }

    pub fn dump_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.dump_interval_ms)
    }
}
