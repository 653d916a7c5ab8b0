// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness for end-to-end binary smoke tests.
//!
//! Spawns the real `printqd` binary as a subprocess and drives it over
//! HTTP, the way `coop-specs` drives the teacher's `coop` binary.
//!
//! This crate does not depend on `printq-server`: the binary is located
//! by walking up from `CARGO_MANIFEST_DIR` to the workspace's
//! `target/debug/`. It's still built before these tests run because
//! `cargo test --workspace` (and a plain `cargo test` from the
//! workspace root) builds every workspace member, `printq-server`
//! included, ahead of running any test binary.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

/// Resolve the path to the compiled `printqd` binary.
pub fn printqd_binary() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    // tests/specs -> tests -> workspace root
    let workspace = manifest.parent().and_then(|p| p.parent()).unwrap_or(manifest);
    workspace.join("target").join("debug").join("printqd")
}

/// Find a free TCP port by binding to :0 then releasing.
pub fn free_port() -> anyhow::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// A running `printqd` process that is killed on drop.
pub struct PrintqProcess {
    child: Child,
    port: u16,
}

impl PrintqProcess {
    /// Spawn `printqd` bound to a free port, with a fast reconcile
    /// interval so scenarios converge quickly in tests.
    pub fn start() -> anyhow::Result<Self> {
        let binary = printqd_binary();
        anyhow::ensure!(binary.exists(), "printqd binary not found at {}", binary.display());

        let port = free_port()?;

        let child = Command::new(&binary)
            .args([
                "--host",
                "127.0.0.1",
                "--port",
                &port.to_string(),
                "--reconcile-interval-ms",
                "20",
                "--dump-interval-ms",
                "60000",
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(Self { child, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Poll `/healthz` until responsive.
    pub async fn wait_healthy(&self, timeout: Duration) -> anyhow::Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        let client = reqwest::Client::new();
        let url = format!("{}/healthz", self.base_url());

        loop {
            if tokio::time::Instant::now() > deadline {
                anyhow::bail!("printqd did not become healthy within {timeout:?}");
            }
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}

impl Drop for PrintqProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
