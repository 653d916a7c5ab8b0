// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end smoke tests that spawn the real `printqd` binary and
//! drive it over HTTP, observing that the reconciliation loop converges
//! the way the in-process `tick` unit tests assert it does.

use std::time::Duration;

use printq_specs::PrintqProcess;

const TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::test]
async fn healthz_reports_empty_queue() -> anyhow::Result<()> {
    let printq = PrintqProcess::start()?;
    printq.wait_healthy(TIMEOUT).await?;

    let resp: serde_json::Value =
        reqwest::get(format!("{}/healthz", printq.base_url())).await?.json().await?;

    assert_eq!(resp["status"], "ok");
    assert_eq!(resp["printers"], 0);
    assert_eq!(resp["requests"], 0);

    Ok(())
}

#[tokio::test]
async fn happy_path_assigns_idle_printer_over_http() -> anyhow::Result<()> {
    let printq = PrintqProcess::start()?;
    printq.wait_healthy(TIMEOUT).await?;
    let client = reqwest::Client::new();
    let base = printq.base_url();

    client
        .post(format!("{base}/updatePrinter"))
        .json(&serde_json::json!({
            "id": "P0",
            "name": "lobby-printer",
            "state": "Idle",
            "documents": [],
            "prints": [],
            "lastSeen": null,
            "assignment": null,
        }))
        .send()
        .await?
        .error_for_status()?;

    let req_resp: serde_json::Value = client
        .post(format!("{base}/requestPrint"))
        .json(&serde_json::json!({ "documentId": "D0" }))
        .send()
        .await?
        .json()
        .await?;
    let request_id = req_resp["id"].as_str().unwrap_or_default().to_owned();
    assert!(!request_id.is_empty());

    let deadline = tokio::time::Instant::now() + TIMEOUT;
    loop {
        if tokio::time::Instant::now() > deadline {
            anyhow::bail!("request was never assigned");
        }
        let queue: serde_json::Value =
            client.get(format!("{base}/printQueue")).send().await?.json().await?;
        let request = &queue["requests"][0];
        if request["state"] == "PrintRequestAssigned" {
            assert_eq!(queue["printers"][0]["assignment"]["printRequestId"], request_id);
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }

    Ok(())
}

#[tokio::test]
async fn capacity_exhausted_leaves_surplus_requests_pending() -> anyhow::Result<()> {
    let printq = PrintqProcess::start()?;
    printq.wait_healthy(TIMEOUT).await?;
    let client = reqwest::Client::new();
    let base = printq.base_url();

    client
        .post(format!("{base}/updatePrinter"))
        .json(&serde_json::json!({
            "id": "P0",
            "name": "lobby-printer",
            "state": "Idle",
            "documents": [],
            "prints": [],
            "lastSeen": null,
            "assignment": null,
        }))
        .send()
        .await?
        .error_for_status()?;

    for doc in ["D0", "D1", "D2"] {
        client
            .post(format!("{base}/requestPrint"))
            .json(&serde_json::json!({ "documentId": doc }))
            .send()
            .await?
            .error_for_status()?;
    }

    // Give the reconciler a handful of ticks to converge, then assert
    // exactly one request left PendingAssignment.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let queue: serde_json::Value =
        client.get(format!("{base}/printQueue")).send().await?.json().await?;
    let requests = queue["requests"].as_array().cloned().unwrap_or_default();
    let assigned =
        requests.iter().filter(|r| r["state"] == "PrintRequestAssigned").count();
    let pending =
        requests.iter().filter(|r| r["state"] == "PendingAssignment").count();

    assert_eq!(assigned, 1);
    assert_eq!(pending, 2);

    Ok(())
}

#[tokio::test]
async fn claim_assignment_sets_claimed_flag() -> anyhow::Result<()> {
    let printq = PrintqProcess::start()?;
    printq.wait_healthy(TIMEOUT).await?;
    let client = reqwest::Client::new();
    let base = printq.base_url();

    client
        .post(format!("{base}/updatePrinter"))
        .json(&serde_json::json!({
            "id": "P0",
            "name": "lobby-printer",
            "state": "Idle",
            "documents": [],
            "prints": [],
            "lastSeen": null,
            "assignment": null,
        }))
        .send()
        .await?
        .error_for_status()?;

    client
        .post(format!("{base}/requestPrint"))
        .json(&serde_json::json!({ "documentId": "D0" }))
        .send()
        .await?
        .error_for_status()?;

    let assignment_id = loop {
        let queue: serde_json::Value =
            client.get(format!("{base}/printQueue")).send().await?.json().await?;
        if let Some(id) = queue["printers"][0]["assignment"]["id"].as_str() {
            break id.to_owned();
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    };

    let resp: serde_json::Value = client
        .post(format!("{base}/claimAssignment"))
        .json(&serde_json::json!({ "printerId": "P0", "assignmentId": assignment_id }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["claimed"], true);

    let resp: serde_json::Value = client
        .post(format!("{base}/claimAssignment"))
        .json(&serde_json::json!({ "printerId": "P0", "assignmentId": "bogus" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(resp["claimed"], false);

    Ok(())
}

#[tokio::test]
async fn malformed_printer_snapshot_returns_bad_request() -> anyhow::Result<()> {
    let printq = PrintqProcess::start()?;
    printq.wait_healthy(TIMEOUT).await?;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/updatePrinter", printq.base_url()))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;

    assert_eq!(resp.status().as_u16(), 400);

    Ok(())
}
