//! Edge client tests against an in-process HTTP service.

use std::thread;

use pretty_assertions::assert_eq;
use serde_json::json;

use onc_edge::{EdgeClient, EdgeError};

fn spawn_edge<F>(respond: F) -> String
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock edge");
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .expect("mock edge port");

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let (status, body) = respond(&path);
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json")
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}")
}

fn reading_json(ts: &str, heart_rate: u32) -> serde_json::Value {
    json!({
        "deviceId": "edge-001",
        "patientId": 19,
        "recordedAt": ts,
        "heartRateBpm": heart_rate,
        "spo2Pct": 97.0,
        "temperatureC": 36.6
    })
}

#[tokio::test]
async fn latest_reading_maps_204_to_none() {
    let base = spawn_edge(|_| (204, String::new()));
    let client = EdgeClient::new(base, "tok_pat");

    let latest = client.latest_reading(19).await.expect("latest");
    assert_eq!(latest, None);
}

#[tokio::test]
async fn timeline_merges_latest_into_history() {
    let base = spawn_edge(|path| {
        if path.ends_with("/readings/latest") {
            (200, reading_json("2026-08-06T10:00:00Z", 74).to_string())
        } else if path.ends_with("/readings") {
            (
                200,
                json!([
                    reading_json("2026-08-06T08:00:00Z", 70),
                    reading_json("2026-08-06T09:00:00Z", 72)
                ])
                .to_string(),
            )
        } else {
            (404, String::new())
        }
    });
    let client = EdgeClient::new(base, "tok_pat");

    let timeline = client.timeline(19).await.expect("timeline");
    assert_eq!(timeline.len(), 3);
    assert_eq!(timeline[0].heart_rate_bpm, 74);
    assert_eq!(timeline[2].heart_rate_bpm, 70);
}

#[tokio::test]
async fn claim_device_parses_the_claim() {
    let base = spawn_edge(|path| {
        if path == "/devices/edge-001/claim" {
            (
                200,
                json!({
                    "deviceId": "edge-001",
                    "patientId": 19,
                    "claimedAt": "2026-08-06T07:00:00Z"
                })
                .to_string(),
            )
        } else {
            (404, String::new())
        }
    });
    let client = EdgeClient::new(base, "tok_doc");

    let claim = client.claim_device("edge-001", 19).await.expect("claim");
    assert_eq!(claim.device_id, "edge-001");
    assert_eq!(claim.patient_id, 19);
}

#[tokio::test]
async fn rejected_token_maps_to_unauthorized() {
    let base = spawn_edge(|_| (401, String::new()));
    let client = EdgeClient::new(base, "tok_stale");

    let err = client.all_readings(19).await.unwrap_err();
    assert!(matches!(err, EdgeError::Unauthorized));
}
