#![allow(clippy::unwrap_used)]
// Integration tests for the REST variant using wiremock.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trydan_api::{ApiVariant, ChargerClient, ChargeState, ClientConfig, Error, RetryPolicy};

// ── Helpers ─────────────────────────────────────────────────────────

const DEVICE_ID: &str = "abc123";
const TOKEN: &str = "test-token";

async fn setup() -> (MockServer, ChargerClient) {
    let server = MockServer::start().await;
    let mut config = ClientConfig::new(ApiVariant::Rest, TOKEN.to_string().into(), DEVICE_ID);
    config.base_url = Some(server.uri());
    config.retry = RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    };
    let client = ChargerClient::new(&config).unwrap();
    (server, client)
}

fn device_path(suffix: &str) -> String {
    format!("/devices/{DEVICE_ID}/{suffix}")
}

// ── Status ──────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_status_unwraps_the_data_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(device_path("status")))
        .and(header("authorization", format!("Bearer {TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "ev_power": 1400,
                "status": 2,
                "current": 16,
                "firmware": "2.1.7"
            }
        })))
        .mount(&server)
        .await;

    let status = client.fetch_status().await.unwrap();

    assert_eq!(status.charge_power, 1400.0);
    assert_eq!(status.charge_state, ChargeState::ConnectedCharging);
    assert_eq!(status.charge_current, 16);
    assert_eq!(status.firmware_version, "2.1.7");
}

#[tokio::test]
async fn fetch_status_accepts_a_bare_object() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(device_path("status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "power": 0,
            "state": 0
        })))
        .mount(&server)
        .await;

    let status = client.fetch_status().await.unwrap();
    assert_eq!(status.charge_state, ChargeState::Disconnected);
    // Absent fields resolve to their documented defaults.
    assert_eq!(status.voltage, 230.0);
}

#[tokio::test]
async fn missing_device_is_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(device_path("status")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.fetch_status().await;
    assert!(matches!(result, Err(Error::NotFound)));
}

// ── Identity ────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_identity_reads_the_device_record() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(format!("/devices/{DEVICE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": DEVICE_ID,
                "name": "Driveway",
                "serial": "SN-42"
            }
        })))
        .mount(&server)
        .await;

    let identity = client.fetch_identity().await.unwrap();

    assert_eq!(identity.device_id, DEVICE_ID);
    assert_eq!(identity.name, "Driveway");
    assert_eq!(identity.serial_number, "SN-42");
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn set_current_posts_a_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(device_path("set_current")))
        .and(body_json(json!({ "current": 16 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_current(16).await.unwrap();
}

#[tokio::test]
async fn limit_and_mode_writes_hit_their_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(device_path("set_max_current")))
        .and(body_json(json!({ "max_current": 32 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(device_path("set_pause")))
        .and(body_json(json!({ "paused": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(device_path("set_km")))
        .and(body_json(json!({ "km_to_charge": 120 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.set_max_current(32).await.unwrap();
    client.set_paused(true).await.unwrap();
    client.set_km_to_charge(120).await.unwrap();
}

#[tokio::test]
async fn charge_commands_hit_their_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(device_path("start_charge")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(device_path("stop_charge")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client.start_charging().await.unwrap();
    client.stop_charging().await.unwrap();
}

#[tokio::test]
async fn unsupported_operations_issue_no_requests() {
    let (server, client) = setup().await;

    assert!(matches!(
        client.restart_device().await,
        Err(Error::UnsupportedOperation(_))
    ));
    assert!(matches!(
        client.reset_session().await,
        Err(Error::UnsupportedOperation(_))
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}
