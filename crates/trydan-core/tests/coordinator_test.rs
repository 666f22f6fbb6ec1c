#![allow(clippy::unwrap_used)]
// Coordinator integration tests, driven end-to-end through the real
// gateway client against a wiremock vendor.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trydan_core::{ApiVariant, ChargerConfig, Coordinator, RefreshPhase};

// ── Helpers ─────────────────────────────────────────────────────────

fn config_for(server: &MockServer) -> ChargerConfig {
    let mut cfg = ChargerConfig::new(
        ApiVariant::Gateway,
        "test-token".to_owned().into(),
        "abc123",
    );
    cfg.base_url = Some(server.uri());
    cfg.timeout = Duration::from_secs(2);
    // Single attempt keeps failure tests fast; retry behavior is covered
    // in trydan-api's own tests.
    cfg.max_retries = 1;
    cfg
}

fn status_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

// ── First refresh semantics ─────────────────────────────────────────

#[tokio::test]
async fn start_fails_when_the_first_refresh_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();
    let result = coordinator.start().await;

    assert!(result.is_err(), "setup must abort on a failed first fetch");
    assert!(coordinator.current_status().is_none());
    assert!(!coordinator.last_update_succeeded());
}

#[tokio::test]
async fn start_completes_after_a_successful_first_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(status_response("state:2,intensity:16,power:3600"))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();
    coordinator.start().await.unwrap();

    let status = coordinator.current_status().unwrap();
    assert!(status.charge_state.is_charging());
    assert_eq!(status.intensity, 16);
    assert!(coordinator.last_update_succeeded());

    coordinator.shutdown().await;
}

// ── In-flight deduplication ─────────────────────────────────────────

#[tokio::test]
async fn concurrent_refreshes_share_one_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(
            status_response("state:1,intensity:6").set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();

    let (a, b) = tokio::join!(
        coordinator.request_refresh(),
        coordinator.request_refresh()
    );
    let a = a.unwrap();
    let b = b.unwrap();

    // Both callers observed the same snapshot from a single vendor call.
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn joined_refresh_adopts_a_failure_too() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(ResponseTemplate::new(500).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();

    let (a, b) = tokio::join!(
        coordinator.request_refresh(),
        coordinator.request_refresh()
    );

    assert!(a.is_err());
    assert!(b.is_err());
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ── Stale-on-failure ────────────────────────────────────────────────

#[tokio::test]
async fn failed_refresh_retains_the_previous_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(status_response("state:2,power:7200"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();

    let first = coordinator.request_refresh().await.unwrap();
    assert!(coordinator.last_update_succeeded());

    let second = coordinator.request_refresh().await;
    assert!(second.is_err());

    // Stale data is preferred over no data; the flag reports the failure.
    let retained = coordinator.current_status().unwrap();
    assert!(Arc::ptr_eq(&first, &retained));
    assert!(!coordinator.last_update_succeeded());
}

// ── Subscription ────────────────────────────────────────────────────

#[tokio::test]
async fn subscribers_observe_success_and_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(status_response("state:1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/device/reported"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let coordinator = Coordinator::new(&config_for(&server)).unwrap();
    let mut rx = coordinator.subscribe();

    coordinator.request_refresh().await.unwrap();
    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert_eq!(state.phase, RefreshPhase::Ready);
        assert!(state.last_update_ok);
        assert!(state.status.is_some());
    }

    let _ = coordinator.request_refresh().await;
    rx.changed().await.unwrap();
    {
        let state = rx.borrow_and_update();
        assert_eq!(state.phase, RefreshPhase::Failed);
        assert!(!state.last_update_ok);
        assert!(state.status.is_some(), "stale status must be retained");
        assert!(state.last_error.is_some());
    }
}
