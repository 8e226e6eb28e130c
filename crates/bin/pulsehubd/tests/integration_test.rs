//! End-to-end smoke tests for the full pulsehubd stack.
//!
//! Each test spins up a real hub loop and the real axum router and exercises
//! the HTTP layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pulsehub_adapter_http_axum::router;
use pulsehub_adapter_http_axum::state::AppState;
use pulsehub_app::hub::{Hub, HubHandle};
use pulsehub_app::ticker::ClockTicker;
use tower::ServiceExt;

/// Build a fully-wired router backed by a running hub.
fn app() -> (axum::Router, HubHandle) {
    let (hub, handle) = Hub::new(16);
    tokio::spawn(hub.run());
    (router::build(AppState::new(handle.clone())), handle)
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn next_frame(body: &mut Body) -> Bytes {
    tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("frame should arrive in time")
        .expect("stream should still be open")
        .unwrap()
        .into_data()
        .unwrap()
}

async fn stats(app: &axum::Router) -> String {
    let resp = get(app, "/api/stats").await;
    assert_eq!(resp.status(), StatusCode::OK);
    String::from_utf8(resp.into_body().collect().await.unwrap().to_bytes().to_vec()).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let (app, _hub) = app();

    let resp = get(&app, "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Event stream
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_stream_clock_ticks_to_client() {
    let (app, hub) = app();
    tokio::spawn(ClockTicker::new(hub.clone(), Duration::from_millis(50)).run());

    let resp = get(&app, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/event-stream");
    let mut body = resp.into_body();

    for _ in 0..2 {
        let frame = String::from_utf8(next_frame(&mut body).await.to_vec()).unwrap();
        assert!(frame.starts_with("data: Current Time: "), "{frame:?}");
        assert!(frame.ends_with("\n\n"), "{frame:?}");
    }
}

#[tokio::test]
async fn should_fan_out_to_every_connected_client() {
    let (app, hub) = app();
    let mut first = get(&app, "/").await.into_body();
    let mut second = get(&app, "/").await.into_body();

    hub.publish("A").unwrap();

    assert_eq!(next_frame(&mut first).await, "data: A\n\n");
    assert_eq!(next_frame(&mut second).await, "data: A\n\n");
}

#[tokio::test]
async fn should_stop_delivering_to_disconnected_client() {
    let (app, hub) = app();
    let mut staying = get(&app, "/").await.into_body();
    let leaving = get(&app, "/").await.into_body();
    assert_eq!(stats(&app).await, r#"{"subscribers":2}"#);

    drop(leaving);
    hub.publish("B").unwrap();

    assert_eq!(next_frame(&mut staying).await, "data: B\n\n");
    assert_eq!(stats(&app).await, r#"{"subscribers":1}"#);
}

#[tokio::test]
async fn should_close_streams_on_shutdown() {
    let (app, hub) = app();
    let mut body = get(&app, "/").await.into_body();

    hub.shutdown();

    let end = tokio::time::timeout(Duration::from_secs(2), body.frame())
        .await
        .expect("stream should end promptly");
    assert!(end.is_none());
    assert_eq!(
        get(&app, "/").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
