//! Integration tests for API routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server.
//! Email providers are replaced by in-process fake mailers.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use valentine_api::routes::create_router;
use valentine_api::state::AppState;
use valentine_common::config::{AppConfig, DEFAULT_EMAIL_FROM};
use valentine_common::types::{Acceptance, DEFAULT_VALENTINE};
use valentine_notifier::mailer::SendFuture;
use valentine_notifier::{Dispatcher, Mailer, NotifyError};

// ============================================================
// Helpers
// ============================================================

/// Records every acceptance it is asked to send.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Acceptance>>,
}

impl Mailer for RecordingMailer {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send<'a>(&'a self, acceptance: &'a Acceptance) -> SendFuture<'a> {
        Box::pin(async move {
            self.sent.lock().unwrap().push(acceptance.clone());
            Ok(())
        })
    }
}

/// Fails every send, like a provider outage.
struct FailingMailer;

impl Mailer for FailingMailer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn send<'a>(&'a self, _acceptance: &'a Acceptance) -> SendFuture<'a> {
        Box::pin(async move {
            Err(NotifyError::Rejected {
                provider: "failing",
                status: 503,
                body: "provider down".to_string(),
            })
        })
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        my_valentine: Some("Ada".to_string()),
        resend_api_key: None,
        resend_api_url: "http://unused".to_string(),
        email_from: DEFAULT_EMAIL_FROM.to_string(),
        notify_email: Some("me@example.com".to_string()),
        emailjs_service_id: None,
        emailjs_template_id: None,
        emailjs_public_key: None,
        emailjs_private_key: None,
        emailjs_api_url: "http://unused".to_string(),
        notify_timeout_secs: 1,
        body_limit_bytes: 4096,
    }
}

fn app_with(primary: Arc<dyn Mailer>, secondary: Vec<Arc<dyn Mailer>>) -> axum::Router {
    create_router(AppState::new(
        test_config(),
        Dispatcher::new(primary, secondary),
    ))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn text_body(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

// ============================================================
// Health
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "valentine-api");
}

// ============================================================
// POST /api/notify
// ============================================================

#[tokio::test]
async fn test_notify_rejects_other_methods() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let app = app_with(Arc::new(RecordingMailer::default()), vec![]);
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/notify")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        let json = json_body(response).await;
        assert_eq!(json["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn test_notify_success() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(mailer.clone(), vec![]);

    let request = Request::builder()
        .method("POST")
        .uri("/api/notify")
        .header("content-type", "application/json")
        .header("x-forwarded-for", "198.51.100.7, 10.0.0.1")
        .header("accept-language", "en-GB")
        .body(Body::from(
            r#"{"myValentine":"Ada","noCount":5,"localTime":"14 Feb 2026, 09:30"}"#,
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({ "ok": true }));

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].valentine, "Ada");
    assert_eq!(sent[0].no_count, 5);
    assert_eq!(sent[0].local_time, "14 Feb 2026, 09:30");
    assert_eq!(sent[0].metadata.ip, "198.51.100.7");
    assert_eq!(sent[0].metadata.language, "en-GB");
    assert_eq!(sent[0].metadata.city, "unknown");
}

#[tokio::test]
async fn test_notify_empty_body_uses_defaults() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(mailer.clone(), vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notify")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent[0].valentine, DEFAULT_VALENTINE);
    assert_eq!(sent[0].no_count, 0);
    assert!(!sent[0].local_time.is_empty());
}

#[tokio::test]
async fn test_notify_non_integer_no_count() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(mailer.clone(), vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notify")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"myValentine":"Ada","noCount":"3"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent[0].no_count, 3);
}

#[tokio::test]
async fn test_notify_invalid_json() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(mailer.clone(), vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notify")
                .header("content-type", "application/json")
                .body(Body::from("{\"noCount\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_notify_failure_returns_500() {
    let app = app_with(Arc::new(FailingMailer), vec![]);

    let response = app
        .oneshot(post_json("/api/notify", serde_json::json!({ "myValentine": "Ada" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Failed to send email");
}

#[tokio::test]
async fn test_notify_secondary_failure_does_not_fail_request() {
    let primary = Arc::new(RecordingMailer::default());
    let app = app_with(primary.clone(), vec![Arc::new(FailingMailer)]);

    let response = app
        .oneshot(post_json("/api/notify", serde_json::json!({ "noCount": 1 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(primary.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_notify_body_limit() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = app_with(mailer.clone(), vec![]);

    let huge = "x".repeat(10_000);
    let response = app
        .oneshot(post_json("/api/notify", serde_json::json!({ "myValentine": huge })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(mailer.sent.lock().unwrap().is_empty());
}

// ============================================================
// POST /api/evade
// ============================================================

#[tokio::test]
async fn test_evade_moves_button_away_and_stays_in_zone() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let body = serde_json::json!({
        "pointer": { "x": 175.0, "y": 140.0 },
        "button": { "left": 150.0, "top": 120.0, "width": 80.0, "height": 40.0 },
        "zone": { "left": 50.0, "top": 100.0, "width": 400.0, "height": 200.0 },
        "scales": { "yes": 1.0, "no": 1.0 }
    });
    let response = app.oneshot(post_json("/api/evade", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["moved"], true);
    // Pointer left of centre pushes the button right.
    assert_eq!(json["left"], 250.0);
    assert_eq!(json["top"], 20.0);
    assert!(json["scales"]["yes"].as_f64().unwrap() > 1.0);
    assert!(json["scales"]["no"].as_f64().unwrap() < 1.0);
}

#[tokio::test]
async fn test_evade_without_pointer_teleports_within_zone() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let body = serde_json::json!({
        "button": { "left": 150.0, "top": 120.0, "width": 80.0, "height": 40.0 },
        "zone": { "left": 50.0, "top": 100.0, "width": 400.0, "height": 200.0 }
    });
    let response = app.oneshot(post_json("/api/evade", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["moved"], true);
    let left = json["left"].as_f64().unwrap();
    let top = json["top"].as_f64().unwrap();
    assert!((0.0..=320.0).contains(&left));
    assert!((0.0..=160.0).contains(&top));
}

#[tokio::test]
async fn test_evade_rejects_negative_sizes() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let body = serde_json::json!({
        "button": { "left": 0.0, "top": 0.0, "width": -5.0, "height": 40.0 },
        "zone": { "left": 0.0, "top": 0.0, "width": 400.0, "height": 200.0 }
    });
    let response = app.oneshot(post_json("/api/evade", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================
// GET /
// ============================================================

#[tokio::test]
async fn test_card_first_visit() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("val_accepted_v1=false;")));
    assert!(cookies.iter().any(|c| c.starts_with("val_noCount_v1=0;")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=31536000")));

    let html = text_body(response).await;
    assert!(html.contains("Ada, will you be my valentine?"));
    assert!(html.contains(r#"class="card open""#));
}

#[tokio::test]
async fn test_card_returning_visitor_who_accepted() {
    let app = app_with(Arc::new(RecordingMailer::default()), vec![]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, "val_accepted_v1=true; val_noCount_v1=4xyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    // Normalized on the way back out.
    assert!(cookies.iter().any(|c| c.starts_with("val_noCount_v1=4;")));

    let html = text_body(response).await;
    assert!(html.contains("Hey there, Ada🦋💖, my valentine!🌹"));
    assert!(html.contains(r#"class="card accepted""#));
    assert!(html.contains(r#""noCount":4"#));
}
