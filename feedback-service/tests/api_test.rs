//! Router tests for the feedback API using the stub completion provider.
//!
//! Run with: cargo test -p feedback-service --test api_test

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use feedback_service::services::providers::mock::StubCompletionProvider;
use feedback_service::services::providers::{Completion, CompletionError};
use feedback_service::startup::{build_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

const ALLOWED_ORIGIN: &str = "http://localhost:3000";

fn app(stub: Arc<StubCompletionProvider>) -> Router {
    let state = AppState::new(stub, "gpt-3.5-turbo");
    build_router(state, ALLOWED_ORIGIN).expect("Failed to build router")
}

fn flutter_request() -> Value {
    json!({
        "user_answer": "Atrial fibrillation",
        "correct_answer": "Atrial flutter",
        "user_explanation": "Irregular rhythm with no clear P waves",
        "ekg_attributes": "sawtooth flutter waves, regular atrial rate ~300bpm"
    })
}

fn post_json(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze-response")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn analyze_response_returns_feedback() {
    let stub = Arc::new(StubCompletionProvider::replying(
        "Your diagnosis was close, but...",
    ));

    let (status, body) = send(app(stub.clone()), post_json(flutter_request().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"feedback": "Your diagnosis was close, but..."}));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    let prompt = &requests[0].messages[0].content;
    for field in [
        "Atrial fibrillation",
        "Atrial flutter",
        "Irregular rhythm with no clear P waves",
        "sawtooth flutter waves, regular atrial rate ~300bpm",
    ] {
        assert!(prompt.contains(field), "prompt is missing {:?}", field);
    }
}

#[tokio::test]
async fn upstream_failure_returns_openai_detail() {
    let stub = Arc::new(StubCompletionProvider::failing(CompletionError::Api {
        status: 429,
        message: "Rate limit reached for gpt-3.5-turbo".to_string(),
    }));

    let (status, body) = send(app(stub), post_json(flutter_request().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"detail": "OpenAI API Error: Rate limit reached for gpt-3.5-turbo"})
    );
}

#[tokio::test]
async fn other_failure_returns_unexpected_detail() {
    let stub = Arc::new(StubCompletionProvider::new(Ok(Completion::default())));

    let (status, body) = send(app(stub), post_json(flutter_request().to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("feedback").is_none());
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("An unexpected error occurred: "));
    assert!(detail.len() > "An unexpected error occurred: ".len());
}

#[tokio::test]
async fn missing_field_is_rejected_before_provider_call() {
    for field in [
        "user_answer",
        "correct_answer",
        "user_explanation",
        "ekg_attributes",
    ] {
        let stub = Arc::new(StubCompletionProvider::replying("unused"));
        let mut body = flutter_request();
        body.as_object_mut().unwrap().remove(field);

        let (status, response) = send(app(stub.clone()), post_json(body.to_string())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "field {}", field);
        assert!(response["detail"].as_str().unwrap().contains(field));
        assert!(stub.requests().is_empty());
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));

    let (status, body) = send(app(stub.clone()), post_json("{not json".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn missing_content_type_is_rejected() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze-response")
        .body(Body::from(flutter_request().to_string()))
        .unwrap();

    let (status, _) = send(app(stub.clone()), request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn get_is_not_allowed_on_analyze_response() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));
    let request = Request::builder()
        .uri("/analyze-response")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(app(stub), request).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin_with_credentials() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze-response")
        .header(header::ORIGIN, ALLOWED_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app(stub).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn cors_echoes_configured_origin_on_simple_request() {
    let stub = Arc::new(StubCompletionProvider::replying("ok"));
    let mut request = post_json(flutter_request().to_string());
    request
        .headers_mut()
        .insert(header::ORIGIN, ALLOWED_ORIGIN.parse().unwrap());

    let response = app(stub).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], ALLOWED_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let stub = Arc::new(StubCompletionProvider::replying("ok"));
    let mut request = post_json(flutter_request().to_string());
    request
        .headers_mut()
        .insert(header::ORIGIN, "http://evil.example".parse().unwrap());

    let response = app(stub).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let stub = Arc::new(StubCompletionProvider::replying("ok"));
    let mut request = post_json(flutter_request().to_string());
    request
        .headers_mut()
        .insert("x-request-id", "req-42".parse().unwrap());

    let response = app(stub).oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(headers["x-request-id"], "req-42");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
}

#[tokio::test]
async fn health_and_readiness_report_ok() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));

    let (status, body) = send(
        app(stub.clone()),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "feedback-service");

    let response = app(stub)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn invalid_cors_origin_is_a_config_error() {
    let stub = Arc::new(StubCompletionProvider::replying("unused"));
    let state = AppState::new(stub, "gpt-3.5-turbo");

    assert!(build_router(state, "http://bad\norigin").is_err());
}
