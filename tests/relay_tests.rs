use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use host_summarizer::api::{RelayState, build_router};
use host_summarizer::core::models::{AgentState, LIVENESS_MESSAGE};
use host_summarizer::errors::AgentError;
use host_summarizer::worker::AgentPool;
use serde_json::{Value, json};
use tower::ServiceExt;

fn router_with<F>(agent: F, timeout: Duration) -> Router
where
    F: Fn(AgentState) -> Result<AgentState, AgentError> + Send + Sync + 'static,
{
    let pool = AgentPool::new(Arc::new(agent), 2, timeout);
    build_router(RelayState::new(pool), None)
}

fn summarize_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn summary_of(text: &str) -> AgentState {
    let mut state = AgentState::new();
    state.insert("summary".to_string(), json!(text));
    state
}

#[tokio::test]
async fn test_root_returns_liveness_message() {
    let router = router_with(|_| Ok(summary_of("unused")), Duration::from_secs(5));

    for _ in 0..2 {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(router.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": LIVENESS_MESSAGE }));
    }
}

#[tokio::test]
async fn test_summary_is_relayed_verbatim() {
    let router = router_with(|_| Ok(summary_of("X")), Duration::from_secs(5));

    let (status, body) = send(router, summarize_request(r#"{"hosts": []}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "X" }));
}

#[tokio::test]
async fn test_document_is_wrapped_as_host_data() {
    let agent = |state: AgentState| -> Result<AgentState, AgentError> {
        let keys: Vec<&String> = state.keys().collect();
        assert_eq!(keys, vec!["host_data"]);
        let host_data = state.get("host_data").cloned().unwrap_or(Value::Null);
        Ok(summary_of(&host_data.to_string()))
    };
    let router = router_with(agent, Duration::from_secs(5));

    let (status, body) = send(
        router,
        summarize_request(r#"{"ip": "192.0.2.1", "services": [{"port": 443}]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let echoed: Value = serde_json::from_str(body["summary"].as_str().unwrap()).unwrap();
    assert_eq!(echoed, json!({"ip": "192.0.2.1", "services": [{"port": 443}]}));
}

#[tokio::test]
async fn test_malformed_body_never_reaches_agent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let router = router_with(
        move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(summary_of("should not happen"))
        },
        Duration::from_secs(5),
    );

    let (status, body) = send(router.clone(), summarize_request("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(router.clone(), summarize_request("[1, 2, 3]")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/summarize")
        .body(Body::from(r#"{"a": 1}"#))
        .unwrap();
    let (status, _) = send(router, no_content_type).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_agent_failure_is_opaque_bad_gateway() {
    let router = router_with(
        |_| Err(AgentError::Failed("secret stack trace".to_string())),
        Duration::from_secs(5),
    );

    let (status, body) = send(router, summarize_request(r#"{"a": 1}"#)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "summarization agent failed" }));
    assert!(!body.to_string().contains("secret"));
}

#[tokio::test]
async fn test_missing_or_non_string_summary_is_an_error() {
    let missing = router_with(|state| Ok(state), Duration::from_secs(5));
    let (status, body) = send(missing, summarize_request(r#"{"a": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("summary").is_none());

    let structured = router_with(
        |_| {
            let mut state = AgentState::new();
            state.insert("summary".to_string(), json!({"host": "text"}));
            Ok(state)
        },
        Duration::from_secs(5),
    );
    let (status, body) = send(structured, summarize_request(r#"{"a": 1}"#)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.get("summary").is_none());
}

#[tokio::test]
async fn test_slow_agent_times_out() {
    let router = router_with(
        |_| {
            std::thread::sleep(Duration::from_millis(300));
            Ok(summary_of("late"))
        },
        Duration::from_millis(50),
    );

    let (status, body) = send(router, summarize_request(r#"{"a": 1}"#)).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body, json!({ "error": "summarization agent timed out" }));
}

#[tokio::test]
async fn test_concurrent_requests_get_their_own_summary() {
    let router = router_with(
        |state: AgentState| {
            std::thread::sleep(Duration::from_millis(100));
            let id = state["host_data"]["id"].as_str().unwrap_or("none").to_string();
            Ok(summary_of(&format!("summary for {id}")))
        },
        Duration::from_secs(5),
    );

    let (first, second) = tokio::join!(
        send(router.clone(), summarize_request(r#"{"id": "alpha"}"#)),
        send(router.clone(), summarize_request(r#"{"id": "beta"}"#)),
    );

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.1, json!({ "summary": "summary for alpha" }));
    assert_eq!(second.0, StatusCode::OK);
    assert_eq!(second.1, json!({ "summary": "summary for beta" }));
}

#[tokio::test]
async fn test_permissive_cors_allows_any_origin() {
    let router = router_with(|_| Ok(summary_of("X")), Duration::from_secs(5));
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_restricted_cors_only_echoes_listed_origins() {
    let agent = |_: AgentState| -> Result<AgentState, AgentError> { Ok(summary_of("X")) };
    let pool = AgentPool::new(Arc::new(agent), 1, Duration::from_secs(5));
    let origins = vec!["http://localhost:8501".to_string()];
    let router = build_router(RelayState::new(pool), Some(origins.as_slice()));

    let allowed = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://localhost:8501")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:8501")
    );

    let denied = Request::builder()
        .uri("/")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(denied).await.unwrap();
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
