//! Tests for the session middleware: header parsing, token validation,
//! and principal propagation into handlers.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

use common::{TEST_SECRET, test_state};
use forum_api::api::v1::extractors::SessionUser;
use forum_api::middleware;
use forum_api::services::session::SessionCodec;
use forum_api::state::AppState;

async fn whoami(user: SessionUser) -> String {
    user.username().to_string()
}

/// A protected router with a probe route that echoes the principal.
fn guarded_router(state: AppState) -> Router {
    let router = Router::new().route("/whoami", get(whoami));
    middleware::auth::apply(router, state.clone()).with_state(state)
}

async fn get_with_auth(router: &Router, auth: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri("/whoami");
    if let Some(value) = auth {
        builder = builder.header("Authorization", value);
    }

    let response = router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8_lossy(&body_bytes).to_string())
}

fn error_code(body: &str) -> String {
    let json: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    json["error"]["code"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn missing_header_is_401_and_handler_never_runs() {
    let state = test_state();
    let hit = Arc::new(AtomicBool::new(false));
    let flag = hit.clone();

    let router = Router::new().route(
        "/guarded",
        get(move || {
            let flag = flag.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
                "ok"
            }
        }),
    );
    let router = middleware::auth::apply(router, state.clone()).with_state(state);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/guarded")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!hit.load(Ordering::SeqCst), "handler must not be invoked");
}

#[tokio::test]
async fn header_without_separator_is_401_not_a_crash() {
    let state = test_state();
    let router = guarded_router(state);

    let (status, body) = get_with_auth(&router, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "MALFORMED_CREDENTIALS");

    // The pipeline must still be healthy afterwards.
    let codec = SessionCodec::new(TEST_SECRET);
    let token = codec.issue("alice").unwrap();
    let (status, body) = get_with_auth(&router, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "alice");
}

#[tokio::test]
async fn wrong_scheme_is_401() {
    let router = guarded_router(test_state());

    let (status, _) = get_with_auth(&router, Some("Basic dXNlcjpwdw==")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Scheme matching is exact; lowercase is rejected too.
    let (status, _) = get_with_auth(&router, Some("bearer sometoken")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_reaches_handler_with_principal() {
    let router = guarded_router(test_state());

    let token = SessionCodec::new(TEST_SECRET).issue("eve_42").unwrap();
    let (status, body) = get_with_auth(&router, Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "eve_42");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() {
    let router = guarded_router(test_state());

    let token = SessionCodec::new("some-other-secret").issue("alice").unwrap();
    let (status, body) = get_with_auth(&router, Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "TOKEN_BAD_SIGNATURE");
}

#[tokio::test]
async fn expired_token_is_401_with_expiry_code() {
    let router = guarded_router(test_state());

    let iat = chrono::Utc::now().timestamp() - 8 * 24 * 60 * 60;
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &serde_json::json!({ "username": "alice", "iat": iat }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body) = get_with_auth(&router, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), "SESSION_EXPIRED");
}

#[tokio::test]
async fn unprotected_route_needs_no_header() {
    // A route mounted next to the protected group stays public.
    let state = test_state();
    let protected =
        middleware::auth::apply(Router::new().route("/whoami", get(whoami)), state.clone());
    let router = Router::new()
        .route("/open", get(|| async { "open" }))
        .merge(protected)
        .with_state(state);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/open")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
