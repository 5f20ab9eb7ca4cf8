//! Tests for the outermost fault boundary: a panicking handler becomes a
//! 500 with `Connection: close`, and the process keeps serving.

use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
use tower::ServiceExt;

use forum_api::middleware;

async fn boom() -> &'static str {
    panic!("kaboom")
}

async fn fine() -> &'static str {
    "fine"
}

fn pipeline() -> Router {
    let router = Router::new()
        .route("/boom", get(boom))
        .route("/ok", get(fine));

    // Same outer ordering as the real app: log inside, boundary outermost.
    let router = router.layer(axum::middleware::from_fn(
        middleware::request_log::log_request,
    ));
    middleware::recover::apply(router)
}

async fn get_status(router: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let connection = response
        .headers()
        .get("connection")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, connection, String::from_utf8_lossy(&body_bytes).to_string())
}

#[tokio::test]
async fn panic_becomes_500_with_connection_close() {
    let router = pipeline();

    let (status, connection, body) = get_status(&router, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(connection.as_deref(), Some("close"));
    assert!(body.is_empty(), "panic response carries no body");
}

#[tokio::test]
async fn serving_continues_after_a_panic() {
    let router = pipeline();

    let (status, ..) = get_status(&router, "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, connection, body) = get_status(&router, "/ok").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(connection, None);
    assert_eq!(body, "fine");
}

#[tokio::test]
async fn concurrent_request_is_unaffected_by_a_panic() {
    let router = pipeline();

    let (faulted, healthy) = tokio::join!(
        get_status(&router, "/boom"),
        get_status(&router, "/ok"),
    );

    assert_eq!(faulted.0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(healthy.0, StatusCode::OK);
    assert_eq!(healthy.2, "fine");
}
