//! One access-log line per request, before dispatch.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::Response,
};

pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    // ConnectInfo is absent when the router is driven without a real
    // listener (tests); logging must never be the reason a request fails.
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        remote = %remote,
        version = ?req.version(),
        method = %req.method(),
        target = %req.uri(),
        "request"
    );

    next.run(req).await
}
