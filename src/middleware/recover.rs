//! Outermost fault boundary.
//!
//! A panic anywhere downstream is converted into a bare 500 with
//! `Connection: close`; the process keeps serving other requests. Handlers
//! report anticipated failures through `AppError`; this layer exists only
//! for the unanticipated ones.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    Router,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tower_http::catch_panic::CatchPanicLayer;

pub fn apply(router: Router) -> Router {
    router.layer(CatchPanicLayer::custom(render_panic))
}

fn render_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    tracing::error!(
        panic = %detail,
        backtrace = %Backtrace::force_capture(),
        "request handler panicked"
    );

    let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    // The connection state is unknown after a panic; tell the client not to
    // reuse it.
    res.headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    res
}
