//! Session gate: `Authorization: Bearer <token>` → verified `SessionUser`
//! in the request extensions.
//!
//! Applied with `route_layer`, so it runs only once routing has resolved a
//! protected route. Every rejection is a 401; the error code tells the
//! client (and the logs) which check failed. The header is parsed
//! defensively: anything that is not exactly the `Bearer` scheme plus a
//! credential is rejected, never indexed into.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::state::AppState;

/// Require a valid session on every route of `router`.
///
/// ```ignore
/// let protected = middleware::auth::apply(protected, state.clone());
/// public.merge(protected)
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, require_session))
}

async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::unauthorized("MISSING_CREDENTIALS"))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AppError::unauthorized("MALFORMED_CREDENTIALS"))?;

    let username = match state.sessions.validate(token) {
        Ok(username) => username,
        Err(err) => {
            tracing::warn!(error = %err, "session token rejected");
            return Err(AppError::from(err));
        }
    };

    // Hand the verified principal to the handler via its extractor.
    req.extensions_mut().insert(SessionUser::new(username));

    Ok(next.run(req).await)
}
