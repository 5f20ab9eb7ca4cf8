/*
 * Responsibility
 * - /login and /register: credential check / account creation, then a fresh
 *   session token in the response
 */
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::v1::dto::accounts::{LoginRequest, RegisterRequest, SessionResponse};
use crate::error::AppError;
use crate::repos::account_repo;
use crate::services::credentials;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_ACCOUNT", m))?;

    let salt = credentials::new_salt();
    let hash = credentials::hash_password(&req.password, &salt);

    account_repo::create(&state.db, &req.username, &hash, &salt)
        .await
        .map_err(|e| match e {
            crate::repos::error::RepoError::Conflict => {
                AppError::conflict("USERNAME_TAKEN", "username already taken")
            }
            other => AppError::from(other),
        })?;

    let token = state.sessions.issue(&req.username)?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            username: req.username,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_CREDENTIALS_FORMAT", m))?;

    // Unknown username and wrong password answer identically.
    let account = account_repo::get(&state.db, &req.username)
        .await?
        .ok_or(AppError::unauthorized("BAD_CREDENTIALS"))?;

    if !credentials::verify_password(&req.password, &account.salt, &account.password_hash) {
        return Err(AppError::unauthorized("BAD_CREDENTIALS"));
    }

    let token = state.sessions.issue(&account.username)?;

    Ok(Json(SessionResponse {
        username: account.username,
        token,
    }))
}
