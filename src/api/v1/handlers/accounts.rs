/*
 * Responsibility
 * - Public profile plus the authenticated /me endpoints
 *   (bio, saved articles, joined subreddits)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::v1::dto::accounts::{ProfileResponse, StateResponse, UpdateBioRequest};
use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::repos::{account_repo, article_repo, subreddit_repo};
use crate::state::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<ProfileResponse>, AppError> {
    let account = account_repo::get(&state.db, &username)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(ProfileResponse {
        username: account.username,
        bio: account.bio,
        joined_at: account.created_at,
    }))
}

pub async fn modify_bio(
    user: SessionUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateBioRequest>,
) -> Result<StatusCode, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_BIO", m))?;

    let updated = account_repo::update_bio(&state.db, user.username(), &req.bio).await?;
    if !updated {
        return Err(AppError::not_found("user"));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn saved_state(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<StateResponse>, AppError> {
    let saved = account_repo::saved_state(&state.db, user.username(), article_id).await?;
    Ok(Json(StateResponse { state: saved }))
}

pub async fn save_article(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if article_repo::get(&state.db, article_id).await?.is_none() {
        return Err(AppError::not_found("article"));
    }

    account_repo::save_article(&state.db, user.username(), article_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unsave_article(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let removed = account_repo::unsave_article(&state.db, user.username(), article_id).await?;
    if !removed {
        return Err(AppError::not_found("saved article"));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn joined_state(
    user: SessionUser,
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
) -> Result<Json<StateResponse>, AppError> {
    let joined = account_repo::joined_state(&state.db, user.username(), &subreddit).await?;
    Ok(Json(StateResponse { state: joined }))
}

pub async fn join_subreddit(
    user: SessionUser,
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
) -> Result<StatusCode, AppError> {
    if subreddit_repo::get(&state.db, &subreddit).await?.is_none() {
        return Err(AppError::not_found("subreddit"));
    }

    account_repo::join_subreddit(&state.db, user.username(), &subreddit).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn leave_subreddit(
    user: SessionUser,
    State(state): State<AppState>,
    Path(subreddit): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = account_repo::leave_subreddit(&state.db, user.username(), &subreddit).await?;
    if !removed {
        return Err(AppError::not_found("membership"));
    }

    Ok(StatusCode::NO_CONTENT)
}
