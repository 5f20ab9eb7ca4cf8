/*
 * Responsibility
 * - Voting on articles and comments; reading back one's own vote
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::v1::dto::articles::{VoteRequest, VoteResponse, VoteStateResponse};
use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::repos::{article_repo, comment_repo};
use crate::state::AppState;

pub async fn get_article_vote(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<VoteStateResponse>, AppError> {
    if article_repo::get(&state.db, article_id).await?.is_none() {
        return Err(AppError::not_found("article"));
    }

    let vote = article_repo::get_vote(&state.db, article_id, user.username()).await?;
    Ok(Json(VoteStateResponse { vote }))
}

pub async fn vote_article(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_VOTE", m))?;

    if article_repo::get(&state.db, article_id).await?.is_none() {
        return Err(AppError::not_found("article"));
    }

    let points = article_repo::set_vote(&state.db, article_id, user.username(), req.vote).await?;

    Ok(Json(VoteResponse {
        vote: req.vote,
        points,
    }))
}

pub async fn get_comment_vote(
    user: SessionUser,
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<Json<VoteStateResponse>, AppError> {
    if comment_repo::get(&state.db, comment_id).await?.is_none() {
        return Err(AppError::not_found("comment"));
    }

    let vote = comment_repo::get_vote(&state.db, comment_id, user.username()).await?;
    Ok(Json(VoteStateResponse { vote }))
}

pub async fn vote_comment(
    user: SessionUser,
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_VOTE", m))?;

    if comment_repo::get(&state.db, comment_id).await?.is_none() {
        return Err(AppError::not_found("comment"));
    }

    let points = comment_repo::set_vote(&state.db, comment_id, user.username(), req.vote).await?;

    Ok(Json(VoteResponse {
        vote: req.vote,
        points,
    }))
}
