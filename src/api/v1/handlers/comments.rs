/*
 * Responsibility
 * - /comment CRUD handlers, same ownership rule as articles
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::v1::dto::comments::{
    CommentListQuery, CommentResponse, NewCommentRequest, UpdateCommentRequest,
};
use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::repos::{article_repo, comment_repo};
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<CommentListQuery>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);

    let rows = comment_repo::list_for_article(&state.db, query.article_id, limit, offset).await?;

    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<Json<CommentResponse>, AppError> {
    let row = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("comment"))?;

    Ok(Json(row.into()))
}

pub async fn new_comment(
    user: SessionUser,
    State(state): State<AppState>,
    Json(req): Json<NewCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_COMMENT", m))?;

    if article_repo::get(&state.db, req.article_id).await?.is_none() {
        return Err(AppError::not_found("article"));
    }

    let row = comment_repo::create(&state.db, req.article_id, &req.body, user.username()).await?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn modify_comment(
    user: SessionUser,
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_COMMENT", m))?;

    let existing = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("comment"))?;
    if existing.author != user.username() {
        return Err(AppError::Forbidden);
    }

    let row = comment_repo::update(&state.db, comment_id, &req.body)
        .await?
        .ok_or(AppError::not_found("comment"))?;

    Ok(Json(row.into()))
}

pub async fn delete_comment(
    user: SessionUser,
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = comment_repo::get(&state.db, comment_id)
        .await?
        .ok_or(AppError::not_found("comment"))?;
    if existing.author != user.username() {
        return Err(AppError::Forbidden);
    }

    comment_repo::delete(&state.db, comment_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
