/*
 * Responsibility
 * - /article CRUD handlers
 * - Ownership: only the author may modify or delete an article
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::v1::dto::articles::{
    ArticleListQuery, ArticleResponse, NewArticleRequest, UpdateArticleRequest,
};
use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::repos::article_repo::{self, ListOrder};
use crate::repos::subreddit_repo;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 25;
const MAX_LIMIT: i64 = 100;

fn page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<Vec<ArticleResponse>>, AppError> {
    let order = match query.sort.as_deref() {
        None | Some("hot") => ListOrder::Hot,
        Some("new") => ListOrder::New,
        Some(_) => return Err(AppError::bad_request("INVALID_SORT", "sort must be hot or new")),
    };
    let (limit, offset) = page(query.limit, query.offset);

    let rows = article_repo::list(&state.db, query.subreddit.as_deref(), order, limit, offset)
        .await?;

    Ok(Json(rows.into_iter().map(ArticleResponse::from).collect()))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<Json<ArticleResponse>, AppError> {
    let row = article_repo::get(&state.db, article_id)
        .await?
        .ok_or(AppError::not_found("article"))?;

    Ok(Json(row.into()))
}

pub async fn new_article(
    user: SessionUser,
    State(state): State<AppState>,
    Json(req): Json<NewArticleRequest>,
) -> Result<(StatusCode, Json<ArticleResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_ARTICLE", m))?;

    if subreddit_repo::get(&state.db, &req.subreddit).await?.is_none() {
        return Err(AppError::not_found("subreddit"));
    }

    let row = article_repo::create(
        &state.db,
        &req.subreddit,
        &req.kind,
        &req.title,
        &req.body,
        user.username(),
    )
    .await?;

    // A new submission makes its subreddit a little more trending. The cache
    // is advisory: failures are logged, never returned.
    if let Err(e) = state.trending.bump(&row.subreddit, 1).await {
        tracing::warn!(error = %e, subreddit = %row.subreddit, "trending bump failed");
    }

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn modify_article(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<Json<ArticleResponse>, AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_ARTICLE", m))?;

    let existing = article_repo::get(&state.db, article_id)
        .await?
        .ok_or(AppError::not_found("article"))?;
    if existing.author != user.username() {
        return Err(AppError::Forbidden);
    }

    let row = article_repo::update(
        &state.db,
        article_id,
        req.title.as_deref(),
        req.body.as_deref(),
    )
    .await?
    .ok_or(AppError::not_found("article"))?;

    Ok(Json(row.into()))
}

pub async fn delete_article(
    user: SessionUser,
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let existing = article_repo::get(&state.db, article_id)
        .await?
        .ok_or(AppError::not_found("article"))?;
    if existing.author != user.username() {
        return Err(AppError::Forbidden);
    }

    article_repo::delete(&state.db, article_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
