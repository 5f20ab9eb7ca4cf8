/*
 * Responsibility
 * - /subreddit list/get/create and /trending
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::v1::dto::subreddits::{
    NewSubredditRequest, SubredditListResponse, SubredditResponse, TrendingResponse,
};
use crate::api::v1::extractors::SessionUser;
use crate::error::AppError;
use crate::repos::subreddit_repo;
use crate::state::AppState;

const TRENDING_LIMIT: usize = 5;

pub async fn list_subreddits(
    State(state): State<AppState>,
) -> Result<Json<SubredditListResponse>, AppError> {
    let names = subreddit_repo::list_names(&state.db).await?;
    Ok(Json(SubredditListResponse { subreddits: names }))
}

pub async fn get_subreddit(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SubredditResponse>, AppError> {
    let row = subreddit_repo::get(&state.db, &name)
        .await?
        .ok_or(AppError::not_found("subreddit"))?;

    Ok(Json(row.into()))
}

pub async fn new_subreddit(
    _user: SessionUser,
    State(state): State<AppState>,
    Json(req): Json<NewSubredditRequest>,
) -> Result<(StatusCode, Json<SubredditResponse>), AppError> {
    req.validate()
        .map_err(|m| AppError::bad_request("INVALID_SUBREDDIT", m))?;

    let row = subreddit_repo::create(&state.db, &req.name, &req.description)
        .await
        .map_err(|e| match e {
            crate::repos::error::RepoError::Conflict => {
                AppError::conflict("SUBREDDIT_EXISTS", "subreddit already exists")
            }
            other => AppError::from(other),
        })?;

    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn trending(State(state): State<AppState>) -> Result<Json<TrendingResponse>, AppError> {
    let subreddits = state.trending.top(TRENDING_LIMIT).await?;
    Ok(Json(TrendingResponse { subreddits }))
}
