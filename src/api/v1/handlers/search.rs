/*
 * Responsibility
 * - /search: substring match over article titles and subreddit names
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::v1::dto::subreddits::{SearchQuery, SearchResponse};
use crate::error::AppError;
use crate::repos::search_repo;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 25;
const MAX_LIMIT: i64 = 100;

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::bad_request("EMPTY_QUERY", "q is required"));
    }
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let results = search_repo::search(&state.db, q, limit).await?;

    Ok(Json(SearchResponse {
        articles: results.articles.into_iter().map(Into::into).collect(),
        subreddits: results.subreddits,
    }))
}
