/*
 * Responsibility
 * - Subreddit request/response DTOs + trending/search responses
 */
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::articles::ArticleResponse;
use crate::repos::subreddit_repo::SubredditRow;

const NAME_MAX: usize = 30;
const DESCRIPTION_MAX: usize = 2000;

#[derive(Debug, Deserialize)]
pub struct NewSubredditRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewSubredditRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let len = self.name.chars().count();
        if len == 0 || len > NAME_MAX {
            return Err("name must be 1-30 characters");
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err("name must be alphanumeric or underscore");
        }
        if self.description.chars().count() > DESCRIPTION_MAX {
            return Err("description must be <= 2000 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SubredditResponse {
    pub name: String,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<SubredditRow> for SubredditResponse {
    fn from(row: SubredditRow) -> Self {
        Self {
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubredditListResponse {
    pub subreddits: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub subreddits: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub articles: Vec<ArticleResponse>,
    pub subreddits: Vec<String>,
}
