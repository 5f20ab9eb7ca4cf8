/*
 * Responsibility
 * - Article request/response DTOs + list query parameters
 */
use serde::{Deserialize, Serialize};

use crate::repos::article_repo::ArticleRow;

const TITLE_MAX: usize = 300;
const BODY_MAX: usize = 40_000;

#[derive(Debug, Deserialize)]
pub struct NewArticleRequest {
    pub subreddit: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// "text" or "link"
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "text".to_string()
}

impl NewArticleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.subreddit.trim().is_empty() {
            return Err("subreddit is required");
        }
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.title.chars().count() > TITLE_MAX {
            return Err("title must be <= 300 characters");
        }
        if self.body.chars().count() > BODY_MAX {
            return Err("body is too long");
        }
        if self.kind != "text" && self.kind != "link" {
            return Err("kind must be text or link");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateArticleRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err("title cannot be empty");
            }
            if title.chars().count() > TITLE_MAX {
                return Err("title must be <= 300 characters");
            }
        }
        if let Some(body) = &self.body
            && body.chars().count() > BODY_MAX
        {
            return Err("body is too long");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    pub subreddit: Option<String>,
    /// "hot" (default) or "new"
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ArticleResponse {
    pub id: i64,
    pub subreddit: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub points: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ArticleRow> for ArticleResponse {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.article_id,
            subreddit: row.subreddit,
            kind: row.kind,
            title: row.title,
            body: row.body,
            author: row.author,
            points: row.points,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// -1 (down), 0 (clear), or 1 (up)
    pub vote: i16,
}

impl VoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(-1..=1).contains(&self.vote) {
            return Err("vote must be -1, 0, or 1");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub vote: i16,
    pub points: i32,
}

#[derive(Debug, Serialize)]
pub struct VoteStateResponse {
    pub vote: i16,
}
