/*
 * Responsibility
 * - Comment request/response DTOs
 */
use serde::{Deserialize, Serialize};

use crate::repos::comment_repo::CommentRow;

const BODY_MAX: usize = 10_000;

#[derive(Debug, Deserialize)]
pub struct NewCommentRequest {
    pub article_id: i64,
    pub body: String,
}

impl NewCommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.body.trim().is_empty() {
            return Err("body is required");
        }
        if self.body.chars().count() > BODY_MAX {
            return Err("body is too long");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}

impl UpdateCommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.body.trim().is_empty() {
            return Err("body cannot be empty");
        }
        if self.body.chars().count() > BODY_MAX {
            return Err("body is too long");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub article_id: i64,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub article_id: i64,
    pub body: String,
    pub author: String,
    pub points: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.comment_id,
            article_id: row.article_id,
            body: row.body,
            author: row.author,
            points: row.points,
            created_at: row.created_at,
        }
    }
}
