/*
 * Responsibility
 * - comments CRUD + per-user votes, mirroring article_repo
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: i64,

    #[sqlx(rename = "articleId")]
    pub article_id: i64,

    pub body: String,
    pub author: String,
    pub points: i32,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

const COMMENT_COLUMNS: &str =
    r#""commentId", "articleId", body, author, points, "createdAt""#;

pub async fn list_for_article(
    pool: &PgPool,
    article_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<CommentRow>, RepoError> {
    let rows = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
        WHERE "articleId" = $1
        ORDER BY "createdAt" ASC, "commentId" ASC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(article_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get(pool: &PgPool, comment_id: i64) -> Result<Option<CommentRow>, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        SELECT {COMMENT_COLUMNS}
        FROM comments
        WHERE "commentId" = $1
        "#
    ))
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    article_id: i64,
    body: &str,
    author: &str,
) -> Result<CommentRow, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        INSERT INTO comments ("articleId", body, author)
        VALUES ($1, $2, $3)
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(article_id)
    .bind(body)
    .bind(author)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    comment_id: i64,
    body: &str,
) -> Result<Option<CommentRow>, RepoError> {
    let row = sqlx::query_as::<_, CommentRow>(&format!(
        r#"
        UPDATE comments
        SET body = $2
        WHERE "commentId" = $1
        RETURNING {COMMENT_COLUMNS}
        "#
    ))
    .bind(comment_id)
    .bind(body)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, comment_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE "commentId" = $1
        "#,
    )
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_vote(
    pool: &PgPool,
    comment_id: i64,
    username: &str,
    vote: i16,
) -> Result<i32, RepoError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO comment_votes ("commentId", username, vote)
        VALUES ($1, $2, $3)
        ON CONFLICT ("commentId", username) DO UPDATE SET vote = EXCLUDED.vote
        "#,
    )
    .bind(comment_id)
    .bind(username)
    .bind(vote)
    .execute(&mut *tx)
    .await?;

    let (points,): (i32,) = sqlx::query_as(
        r#"
        UPDATE comments
        SET points = (
            SELECT COALESCE(SUM(vote), 0)::INTEGER
            FROM comment_votes
            WHERE "commentId" = $1
        )
        WHERE "commentId" = $1
        RETURNING points
        "#,
    )
    .bind(comment_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(points)
}

pub async fn get_vote(pool: &PgPool, comment_id: i64, username: &str) -> Result<i16, RepoError> {
    let row: Option<(i16,)> = sqlx::query_as(
        r#"
        SELECT vote FROM comment_votes
        WHERE "commentId" = $1 AND username = $2
        "#,
    )
    .bind(comment_id)
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(v,)| v).unwrap_or(0))
}
