/*
 * Responsibility
 * - articles CRUD + per-user votes
 * - points column is kept consistent with article_votes in one transaction
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    #[sqlx(rename = "articleId")]
    pub article_id: i64,

    pub subreddit: String,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub author: String,
    pub points: i32,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

const ARTICLE_COLUMNS: &str =
    r#""articleId", subreddit, kind, title, body, author, points, "createdAt""#;

pub enum ListOrder {
    Hot,
    New,
}

pub async fn list(
    pool: &PgPool,
    subreddit: Option<&str>,
    order: ListOrder,
    limit: i64,
    offset: i64,
) -> Result<Vec<ArticleRow>, RepoError> {
    // $1 doubles as the filter flag so one prepared statement covers both
    // the front page and a single subreddit.
    let sql = match order {
        ListOrder::Hot => format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE $1::VARCHAR IS NULL OR subreddit = $1
            ORDER BY points DESC, "articleId" DESC
            LIMIT $2 OFFSET $3
            "#
        ),
        ListOrder::New => format!(
            r#"
            SELECT {ARTICLE_COLUMNS}
            FROM articles
            WHERE $1::VARCHAR IS NULL OR subreddit = $1
            ORDER BY "createdAt" DESC, "articleId" DESC
            LIMIT $2 OFFSET $3
            "#
        ),
    };

    let rows = sqlx::query_as::<_, ArticleRow>(&sql)
        .bind(subreddit)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn get(pool: &PgPool, article_id: i64) -> Result<Option<ArticleRow>, RepoError> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        r#"
        SELECT {ARTICLE_COLUMNS}
        FROM articles
        WHERE "articleId" = $1
        "#
    ))
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    subreddit: &str,
    kind: &str,
    title: &str,
    body: &str,
    author: &str,
) -> Result<ArticleRow, RepoError> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        r#"
        INSERT INTO articles (subreddit, kind, title, body, author)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(subreddit)
    .bind(kind)
    .bind(title)
    .bind(body)
    .bind(author)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    article_id: i64,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<Option<ArticleRow>, RepoError> {
    let row = sqlx::query_as::<_, ArticleRow>(&format!(
        r#"
        UPDATE articles
        SET
            title = COALESCE($2, title),
            body = COALESCE($3, body)
        WHERE "articleId" = $1
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(article_id)
    .bind(title)
    .bind(body)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, article_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM articles
        WHERE "articleId" = $1
        "#,
    )
    .bind(article_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record `username`'s vote on an article (-1, 0, or 1) and refresh the
/// cached points total in the same transaction.
pub async fn set_vote(
    pool: &PgPool,
    article_id: i64,
    username: &str,
    vote: i16,
) -> Result<i32, RepoError> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO article_votes ("articleId", username, vote)
        VALUES ($1, $2, $3)
        ON CONFLICT ("articleId", username) DO UPDATE SET vote = EXCLUDED.vote
        "#,
    )
    .bind(article_id)
    .bind(username)
    .bind(vote)
    .execute(&mut *tx)
    .await?;

    let (points,): (i32,) = sqlx::query_as(
        r#"
        UPDATE articles
        SET points = (
            SELECT COALESCE(SUM(vote), 0)::INTEGER
            FROM article_votes
            WHERE "articleId" = $1
        )
        WHERE "articleId" = $1
        RETURNING points
        "#,
    )
    .bind(article_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(points)
}

pub async fn get_vote(pool: &PgPool, article_id: i64, username: &str) -> Result<i16, RepoError> {
    let row: Option<(i16,)> = sqlx::query_as(
        r#"
        SELECT vote FROM article_votes
        WHERE "articleId" = $1 AND username = $2
        "#,
    )
    .bind(article_id)
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(v,)| v).unwrap_or(0))
}
