/*
 * Responsibility
 * - SQLx operations on accounts and the per-account relations
 *   (saved articles, joined subreddits)
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Debug, sqlx::FromRow)]
pub struct AccountRow {
    pub username: String,
    #[sqlx(rename = "passwordHash")]
    pub password_hash: String,
    pub salt: String,
    pub bio: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn create(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    salt: &str,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO accounts (username, "passwordHash", salt)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(salt)
    .execute(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(())
}

pub async fn get(pool: &PgPool, username: &str) -> Result<Option<AccountRow>, RepoError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT username, "passwordHash", salt, bio, "createdAt"
        FROM accounts
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_bio(pool: &PgPool, username: &str, bio: &str) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        UPDATE accounts
        SET bio = $2
        WHERE username = $1
        "#,
    )
    .bind(username)
    .bind(bio)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn save_article(pool: &PgPool, username: &str, article_id: i64) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO saved_articles (username, "articleId")
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(username)
    .bind(article_id)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn unsave_article(
    pool: &PgPool,
    username: &str,
    article_id: i64,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM saved_articles
        WHERE username = $1 AND "articleId" = $2
        "#,
    )
    .bind(username)
    .bind(article_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn saved_state(
    pool: &PgPool,
    username: &str,
    article_id: i64,
) -> Result<bool, RepoError> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT 1::BIGINT FROM saved_articles
        WHERE username = $1 AND "articleId" = $2
        "#,
    )
    .bind(username)
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

pub async fn join_subreddit(
    pool: &PgPool,
    username: &str,
    subreddit: &str,
) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        INSERT INTO joined_subreddits (username, subreddit)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(username)
    .bind(subreddit)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn leave_subreddit(
    pool: &PgPool,
    username: &str,
    subreddit: &str,
) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM joined_subreddits
        WHERE username = $1 AND subreddit = $2
        "#,
    )
    .bind(username)
    .bind(subreddit)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn joined_state(
    pool: &PgPool,
    username: &str,
    subreddit: &str,
) -> Result<bool, RepoError> {
    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        SELECT 1::BIGINT FROM joined_subreddits
        WHERE username = $1 AND subreddit = $2
        "#,
    )
    .bind(username)
    .bind(subreddit)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}
