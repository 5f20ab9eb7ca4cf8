/*
 * Responsibility
 * - subreddits: list / get / create
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SubredditRow {
    pub name: String,
    pub description: String,
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

pub async fn list_names(pool: &PgPool) -> Result<Vec<String>, RepoError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name FROM subreddits
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn get(pool: &PgPool, name: &str) -> Result<Option<SubredditRow>, RepoError> {
    let row = sqlx::query_as::<_, SubredditRow>(
        r#"
        SELECT name, description, "createdAt"
        FROM subreddits
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn create(
    pool: &PgPool,
    name: &str,
    description: &str,
) -> Result<SubredditRow, RepoError> {
    let row = sqlx::query_as::<_, SubredditRow>(
        r#"
        INSERT INTO subreddits (name, description)
        VALUES ($1, $2)
        RETURNING name, description, "createdAt"
        "#,
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}
