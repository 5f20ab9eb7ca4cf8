/*
 * Responsibility
 * - Substring search over article titles and subreddit names
 */
use sqlx::PgPool;

use crate::repos::article_repo::ArticleRow;
use crate::repos::error::RepoError;

pub struct SearchResults {
    pub articles: Vec<ArticleRow>,
    pub subreddits: Vec<String>,
}

pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<SearchResults, RepoError> {
    let articles = sqlx::query_as::<_, ArticleRow>(
        r#"
        SELECT "articleId", subreddit, kind, title, body, author, points, "createdAt"
        FROM articles
        WHERE title ILIKE '%' || $1 || '%'
        ORDER BY points DESC, "articleId" DESC
        LIMIT $2
        "#,
    )
    .bind(query)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let subreddits: Vec<(String,)> = sqlx::query_as(
        r#"
        SELECT name FROM subreddits
        WHERE name ILIKE '%' || $1 || '%'
        ORDER BY name ASC
        LIMIT $2
        "#,
    )
    .bind(query)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(SearchResults {
        articles,
        subreddits: subreddits.into_iter().map(|(name,)| name).collect(),
    })
}
