pub mod account_repo;
pub mod article_repo;
pub mod comment_repo;
pub mod error;
pub mod search_repo;
pub mod subreddit_repo;

use sqlx::PgPool;

use error::RepoError;

const SCHEMA: &str = include_str!("schema.sql");

/// Apply the embedded schema statement by statement. All DDL is
/// `IF NOT EXISTS`, so this is safe to run on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepoError> {
    for statement in schema_statements(SCHEMA) {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

fn schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .filter_map(|statement| {
            let trimmed = statement.trim();
            let has_sql = trimmed.lines().any(|line| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with("--")
            });
            has_sql.then_some(trimmed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_splits_into_nonempty_statements() {
        let statements = schema_statements(SCHEMA);
        assert!(statements.len() >= 8);
        assert!(statements.iter().all(|s| !s.trim().is_empty()));
    }
}
