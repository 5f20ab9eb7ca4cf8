//! Cache store interface used by the trending feature.
use async_trait::async_trait;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command).
///
/// Kept independent from `AppError` so callers decide how to fail:
/// trending reads fail-closed (500), score bumps fail-open (logged only).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
}

/// Subreddit popularity scores.
///
/// Intentionally small: trending only needs an increment and a top-N read.
/// Implementations must be cheap to share (`Arc` inside or stateless handle).
#[async_trait]
pub trait TrendingStore: Send + Sync {
    // Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Add `delta` to the popularity score of `subreddit`.
    async fn bump(&self, subreddit: &str, delta: i64) -> CacheResult<()>;

    // The `limit` highest-scored subreddits, best first.
    async fn top(&self, limit: usize) -> CacheResult<Vec<String>>;
}
