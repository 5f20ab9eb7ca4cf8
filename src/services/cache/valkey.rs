use async_trait::async_trait;

use crate::services::cache::client::{CacheError, CacheResult, TrendingStore};

const TRENDING_KEY: &str = "trending:subreddits";

/// Valkey/Redis-backed trending store.
///
/// One sorted set, member = subreddit name, score = popularity.
#[derive(Clone, Debug)]
pub struct ValkeyTrending {
    manager: redis::aio::ConnectionManager,
}

impl ValkeyTrending {
    /// Wrap an already-established connection manager (the bootstrapper owns
    /// the connect-with-retry part).
    pub fn new(manager: redis::aio::ConnectionManager) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl TrendingStore for ValkeyTrending {
    fn backend_name(&self) -> &'static str {
        "valkey"
    }

    async fn bump(&self, subreddit: &str, delta: i64) -> CacheResult<()> {
        // Use a clone of the connection manager
        let mut conn = self.manager.clone();

        let _score: f64 = redis::cmd("ZINCRBY")
            .arg(TRENDING_KEY)
            .arg(delta)
            .arg(subreddit)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        Ok(())
    }

    async fn top(&self, limit: usize) -> CacheResult<Vec<String>> {
        let mut conn = self.manager.clone();

        let stop = limit.saturating_sub(1);
        let names: Vec<String> = redis::cmd("ZREVRANGE")
            .arg(TRENDING_KEY)
            .arg(0)
            .arg(stop as i64)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::BackendCommand(e.to_string()))?;

        Ok(names)
    }
}
