/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Clone-cheap: pool handles and Arcs inside
 */
use std::sync::Arc;

use crate::services::cache::TrendingStore;
use crate::services::session::SessionCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub trending: Arc<dyn TrendingStore>,
    pub sessions: SessionCodec,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, trending: Arc<dyn TrendingStore>, sessions: SessionCodec) -> Self {
        Self {
            db,
            trending,
            sessions,
        }
    }
}
