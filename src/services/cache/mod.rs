pub mod client;
pub mod valkey;

pub use client::{CacheError, CacheResult, TrendingStore};
pub use valkey::ValkeyTrending;
