//! Startup connection establishment for the stateful dependencies.
//!
//! Each dependency is brought up in turn before the listener is bound:
//! attempt on a fixed interval, give up at an absolute deadline measured from
//! entry. A deadline hit is fatal for the whole process (propagated to
//! `main`, exit status 1). Not reentrant; runs exactly once per process.

use std::future::Future;
use std::time::Duration;

use redis::aio::ConnectionManager;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::time::Instant;

use crate::config::Config;
use crate::repos;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("{dependency} unreachable after {}s", .timeout.as_secs())]
    Timeout {
        dependency: &'static str,
        timeout: Duration,
    },
}

/// Retry cadence and give-up deadline for one dependency.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.reconnect_interval,
            timeout: config.reconnect_timeout,
        }
    }
}

/// Attempt `connect` once per interval until it succeeds or the deadline
/// elapses. The deadline is fixed at entry; the first attempt happens one
/// interval in, so startup failure surfaces no earlier than `timeout` and no
/// later than `timeout + interval`.
pub async fn wait_for<T, E, F, Fut>(
    dependency: &'static str,
    policy: RetryPolicy,
    mut connect: F,
) -> Result<T, BootstrapError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let deadline = Instant::now() + policy.timeout;

    loop {
        tokio::time::sleep(policy.interval).await;

        tracing::info!(dependency, "trying to establish connection");
        match connect().await {
            Ok(handle) => {
                tracing::info!(dependency, "connection established");
                return Ok(handle);
            }
            Err(e) => {
                tracing::warn!(dependency, error = %e, "connection attempt failed");
            }
        }

        if Instant::now() >= deadline {
            tracing::error!(
                dependency,
                timeout_secs = policy.timeout.as_secs(),
                "dependency unreachable within deadline, giving up"
            );
            return Err(BootstrapError::Timeout {
                dependency,
                timeout: policy.timeout,
            });
        }
    }
}

/// Connect to PostgreSQL under the retry policy and apply the embedded
/// schema once the pool is up.
pub async fn connect_postgres(
    url: &str,
    max_connections: u32,
    policy: RetryPolicy,
) -> Result<PgPool, BootstrapError> {
    let pool = wait_for("postgres", policy, || async move {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    })
    .await?;

    if let Err(e) = repos::ensure_schema(&pool).await {
        // Schema application failing on a live pool is a config/DDL problem,
        // not transient unavailability; surface it loudly but keep the pool.
        tracing::error!(error = %e, "failed to apply schema");
    }

    Ok(pool)
}

/// Connect to Redis/Valkey under the retry policy.
pub async fn connect_valkey(
    url: &str,
    policy: RetryPolicy,
) -> Result<ConnectionManager, BootstrapError> {
    wait_for("valkey", policy, || async move {
        let client = redis::Client::open(url)?;
        client.get_connection_manager().await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy() -> RetryPolicy {
        RetryPolicy {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(30),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_second_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let started = Instant::now();
        let handle = wait_for("dep", policy(), move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 2 {
                    Err("still starting")
                } else {
                    Ok(42u32)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(handle, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        // Two interval waits, nothing more.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(6));
        assert!(elapsed < Duration::from_secs(9));
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_waits_one_interval() {
        let started = Instant::now();
        wait_for("dep", policy(), || async { Ok::<_, &str>(()) })
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_never_reachable() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let started = Instant::now();
        let res: Result<(), _> = wait_for("dep", policy(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err("connection refused") }
        })
        .await;

        assert!(matches!(
            res,
            Err(BootstrapError::Timeout {
                dependency: "dep",
                ..
            })
        ));
        // Attempts at 3s, 6s, ..., 30s; failure declared at the 30s attempt.
        assert_eq!(attempts.load(Ordering::SeqCst), 10);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(30));
        assert!(elapsed <= Duration::from_secs(33));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_measured_from_entry_not_last_attempt() {
        // Interval longer than timeout: a single attempt happens (after one
        // interval), then the loop must give up immediately.
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let res: Result<(), _> = wait_for(
            "dep",
            RetryPolicy {
                interval: Duration::from_secs(10),
                timeout: Duration::from_secs(5),
            },
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err("nope") }
            },
        )
        .await;

        assert!(res.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
