/*
 * Responsibility
 * - Config load → dependency bootstrap → Router assembly → serve
 * - The middleware order of the request pipeline is fixed here
 */
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::bootstrap::{self, RetryPolicy};
use crate::config::Config;
use crate::middleware;
use crate::services::cache::ValkeyTrending;
use crate::services::session::SessionCodec;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,forum_api=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("loading configuration")?;

    tracing::info!(
        addr = %config.addr,
        env = ?config.app_env,
        "starting forum API"
    );

    // Bring up stateful dependencies before accepting any traffic; a
    // deadline hit here propagates out of main and the process exits 1.
    let state = bootstrap_state(&config).await?;

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .context("binding listener")?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("serving")?;

    Ok(())
}

async fn bootstrap_state(config: &Config) -> Result<AppState> {
    let policy = RetryPolicy::from_config(config);

    // Strictly sequential: the cache is not attempted until the database
    // connection is up.
    let db = bootstrap::connect_postgres(&config.database_url, config.db_max_connections, policy)
        .await?;
    let cache = bootstrap::connect_valkey(&config.redis_url, policy).await?;

    Ok(AppState::new(
        db,
        Arc::new(ValkeyTrending::new(cache)),
        SessionCodec::new(&config.session_secret),
    ))
}

/// Assemble the request pipeline. The order is deliberate and total:
///
///   panic boundary → request log → CORS → request-id/limit/timeout
///   → routing → (protected routes only) session auth → handler
///
/// Layers are listed innermost-first below because the last `.layer` call
/// wraps everything added before it.
fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::http::apply(router, config);
    let router = middleware::cors::apply(router, config);
    let router = router.layer(axum::middleware::from_fn(middleware::request_log::log_request));
    middleware::recover::apply(router)
}
