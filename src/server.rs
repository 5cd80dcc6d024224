//! HTTP server initialization and runtime setup.
//!
//! Handles database connection (with boot-time retry), migrations, cache
//! setup, service wiring, and the Axum server lifecycle.

use crate::application::services::{AuthService, BookService, UserService};
use crate::config::Config;
use crate::domain::repositories::{BookRepository, UserRepository};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgBookRepository, PgUserRepository, connect_with_retry,
};
use crate::routes::{RouterConfig, app_router};
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (3 attempts, 3s backoff, then fatal)
/// - Idempotent migrations
/// - Redis cache (or NullCache fallback)
/// - Service wiring and the Axum router
///
/// # Errors
///
/// Returns an error if the database stays unreachable, migrations fail, or
/// the server cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_with_retry(&config)
        .await
        .context("Failed to connect to database after 3 attempts")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let pool = Arc::new(pool);
    let book_repository: Arc<dyn BookRepository> = Arc::new(PgBookRepository::new(pool.clone()));
    let user_repository: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(&config.api_secret_key, &config.jwt_secret));
    let book_service = Arc::new(BookService::new(
        book_repository,
        cache,
        config.cache_ttl_seconds,
    ));
    let user_service = Arc::new(UserService::new(user_repository, auth_service.clone()));

    let state = AppState {
        book_service,
        user_service,
        auth_service,
    };

    let router_config = RouterConfig {
        production: config.is_production(),
        allowed_origin: Some(config.app_url_prod.clone()),
    };

    let app = app_router(state, &router_config);
    let app = NormalizePathLayer::trim_trailing_slash().layer(app);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
