//! PostgreSQL repository implementations and connection setup.

mod memory;
mod pg_book_repository;
mod pg_user_repository;

pub use memory::{InMemoryBookRepository, InMemoryUserRepository};
pub use pg_book_repository::PgBookRepository;
pub use pg_user_repository::PgUserRepository;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::config::Config;

const CONNECT_ATTEMPTS: usize = 3;
const CONNECT_BACKOFF: Duration = Duration::from_secs(3);

/// Establishes the database pool, retrying the initial connection up to
/// three times with a fixed 3-second backoff. The service does not start
/// without persistence availability.
pub async fn connect_with_retry(config: &Config) -> Result<PgPool, sqlx::Error> {
    let strategy = FixedInterval::new(CONNECT_BACKOFF).take(CONNECT_ATTEMPTS - 1);

    Retry::spawn(strategy, || async {
        PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(&config.database_url)
            .await
            .inspect_err(|e| {
                tracing::warn!(error = %e, "Failed to connect to database, retrying");
            })
    })
    .await
}
