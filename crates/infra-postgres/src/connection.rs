// PostgreSQL Connection Pool Setup

use crate::error::map_sqlx_error;
use pgscout_core::error::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Create a bounded PostgreSQL connection pool.
///
/// The pool is a caller-scoped resource: it is handed to the adapter and
/// never opened or closed by the core.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(map_sqlx_error)?;

    Ok(pool)
}
