// ProbeConnection Implementation over a sqlx Connection Pool

use crate::decode::decode_row;
use crate::error::map_sqlx_error;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use pgscout_core::error::Result;
use pgscout_core::port::{ProbeConnection, RecordStream};
use sqlx::postgres::PgPool;

/// Live server access over sqlx.
///
/// Holds a pool handle; the pool itself is opened and closed by the
/// composition root.
pub struct PgProbeConnection {
    pool: PgPool,
}

impl PgProbeConnection {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProbeConnection for PgProbeConnection {
    async fn server_version_num(&self) -> Result<i64> {
        let raw: i64 = sqlx::query_scalar("SELECT current_setting('server_version_num')::bigint")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(raw)
    }

    /// Stream rows straight off the driver cursor.
    ///
    /// The cursor lives inside the stream, so dropping the stream before
    /// exhaustion closes it and releases the pooled connection.
    fn query_stream(&self, sql: String) -> RecordStream<'_> {
        let stream = try_stream! {
            let mut rows = sqlx::query(&sql).fetch(&self.pool);
            while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
                yield decode_row(&row)?;
            }
        };
        stream.boxed()
    }
}
