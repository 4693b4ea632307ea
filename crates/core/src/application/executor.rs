// Probe Execution Use Case

use crate::domain::{PgVersion, ProbeCatalog, Record};
use crate::error::Result;
use crate::port::{ProbeConnection, RecordStream};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::debug;

/// Resolve and execute one probe against a live connection.
///
/// Reads the server's version, resolves the best variant and streams back
/// normalized records in server result order. A probe that is unknown to
/// the catalog, or unsupported on the connected server version, yields an
/// empty stream: querying an unsupported probe is a legitimate no-op, not a
/// failure. Version-query failures and execution failures carry the
/// server's diagnostic detail and are never retried here.
///
/// # Arguments
///
/// * `conn` - Open connection handle (caller-scoped)
/// * `catalog` - Loaded probe catalog
/// * `probe` - Probe name to resolve and run
pub async fn execute<'a>(
    conn: &'a dyn ProbeConnection,
    catalog: &ProbeCatalog,
    probe: &str,
) -> Result<RecordStream<'a>> {
    let raw = conn.server_version_num().await?;
    let server = PgVersion::from_version_num(raw);

    match catalog.resolve(probe, server) {
        Some(sql) => {
            debug!(probe, server = %server, "executing probe");
            Ok(conn.query_stream(sql.to_owned()))
        }
        None => {
            debug!(probe, server = %server, "probe not resolvable on this server, skipping");
            Ok(stream::empty().boxed())
        }
    }
}

/// Execute one probe and collect every record eagerly.
pub async fn fetch_all(
    conn: &dyn ProbeConnection,
    catalog: &ProbeCatalog,
    probe: &str,
) -> Result<Vec<Record>> {
    execute(conn, catalog, probe).await?.try_collect().await
}
