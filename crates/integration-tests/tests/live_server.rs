//! Smoke tests against a live PostgreSQL server.
//!
//! Ignored by default; run with a reachable server:
//!
//! ```text
//! PGSCOUT_TEST_DATABASE_URL=postgres://localhost:5432/postgres \
//!     cargo test -p pgscout-integration-tests -- --ignored
//! ```

use pgscout_core::application::executor;
use pgscout_core::domain::PgVersion;
use pgscout_core::port::ProbeConnection;
use pgscout_infra_postgres::{create_pool, PgProbeConnection};

async fn connect() -> PgProbeConnection {
    let url = std::env::var("PGSCOUT_TEST_DATABASE_URL")
        .expect("PGSCOUT_TEST_DATABASE_URL must point at a test server");
    let pool = create_pool(&url).await.expect("failed to connect");
    PgProbeConnection::new(pool)
}

#[tokio::test]
#[ignore]
async fn test_server_reports_a_plausible_version() {
    let conn = connect().await;
    let raw = conn.server_version_num().await.unwrap();
    let version = PgVersion::from_version_num(raw);

    // Anything still in the wild is at least 9.x
    assert!(version >= PgVersion::new(9, 0), "got {version}");
}

#[tokio::test]
#[ignore]
async fn test_connections_probe_yields_named_records() {
    let catalog = pgscout_probes::load_catalog().unwrap();
    let conn = connect().await;

    // Our own session is connected, so at least one row must come back
    let records = executor::fetch_all(&conn, &catalog, "connections")
        .await
        .unwrap();
    assert!(!records.is_empty());
    for record in &records {
        assert!(record.get("connections").is_some());
    }
}

/// Every bundled probe must execute without raising against a reachable,
/// compatible server.
#[tokio::test]
#[ignore]
async fn test_every_bundled_probe_is_executable() {
    let catalog = pgscout_probes::load_catalog().unwrap();
    let conn = connect().await;

    for probe in catalog.probe_names() {
        let result = executor::fetch_all(&conn, &catalog, probe).await;
        assert!(result.is_ok(), "probe {probe} failed: {result:?}");
    }
}
