// pgscout Infrastructure - PostgreSQL Adapter
// Implements: ProbeConnection (server version + streaming query execution)

mod connection;
mod decode;
mod error;
mod probe_connection;

pub use connection::create_pool;
pub use probe_connection::PgProbeConnection;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
