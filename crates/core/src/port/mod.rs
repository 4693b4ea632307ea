// Port Layer - Interfaces for external dependencies

pub mod probe_connection;
pub mod query_source;

// Re-exports
pub use probe_connection::{ProbeConnection, RecordStream};
pub use query_source::QuerySource;
