// Probe Connection Port - live server access

use crate::domain::Record;
use crate::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, single-pass sequence of normalized rows.
///
/// Rows are pulled on demand; dropping the stream before exhaustion must
/// release the underlying driver cursor. A second iteration requires a
/// fresh execution.
pub type RecordStream<'a> = BoxStream<'a, Result<Record>>;

/// An already-open database connection handle.
///
/// The core never opens or closes the connection, and assumes at most one
/// in-flight query per handle at a time. Driver and server failures
/// propagate unmodified through both methods.
#[async_trait]
pub trait ProbeConnection: Send + Sync {
    /// The server's raw numeric version identifier (`server_version_num`).
    async fn server_version_num(&self) -> Result<i64>;

    /// Submit query text and stream back one normalized record per result
    /// row, preserving row and column order.
    fn query_stream(&self, sql: String) -> RecordStream<'_>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use futures::StreamExt;
    use std::sync::Mutex;

    /// Mock connection that reports a fixed version and yields canned rows
    /// for every submitted query, recording the SQL it was handed.
    pub struct MockProbeConnection {
        version_num: i64,
        rows: Vec<Record>,
        executed: Mutex<Vec<String>>,
    }

    impl MockProbeConnection {
        pub fn new(version_num: i64) -> Self {
            Self {
                version_num,
                rows: Vec::new(),
                executed: Mutex::new(Vec::new()),
            }
        }

        pub fn with_rows(mut self, rows: Vec<Record>) -> Self {
            self.rows = rows;
            self
        }

        /// Every SQL text submitted so far, in order.
        pub fn executed(&self) -> Vec<String> {
            self.executed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProbeConnection for MockProbeConnection {
        async fn server_version_num(&self) -> Result<i64> {
            Ok(self.version_num)
        }

        fn query_stream(&self, sql: String) -> RecordStream<'_> {
            self.executed.lock().unwrap().push(sql);
            futures::stream::iter(self.rows.clone().into_iter().map(Ok)).boxed()
        }
    }
}
