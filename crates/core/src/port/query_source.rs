// Query Source Port - packaged query text lookup

use crate::domain::PgVersion;
use crate::error::Result;

/// Lookup and enumeration over packaged query text.
///
/// How the text is shipped (embedded resource, file tree) is the adapter's
/// business; the catalog only consumes this behavior. Errors from any method
/// mean the source itself is unusable and abort catalog loading.
pub trait QuerySource: Send + Sync {
    /// All probe names the source knows about.
    fn probe_names(&self) -> Result<Vec<String>>;

    /// All variant versions packaged for one probe.
    fn variant_versions(&self, probe: &str) -> Result<Vec<PgVersion>>;

    /// Query text for one (probe, version) pair, `None` when absent.
    fn query_text(&self, probe: &str, version: PgVersion) -> Result<Option<String>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// In-memory QuerySource for tests and synthetic catalogs.
    #[derive(Debug, Default)]
    pub struct StaticQuerySource {
        probes: Vec<String>,
        variants: Vec<(String, PgVersion, String)>,
    }

    impl StaticQuerySource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_variant(
            mut self,
            probe: impl Into<String>,
            version: PgVersion,
            text: impl Into<String>,
        ) -> Self {
            let probe = probe.into();
            if !self.probes.contains(&probe) {
                self.probes.push(probe.clone());
            }
            self.variants.push((probe, version, text.into()));
            self
        }

        /// Register a probe with no variants at all.
        pub fn with_empty_probe(mut self, probe: impl Into<String>) -> Self {
            self.probes.push(probe.into());
            self
        }
    }

    impl QuerySource for StaticQuerySource {
        fn probe_names(&self) -> Result<Vec<String>> {
            Ok(self.probes.clone())
        }

        fn variant_versions(&self, probe: &str) -> Result<Vec<PgVersion>> {
            Ok(self
                .variants
                .iter()
                .filter(|(name, _, _)| name == probe)
                .map(|(_, version, _)| *version)
                .collect())
        }

        fn query_text(&self, probe: &str, version: PgVersion) -> Result<Option<String>> {
            Ok(self
                .variants
                .iter()
                .find(|(name, v, _)| name == probe && *v == version)
                .map(|(_, _, text)| text.clone()))
        }
    }
}
