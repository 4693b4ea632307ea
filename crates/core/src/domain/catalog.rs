// Probe Catalog - load-once index of version-gated query variants

use crate::domain::error::CatalogError;
use crate::domain::version::PgVersion;
use crate::error::Result;
use crate::port::QuerySource;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Immutable index of every packaged probe.
///
/// Built eagerly once at startup and handed to consumers by reference;
/// reads need no synchronization. Per-probe variants are kept sorted
/// ascending by their minimum server version so resolution is a binary
/// search.
#[derive(Debug, Clone, Default)]
pub struct ProbeCatalog {
    probes: BTreeMap<String, Vec<(PgVersion, String)>>,
}

impl ProbeCatalog {
    /// Load every probe and variant exposed by the query source.
    ///
    /// An unreachable source aborts the load. A probe with zero usable
    /// variants is recorded empty and resolves to nothing; a non-empty
    /// variant set lacking the baseline version, a duplicate variant, or a
    /// duplicate/empty probe name is a load defect.
    pub fn load(source: &dyn QuerySource) -> Result<Self> {
        let mut probes: BTreeMap<String, Vec<(PgVersion, String)>> = BTreeMap::new();
        let mut variant_count = 0usize;

        for name in source.probe_names()? {
            if name.is_empty() {
                return Err(CatalogError::EmptyProbeName.into());
            }
            if probes.contains_key(&name) {
                return Err(CatalogError::DuplicateProbe(name).into());
            }

            let mut variants: Vec<(PgVersion, String)> = Vec::new();
            for version in source.variant_versions(&name)? {
                if variants.iter().any(|(v, _)| *v == version) {
                    return Err(CatalogError::DuplicateVariant {
                        probe: name,
                        version,
                    }
                    .into());
                }
                let Some(text) = source.query_text(&name, version)? else {
                    warn!(probe = %name, version = %version, "variant listed but text is missing, skipping");
                    continue;
                };
                if text.trim().is_empty() {
                    warn!(probe = %name, version = %version, "variant text is empty, skipping");
                    continue;
                }
                variants.push((version, text));
            }
            variants.sort_by_key(|(version, _)| *version);

            match variants.first() {
                Some((lowest, _)) if *lowest != PgVersion::BASELINE => {
                    return Err(CatalogError::MissingBaseline {
                        probe: name,
                        lowest: *lowest,
                    }
                    .into());
                }
                Some(_) => {}
                None => {
                    warn!(probe = %name, "probe has no usable variants and will resolve to nothing");
                }
            }

            variant_count += variants.len();
            probes.insert(name, variants);
        }

        info!(
            probes = probes.len(),
            variants = variant_count,
            "probe catalog loaded"
        );
        Ok(Self { probes })
    }

    /// Best dominated match: the text of the greatest variant version that
    /// does not exceed `server`.
    ///
    /// `None` when the probe is unknown here, or when every variant requires
    /// a newer server. Both are expected conditions, not failures: callers
    /// iterate over probe supersets and skip what a given catalog or server
    /// does not support.
    pub fn resolve(&self, probe: &str, server: PgVersion) -> Option<&str> {
        let variants = self.probes.get(probe)?;
        let dominated = variants.partition_point(|(version, _)| *version <= server);
        dominated
            .checked_sub(1)
            .map(|idx| variants[idx].1.as_str())
    }

    /// All probe names, in sorted order.
    pub fn probe_names(&self) -> impl Iterator<Item = &str> {
        self.probes.keys().map(String::as_str)
    }

    /// The sorted variant list of one probe.
    pub fn variants(&self, probe: &str) -> Option<&[(PgVersion, String)]> {
        self.probes.get(probe).map(Vec::as_slice)
    }

    pub fn contains(&self, probe: &str) -> bool {
        self.probes.contains_key(probe)
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogError;
    use crate::error::AppError;
    use crate::port::query_source::mocks::StaticQuerySource;

    fn connections_source() -> StaticQuerySource {
        StaticQuerySource::new()
            .with_variant("connections", PgVersion::BASELINE, "old-query")
            .with_variant("connections", PgVersion::new(10, 0), "connections-10.0")
    }

    #[test]
    fn test_resolve_picks_best_dominated_variant() {
        // We want to load the query dynamically for the proper server version
        let catalog = ProbeCatalog::load(&connections_source()).unwrap();

        assert_eq!(
            catalog.resolve("connections", PgVersion::new(9, 2)),
            Some("old-query")
        );
        assert_eq!(
            catalog.resolve("connections", PgVersion::new(10, 0)),
            Some("connections-10.0")
        );
        assert_eq!(
            catalog.resolve("connections", PgVersion::new(12, 0)),
            Some("connections-10.0")
        );
    }

    #[test]
    fn test_resolve_unknown_probe_is_absent() {
        let catalog = ProbeCatalog::load(&connections_source()).unwrap();
        assert_eq!(catalog.resolve("unknown-query", PgVersion::new(9, 2)), None);
        assert_eq!(
            catalog.resolve("unknown-query", PgVersion::new(12, 0)),
            None
        );
    }

    #[test]
    fn test_baseline_only_probe_resolves_everywhere() {
        let source =
            StaticQuerySource::new().with_variant("locks", PgVersion::BASELINE, "lock-query");
        let catalog = ProbeCatalog::load(&source).unwrap();

        for server in [
            PgVersion::BASELINE,
            PgVersion::new(9, 2),
            PgVersion::new(17, 0),
        ] {
            assert_eq!(catalog.resolve("locks", server), Some("lock-query"));
        }
    }

    #[test]
    fn test_zero_variant_probe_loads_but_never_resolves() {
        let source = StaticQuerySource::new().with_empty_probe("ghost");
        let catalog = ProbeCatalog::load(&source).unwrap();

        assert!(catalog.contains("ghost"));
        assert_eq!(catalog.resolve("ghost", PgVersion::new(17, 0)), None);
    }

    #[test]
    fn test_missing_baseline_is_a_load_defect() {
        let source =
            StaticQuerySource::new().with_variant("wal", PgVersion::new(14, 0), "wal-query");
        let err = ProbeCatalog::load(&source).unwrap_err();

        match err {
            AppError::Catalog(CatalogError::MissingBaseline { probe, lowest }) => {
                assert_eq!(probe, "wal");
                assert_eq!(lowest, PgVersion::new(14, 0));
            }
            other => panic!("expected MissingBaseline, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_variant_is_a_load_defect() {
        let source = StaticQuerySource::new()
            .with_variant("connections", PgVersion::BASELINE, "a")
            .with_variant("connections", PgVersion::BASELINE, "b");
        let err = ProbeCatalog::load(&source).unwrap_err();

        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::DuplicateVariant { .. })
        ));
    }

    #[test]
    fn test_empty_variant_text_degrades_to_missing() {
        // An empty baseline plus a real 10.0 variant leaves the probe
        // without a baseline, which the load check still catches.
        let source = StaticQuerySource::new()
            .with_variant("connections", PgVersion::BASELINE, "   ")
            .with_variant("connections", PgVersion::new(10, 0), "connections-10.0");
        let err = ProbeCatalog::load(&source).unwrap_err();

        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::MissingBaseline { .. })
        ));
    }

    #[test]
    fn test_probe_names_sorted() {
        let source = StaticQuerySource::new()
            .with_variant("locks", PgVersion::BASELINE, "l")
            .with_variant("connections", PgVersion::BASELINE, "c");
        let catalog = ProbeCatalog::load(&source).unwrap();

        let names: Vec<&str> = catalog.probe_names().collect();
        assert_eq!(names, vec!["connections", "locks"]);
        assert_eq!(catalog.len(), 2);
    }
}
