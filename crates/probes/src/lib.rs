// Bundled Query Source - diagnostic SQL shipped inside the binary
// Layout mirrors queries/<probe>/<major.minor>.sql, embedded at compile time

use pgscout_core::domain::{PgVersion, ProbeCatalog};
use pgscout_core::error::{AppError, Result};
use pgscout_core::port::QuerySource;

/// One row per packaged queries/<probe>/<version>.sql file.
const BUNDLED: &[(&str, &str, &str)] = &[
    ("bgwriter", "0.0", include_str!("../queries/bgwriter/0.0.sql")),
    ("bgwriter", "17.0", include_str!("../queries/bgwriter/17.0.sql")),
    ("cache_hit", "0.0", include_str!("../queries/cache_hit/0.0.sql")),
    ("connections", "0.0", include_str!("../queries/connections/0.0.sql")),
    ("connections", "9.2", include_str!("../queries/connections/9.2.sql")),
    (
        "connections",
        "10.0",
        include_str!("../queries/connections/10.0.sql"),
    ),
    (
        "database_size",
        "0.0",
        include_str!("../queries/database_size/0.0.sql"),
    ),
    ("locks", "0.0", include_str!("../queries/locks/0.0.sql")),
    (
        "replication",
        "0.0",
        include_str!("../queries/replication/0.0.sql"),
    ),
    (
        "replication",
        "10.0",
        include_str!("../queries/replication/10.0.sql"),
    ),
    (
        "transactions",
        "0.0",
        include_str!("../queries/transactions/0.0.sql"),
    ),
];

/// QuerySource over the compiled-in bundle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledQueries;

impl BundledQueries {
    pub fn new() -> Self {
        Self
    }
}

impl QuerySource for BundledQueries {
    fn probe_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for (probe, _, _) in BUNDLED {
            if names.iter().all(|name| name != probe) {
                names.push((*probe).to_string());
            }
        }
        Ok(names)
    }

    fn variant_versions(&self, probe: &str) -> Result<Vec<PgVersion>> {
        BUNDLED
            .iter()
            .filter(|(name, _, _)| *name == probe)
            .map(|(_, tag, _)| tag.parse::<PgVersion>().map_err(AppError::from))
            .collect()
    }

    fn query_text(&self, probe: &str, version: PgVersion) -> Result<Option<String>> {
        for (name, tag, sql) in BUNDLED {
            if *name == probe && tag.parse::<PgVersion>()? == version {
                return Ok(Some((*sql).to_string()));
            }
        }
        Ok(None)
    }
}

/// Load the catalog of every bundled probe.
pub fn load_catalog() -> Result<ProbeCatalog> {
    ProbeCatalog::load(&BundledQueries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_loads() {
        // Ensure that we can properly load the bundled queries
        let catalog = load_catalog().unwrap();
        assert!(catalog.contains("connections"));
        assert!(catalog.contains("locks"));

        let source = BundledQueries::new();
        for version in [
            PgVersion::BASELINE,
            PgVersion::new(9, 2),
            PgVersion::new(10, 0),
        ] {
            let text = source.query_text("connections", version).unwrap().unwrap();
            assert!(!text.trim().is_empty(), "connections {version} is empty");
        }
    }

    #[test]
    fn test_every_probe_has_a_baseline_variant() {
        let catalog = load_catalog().unwrap();
        for probe in catalog.probe_names() {
            let variants = catalog.variants(probe).unwrap();
            assert!(!variants.is_empty(), "{probe} has no variants");
            assert_eq!(
                variants[0].0,
                PgVersion::BASELINE,
                "{probe} lacks a baseline variant"
            );
        }
    }

    #[test]
    fn test_every_bundled_text_is_nonempty_sql() {
        for (probe, tag, sql) in BUNDLED {
            assert!(
                tag.parse::<PgVersion>().is_ok(),
                "{probe}/{tag} has a bad version tag"
            );
            assert!(
                sql.to_uppercase().contains("SELECT"),
                "{probe}/{tag} does not look like a query"
            );
        }
    }

    #[test]
    fn test_bgwriter_resolves_by_server_era() {
        let catalog = load_catalog().unwrap();

        let old = catalog
            .resolve("bgwriter", PgVersion::new(16, 0))
            .unwrap();
        assert!(old.contains("pg_stat_bgwriter"));
        assert!(!old.contains("pg_stat_checkpointer"));

        let new = catalog
            .resolve("bgwriter", PgVersion::new(17, 0))
            .unwrap();
        assert!(new.contains("pg_stat_checkpointer"));
    }

    #[test]
    fn test_absent_variant_lookup_is_none() {
        let source = BundledQueries::new();
        assert!(source
            .query_text("connections", PgVersion::new(11, 0))
            .unwrap()
            .is_none());
        assert!(source
            .query_text("no-such-probe", PgVersion::BASELINE)
            .unwrap()
            .is_none());
    }
}
