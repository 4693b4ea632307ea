// Domain Error Types

use crate::domain::version::PgVersion;
use thiserror::Error;

/// Load-time catalog defects. These are fatal at startup: a catalog that
/// violates its invariants cannot be consulted safely.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("probe '{probe}' has no baseline variant (lowest is {lowest})")]
    MissingBaseline { probe: String, lowest: PgVersion },

    #[error("probe '{probe}' has duplicate variant for version {version}")]
    DuplicateVariant { probe: String, version: PgVersion },

    #[error("duplicate probe name: '{0}'")]
    DuplicateProbe(String),

    #[error("probe name must not be empty")]
    EmptyProbeName,

    #[error("invalid version tag: '{0}'")]
    BadVersionTag(String),
}
