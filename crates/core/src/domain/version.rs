// Server Version Domain Model

use crate::domain::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// PostgreSQL server version as a (major, minor) pair.
///
/// Field order drives the derived ordering: major compared first, then
/// minor. The same type tags query variants, where it means "minimum server
/// version this variant requires".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PgVersion {
    pub major: u32,
    pub minor: u32,
}

impl PgVersion {
    /// Universal fallback version; every probe with variants must carry one.
    pub const BASELINE: PgVersion = PgVersion { major: 0, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Decompose the server's native numeric encoding (`server_version_num`,
    /// i.e. `major*10000 + minor*100 + patch`). Patch digits are discarded.
    ///
    /// There is no error path: any non-negative input decodes to some
    /// version. The caller is responsible for supplying a value actually
    /// reported by the server.
    pub fn from_version_num(raw: i64) -> Self {
        let raw = raw.max(0) as u64;
        Self {
            major: (raw / 10_000) as u32,
            minor: ((raw / 100) % 100) as u32,
        }
    }
}

impl fmt::Display for PgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PgVersion {
    type Err = CatalogError;

    /// Parse the `"major.minor"` form used to tag packaged variants.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .split_once('.')
            .ok_or_else(|| CatalogError::BadVersionTag(s.to_string()))?;
        let major = major
            .parse()
            .map_err(|_| CatalogError::BadVersionTag(s.to_string()))?;
        let minor = minor
            .parse()
            .map_err(|_| CatalogError::BadVersionTag(s.to_string()))?;
        Ok(Self { major, minor })
    }
}
