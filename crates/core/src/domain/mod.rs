// Domain Layer - versions, probe catalog, normalized records

pub mod catalog;
pub mod error;
pub mod record;
pub mod version;

pub use catalog::ProbeCatalog;
pub use error::CatalogError;
pub use record::{Record, ScalarValue};
pub use version::PgVersion;
