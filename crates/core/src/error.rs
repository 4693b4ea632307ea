// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type.
///
/// Absence ("unknown probe", "version unsupported") is never an error: it
/// travels as `Option`/empty streams. This enum carries the genuine
/// failures: catalog load defects (including an unusable query source) and
/// execution failures with the server's diagnostic detail attached.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domain::CatalogError),

    #[error("Database error: {0}")]
    Database(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

// Note: sqlx::Error conversion is handled in infra-postgres
// by converting to AppError::Database(String)
