// sqlx Error Mapping

use pgscout_core::error::AppError;

// Helper to convert sqlx::Error to AppError with the server's diagnostic
// detail attached. Execution failures are propagated verbatim, never
// retried here.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // PostgreSQL SQLSTATE codes:
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match code_str {
                    "42601" => AppError::Database(format!(
                        "Syntax error in query: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "42P01" => AppError::Database(format!(
                        "Undefined table: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "42703" => AppError::Database(format!(
                        "Undefined column: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "42501" => AppError::Database(format!(
                        "Insufficient privilege: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "57014" => AppError::Database(format!(
                        "Query cancelled by server: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "53300" => AppError::Database(format!(
                        "Too many connections: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        sqlx::Error::PoolTimedOut => {
            AppError::Database("Timed out waiting for a pooled connection".to_string())
        }
        sqlx::Error::Io(io_err) => AppError::Database(format!("Connection lost: {}", io_err)),
        _ => {
            // Connection, pool, protocol errors
            AppError::Database(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_keeps_the_column_name() {
        let err = map_sqlx_error(sqlx::Error::ColumnNotFound("state".to_string()));
        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("state"));
    }

    #[test]
    fn test_pool_timeout_maps_to_database_error() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_io_failure_reads_as_lost_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = map_sqlx_error(sqlx::Error::Io(io));
        assert!(err.to_string().contains("Connection lost"));
    }
}
