//! Unified error handling for the persistence layer.
//!
//! Every failure reaches the caller unchanged in kind: this layer never
//! retries and never downgrades an error to a default value.

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    /// Unique, foreign-key, check or not-null constraint rejected a write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Storage engine unreachable; the caller may retry
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    // Input and rules
    #[error("{0}")]
    Validation(String),

    #[error("Rule violated: {0}")]
    BusinessRule(String),

    // Any other engine error, kept verbatim
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a stable error code for callers
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            AppError::ConnectionFailure(_) => "CONNECTION_FAILURE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BusinessRule(_) => "BUSINESS_RULE",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Only connection failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::ConnectionFailure(_))
    }
}

// =============================================================================
// Database Error Classification
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg))
            | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return AppError::ConstraintViolation(msg);
            }
            _ => {}
        }

        if let Some(msg) = driver_constraint_message(&err) {
            return AppError::ConstraintViolation(msg);
        }

        match err {
            DbErr::Conn(e) => AppError::ConnectionFailure(e.to_string()),
            DbErr::ConnectionAcquire(e) => AppError::ConnectionFailure(e.to_string()),
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => AppError::NotFound,
            other => {
                tracing::error!(error = %other, "Unclassified database error");
                AppError::Database(other)
            }
        }
    }
}

/// Constraint failures SeaORM does not classify itself (check, not-null).
#[cfg(feature = "database")]
fn driver_constraint_message(err: &sea_orm::DbErr) -> Option<String> {
    use sea_orm::sqlx::error::ErrorKind;
    use sea_orm::{DbErr, RuntimeErr};

    let sqlx_err = match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e,
        _ => return None,
    };

    let db_err = sqlx_err.as_database_error()?;
    match db_err.kind() {
        ErrorKind::UniqueViolation
        | ErrorKind::ForeignKeyViolation
        | ErrorKind::NotNullViolation
        | ErrorKind::CheckViolation => Some(db_err.message().to_string()),
        _ if is_sqlite_foreign_key_failure(db_err.code().as_deref(), db_err.message()) => {
            Some(db_err.message().to_string())
        }
        _ => None,
    }
}

/// SQLite reports `ON DELETE RESTRICT` through SQLITE_CONSTRAINT_TRIGGER
/// (1811), which sqlx leaves unclassified.
#[cfg(feature = "database")]
fn is_sqlite_foreign_key_failure(code: Option<&str>, message: &str) -> bool {
    const SQLITE_CONSTRAINT_FOREIGNKEY: &str = "787";
    const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

    matches!(
        code,
        Some(SQLITE_CONSTRAINT_FOREIGNKEY) | Some(SQLITE_CONSTRAINT_TRIGGER)
    ) && message.contains("FOREIGN KEY constraint failed")
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::InvalidValue(msg) => AppError::Validation(msg),
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::BusinessRule(msg) => AppError::BusinessRule(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn constraint(msg: impl Into<String>) -> Self {
        AppError::ConstraintViolation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_failures_retry() {
        assert!(AppError::ConnectionFailure("down".into()).is_retryable());
        assert!(!AppError::NotFound.is_retryable());
        assert!(!AppError::constraint("email").is_retryable());
    }

    #[test]
    fn test_domain_error_mapping() {
        assert!(matches!(
            AppError::from(DomainError::business_rule("self review")),
            AppError::BusinessRule(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::validation("bad")),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(DomainError::not_found("user")),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_connection_errors_classified() {
        use sea_orm::{DbErr, RuntimeErr};

        let err = AppError::from(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, AppError::ConnectionFailure(_)));
        assert_eq!(err.code(), "CONNECTION_FAILURE");
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_record_not_updated_is_not_found() {
        let err = AppError::from(sea_orm::DbErr::RecordNotUpdated);
        assert!(matches!(err, AppError::NotFound));
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_sqlite_restrict_failure_is_foreign_key_failure() {
        assert!(is_sqlite_foreign_key_failure(
            Some("1811"),
            "FOREIGN KEY constraint failed"
        ));
        assert!(is_sqlite_foreign_key_failure(
            Some("787"),
            "FOREIGN KEY constraint failed"
        ));
        assert!(!is_sqlite_foreign_key_failure(Some("1811"), "raise(ABORT) from trigger"));
        assert!(!is_sqlite_foreign_key_failure(None, "FOREIGN KEY constraint failed"));
    }
}
