//! # Command Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Partner Orders                         │
//! │                                                                         │
//! │  Command Function  →  Result<T, AppError>                              │
//! │         │                                                               │
//! │         ├── DbError::ForeignKeyViolation ──┐                           │
//! │         ├── CoreError::EmptyOrder ─────────┼──► AppError { code, msg } │
//! │         └── ValidationError ───────────────┘            │               │
//! │                                                         ▼               │
//! │  main: "error[VALIDATION_ERROR]: inn has invalid format: ..."           │
//! │        exit code from ErrorCode::exit_code()                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invalid material calculation is reported as an outcome, never as an
//! `AppError`.

use partner_core::CoreError;
use partner_db::DbError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// With `--json` this is printed as:
/// ```json
/// { "code": "NOT_FOUND", "message": "Partner not found: 42" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    DatabaseError,
    /// Business rule violated (e.g. empty order)
    BusinessLogic,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Process exit status for this code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError | ErrorCode::BusinessLogic => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConfigError => 4,
            ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, .. } => AppError::new(
                ErrorCode::ValidationError,
                format!("{} already exists", field),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                AppError::validation("Invalid reference: the referenced record does not exist")
            }
            DbError::CheckViolation { message } => {
                AppError::validation(format!("Rejected by database: {}", message))
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::InvalidValue { column, value } => {
                tracing::error!(column = %column, value = %value, "Undecodable stored value");
                AppError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored data is corrupt in {}", column),
                )
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PartnerNotFound(id) => AppError::not_found("Partner", &id),
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::ProductTypeNotFound(id) => AppError::not_found("Product type", &id),
            CoreError::MaterialTypeNotFound(id) => AppError::not_found("Material type", &id),
            CoreError::OrderNotFound(id) => AppError::not_found("Order", &id),
            CoreError::EmptyOrder => {
                AppError::new(ErrorCode::BusinessLogic, CoreError::EmptyOrder.to_string())
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<partner_core::ValidationError> for AppError {
    fn from(err: partner_core::ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Could not serialize output: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error[{}]: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}
