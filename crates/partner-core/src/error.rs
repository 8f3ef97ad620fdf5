//! # Error Types
//!
//! Domain-specific error types for partner-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  partner-core errors (this file)                                       │
//! │  ├── CoreError        - Lookups and business rule violations           │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  partner-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - Code + message shown to the operator           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → terminal     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An invalid material calculation is NOT an error: it is the
//! `InvalidInput` outcome of [`crate::material::MaterialRequirement`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Partner not found: {0}")]
    PartnerNotFound(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product type not found: {0}")]
    ProductTypeNotFound(String),

    #[error("Material type not found: {0}")]
    MaterialTypeNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Saving an order needs at least one selected product with a positive
    /// quantity.
    ///
    /// ```text
    /// [x] Panel A   qty 0
    /// [ ] Panel B   qty 5      ──►  EmptyOrder
    /// ```
    #[error("Order must contain at least one product with a positive quantity")]
    EmptyOrder,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Wrong shape, e.g. an INN with letters in it.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PartnerNotFound("p-42".to_string());
        assert_eq!(err.to_string(), "Partner not found: p-42");

        assert_eq!(
            CoreError::EmptyOrder.to_string(),
            "Order must contain at least one product with a positive quantity"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 10,
        };
        assert_eq!(err.to_string(), "rating must be between 0 and 10");
        assert_eq!(err.field(), "rating");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "inn".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: inn is required");
    }
}
