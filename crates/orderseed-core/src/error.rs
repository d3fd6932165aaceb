//! # Error Types
//!
//! Domain-specific error types for orderseed-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  orderseed-core errors (this file)                                     │
//! │  ├── CoreError        - Generation failures                            │
//! │  └── ValidationError  - Record invariant violations                    │
//! │                                                                         │
//! │  orderseed-db errors (separate crate)                                  │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → bin/seed (logged)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while generating records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order needs at least one entity of each kind to reference.
    ///
    /// ## When This Occurs
    /// - `create_orders` runs before customers/products/stores were inserted
    /// - The plan asks for zero entities of a kind but still wants orders
    #[error("Cannot generate orders: no {entity} available")]
    EmptyPool { entity: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an EmptyPool error for the given entity kind.
    pub fn empty_pool(entity: impl Into<String>) -> Self {
        CoreError::EmptyPool {
            entity: entity.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A generated record broke one of its invariants.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    /// Invalid format (e.g. non-alphanumeric purchase order).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A list does not have the expected number of entries.
    #[error("{field} must have {expected} entries, got {actual}")]
    CardinalityMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// Two denormalized copies of the same data disagree.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },
}

impl ValidationError {
    /// Creates an OutOfRange error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::empty_pool("stores");
        assert_eq!(err.to_string(), "Cannot generate orders: no stores available");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::out_of_range("details.quantity", 1, 10, 11);
        assert_eq!(
            err.to_string(),
            "details.quantity must be between 1 and 10, got 11"
        );

        let err = ValidationError::CardinalityMismatch {
            field: "phones".to_string(),
            expected: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "phones must have 2 entries, got 1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
