//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Pricing contract violations, lookups           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  apps/storefront errors                                                │
//! │  ├── ConfigError / CatalogSourceError                                  │
//! │  └── ApiError         - What the shell prints (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Shell                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Removing, incrementing or decrementing a line item that is no longer in
//! the cart is a silent no-op. The UI can race with stale references (a
//! second click after removal), so those paths return `None`, not `Err`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant except `ProductNotFound` is a programmer-contract violation:
/// no caller in the storefront should be able to trigger it with valid data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A unit price below zero reached the pricing engine.
    #[error("Invalid unit price {paise} paise: price must not be negative")]
    InvalidPrice { paise: i64 },

    /// A quantity below one reached the pricing engine.
    #[error("Invalid quantity {quantity}: quantity must be at least 1")]
    InvalidQuantity { quantity: i64 },

    /// An item total does not fit in the money representation.
    #[error("Amount overflow while pricing {quantity} unit(s)")]
    AmountOverflow { quantity: i64 },

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Bad input caught by the `validation` rules.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected catalog records, search text or settings.
///
/// Every variant names the offending field so the message can be shown as is.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Empty or whitespace-only.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than the field allows.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Outside an inclusive numeric range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or negative where a count is expected.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Not one of the accepted keywords.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result alias used across the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity { quantity: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid quantity 0: quantity must be at least 1"
        );

        let err = CoreError::InvalidPrice { paise: -100 };
        assert_eq!(
            err.to_string(),
            "Invalid unit price -100 paise: price must not be negative"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "page_size".to_string(),
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "page_size must be between 1 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
