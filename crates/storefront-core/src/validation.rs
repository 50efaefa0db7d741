//! # Validation Module
//!
//! Input validation for catalog records and shell input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog source (apps/storefront)                             │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── THIS MODULE: ids, names, prices, discount values                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing engine                                               │
//! │  └── Contract checks (price >= 0, quantity >= 1) fail loudly           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_price_paise, validate_quantity};
//!
//! assert!(validate_price_paise(49_900).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```
//!
//! Flat discounts are not checked against the product price:
//! a discount above the price yields a negative line total downstream.

use crate::error::ValidationError;
use crate::types::{OfferKind, MAX_PERCENTAGE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Largest accepted product list page size.
pub const MAX_PAGE_SIZE: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 64 characters
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "product id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - At most 100 characters
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value (must be at least 1).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in paise.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free samples)
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_price_paise;
///
/// assert!(validate_price_paise(1099).is_ok());
/// assert!(validate_price_paise(0).is_ok());
/// assert!(validate_price_paise(-100).is_err());
/// ```
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an offer's discount value for its kind.
///
/// ## Rules
/// - `Flat`: non-negative paise
/// - `Percentage`: 0 to 10000 basis points (0% to 100%)
/// - `Free`: value is ignored
pub fn validate_discount_value(kind: OfferKind, value: i64) -> ValidationResult<()> {
    match kind {
        OfferKind::Flat if value < 0 => Err(ValidationError::OutOfRange {
            field: "flat discount".to_string(),
            min: 0,
            max: i64::MAX,
        }),
        OfferKind::Percentage if !(0..=MAX_PERCENTAGE_BPS).contains(&value) => {
            Err(ValidationError::OutOfRange {
                field: "percentage discount".to_string(),
                min: 0,
                max: MAX_PERCENTAGE_BPS,
            })
        }
        _ => Ok(()),
    }
}

/// Validates a product list page size (1 to 100).
pub fn validate_page_size(size: usize) -> ValidationResult<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "page_size".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
