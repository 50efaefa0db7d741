//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Paise, Not Floats
//! Prices arrive in whole paise and stay there. Percentage offers are the
//! only place a fraction appears, and it is rounded once per unit:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  10% OFF ₹49.99, THREE UNITS                                            │
//! │                                                                         │
//! │  per-unit discount = round(4999 × 1000 / 10000) = round(499.9) = 500    │
//! │  per-unit price    = 4999 - 500                 = 4499 paise            │
//! │  line total        = 4499 × 3                   = 13497 paise (₹134.97) │
//! │                                                                         │
//! │  f64 would give 134.973 and drift on every later sum.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(10_000); // ₹100.00
//!
//! // Arithmetic is checked; overflow comes back as `None`
//! let doubled = price.checked_mul_quantity(2);            // ₹200.00
//! let total = price.checked_add(Money::from_paise(500));  // ₹105.00
//! assert_eq!(doubled, Some(Money::from_paise(20_000)));
//! assert_eq!(total.map(|m| m.to_string()).as_deref(), Some("₹105.00"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Display symbol of the single supported currency.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Basis points in 100%.
pub const BPS_PER_WHOLE: i64 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: A flat offer larger than the price yields a negative
///   line total, and that value has to be representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Serializes as a bare integer
///
/// ## Where Money is Used
/// ```text
/// Product.price_paise ──► LineItem.unit price ──► pricing::compute_total
///                                                       │
///                                                       ▼
///                          Cart::total_amount ◄── LineItem.item_total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // Represents ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(100).paise(), 10_000);
    /// assert_eq!(Money::from_rupees(i64::MAX).paise(), i64::MAX);
    /// ```
    ///
    /// Saturates at the bounds of `i64`.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(1099).rupees(), 10);
    /// assert_eq!(Money::from_paise(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// `true` when there is something to show, e.g. "you save" lines.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// A flat offer can push this below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(299);
    /// assert_eq!(unit_price.checked_mul_quantity(3), Some(Money::from_paise(897)));
    /// assert_eq!(Money::from_paise(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Subtracts another amount, returning `None` on overflow.
    #[inline]
    pub const fn checked_sub(&self, other: Money) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Adds another amount, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Returns the share of this amount described by `bps` basis points,
    /// rounded half away from zero to the nearest paisa.
    ///
    /// `None` when the share does not fit in `i64`, which only happens for
    /// shares above 100%.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// // 10% of ₹49.99 = 499.9 paise → 500 paise
    /// assert_eq!(Money::from_paise(4999).percentage_of(1000), Some(Money::from_paise(500)));
    /// assert_eq!(Money::from_paise(i64::MAX).percentage_of(20_000), None);
    /// ```
    pub fn percentage_of(&self, bps: i64) -> Option<Money> {
        // i128 keeps large prices from overflowing before the division
        let scaled = self.0 as i128 * bps as i128;
        let half = (BPS_PER_WHOLE / 2) as i128;
        let rounded = if scaled >= 0 {
            (scaled + half) / BPS_PER_WHOLE as i128
        } else {
            (scaled - half) / BPS_PER_WHOLE as i128
        };
        i64::try_from(rounded).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with the fixed currency symbol and two decimals.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            CURRENCY_SYMBOL,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
