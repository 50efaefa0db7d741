//! # Domain Types
//!
//! Catalog types shared by the pricing engine, the cart and the catalog view.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Offer       │   │   OfferKind     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product_id     │   │  Flat           │       │
//! │  │  name           │   │  kind ──────────┼──►│  Percentage     │       │
//! │  │  price_paise    │   │  discount_value │   │  Free           │       │
//! │  │  photo_url      │   └─────────────────┘   └─────────────────┘       │
//! │  │  rating         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both types are owned by the catalog source and are read-only snapshots
//! from the core's point of view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{Money, BPS_PER_WHOLE};

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique, opaque identifier supplied by the catalog source.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in paise (smallest currency unit).
    pub price_paise: i64,

    /// Image shown on the product card and in the cart.
    pub photo_url: String,

    /// Average customer rating (display only).
    pub rating: f64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }
}

// =============================================================================
// Offer Kind
// =============================================================================

/// The three mutually exclusive discount schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OfferKind {
    /// A fixed amount off every unit.
    Flat,
    /// A share of the unit price off every unit.
    Percentage,
    /// Buy one get one: every second unit is free.
    Free,
}

impl OfferKind {
    /// All kinds, in the order the catalog filter lists them.
    pub const ALL: [OfferKind; 3] = [OfferKind::Flat, OfferKind::Percentage, OfferKind::Free];

    /// Wire name of the kind (`flat`, `percentage`, `free`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OfferKind::Flat => "flat",
            OfferKind::Percentage => "percentage",
            OfferKind::Free => "free",
        }
    }
}

impl fmt::Display for OfferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(OfferKind::Flat),
            "percentage" => Ok(OfferKind::Percentage),
            "free" => Ok(OfferKind::Free),
            _ => Err(ValidationError::NotAllowed {
                field: "offer kind".to_string(),
                allowed: OfferKind::ALL.iter().map(|k| k.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A promotional offer attached to one product.
///
/// ## Discount Value Units
/// | kind         | `discount_value` means             |
/// |--------------|------------------------------------|
/// | `Flat`       | paise off each unit                |
/// | `Percentage` | basis points off each unit (1000 = 10%) |
/// | `Free`       | ignored                            |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Offer {
    /// Product this offer applies to.
    pub product_id: String,

    /// Discount scheme.
    pub kind: OfferKind,

    /// Discount magnitude, unit depends on `kind`.
    pub discount_value: i64,
}

impl Offer {
    /// A flat amount off each unit.
    pub fn flat(product_id: impl Into<String>, discount: Money) -> Self {
        Offer {
            product_id: product_id.into(),
            kind: OfferKind::Flat,
            discount_value: discount.paise(),
        }
    }

    /// A percentage off each unit, given in basis points.
    pub fn percentage_bps(product_id: impl Into<String>, bps: i64) -> Self {
        Offer {
            product_id: product_id.into(),
            kind: OfferKind::Percentage,
            discount_value: bps,
        }
    }

    /// A whole-number percentage off each unit (`10` = 10%).
    ///
    /// Saturates at the bounds of `i64`; `validate_discount_value` rejects
    /// anything above 100%.
    pub fn percentage(product_id: impl Into<String>, percent: i64) -> Self {
        Self::percentage_bps(product_id, percent.saturating_mul(100))
    }

    /// Buy one get one.
    pub fn buy_one_get_one(product_id: impl Into<String>) -> Self {
        Offer {
            product_id: product_id.into(),
            kind: OfferKind::Free,
            discount_value: 0,
        }
    }

    /// Returns true for the buy-one-get-one scheme.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.kind == OfferKind::Free
    }

    /// The flat discount as Money (only meaningful for `Flat`).
    #[inline]
    pub fn flat_discount(&self) -> Money {
        Money::from_paise(self.discount_value)
    }
}

/// Badge text shown on product cards and cart lines.
///
/// ```rust
/// use storefront_core::{Money, Offer};
///
/// assert_eq!(Offer::flat("p1", Money::from_rupees(20)).to_string(), "Flat ₹20.00 off");
/// assert_eq!(Offer::percentage("p1", 10).to_string(), "10% off");
/// assert_eq!(Offer::percentage_bps("p1", 1250).to_string(), "12.5% off");
/// assert_eq!(Offer::buy_one_get_one("p1").to_string(), "Buy 1 Get 1");
/// ```
impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OfferKind::Flat => write!(f, "Flat {} off", self.flat_discount()),
            OfferKind::Percentage => {
                let whole = self.discount_value / 100;
                let fraction = (self.discount_value % 100).abs();
                if fraction == 0 {
                    write!(f, "{}% off", whole)
                } else if fraction % 10 == 0 {
                    write!(f, "{}.{}% off", whole, fraction / 10)
                } else {
                    write!(f, "{}.{:02}% off", whole, fraction)
                }
            }
            OfferKind::Free => f.write_str("Buy 1 Get 1"),
        }
    }
}

/// Largest meaningful percentage discount.
pub const MAX_PERCENTAGE_BPS: i64 = BPS_PER_WHOLE;

// =============================================================================
// Unit Tests
// =============================================================================
