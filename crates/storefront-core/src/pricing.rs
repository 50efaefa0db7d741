//! # Pricing Engine
//!
//! Computes a line item's total from its unit price, quantity and offer.
//!
//! ## Offer Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Offer            Formula                          ₹100 × 3             │
//! │  ───────────────  ───────────────────────────────  ──────────────────   │
//! │  none             price × qty                      ₹300                 │
//! │  flat ₹20         (price - 20) × qty               ₹240                 │
//! │  percentage 10%   (price - round(price × 10%)) × qty  ₹270              │
//! │  free (BOGO)      price × ceil(qty / 2)            ₹200                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is a pure function. The cart is the only caller and it
//! recomputes through [`compute_total`] on every quantity change.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Offer, OfferKind};

/// Computes the total for `quantity` units at `unit_price` under `offer`.
///
/// ## Contract
/// - `unit_price` must not be negative → [`CoreError::InvalidPrice`]
/// - `quantity` must be at least 1 → [`CoreError::InvalidQuantity`]
///
/// A flat discount larger than the unit price produces a negative total.
/// No floor at zero is applied.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::compute_total;
/// use storefront_core::{Money, Offer};
///
/// let price = Money::from_rupees(200);
/// let bogo = Offer::buy_one_get_one("p1");
///
/// // Two units under buy-one-get-one cost one unit price.
/// assert_eq!(compute_total(price, 2, Some(&bogo)).unwrap(), Money::from_rupees(200));
/// assert_eq!(compute_total(price, 3, Some(&bogo)).unwrap(), Money::from_rupees(400));
/// ```
pub fn compute_total(unit_price: Money, quantity: i64, offer: Option<&Offer>) -> CoreResult<Money> {
    if unit_price.is_negative() {
        return Err(CoreError::InvalidPrice {
            paise: unit_price.paise(),
        });
    }
    if quantity < 1 {
        return Err(CoreError::InvalidQuantity { quantity });
    }

    let (charged_unit, charged_qty) = match offer {
        None => (Some(unit_price), quantity),
        Some(offer) => match offer.kind {
            OfferKind::Flat => (unit_price.checked_sub(offer.flat_discount()), quantity),
            OfferKind::Percentage => (
                unit_price
                    .percentage_of(offer.discount_value)
                    .and_then(|discount| unit_price.checked_sub(discount)),
                quantity,
            ),
            // Pay for one unit out of every started pair
            OfferKind::Free => (Some(unit_price), quantity / 2 + quantity % 2),
        },
    };

    charged_unit
        .and_then(|unit| unit.checked_mul_quantity(charged_qty))
        .ok_or(CoreError::AmountOverflow { quantity })
}

/// Smallest quantity a line item may hold under `offer`.
///
/// Buy-one-get-one lines always hold at least one full pair.
#[inline]
pub fn quantity_floor(offer: Option<&Offer>) -> i64 {
    match offer {
        Some(offer) if offer.is_free() => 2,
        _ => 1,
    }
}

/// How much one increment adds under `offer`.
///
/// One increment of a buy-one-get-one line adds one purchasable pair.
#[inline]
pub fn quantity_step(offer: Option<&Offer>) -> i64 {
    match offer {
        Some(offer) if offer.is_free() => 2,
        _ => 1,
    }
}

/// List price minus offer price for the same quantity.
pub fn savings(unit_price: Money, quantity: i64, offer: Option<&Offer>) -> CoreResult<Money> {
    let list = compute_total(unit_price, quantity, None)?;
    let charged = compute_total(unit_price, quantity, offer)?;
    list.checked_sub(charged)
        .ok_or(CoreError::AmountOverflow { quantity })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rupees(r: i64) -> Money {
        Money::from_rupees(r)
    }

    #[test]
    fn test_no_offer() {
        assert_eq!(compute_total(rupees(100), 1, None).unwrap(), rupees(100));
        assert_eq!(compute_total(rupees(100), 2, None).unwrap(), rupees(200));
        assert_eq!(compute_total(Money::zero(), 5, None).unwrap(), Money::zero());
    }

    #[test]
    fn test_flat_offer() {
        let offer = Offer::flat("p1", rupees(20));
        assert_eq!(compute_total(rupees(100), 1, Some(&offer)).unwrap(), rupees(80));
        assert_eq!(compute_total(rupees(100), 2, Some(&offer)).unwrap(), rupees(160));
    }

    #[test]
    fn test_flat_offer_above_price_goes_negative() {
        let offer = Offer::flat("p1", rupees(150));
        assert_eq!(compute_total(rupees(100), 2, Some(&offer)).unwrap(), rupees(-100));
    }

    #[test]
    fn test_percentage_offer() {
        let offer = Offer::percentage("p1", 10);
        assert_eq!(compute_total(rupees(50), 1, Some(&offer)).unwrap(), rupees(45));
        assert_eq!(compute_total(rupees(50), 2, Some(&offer)).unwrap(), rupees(90));
    }

    #[test]
    fn test_percentage_offer_rounds_per_unit() {
        // 10% of ₹49.99 = 499.9 paise → 500; unit 4499; × 3 = 13497
        let offer = Offer::percentage("p1", 10);
        let total = compute_total(Money::from_paise(4999), 3, Some(&offer)).unwrap();
        assert_eq!(total.paise(), 13_497);
    }

    #[test]
    fn test_free_offer_pairs() {
        let offer = Offer::buy_one_get_one("p1");
        let price = rupees(200);
        let total = |q| compute_total(price, q, Some(&offer)).unwrap();

        assert_eq!(total(1), rupees(200));
        assert_eq!(total(2), rupees(200));
        assert_eq!(total(3), rupees(400));
        assert_eq!(total(4), rupees(400));
        assert_eq!(total(5), rupees(600));
    }

    #[test]
    fn test_contract_violations() {
        assert!(matches!(
            compute_total(rupees(-1), 1, None),
            Err(CoreError::InvalidPrice { paise: -100 })
        ));
        assert!(matches!(
            compute_total(rupees(10), 0, None),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            compute_total(rupees(10), -3, None),
            Err(CoreError::InvalidQuantity { quantity: -3 })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        let result = compute_total(Money::from_paise(i64::MAX), 2, None);
        assert!(matches!(result, Err(CoreError::AmountOverflow { quantity: 2 })));
    }

    #[test]
    fn test_percentage_overflow_is_reported() {
        // Above 100% the discount of a huge price no longer fits
        let offer = Offer::percentage_bps("p1", 30_000);
        let result = compute_total(Money::from_paise(i64::MAX), 1, Some(&offer));
        assert!(matches!(result, Err(CoreError::AmountOverflow { quantity: 1 })));

        let result = compute_total(Money::from_paise(i64::MAX / 2), 1, Some(&offer));
        assert!(matches!(result, Err(CoreError::AmountOverflow { .. })));
    }

    #[test]
    fn test_free_offer_at_max_quantity() {
        let offer = Offer::buy_one_get_one("p1");
        let total = compute_total(Money::from_paise(1), i64::MAX, Some(&offer)).unwrap();
        assert_eq!(total.paise(), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_floor_and_step() {
        let bogo = Offer::buy_one_get_one("p1");
        let flat = Offer::flat("p1", rupees(5));

        assert_eq!(quantity_floor(None), 1);
        assert_eq!(quantity_floor(Some(&flat)), 1);
        assert_eq!(quantity_floor(Some(&bogo)), 2);

        assert_eq!(quantity_step(None), 1);
        assert_eq!(quantity_step(Some(&flat)), 1);
        assert_eq!(quantity_step(Some(&bogo)), 2);
    }

    #[test]
    fn test_savings() {
        let bogo = Offer::buy_one_get_one("p1");
        assert_eq!(savings(rupees(200), 4, Some(&bogo)).unwrap(), rupees(400));
        assert_eq!(savings(rupees(200), 4, None).unwrap(), Money::zero());
    }

    proptest! {
        #[test]
        fn no_offer_is_price_times_quantity(price in 0i64..10_000_000, qty in 1i64..1_000) {
            let total = compute_total(Money::from_paise(price), qty, None).unwrap();
            prop_assert_eq!(total.paise(), price * qty);
        }

        #[test]
        fn flat_offer_is_discounted_price_times_quantity(
            price in 0i64..10_000_000,
            discount in 0i64..20_000_000,
            qty in 1i64..1_000,
        ) {
            let offer = Offer::flat("p", Money::from_paise(discount));
            let total = compute_total(Money::from_paise(price), qty, Some(&offer)).unwrap();
            prop_assert_eq!(total.paise(), (price - discount) * qty);
        }

        #[test]
        fn whole_percent_on_whole_rupees_is_exact(
            rupees in 0i64..100_000,
            percent in 0i64..=100,
            qty in 1i64..1_000,
        ) {
            // Whole rupees × whole percent never needs rounding
            let offer = Offer::percentage("p", percent);
            let total = compute_total(Money::from_rupees(rupees), qty, Some(&offer)).unwrap();
            prop_assert_eq!(total.paise(), rupees * qty * (100 - percent));
        }

        #[test]
        fn free_offer_charges_started_pairs(price in 0i64..10_000_000, qty in 1i64..1_000) {
            let offer = Offer::buy_one_get_one("p");
            let total = compute_total(Money::from_paise(price), qty, Some(&offer)).unwrap();
            prop_assert_eq!(total.paise(), price * ((qty + 1) / 2));
        }

        #[test]
        fn free_offer_odd_quantity_costs_same_as_next_even(price in 0i64..10_000_000, pair in 0i64..500) {
            let offer = Offer::buy_one_get_one("p");
            let odd = compute_total(Money::from_paise(price), 2 * pair + 1, Some(&offer)).unwrap();
            let even = compute_total(Money::from_paise(price), 2 * pair + 2, Some(&offer)).unwrap();
            prop_assert_eq!(odd, even);
        }
    }
}
