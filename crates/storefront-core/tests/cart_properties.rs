//! Property-based tests for cart invariants.
//!
//! Random sequences of add / increment / decrement / remove are applied to a
//! fresh cart and the invariants are checked after every step:
//! totals never drift, quantities never cross their floor, and
//! buy-one-get-one increments always add a whole pair.

use proptest::prelude::*;

use storefront_core::pricing::{compute_total, quantity_floor};
use storefront_core::{Cart, LineItemId, Money, Offer, Product};

#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Increment(usize),
    Decrement(usize),
    Remove(usize),
    RemoveUnknown,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Add),
        (0usize..8).prop_map(Op::Increment),
        (0usize..8).prop_map(Op::Decrement),
        (0usize..8).prop_map(Op::Remove),
        Just(Op::RemoveUnknown),
    ]
}

/// Eight products: two per offer kind plus two without offers.
fn catalog() -> Vec<(Product, Option<Offer>)> {
    (0..8)
        .map(|i| {
            let id = format!("p{}", i);
            let product = Product {
                id: id.clone(),
                name: format!("Product {}", i),
                price_paise: 1_999 + i as i64 * 1_250,
                photo_url: String::new(),
                rating: 4.0,
            };
            let offer = match i % 4 {
                0 => Some(Offer::flat(id, Money::from_rupees(5))),
                1 => Some(Offer::percentage_bps(id, 1_250)),
                2 => Some(Offer::buy_one_get_one(id)),
                _ => None,
            };
            (product, offer)
        })
        .collect()
}

fn line_id(cart: &Cart, index: usize) -> Option<LineItemId> {
    if cart.is_empty() {
        return None;
    }
    Some(cart.items()[index % cart.len()].id().clone())
}

fn check_invariants(cart: &Cart) -> Result<(), TestCaseError> {
    let mut seen = std::collections::HashSet::new();
    for item in cart.items() {
        prop_assert!(seen.insert(item.product().id.clone()), "duplicate product line");
        prop_assert!(item.quantity() >= quantity_floor(item.offer()));

        let expected = compute_total(item.unit_price(), item.quantity(), item.offer()).unwrap();
        prop_assert_eq!(item.item_total(), expected);
    }

    let sum: i64 = cart.items().iter().map(|i| i.item_total().paise()).sum();
    prop_assert_eq!(cart.total_amount().unwrap().paise(), sum);

    let count: i64 = cart.items().iter().map(|i| i.quantity()).sum();
    prop_assert_eq!(cart.total_item_count().unwrap(), count);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn invariants_hold_after_any_sequence(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let products = catalog();
        let mut cart = Cart::new();

        for op in ops {
            match op {
                Op::Add(i) => {
                    let (product, offer) = &products[i];
                    let had = cart.contains_product(&product.id);
                    let event = cart.add(product, offer.as_ref()).unwrap();
                    prop_assert_eq!(event.is_some(), !had);
                }
                Op::Increment(i) => {
                    if let Some(id) = line_id(&cart, i) {
                        let before = cart.get(&id).unwrap().quantity();
                        let is_free = cart.get(&id).unwrap().offer().is_some_and(|o| o.is_free());
                        cart.increment(&id).unwrap();
                        let after = cart.get(&id).unwrap().quantity();
                        prop_assert_eq!(after - before, if is_free { 2 } else { 1 });
                    }
                }
                Op::Decrement(i) => {
                    if let Some(id) = line_id(&cart, i) {
                        let before = cart.get(&id).unwrap().quantity();
                        let event = cart.decrement(&id).unwrap();
                        let after = cart.get(&id).unwrap().quantity();
                        prop_assert!(after <= before);
                        prop_assert_eq!(event.is_some(), after != before);
                    }
                }
                Op::Remove(i) => {
                    if let Some(id) = line_id(&cart, i) {
                        prop_assert!(cart.remove(&id).is_some());
                        prop_assert!(cart.get(&id).is_none());
                    }
                }
                Op::RemoveUnknown => {
                    let len = cart.len();
                    prop_assert!(cart.remove(&LineItemId::from("stale-reference")).is_none());
                    prop_assert_eq!(cart.len(), len);
                }
            }
            check_invariants(&cart)?;
        }
    }

    #[test]
    fn repeated_decrement_stops_at_floor(extra in 0usize..10, decrements in 0usize..30) {
        for (product, offer) in catalog() {
            let mut cart = Cart::new();
            cart.add(&product, offer.as_ref()).unwrap();
            let id = cart.items()[0].id().clone();

            for _ in 0..extra {
                cart.increment(&id).unwrap();
            }
            for _ in 0..decrements {
                cart.decrement(&id).unwrap();
            }
            prop_assert!(cart.get(&id).unwrap().quantity() >= quantity_floor(offer.as_ref()));
        }
    }
}
