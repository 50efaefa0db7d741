//! # Cart Commands
//!
//! Cart manipulation from the product list and the cart view.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                              │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ increment_item           │
//! │  │  Cart    │                │          │───┘ decrement_item           │
//! │  └──────────┘                └──────────┘                              │
//! │       ▲                        │      │                                 │
//! │       │    remove_from_cart    │      │ clear_cart                      │
//! │       └────────(last line)─────┘      │                                 │
//! │       └───────────────────────────────┘                                 │
//! │                                                                         │
//! │  Notifications: add ──► success toast, remove ──► error-styled toast   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the updated cart so the view never derives totals
//! itself.

use serde::Serialize;
use tracing::debug;

use storefront_core::validation::validate_product_id;
use storefront_core::{Cart, CartEvent, CartTotals, CoreError, LineItem, LineItemId, Notification};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl TryFrom<&Cart> for CartResponse {
    type Error = CoreError;

    fn try_from(cart: &Cart) -> Result<Self, Self::Error> {
        Ok(CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::try_from(cart)?,
        })
    }
}

/// Result of a cart mutation: the new cart plus the toast to show, if any.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCommandResult {
    pub cart: CartResponse,
    pub notification: Option<Notification>,
}

fn respond(cart: &CartState, event: Option<CartEvent>) -> Result<CartCommandResult, ApiError> {
    let notification = event.as_ref().and_then(CartEvent::notification);
    let cart = cart.with_cart(|c| CartResponse::try_from(c))?;
    Ok(CartCommandResult { cart, notification })
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    Ok(cart.with_cart(|c| CartResponse::try_from(c))?)
}

/// Adds a catalog product to the cart with the offer resolved for it.
///
/// ## Behavior
/// - Product already in cart: nothing changes, no notification
/// - Otherwise: new line at quantity 1 (2 for buy-one-get-one)
/// - The offer is captured now; later catalog changes do not reach the line
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &mut CartState,
    product_id: &str,
) -> Result<CartCommandResult, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");
    validate_product_id(product_id)?;
    let product_id = product_id.trim();

    let entry = catalog
        .catalog()
        .find(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    let event = cart.with_cart_mut(|c| c.add(&entry.product, entry.offer.as_ref()))?;
    respond(cart, event)
}

/// Adds one unit (one pair for buy-one-get-one) to a line.
pub fn increment_item(cart: &mut CartState, line_item_id: &LineItemId) -> Result<CartCommandResult, ApiError> {
    debug!(line_item_id = %line_item_id, "increment_item command");
    let event = cart.with_cart_mut(|c| c.increment(line_item_id))?;
    respond(cart, event)
}

/// Removes one unit from a line, stopping at the offer floor.
pub fn decrement_item(cart: &mut CartState, line_item_id: &LineItemId) -> Result<CartCommandResult, ApiError> {
    debug!(line_item_id = %line_item_id, "decrement_item command");
    let event = cart.with_cart_mut(|c| c.decrement(line_item_id))?;
    respond(cart, event)
}

/// Removes a line. Unknown ids leave the cart unchanged.
pub fn remove_from_cart(cart: &mut CartState, line_item_id: &LineItemId) -> Result<CartCommandResult, ApiError> {
    debug!(line_item_id = %line_item_id, "remove_from_cart command");
    let event = cart.with_cart_mut(|c| c.remove(line_item_id));
    respond(cart, event)
}

/// Empties the cart.
pub fn clear_cart(cart: &mut CartState) -> Result<CartCommandResult, ApiError> {
    debug!("clear_cart command");
    let event = cart.with_cart_mut(|c| c.clear());
    respond(cart, event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use storefront_core::{Catalog, Money, NotificationKind, Offer, Product};

    fn catalog_state() -> CatalogState {
        let product = |id: &str, name: &str, rupees: i64| Product {
            id: id.to_string(),
            name: name.to_string(),
            price_paise: rupees * 100,
            photo_url: String::new(),
            rating: 4.2,
        };
        CatalogState::new(
            Catalog::new(
                vec![
                    product("plain", "Rose Water", 100),
                    product("flat", "Face Wash", 100),
                    product("pct", "Vitamin C Serum", 50),
                    product("bogo", "Aloe Gel", 200),
                ],
                vec![
                    Offer::flat("flat", Money::from_rupees(20)),
                    Offer::percentage("pct", 10),
                    Offer::buy_one_get_one("bogo"),
                ],
            ),
            6,
        )
    }

    fn line(cart: &CartState, product_id: &str) -> LineItemId {
        cart.line_for_product(product_id).unwrap()
    }

    #[test]
    fn test_add_notifies_once() {
        let catalog = catalog_state();
        let mut cart = CartState::new();

        let result = add_to_cart(&catalog, &mut cart, "flat").unwrap();
        let note = result.notification.unwrap();
        assert_eq!(note.kind, NotificationKind::Success);
        assert_eq!(note.message, "Face Wash added to cart");
        assert_eq!(result.cart.totals.total_amount, Money::from_rupees(80));

        // Second add is a silent no-op
        let result = add_to_cart(&catalog, &mut cart, "flat").unwrap();
        assert!(result.notification.is_none());
        assert_eq!(result.cart.items.len(), 1);
        assert_eq!(result.cart.totals.item_count, 1);
    }

    #[test]
    fn test_add_unknown_product() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        let err = add_to_cart(&catalog, &mut cart, "ghost").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&catalog, &mut cart, "  ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_quantity_changes_are_silent() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        add_to_cart(&catalog, &mut cart, "bogo").unwrap();
        let id = line(&cart, "bogo");

        let result = increment_item(&mut cart, &id).unwrap();
        assert!(result.notification.is_none());
        assert_eq!(result.cart.totals.item_count, 4);
        assert_eq!(result.cart.totals.total_amount, Money::from_rupees(400));

        decrement_item(&mut cart, &id).unwrap();
        let result = decrement_item(&mut cart, &id).unwrap();
        assert_eq!(result.cart.totals.item_count, 2);
        assert_eq!(result.cart.totals.total_amount, Money::from_rupees(200));
    }

    #[test]
    fn test_remove_notifies_with_error_style() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        add_to_cart(&catalog, &mut cart, "pct").unwrap();
        let id = line(&cart, "pct");

        let result = remove_from_cart(&mut cart, &id).unwrap();
        let note = result.notification.unwrap();
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Vitamin C Serum removed from cart");
        assert!(result.cart.items.is_empty());

        // Stale reference
        let result = remove_from_cart(&mut cart, &id).unwrap();
        assert!(result.notification.is_none());
    }

    #[test]
    fn test_totals_and_savings() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        for id in ["plain", "flat", "pct", "bogo"] {
            add_to_cart(&catalog, &mut cart, id).unwrap();
        }

        let response = get_cart(&cart).unwrap();
        assert_eq!(response.totals.line_count, 4);
        assert_eq!(response.totals.item_count, 5);
        assert_eq!(response.totals.total_amount, Money::from_rupees(425));
        // 20 + 5 + 200
        assert_eq!(response.totals.total_savings, Money::from_rupees(225));
    }

    #[test]
    fn test_clear_cart() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        add_to_cart(&catalog, &mut cart, "plain").unwrap();

        let result = clear_cart(&mut cart).unwrap();
        assert!(result.notification.is_none());
        assert!(result.cart.items.is_empty());
        assert_eq!(result.cart.totals.total_amount, Money::zero());
    }

    #[test]
    fn test_total_overflow_is_a_cart_error() {
        let big = |id: &str| Product {
            id: id.to_string(),
            name: format!("Vault {}", id),
            price_paise: i64::MAX / 2 + 1,
            photo_url: String::new(),
            rating: 5.0,
        };
        let catalog = CatalogState::new(Catalog::new(vec![big("a"), big("b")], Vec::new()), 6);
        let mut cart = CartState::new();

        add_to_cart(&catalog, &mut cart, "a").unwrap();
        let err = add_to_cart(&catalog, &mut cart, "b").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        // The cart still renders
        let response = get_cart(&cart).unwrap();
        assert_eq!(response.items.len(), 1);
    }

    #[test]
    fn test_response_serialization() {
        let catalog = catalog_state();
        let mut cart = CartState::new();
        let result = add_to_cart(&catalog, &mut cart, "plain").unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["notification"]["kind"], "success");
        assert_eq!(json["cart"]["totals"]["totalAmount"], 10_000);
        assert_eq!(json["cart"]["items"][0]["quantity"], 1);
        assert_eq!(json["cart"]["items"][0]["itemTotal"], 10_000);
    }
}
