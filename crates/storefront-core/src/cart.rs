//! # Cart Store
//!
//! The ordered collection of line items and every state transition on it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action          Cart Method       State Change        Event       │
//! │  ───────────          ───────────       ────────────        ─────       │
//! │                                                                         │
//! │  Add to Cart ───────► add() ──────────► items.push(line)    Added       │
//! │                                                                         │
//! │  Click "+" ─────────► increment() ────► qty += step         QtyChanged  │
//! │                                                                         │
//! │  Click "-" ─────────► decrement() ────► qty -= 1 (floored)  QtyChanged  │
//! │                                                                         │
//! │  Click Remove ──────► remove() ───────► items.remove(i)     Removed     │
//! │                                                                         │
//! │  Every quantity change goes through pricing::compute_total.             │
//! │  Unknown ids and duplicate adds are no-ops and return None.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Cart` is a plain owned value. Each session holds its own cart; nothing
//! in this module is global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{self, compute_total};
use crate::types::{Offer, Product};

// =============================================================================
// Line Item Id
// =============================================================================

/// Opaque identifier of a line item, generated from a UUID v4 and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    fn generate() -> Self {
        LineItemId(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LineItemId {
    fn from(id: String) -> Self {
        LineItemId(id)
    }
}

impl From<&str> for LineItemId {
    fn from(id: &str) -> Self {
        LineItemId(id.to_string())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product in the cart.
///
/// ## Snapshot Semantics
/// The product and its offer are captured when the line is created. Later
/// catalog changes do not reach items already in the cart.
///
/// ## Invariant
/// `item_total == compute_total(product.price, quantity, offer)` at all
/// times. Fields are private so the total can only move together with the
/// quantity.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: LineItemId,
    product: Product,
    quantity: i64,
    offer: Option<Offer>,
    item_total: Money,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    fn new(product: &Product, offer: Option<&Offer>) -> CoreResult<Self> {
        let quantity = pricing::quantity_floor(offer);
        let item_total = compute_total(product.price(), quantity, offer)?;

        Ok(LineItem {
            id: LineItemId::generate(),
            product: product.clone(),
            quantity,
            offer: offer.cloned(),
            item_total,
            added_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &LineItemId {
        &self.id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn item_total(&self) -> Money {
        self.item_total
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Unit price frozen at add time.
    pub fn unit_price(&self) -> Money {
        self.product.price()
    }

    /// Amount the offer takes off this line.
    pub fn savings(&self) -> CoreResult<Money> {
        pricing::savings(self.product.price(), self.quantity, self.offer.as_ref())
    }
}

// =============================================================================
// Cart Events
// =============================================================================

/// What a successful mutation changed.
///
/// Mutations return `Some(event)` exactly once per user-visible change, so
/// the presentation layer can notify without re-deriving what happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartEvent {
    #[serde(rename_all = "camelCase")]
    Added {
        line_item_id: LineItemId,
        product_name: String,
        quantity: i64,
    },
    #[serde(rename_all = "camelCase")]
    Removed {
        line_item_id: LineItemId,
        product_name: String,
    },
    #[serde(rename_all = "camelCase")]
    QuantityChanged {
        line_item_id: LineItemId,
        product_name: String,
        from: i64,
        to: i64,
    },
    #[serde(rename_all = "camelCase")]
    Cleared { line_count: usize },
}

/// Toast style for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A user-facing message for the notification side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl CartEvent {
    /// The toast to show for this event, if any.
    ///
    /// Only adding and removing notify; quantity changes update the cart view
    /// silently.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            CartEvent::Added { product_name, .. } => Some(Notification {
                kind: NotificationKind::Success,
                message: format!("{} added to cart", product_name),
            }),
            CartEvent::Removed { product_name, .. } => Some(Notification {
                kind: NotificationKind::Error,
                message: format!("{} removed from cart", product_name),
            }),
            CartEvent::QuantityChanged { .. } | CartEvent::Cleared { .. } => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line item per product id (adding a present product is a no-op)
/// - Every `item_total` matches its quantity and offer
/// - Quantity never drops below the offer floor (1, or 2 for buy-one-get-one)
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of line items (distinct products).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn find_by_product(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    pub fn contains_product(&self, product_id: &str) -> bool {
        self.find_by_product(product_id).is_some()
    }

    /// Adds a product with the offer resolved for it.
    ///
    /// ## Behavior
    /// - Product already in cart: no-op, returns `Ok(None)`
    /// - Otherwise: new line with quantity 2 for buy-one-get-one, else 1
    ///
    /// ## Errors
    /// - [`CoreError::InvalidPrice`] when the product carries a negative price
    /// - [`CoreError::AmountOverflow`] when the cart total would no longer fit
    pub fn add(&mut self, product: &Product, offer: Option<&Offer>) -> CoreResult<Option<CartEvent>> {
        if self.contains_product(&product.id) {
            debug!(product_id = %product.id, "product already in cart, add ignored");
            return Ok(None);
        }

        let item = LineItem::new(product, offer)?;
        self.ensure_total_fits(None, item.item_total, item.quantity)?;
        debug!(
            line_item_id = %item.id,
            product_id = %product.id,
            quantity = item.quantity,
            item_total = %item.item_total,
            "line item added"
        );

        let event = CartEvent::Added {
            line_item_id: item.id.clone(),
            product_name: item.product.name.clone(),
            quantity: item.quantity,
        };
        self.items.push(item);
        Ok(Some(event))
    }

    /// Removes a line item. Unknown ids are ignored.
    pub fn remove(&mut self, id: &LineItemId) -> Option<CartEvent> {
        let index = self.position(id)?;
        let item = self.items.remove(index);
        debug!(line_item_id = %item.id, "line item removed");

        Some(CartEvent::Removed {
            line_item_id: item.id,
            product_name: item.product.name,
        })
    }

    /// Adds one unit, or one pair for buy-one-get-one lines.
    pub fn increment(&mut self, id: &LineItemId) -> CoreResult<Option<CartEvent>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let item = &self.items[index];
        let from = item.quantity;
        let to = from
            .checked_add(pricing::quantity_step(item.offer.as_ref()))
            .ok_or(CoreError::AmountOverflow { quantity: from })?;
        self.change_quantity(index, from, to).map(Some)
    }

    /// Removes one unit, never going below the offer floor.
    ///
    /// Returns `Ok(None)` when the line is absent or already at its floor.
    pub fn decrement(&mut self, id: &LineItemId) -> CoreResult<Option<CartEvent>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let item = &self.items[index];
        let from = item.quantity;
        let to = (from - 1).max(pricing::quantity_floor(item.offer.as_ref()));
        if to == from {
            debug!(line_item_id = %item.id, quantity = from, "quantity at floor, decrement ignored");
            return Ok(None);
        }
        self.change_quantity(index, from, to).map(Some)
    }

    fn position(&self, id: &LineItemId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Prices the new quantity first so a failure leaves the line untouched.
    fn change_quantity(&mut self, index: usize, from: i64, to: i64) -> CoreResult<CartEvent> {
        let item = &self.items[index];
        let item_total = compute_total(item.product.price(), to, item.offer.as_ref())?;
        self.ensure_total_fits(Some(index), item_total, to)?;

        let item = &mut self.items[index];
        item.quantity = to;
        item.item_total = item_total;
        debug!(
            line_item_id = %item.id,
            from,
            to,
            item_total = %item.item_total,
            "line item quantity changed"
        );

        Ok(CartEvent::QuantityChanged {
            line_item_id: item.id.clone(),
            product_name: item.product.name.clone(),
            from,
            to,
        })
    }

    /// Checks that the cart total stays representable with `line_total` in
    /// place of the line at `replacing` (or added, when `None`).
    fn ensure_total_fits(&self, replacing: Option<usize>, line_total: Money, quantity: i64) -> CoreResult<()> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != replacing)
            .try_fold(line_total, |acc, (_, item)| acc.checked_add(item.item_total))
            .map(|_| ())
            .ok_or(CoreError::AmountOverflow { quantity })
    }

    /// Empties the cart. Returns `None` when it was already empty.
    pub fn clear(&mut self) -> Option<CartEvent> {
        if self.items.is_empty() {
            return None;
        }
        let line_count = self.items.len();
        self.items.clear();
        self.created_at = Utc::now();
        debug!(line_count, "cart cleared");
        Some(CartEvent::Cleared { line_count })
    }

    /// Sum of quantities across all lines (the cart badge number).
    pub fn total_item_count(&self) -> CoreResult<i64> {
        self.items.iter().try_fold(0i64, |acc, item| {
            acc.checked_add(item.quantity)
                .ok_or(CoreError::AmountOverflow { quantity: item.quantity })
        })
    }

    /// Sum of line totals, computed on demand.
    ///
    /// Every line total fits in `Money` on its own; the sum of several may
    /// not, and that comes back as [`CoreError::AmountOverflow`].
    pub fn total_amount(&self) -> CoreResult<Money> {
        self.items.iter().try_fold(Money::zero(), |acc, item| {
            acc.checked_add(item.item_total)
                .ok_or(CoreError::AmountOverflow { quantity: item.quantity })
        })
    }

    /// Sum of offer savings across all lines.
    pub fn total_savings(&self) -> CoreResult<Money> {
        self.items
            .iter()
            .try_fold(Money::zero(), |acc, item| {
                let saved = item.savings()?;
                acc.checked_add(saved)
                    .ok_or(CoreError::AmountOverflow { quantity: item.quantity })
            })
    }
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: i64,
    pub total_amount: Money,
    pub total_savings: Money,
}

impl TryFrom<&Cart> for CartTotals {
    type Error = CoreError;

    fn try_from(cart: &Cart) -> Result<Self, Self::Error> {
        Ok(CartTotals {
            line_count: cart.len(),
            item_count: cart.total_item_count()?,
            total_amount: cart.total_amount()?,
            total_savings: cart.total_savings()?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
