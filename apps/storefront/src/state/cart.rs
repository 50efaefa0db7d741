//! # Cart State
//!
//! Owns the session's cart. The cart logic itself lives in
//! `storefront_core::cart`; this wrapper adds the shell's way of naming a
//! line (the id of the product on it).
//!
//! ## Ownership
//! One session owns one `CartState`, passed by reference to each command.
//! There is no global cart and no lock; the shell is single-threaded.

use storefront_core::{Cart, LineItemId};

/// Session-owned cart state.
#[derive(Debug, Default)]
pub struct CartState {
    cart: Cart,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState { cart: Cart::new() }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::try_from(cart))?;
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ```rust,ignore
    /// let event = cart_state.with_cart_mut(|cart| cart.increment(&id))?;
    /// ```
    pub fn with_cart_mut<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        f(&mut self.cart)
    }

    /// Id of the line holding `product_id`, if the product is in the cart.
    pub fn line_for_product(&self, product_id: &str) -> Option<LineItemId> {
        self.cart
            .find_by_product(product_id.trim())
            .map(|item| item.id().clone())
    }
}
