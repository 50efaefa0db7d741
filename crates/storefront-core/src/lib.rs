//! # storefront-core: Pricing and Cart Logic
//!
//! This crate holds the offer-aware pricing engine and the cart state it
//! keeps consistent. Everything is a pure, synchronous function over owned
//! values; there is no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/storefront (presentation boundary)            │   │
//! │  │   catalog files ──► session ──► commands ──► notifications      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │◄─│   cart    │  │  catalog  │  │ validation│  │   │
//! │  │   │compute_   │  │ Cart      │  │ filter    │  │   rules   │  │   │
//! │  │   │  total    │  │ LineItem  │  │ paginate  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER MONEY                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Offer, OfferKind
//! - [`money`] - Money type with integer arithmetic (paise)
//! - [`pricing`] - Item totals under each offer kind
//! - [`cart`] - Cart, LineItem, CartEvent
//! - [`catalog`] - Product/offer join, search, filter, pagination
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Offer, Product};
//!
//! let product = Product {
//!     id: "p1".to_string(),
//!     name: "Aloe Gel".to_string(),
//!     price_paise: 20_000,
//!     photo_url: String::new(),
//!     rating: 4.4,
//! };
//! let offer = Offer::buy_one_get_one("p1");
//!
//! let mut cart = Cart::new();
//! cart.add(&product, Some(&offer)).unwrap();
//!
//! // Buy-one-get-one lines start at one pair and cost one unit.
//! assert_eq!(cart.total_item_count().unwrap(), 2);
//! assert_eq!(cart.total_amount().unwrap(), Money::from_rupees(200));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEvent, CartTotals, LineItem, LineItemId, Notification, NotificationKind};
pub use catalog::{paginate, Catalog, CatalogEntry, CatalogQuery, OfferFilter, Page};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::compute_total;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products shown per page of the product list.
pub const DEFAULT_PAGE_SIZE: usize = 6;
