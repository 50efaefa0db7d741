//! # Commands Module
//!
//! Everything the shell (or any other front end) can ask the storefront to
//! do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product list, search, offer filter, pager
//! ├── cart.rs     ◄─── Cart manipulation
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell line                                                             │
//! │  ──────────                                                             │
//! │  > add p-101                                                            │
//! │         │                                                               │
//! │         │ (parsed by shell.rs)                                          │
//! │         ▼                                                               │
//! │  fn add_to_cart(                                                        │
//! │      catalog: &CatalogState,     ◄── lent by the session                │
//! │      cart: &mut CartState,       ◄── lent by the session                │
//! │      product_id: &str,           ◄── from the command line              │
//! │  ) -> Result<CartCommandResult, ApiError>                               │
//! │         │                                                               │
//! │         │ (serializable response)                                       │
//! │         ▼                                                               │
//! │  Shell renders the cart and any notification                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs.

pub mod cart;
pub mod config;
pub mod product;
