//! # State Module
//!
//! Session state for the storefront shell.
//!
//! ## Multiple Focused State Types
//! Instead of a single struct containing everything, each concern gets its
//! own type and each command takes only the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Session (shell.rs)                         │   │
//! │  │  owns one of each, lends them to commands                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │  CartState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Catalog     │  │  Cart        │  │  store_name      │              │
//! │  │  query, page │  │  line lookup │  │  page_size       │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{env_keys, ConfigError, ConfigState, StorefrontConfig};
