//! # Config Commands
//!
//! Read-only access to the session configuration.

use tracing::debug;

use crate::state::{ConfigState, StorefrontConfig};

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Shell startup (store name banner)
/// - `help` output (which catalog files are loaded)
pub fn get_config(config: &ConfigState) -> StorefrontConfig {
    debug!("get_config command");
    config.config().clone()
}
