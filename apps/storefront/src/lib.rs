//! # Storefront App Library
//!
//! Wires logging, configuration and the catalog files into one shell
//! session. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs            ◄─── You are here (startup & run)
//! ├── catalog_source.rs ◄─── products.json / offers.json loading
//! ├── shell.rs          ◄─── Line parser, session, rendering
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── catalog.rs    ◄─── Catalog + search/filter/page
//! │   ├── cart.rs       ◄─── Session-owned cart
//! │   └── config.rs     ◄─── StorefrontConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── product.rs    ◄─── Product list commands
//! │   ├── cart.rs       ◄─── Cart manipulation commands
//! │   └── config.rs     ◄─── Config retrieval
//! └── error.rs          ◄─── API error type for commands
//! ```

pub mod catalog_source;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;

use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use shell::Session;
use state::{ConfigState, StorefrontConfig};

/// Runs one storefront session on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (DEBUG for storefront crates), RUST_LOG overrides   │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Explicit path, $STOREFRONT_CONFIG, or platform config dir         │
/// │     • STOREFRONT_* environment overrides                                │
/// │                                                                         │
/// │  3. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • products.json + offers.json, validated record by record           │
/// │                                                                         │
/// │  4. Run Shell ────────────────────────────────────────────────────────► │
/// │     • One Session owns ConfigState, CatalogState, CartState             │
/// │     • Ends on `quit` or end of input                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(config_path: Option<PathBuf>) -> Result<(), ApiError> {
    init_tracing();

    info!("Starting storefront");

    let config = StorefrontConfig::load(config_path)?;
    info!(
        store = %config.store_name,
        products = ?config.products_path,
        offers = ?config.offers_path,
        page_size = config.page_size,
        "Configuration loaded"
    );

    let catalog = catalog_source::load_catalog(&config.products_path, &config.offers_path)?;
    let mut session = Session::new(ConfigState::new(config), catalog);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shell::run_shell(&mut session, stdin.lock(), stdout.lock())
        .map_err(|e| ApiError::internal(format!("Terminal I/O failed: {}", e)))
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they never interleave with the shell's output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_core=trace` - Trace the pricing engine only
/// - Default: INFO, DEBUG for the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,storefront=debug,storefront_app=debug,storefront_core=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
