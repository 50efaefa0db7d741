//! # Storefront Entry Point
//!
//! ```text
//! storefront [CONFIG_PATH]
//! ```
//!
//! Browses the catalog and fills a cart from an interactive prompt. The
//! actual setup is in lib.rs so it can be tested.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match storefront_app::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
