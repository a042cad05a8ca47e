//! # Lesson Storefront Library
//!
//! Host shell for the Lesson Store frontend. It owns the session's managed
//! state, hands the route table to the navigator, and bridges frontend
//! invokes to commands.
//!
//! ## Module Organization
//! ```text
//! lesson_storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── cart.rs        ◄─── Cart store + event fan-out
//! │   ├── navigation.rs  ◄─── Navigator wrapper
//! │   └── config.rs      ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs         ◄─── Command exports
//! │   ├── cart.rs        ◄─── Cart manipulation commands
//! │   ├── navigation.rs  ◄─── Route listing / navigation commands
//! │   └── config.rs      ◄─── Config retrieval
//! ├── router.rs       ◄─── Navigation subsystem (URL → route)
//! ├── ipc.rs          ◄─── JSON-lines invoke bridge
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod router;
pub mod state;

use lesson_core::RouteTable;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ipc::Handler;
use router::Navigator;
use state::{CartState, ConfigState, NavigationState};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,lesson_storefront_lib=debug";

/// Runs a storefront session until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Session Startup                                   │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → storefront.toml → LESSON_* env vars                    │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CartState: empty cart, new session id                             │
/// │     • NavigationState: storefront route table + base path               │
/// │                                                                         │
/// │  4. Serve ────────────────────────────────────────────────────────────► │
/// │     • one invoke per stdin line, responses on stdout                    │
/// │     • EOF ends the session (the cart is not persisted)                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Lesson Store storefront");

    let config = ConfigState::load()?;
    info!(
        store = %config.store_name,
        base_path = %config.base_path,
        case_sensitive = config.routes_case_sensitive,
        "Configuration loaded"
    );

    let table = RouteTable::storefront();
    info!(routes = table.len(), "Route table ready");

    let navigator = Navigator::new(
        table,
        config.base_path.clone(),
        config.routes_case_sensitive,
    );
    let cart = CartState::new();
    let session_id = cart.with_cart(|c| c.cart().session_id());
    let handler = Handler::new(cart, NavigationState::new(navigator), config);

    info!(%session_id, "State initialized");

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(async {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        ipc::serve(&handler, stdin, stdout).await
    })?;

    info!(%session_id, "Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries IPC messages only.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lesson_storefront_lib=trace` - Trace this crate only
/// - Default: INFO, DEBUG for this crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).unwrap();
        assert!(filter.to_string().contains("lesson_storefront_lib=debug"));
    }
}
