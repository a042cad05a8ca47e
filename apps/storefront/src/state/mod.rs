//! # State Module
//!
//! Manages application state for the storefront host.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything,
//! we use separate state types. Each command declares exactly the state it
//! needs, and tests can build one state without the others.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  CartState   │  │ NavigationState  │  │   ConfigState    │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Arc<Mutex<  │  │  Mutex<          │  │  store_name      │          │
//! │  │   CartStore  │  │   Navigator      │  │  base_path       │          │
//! │  │  >>          │  │  >               │  │  flags           │          │
//! │  │  + broadcast │  │                  │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  • CartState: one writer at a time, changes fanned out to listeners    │
//! │  • NavigationState: fixed route table, mutable current route           │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod navigation;

pub use cart::{CartNotification, CartState};
pub use config::{
    config_path, normalize_base_path, ConfigError, ConfigFile, ConfigState, CONFIG_PATH_ENV,
};
pub use navigation::NavigationState;
