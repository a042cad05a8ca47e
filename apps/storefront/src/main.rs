//! # Lesson Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lesson Storefront                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Frontend (pages)                            │  │
//! │  │      Home          Classes          Checkout                     │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ JSON lines (stdin / stdout)          │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Host (this crate)                        │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► calls lib::run()                                  │  │
//! │  │  lib.rs ─────► logging, config, state, serve loop               │  │
//! │  │  commands/ ──► add_to_cart, navigate, get_config, ...           │  │
//! │  │  state/ ─────► CartState, NavigationState, ConfigState          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = lesson_storefront_lib::run() {
        tracing::error!(error = %e, "Storefront exited with an error");
        std::process::exit(1);
    }
}
