//! # Commands Module
//!
//! All commands exposed to the frontend.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── navigation.rs  ◄─── Route listing and navigation
//! └── config.rs      ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  {"id": 7, "cmd": "add_to_cart", "args": {"itemId": "lesson-1"}}       │
//! │         │                                                               │
//! │         │ (one JSON object per line on stdin)                           │
//! │         ▼                                                               │
//! │  Rust Host (ipc.rs)                                                     │
//! │  ──────────────────                                                     │
//! │  decode args ──► ItemArgs { item_id: ItemId }                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      cart: &CartState,   ◄── Injected by the handler                   │
//! │      item_id: ItemId,    ◄── From invoke args                          │
//! │  ) -> CartSnapshot                                                      │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"id": 7, "ok": {"lines": [...], ...}}                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs cart
//! fn get_cart(cart: &CartState)
//!
//! // Only needs navigation
//! fn navigate(nav: &NavigationState, path: String)
//! ```

pub mod cart;
pub mod config;
pub mod navigation;
