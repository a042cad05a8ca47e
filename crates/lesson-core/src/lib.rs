//! # lesson-core: Pure Logic for the Lesson Store
//!
//! This crate holds the storefront's state rules with zero I/O dependencies:
//! the cart quantity ledger, its observable store, and the route table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Lesson Store Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (pages)                             │   │
//! │  │        Home ──► Classes ──► Checkout                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ invoke (JSON lines)                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    add_to_cart, remove_from_cart, navigate, etc.                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lesson-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   store   │  │  routes   │  │   │
//! │  │   │  ItemId   │  │   Cart    │  │ CartStore │  │ RouteTable│  │   │
//! │  │   │ CartLine  │  │CartChange │  │ Observers │  │   Page    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item identifiers and cart line types
//! - [`cart`] - The quantity ledger itself
//! - [`store`] - Observable wrapper that notifies subscribers on every change
//! - [`routes`] - Static path → page table
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for identifiers and routes
//!
//! ## Example Usage
//!
//! ```rust
//! use lesson_core::{CartStore, ItemId};
//!
//! let mut store = CartStore::new();
//! let lesson = ItemId::parse("lesson-1").unwrap();
//!
//! store.add(&lesson);
//! store.add(&lesson);
//! assert_eq!(store.quantity(&lesson), 2);
//!
//! store.remove(&lesson);
//! store.remove(&lesson);
//! assert_eq!(store.quantity(&lesson), 0);
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod routes;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange};
pub use error::{CoreError, CoreResult, ValidationError};
pub use routes::{Page, Route, RouteTable};
pub use store::{CartEvent, CartObserver, CartStore, SubscriptionId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item identifier, in characters.
///
/// Lesson ids are short slugs or database keys; anything longer is almost
/// certainly a client bug.
pub const MAX_ITEM_ID_LEN: usize = 128;

/// Maximum length of a route path.
pub const MAX_ROUTE_PATH_LEN: usize = 256;
