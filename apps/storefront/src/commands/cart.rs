//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │   page   │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │       ▲                │                 │                              │
//! │       │           add_to_cart            │                              │
//! │       │           remove_from_cart       │                              │
//! │       │                                  │                              │
//! │       └───────────── clear_cart ◄────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item ids arrive already decoded into [`ItemId`]; malformed ids are
//! rejected while decoding the invoke arguments and never reach these
//! functions.

use lesson_core::{CartSnapshot, ItemId};
use serde::Serialize;
use tracing::debug;

use crate::state::CartState;

/// Quantity of a single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityResponse {
    pub item_id: ItemId,
    pub quantity: u32,
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart lines in insertion order, with counts
pub fn get_cart(cart: &CartState) -> CartSnapshot {
    debug!("get_cart command");
    cart.with_cart(|c| c.snapshot())
}

/// Gets how many of one item are in the cart (0 if none).
///
/// ## User Workflow
/// ```text
/// Classes page renders a lesson card
///      │
///      ▼
/// cart_quantity({ itemId: "lesson-1" }) → { itemId: "lesson-1", quantity: 2 }
///      │
///      ▼
/// Card shows "In cart: 2"
/// ```
pub fn cart_quantity(cart: &CartState, item_id: ItemId) -> QuantityResponse {
    debug!(item_id = %item_id, "cart_quantity command");
    let quantity = cart.with_cart(|c| c.quantity(&item_id));
    QuantityResponse { item_id, quantity }
}

/// Adds one unit of an item to the cart.
///
/// ## Behavior
/// - Item already in cart: quantity increases by 1
/// - Item not in cart: added with quantity 1
/// - Quantity already at `u32::MAX`: nothing changes
/// - Item existence is not checked; the id is opaque here
///
/// ## Returns
/// Updated cart
pub fn add_to_cart(cart: &CartState, item_id: ItemId) -> CartSnapshot {
    debug!(item_id = %item_id, "add_to_cart command");

    cart.with_cart_mut(|c| {
        c.add(&item_id);
        c.snapshot()
    })
}

/// Removes one unit of an item from the cart.
///
/// ## Behavior
/// - Quantity N > 1: becomes N - 1
/// - Quantity 1: the line disappears
/// - Item not in cart: nothing changes (not an error)
///
/// ## Returns
/// Updated cart
pub fn remove_from_cart(cart: &CartState, item_id: ItemId) -> CartSnapshot {
    debug!(item_id = %item_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        if c.remove(&item_id).is_none() {
            debug!(item_id = %item_id, "Item not in cart, nothing removed");
        }
        c.snapshot()
    })
}

/// Clears all items from the cart.
///
/// ## When Used
/// - User empties the cart on the checkout page
/// - After checkout completes (new session)
///
/// ## Returns
/// Empty cart
pub fn clear_cart(cart: &CartState) -> CartSnapshot {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        c.snapshot()
    })
}
