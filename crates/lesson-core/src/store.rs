//! # Cart Store
//!
//! The single source of truth for cart quantities, plus change notification.
//!
//! ## Why a Store Object?
//! The cart is an explicitly constructed value owned by whoever hosts the
//! session, never a process-wide global. Tests build a fresh store each time
//! and nothing leaks between them.
//!
//! ## Notification Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Notification                              │
//! │                                                                         │
//! │  store.add(&id)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add ──► CartChange::Added { item_id, quantity }                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartEvent { sequence: n + 1, change, at }                              │
//! │       │                                                                 │
//! │       ├──► observer #1.on_cart_change(&event, &cart)                    │
//! │       ├──► observer #2.on_cart_change(&event, &cart)                    │
//! │       └──► ...  (subscription order, synchronously)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add() returns ── every observer has already seen the new state         │
//! │                                                                         │
//! │  remove() on an absent item changes nothing and notifies nobody.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartChange};
use crate::types::{CartSnapshot, ItemId};

// =============================================================================
// Events & Observers
// =============================================================================

/// A notified mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartEvent {
    /// 1 for the first notified mutation, then +1 each time.
    #[ts(type = "number")]
    pub sequence: u64,

    /// What changed.
    pub change: CartChange,

    /// When the change was applied.
    #[ts(as = "String")]
    pub at: DateTime<Utc>,
}

/// Receives every cart mutation.
///
/// Observers run inside the mutating call and see the cart after the change.
/// Any `Fn(&CartEvent, &Cart) + Send + Sync` closure is an observer.
pub trait CartObserver: Send + Sync {
    /// Called once per mutation, after the cart has been updated.
    fn on_cart_change(&self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent, &Cart) + Send + Sync,
{
    fn on_cart_change(&self, event: &CartEvent, cart: &Cart) {
        self(event, cart)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

// =============================================================================
// Cart Store
// =============================================================================

/// Observable owner of the [`Cart`].
///
/// Consumers read through [`CartStore::quantity`] / [`CartStore::cart`] and
/// mutate only through [`add`](CartStore::add), [`remove`](CartStore::remove)
/// and [`clear`](CartStore::clear). None of these can fail.
pub struct CartStore {
    cart: Cart,
    observers: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
    next_subscription: u64,
    sequence: u64,
}

impl CartStore {
    /// Creates a store holding a new empty cart.
    pub fn new() -> Self {
        CartStore::with_cart(Cart::new())
    }

    /// Creates a store around an existing cart.
    pub fn with_cart(cart: Cart) -> Self {
        CartStore {
            cart,
            observers: Vec::new(),
            next_subscription: 1,
            sequence: 0,
        }
    }

    /// Read access to the live cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Returns the quantity held for `item_id`, or 0 if absent.
    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.cart.quantity(item_id)
    }

    /// Copies the cart into a serializable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Adds one unit of `item_id` and notifies observers.
    ///
    /// Returns `None` (and notifies nobody) if the quantity is already at
    /// `u32::MAX`.
    pub fn add(&mut self, item_id: &ItemId) -> Option<CartEvent> {
        let change = self.cart.add(item_id)?;
        Some(self.publish(change))
    }

    /// Removes one unit of `item_id`.
    ///
    /// Returns `None` (and notifies nobody) if the item was not in the cart.
    pub fn remove(&mut self, item_id: &ItemId) -> Option<CartEvent> {
        let change = self.cart.remove(item_id)?;
        Some(self.publish(change))
    }

    /// Empties the cart and notifies observers.
    ///
    /// Notifies even when the cart was already empty: clearing replaces the
    /// whole mapping, and observers re-render from it.
    pub fn clear(&mut self) -> CartEvent {
        let change = self.cart.clear();
        self.publish(change)
    }

    /// Registers an observer. It sees every mutation from now on.
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: CartObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drops an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Sequence number of the last notified mutation (0 before any).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    fn publish(&mut self, change: CartChange) -> CartEvent {
        self.sequence += 1;
        let event = CartEvent {
            sequence: self.sequence,
            change,
            at: Utc::now(),
        };

        for (_, observer) in &self.observers {
            observer.on_cart_change(&event, &self.cart);
        }

        event
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .field("sequence", &self.sequence)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
