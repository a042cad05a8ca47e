//! # Cart State
//!
//! Host-managed wrapper around the session's [`CartStore`].
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because managed state must be
//! `Send + Sync`. Commands run one at a time, so the lock is never contended
//! in practice.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Frontend Action          Command                 Cart Store Change     │
//! │  ───────────────          ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click "Add" ────────────► add_to_cart() ───────► store.add(id)        │
//! │                                                                         │
//! │  Click "−" ──────────────► remove_from_cart() ──► store.remove(id)     │
//! │                                                                         │
//! │  Click Clear ────────────► clear_cart() ────────► store.clear()        │
//! │                                                                         │
//! │  Render badge ───────────► cart_quantity() ─────► (read only)          │
//! │                                                                         │
//! │  Every change ──► observer ──► broadcast ──► "cart-changed" event      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use lesson_core::{Cart, CartEvent, CartSnapshot, CartStore};
use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered cart notifications per receiver before it starts lagging.
const EVENT_CAPACITY: usize = 64;

/// A cart change plus the cart as it looked right after it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartNotification {
    pub event: CartEvent,
    pub cart: CartSnapshot,
}

/// Managed cart state.
///
/// Every mutation of the inner store is mirrored onto a broadcast channel,
/// so async consumers (the IPC writer, tests) can follow the cart without
/// holding the lock.
#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
    events: broadcast::Sender<CartNotification>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::with_store(CartStore::new())
    }

    /// Wraps an existing store and hooks it up to the event channel.
    pub fn with_store(mut store: CartStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let tx = events.clone();
        store.subscribe(move |event: &CartEvent, cart: &Cart| {
            // No receivers is fine: nobody is listening right now.
            let _ = tx.send(CartNotification {
                event: event.clone(),
                cart: cart.snapshot(),
            });
        });

        CartState {
            store: Arc::new(Mutex::new(store)),
            events,
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let qty = cart_state.with_cart(|store| store.quantity(&id));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|store| store.add(&id));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Subscribes to cart notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CartNotification> {
        self.events.subscribe()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
