//! # Cart
//!
//! The quantity ledger: item id → quantity, with no observers attached.
//! [`CartStore`](crate::CartStore) wraps it to notify subscribers.
//!
//! ## Per-Item States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Line Lifecycle                                  │
//! │                                                                         │
//! │              add                    add                                 │
//! │   ┌────────┐ ───► ┌──────────────┐ ───► ┌──────────────────┐           │
//! │   │ absent │      │ present (1)  │      │ present (N > 1)  │           │
//! │   └────────┘ ◄─── └──────────────┘ ◄─── └──────────────────┘           │
//! │       ▲     remove                 remove                               │
//! │       │                                                                 │
//! │       └──────────── clear (every line, any state) ──────────           │
//! │                                                                         │
//! │   remove on absent: no-op          quantity 0 is never stored          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::types::{CartLine, CartSnapshot, ItemId};

// =============================================================================
// Cart Change
// =============================================================================

/// What a mutation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CartChange {
    /// One unit added; `quantity` is the new quantity.
    #[serde(rename_all = "camelCase")]
    Added { item_id: ItemId, quantity: u32 },

    /// One unit removed; `quantity` is what remains (0 = line deleted).
    #[serde(rename_all = "camelCase")]
    Removed { item_id: ItemId, quantity: u32 },

    /// Every line dropped.
    #[serde(rename_all = "camelCase")]
    Cleared { removed_lines: usize },
}

impl CartChange {
    /// The item touched by this change, if it concerns a single item.
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            CartChange::Added { item_id, .. } | CartChange::Removed { item_id, .. } => {
                Some(item_id)
            }
            CartChange::Cleared { .. } => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adding the same item bumps its quantity)
/// - Every stored quantity is ≥ 1
/// - Lines keep first-insertion order
#[derive(Debug, Clone)]
pub struct Cart {
    session_id: Uuid,
    created_at: DateTime<Utc>,
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart for a fresh session.
    pub fn new() -> Self {
        Cart::with_session(Uuid::new_v4())
    }

    /// Creates a new empty cart for the given session.
    pub fn with_session(session_id: Uuid) -> Self {
        Cart {
            session_id,
            created_at: Utc::now(),
            lines: Vec::new(),
        }
    }

    /// Returns the quantity held for `item_id`, or 0 if absent.
    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.item_id == item_id)
            .map_or(0, |l| l.quantity)
    }

    /// Adds one unit of `item_id`.
    ///
    /// ## Behavior
    /// - Item not in cart: new line with quantity 1
    /// - Item already in cart: quantity + 1
    /// - Quantity already at `u32::MAX`: no-op, returns `None`
    pub fn add(&mut self, item_id: &ItemId) -> Option<CartChange> {
        let quantity = match self.lines.iter_mut().find(|l| &l.item_id == item_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(1)?;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    item_id: item_id.clone(),
                    quantity: 1,
                });
                1
            }
        };

        Some(CartChange::Added {
            item_id: item_id.clone(),
            quantity,
        })
    }

    /// Removes one unit of `item_id`.
    ///
    /// ## Behavior
    /// - Item not in cart: no-op, returns `None`
    /// - Quantity N > 1: becomes N - 1
    /// - Quantity 1: the line is deleted
    pub fn remove(&mut self, item_id: &ItemId) -> Option<CartChange> {
        let index = self.lines.iter().position(|l| &l.item_id == item_id)?;

        let line = &mut self.lines[index];
        line.quantity -= 1;
        let remaining = line.quantity;

        if remaining == 0 {
            self.lines.remove(index);
        }

        Some(CartChange::Removed {
            item_id: item_id.clone(),
            quantity: remaining,
        })
    }

    /// Drops every line and restarts the creation timestamp.
    pub fn clear(&mut self) -> CartChange {
        let removed_lines = self.lines.len();
        self.lines = Vec::new();
        self.created_at = Utc::now();
        CartChange::Cleared { removed_lines }
    }

    /// Returns true if the item has a line in the cart.
    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.lines.iter().any(|l| &l.item_id == item_id)
    }

    /// Lines in first-insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct items in the cart.
    pub fn distinct_items(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Session this cart belongs to.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copies the cart into a serializable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            session_id: self.session_id,
            created_at: self.created_at,
            lines: self.lines.clone(),
            distinct_items: self.distinct_items(),
            total_quantity: self.total_quantity(),
        }
    }
}

#[cfg(test)]
impl Cart {
    /// Seeds a line with an arbitrary quantity.
    pub(crate) fn with_line(item_id: ItemId, quantity: u32) -> Self {
        let mut cart = Cart::new();
        cart.lines.push(CartLine { item_id, quantity });
        cart
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ItemId {
        ItemId::parse(s).unwrap()
    }

    #[test]
    fn test_unknown_item_has_zero_quantity() {
        let cart = Cart::new();
        assert_eq!(cart.quantity(&id("lesson-1")), 0);
        assert!(!cart.contains(&id("lesson-1")));
    }

    #[test]
    fn test_add_n_times_yields_n() {
        let mut cart = Cart::new();
        let lesson = id("lesson-1");

        for n in 1..=5 {
            let change = cart.add(&lesson);
            assert_eq!(
                change,
                Some(CartChange::Added {
                    item_id: lesson.clone(),
                    quantity: n
                })
            );
        }

        assert_eq!(cart.quantity(&lesson), 5);
        assert_eq!(cart.distinct_items(), 1);
    }

    #[test]
    fn test_remove_decrements_then_deletes_line() {
        let mut cart = Cart::new();
        let lesson = id("lesson-1");
        cart.add(&lesson);
        cart.add(&lesson);

        assert_eq!(
            cart.remove(&lesson),
            Some(CartChange::Removed {
                item_id: lesson.clone(),
                quantity: 1
            })
        );
        assert_eq!(cart.quantity(&lesson), 1);

        assert_eq!(
            cart.remove(&lesson),
            Some(CartChange::Removed {
                item_id: lesson.clone(),
                quantity: 0
            })
        );
        assert_eq!(cart.quantity(&lesson), 0);
        assert!(!cart.contains(&lesson));
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add(&id("lesson-2"));
        let before = cart.lines().to_vec();

        assert_eq!(cart.remove(&id("lesson-1")), None);
        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        let session = cart.session_id();
        cart.add(&id("lesson-1"));
        cart.add(&id("lesson-2"));
        cart.add(&id("lesson-2"));

        assert_eq!(cart.clear(), CartChange::Cleared { removed_lines: 2 });
        assert_eq!(cart.quantity(&id("lesson-1")), 0);
        assert_eq!(cart.quantity(&id("lesson-2")), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.session_id(), session);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&id("b"));
        cart.add(&id("a"));
        cart.add(&id("b"));
        cart.add(&ItemId::from(10u64));

        let order: Vec<&str> = cart.lines().iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "10"]);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn test_numeric_and_text_ids_share_a_line() {
        let mut cart = Cart::new();
        cart.add(&ItemId::from(7u64));
        cart.add(&id("7"));

        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.quantity(&ItemId::from(7u64)), 2);
    }

    #[test]
    fn test_lesson_scenario() {
        let mut cart = Cart::new();
        let lesson = id("lesson-1");

        cart.add(&lesson);
        assert_eq!(cart.quantity(&lesson), 1);
        cart.add(&lesson);
        assert_eq!(cart.quantity(&lesson), 2);
        cart.remove(&lesson);
        assert_eq!(cart.quantity(&lesson), 1);
        cart.remove(&lesson);
        assert_eq!(cart.quantity(&lesson), 0);
        assert!(!cart.contains(&lesson));
        cart.clear();
        assert_eq!(cart.quantity(&lesson), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_matches_cart() {
        let mut cart = Cart::new();
        cart.add(&id("lesson-1"));
        cart.add(&id("lesson-1"));
        cart.add(&id("lesson-3"));

        let snap = cart.snapshot();
        assert_eq!(snap.session_id, cart.session_id());
        assert_eq!(snap.lines, cart.lines());
        assert_eq!(snap.distinct_items, 2);
        assert_eq!(snap.total_quantity, 3);
    }

    #[test]
    fn test_change_serializes_with_kind_tag() {
        let change = CartChange::Added {
            item_id: id("lesson-1"),
            quantity: 3,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["itemId"], "lesson-1");
        assert_eq!(json["quantity"], 3);

        let json = serde_json::to_value(CartChange::Cleared { removed_lines: 2 }).unwrap();
        assert_eq!(json["kind"], "cleared");
        assert_eq!(json["removedLines"], 2);
    }

    #[test]
    fn test_add_at_max_quantity_is_noop() {
        let lesson = id("lesson-1");
        let mut cart = Cart::with_line(lesson.clone(), u32::MAX - 1);

        assert_eq!(
            cart.add(&lesson),
            Some(CartChange::Added {
                item_id: lesson.clone(),
                quantity: u32::MAX
            })
        );
        assert_eq!(cart.add(&lesson), None);
        assert_eq!(cart.quantity(&lesson), u32::MAX);
        assert_eq!(cart.total_quantity(), u64::from(u32::MAX));
    }
}
