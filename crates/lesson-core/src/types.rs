//! # Domain Types
//!
//! Core value types shared by the cart and the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     ItemId      │   │    CartLine     │   │    CartSnapshot     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  "lesson-1"     │   │  item_id        │   │  session_id         │   │
//! │  │  "42" (== 42)   │   │  quantity ≥ 1   │   │  lines[]            │   │
//! │  └─────────────────┘   └─────────────────┘   │  distinct_items     │   │
//! │                                              │  total_quantity     │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## String or Numeric Keys
//! Lessons may be keyed by slug (`"lesson-1"`) or by a numeric id (`42`).
//! Both are stored as text, so `42` and `"42"` address the same cart line.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::validation::{validate_item_id, ValidationResult};

// =============================================================================
// Item Identifier
// =============================================================================

/// Opaque identifier of a purchasable lesson.
///
/// Construct with [`ItemId::parse`] for untrusted text or `From<u64>` for
/// numeric keys. Every `ItemId` in existence has passed validation, so the
/// cart never has to guard against malformed keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, TS)]
#[ts(export)]
pub struct ItemId(String);

impl ItemId {
    /// Parses an identifier from untrusted text.
    ///
    /// Surrounding whitespace is dropped.
    ///
    /// ## Example
    /// ```rust
    /// use lesson_core::ItemId;
    ///
    /// let id = ItemId::parse(" lesson-1 ").unwrap();
    /// assert_eq!(id.as_str(), "lesson-1");
    /// assert!(ItemId::parse("").is_err());
    /// ```
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        validate_item_id(raw).map(|id| ItemId(id.to_string()))
    }

    /// Returns the identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for ItemId {
    fn from(key: u64) -> Self {
        ItemId(key.to_string())
    }
}

impl From<u32> for ItemId {
    fn from(key: u32) -> Self {
        ItemId::from(u64::from(key))
    }
}

impl FromStr for ItemId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemId::parse(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Accepts a JSON string or a non-negative integer.
///
/// `null`, booleans, negative or fractional numbers, arrays and objects are
/// rejected, as is any string that fails [`validate_item_id`].
impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ItemIdVisitor;

        impl<'de> Visitor<'de> for ItemIdVisitor {
            type Value = ItemId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-empty string or a non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
                ItemId::parse(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
                Ok(ItemId::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
                u64::try_from(v)
                    .map(ItemId::from)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(ItemIdVisitor)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry of the cart: an item and how many of it are held.
///
/// `quantity` is always ≥ 1. A line whose quantity would drop to zero is
/// removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// The item this line holds.
    pub item_id: ItemId,

    /// Quantity held (never zero).
    pub quantity: u32,
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Read-only copy of the cart, for rendering line items.
///
/// ## Serialization
/// ```json
/// {
///   "sessionId": "0b6e…",
///   "createdAt": "2026-10-16T09:00:00Z",
///   "lines": [{ "itemId": "lesson-1", "quantity": 2 }],
///   "distinctItems": 1,
///   "totalQuantity": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Session the cart belongs to.
    #[ts(as = "String")]
    pub session_id: Uuid,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Lines in first-insertion order.
    pub lines: Vec<CartLine>,

    /// Number of distinct items.
    pub distinct_items: usize,

    /// Sum of all quantities.
    #[ts(type = "number")]
    pub total_quantity: u64,
}

// =============================================================================
// Unit Tests
// =============================================================================
