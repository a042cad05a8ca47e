//! # Validation Module
//!
//! Input validation utilities for the Lesson Store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  └── Buttons only ever send ids of rendered lessons                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── JSON type check (string or non-negative integer)                  │
//! │  └── THIS MODULE: format rules                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Type system                                                  │
//! │  └── CartStore only accepts ItemId, so it never sees bad input         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lesson_core::validation::{validate_item_id, validate_route_path};
//!
//! assert_eq!(validate_item_id("  lesson-1 ").unwrap(), "lesson-1");
//! assert!(validate_route_path("/classes").is_ok());
//! ```

use crate::error::ValidationError;
use crate::{MAX_ITEM_ID_LEN, MAX_ROUTE_PATH_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Item Identifiers
// =============================================================================

/// Validates an item identifier and returns its trimmed form.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Must not be empty after trimming
/// - At most [`MAX_ITEM_ID_LEN`] characters
/// - No control characters
///
/// ## Example
/// ```rust
/// use lesson_core::validation::validate_item_id;
///
/// assert!(validate_item_id("lesson-1").is_ok());
/// assert!(validate_item_id("42").is_ok());
/// assert!(validate_item_id("   ").is_err());
/// ```
pub fn validate_item_id(raw: &str) -> ValidationResult<&str> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "itemId".to_string(),
        });
    }

    if id.chars().count() > MAX_ITEM_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "itemId".to_string(),
            max: MAX_ITEM_ID_LEN,
        });
    }

    if id.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "itemId".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(id)
}

// =============================================================================
// Routes
// =============================================================================

/// Validates a route path declared in a route table.
///
/// ## Rules
/// - Must start with `/`
/// - No whitespace, no `?` or `#` (those belong to a URL, not a route)
/// - At most [`MAX_ROUTE_PATH_LEN`] characters
pub fn validate_route_path(path: &str) -> ValidationResult<()> {
    if path.is_empty() {
        return Err(ValidationError::Required {
            field: "path".to_string(),
        });
    }

    if path.len() > MAX_ROUTE_PATH_LEN {
        return Err(ValidationError::TooLong {
            field: "path".to_string(),
            max: MAX_ROUTE_PATH_LEN,
        });
    }

    if !path.starts_with('/') {
        return Err(ValidationError::InvalidFormat {
            field: "path".to_string(),
            reason: "must start with '/'".to_string(),
        });
    }

    if path
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '?' || c == '#')
    {
        return Err(ValidationError::InvalidFormat {
            field: "path".to_string(),
            reason: "must not contain whitespace, '?' or '#'".to_string(),
        });
    }

    Ok(())
}

/// Validates a route name.
///
/// ## Rules
/// - Must not be empty
/// - Only letters, digits, hyphens, and underscores
pub fn validate_route_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
