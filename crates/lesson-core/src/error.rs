//! # Error Types
//!
//! Domain-specific error types for lesson-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lesson-core errors (this file)                                        │
//! │  ├── CoreError        - Route table construction failures              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  ├── NavigationError  - Unmatched paths                                │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves never fail. Errors only come from turning
//! untrusted input into typed values (an [`ItemId`](crate::ItemId), a
//! [`Route`](crate::Route)).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two routes in one table share a path.
    ///
    /// ## When This Occurs
    /// - A custom table lists `/classes` twice
    /// - Paths differ only by case (`/Checkout` vs `/checkout`), which a
    ///   case-insensitive navigator could not tell apart
    #[error("Duplicate route path: {path}")]
    DuplicateRoute { path: String },

    /// Two routes in one table share a name.
    #[error("Duplicate route name: {name}")]
    DuplicateRouteName { name: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input from the frontend doesn't meet requirements.
/// Used for early validation before any cart or routing logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., control characters, wrong JSON type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
