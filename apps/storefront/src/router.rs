//! # Navigator
//!
//! The host's navigation subsystem. It receives the [`RouteTable`] once at
//! startup and turns incoming URLs into routes.
//!
//! ## Matching Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Incoming URL: /shop/checkout/?step=2#summary      (base_path = /shop)  │
//! │                                                                         │
//! │  1. Drop fragment and query ─────► /shop/checkout/                      │
//! │  2. Strip base path ─────────────► /checkout/                           │
//! │  3. Drop one trailing slash ─────► /checkout                            │
//! │  4. Compare with route paths ────► /Checkout  (case-insensitive)        │
//! │                                                                         │
//! │  No match ──► NavigationError::NotFound                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lesson_core::{Route, RouteTable};
use thiserror::Error;
use tracing::debug;

/// Navigation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// No route matches the URL.
    #[error("No route matches {path}")]
    NotFound { path: String },

    /// No route has this name.
    #[error("Unknown route name: {name}")]
    UnknownRouteName { name: String },
}

/// Resolves URLs against a fixed route table and tracks the current route.
#[derive(Debug, Clone)]
pub struct Navigator {
    table: RouteTable,
    base_path: String,
    case_sensitive: bool,
    current: Option<usize>,
}

impl Navigator {
    /// Creates a navigator over `table`.
    ///
    /// `base_path` must already be normalized (leading `/`, no trailing `/`
    /// unless root), as [`ConfigState`](crate::state::ConfigState) provides it.
    pub fn new(table: RouteTable, base_path: impl Into<String>, case_sensitive: bool) -> Self {
        Navigator {
            table,
            base_path: base_path.into(),
            case_sensitive,
            current: None,
        }
    }

    /// The route table this navigator was handed.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Finds the route for `url` without changing the current route.
    pub fn resolve(&self, url: &str) -> Result<&Route, NavigationError> {
        let index = self.position(url)?;
        Ok(&self.table.routes()[index])
    }

    /// Resolves `url` and makes its route the current one.
    ///
    /// On failure the current route is left unchanged.
    pub fn navigate(&mut self, url: &str) -> Result<&Route, NavigationError> {
        let index = self.position(url)?;
        self.current = Some(index);

        let route = &self.table.routes()[index];
        debug!(url = %url, route = route.name(), "Navigated");
        Ok(route)
    }

    /// The route last navigated to, if any.
    pub fn current(&self) -> Option<&Route> {
        self.current.map(|i| &self.table.routes()[i])
    }

    /// Builds the full URL path for a named route, base path included.
    pub fn href(&self, name: &str) -> Result<String, NavigationError> {
        let route = self
            .table
            .by_name(name)
            .ok_or_else(|| NavigationError::UnknownRouteName {
                name: name.to_string(),
            })?;

        if self.base_path == "/" {
            Ok(route.path().to_string())
        } else {
            Ok(format!("{}{}", self.base_path, route.path()))
        }
    }

    fn position(&self, url: &str) -> Result<usize, NavigationError> {
        let not_found = || NavigationError::NotFound {
            path: url.to_string(),
        };

        let path = url.split(['#', '?']).next().unwrap_or_default();
        let path = self.strip_base(path).ok_or_else(not_found)?;
        let path = normalize_path(path);

        self.table
            .iter()
            .position(|route| self.same_path(route.path(), path))
            .ok_or_else(not_found)
    }

    /// Returns the part of `path` below the base path, or `None` if `path`
    /// lies outside it.
    fn strip_base<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.base_path == "/" {
            return Some(path);
        }

        let base_len = self.base_path.len();
        let head = path.get(..base_len)?;
        if !self.same_path(head, &self.base_path) {
            return None;
        }

        let rest = &path[base_len..];
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    fn same_path(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }
}

/// `""` → `/`, and one trailing slash is dropped (`/classes/` → `/classes`).
fn normalize_path(path: &str) -> &str {
    if path.is_empty() {
        return "/";
    }

    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}
