//! # Route Table
//!
//! Declarative mapping from URL path to page. This is configuration data:
//! it is built once at startup, handed to the host's navigation subsystem,
//! and never mutated. Matching an incoming URL (and deciding what to do
//! when nothing matches) is the navigator's job, not this module's.
//!
//! ## Storefront Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   path          name         page                                       │
//! │   ───────────   ──────────   ─────────────────────────────              │
//! │   /             home         Home      (landing page)                   │
//! │   /classes      classes      Classes   (lesson listing, add to cart)    │
//! │   /Checkout     checkout     Checkout  (cart review)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_route_name, validate_route_path};

// =============================================================================
// Page
// =============================================================================

/// Opaque reference to a page component rendered by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    /// Landing page.
    Home,
    /// Class (lesson) listing.
    Classes,
    /// Cart review and checkout.
    Checkout,
}

impl Page {
    /// Name of the frontend component that renders this page.
    pub fn component(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Classes => "Classes",
            Page::Checkout => "Checkout",
        }
    }
}

// =============================================================================
// Route
// =============================================================================

/// Immutable binding of a path to a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    path: String,
    name: String,
    page: Page,
}

impl Route {
    /// Creates a route after validating its path and name.
    ///
    /// ## Example
    /// ```rust
    /// use lesson_core::{Page, Route};
    ///
    /// let route = Route::new("/classes", "classes", Page::Classes).unwrap();
    /// assert_eq!(route.path(), "/classes");
    /// assert!(Route::new("classes", "classes", Page::Classes).is_err());
    /// ```
    pub fn new(path: impl Into<String>, name: impl Into<String>, page: Page) -> CoreResult<Self> {
        let path = path.into();
        let name = name.into();
        validate_route_path(&path)?;
        validate_route_name(&name)?;
        Ok(Route { path, name, page })
    }

    /// The URL path, e.g. `/classes`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The route name, e.g. `classes`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The page this route renders.
    pub fn page(&self) -> Page {
        self.page
    }
}

// =============================================================================
// Route Table
// =============================================================================

/// The storefront's routes, in declaration order.
const STOREFRONT_ROUTES: [(&str, &str, Page); 3] = [
    ("/", "home", Page::Home),
    ("/classes", "classes", Page::Classes),
    ("/Checkout", "checkout", Page::Checkout),
];

/// Ordered, immutable list of routes.
///
/// ## Invariants
/// - Paths are unique, compared case-insensitively
/// - Names are unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The storefront's fixed table: `/`, `/classes`, `/Checkout`.
    pub fn storefront() -> Self {
        let routes = STOREFRONT_ROUTES
            .iter()
            .map(|&(path, name, page)| Route {
                path: path.to_string(),
                name: name.to_string(),
                page,
            })
            .collect();
        RouteTable { routes }
    }

    /// Builds a table from custom routes.
    ///
    /// ## Errors
    /// - [`CoreError::DuplicateRoute`] if two paths are equal ignoring case
    /// - [`CoreError::DuplicateRouteName`] if two names are equal
    pub fn new(routes: Vec<Route>) -> CoreResult<Self> {
        for (i, route) in routes.iter().enumerate() {
            for earlier in &routes[..i] {
                if earlier.path.eq_ignore_ascii_case(&route.path) {
                    return Err(CoreError::DuplicateRoute {
                        path: route.path.clone(),
                    });
                }
                if earlier.name == route.name {
                    return Err(CoreError::DuplicateRouteName {
                        name: route.name.clone(),
                    });
                }
            }
        }

        Ok(RouteTable { routes })
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Iterates routes in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Finds a route by name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Finds the first route rendering `page`.
    pub fn by_page(&self, page: Page) -> Option<&Route> {
        self.routes.iter().find(|r| r.page == page)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True if the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::storefront()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_table() {
        let table = RouteTable::storefront();
        let rows: Vec<(&str, &str, Page)> = table
            .iter()
            .map(|r| (r.path(), r.name(), r.page()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("/", "home", Page::Home),
                ("/classes", "classes", Page::Classes),
                ("/Checkout", "checkout", Page::Checkout),
            ]
        );
    }

    #[test]
    fn test_storefront_routes_pass_validation() {
        let rebuilt: Vec<Route> = RouteTable::storefront()
            .iter()
            .map(|r| Route::new(r.path(), r.name(), r.page()).unwrap())
            .collect();
        assert_eq!(RouteTable::new(rebuilt).unwrap(), RouteTable::storefront());
    }

    #[test]
    fn test_lookup_by_name_and_page() {
        let table = RouteTable::storefront();
        assert_eq!(table.by_name("checkout").unwrap().path(), "/Checkout");
        assert_eq!(table.by_page(Page::Classes).unwrap().path(), "/classes");
        assert!(table.by_name("admin").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_duplicate_paths_rejected_ignoring_case() {
        let routes = vec![
            Route::new("/Checkout", "checkout", Page::Checkout).unwrap(),
            Route::new("/checkout", "checkout-2", Page::Checkout).unwrap(),
        ];
        assert!(matches!(
            RouteTable::new(routes),
            Err(CoreError::DuplicateRoute { path }) if path == "/checkout"
        ));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let routes = vec![
            Route::new("/", "home", Page::Home).unwrap(),
            Route::new("/start", "home", Page::Home).unwrap(),
        ];
        assert!(matches!(
            RouteTable::new(routes),
            Err(CoreError::DuplicateRouteName { name }) if name == "home"
        ));
    }

    #[test]
    fn test_route_serializes_with_page() {
        let table = RouteTable::storefront();
        let json = serde_json::to_value(table.by_name("classes").unwrap()).unwrap();
        assert_eq!(json["path"], "/classes");
        assert_eq!(json["name"], "classes");
        assert_eq!(json["page"], "classes");
    }

    #[test]
    fn test_page_components() {
        assert_eq!(Page::Home.component(), "Home");
        assert_eq!(Page::Classes.component(), "Classes");
        assert_eq!(Page::Checkout.component(), "Checkout");
    }
}
