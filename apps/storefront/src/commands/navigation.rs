//! # Navigation Commands
//!
//! Commands that expose the route table and move between pages.

use lesson_core::{Page, Route};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::router::Navigator;
use crate::state::NavigationState;

/// A route as the frontend sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub path: String,
    pub name: String,
    pub page: Page,
    /// Frontend component that renders the page.
    pub component: String,
    /// Full link, base path included.
    pub href: String,
}

impl RouteResponse {
    fn new(route: &Route, navigator: &Navigator) -> Self {
        // Every route in the table has a name the navigator knows.
        let href = navigator
            .href(route.name())
            .unwrap_or_else(|_| route.path().to_string());

        RouteResponse {
            path: route.path().to_string(),
            name: route.name().to_string(),
            page: route.page(),
            component: route.page().component().to_string(),
            href,
        }
    }
}

/// Lists every route in declaration order.
pub fn list_routes(nav: &NavigationState) -> Vec<RouteResponse> {
    debug!("list_routes command");
    nav.with_navigator(|n| {
        n.routes()
            .iter()
            .map(|route| RouteResponse::new(route, n))
            .collect()
    })
}

/// Navigates to a URL path.
///
/// ## Returns
/// - The matched route, which becomes the current one
/// - `NOT_FOUND` if no route matches (current route unchanged)
pub fn navigate(nav: &NavigationState, path: String) -> Result<RouteResponse, ApiError> {
    debug!(path = %path, "navigate command");
    nav.with_navigator_mut(|n| {
        let route = n.navigate(&path)?.clone();
        Ok(RouteResponse::new(&route, n))
    })
}

/// Returns the current route, or `None` before the first navigation.
pub fn current_route(nav: &NavigationState) -> Option<RouteResponse> {
    debug!("current_route command");
    nav.with_navigator(|n| n.current().map(|route| RouteResponse::new(route, n)))
}
