//! # Navigation State
//!
//! Host-managed wrapper around the [`Navigator`]. The route table inside is
//! fixed; only the current route changes.

use std::sync::{Mutex, PoisonError};

use crate::router::Navigator;

/// Managed navigation state.
#[derive(Debug)]
pub struct NavigationState {
    navigator: Mutex<Navigator>,
}

impl NavigationState {
    /// Takes ownership of a configured navigator.
    pub fn new(navigator: Navigator) -> Self {
        NavigationState {
            navigator: Mutex::new(navigator),
        }
    }

    /// Executes a function with read access to the navigator.
    pub fn with_navigator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Navigator) -> R,
    {
        let navigator = self.navigator.lock().unwrap_or_else(PoisonError::into_inner);
        f(&navigator)
    }

    /// Executes a function with write access to the navigator.
    pub fn with_navigator_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Navigator) -> R,
    {
        let mut navigator = self.navigator.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lesson_core::{Page, RouteTable};

    #[test]
    fn test_current_route_persists_between_calls() {
        let state = NavigationState::new(Navigator::new(RouteTable::storefront(), "/", false));

        state.with_navigator_mut(|n| n.navigate("/classes").map(|r| r.page())).unwrap();

        let current = state.with_navigator(|n| n.current().map(|r| r.page()));
        assert_eq!(current, Some(Page::Classes));
    }
}
