//! Routing collaborator and back-navigation rule.
//!
//! The bar never owns the route: it reads [`Router::current_path`] and asks
//! the router to move with [`Router::navigate`] or [`Router::navigate_back`].
//! [`HistoryRouter`] is the in-plugin implementation, a simple history stack.

use std::cell::RefCell;

/// Path of the home (entry list) screen.
pub const HOME: &str = "/";
/// Path of the settings screen.
pub const SETTINGS: &str = "/settings";
/// Path of the about screen.
pub const ABOUT: &str = "/about";
/// Path of the unlock screen shown after locking the vault.
pub const UNLOCK: &str = "/unlock";

/// Returns `true` if `path` is the home screen.
#[must_use]
pub fn is_home(path: &str) -> bool {
    path == HOME
}

/// Back action availability: present on every screen except home.
#[must_use]
pub fn back_available(path: &str) -> bool {
    !is_home(path)
}

/// Router operations consumed by the bar.
///
/// Methods take `&self` so a single router can be shared between the bar and
/// the keyboard listener; implementations use interior mutability.
pub trait Router {
    /// Returns the current route path.
    fn current_path(&self) -> String;

    /// Navigates to `path`.
    fn navigate(&self, path: &str);

    /// Navigates one step back. The destination is the router's business.
    fn navigate_back(&self);
}

/// History-stack router.
///
/// `navigate` pushes, `navigate_back` pops (never below the first entry).
/// Relative paths are resolved against the root, so `"unlock"` and
/// `"/unlock"` are the same destination.
///
/// ```
/// use vaultbar::navigation::{HistoryRouter, Router, HOME};
///
/// let router = HistoryRouter::new();
/// router.navigate("settings");
/// assert_eq!(router.current_path(), "/settings");
/// router.navigate_back();
/// assert_eq!(router.current_path(), HOME);
/// ```
#[derive(Debug)]
pub struct HistoryRouter {
    stack: RefCell<Vec<String>>,
}

impl HistoryRouter {
    /// Creates a router positioned at the home screen.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(HOME)
    }

    /// Creates a router positioned at `path`.
    #[must_use]
    pub fn starting_at(path: &str) -> Self {
        Self {
            stack: RefCell::new(vec![normalize(path)]),
        }
    }

    /// Number of entries in the history stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }
}

impl Default for HistoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for HistoryRouter {
    fn current_path(&self) -> String {
        self.stack
            .borrow()
            .last()
            .cloned()
            .unwrap_or_else(|| HOME.to_string())
    }

    fn navigate(&self, path: &str) {
        let path = normalize(path);
        tracing::debug!(path = %path, "navigate");
        self.stack.borrow_mut().push(path);
    }

    fn navigate_back(&self) {
        let mut stack = self.stack.borrow_mut();
        if stack.len() > 1 {
            stack.pop();
        }
        tracing::debug!(path = ?stack.last(), "navigate back");
    }
}

fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_is_offered_off_home_only() {
        assert!(!back_available(HOME));
        assert!(back_available(SETTINGS));
        assert!(back_available(UNLOCK));
    }

    #[test]
    fn back_never_empties_history() {
        let router = HistoryRouter::new();
        router.navigate_back();
        router.navigate_back();
        assert_eq!(router.current_path(), HOME);
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn relative_paths_resolve_from_root() {
        let router = HistoryRouter::new();
        router.navigate("unlock");
        assert_eq!(router.current_path(), UNLOCK);
    }
}
