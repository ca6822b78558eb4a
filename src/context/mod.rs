//! Shared UI state visible to every screen.
//!
//! [`UiContext`] bundles the three values other screens observe: the page
//! title, the current search term, and the sort option. It is built once per
//! session and threaded explicitly to its consumers; clones share the same
//! cells. Each field has a single owner that writes it:
//!
//! - `title`: whichever screen is active
//! - `search_term`: the search mode controller
//! - `sort_option`: the menu coordinator

mod observable;

pub use observable::{Observable, Subscription};

use crate::domain::SortOption;

/// Session-scoped shared UI state.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Title shown by the bar on non-home screens.
    pub title: Observable<String>,
    /// Current search term, consumed by the home entry list.
    pub search_term: Observable<String>,
    /// Current sort option, consumed by the home entry list.
    pub sort_option: Observable<SortOption>,
}

impl UiContext {
    /// Creates a context with an empty title and search term and the default
    /// sort option.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: Observable::new(String::new()),
            search_term: Observable::new(String::new()),
            sort_option: Observable::new(SortOption::default()),
        }
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}
