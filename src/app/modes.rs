//! Search mode state machine.
//!
//! The bar shows either a title or a search field. Which one is decided by a
//! pure function of the current mode, the route, the search term and the
//! trigger that just fired, so the machine can be tested without any runtime.
//!
//! # State Machine
//!
//! ```text
//!            Start (home)                Cancel (home): term := ""
//!   Idle ─────────────────────▶ Searching ─────────────────────────▶ Idle
//!    ▲                              │
//!    └──── RouteChanged(≠ home) ────┘  only when the term is empty
//! ```
//!
//! A search field is visible only when the mode is `Searching` *and* the route
//! is home; leaving home with a non-empty term keeps the mode so the search
//! resumes on return.

use crate::navigation::is_home;

/// Internal search mode of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Showing the title (or non-home content).
    #[default]
    Idle,
    /// Showing the search field.
    Searching,
}

/// Inputs that may move the search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTrigger {
    /// The bar was (re)mounted; the mode is derived from the search term.
    Mount,
    /// The route changed to the one passed alongside.
    RouteChanged,
    /// Search icon or a printable key.
    Start,
    /// Close icon or the cancel key. The caller clears the term.
    Cancel,
    /// The search term was edited.
    Typed,
}

impl SearchMode {
    /// Whether the search field is visible on `route`.
    ///
    /// Always `false` off the home screen.
    #[must_use]
    pub fn activation(self, route: &str) -> bool {
        self == Self::Searching && is_home(route)
    }
}

/// Computes the next mode.
///
/// Triggers that only make sense on the home screen (`Start`, `Cancel`,
/// `Typed`) leave the mode untouched elsewhere.
///
/// ```
/// use vaultbar::app::modes::{transition, SearchMode, SearchTrigger};
///
/// let mode = transition(SearchMode::Idle, "/", "", SearchTrigger::Start);
/// assert_eq!(mode, SearchMode::Searching);
///
/// // Off home the trigger is ignored.
/// let mode = transition(SearchMode::Idle, "/settings", "", SearchTrigger::Start);
/// assert_eq!(mode, SearchMode::Idle);
/// ```
#[must_use]
pub fn transition(
    current: SearchMode,
    route: &str,
    search_term: &str,
    trigger: SearchTrigger,
) -> SearchMode {
    match trigger {
        SearchTrigger::Mount => {
            if search_term.is_empty() {
                SearchMode::Idle
            } else {
                SearchMode::Searching
            }
        }
        SearchTrigger::RouteChanged => {
            if !is_home(route) && search_term.is_empty() {
                SearchMode::Idle
            } else {
                current
            }
        }
        SearchTrigger::Start if is_home(route) => SearchMode::Searching,
        SearchTrigger::Cancel if is_home(route) => SearchMode::Idle,
        SearchTrigger::Start | SearchTrigger::Cancel | SearchTrigger::Typed => current,
    }
}
