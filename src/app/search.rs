//! Search mode controller.
//!
//! Owns the bar's [`SearchMode`] and is the only writer of the shared search
//! term. Every operation takes the current route so the home-only rules are
//! enforced here even if an upstream guard was bypassed.

use crate::app::modes::{transition, SearchMode, SearchTrigger};
use crate::context::Observable;
use crate::navigation::is_home;

/// Edit applied to the search field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEdit {
    /// Appends a character.
    Insert(char),
    /// Removes the last character.
    Backspace,
    /// Replaces the whole term.
    Replace(String),
}

/// Decides between title and search field, and keeps the search term tidy.
#[derive(Debug, Clone)]
pub struct SearchModeController {
    mode: SearchMode,
    search_term: Observable<String>,
}

impl SearchModeController {
    /// Creates a controller writing to `search_term`, in the mount state
    /// derived from the term's current value.
    #[must_use]
    pub fn new(search_term: Observable<String>) -> Self {
        let mode = search_term.with(|term| transition(SearchMode::Idle, "", term, SearchTrigger::Mount));
        Self { mode, search_term }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Whether the search field is visible on `route`.
    #[must_use]
    pub fn is_active(&self, route: &str) -> bool {
        self.mode.activation(route)
    }

    /// Re-derives the mode from the search term, as on a fresh mount.
    pub fn remount(&mut self) {
        self.apply("", SearchTrigger::Mount);
    }

    /// Applies the route-change rule.
    ///
    /// Returns `true` if the mode changed.
    pub fn on_route_changed(&mut self, route: &str) -> bool {
        self.apply(route, SearchTrigger::RouteChanged)
    }

    /// Switches to the search field. Ignored off home.
    ///
    /// Returns `true` if the mode changed.
    pub fn start_search(&mut self, route: &str) -> bool {
        if !is_home(route) {
            tracing::debug!(route = %route, "ignoring start search off home");
            return false;
        }
        self.apply(route, SearchTrigger::Start)
    }

    /// Clears the term and returns to the title. Ignored off home.
    ///
    /// Returns `true` if anything changed.
    pub fn cancel_search(&mut self, route: &str) -> bool {
        if !is_home(route) {
            tracing::debug!(route = %route, "ignoring cancel search off home");
            return false;
        }
        let cleared = self.search_term.set(String::new());
        let changed = self.apply(route, SearchTrigger::Cancel);
        cleared || changed
    }

    /// Edits the term while the search field is visible.
    ///
    /// Returns `true` if the term changed.
    pub fn edit(&mut self, route: &str, edit: &SearchEdit) -> bool {
        if !self.is_active(route) {
            tracing::trace!(route = %route, "ignoring search edit while field is hidden");
            return false;
        }

        let changed = self.search_term.update(|term| match edit {
            SearchEdit::Insert(c) => term.push(*c),
            SearchEdit::Backspace => {
                term.pop();
            }
            SearchEdit::Replace(text) => text.clone_into(term),
        });
        self.apply(route, SearchTrigger::Typed);

        if changed {
            tracing::trace!(query = %self.search_term.get(), "search term updated");
        }
        changed
    }

    fn apply(&mut self, route: &str, trigger: SearchTrigger) -> bool {
        let next = self
            .search_term
            .with(|term| transition(self.mode, route, term, trigger));
        if next == self.mode {
            return false;
        }
        tracing::debug!(from = ?self.mode, to = ?next, trigger = ?trigger, "search mode changed");
        self.mode = next;
        true
    }
}
