//! Event handling and state transition logic.
//!
//! Every input to the bar, whether a key, a click, a route change or a worker
//! response, arrives as an [`Event`]. [`handle_event`] applies the event to
//! [`AppBar`] and returns the side effects as [`Action`]s.
//!
//! # Ordering
//!
//! State mutations happen inside the handler; actions run afterwards. This is
//! what makes "commit sort then close" and "close overflow then navigate"
//! hold for every user action: by the time a navigation runs, the menu that
//! triggered it is already closed.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vaultbar::app::{handle_event, AppBar, Event, KeyChannel};
//! use vaultbar::context::UiContext;
//! use vaultbar::navigation::HistoryRouter;
//!
//! let mut bar = AppBar::new(UiContext::new(), Rc::new(HistoryRouter::new()), "Tauthy");
//! bar.mount(&KeyChannel::new());
//! let (changed, actions) = handle_event(&mut bar, &Event::StartSearch)?;
//! assert!(changed && actions.is_empty());
//! # Ok::<(), vaultbar::VaultBarError>(())
//! ```

use super::lock::LockOutcome;
use super::lock::LockResolution;
use super::menu::{Anchor, MenuKind, OverflowItem};
use super::search::SearchEdit;
use super::{Action, AppBar};
use crate::domain::{Result, SortOption};
use crate::navigation::{is_home, ABOUT, SETTINGS, UNLOCK};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, routing, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The router moved to `path`.
    RouteChanged {
        /// New route.
        path: String,
    },

    /// Show the search field (search icon, or a printable key on home).
    StartSearch,
    /// Clear the term and show the title (close icon, or Esc on home).
    CancelSearch,
    /// Edit the search term.
    SearchEdit(SearchEdit),

    /// Open the sort menu under `Anchor`.
    OpenSortMenu(Anchor),
    /// Open the overflow menu under `Anchor`.
    OpenOverflowMenu(Anchor),
    /// Close the sort menu.
    CloseSortMenu,
    /// Close the overflow menu.
    CloseOverflowMenu,
    /// Close whichever menus are open (outside click).
    DismissMenus,

    /// Move the highlight of the focused menu.
    MenuCursor {
        /// `true` moves down, `false` up.
        down: bool,
    },
    /// Select the highlighted item of the focused menu.
    MenuActivate,

    /// Pick a sort option from the sort menu.
    SelectSort(SortOption),
    /// Pick an item from the overflow menu.
    SelectOverflow(OverflowItem),

    /// Back action.
    Back,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    const fn is_user_input(&self) -> bool {
        !matches!(self, Self::RouteChanged { .. } | Self::WorkerResponse(_))
    }
}

/// Processes an event, mutates the bar, and returns actions to execute.
///
/// The returned flag is `true` when the bar needs a re-render. User input
/// arriving while the bar is unmounted is dropped; worker responses are
/// always processed so lock outcomes can settle.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps worker and storage failures on
/// the same path as in the rest of the crate.
pub fn handle_event(bar: &mut AppBar, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if event.is_user_input() && !bar.is_mounted() {
        tracing::debug!("bar not mounted, dropping input");
        return Ok((false, vec![]));
    }

    let result = dispatch(bar, event);
    bar.check_invariants();
    result
}

#[allow(clippy::too_many_lines)]
fn dispatch(bar: &mut AppBar, event: &Event) -> Result<(bool, Vec<Action>)> {
    let route = bar.route();

    match event {
        Event::RouteChanged { path } => {
            let mode_changed = bar.search_mut().on_route_changed(path);
            let menus_closed = bar.menus_mut().close_all();
            tracing::debug!(route = %path, mode_changed, menus_closed, "route changed");
            Ok((true, vec![]))
        }

        Event::StartSearch => Ok((bar.search_mut().start_search(&route), vec![])),
        Event::CancelSearch => Ok((bar.search_mut().cancel_search(&route), vec![])),
        Event::SearchEdit(edit) => Ok((bar.search_mut().edit(&route, edit), vec![])),

        Event::OpenSortMenu(anchor) => {
            if !is_home(&route) {
                tracing::debug!(route = %route, "sort menu only exists on home");
                return Ok((false, vec![]));
            }
            bar.menus_mut().open_sort(*anchor);
            Ok((true, vec![]))
        }
        Event::OpenOverflowMenu(anchor) => {
            if !is_home(&route) {
                tracing::debug!(route = %route, "overflow menu only exists on home");
                return Ok((false, vec![]));
            }
            bar.menus_mut().open_overflow(*anchor);
            Ok((true, vec![]))
        }
        Event::CloseSortMenu => Ok((bar.menus_mut().close_sort(), vec![])),
        Event::CloseOverflowMenu => Ok((bar.menus_mut().close_overflow(), vec![])),
        Event::DismissMenus => Ok((bar.menus_mut().close_all(), vec![])),

        Event::MenuCursor { down } => {
            let Some(kind) = bar.menus().focused() else {
                return Ok((false, vec![]));
            };
            let len = match kind {
                MenuKind::Sort => SortOption::ALL.len(),
                MenuKind::Overflow => bar.overflow_items().len(),
            };
            bar.menus_mut().move_cursor(kind, len, *down);
            Ok((true, vec![]))
        }
        Event::MenuActivate => {
            let Some(kind) = bar.menus().focused() else {
                return Ok((false, vec![]));
            };
            let cursor = bar.menus().cursor(kind);
            let selection = match kind {
                MenuKind::Sort => SortOption::ALL.get(cursor).copied().map(Event::SelectSort),
                MenuKind::Overflow => bar.overflow_items().get(cursor).copied().map(Event::SelectOverflow),
            };
            match selection {
                Some(event) => dispatch(bar, &event),
                None => Ok((false, vec![])),
            }
        }

        Event::SelectSort(option) => {
            if !bar.menus().is_open(MenuKind::Sort) {
                tracing::debug!(?option, "sort menu already closed, ignoring selection");
                return Ok((false, vec![]));
            }
            bar.menus_mut().select_sort(*option);
            Ok((true, vec![]))
        }
        Event::SelectOverflow(item) => {
            if !bar.menus().is_open(MenuKind::Overflow) {
                tracing::debug!(?item, "overflow menu already closed, ignoring selection");
                return Ok((false, vec![]));
            }
            bar.menus_mut().close_overflow();
            Ok((true, overflow_actions(bar, *item)))
        }

        Event::Back => {
            if !bar.back_available() {
                return Ok((false, vec![]));
            }
            tracing::debug!(from = %route, "navigating back");
            Ok((false, vec![Action::NavigateBack]))
        }

        Event::WorkerResponse(response) => Ok(handle_worker_response(bar, response)),
    }
}

fn overflow_actions(bar: &mut AppBar, item: OverflowItem) -> Vec<Action> {
    match item {
        OverflowItem::Settings => vec![Action::Navigate(SETTINGS.to_string())],
        OverflowItem::About => vec![Action::Navigate(ABOUT.to_string())],
        OverflowItem::Lock => {
            let password_set = bar.password_set();
            let generation = bar.generation();
            bar.lock_mut()
                .invoke(password_set, generation)
                .map(|ticket| vec![Action::PostToWorker(WorkerMessage::lock_vault(ticket))])
                .unwrap_or_default()
        }
    }
}

fn handle_worker_response(bar: &mut AppBar, response: &WorkerResponse) -> (bool, Vec<Action>) {
    match response {
        WorkerResponse::PreferencesLoaded { password_set } => {
            bar.set_password_set(*password_set);
            (true, vec![])
        }
        WorkerResponse::EntriesLoaded { entries } => {
            bar.set_entries(entries.clone());
            (true, vec![])
        }
        WorkerResponse::VaultLocked { ticket } => {
            let live = bar.live_generation();
            match bar.lock_mut().settle(*ticket, LockOutcome::Locked, live) {
                LockResolution::NavigateToUnlock => {
                    bar.clear_diagnostic();
                    (true, vec![Action::Navigate(UNLOCK.to_string())])
                }
                _ => (false, vec![]),
            }
        }
        WorkerResponse::LockFailed { ticket, message } => {
            let live = bar.live_generation();
            match bar.lock_mut().settle(*ticket, LockOutcome::Failed(message.clone()), live) {
                LockResolution::ReportFailure(message) => {
                    bar.set_diagnostic(format!("Failed to lock vault: {message}"));
                    (true, vec![])
                }
                _ => (false, vec![]),
            }
        }
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "worker error");
            bar.set_diagnostic(message.clone());
            (true, vec![])
        }
    }
}
