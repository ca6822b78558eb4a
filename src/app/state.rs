//! Navigation bar state and view model computation.
//!
//! [`AppBar`] composes the bar's components around one [`UiContext`] and one
//! router. It is mutated only by [`handle_event`](crate::app::handle_event)
//! and by the mount lifecycle; view models are computed on demand.
//!
//! # Mount lifecycle
//!
//! A bar is created unmounted. [`AppBar::mount`] attaches the key listener,
//! re-derives the search mode from the shared term (so a search survives a
//! remount) and starts a new mount generation. [`AppBar::unmount`] detaches
//! the listener and closes both menus. Lock outcomes issued by an earlier
//! generation are ignored.

use std::fmt;
use std::rc::Rc;

use super::entries::visible_entries;
use super::keyboard::{KeyChannel, KeyboardIntercept};
use super::lock::VaultLockInvoker;
use super::menu::{overflow_items, MenuCoordinator, MenuKind, OverflowItem};
use super::search::SearchModeController;
use super::Event;
use crate::context::UiContext;
use crate::domain::{Entry, SortLabel, SortOption};
use crate::i18n::Translate;
use crate::navigation::{back_available, is_home, Router};
use crate::ui::viewmodel::{
    BarViewModel, DisplayItem, Heading, HomeActions, MenuChoice, MenuItemView, MenuView,
};

/// The navigation bar.
pub struct AppBar {
    ctx: UiContext,
    router: Rc<dyn Router>,
    search: SearchModeController,
    menus: MenuCoordinator,
    keyboard: KeyboardIntercept,
    lock: VaultLockInvoker,

    /// Mirror of the persisted `isPasswordSet` flag.
    password_set: bool,
    mounted: bool,
    generation: u64,

    /// Operator-visible status line, set when an operation fails.
    diagnostic: Option<String>,
    entries: Vec<Entry>,
    home_title: String,
}

impl AppBar {
    /// Creates an unmounted bar over `ctx` and `router`.
    ///
    /// `home_title` is shown on the home screen; other screens show the
    /// shared title.
    pub fn new(ctx: UiContext, router: Rc<dyn Router>, home_title: impl Into<String>) -> Self {
        let search = SearchModeController::new(ctx.search_term.clone());
        let menus = MenuCoordinator::new(ctx.sort_option.clone());
        Self {
            ctx,
            router,
            search,
            menus,
            keyboard: KeyboardIntercept::new(),
            lock: VaultLockInvoker::new(),
            password_set: false,
            mounted: false,
            generation: 0,
            diagnostic: None,
            entries: Vec::new(),
            home_title: home_title.into(),
        }
    }

    /// Mounts the bar, attaching its key listener to `keys`.
    ///
    /// Returns `false` if already mounted; a second mount registers nothing.
    pub fn mount(&mut self, keys: &KeyChannel<Event>) -> bool {
        if self.mounted {
            tracing::debug!(generation = self.generation, "bar already mounted");
            return false;
        }
        self.generation += 1;
        self.mounted = true;
        self.search.remount();
        self.keyboard.attach(keys, Rc::clone(&self.router));
        tracing::info!(generation = self.generation, mode = ?self.search.mode(), "bar mounted");
        true
    }

    /// Unmounts the bar, detaching its key listener and closing both menus.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.keyboard.detach();
        self.menus.close_all();
        self.mounted = false;
        tracing::info!(generation = self.generation, in_flight_locks = self.lock.in_flight(), "bar unmounted");
    }

    /// Whether the bar is mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Generation of the live mount, `None` while unmounted.
    #[must_use]
    pub const fn live_generation(&self) -> Option<u64> {
        if self.mounted {
            Some(self.generation)
        } else {
            None
        }
    }

    /// Generation of the most recent mount.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Current route as reported by the router.
    #[must_use]
    pub fn route(&self) -> String {
        self.router.current_path()
    }

    /// Whether the search field is shown.
    #[must_use]
    pub fn search_active(&self) -> bool {
        self.search.is_active(&self.route())
    }

    /// Whether the back action is shown.
    #[must_use]
    pub fn back_available(&self) -> bool {
        back_available(&self.route())
    }

    /// Shared UI state.
    #[must_use]
    pub const fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// Search mode controller.
    #[must_use]
    pub const fn search(&self) -> &SearchModeController {
        &self.search
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchModeController {
        &mut self.search
    }

    /// Menu coordinator.
    #[must_use]
    pub const fn menus(&self) -> &MenuCoordinator {
        &self.menus
    }

    pub(crate) fn menus_mut(&mut self) -> &mut MenuCoordinator {
        &mut self.menus
    }

    /// Lock invoker.
    #[must_use]
    pub const fn lock(&self) -> &VaultLockInvoker {
        &self.lock
    }

    pub(crate) fn lock_mut(&mut self) -> &mut VaultLockInvoker {
        &mut self.lock
    }

    /// Whether the key listener is attached.
    #[must_use]
    pub const fn keyboard_attached(&self) -> bool {
        self.keyboard.is_attached()
    }

    /// Mirror of the persisted password flag.
    #[must_use]
    pub const fn password_set(&self) -> bool {
        self.password_set
    }

    pub(crate) fn set_password_set(&mut self, password_set: bool) {
        if self.password_set != password_set {
            tracing::debug!(password_set, "password flag changed");
        }
        self.password_set = password_set;
    }

    /// Items currently offered by the overflow menu.
    #[must_use]
    pub fn overflow_items(&self) -> Vec<OverflowItem> {
        overflow_items(self.password_set)
    }

    /// Current status line, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    pub(crate) fn set_diagnostic(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(diagnostic = %message, "status line updated");
        self.diagnostic = Some(message);
    }

    pub(crate) fn clear_diagnostic(&mut self) -> bool {
        self.diagnostic.take().is_some()
    }

    /// All loaded entries, in stored order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn set_entries(&mut self, entries: Vec<Entry>) {
        tracing::debug!(count = entries.len(), "entries replaced");
        self.entries = entries;
    }

    /// Logs if the bar shows a search field off the home screen.
    ///
    /// Called after every handled event. The controller makes this state
    /// unreachable; the check keeps it that way.
    pub(crate) fn check_invariants(&self) {
        let route = self.route();
        if !is_home(&route) && self.search.is_active(&route) {
            tracing::error!(route = %route, "search field active off home");
            debug_assert!(false, "search field active off home");
        }
    }

    /// Computes the view model for a `cols`-wide pane.
    ///
    /// Menus and the entry list exist only on the home screen. The heading is
    /// the search field while searching, otherwise the home title or the
    /// shared title.
    #[must_use]
    pub fn compute_viewmodel(&self, labels: &dyn Translate, cols: usize) -> BarViewModel {
        let route = self.route();
        let home = is_home(&route);
        let searching = self.search.is_active(&route);

        let heading = if searching {
            Heading::SearchField {
                query: self.ctx.search_term.get(),
                placeholder: labels.translate("appBar.search"),
            }
        } else if home {
            Heading::Title(self.home_title.clone())
        } else {
            Heading::Title(self.ctx.title.get())
        };

        let sort_menu = self.menus.anchor(MenuKind::Sort).map(|anchor| {
            let active = self.ctx.sort_option.get();
            MenuView {
                anchor,
                cursor: self.menus.cursor(MenuKind::Sort),
                items: SortOption::ALL
                    .iter()
                    .map(|&option| MenuItemView {
                        label: match option.label() {
                            SortLabel::Translated(key) => labels.translate(key),
                            SortLabel::Literal(text) => text.to_string(),
                        },
                        selected: option == active,
                        choice: MenuChoice::Sort(option),
                    })
                    .collect(),
            }
        });

        let overflow_menu = self.menus.anchor(MenuKind::Overflow).map(|anchor| MenuView {
            anchor,
            cursor: self.menus.cursor(MenuKind::Overflow),
            items: self
                .overflow_items()
                .into_iter()
                .map(|item| MenuItemView {
                    label: labels.translate(item.label_key()),
                    selected: false,
                    choice: MenuChoice::Overflow(item),
                })
                .collect(),
        });

        let (rows, empty_state) = if home {
            let term = self.ctx.search_term.get();
            let rows: Vec<DisplayItem> = visible_entries(&self.entries, &term, self.ctx.sort_option.get())
                .iter()
                .map(|entry| DisplayItem {
                    label: truncate(&entry.display_name(), cols.saturating_sub(2)),
                })
                .collect();
            let empty = if !rows.is_empty() {
                None
            } else if self.entries.is_empty() {
                Some(labels.translate("list.empty"))
            } else {
                Some(labels.translate("list.noMatches"))
            };
            (rows, empty)
        } else {
            (Vec::new(), None)
        };

        BarViewModel {
            back: back_available(&route),
            heading,
            home_actions: home.then_some(HomeActions { searching }),
            sort_menu,
            overflow_menu,
            rows,
            empty_state,
            status: self.diagnostic.clone(),
        }
    }
}

impl fmt::Debug for AppBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppBar")
            .field("route", &self.route())
            .field("mode", &self.search.mode())
            .field("mounted", &self.mounted)
            .field("generation", &self.generation)
            .field("password_set", &self.password_set)
            .field("diagnostic", &self.diagnostic)
            .finish_non_exhaustive()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
