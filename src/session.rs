//! Session composition root.
//!
//! A [`BarSession`] owns everything one running bar needs: the shared UI
//! context, the router, the key channel and the bar itself. It executes the
//! actions the handler returns, feeding route changes back in, and hands
//! worker requests to the caller to post.
//!
//! Sessions share nothing, so two sessions in one process (as in tests) are
//! fully independent.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::app::menu::{Anchor, MenuKind};
use crate::app::{handle_event, Action, AppBar, Event, KeyChannel, KeyPress, SearchEdit};
use crate::context::UiContext;
use crate::domain::Result;
use crate::i18n::{Catalog, Translate};
use crate::navigation::{HistoryRouter, Router, ABOUT, HOME, SETTINGS, UNLOCK};
use crate::ui::layout::BAR_LINE;
use crate::ui::{self, BarLayout, BarViewModel};
use crate::worker::WorkerMessage;

/// Outcome of feeding one input into the session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Update {
    /// Whether the view changed.
    pub render: bool,
    /// Requests to post to the worker, in order.
    pub worker_messages: Vec<WorkerMessage>,
}

impl Update {
    fn absorb(&mut self, other: Self) {
        self.render |= other.render;
        self.worker_messages.extend(other.worker_messages);
    }
}

/// One running navigation bar and its collaborators.
#[derive(Debug)]
pub struct BarSession {
    ctx: UiContext,
    router: Rc<HistoryRouter>,
    keys: KeyChannel<Event>,
    bar: AppBar,
    labels: Catalog,
}

impl BarSession {
    /// Creates an unmounted session at the home screen.
    pub fn new(home_title: impl Into<String>, labels: Catalog) -> Self {
        let ctx = UiContext::new();
        let router = Rc::new(HistoryRouter::new());
        let bar = AppBar::new(ctx.clone(), Rc::clone(&router) as Rc<dyn Router>, home_title);
        Self {
            ctx,
            router,
            keys: KeyChannel::new(),
            bar,
            labels,
        }
    }

    /// Mounts the bar and returns the initial loads to post.
    pub fn start(&mut self) -> Update {
        self.bar.mount(&self.keys);
        Update {
            render: true,
            worker_messages: vec![WorkerMessage::load_preferences(), WorkerMessage::load_entries()],
        }
    }

    /// Mounts the bar. Returns `false` if it was already mounted.
    pub fn mount(&mut self) -> bool {
        self.bar.mount(&self.keys)
    }

    /// Unmounts the bar.
    pub fn unmount(&mut self) {
        self.bar.unmount();
    }

    /// Handles `event` and every route change its actions cause.
    ///
    /// # Errors
    ///
    /// Propagates handler errors; actions of earlier events in the same
    /// chain have already run.
    pub fn dispatch(&mut self, event: Event) -> Result<Update> {
        let mut update = Update::default();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(&mut self.bar, &event)?;
            update.render |= render;

            for action in actions {
                match action {
                    Action::Navigate(path) => {
                        self.router.navigate(&path);
                        queue.push_back(self.route_changed());
                    }
                    Action::NavigateBack => {
                        self.router.navigate_back();
                        queue.push_back(self.route_changed());
                    }
                    Action::PostToWorker(message) => update.worker_messages.push(message),
                }
            }
        }
        Ok(update)
    }

    /// Handles a key press.
    ///
    /// An open menu sees the key first: Esc closes it and Enter selects the
    /// highlighted item. The key then always goes through the key channel,
    /// so on home Esc cancels search and any other key starts it. A
    /// printable character is typed into the term only when the search
    /// field was already shown and no menu held the key.
    ///
    /// # Errors
    ///
    /// Propagates handler errors.
    pub fn press_key(&mut self, key: KeyPress) -> Result<Update> {
        let _span = tracing::trace_span!("press_key", ?key).entered();

        let mut update = Update::default();
        let focused = self.bar.menus().focused();
        let was_searching = self.bar.search_active();

        if let Some(menu) = focused {
            match key {
                KeyPress::Cancel => update.absorb(self.dispatch(match menu {
                    MenuKind::Sort => Event::CloseSortMenu,
                    MenuKind::Overflow => Event::CloseOverflowMenu,
                })?),
                KeyPress::Printable('\n') => update.absorb(self.dispatch(Event::MenuActivate)?),
                KeyPress::Printable(_) => {}
            }
        }

        for event in self.keys.dispatch(&key) {
            update.absorb(self.dispatch(event)?);
        }

        if let KeyPress::Printable(c) = key {
            if c != '\n' && focused.is_none() && was_searching && self.bar.search_active() {
                update.absorb(self.dispatch(Event::SearchEdit(SearchEdit::Insert(c)))?);
            }
        }
        Ok(update)
    }

    /// Left click at zero-based (`line`, `column`) in a `cols`-wide pane.
    ///
    /// # Errors
    ///
    /// Propagates handler errors.
    pub fn click(&mut self, line: usize, column: usize, cols: usize) -> Result<Update> {
        let vm = self.viewmodel(cols);
        match ui::hit_test(&vm, cols, line, column) {
            Some(event) => self.dispatch(event),
            None => Ok(Update::default()),
        }
    }

    /// Opens `kind` under its icon, as a click on the icon would.
    ///
    /// # Errors
    ///
    /// Propagates handler errors.
    pub fn open_menu(&mut self, kind: MenuKind, cols: usize) -> Result<Update> {
        let layout = BarLayout::compute(&self.viewmodel(cols), cols);
        let icon = match kind {
            MenuKind::Sort => layout.sort,
            MenuKind::Overflow => layout.more,
        };
        let Some(icon) = icon else {
            return Ok(Update::default());
        };
        let anchor = Anchor::new(BAR_LINE, icon.start);
        self.dispatch(match kind {
            MenuKind::Sort => Event::OpenSortMenu(anchor),
            MenuKind::Overflow => Event::OpenOverflowMenu(anchor),
        })
    }

    fn route_changed(&self) -> Event {
        let path = self.router.current_path();
        if let Some(key) = screen_title_key(&path) {
            self.ctx.title.set(self.labels.translate(key));
        }
        Event::RouteChanged { path }
    }

    /// Current view model.
    #[must_use]
    pub fn viewmodel(&self, cols: usize) -> BarViewModel {
        self.bar.compute_viewmodel(&self.labels, cols)
    }

    /// Renders the current frame.
    #[must_use]
    pub fn render_frame(&self, rows: usize, cols: usize) -> String {
        ui::render_frame(&self.viewmodel(cols), rows, cols)
    }

    /// The bar.
    #[must_use]
    pub const fn bar(&self) -> &AppBar {
        &self.bar
    }

    /// Shared UI state.
    #[must_use]
    pub const fn context(&self) -> &UiContext {
        &self.ctx
    }

    /// The router.
    #[must_use]
    pub fn router(&self) -> &HistoryRouter {
        &self.router
    }

    /// The key channel the bar listens on.
    #[must_use]
    pub const fn keys(&self) -> &KeyChannel<Event> {
        &self.keys
    }
}

/// Title label of the screen at `path`. Home shows the configured title
/// instead.
fn screen_title_key(path: &str) -> Option<&'static str> {
    match path {
        HOME => None,
        SETTINGS => Some("screen.settings"),
        ABOUT => Some("screen.about"),
        UNLOCK => Some("screen.unlock"),
        other => {
            tracing::debug!(route = %other, "no title for route");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Anchor, OverflowItem};
    use crate::domain::SortOption;
    use crate::storage::{EntryRecord, JsonStorage, Storage, IS_PASSWORD_SET};
    use crate::worker::{VaultWorker, WorkerResponse};
    use serde_json::json;

    const COLS: usize = 60;

    fn session() -> BarSession {
        let mut session = BarSession::new("Tauthy", Catalog::english());
        session.start();
        session
    }

    fn with_password(session: &mut BarSession) {
        session
            .dispatch(Event::WorkerResponse(WorkerResponse::PreferencesLoaded { password_set: true }))
            .unwrap();
    }

    fn open_overflow(session: &mut BarSession) {
        session.dispatch(Event::OpenOverflowMenu(Anchor::new(0, 50))).unwrap();
    }

    fn request_lock(session: &mut BarSession) -> WorkerMessage {
        open_overflow(session);
        let mut update = session.dispatch(Event::SelectOverflow(OverflowItem::Lock)).unwrap();
        assert_eq!(update.worker_messages.len(), 1);
        update.worker_messages.remove(0)
    }

    fn ticket_of(message: &WorkerMessage) -> crate::app::LockTicket {
        match message {
            WorkerMessage::LockVault { ticket, .. } => *ticket,
            other => panic!("expected lock request, got {other:?}"),
        }
    }

    #[test]
    fn start_requests_flag_and_entries() {
        let mut session = BarSession::new("Tauthy", Catalog::english());
        let update = session.start();

        assert!(matches!(update.worker_messages[0], WorkerMessage::LoadPreferences { .. }));
        assert!(matches!(update.worker_messages[1], WorkerMessage::LoadEntries { .. }));
        assert_eq!(session.keys().listener_count(), 1);
    }

    #[test]
    fn first_key_on_home_only_opens_the_field() {
        let mut session = session();
        session.press_key(KeyPress::Printable('g')).unwrap();

        assert!(session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "");
    }

    #[test]
    fn typing_on_home_searches_and_cancel_clears() {
        let mut session = session();
        session.dispatch(Event::StartSearch).unwrap();
        for c in "abc".chars() {
            session.press_key(KeyPress::Printable(c)).unwrap();
        }
        assert!(session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "abc");

        session.press_key(KeyPress::Cancel).unwrap();
        assert!(!session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "");
    }

    #[test]
    fn keys_off_home_do_nothing() {
        let mut session = session();
        open_overflow(&mut session);
        session.dispatch(Event::SelectOverflow(OverflowItem::Settings)).unwrap();
        assert_eq!(session.router().current_path(), SETTINGS);
        assert_eq!(session.context().title.get(), "Settings");

        let update = session.press_key(KeyPress::Printable('x')).unwrap();
        assert!(!update.render);
        assert!(!session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "");
    }

    #[test]
    fn term_survives_a_trip_off_home() {
        let mut session = session();
        session.dispatch(Event::StartSearch).unwrap();
        session.press_key(KeyPress::Printable('g')).unwrap();

        open_overflow(&mut session);
        session.dispatch(Event::SelectOverflow(OverflowItem::About)).unwrap();
        assert!(!session.bar().search_active());
        assert!(session.bar().back_available());

        session.dispatch(Event::Back).unwrap();
        assert_eq!(session.router().current_path(), HOME);
        assert!(session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "g");
    }

    #[test]
    fn empty_term_is_left_idle_off_home() {
        let mut session = session();
        session.dispatch(Event::StartSearch).unwrap();
        open_overflow(&mut session);
        session.dispatch(Event::SelectOverflow(OverflowItem::Settings)).unwrap();
        session.dispatch(Event::Back).unwrap();

        assert!(!session.bar().search_active());
    }

    #[test]
    fn menus_open_and_close_independently() {
        let mut session = session();
        session.open_menu(MenuKind::Sort, COLS).unwrap();
        session.open_menu(MenuKind::Overflow, COLS).unwrap();
        assert_eq!(session.bar().menus().focused(), Some(MenuKind::Overflow));

        session.press_key(KeyPress::Cancel).unwrap();
        assert!(session.bar().menus().is_open(MenuKind::Sort));
        assert!(!session.bar().menus().is_open(MenuKind::Overflow));

        assert!(session.dispatch(Event::CloseSortMenu).unwrap().render);
        assert!(!session.dispatch(Event::CloseSortMenu).unwrap().render);
    }

    #[test]
    fn esc_with_menu_open_closes_it_and_cancels_search() {
        let mut session = session();
        session.dispatch(Event::StartSearch).unwrap();
        session.press_key(KeyPress::Printable('a')).unwrap();
        session.open_menu(MenuKind::Sort, COLS).unwrap();

        session.press_key(KeyPress::Cancel).unwrap();
        assert!(session.bar().menus().focused().is_none());
        assert!(!session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "");
    }

    #[test]
    fn printable_key_with_menu_open_starts_search_without_typing() {
        let mut session = session();
        session.open_menu(MenuKind::Overflow, COLS).unwrap();

        session.press_key(KeyPress::Printable('x')).unwrap();
        assert!(session.bar().search_active());
        assert!(session.bar().menus().is_open(MenuKind::Overflow));
        assert_eq!(session.context().search_term.get(), "");

        session.dispatch(Event::CloseOverflowMenu).unwrap();
        session.press_key(KeyPress::Printable('x')).unwrap();
        assert_eq!(session.context().search_term.get(), "x");
    }

    #[test]
    fn sort_selection_commits_then_closes() {
        let mut session = session();
        session.open_menu(MenuKind::Sort, COLS).unwrap();
        let option = SortOption::ALL[1];

        session.dispatch(Event::SelectSort(option)).unwrap();
        assert_eq!(session.context().sort_option.get(), option);
        assert!(!session.bar().menus().is_open(MenuKind::Sort));
    }

    #[test]
    fn enter_activates_highlighted_overflow_item() {
        let mut session = session();
        session.open_menu(MenuKind::Overflow, COLS).unwrap();
        session.dispatch(Event::MenuCursor { down: true }).unwrap();

        session.press_key(KeyPress::Printable('\n')).unwrap();
        assert_eq!(session.router().current_path(), ABOUT);
        assert!(session.bar().menus().focused().is_none());
    }

    #[test]
    fn lock_is_offered_only_with_a_password() {
        let mut session = session();
        assert_eq!(session.bar().overflow_items(), vec![OverflowItem::Settings, OverflowItem::About]);

        open_overflow(&mut session);
        let update = session.dispatch(Event::SelectOverflow(OverflowItem::Lock)).unwrap();
        assert!(update.worker_messages.is_empty());

        with_password(&mut session);
        assert_eq!(session.bar().overflow_items()[0], OverflowItem::Lock);
    }

    #[test]
    fn successful_lock_navigates_to_unlock() {
        let mut session = session();
        with_password(&mut session);
        let ticket = ticket_of(&request_lock(&mut session));
        assert!(!session.bar().menus().is_open(MenuKind::Overflow));
        assert_eq!(session.router().current_path(), HOME);

        session
            .dispatch(Event::WorkerResponse(WorkerResponse::VaultLocked { ticket }))
            .unwrap();
        assert_eq!(session.router().current_path(), UNLOCK);
        assert_eq!(session.context().title.get(), "Unlock");
    }

    #[test]
    fn failed_lock_reports_and_stays() {
        let mut session = session();
        with_password(&mut session);
        session.dispatch(Event::StartSearch).unwrap();
        session.press_key(KeyPress::Printable('g')).unwrap();
        session.open_menu(MenuKind::Sort, COLS).unwrap();
        session.dispatch(Event::SelectSort(SortOption::AlphabeticalAscending)).unwrap();
        let ticket = ticket_of(&request_lock(&mut session));
        assert!(!session.bar().menus().is_open(MenuKind::Overflow));

        session
            .dispatch(Event::WorkerResponse(WorkerResponse::LockFailed {
                ticket,
                message: "disk full".to_string(),
            }))
            .unwrap();
        assert_eq!(session.router().current_path(), HOME);
        assert_eq!(session.bar().diagnostic(), Some("Failed to lock vault: disk full"));
        assert!(session.bar().menus().focused().is_none());
        assert!(session.bar().search_active());
        assert_eq!(session.context().search_term.get(), "g");
        assert_eq!(session.context().sort_option.get(), SortOption::AlphabeticalAscending);
        assert_eq!(session.context().title.get(), "");
    }

    #[test]
    fn lock_outcome_after_remount_is_suppressed() {
        let mut session = session();
        with_password(&mut session);
        let ticket = ticket_of(&request_lock(&mut session));

        session.unmount();
        assert_eq!(session.keys().listener_count(), 0);
        assert!(!session.bar().keyboard_attached());
        assert!(session.mount());
        assert!(!session.mount());
        assert_eq!(session.keys().listener_count(), 1);

        session
            .dispatch(Event::WorkerResponse(WorkerResponse::VaultLocked { ticket }))
            .unwrap();
        assert_eq!(session.router().current_path(), HOME);
    }

    #[test]
    fn unmounted_bar_ignores_input() {
        let mut session = session();
        session.unmount();

        session.press_key(KeyPress::Printable('a')).unwrap();
        session.open_menu(MenuKind::Sort, COLS).unwrap();
        assert!(!session.bar().search_active());
        assert!(session.bar().menus().focused().is_none());
    }

    #[test]
    fn click_on_icons_drives_the_bar() {
        let mut session = session();
        let layout = BarLayout::compute(&session.viewmodel(COLS), COLS);

        let search = layout.search_toggle.unwrap();
        session.click(BAR_LINE, search.start, COLS).unwrap();
        assert!(session.bar().search_active());

        let more = layout.more.unwrap();
        session.click(BAR_LINE, more.start + 1, COLS).unwrap();
        assert!(session.bar().menus().is_open(MenuKind::Overflow));

        session.click(10, 0, COLS).unwrap();
        assert!(session.bar().menus().focused().is_none());
    }

    #[test]
    fn lock_round_trip_through_worker() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("vault.json")).unwrap();
        storage.write_preference(IS_PASSWORD_SET, json!(true)).unwrap();
        storage.upsert_entry(&EntryRecord::new("1", "GitHub", "octocat", 0)).unwrap();
        let mut worker = VaultWorker::with_storage(Box::new(storage));

        let mut session = BarSession::new("Tauthy", Catalog::english());
        for message in session.start().worker_messages {
            let response = worker.handle_message(message);
            session.dispatch(Event::WorkerResponse(response)).unwrap();
        }
        assert!(session.bar().password_set());
        assert_eq!(session.bar().entries().len(), 1);

        let request = request_lock(&mut session);
        let response = worker.handle_message(request);
        session.dispatch(Event::WorkerResponse(response)).unwrap();
        assert_eq!(session.router().current_path(), UNLOCK);
    }
}
