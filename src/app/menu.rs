//! Open/close bookkeeping for the sort and overflow menus.
//!
//! Each menu is open exactly while its anchor is set. The two anchors live in
//! separate observable cells, so opening or closing one menu can never touch
//! the other. Closing an already-closed menu is a silent no-op: a second close
//! from a double click simply finds no anchor.

use crate::context::Observable;
use crate::domain::SortOption;

/// Screen position of the icon that opened a menu.
///
/// Opaque to the coordinator; the renderer places the dropdown under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// Zero-based terminal line.
    pub line: usize,
    /// Zero-based terminal column.
    pub column: usize,
}

impl Anchor {
    /// Creates an anchor at `line`, `column`.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Which menu an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// Sort order menu.
    Sort,
    /// Overflow ("more") menu.
    Overflow,
}

/// Entries of the overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverflowItem {
    /// Lock the vault and go to the unlock screen.
    Lock,
    /// Open settings.
    Settings,
    /// Open about.
    About,
}

impl OverflowItem {
    /// Translation key of the item's label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Lock => "appBar.lock",
            Self::Settings => "appBar.settings",
            Self::About => "appBar.about",
        }
    }
}

/// Items offered by the overflow menu.
///
/// The lock entry exists only when a master password is set.
#[must_use]
pub fn overflow_items(password_set: bool) -> Vec<OverflowItem> {
    let mut items = Vec::with_capacity(3);
    if password_set {
        items.push(OverflowItem::Lock);
    }
    items.extend([OverflowItem::Settings, OverflowItem::About]);
    items
}

/// Tracks both menus' anchors and keyboard highlight.
#[derive(Debug, Clone)]
pub struct MenuCoordinator {
    sort_anchor: Observable<Option<Anchor>>,
    overflow_anchor: Observable<Option<Anchor>>,
    sort_option: Observable<SortOption>,
    sort_cursor: usize,
    overflow_cursor: usize,
}

impl MenuCoordinator {
    /// Creates a coordinator with both menus closed, committing sort
    /// selections to `sort_option`.
    #[must_use]
    pub fn new(sort_option: Observable<SortOption>) -> Self {
        Self {
            sort_anchor: Observable::new(None),
            overflow_anchor: Observable::new(None),
            sort_option,
            sort_cursor: 0,
            overflow_cursor: 0,
        }
    }

    /// Opens the sort menu at `anchor`. The cursor starts on the active option.
    pub fn open_sort(&mut self, anchor: Anchor) {
        let active = self.sort_option.get();
        self.sort_cursor = SortOption::ALL.iter().position(|o| *o == active).unwrap_or(0);
        self.sort_anchor.set(Some(anchor));
        tracing::debug!(?anchor, "sort menu opened");
    }

    /// Opens the overflow menu at `anchor`.
    pub fn open_overflow(&mut self, anchor: Anchor) {
        self.overflow_cursor = 0;
        self.overflow_anchor.set(Some(anchor));
        tracing::debug!(?anchor, "overflow menu opened");
    }

    /// Closes the sort menu. No-op if already closed.
    pub fn close_sort(&mut self) -> bool {
        Self::close(&self.sort_anchor, MenuKind::Sort)
    }

    /// Closes the overflow menu. No-op if already closed.
    pub fn close_overflow(&mut self) -> bool {
        Self::close(&self.overflow_anchor, MenuKind::Overflow)
    }

    /// Closes whichever menus are open.
    pub fn close_all(&mut self) -> bool {
        let sort = self.close_sort();
        let overflow = self.close_overflow();
        sort || overflow
    }

    fn close(anchor: &Observable<Option<Anchor>>, kind: MenuKind) -> bool {
        let closed = anchor.set(None);
        if !closed {
            tracing::trace!(?kind, "menu already closed");
        }
        closed
    }

    /// Commits `option` to the shared sort state, then closes the sort menu.
    pub fn select_sort(&mut self, option: SortOption) {
        tracing::debug!(?option, "sort option selected");
        self.sort_option.set(option);
        self.close_sort();
    }

    /// Anchor of `kind`'s menu, if open.
    #[must_use]
    pub fn anchor(&self, kind: MenuKind) -> Option<Anchor> {
        match kind {
            MenuKind::Sort => self.sort_anchor.get(),
            MenuKind::Overflow => self.overflow_anchor.get(),
        }
    }

    /// Whether `kind`'s menu is open.
    #[must_use]
    pub fn is_open(&self, kind: MenuKind) -> bool {
        self.anchor(kind).is_some()
    }

    /// The menu that currently takes keyboard input, if any.
    ///
    /// When both are open the overflow menu wins, since it renders on top.
    #[must_use]
    pub fn focused(&self) -> Option<MenuKind> {
        if self.is_open(MenuKind::Overflow) {
            Some(MenuKind::Overflow)
        } else if self.is_open(MenuKind::Sort) {
            Some(MenuKind::Sort)
        } else {
            None
        }
    }

    /// Highlighted row of `kind`'s menu.
    #[must_use]
    pub const fn cursor(&self, kind: MenuKind) -> usize {
        match kind {
            MenuKind::Sort => self.sort_cursor,
            MenuKind::Overflow => self.overflow_cursor,
        }
    }

    /// Moves the highlight of `kind`'s menu by one row, wrapping within
    /// `len` items. No-op while the menu is closed.
    pub fn move_cursor(&mut self, kind: MenuKind, len: usize, down: bool) {
        if len == 0 || !self.is_open(kind) {
            return;
        }
        let cursor = match kind {
            MenuKind::Sort => &mut self.sort_cursor,
            MenuKind::Overflow => &mut self.overflow_cursor,
        };
        *cursor = if down {
            (*cursor + 1) % len
        } else {
            (*cursor + len - 1) % len
        };
    }

    /// Observable handle of `kind`'s anchor, for observers that need to see
    /// open/close transitions.
    #[must_use]
    pub fn anchor_handle(&self, kind: MenuKind) -> Observable<Option<Anchor>> {
        match kind {
            MenuKind::Sort => self.sort_anchor.clone(),
            MenuKind::Overflow => self.overflow_anchor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coordinator() -> (MenuCoordinator, Observable<SortOption>) {
        let sort = Observable::new(SortOption::Custom);
        (MenuCoordinator::new(sort.clone()), sort)
    }

    #[test]
    fn menus_are_independent() {
        let (mut menus, _) = coordinator();
        let a = Anchor::new(0, 70);
        let b = Anchor::new(0, 75);

        menus.open_sort(a);
        menus.open_overflow(b);
        assert_eq!(menus.anchor(MenuKind::Sort), Some(a));
        assert_eq!(menus.anchor(MenuKind::Overflow), Some(b));

        menus.close_overflow();
        assert_eq!(menus.anchor(MenuKind::Sort), Some(a));
    }

    #[test]
    fn closing_twice_is_a_no_op() {
        let (mut menus, _) = coordinator();
        menus.open_sort(Anchor::new(0, 1));
        assert!(menus.close_sort());
        assert!(!menus.close_sort());
        assert_eq!(menus.anchor(MenuKind::Sort), None);
    }

    #[test]
    fn sort_commits_before_menu_closes() {
        let (mut menus, sort) = coordinator();
        let anchor_cell = menus.anchor_handle(MenuKind::Sort);
        let log = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&log);
        let anchor = anchor_cell.clone();
        let _on_sort = sort.subscribe(move |option| {
            sink.borrow_mut().push(format!("sort={option:?} open={}", anchor.get().is_some()));
        });
        let sink = Rc::clone(&log);
        let _on_anchor = anchor_cell.subscribe(move |anchor| {
            sink.borrow_mut().push(format!("anchor={anchor:?}"));
        });

        menus.open_sort(Anchor::new(0, 1));
        log.borrow_mut().clear();
        menus.select_sort(SortOption::AlphabeticalAscending);

        assert_eq!(
            *log.borrow(),
            vec![
                "sort=AlphabeticalAscending open=true".to_string(),
                "anchor=None".to_string(),
            ]
        );
        assert_eq!(sort.get(), SortOption::AlphabeticalAscending);
    }

    #[test]
    fn overflow_lock_item_requires_password() {
        assert_eq!(overflow_items(false), vec![OverflowItem::Settings, OverflowItem::About]);
        assert_eq!(
            overflow_items(true),
            vec![OverflowItem::Lock, OverflowItem::Settings, OverflowItem::About]
        );
    }

    #[test]
    fn sort_cursor_starts_on_active_option_and_wraps() {
        let (mut menus, sort) = coordinator();
        sort.set(SortOption::AlphabeticalDescending);
        menus.open_sort(Anchor::new(0, 0));
        assert_eq!(menus.cursor(MenuKind::Sort), 2);

        menus.move_cursor(MenuKind::Sort, 3, true);
        assert_eq!(menus.cursor(MenuKind::Sort), 0);
        menus.move_cursor(MenuKind::Sort, 3, false);
        assert_eq!(menus.cursor(MenuKind::Sort), 2);
    }
}
