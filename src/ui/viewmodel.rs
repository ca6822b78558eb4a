//! View model types representing renderable bar state.
//!
//! View models are computed by [`AppBar::compute_viewmodel`] and consumed by
//! the renderer and by click hit-testing. They contain no logic, only
//! display-ready data.
//!
//! [`AppBar::compute_viewmodel`]: crate::app::AppBar::compute_viewmodel

use crate::app::menu::{Anchor, OverflowItem};
use crate::domain::SortOption;

/// Complete view model of the bar and the home list below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarViewModel {
    /// Whether the back action is shown.
    pub back: bool,

    /// Title or search field.
    pub heading: Heading,

    /// Search/close and sort icons plus the overflow icon; home only.
    pub home_actions: Option<HomeActions>,

    /// Open sort menu, if any.
    pub sort_menu: Option<MenuView>,

    /// Open overflow menu, if any.
    pub overflow_menu: Option<MenuView>,

    /// Entry rows, filtered and ordered (home only).
    pub rows: Vec<DisplayItem>,

    /// Message shown when the home list has no rows.
    pub empty_state: Option<String>,

    /// Status line text.
    pub status: Option<String>,
}

/// What the left side of the bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// A plain title.
    Title(String),
    /// The live search field.
    SearchField {
        /// Current term.
        query: String,
        /// Shown while the term is empty.
        placeholder: String,
    },
}

/// Home screen icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeActions {
    /// `true` shows the close icon instead of the search icon.
    pub searching: bool,
}

/// An open dropdown menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    /// Icon position the menu hangs from.
    pub anchor: Anchor,
    /// Entries, top to bottom.
    pub items: Vec<MenuItemView>,
    /// Keyboard highlight.
    pub cursor: usize,
}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    /// Localized label.
    pub label: String,
    /// Marks the active sort option.
    pub selected: bool,
    /// What picking the entry does.
    pub choice: MenuChoice,
}

/// Target of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Commit a sort option.
    Sort(SortOption),
    /// Run an overflow action.
    Overflow(OverflowItem),
}

/// A row of the home entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Display name, already truncated to the pane width.
    pub label: String,
}
