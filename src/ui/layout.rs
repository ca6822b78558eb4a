//! Screen geometry of the bar and its menus, and click hit-testing.
//!
//! The renderer and the mouse handler share one layout so a click always
//! lands on what was drawn. All coordinates are zero-based.
//!
//! ```text
//! [<] Settings                                  (off home)
//! Tauthy                              [/] [s] [:]   (home)
//! ```

use crate::app::menu::Anchor;
use crate::app::Event;
use crate::ui::viewmodel::{BarViewModel, MenuChoice, MenuView};

/// Terminal line the bar occupies.
pub const BAR_LINE: usize = 0;
/// Width of every icon.
pub const ICON_WIDTH: usize = 3;

pub const BACK_ICON: &str = "[<]";
pub const SEARCH_ICON: &str = "[/]";
pub const CLOSE_ICON: &str = "[x]";
pub const SORT_ICON: &str = "[s]";
pub const MORE_ICON: &str = "[:]";

/// Horizontal extent on the bar line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First column.
    pub start: usize,
    /// Number of columns.
    pub width: usize,
}

impl Span {
    const fn icon(start: usize) -> Self {
        Self { start, width: ICON_WIDTH }
    }

    /// Whether `column` falls inside the span.
    #[must_use]
    pub const fn contains(&self, column: usize) -> bool {
        column >= self.start && column < self.start + self.width
    }
}

/// Positions of the bar's elements for one view model and pane width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    /// Back icon, when shown.
    pub back: Option<Span>,
    /// Column where the title or search field starts.
    pub heading_start: usize,
    /// Columns available to the heading.
    pub heading_width: usize,
    /// Search or close icon (home only).
    pub search_toggle: Option<Span>,
    /// Sort icon (home only).
    pub sort: Option<Span>,
    /// Overflow icon (home only).
    pub more: Option<Span>,
}

impl BarLayout {
    /// Lays out the bar for `vm` in a `cols`-wide pane.
    #[must_use]
    pub fn compute(vm: &BarViewModel, cols: usize) -> Self {
        let back = vm.back.then_some(Span::icon(1));
        let heading_start = back.map_or(1, |b| b.start + b.width + 1);

        let (search_toggle, sort, more) = if vm.home_actions.is_some() {
            let more = cols.saturating_sub(ICON_WIDTH + 1);
            let sort = more.saturating_sub(ICON_WIDTH + 1);
            let toggle = sort.saturating_sub(ICON_WIDTH + 1);
            (Some(Span::icon(toggle)), Some(Span::icon(sort)), Some(Span::icon(more)))
        } else {
            (None, None, None)
        };

        let heading_end = search_toggle.map_or(cols, |s| s.start.saturating_sub(1));
        Self {
            back,
            heading_start,
            heading_width: heading_end.saturating_sub(heading_start),
            search_toggle,
            sort,
            more,
        }
    }
}

/// Rectangle covered by an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuRect {
    /// First line.
    pub top: usize,
    /// First column.
    pub left: usize,
    /// Columns, including padding and the selection marker.
    pub width: usize,
    /// One line per item.
    pub height: usize,
}

impl MenuRect {
    /// Dropdown rectangle for `menu`: just below its anchor, right edge
    /// aligned with the anchoring icon.
    #[must_use]
    pub fn of(menu: &MenuView) -> Self {
        let label_width = menu
            .items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0);
        let width = label_width + 4;
        let Anchor { line, column } = menu.anchor;
        Self {
            top: line + 1,
            left: (column + ICON_WIDTH).saturating_sub(width),
            width,
            height: menu.items.len(),
        }
    }

    /// Item row under (`line`, `column`), if inside.
    #[must_use]
    pub const fn item_at(&self, line: usize, column: usize) -> Option<usize> {
        if line >= self.top
            && line < self.top + self.height
            && column >= self.left
            && column < self.left + self.width
        {
            Some(line - self.top)
        } else {
            None
        }
    }
}

/// Translates a left click at (`line`, `column`) into a bar event.
///
/// Open menus capture every click: a click on an item selects it, a click
/// anywhere else dismisses the menus and does nothing more. The overflow menu
/// is on top when both are open.
#[must_use]
pub fn hit_test(vm: &BarViewModel, cols: usize, line: usize, column: usize) -> Option<Event> {
    let menus = [vm.overflow_menu.as_ref(), vm.sort_menu.as_ref()];
    for menu in menus.into_iter().flatten() {
        if let Some(index) = MenuRect::of(menu).item_at(line, column) {
            return menu.items.get(index).map(|item| match item.choice {
                MenuChoice::Sort(option) => Event::SelectSort(option),
                MenuChoice::Overflow(action) => Event::SelectOverflow(action),
            });
        }
    }
    if vm.sort_menu.is_some() || vm.overflow_menu.is_some() {
        return Some(Event::DismissMenus);
    }

    if line != BAR_LINE {
        return None;
    }
    let layout = BarLayout::compute(vm, cols);
    let hit = |span: Option<Span>| span.is_some_and(|s| s.contains(column));

    if hit(layout.back) {
        return Some(Event::Back);
    }
    if hit(layout.search_toggle) {
        let searching = vm.home_actions.is_some_and(|a| a.searching);
        return Some(if searching { Event::CancelSearch } else { Event::StartSearch });
    }
    if let Some(sort) = layout.sort.filter(|s| s.contains(column)) {
        return Some(Event::OpenSortMenu(Anchor::new(BAR_LINE, sort.start)));
    }
    if let Some(more) = layout.more.filter(|s| s.contains(column)) {
        return Some(Event::OpenOverflowMenu(Anchor::new(BAR_LINE, more.start)));
    }
    None
}
