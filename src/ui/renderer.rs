//! Top-level rendering coordinator.
//!
//! ```text
//! line 0      bar
//! line 1      separator
//! line 2..    entry list (home) or nothing
//! last line   status, when a diagnostic is set
//! overlays    sort menu, then overflow menu on top
//! ```

use crate::ui::components;
use crate::ui::layout::BarLayout;
use crate::ui::viewmodel::BarViewModel;

/// Renders `vm` into a frame for a `rows` x `cols` pane.
#[must_use]
pub fn render_frame(vm: &BarViewModel, rows: usize, cols: usize) -> String {
    let mut out = String::new();
    let layout = BarLayout::compute(vm, cols);

    let list_start = components::render_bar(&mut out, vm, &layout, cols);

    let list_end = if vm.status.is_some() { rows.saturating_sub(1) } else { rows };
    components::render_list(&mut out, vm, list_start, list_end, cols);

    if let Some(message) = &vm.status {
        components::render_status(&mut out, message, rows.saturating_sub(1), cols);
    }

    for menu in [vm.sort_menu.as_ref(), vm.overflow_menu.as_ref()].into_iter().flatten() {
        components::render_menu(&mut out, menu);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::menu::Anchor;
    use crate::domain::SortOption;
    use crate::ui::viewmodel::{DisplayItem, Heading, HomeActions, MenuChoice, MenuItemView, MenuView};

    fn strip_ansi(frame: &str) -> String {
        let mut out = String::new();
        let mut chars = frame.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn vm() -> BarViewModel {
        BarViewModel {
            back: false,
            heading: Heading::SearchField { query: "git".into(), placeholder: "Search".into() },
            home_actions: Some(HomeActions { searching: true }),
            sort_menu: None,
            overflow_menu: None,
            rows: vec![DisplayItem { label: "GitHub (octocat)".into() }],
            empty_state: None,
            status: Some("Failed to lock vault: disk full".into()),
        }
    }

    #[test]
    fn frame_contains_heading_rows_and_status() {
        let text = strip_ansi(&render_frame(&vm(), 10, 60));
        assert!(text.contains("git_"));
        assert!(text.contains("[x]"));
        assert!(text.contains("GitHub (octocat)"));
        assert!(text.contains("! Failed to lock vault: disk full"));
    }

    #[test]
    fn sort_menu_marks_active_option() {
        let mut vm = vm();
        vm.sort_menu = Some(MenuView {
            anchor: Anchor::new(0, 52),
            cursor: 1,
            items: vec![
                MenuItemView { label: "Custom".into(), selected: false, choice: MenuChoice::Sort(SortOption::Custom) },
                MenuItemView {
                    label: "A-Z".into(),
                    selected: true,
                    choice: MenuChoice::Sort(SortOption::AlphabeticalAscending),
                },
            ],
        });
        let text = strip_ansi(&render_frame(&vm, 10, 60));
        assert!(text.contains(" • A-Z"));
    }
}
