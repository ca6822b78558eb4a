//! Top bar renderer.

use crate::ui::helpers::{fit, position_cursor, BOLD, DIM, RESET};
use crate::ui::layout::{
    BarLayout, BACK_ICON, BAR_LINE, CLOSE_ICON, MORE_ICON, SEARCH_ICON, SORT_ICON,
};
use crate::ui::viewmodel::{BarViewModel, Heading};

/// Renders the bar line and the separator under it.
///
/// Returns the next free line.
pub fn render_bar(out: &mut String, vm: &BarViewModel, layout: &BarLayout, cols: usize) -> usize {
    position_cursor(out, BAR_LINE, 0);
    out.push_str(&" ".repeat(cols));

    if let Some(back) = layout.back {
        position_cursor(out, BAR_LINE, back.start);
        out.push_str(BACK_ICON);
    }

    position_cursor(out, BAR_LINE, layout.heading_start);
    match &vm.heading {
        Heading::Title(title) => {
            out.push_str(BOLD);
            out.push_str(&fit(title, layout.heading_width));
            out.push_str(RESET);
        }
        Heading::SearchField { query, placeholder } if query.is_empty() => {
            out.push_str(DIM);
            out.push_str(&fit(placeholder, layout.heading_width));
            out.push_str(RESET);
        }
        Heading::SearchField { query, .. } => {
            // Keep the tail visible while typing past the field width.
            let shown: String = {
                let len = query.chars().count();
                let skip = (len + 1).saturating_sub(layout.heading_width);
                query.chars().skip(skip).collect()
            };
            out.push_str(&fit(&format!("{shown}_"), layout.heading_width));
        }
    }

    if let Some(actions) = vm.home_actions {
        let icons = [
            (layout.search_toggle, if actions.searching { CLOSE_ICON } else { SEARCH_ICON }),
            (layout.sort, SORT_ICON),
            (layout.more, MORE_ICON),
        ];
        for (span, icon) in icons {
            if let Some(span) = span {
                position_cursor(out, BAR_LINE, span.start);
                out.push_str(icon);
            }
        }
    }

    position_cursor(out, BAR_LINE + 1, 0);
    out.push_str(DIM);
    out.push_str(&"─".repeat(cols));
    out.push_str(RESET);
    BAR_LINE + 2
}
