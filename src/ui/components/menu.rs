//! Dropdown menu renderer.

use crate::ui::helpers::{fit, position_cursor, REVERSE, RESET};
use crate::ui::layout::MenuRect;
use crate::ui::viewmodel::MenuView;

/// Draws `menu` over whatever is below it.
///
/// The active sort option is marked with `•`; the keyboard highlight is shown
/// in reverse video.
pub fn render_menu(out: &mut String, menu: &MenuView) {
    let rect = MenuRect::of(menu);
    for (index, item) in menu.items.iter().enumerate() {
        position_cursor(out, rect.top + index, rect.left);
        let marker = if item.selected { '•' } else { ' ' };
        let text = fit(&format!(" {marker} {}", item.label), rect.width);
        if index == menu.cursor {
            out.push_str(REVERSE);
            out.push_str(&text);
            out.push_str(RESET);
        } else {
            out.push_str(&text);
        }
    }
}
