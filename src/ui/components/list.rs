//! Home entry list renderer.

use crate::ui::helpers::{fit, position_cursor, DIM, RESET};
use crate::ui::viewmodel::BarViewModel;

/// Renders entry rows from `line` until `last_line` (exclusive), or the
/// empty message when there are none.
pub fn render_list(out: &mut String, vm: &BarViewModel, line: usize, last_line: usize, cols: usize) {
    if let Some(message) = &vm.empty_state {
        if line < last_line {
            position_cursor(out, line, 1);
            out.push_str(DIM);
            out.push_str(&fit(message, cols.saturating_sub(1)));
            out.push_str(RESET);
        }
        return;
    }

    for (offset, item) in vm.rows.iter().enumerate() {
        let row = line + offset;
        if row >= last_line {
            break;
        }
        position_cursor(out, row, 1);
        out.push_str(&fit(&item.label, cols.saturating_sub(1)));
    }
}
