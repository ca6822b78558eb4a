//! Diagnostic status line renderer.

use crate::ui::helpers::{fit, position_cursor, BOLD, RESET};

/// Renders `message` on `line`.
pub fn render_status(out: &mut String, message: &str, line: usize, cols: usize) {
    position_cursor(out, line, 0);
    out.push_str(BOLD);
    out.push_str(&fit(&format!(" ! {message}"), cols));
    out.push_str(RESET);
}
