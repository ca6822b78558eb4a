//! Shared rendering utilities.
//!
//! Components append to a `String` frame instead of printing directly, so a
//! whole frame can be inspected in tests and written to stdout in one go.

/// Bold text.
pub const BOLD: &str = "\u{1b}[1m";
/// Dimmed text.
pub const DIM: &str = "\u{1b}[2m";
/// Reverse video, used for the keyboard highlight.
pub const REVERSE: &str = "\u{1b}[7m";
/// Resets all attributes.
pub const RESET: &str = "\u{1b}[0m";

/// Appends a cursor move to zero-based (`line`, `column`).
///
/// ANSI coordinates are 1-indexed; the conversion happens here.
pub fn position_cursor(out: &mut String, line: usize, column: usize) {
    out.push_str(&format!("\u{1b}[{};{}H", line + 1, column + 1));
}

/// Pads or truncates `text` to exactly `width` columns.
///
/// ```
/// use vaultbar::ui::helpers::fit;
///
/// assert_eq!(fit("abc", 5), "abc  ");
/// assert_eq!(fit("abcdef", 4), "abc…");
/// ```
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        let mut out = text.to_string();
        out.push_str(&" ".repeat(width - len));
        out
    } else if width == 0 {
        String::new()
    } else {
        let mut out: String = text.chars().take(width - 1).collect();
        out.push('…');
        out
    }
}
