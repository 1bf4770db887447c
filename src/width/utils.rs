//! ANSI-aware width calculation so table columns stay aligned whether or not
//! cells carry color escapes.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Replace control characters with their escaped spelling (`\n`, `\t`,
/// `\u{0}`) so a cell stays on one line and every character has width.
pub fn escape_controls(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }
    text.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Pad `text` with spaces until it occupies `width` display columns.
///
/// Text already at or beyond `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(display_width(text));
    let spaces = " ".repeat(fill);
    match align {
        Align::Left => format!("{text}{spaces}"),
        Align::Right => format!("{spaces}{text}"),
    }
}
