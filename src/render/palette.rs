//! Section colors.
//!
//! Each section's byte text is painted with a background taken from a fixed
//! five-color cycle so adjacent sections stay visually distinct. The palette
//! is an ordinary value owned by [`RendererSettings`](super::RendererSettings).

use std::io;

use crossterm::style::{Attribute, Color, ContentStyle};
use crossterm::tty::IsTty;

use crate::layout::PALETTE_LEN;

/// Background cycle with bold foreground text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub backgrounds: [Color; PALETTE_LEN],
    pub foreground: Color,
    pub bold: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            backgrounds: [
                Color::DarkGrey,
                Color::Red,
                Color::Blue,
                Color::Magenta,
                Color::Cyan,
            ],
            foreground: Color::White,
            bold: true,
        }
    }
}

impl Palette {
    /// Background color for a section, cycling by index.
    pub fn color_for(&self, section_index: usize) -> Color {
        self.backgrounds[section_index % PALETTE_LEN]
    }

    /// Wrap `text` in the escape sequences for the section's color.
    pub fn paint(&self, section_index: usize, text: &str) -> String {
        let mut style = ContentStyle::new();
        style.background_color = Some(self.color_for(section_index));
        style.foreground_color = Some(self.foreground);
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        style.apply(text).to_string()
    }
}

/// When to emit color escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Color only when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" | "on" | "yes" => Some(ColorMode::Always),
            "never" | "off" | "no" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_tty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::display_width;

    #[test]
    fn colors_cycle_every_five_sections() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(0), Color::DarkGrey);
        assert_eq!(palette.color_for(4), Color::Cyan);
        assert_eq!(palette.color_for(5), palette.color_for(0));
        assert_eq!(palette.color_for(12), palette.color_for(2));
    }

    #[test]
    fn painting_keeps_visible_width() {
        let painted = Palette::default().paint(1, "41 41 41 41");
        assert!(painted.contains("41 41 41 41"));
        assert!(painted.contains('\x1b'));
        assert_eq!(display_width(&painted), 11);
    }

    #[test]
    fn explicit_modes() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
        assert_eq!(ColorMode::from_name("Never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::from_name("sometimes"), None);
    }
}
