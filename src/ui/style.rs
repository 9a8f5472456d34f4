//! Editor colours.
//!
//! A single [`EditorTheme`] value is threaded through the highlighter
//! registry and the renderer; nothing here is global.

use ratatui::style::{Color, Style};

use crate::highlight::BackgroundMode;

/// Colours used when painting the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorTheme {
    /// Terminal background the theme was chosen for.
    pub mode: BackgroundMode,
    /// Text without a highlight span, and the base for every span.
    pub base: Style,
    /// Line-number gutter.
    pub gutter: Style,
    /// Background of the cursor's row when current-line emphasis is on.
    pub current_line_bg: Color,
    /// Bottom row (status message or command line).
    pub status: Style,
}

impl EditorTheme {
    /// Theme for dark terminals.
    pub fn dark() -> Self {
        let base = Style::default().fg(Color::White).bg(Color::Black);
        Self {
            mode: BackgroundMode::Dark,
            base,
            gutter: base.fg(Color::DarkGray),
            current_line_bg: Color::Indexed(18),
            status: base,
        }
    }

    /// Theme for light terminals.
    pub fn light() -> Self {
        let base = Style::default().fg(Color::Black).bg(Color::White);
        Self {
            mode: BackgroundMode::Light,
            base,
            gutter: base.fg(Color::Indexed(245)),
            current_line_bg: Color::Indexed(153),
            status: base,
        }
    }

    pub fn for_mode(mode: BackgroundMode) -> Self {
        match mode {
            BackgroundMode::Dark => Self::dark(),
            BackgroundMode::Light => Self::light(),
        }
    }

    /// `style` with the current-line background applied.
    pub fn emphasize(&self, style: Style) -> Style {
        style.bg(self.current_line_bg)
    }
}

impl Default for EditorTheme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_dark() {
        assert_eq!(EditorTheme::default().mode, BackgroundMode::Dark);
    }

    #[test]
    fn test_for_mode_light() {
        let theme = EditorTheme::for_mode(BackgroundMode::Light);
        assert_eq!(theme.base.bg, Some(Color::White));
    }

    #[test]
    fn test_emphasize_only_changes_background() {
        let theme = EditorTheme::dark();
        let style = Style::default().fg(Color::Red);
        let emphasized = theme.emphasize(style);
        assert_eq!(emphasized.fg, Some(Color::Red));
        assert_eq!(emphasized.bg, Some(Color::Indexed(18)));
    }

    #[test]
    fn test_gutter_shares_base_background() {
        let theme = EditorTheme::light();
        assert_eq!(theme.gutter.bg, theme.base.bg);
    }
}
