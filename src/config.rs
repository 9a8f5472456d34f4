//! Editor settings.
//!
//! Defaults can be overridden through `TEDIT_*` environment variables.
//! Unparseable values are ignored so a typo never keeps the editor from
//! starting.

use crate::editor::DEFAULT_TAB_WIDTH;
use crate::highlight::{BackgroundMode, DEFAULT_CAPACITY, DEFAULT_RETENTION};
use crate::ui::style::EditorTheme;

/// How the colour theme is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Detect from `COLORFGBG`.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub tab_width: usize,
    pub show_line_numbers: bool,
    pub highlight_current_line: bool,
    /// Screens of lines kept highlighted on each side of the viewport.
    pub highlight_retention: usize,
    /// Cached line count above which far-away entries are evicted.
    pub highlight_capacity: usize,
    pub theme: EditorTheme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            show_line_numbers: true,
            highlight_current_line: true,
            highlight_retention: DEFAULT_RETENTION,
            highlight_capacity: DEFAULT_CAPACITY,
            theme: EditorTheme::default(),
        }
    }
}

impl EditorConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Defaults overridden by the given `(name, value)` pairs.
    ///
    /// Recognised: `TEDIT_TAB_WIDTH`, `TEDIT_LINE_NUMBERS`,
    /// `TEDIT_HIGHLIGHT_LINE`, `TEDIT_HL_RETENTION`, `TEDIT_HL_CAPACITY`,
    /// `TEDIT_THEME` (`auto`, `light`, `dark`) and `COLORFGBG`.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        let mut theme_mode = ThemeMode::Auto;
        let mut colorfgbg = None;

        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                "TEDIT_TAB_WIDTH" => {
                    if let Some(width) = parse_count(value).filter(|w| *w > 0) {
                        config.tab_width = width;
                    }
                }
                "TEDIT_LINE_NUMBERS" => {
                    if let Some(flag) = parse_bool(value) {
                        config.show_line_numbers = flag;
                    }
                }
                "TEDIT_HIGHLIGHT_LINE" => {
                    if let Some(flag) = parse_bool(value) {
                        config.highlight_current_line = flag;
                    }
                }
                "TEDIT_HL_RETENTION" => {
                    if let Some(retention) = parse_count(value) {
                        config.highlight_retention = retention;
                    }
                }
                "TEDIT_HL_CAPACITY" => {
                    if let Some(capacity) = parse_count(value) {
                        config.highlight_capacity = capacity;
                    }
                }
                "TEDIT_THEME" => {
                    if let Some(mode) = ThemeMode::parse(value) {
                        theme_mode = mode;
                    }
                }
                "COLORFGBG" => colorfgbg = Some(value.to_string()),
                _ => {}
            }
        }

        let mode = match theme_mode {
            ThemeMode::Auto => BackgroundMode::from_colorfgbg(colorfgbg.as_deref()),
            ThemeMode::Light => BackgroundMode::Light,
            ThemeMode::Dark => BackgroundMode::Dark,
        };
        config.theme = EditorTheme::for_mode(mode);
        config
    }
}

fn parse_count(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
