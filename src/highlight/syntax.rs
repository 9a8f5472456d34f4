//! syntect-backed highlighting strategy.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::{LineHighlight, LineHighlighter, StyledSpan};

/// Terminal background brightness, used to pick a theme and keep
/// foreground colours readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    #[default]
    Dark,
    Light,
}

impl BackgroundMode {
    /// Parse a `COLORFGBG` value such as `15;0`. Defaults to dark.
    pub fn from_colorfgbg(colorfgbg: Option<&str>) -> Self {
        let Some(value) = colorfgbg else {
            return Self::Dark;
        };
        let bg_str = value.rsplit(';').next().unwrap_or(value);
        let Ok(bg) = bg_str.parse::<u8>() else {
            return Self::Dark;
        };

        if bg >= 7 { Self::Light } else { Self::Dark }
    }
}

/// Highlights single lines with a syntect grammar.
///
/// Each line is parsed from a fresh state, so constructs spanning lines
/// (block comments, multi-line strings) are only coloured on the line where
/// they open.
pub struct SyntectHighlighter {
    syntax: &'static SyntaxReference,
    base: Style,
    mode: BackgroundMode,
    truecolor: bool,
}

impl SyntectHighlighter {
    pub const fn new(
        syntax: &'static SyntaxReference,
        base: Style,
        mode: BackgroundMode,
        truecolor: bool,
    ) -> Self {
        Self {
            syntax,
            base,
            mode,
            truecolor,
        }
    }

    /// Find a grammar by file extension.
    pub fn for_extension(ext: &str, base: Style, mode: BackgroundMode) -> Option<Self> {
        syntax_set()
            .find_syntax_by_extension(ext)
            .map(|syntax| Self::new(syntax, base, mode, supports_truecolor()))
    }

    fn style_for(&self, style: syntect::highlighting::Style) -> Style {
        let fg = adjust_fg_for_background(
            (style.foreground.r, style.foreground.g, style.foreground.b),
            self.mode,
        );
        let mut out = self.base.fg(terminal_color(fg, self.truecolor));
        if style.font_style.contains(FontStyle::BOLD) {
            out = out.add_modifier(Modifier::BOLD);
        }
        if style.font_style.contains(FontStyle::ITALIC) {
            out = out.add_modifier(Modifier::ITALIC);
        }
        if style.font_style.contains(FontStyle::UNDERLINE) {
            out = out.add_modifier(Modifier::UNDERLINED);
        }
        out
    }
}

impl LineHighlighter for SyntectHighlighter {
    fn highlight_line(&self, line: &str) -> LineHighlight {
        let mut highlighter = HighlightLines::new(self.syntax, theme(self.mode));
        // The bundled grammars expect newline-terminated input.
        let input = format!("{line}\n");
        let ranges = match highlighter.highlight_line(&input, syntax_set()) {
            Ok(ranges) => ranges,
            Err(err) => {
                tracing::debug!(error = %err, "syntect failed on line");
                return LineHighlight::empty();
            }
        };

        let line_chars = line.chars().count();
        let mut spans = Vec::with_capacity(ranges.len());
        let mut offset = 0;
        for (style, text) in ranges {
            let start = offset;
            offset += text.chars().count();
            let end = offset.min(line_chars);
            if start < end {
                spans.push(StyledSpan::new(start, end, self.style_for(style)));
            }
        }
        LineHighlight::new(spans)
    }
}

pub(super) fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme(mode: BackgroundMode) -> &'static Theme {
    static DARK: OnceLock<Theme> = OnceLock::new();
    static LIGHT: OnceLock<Theme> = OnceLock::new();
    let cell = match mode {
        BackgroundMode::Dark => &DARK,
        BackgroundMode::Light => &LIGHT,
    };
    cell.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        let preferred = match mode {
            BackgroundMode::Dark => [
                "Monokai Extended",
                "Monokai Extended Bright",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
            BackgroundMode::Light => [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

/// Darken bright foregrounds on light backgrounds so they stay legible.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
pub fn adjust_fg_for_background(color: (u8, u8, u8), mode: BackgroundMode) -> (u8, u8, u8) {
    match mode {
        BackgroundMode::Dark => color,
        BackgroundMode::Light => {
            let (r, g, b) = color;
            if luma(r, g, b) < 155.0 {
                return color;
            }
            let scale = |v: u8| (f32::from(v) * 0.42).round() as u8;
            (scale(r), scale(g), scale(b))
        }
    }
}

#[allow(clippy::suboptimal_flops)]
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)
}

pub(super) fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("TEDIT_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

fn terminal_color((r, g, b): (u8, u8, u8), truecolor: bool) -> Color {
    if truecolor {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(rgb_to_xterm_256(r, g, b))
    }
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
