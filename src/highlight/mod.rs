//! Per-line syntax highlighting.
//!
//! A [`LineHighlighter`] turns one line of text into styled spans. The
//! [`HighlighterRegistry`] picks a strategy from the file extension, and the
//! [`HighlightCache`] memoizes results for the lines around the viewport.

mod cache;
mod syntax;

use std::collections::HashMap;
use std::path::Path;

use ratatui::style::Style;

pub use cache::{DEFAULT_CAPACITY, DEFAULT_RETENTION, HighlightCache};
pub use syntax::{BackgroundMode, SyntectHighlighter, adjust_fg_for_background};

/// A style applied to the character range `start..end` of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    pub start: usize,
    pub end: usize,
    pub style: Style,
}

impl StyledSpan {
    pub const fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }
}

/// Highlighting for a single line: sorted, non-overlapping spans over
/// character offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlight {
    spans: Vec<StyledSpan>,
}

impl LineHighlight {
    /// Build from spans, dropping empty ones and sorting by start.
    pub fn new(mut spans: Vec<StyledSpan>) -> Self {
        spans.retain(|span| span.start < span.end);
        spans.sort_by_key(|span| span.start);
        Self { spans }
    }

    /// No spans; everything renders in the base style.
    pub const fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Style of the character at `offset`, if a span covers it.
    pub fn style_at(&self, offset: usize) -> Option<Style> {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans
            .get(idx)
            .filter(|span| span.start <= offset)
            .map(|span| span.style)
    }
}

/// A strategy that highlights one line in isolation.
pub trait LineHighlighter {
    fn highlight_line(&self, line: &str) -> LineHighlight;
}

type Factory = Box<dyn Fn(Style) -> Box<dyn LineHighlighter>>;

/// Maps file extensions to highlighting strategies.
///
/// Holds the strategy for the current file; when no strategy matches,
/// [`HighlighterRegistry::highlight_line`] returns an empty highlight.
pub struct HighlighterRegistry {
    factories: HashMap<String, Factory>,
    base: Style,
    current: Option<Box<dyn LineHighlighter>>,
}

impl HighlighterRegistry {
    /// An empty registry; no file type is highlighted.
    pub fn new(base: Style) -> Self {
        Self {
            factories: HashMap::new(),
            base,
            current: None,
        }
    }

    /// A registry with a syntect strategy for every extension syntect knows.
    pub fn with_defaults(base: Style, mode: BackgroundMode) -> Self {
        let _scope = crate::perf::scope("highlight.registry.defaults");
        let mut registry = Self::new(base);
        let truecolor = syntax::supports_truecolor();
        for syntax in syntax::syntax_set().syntaxes() {
            for ext in &syntax.file_extensions {
                let key = normalize(ext);
                if registry.factories.contains_key(&key) {
                    continue;
                }
                registry.factories.insert(
                    key,
                    Box::new(move |base| -> Box<dyn LineHighlighter> {
                        Box::new(SyntectHighlighter::new(syntax, base, mode, truecolor))
                    }),
                );
            }
        }
        tracing::debug!(extensions = registry.factories.len(), "highlighters registered");
        registry
    }

    /// Register (or replace) the strategy for an extension.
    pub fn register<F>(&mut self, ext: &str, factory: F)
    where
        F: Fn(Style) -> Box<dyn LineHighlighter> + 'static,
    {
        self.factories.insert(normalize(ext), Box::new(factory));
    }

    /// Select the strategy for `ext`. Returns whether one matched.
    pub fn set_file_extension(&mut self, ext: &str) -> bool {
        self.current = self
            .factories
            .get(&normalize(ext))
            .map(|factory| factory(self.base));
        self.current.is_some()
    }

    /// Select the strategy for a path, by extension and then by file name
    /// (for names like `Makefile`).
    pub fn set_path(&mut self, path: &Path) -> bool {
        let by_ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.set_file_extension(ext));
        if by_ext {
            return true;
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.set_file_extension(name))
    }

    /// Whether a strategy is selected.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn highlight_line(&self, line: &str) -> LineHighlight {
        self.current
            .as_ref()
            .map_or_else(LineHighlight::empty, |h| h.highlight_line(line))
    }
}

impl std::fmt::Debug for HighlighterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlighterRegistry")
            .field("extensions", &self.factories.len())
            .field("base", &self.base)
            .field("active", &self.current.is_some())
            .finish()
    }
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

fn normalize(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
