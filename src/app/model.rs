use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::editor::{Change, EditorBuffer, FileLocation, read_lines, write_lines};
use crate::error::{EditorError, Result};
use crate::highlight::{HighlightCache, HighlighterRegistry};
use crate::ui::line_number_width;
use crate::ui::viewport::Viewport;

/// The `:`-prefixed text being typed in command mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn new() -> Self {
        Self(String::from(":"))
    }

    pub fn push(&mut self, ch: char) {
        self.0.push(ch);
    }

    /// Remove the last character, never the leading `:`.
    pub fn pop(&mut self) -> bool {
        if self.0.len() > 1 {
            self.0.pop();
            true
        } else {
            false
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CommandLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Editing mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys edit the buffer.
    #[default]
    Insert,
    /// Waiting for `:`; `line` is set once a command is being typed.
    Command { line: Option<CommandLine> },
}

impl Mode {
    pub const fn is_command(&self) -> bool {
        matches!(self, Self::Command { .. })
    }

    pub fn command_line(&self) -> Option<&CommandLine> {
        match self {
            Self::Command { line } => line.as_ref(),
            Self::Insert => None,
        }
    }
}

/// The complete editor state.
///
/// All state lives here; `update` is the only thing that changes it.
pub struct Model {
    /// The text being edited
    pub buffer: EditorBuffer,
    /// Scroll offsets of the text area
    pub viewport: Viewport,
    /// Strategy selection for the current file type
    pub highlighters: HighlighterRegistry,
    /// Per-line highlighting around the viewport
    pub highlight_cache: HighlightCache,
    pub mode: Mode,
    /// One-shot message for the bottom row
    pub status: Option<String>,
    pub config: EditorConfig,
    /// File the buffer was loaded from or last saved to
    pub file_path: Option<PathBuf>,
    /// Set by every state change; cleared after a frame is drawn
    pub needs_redraw: bool,
    pub should_quit: bool,
    /// Terminal size (width, height)
    screen: (u16, u16),
}

impl Model {
    /// Create a model with the default highlighter set.
    pub fn new(config: EditorConfig, size: (u16, u16)) -> Self {
        let registry =
            HighlighterRegistry::with_defaults(config.theme.base, config.theme.mode);
        Self::with_registry(config, size, registry)
    }

    /// Create a model with a caller-supplied highlighter registry.
    pub fn with_registry(
        config: EditorConfig,
        size: (u16, u16),
        highlighters: HighlighterRegistry,
    ) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::empty().with_tab_width(config.tab_width),
            viewport: Viewport::new(size.0, size.1),
            highlighters,
            highlight_cache: HighlightCache::new(
                config.highlight_retention,
                config.highlight_capacity,
            ),
            mode: Mode::Insert,
            status: None,
            config,
            file_path: None,
            needs_redraw: true,
            should_quit: false,
            screen: size,
        };
        model.adjust_offsets();
        model
    }

    pub const fn screen_size(&self) -> (u16, u16) {
        self.screen
    }

    /// Columns taken by line numbers plus their separator (0 when hidden).
    pub fn gutter_width(&self) -> u16 {
        if self.config.show_line_numbers {
            line_number_width(self.buffer.line_count()) + 1
        } else {
            0
        }
    }

    /// Columns left for text after the gutter.
    pub fn text_width(&self) -> u16 {
        self.screen.0.saturating_sub(self.gutter_width())
    }

    /// Load `path[:line[:col]]` into the buffer.
    ///
    /// The file is read completely first; on error nothing changes.
    pub fn load_file(&mut self, location: &str) -> Result<()> {
        self.load_location(FileLocation::parse(location))
    }

    /// Reload the current file (`:e` without an argument).
    pub fn reload(&mut self) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .ok_or(EditorError::NoFilename { command: "e" })?;
        self.load_location(FileLocation {
            path,
            line: None,
            col: None,
        })
    }

    fn load_location(&mut self, location: FileLocation) -> Result<()> {
        let lines = read_lines(&location.path)?;

        self.buffer = EditorBuffer::from_lines(&lines).with_tab_width(self.config.tab_width);
        if let Some(line) = location.line.filter(|l| *l < self.buffer.line_count()) {
            let col = location
                .col
                .filter(|c| *c <= self.buffer.line_len(line))
                .unwrap_or(0);
            self.buffer.move_to(line, col);
        }

        let highlighted = self.highlighters.set_path(&location.path);
        self.highlight_cache.clear();
        self.viewport = Viewport::new(self.text_width(), self.screen.1);
        tracing::info!(
            path = %location.path.display(),
            lines = self.buffer.line_count(),
            highlighted,
            "file loaded"
        );
        self.file_path = Some(location.path);
        self.needs_redraw = true;
        self.adjust_offsets();
        Ok(())
    }

    /// Save to `path`, or to the current file when `None`.
    ///
    /// Saving under a new name makes it the current file.
    pub fn save_file(&mut self, path: Option<PathBuf>) -> Result<()> {
        let save_as = path.is_some();
        let target = path
            .or_else(|| self.file_path.clone())
            .ok_or(EditorError::NoFilename { command: "w" })?;

        write_lines(&target, self.buffer.lines())?;
        tracing::info!(path = %target.display(), lines = self.buffer.line_count(), "file saved");

        if save_as && self.file_path.as_ref() != Some(&target) {
            self.highlighters.set_path(&target);
            self.highlight_cache.clear();
        }
        self.show_status(format!("File saved: {}", target.display()));
        self.file_path = Some(target);
        Ok(())
    }

    /// Show a message on the bottom row for one frame.
    pub fn show_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.needs_redraw = true;
    }

    pub fn toggle_line_numbers(&mut self) {
        self.config.show_line_numbers = !self.config.show_line_numbers;
        self.needs_redraw = true;
    }

    pub fn toggle_current_line(&mut self) {
        self.config.highlight_current_line = !self.config.highlight_current_line;
        self.needs_redraw = true;
    }

    /// Invalidate cached highlighting after an edit. Line indices shift on
    /// structural edits, so those drop the whole cache.
    pub fn apply_change(&mut self, change: Change) {
        match change {
            Change::Unchanged => {}
            Change::Line(line) => self.highlight_cache.clear_line(line),
            Change::Structure => self.highlight_cache.clear(),
        }
    }

    /// Highlight any uncached lines around the viewport.
    pub fn refresh_highlights(&mut self) -> usize {
        let _scope = crate::perf::scope("highlight.cache.update");
        let computed = self.highlight_cache.update(
            self.viewport.offset_y(),
            usize::from(self.screen.1),
            &self.buffer,
            &self.highlighters,
        );
        if computed > 0 {
            tracing::debug!(computed, cached = self.highlight_cache.len(), "highlights refreshed");
        }
        computed
    }

    /// Keep the cursor on screen, flagging a redraw if anything scrolled.
    pub fn adjust_offsets(&mut self) {
        self.viewport.resize(self.text_width(), self.screen.1);
        let cursor = self.buffer.cursor();
        if self.viewport.adjust(cursor.visual_col, cursor.line) {
            self.needs_redraw = true;
        }
    }

    pub fn page_up(&mut self) {
        if let Some(row) = self.viewport.page_up() {
            let col = self.buffer.cursor().col;
            self.buffer.move_to(row, col);
        }
    }

    pub fn page_down(&mut self) {
        if let Some(row) = self.viewport.page_down(self.buffer.line_count()) {
            let col = self.buffer.cursor().col;
            self.buffer.move_to(row, col);
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = (width, height);
        self.needs_redraw = true;
    }

    /// Take the status message so it is shown only once.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    /// Called by the event loop after a frame is flushed.
    pub const fn mark_drawn(&mut self) {
        self.needs_redraw = false;
    }
}

impl Default for Model {
    /// A model without highlighting, used as a placeholder while `update`
    /// owns the real one.
    fn default() -> Self {
        Self::with_registry(EditorConfig::default(), (80, 24), HighlighterRegistry::default())
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffer", &self.buffer)
            .field("viewport", &self.viewport)
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("file_path", &self.file_path)
            .field("needs_redraw", &self.needs_redraw)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}
