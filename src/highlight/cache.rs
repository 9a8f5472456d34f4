//! Viewport-scoped memo of per-line highlighting.

use std::collections::HashMap;
use std::ops::Range;

use super::{HighlighterRegistry, LineHighlight};
use crate::editor::EditorBuffer;

/// Screens of lines kept highlighted above and below the viewport.
pub const DEFAULT_RETENTION: usize = 2;

/// Entry count above which lines outside the window are evicted.
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Cached highlighting keyed by line index.
///
/// Entries are filled lazily for the window around the viewport and must be
/// invalidated by the caller whenever the text they were computed from
/// changes.
#[derive(Debug)]
pub struct HighlightCache {
    entries: HashMap<usize, LineHighlight>,
    retention: usize,
    capacity: usize,
    empty: LineHighlight,
}

impl HighlightCache {
    pub fn new(retention: usize, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            retention,
            capacity,
            empty: LineHighlight::empty(),
        }
    }

    /// Line range kept highlighted for a viewport at `offset_y` of `height`
    /// rows.
    pub const fn window(&self, offset_y: usize, height: usize, line_count: usize) -> Range<usize> {
        let reach = self.retention.saturating_mul(height);
        let start = offset_y.saturating_sub(reach);
        let end = offset_y.saturating_add(reach);
        let end = if end < line_count { end } else { line_count };
        start..end
    }

    /// Highlight every uncached line in the window. Returns how many lines
    /// were computed.
    pub fn update(
        &mut self,
        offset_y: usize,
        height: usize,
        buffer: &EditorBuffer,
        registry: &HighlighterRegistry,
    ) -> usize {
        if !registry.is_active() {
            return 0;
        }
        let window = self.window(offset_y, height, buffer.line_count());
        let mut computed = 0;
        for idx in window.clone() {
            if self.entries.contains_key(&idx) {
                continue;
            }
            if let Some(line) = buffer.line_at(idx) {
                self.entries.insert(idx, registry.highlight_line(&line));
                computed += 1;
            }
        }

        if self.entries.len() > self.capacity {
            let before = self.entries.len();
            self.entries.retain(|idx, _| window.contains(idx));
            tracing::debug!(evicted = before - self.entries.len(), "highlight cache evicted");
        }
        computed
    }

    pub fn exists(&self, line: usize) -> bool {
        self.entries.contains_key(&line)
    }

    /// Highlighting for `line`, or an empty highlight when not cached.
    pub fn get(&self, line: usize) -> &LineHighlight {
        self.entries.get(&line).unwrap_or(&self.empty)
    }

    pub fn update_line(&mut self, line: usize, highlight: LineHighlight) {
        self.entries.insert(line, highlight);
    }

    pub fn clear_line(&mut self, line: usize) {
        self.entries.remove(&line);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HighlightCache {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION, DEFAULT_CAPACITY)
    }
}
