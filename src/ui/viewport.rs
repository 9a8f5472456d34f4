//! Scroll offsets for the text area.
//!
//! The [`Viewport`] keeps the cursor visible and computes paging targets.
//! The bottom screen row is always reserved for the status/command line, so
//! only `height - 1` rows show text.

/// The visible window onto the buffer.
///
/// `width` is the text-area width (screen width minus the gutter) and
/// `height` is the full screen height, status row included.
///
/// # Example
///
/// ```
/// use tedit::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24);
/// vp.adjust(0, 30);
/// assert_eq!(vp.offset_y(), 8);
/// assert_eq!(vp.visible_rows(), 23);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset_x: usize,
    offset_y: usize,
}

impl Viewport {
    /// Create a viewport scrolled to the top-left.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            offset_x: 0,
            offset_y: 0,
        }
    }

    /// First visible visual column.
    pub const fn offset_x(&self) -> usize {
        self.offset_x
    }

    /// First visible buffer row.
    pub const fn offset_y(&self) -> usize {
        self.offset_y
    }

    /// Rows available for text (never less than one).
    pub const fn visible_rows(&self) -> usize {
        let rows = self.height.saturating_sub(1) as usize;
        if rows == 0 { 1 } else { rows }
    }

    /// Resize the viewport. Offsets are fixed up by the next [`adjust`].
    ///
    /// [`adjust`]: Viewport::adjust
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Scroll so that `(visual_col, row)` is visible. Returns whether either
    /// offset changed.
    pub fn adjust(&mut self, visual_col: usize, row: usize) -> bool {
        let before = (self.offset_x, self.offset_y);
        let width = usize::from(self.width.max(1));

        if visual_col < self.offset_x {
            self.offset_x = visual_col;
        } else if visual_col >= self.offset_x + width {
            self.offset_x = visual_col + 1 - width;
        }

        let rows = self.visible_rows();
        if row < self.offset_y {
            self.offset_y = row;
        } else if row >= self.offset_y + rows {
            self.offset_y = row + 1 - rows;
        }

        before != (self.offset_x, self.offset_y)
    }

    /// Scroll up one page (`height - 1` rows). Returns the row the cursor
    /// should move to (the new top row), or `None` when already at the top.
    pub const fn page_up(&mut self) -> Option<usize> {
        if self.offset_y == 0 {
            return None;
        }
        self.offset_y = self.offset_y.saturating_sub(self.visible_rows());
        Some(self.offset_y)
    }

    /// Scroll down one page, keeping the top row inside the buffer. Returns
    /// the row the cursor should move to (the last visible text row), or
    /// `None` when the top row is already the last line.
    pub fn page_down(&mut self, line_count: usize) -> Option<usize> {
        let last = line_count.saturating_sub(1);
        if self.offset_y >= last {
            return None;
        }
        let rows = self.visible_rows();
        self.offset_y = (self.offset_y + rows).min(last);
        Some((self.offset_y + rows - 1).min(last))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
