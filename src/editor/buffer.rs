use ropey::Rope;

/// Cells a tab occupies when no width is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Number of screen cells `ch` occupies.
pub const fn char_width(ch: char, tab_width: usize) -> usize {
    if ch == '\t' { tab_width } else { 1 }
}

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based logical column (char index, a tab counts once).
    pub col: usize,
    /// On-screen column after tab expansion.
    pub visual_col: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            visual_col: 0,
        }
    }

    /// The logical `(line, col)` pair.
    pub const fn position(&self) -> (usize, usize) {
        (self.line, self.col)
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What an edit touched.
///
/// Callers use this to decide how much derived state (highlighting) has to
/// be thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing in the text changed.
    Unchanged,
    /// Only the content of this line changed.
    Line(usize),
    /// Lines were split, joined or appended; indices after the edit shifted.
    Structure,
}

/// A line-structured text buffer backed by a rope.
///
/// The rope only recognises `\n` as a line break, so every other character
/// (tabs included) is one logical unit inside its line. The buffer always
/// holds at least one line.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    tab_width: usize,
}

impl EditorBuffer {
    /// Create a new buffer from a string; every `\n` starts a new line.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Create a buffer holding exactly the given lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self::from_text(&text)
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Use a different tab width (at least one cell).
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width.max(1);
        self.cursor.visual_col = self.visual_width(self.cursor.line, self.cursor.col);
        self
    }

    pub const fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line_idx).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        Some(s)
    }

    /// Length of a line in chars (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Iterate over all lines, without terminators.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).filter_map(|idx| self.line_at(idx))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Screen width of the first `col` characters of a line.
    ///
    /// Linear in `col`; lines are short enough for this to be fine on every
    /// vertical move.
    pub fn visual_width(&self, line_idx: usize, col: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return 0;
        }
        self.rope
            .line(line_idx)
            .chars()
            .take(col.min(self.line_len(line_idx)))
            .map(|ch| char_width(ch, self.tab_width))
            .sum()
    }

    /// Insert a character at the cursor position.
    ///
    /// A `'\n'` splits the line instead.
    pub fn insert_char(&mut self, ch: char) -> Change {
        if ch == '\n' {
            return self.split_line();
        }

        let mut change = Change::Line(self.cursor.line);
        if self.cursor.line >= self.line_count() {
            let end = self.rope.len_chars();
            self.rope.insert_char(end, '\n');
            self.cursor.line = self.line_count() - 1;
            self.cursor.col = 0;
            self.cursor.visual_col = 0;
            change = Change::Structure;
        }
        let len = self.line_len(self.cursor.line);
        if self.cursor.col > len {
            self.cursor.col = len;
            self.cursor.visual_col = self.visual_width(self.cursor.line, len);
        }

        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.col += 1;
        self.cursor.visual_col += char_width(ch, self.tab_width);
        change
    }

    /// Insert a tab at the cursor position.
    pub fn insert_tab(&mut self) -> Change {
        self.insert_char('\t')
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) -> Change {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.col = 0;
        self.cursor.visual_col = 0;
        Change::Structure
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// At the start of a line the line is joined onto the previous one.
    pub fn delete_back(&mut self) -> Change {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return Change::Unchanged;
        }

        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.col = prev_line_len;
            self.cursor.visual_col = self.visual_width(self.cursor.line, prev_line_len);
            Change::Structure
        } else {
            let char_idx = self.cursor_char_idx();
            let removed = self.rope.char(char_idx - 1);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.col -= 1;
            self.cursor.visual_col = self
                .cursor
                .visual_col
                .saturating_sub(char_width(removed, self.tab_width));
            Change::Line(self.cursor.line)
        }
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// At the end of a line the next line is joined onto this one.
    pub fn delete_forward(&mut self) -> Change {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col < line_len {
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx..=char_idx);
            Change::Line(self.cursor.line)
        } else if self.cursor.line + 1 < self.line_count() {
            let newline_idx = self.rope.line_to_char(self.cursor.line) + line_len;
            self.rope.remove(newline_idx..=newline_idx);
            Change::Structure
        } else {
            Change::Unchanged
        }
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.col = 0;
        self.cursor.visual_col = 0;
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.col = len;
        self.cursor.visual_col = self.visual_width(self.cursor.line, len);
    }

    /// Move cursor to a specific line and column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        self.cursor.col = col.min(self.line_len(self.cursor.line));
        self.cursor.visual_col = self.visual_width(self.cursor.line, self.cursor.col);
    }

    // --- Private helpers ---

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.line_count().saturating_sub(1));
        let col = self.cursor.col.min(self.line_len(line));
        self.rope.line_to_char(line) + col
    }

    fn char_at(&self, line_idx: usize, col: usize) -> Option<char> {
        if col >= self.line_len(line_idx) {
            return None;
        }
        Some(self.rope.line(line_idx).char(col))
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            let crossed = self.char_at(self.cursor.line, self.cursor.col).unwrap_or(' ');
            self.cursor.visual_col = self
                .cursor
                .visual_col
                .saturating_sub(char_width(crossed, self.tab_width));
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.move_end();
        }
    }

    fn move_right(&mut self) {
        if let Some(crossed) = self.char_at(self.cursor.line, self.cursor.col) {
            self.cursor.col += 1;
            self.cursor.visual_col += char_width(crossed, self.tab_width);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.move_home();
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.move_vertically(self.cursor.line - 1);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.move_vertically(self.cursor.line + 1);
        }
    }

    /// Keep the column on the target line, clamping to its length. A cursor
    /// at end of line lands at the end of a shorter or equal target.
    fn move_vertically(&mut self, target: usize) {
        let target_len = self.line_len(target);
        self.cursor.line = target;
        if self.cursor.col > target_len {
            self.cursor.col = target_len;
        }
        self.cursor.visual_col = self.visual_width(target, self.cursor.col);
    }
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("tab_width", &self.tab_width)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(buf: &EditorBuffer) -> (usize, usize) {
        buf.cursor().position()
    }

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_from_lines_has_no_phantom_trailing_line() {
        let buf = EditorBuffer::from_lines(["Line1", "Line2", "Line3"]);
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.lines().collect::<Vec<_>>(), vec!["Line1", "Line2", "Line3"]);
    }

    #[test]
    fn test_from_lines_empty_iterator_gives_one_line() {
        let buf = EditorBuffer::from_lines(Vec::<String>::new());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_len(0), 0);
    }

    #[test]
    fn test_carriage_return_and_form_feed_are_not_line_breaks() {
        let buf = EditorBuffer::from_text("a\rb\x0cc\nd");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_len(0), 5);
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = EditorBuffer::from_text("héllo\n\thi");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 3);
    }

    // --- Character insertion ---

    #[test]
    fn test_insert_char_at_start() {
        let mut buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.insert_char('H'), Change::Line(0));
        assert_eq!(buf.line_at(0), Some("Hhello".to_string()));
        assert_eq!(at(&buf), (0, 1));
    }

    #[test]
    fn test_insert_char_at_end() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('!');
        assert_eq!(buf.line_at(0), Some("hello!".to_string()));
        assert_eq!(at(&buf), (0, 6));
    }

    #[test]
    fn test_insert_char_in_middle() {
        let mut buf = EditorBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(at(&buf), (0, 2));
    }

    #[test]
    fn test_insert_multibyte_char_advances_one_column() {
        let mut buf = EditorBuffer::from_text("caf");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.line_at(0), Some("café".to_string()));
        assert_eq!(at(&buf), (0, 4));
        assert_eq!(buf.cursor().visual_col, 4);
    }

    #[test]
    fn test_insert_newline_char_splits() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        assert_eq!(buf.insert_char('\n'), Change::Structure);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(at(&buf), (1, 0));
    }

    // --- Tabs ---

    #[test]
    fn test_insert_tab_advances_visual_by_tab_width() {
        let mut buf = EditorBuffer::from_text("x");
        buf.insert_tab();
        assert_eq!(at(&buf), (0, 1));
        assert_eq!(buf.cursor().visual_col, 4);
        assert_eq!(buf.line_at(0), Some("\tx".to_string()));
    }

    #[test]
    fn test_backspace_over_tab_reverses_both_columns() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 1);
        buf.insert_tab();
        assert_eq!(buf.cursor().visual_col, 5);
        buf.delete_back();
        assert_eq!(at(&buf), (0, 1));
        assert_eq!(buf.cursor().visual_col, 1);
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_custom_tab_width() {
        let mut buf = EditorBuffer::empty().with_tab_width(8);
        buf.insert_tab();
        buf.insert_char('a');
        assert_eq!(buf.cursor().visual_col, 9);
    }

    #[test]
    fn test_zero_tab_width_is_clamped() {
        let buf = EditorBuffer::empty().with_tab_width(0);
        assert_eq!(buf.tab_width(), 1);
    }

    #[test]
    fn test_move_across_tab_changes_visual_by_tab_width() {
        let mut buf = EditorBuffer::from_text("\t\tx");
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor().visual_col, 4);
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor().visual_col, 8);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor().visual_col, 4);
    }

    #[test]
    fn test_move_end_scans_tabs() {
        let mut buf = EditorBuffer::from_text("a\tb\t");
        buf.move_end();
        assert_eq!(at(&buf), (0, 4));
        assert_eq!(buf.cursor().visual_col, 10);
    }

    #[test]
    fn test_vertical_move_rescans_tabs() {
        let mut buf = EditorBuffer::from_text("abcdef\n\t\tcd");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 3));
        assert_eq!(buf.cursor().visual_col, 9);
    }

    // --- Line splitting (Enter) ---

    #[test]
    fn test_split_line_at_end() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert_eq!(buf.split_line(), Change::Structure);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(String::new()));
        assert_eq!(at(&buf), (1, 0));
    }

    #[test]
    fn test_split_line_at_start() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.split_line();
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.line_at(1), Some("hello".to_string()));
        assert_eq!(at(&buf), (1, 0));
    }

    #[test]
    fn test_split_line_in_middle_resets_visual_column() {
        let mut buf = EditorBuffer::from_text("\thello world");
        buf.move_to(0, 6);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("\thello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor().visual_col, 0);
    }

    // --- Backspace deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.delete_back(), Change::Unchanged);
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_removes_char() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 5);
        assert_eq!(buf.delete_back(), Change::Line(0));
        assert_eq!(buf.line_at(0), Some("hell".to_string()));
        assert_eq!(at(&buf), (0, 4));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("he\tllo\nworld");
        buf.move_to(1, 0);
        assert_eq!(buf.delete_back(), Change::Structure);
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("he\tlloworld".to_string()));
        assert_eq!(at(&buf), (0, 6));
        assert_eq!(buf.cursor().visual_col, 9);
    }

    // --- Forward deletion (Delete key) ---

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        assert_eq!(buf.delete_forward(), Change::Unchanged);
    }

    #[test]
    fn test_delete_forward_removes_char() {
        let mut buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.delete_forward(), Change::Line(0));
        assert_eq!(buf.line_at(0), Some("ello".to_string()));
        assert_eq!(at(&buf), (0, 0));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = EditorBuffer::from_text("hello\nworld\n!");
        buf.move_to(0, 5);
        assert_eq!(buf.delete_forward(), Change::Structure);
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(buf.line_at(1), Some("!".to_string()));
        assert_eq!(at(&buf), (0, 5));
    }

    // --- Cursor movement: left/right ---

    #[test]
    fn test_move_left_at_start_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_cursor(Direction::Left);
        assert_eq!(at(&buf), (0, 0));
    }

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let mut buf = EditorBuffer::from_text("hel\tlo\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(at(&buf), (0, 6));
        assert_eq!(buf.cursor().visual_col, 9);
    }

    #[test]
    fn test_move_right_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.move_cursor(Direction::Right);
        assert_eq!(at(&buf), (0, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        buf.move_cursor(Direction::Right);
        assert_eq!(at(&buf), (1, 0));
        assert_eq!(buf.cursor().visual_col, 0);
    }

    // --- Cursor movement: up/down ---

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_cursor(Direction::Up);
        assert_eq!(at(&buf), (0, 0));
    }

    #[test]
    fn test_move_down_at_last_line_is_noop() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 0));
    }

    #[test]
    fn test_move_up_preserves_column() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 3);
        buf.move_cursor(Direction::Up);
        assert_eq!(at(&buf), (0, 3));
    }

    #[test]
    fn test_move_down_clamps_to_shorter_line() {
        let mut buf = EditorBuffer::from_text("hello\nhi");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 2));
    }

    #[test]
    fn test_end_of_line_is_sticky_on_vertical_moves() {
        let mut buf = EditorBuffer::from_text("abc\nabcdefgh\nab");
        buf.move_end();
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 3));
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (2, 2));
    }

    #[test]
    fn test_end_of_line_keeps_column_on_longer_line() {
        let mut buf = EditorBuffer::from_text("abc\nabcdefgh");
        buf.move_end();
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 3));
        assert_eq!(buf.cursor().visual_col, 3);
    }

    #[test]
    fn test_end_of_line_lands_at_end_of_equal_line() {
        let mut buf = EditorBuffer::from_text("abc\nxyz");
        buf.move_end();
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 3));
    }

    #[test]
    fn test_column_zero_stays_zero_across_lines() {
        let mut buf = EditorBuffer::from_text("\nhello");
        buf.move_cursor(Direction::Down);
        assert_eq!(at(&buf), (1, 0));
    }

    // --- Home / End / move_to ---

    #[test]
    fn test_move_home() {
        let mut buf = EditorBuffer::from_text("\thello");
        buf.move_to(0, 3);
        buf.move_home();
        assert_eq!(buf.cursor(), Cursor::new());
    }

    #[test]
    fn test_move_to_clamps_line_and_col() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(100, 100);
        assert_eq!(at(&buf), (0, 5));
    }

    // --- Complex editing sequences ---

    #[test]
    fn test_type_then_backspace_then_type() {
        let mut buf = EditorBuffer::empty();
        for ch in "hel".chars() {
            buf.insert_char(ch);
        }
        buf.delete_back();
        buf.insert_char('l');
        buf.insert_char('p');
        assert_eq!(buf.line_at(0), Some("help".to_string()));
    }

    #[test]
    fn test_split_and_rejoin() {
        let mut buf = EditorBuffer::from_text("helloworld");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));

        buf.delete_back();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some("helloworld".to_string()));
        assert_eq!(at(&buf), (0, 5));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Insert(char),
            Tab,
            Backspace,
            Delete,
            Split,
            Move(Direction),
            Home,
            End,
        }

        fn apply(buf: &mut EditorBuffer, op: &Op) {
            match op {
                Op::Insert(ch) => {
                    buf.insert_char(*ch);
                }
                Op::Tab => {
                    buf.insert_tab();
                }
                Op::Backspace => {
                    buf.delete_back();
                }
                Op::Delete => {
                    buf.delete_forward();
                }
                Op::Split => {
                    buf.split_line();
                }
                Op::Move(direction) => buf.move_cursor(*direction),
                Op::Home => buf.move_home(),
                Op::End => buf.move_end(),
            }
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                prop::char::range('a', 'z').prop_map(Op::Insert),
                Just(Op::Tab),
                Just(Op::Backspace),
                Just(Op::Delete),
                Just(Op::Split),
                Just(Op::Move(Direction::Up)),
                Just(Op::Move(Direction::Down)),
                Just(Op::Move(Direction::Left)),
                Just(Op::Move(Direction::Right)),
                Just(Op::Home),
                Just(Op::End),
            ]
        }

        proptest! {
            #[test]
            fn cursor_stays_in_bounds_and_visual_column_matches(
                text in "[a-c\t ]{0,8}(\n[a-c\t ]{0,8}){0,4}",
                ops in prop::collection::vec(op(), 0..60),
            ) {
                let mut buf = EditorBuffer::from_text(&text);
                for op in &ops {
                    apply(&mut buf, op);
                    let c = buf.cursor();
                    prop_assert!(buf.line_count() >= 1);
                    prop_assert!(c.line < buf.line_count());
                    prop_assert!(c.col <= buf.line_len(c.line));
                    prop_assert_eq!(c.visual_col, buf.visual_width(c.line, c.col));
                }
            }

            #[test]
            fn inserts_then_backspaces_round_trip(
                text in "[a-z\t ]{0,12}(\n[a-z\t ]{0,12}){0,4}",
                line in 0usize..6,
                col in 0usize..14,
                typed in "[a-z\t ]{0,10}",
            ) {
                let mut buf = EditorBuffer::from_text(&text);
                buf.move_to(line, col);
                let before = buf.cursor();

                for ch in typed.chars() {
                    buf.insert_char(ch);
                }
                for _ in typed.chars() {
                    buf.delete_back();
                }

                prop_assert_eq!(buf.text(), text);
                prop_assert_eq!(buf.cursor(), before);
            }

            #[test]
            fn split_then_backspace_restores_line(
                text in "[a-z\t]{0,16}",
                col in 0usize..18,
            ) {
                let mut buf = EditorBuffer::from_text(&text);
                buf.move_to(0, col);
                let before = buf.cursor();

                buf.split_line();
                buf.delete_back();

                prop_assert_eq!(buf.text(), text);
                prop_assert_eq!(buf.cursor(), before);
            }
        }
    }
}
