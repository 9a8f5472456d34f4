//! Text buffer, cursor model and file I/O.
//!
//! The buffer is rope-backed and reports what each edit touched via
//! [`Change`], which the app layer uses to invalidate cached highlighting.

mod buffer;
mod file;

pub use buffer::{Change, Cursor, DEFAULT_TAB_WIDTH, Direction, EditorBuffer, char_width};
pub use file::{FileLocation, read_lines, write_lines};
