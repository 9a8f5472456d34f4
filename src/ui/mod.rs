//! Terminal UI components.
//!
//! - [`viewport`]: Scroll offsets and paging
//! - [`style`]: Theme colours
//! - [`render`]: Paints the model into a ratatui frame

pub mod style;
pub mod viewport;

mod render;

pub use render::{line_number_width, render};
