//! Editor state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions
//! - [`App::run`]: Main event loop with rendering

mod command;
mod event_loop;
mod input;
mod model;
mod update;

pub use command::Command;
pub use model::{CommandLine, Mode, Model};
pub use update::{Message, update};

use crate::config::EditorConfig;

/// Owns the startup options and runs the event loop.
pub struct App {
    /// `path[:line[:col]]` to open at startup
    file: Option<String>,
    config: EditorConfig,
}

impl App {
    /// Create an editor, optionally opening `file` at startup.
    pub fn new(file: Option<String>) -> Self {
        Self {
            file,
            config: EditorConfig::default(),
        }
    }

    /// Use the given settings instead of the defaults.
    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }
}
