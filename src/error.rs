//! Error types shared by the editor core.
//!
//! File and command errors never abort the editor: the session turns them
//! into a one-shot status message. Only [`EditorError::TerminalInit`] is
//! fatal.

use std::io;
use std::path::PathBuf;

/// Result alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Errors that can occur while editing.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Error opening file '{path}': {source}", path = .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error reading file '{path}': {source}", path = .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error writing to file '{path}': {source}", path = .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No filename specified for :{command} command")]
    NoFilename { command: &'static str },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(#[source] io::Error),
}
