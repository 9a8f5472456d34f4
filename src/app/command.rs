//! The `:` command language.
//!
//! ```text
//! :e [path[:line[:col]]]   edit a file, or reload the current one
//! :w [path]                save, optionally under a new name
//! :q                       quit
//! :ln                      toggle line numbers
//! :hl                      toggle current-line emphasis
//! ```
//!
//! A path may be wrapped in double quotes; spaces inside are kept either way.

use std::path::PathBuf;

use crate::app::Model;
use crate::error::{EditorError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Option<String>),
    Write(Option<String>),
    Quit,
    ToggleLineNumbers,
    ToggleCurrentLine,
}

impl Command {
    /// Parse a command line including its leading `:`.
    pub fn parse(input: &str) -> Result<Self> {
        let unknown = || EditorError::UnknownCommand(input.to_string());
        let body = input.strip_prefix(':').ok_or_else(unknown)?.trim();
        let (name, rest) = body
            .split_once(char::is_whitespace)
            .map_or((body, ""), |(name, rest)| (name, rest.trim()));
        let argument = parse_argument(rest);

        match name {
            "e" => Ok(Self::Edit(argument)),
            "w" => Ok(Self::Write(argument)),
            "q" if argument.is_none() => Ok(Self::Quit),
            "ln" => Ok(Self::ToggleLineNumbers),
            "hl" => Ok(Self::ToggleCurrentLine),
            _ => Err(unknown()),
        }
    }

    /// Run the command against the model.
    pub fn execute(self, model: &mut Model) -> Result<()> {
        match self {
            Self::Edit(Some(path)) => model.load_file(&path),
            Self::Edit(None) => model.reload(),
            Self::Write(path) => model.save_file(path.map(PathBuf::from)),
            Self::Quit => {
                tracing::info!("quit requested");
                model.should_quit = true;
                Ok(())
            }
            Self::ToggleLineNumbers => {
                model.toggle_line_numbers();
                Ok(())
            }
            Self::ToggleCurrentLine => {
                model.toggle_current_line();
                Ok(())
            }
        }
    }
}

/// Strip one pair of surrounding double quotes; empty means no argument.
fn parse_argument(rest: &str) -> Option<String> {
    let unquoted = rest
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(rest);
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}
