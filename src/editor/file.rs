//! Loading and saving buffers.
//!
//! Files are read completely before anything else changes, so a failed load
//! leaves the caller's buffer untouched.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{EditorError, Result};

/// A file path with an optional 1-based `:line[:col]` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub path: PathBuf,
    /// Zero-based line, if one was given.
    pub line: Option<usize>,
    /// Zero-based column, if one was given.
    pub col: Option<usize>,
}

impl FileLocation {
    /// Split `path[:line[:col]]`.
    ///
    /// Only trailing all-digit components count as a location, so
    /// `C:\notes.txt` and `a:b.txt` are kept as plain paths. A `0` in either
    /// position is ignored.
    pub fn parse(input: &str) -> Self {
        let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let to_index = |s: &str| s.parse::<usize>().ok().and_then(|n| n.checked_sub(1));

        let mut parts: Vec<&str> = input.rsplitn(3, ':').collect();
        parts.reverse();

        match parts.as_slice() {
            [path, line, col] if !path.is_empty() && numeric(line) && numeric(col) => Self {
                path: PathBuf::from(path),
                line: to_index(line),
                col: to_index(col),
            },
            [.., path, line] if !path.is_empty() && numeric(line) => {
                let prefix_len = input.len() - line.len() - 1;
                Self {
                    path: PathBuf::from(&input[..prefix_len]),
                    line: to_index(line),
                    col: None,
                }
            }
            _ => Self {
                path: PathBuf::from(input),
                line: None,
                col: None,
            },
        }
    }
}

/// Read a file into lines, stripping `\n` and a trailing `\r`.
///
/// An empty file yields a single empty line.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| EditorError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let mut line = line.map_err(|source| EditorError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if line.ends_with('\r') {
            line.pop();
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    Ok(lines)
}

/// Write lines to `path`, each followed by `\n`. Creates or truncates.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let file = File::create(path).map_err(|source| EditorError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| EditorError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_ref().as_bytes()).map_err(write_err)?;
        writer.write_all(b"\n").map_err(write_err)?;
    }
    writer.flush().map_err(write_err)
}
