//! tedit - a small modal terminal text editor.
//!
//! # Usage
//!
//! ```bash
//! tedit
//! tedit notes.txt
//! tedit src/main.rs:42:7
//! ```
//!
//! Logs go to the file named by `TEDIT_LOG`; filter with `RUST_LOG`.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tedit::app::App;
use tedit::config::EditorConfig;

/// A small modal terminal text editor
#[derive(Parser, Debug)]
#[command(name = "tedit", version, about, long_about = None)]
struct Cli {
    /// File to open, optionally as path:line[:col]
    #[arg(value_name = "FILE")]
    file: Option<String>,
}

/// The terminal is the editor's screen, so logs never go to stderr.
fn init_logging() -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    match std::env::var_os("TEDIT_LOG").map(PathBuf::from) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let config = EditorConfig::from_env();
    tracing::debug!(?config, file = ?cli.file, "starting");

    let mut app = App::new(cli.file).with_config(config);
    app.run().context("Editor error")
}
