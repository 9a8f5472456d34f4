// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # tedit
//!
//! A small modal terminal text editor.
//!
//! - Insert mode for typing, command mode for `:e`, `:w`, `:q`, `:ln`, `:hl`
//! - Tabs expand to a fixed width on screen
//! - Per-language syntax highlighting, cached around the viewport
//!
//! ## Architecture
//!
//! tedit uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Events and actions
//! - **Update**: State transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main loop, state and the command language
//! - [`editor`]: Text buffer, cursor and file I/O
//! - [`highlight`]: Highlighting strategies and cache
//! - [`ui`]: Viewport, theme and rendering
//! - [`config`]: Settings from the environment
//! - [`error`]: Error types

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod highlight;
pub mod perf;
pub mod ui;
