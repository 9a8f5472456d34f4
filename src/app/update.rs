use crate::app::Model;
use crate::app::command::Command;
use crate::app::model::{CommandLine, Mode};
use crate::editor::Direction;

/// All possible events and actions in the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert a tab at the cursor
    InsertTab,
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    Delete,
    /// Split the line at the cursor
    SplitLine,

    // Navigation
    Move(Direction),
    Home,
    End,
    PageUp,
    PageDown,

    // Modes
    /// Insert mode to command mode
    EnterCommandMode,
    /// Command mode (no line yet) back to insert mode
    ExitCommandMode,
    /// Start typing a `:` command
    StartCommandLine,
    CommandInput(char),
    CommandBackspace,
    /// Run the typed command and return to insert mode
    ExecuteCommand,
    /// Drop the typed command and return to insert mode
    CancelCommandLine,

    // System
    /// Terminal resized (width, height)
    Resize(u16, u16),
}

/// Apply a message to the model, returning the new state.
///
/// Every handled message requests a redraw; the viewport is re-clamped to
/// the cursor afterwards.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::InsertChar(ch) => {
            let change = model.buffer.insert_char(ch);
            model.apply_change(change);
        }
        Message::InsertTab => {
            let change = model.buffer.insert_tab();
            model.apply_change(change);
        }
        Message::Backspace => {
            let change = model.buffer.delete_back();
            model.apply_change(change);
        }
        Message::Delete => {
            let change = model.buffer.delete_forward();
            model.apply_change(change);
        }
        Message::SplitLine => {
            let change = model.buffer.split_line();
            model.apply_change(change);
        }

        Message::Move(direction) => model.buffer.move_cursor(direction),
        Message::Home => model.buffer.move_home(),
        Message::End => model.buffer.move_end(),
        Message::PageUp => model.page_up(),
        Message::PageDown => model.page_down(),

        Message::EnterCommandMode => {
            model.mode = Mode::Command { line: None };
        }
        Message::ExitCommandMode | Message::CancelCommandLine => {
            model.mode = Mode::Insert;
        }
        Message::StartCommandLine => {
            model.mode = Mode::Command {
                line: Some(CommandLine::new()),
            };
        }
        Message::CommandInput(ch) => {
            if let Mode::Command { line: Some(line) } = &mut model.mode {
                line.push(ch);
            }
        }
        Message::CommandBackspace => {
            if let Mode::Command { line: Some(line) } = &mut model.mode {
                line.pop();
            }
        }
        Message::ExecuteCommand => {
            let mode = std::mem::take(&mut model.mode);
            if let Some(line) = mode.command_line() {
                run_command(&mut model, line.as_str());
            }
        }

        Message::Resize(width, height) => model.resize(width, height),
    }

    model.needs_redraw = true;
    model.adjust_offsets();
    model
}

fn run_command(model: &mut Model, input: &str) {
    let result = Command::parse(input).and_then(|command| {
        tracing::debug!(?command, "executing command");
        command.execute(model)
    });
    if let Err(err) = result {
        tracing::warn!(error = %err, input, "command failed");
        model.show_status(format!("Error: {err}"));
    }
}
