use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::model::Mode;
use crate::app::{App, Message, Model};
use crate::editor::Direction;

impl App {
    /// Map a terminal event to a message for the current mode.
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::handle_key(*key, &model.mode)
            }
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, mode: &Mode) -> Option<Message> {
        match mode {
            Mode::Insert => Self::handle_insert_key(key),
            Mode::Command { line: None } => match key.code {
                KeyCode::Esc => Some(Message::ExitCommandMode),
                KeyCode::Char(':') => Some(Message::StartCommandLine),
                _ => None,
            },
            Mode::Command { line: Some(_) } => match key.code {
                KeyCode::Esc => Some(Message::CancelCommandLine),
                KeyCode::Enter => Some(Message::ExecuteCommand),
                KeyCode::Backspace => Some(Message::CommandBackspace),
                KeyCode::Char(ch) if !has_control(key) => Some(Message::CommandInput(ch)),
                _ => None,
            },
        }
    }

    fn handle_insert_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::EnterCommandMode),
            KeyCode::Char(ch) if !has_control(key) => Some(Message::InsertChar(ch)),
            KeyCode::Tab => Some(Message::InsertTab),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::Delete),
            KeyCode::Left => Some(Message::Move(Direction::Left)),
            KeyCode::Right => Some(Message::Move(Direction::Right)),
            KeyCode::Up => Some(Message::Move(Direction::Up)),
            KeyCode::Down => Some(Message::Move(Direction::Down)),
            KeyCode::Home => Some(Message::Home),
            KeyCode::End => Some(Message::End),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }
}

fn has_control(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
