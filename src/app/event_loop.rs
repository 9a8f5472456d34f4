use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};
use crate::error::EditorError;

impl App {
    /// Run the editor until `:q`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or an I/O
    /// error occurs while reading events or drawing. The terminal is
    /// restored on every exit path.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .map_err(EditorError::TerminalInit)
            .context("tedit requires an interactive terminal")?;

        let result = self.session(&mut terminal);
        ratatui::restore();
        result
    }

    fn session(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        let size = terminal.size().context("Failed to query terminal size")?;
        let mut model = Model::new(self.config.clone(), (size.width, size.height));

        if let Some(file) = &self.file {
            if let Err(err) = model.load_file(file) {
                tracing::warn!(error = %err, "initial load failed");
                model.show_status(format!("Error loading file: {err}"));
            }
        }

        Self::event_loop(terminal, &mut model)
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        loop {
            if model.needs_redraw {
                let _scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                model.mark_drawn();
            }
            if model.should_quit {
                return Ok(());
            }

            let event = event::read().context("Failed to read terminal event")?;
            if let Some(msg) = Self::handle_event(&event, model) {
                *model = update(std::mem::take(model), msg);
            }
        }
    }
}
