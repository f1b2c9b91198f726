use crate::auth::StaticCredentials;
use crate::config::{Config, ViewHotkeys};
use crate::error::AppResult;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{CustomLogger, LogBuffer};
use crate::preferences::{
    FilePreferenceStore, PreferenceError, PreferenceStore, PreferenceWriter, Preferences,
};
use crate::state::State;
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::stdout;
use std::sync::Arc;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: State,
    preference_writer: PreferenceWriter,
    initial_dark_mode: bool,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, log_level: Option<LevelFilter>) -> Result<()> {
        let level = match log_level {
            Some(level) => level,
            None => config.level_filter()?,
        };
        let log_buffer = LogBuffer::new();
        CustomLogger::init(log_buffer.clone(), level)?;

        info!("Starting application...");
        let store: Arc<dyn PreferenceStore> =
            Arc::new(FilePreferenceStore::new(config.preferences_path()?));
        let preferences = Preferences::load(store.as_ref());
        let preference_writer = PreferenceWriter::spawn(Arc::clone(&store));
        let authenticator = Arc::new(StaticCredentials::new(
            config.username.clone(),
            config.password.clone(),
        ));

        let mut app = App {
            initial_dark_mode: preferences.dark_mode(),
            state: State::new(
                authenticator,
                preferences,
                preference_writer.clone(),
                ViewHotkeys::default(),
                log_buffer,
            ),
            preference_writer,
        };
        app.start_ui()?;
        app.flush_preferences().await?;

        info!("Exiting application...");
        Ok(())
    }

    /// Wait until the preference writer has applied every queued write.
    /// Writes are applied in order, so awaiting a final write of the current
    /// value is enough.
    ///
    async fn flush_preferences(&self) -> AppResult<()> {
        let preferences = self.state.get_preferences();
        if preferences.dark_mode() == self.initial_dark_mode {
            return Ok(());
        }
        preferences
            .write_dark_mode(&self.preference_writer)?
            .await
            .map_err(|e| PreferenceError::WriterStopped(e.to_string()))??;
        debug!("Preferences flushed.");
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. The terminal is restored even when the
    /// loop fails.
    ///
    fn start_ui(&mut self) -> AppResult<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            terminal.draw(|frame| crate::ui::render(frame, &mut self.state))?;
            if !terminal_event_handler.handle_next(&mut self.state)? {
                debug!("Received application exit request.");
                break;
            }
        }
        Ok(())
    }
}
