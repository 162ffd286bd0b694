//! Terminal User Interface (TUI) for pomowork.
//!
//! Hosts the session core and the to-do store in one interactive screen:
//! the work/break timer on one tab and the to-do list on the other.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{ActiveDialog, App, FormField, FormMode, PickerKind, Screen, TodoForm};
pub use event::{handle_key, Action};

use std::io::{self, Write};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::{
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::prelude::*;

use crate::config::{Config, Paths};
use crate::error::PomoworkError;
use crate::session::SessionCore;
use crate::storage::{BlobStore, Database, SqliteBlobStore};
use crate::todo::TodoStore;

/// Upper bound on how long the loop waits for input before redrawing.
const FRAME_TIMEOUT: Duration = Duration::from_millis(250);

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the terminal fails.
pub fn run(config: &Config, paths: &Paths) -> Result<(), PomoworkError> {
    let db = Database::open_at(&paths.database)?;
    let todos = TodoStore::load(SqliteBlobStore::new(db, config.storage.todo_key.clone()));
    let session = SessionCore::new(config.session.to_settings());
    let mut app = App::new(session, todos, Local::now().date_naive());

    info!(
        "Starting TUI with {} to-dos from {}",
        app.todos.len(),
        paths.database.display()
    );

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomoworkError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomoworkError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomoworkError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    info!("TUI closed");
    result
}

/// Run the main application loop.
fn run_app<W: Write, B: BlobStore>(
    terminal: &mut Terminal<CrosstermBackend<W>>,
    app: &mut App<B>,
) -> Result<(), PomoworkError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomoworkError::Terminal(format!("Failed to draw: {e}")))?;

        // Wake up in time for the next countdown tick
        let timeout = app
            .ticker
            .until_next(Instant::now())
            .map_or(FRAME_TIMEOUT, |next| next.min(FRAME_TIMEOUT));

        if let Some(action) = event::handle_events(app, timeout)? {
            match action {
                Action::Quit => break,
            }
        }

        app.today = Local::now().date_naive();

        if app.on_clock(Instant::now()) {
            // Bell
            execute!(terminal.backend_mut(), Print("\x07"))
                .map_err(|e| PomoworkError::Terminal(format!("Failed to ring bell: {e}")))?;
        }
    }

    Ok(())
}
