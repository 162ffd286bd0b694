//! Event handling for the TUI.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomoworkError;
use crate::storage::BlobStore;
use crate::tui::app::{ActiveDialog, App, PickerKind, Screen};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
}

const HELP: &str =
    "Tab:switch | Space:start | r:reset | w/b/c:set work/break/count | a:add e:edit d:delete x:done | q:quit";

/// Wait up to `timeout` for a terminal event and handle it.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events<B: BlobStore>(
    app: &mut App<B>,
    timeout: Duration,
) -> Result<Option<Action>, PomoworkError> {
    if !event::poll(timeout)
        .map_err(|e| PomoworkError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| PomoworkError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            Ok(handle_key(app, key, Instant::now()))
        },
        _ => Ok(None),
    }
}

/// Apply one key press to the app.
pub fn handle_key<B: BlobStore>(app: &mut App<B>, key: KeyEvent, now: Instant) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match &app.dialog {
        ActiveDialog::None => handle_screen_key(app, key.code, now),
        ActiveDialog::Attention(_) | ActiveDialog::Error(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.close_dialog();
            }
            None
        },
        ActiveDialog::ConfirmReset => {
            match key.code {
                KeyCode::Char('y' | 'Y') => app.reset_session(),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => app.close_dialog(),
                _ => {},
            }
            None
        },
        ActiveDialog::ConfirmDelete(_) => {
            match key.code {
                KeyCode::Char('y' | 'Y') => app.confirm_delete(),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => app.close_dialog(),
                _ => {},
            }
            None
        },
        ActiveDialog::Picker { .. } => {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => app.picker_move(true),
                KeyCode::Char('k') | KeyCode::Up => app.picker_move(false),
                KeyCode::Enter => app.picker_confirm(),
                KeyCode::Esc => app.close_dialog(),
                _ => {},
            }
            None
        },
        ActiveDialog::TodoForm(_) => {
            match key.code {
                KeyCode::Enter => app.form_submit(),
                KeyCode::Esc => app.close_dialog(),
                KeyCode::Tab | KeyCode::BackTab => app.form_next_field(),
                KeyCode::Backspace => app.form_backspace(),
                KeyCode::Char(c) => app.form_input(c),
                _ => {},
            }
            None
        },
    }
}

fn handle_screen_key<B: BlobStore>(
    app: &mut App<B>,
    code: KeyCode,
    now: Instant,
) -> Option<Action> {
    app.status = None;

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab => app.toggle_screen(),
        KeyCode::Char('?') => app.status = Some(HELP.to_string()),
        _ => match app.screen {
            Screen::Timer => handle_timer_key(app, code, now),
            Screen::Todos => handle_todo_key(app, code),
        },
    }

    None
}

fn handle_timer_key<B: BlobStore>(app: &mut App<B>, code: KeyCode, now: Instant) {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => app.primary_action(now),
        KeyCode::Char('r') => app.request_reset(),
        KeyCode::Char('w') => app.open_picker(PickerKind::Work),
        KeyCode::Char('b') => app.open_picker(PickerKind::Break),
        KeyCode::Char('c') => app.open_picker(PickerKind::BreakCount),
        _ => {},
    }
}

fn handle_todo_key<B: BlobStore>(app: &mut App<B>, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),
        KeyCode::Char('x' | ' ') => app.toggle_selected_done(),
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::session::{Phase, SessionCore};
    use crate::storage::MemoryBlobStore;
    use crate::todo::TodoStore;

    fn app() -> App<MemoryBlobStore> {
        App::new(
            SessionCore::default(),
            TodoStore::load(MemoryBlobStore::new()),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    fn press(app: &mut App<MemoryBlobStore>, code: KeyCode) -> Option<Action> {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE), Instant::now())
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), Some(Action::Quit));

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c, Instant::now()), Some(Action::Quit));
    }

    #[test]
    fn test_space_starts_work() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.phase(), Phase::Working);
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.dialog, ActiveDialog::ConfirmReset);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session.phase(), Phase::Working);

        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.session.phase(), Phase::Idle);
    }

    #[test]
    fn test_form_typing_does_not_trigger_shortcuts() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('a'));

        for c in "quit".chars() {
            assert_eq!(press(&mut app, KeyCode::Char(c)), None);
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.dialog, ActiveDialog::None);
        assert_eq!(app.visible_todos()[0].text, "quit");
    }

    #[test]
    fn test_todo_delete_flow() {
        let mut app = app();
        app.todos
            .add("Gone", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
            .unwrap();

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.todos.is_empty());
    }

    #[test]
    fn test_picker_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session.settings().target_break_count, 3);
    }
}
