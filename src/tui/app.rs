//! Application state for the TUI.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use crate::core::{format_due_date, parse_due_date};
use crate::error::PomoworkError;
use crate::session::durations::index_of;
use crate::session::{
    NextStep, SessionCore, SessionEvent, Ticker, BREAK_COUNTS, BREAK_DURATIONS, WORK_DURATIONS,
};
use crate::storage::BlobStore;
use crate::todo::{ToDoItem, TodoStore};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Work/break timer.
    Timer,
    /// To-do list.
    Todos,
}

impl Screen {
    /// The other screen.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Timer => Self::Todos,
            Self::Todos => Self::Timer,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timer => write!(f, "Timer"),
            Self::Todos => write!(f, "To-Do"),
        }
    }
}

/// Which selection a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    /// Work interval length.
    Work,
    /// Break interval length.
    Break,
    /// Breaks per cycle.
    BreakCount,
}

impl PickerKind {
    /// Labels offered by this picker.
    #[must_use]
    pub fn options(self) -> Vec<String> {
        match self {
            Self::Work => WORK_DURATIONS.iter().map(ToString::to_string).collect(),
            Self::Break => BREAK_DURATIONS.iter().map(ToString::to_string).collect(),
            Self::BreakCount => BREAK_COUNTS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Picker title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Work => "Work duration",
            Self::Break => "Break duration",
            Self::BreakCount => "Breaks per cycle",
        }
    }
}

/// Whether a form creates or edits an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New item.
    Add,
    /// Existing item.
    Edit(Uuid),
}

/// Focused form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// To-do text.
    Text,
    /// Due date entry.
    Due,
}

/// Add/edit form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    /// Add or edit.
    pub mode: FormMode,
    /// To-do text being typed.
    pub text: String,
    /// Due date being typed.
    pub due: String,
    /// Focused field.
    pub field: FormField,
    /// Validation message for the last submit.
    pub error: Option<String>,
}

impl TodoForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Text => &mut self.text,
            FormField::Due => &mut self.due,
        }
    }
}

/// The one dialog shown over the current screen, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveDialog {
    /// No dialog.
    None,
    /// An interval or cycle ended.
    Attention(SessionEvent),
    /// Ask before resetting the session.
    ConfirmReset,
    /// Choose a timer selection.
    Picker {
        /// Selection being edited.
        kind: PickerKind,
        /// Highlighted option.
        index: usize,
    },
    /// Add or edit a to-do.
    TodoForm(TodoForm),
    /// Ask before deleting a to-do.
    ConfirmDelete(Uuid),
    /// A recoverable error.
    Error(String),
}

/// Application state.
pub struct App<B: BlobStore> {
    /// Work/break state machine.
    pub session: SessionCore,
    /// Clock driving the session.
    pub ticker: Ticker,
    /// Persistent to-do list.
    pub todos: TodoStore<B>,
    /// Current screen.
    pub screen: Screen,
    /// Selected row in the sorted to-do list.
    pub selected: usize,
    /// Open dialog.
    pub dialog: ActiveDialog,
    /// Attention events waiting for the open dialog to close, oldest first.
    pending_attention: VecDeque<SessionEvent>,
    /// Status message to display.
    pub status: Option<String>,
    /// Date used for overdue highlighting and date entry.
    pub today: NaiveDate,
}

impl<B: BlobStore> App<B> {
    /// Create a new app instance.
    pub fn new(session: SessionCore, todos: TodoStore<B>, today: NaiveDate) -> Self {
        Self {
            session,
            ticker: Ticker::new(),
            todos,
            screen: Screen::Timer,
            selected: 0,
            dialog: ActiveDialog::None,
            pending_attention: VecDeque::new(),
            status: Some("Press ? for help".to_string()),
            today,
        }
    }

    /// To-do items in display order.
    #[must_use]
    pub fn visible_todos(&self) -> Vec<ToDoItem> {
        self.todos.list(true)
    }

    /// Get the currently selected to-do.
    #[must_use]
    pub fn selected_todo(&self) -> Option<ToDoItem> {
        self.visible_todos().into_iter().nth(self.selected)
    }

    /// Switch between the timer and the to-do list.
    pub fn toggle_screen(&mut self) {
        self.screen = self.screen.toggle();
    }

    // --- Timer ---

    /// Start whichever interval is due next.
    pub fn primary_action(&mut self, now: Instant) {
        let token = match self.session.next_step() {
            NextStep::StartWork | NextStep::ResumeWork => self.session.start_work(),
            NextStep::StartBreak => self.session.start_break(),
        };

        if let Some(token) = token {
            self.ticker.arm(token, now);
            self.status = None;
        }
    }

    /// Deliver due ticks to the session.
    ///
    /// Every emitted event gets its own attention dialog, shown in order.
    /// Returns true when at least one event asks for the user's attention.
    pub fn on_clock(&mut self, now: Instant) -> bool {
        let mut raised = false;
        while let Some(token) = self.ticker.poll(now) {
            for event in self.session.tick(token) {
                self.raise_attention(event);
                raised = true;
            }
            if !self.session.is_running() {
                self.ticker.disarm();
            }
        }
        raised
    }

    fn raise_attention(&mut self, event: SessionEvent) {
        debug!("Attention: {:?}", event.kind);
        if self.dialog == ActiveDialog::None {
            self.dialog = ActiveDialog::Attention(event);
        } else {
            self.pending_attention.push_back(event);
        }
    }

    /// Ask before resetting.
    pub fn request_reset(&mut self) {
        self.dialog = ActiveDialog::ConfirmReset;
    }

    /// Reset the session and stop the clock.
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.ticker.disarm();
        self.status = Some("Timer reset".to_string());
        self.pending_attention.clear();
        self.close_dialog();
    }

    /// Open a picker for a timer selection.
    pub fn open_picker(&mut self, kind: PickerKind) {
        if !self.session.is_configurable() {
            self.status = Some("Settings are locked until the cycle ends or is reset".to_string());
            return;
        }

        let settings = self.session.settings();
        let index = match kind {
            PickerKind::Work => index_of(&WORK_DURATIONS, settings.work_seconds),
            PickerKind::Break => index_of(&BREAK_DURATIONS, settings.break_seconds),
            PickerKind::BreakCount => BREAK_COUNTS
                .iter()
                .position(|&n| n == settings.target_break_count)
                .unwrap_or(0),
        };
        self.dialog = ActiveDialog::Picker { kind, index };
    }

    /// Move the picker highlight.
    pub fn picker_move(&mut self, down: bool) {
        if let ActiveDialog::Picker { kind, index } = &mut self.dialog {
            let len = kind.options().len();
            *index = if down {
                (*index + 1).min(len - 1)
            } else {
                index.saturating_sub(1)
            };
        }
    }

    /// Apply the highlighted picker option.
    pub fn picker_confirm(&mut self) {
        let ActiveDialog::Picker { kind, index } = self.dialog else {
            return;
        };

        let applied = match kind {
            PickerKind::Work => WORK_DURATIONS
                .get(index)
                .is_some_and(|c| self.session.set_work_duration(c.seconds)),
            PickerKind::Break => BREAK_DURATIONS
                .get(index)
                .is_some_and(|c| self.session.set_break_duration(c.seconds)),
            PickerKind::BreakCount => BREAK_COUNTS
                .get(index)
                .is_some_and(|&n| self.session.set_target_break_count(n)),
        };

        if !applied {
            self.status = Some(format!("{} cannot change now", kind.title()));
        }
        self.close_dialog();
    }

    // --- To-do list ---

    /// Move selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.todos.len() {
            self.selected += 1;
        }
    }

    /// Open an empty add form due today.
    pub fn open_add_form(&mut self) {
        self.dialog = ActiveDialog::TodoForm(TodoForm {
            mode: FormMode::Add,
            text: String::new(),
            due: format_due_date(self.today),
            field: FormField::Text,
            error: None,
        });
    }

    /// Open an edit form for the selected to-do.
    pub fn open_edit_form(&mut self) {
        if let Some(item) = self.selected_todo() {
            self.dialog = ActiveDialog::TodoForm(TodoForm {
                mode: FormMode::Edit(item.id),
                text: item.text,
                due: format_due_date(item.due_date),
                field: FormField::Text,
                error: None,
            });
        }
    }

    /// Type a character into the focused form field.
    pub fn form_input(&mut self, c: char) {
        if let ActiveDialog::TodoForm(form) = &mut self.dialog {
            form.focused_mut().push(c);
        }
    }

    /// Delete the last character of the focused form field.
    pub fn form_backspace(&mut self) {
        if let ActiveDialog::TodoForm(form) = &mut self.dialog {
            form.focused_mut().pop();
        }
    }

    /// Move focus to the other form field.
    pub fn form_next_field(&mut self) {
        if let ActiveDialog::TodoForm(form) = &mut self.dialog {
            form.field = match form.field {
                FormField::Text => FormField::Due,
                FormField::Due => FormField::Text,
            };
        }
    }

    /// Save the form. Validation problems keep the form open.
    pub fn form_submit(&mut self) {
        let ActiveDialog::TodoForm(form) = &self.dialog else {
            return;
        };
        let form = form.clone();

        let Some(due) = parse_due_date(&form.due, self.today) else {
            self.set_form_error(format!("Unrecognized date: {}", form.due.trim()));
            return;
        };

        let result = match form.mode {
            FormMode::Add => self.todos.add(&form.text, due).map(|item| {
                self.status = Some(format!("Added: {}", item.text));
            }),
            FormMode::Edit(id) => self.todos.edit(id, &form.text, due).map(|()| {
                self.status = Some("Saved".to_string());
            }),
        };

        match result {
            Ok(()) => self.close_dialog(),
            Err(e) if e.is_user_facing() => self.set_form_error(e.to_string()),
            Err(e) => self.show_error(&e),
        }
    }

    fn set_form_error(&mut self, message: String) {
        if let ActiveDialog::TodoForm(form) = &mut self.dialog {
            form.error = Some(message);
        }
    }

    /// Ask before deleting the selected to-do.
    pub fn request_delete(&mut self) {
        if let Some(item) = self.selected_todo() {
            self.dialog = ActiveDialog::ConfirmDelete(item.id);
        }
    }

    /// Delete the to-do named by the confirmation dialog.
    pub fn confirm_delete(&mut self) {
        let ActiveDialog::ConfirmDelete(id) = self.dialog else {
            return;
        };

        match self.todos.delete(id) {
            Ok(item) => {
                self.status = Some(format!("Deleted: {}", item.text));
                if self.selected >= self.todos.len() {
                    self.selected = self.todos.len().saturating_sub(1);
                }
                self.close_dialog();
            },
            Err(e) => self.show_error(&e),
        }
    }

    /// Check or uncheck the selected to-do.
    pub fn toggle_selected_done(&mut self) {
        let Some(item) = self.selected_todo() else {
            return;
        };

        if let Err(e) = self.todos.set_done(item.id, !item.done) {
            self.show_error(&e);
        }
    }

    // --- Dialogs ---

    fn show_error(&mut self, error: &PomoworkError) {
        self.dialog = ActiveDialog::Error(error.to_string());
    }

    /// Close the open dialog, showing the next held-back attention event.
    pub fn close_dialog(&mut self) {
        self.dialog = self
            .pending_attention
            .pop_front()
            .map_or(ActiveDialog::None, ActiveDialog::Attention);
    }
}
