//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::session::durations::label_for;
use crate::session::{
    format_countdown, format_elapsed, format_length, Phase, BREAK_DURATIONS, WORK_DURATIONS,
};
use crate::storage::BlobStore;
use crate::todo::ColorHint;
use crate::tui::app::{ActiveDialog, App, FormField, FormMode, Screen, TodoForm};

/// Render the application UI.
pub fn render<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>) {
    // Header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Timer => render_timer(frame, app, chunks[1]),
        Screen::Todos => render_todos(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
    render_dialog(frame, app);
}

fn render_header<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let selected = match app.screen {
        Screen::Timer => 0,
        Screen::Todos => 1,
    };

    let tabs = Tabs::new(vec![
        Screen::Timer.to_string(),
        format!("{} ({})", Screen::Todos, app.todos.len()),
    ])
    .select(selected)
    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(
        Block::default()
            .title(" pomowork ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(tabs, area);
}

fn duration_label(options: &[crate::session::DurationChoice], seconds: u32) -> String {
    label_for(options, seconds).map_or_else(|| format_length(u64::from(seconds)), str::to_string)
}

fn render_timer<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let snapshot = app.session.snapshot();
    let settings = snapshot.settings;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let phase_style = match snapshot.phase {
        Phase::Idle => Style::default().fg(Color::Gray),
        Phase::Working => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Phase::OnBreak => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Work:     "),
            Span::styled(
                duration_label(&WORK_DURATIONS, settings.work_seconds),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(vec![
            Span::raw("Break:    "),
            Span::styled(
                duration_label(&BREAK_DURATIONS, settings.break_seconds),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(vec![
            Span::raw("Breaks:   "),
            Span::styled(
                format!("{}/{}", snapshot.completed_breaks, settings.target_break_count),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw("State:    "),
            Span::styled(snapshot.phase.to_string(), phase_style),
        ]),
    ];

    if snapshot.phase == Phase::Idle {
        lines.push(Line::styled(
            format!("Press Space: {}", snapshot.next_step.action_label()),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        lines.push(Line::from(vec![
            Span::raw("Remaining: "),
            Span::styled(
                format_countdown(u64::from(snapshot.remaining_seconds)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(
            "Worked {} | Rested {}",
            format_elapsed(snapshot.summary.work_seconds),
            format_elapsed(snapshot.summary.break_seconds)
        ),
        Style::default().fg(Color::DarkGray),
    ));

    let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(phase_style)
        .ratio(snapshot.progress().clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);
}

fn render_todos<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let todos = app.visible_todos();

    let items: Vec<ListItem<'_>> = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let is_selected = i == app.selected;
            let color = match todo.color_hint(app.today) {
                ColorHint::Overdue => Color::Red,
                ColorHint::Normal => Color::White,
            };

            let spans = vec![
                Span::styled(
                    if todo.done { "[x] " } else { "[ ] " },
                    Style::default().fg(if todo.done { Color::Green } else { color }),
                ),
                Span::styled(
                    todo.text.clone(),
                    Style::default().fg(color).add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
                Span::styled(
                    format!("  due {}", todo.due_date),
                    Style::default().fg(color).add_modifier(Modifier::DIM),
                ),
            ];

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if !todos.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let text = app.status.as_deref().unwrap_or("");
    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

fn render_dialog<B: BlobStore>(frame: &mut Frame<'_>, app: &App<B>) {
    let (title, lines, border) = match &app.dialog {
        ActiveDialog::None => return,
        ActiveDialog::Attention(event) => (
            event.kind.title().to_string(),
            event
                .message()
                .lines()
                .map(|line| Line::raw(line.to_string()))
                .collect::<Vec<_>>(),
            Color::Yellow,
        ),
        ActiveDialog::ConfirmReset => (
            "Reset timer?".to_string(),
            vec![Line::raw("y: reset   n: keep going")],
            Color::Red,
        ),
        ActiveDialog::ConfirmDelete(id) => {
            let mut lines = Vec::new();
            if let Some(item) = app.todos.get(*id) {
                lines.push(Line::raw(format!("To-do: {}", item.text)));
                lines.push(Line::raw(format!("Due:   {}", item.due_date)));
            }
            lines.push(Line::raw(""));
            lines.push(Line::raw("y: delete   n: cancel"));
            ("Delete this to-do?".to_string(), lines, Color::Red)
        },
        ActiveDialog::Picker { kind, index } => (
            kind.title().to_string(),
            kind.options()
                .into_iter()
                .enumerate()
                .map(|(i, label)| {
                    if i == *index {
                        Line::styled(
                            format!("> {label}"),
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Line::raw(format!("  {label}"))
                    }
                })
                .collect(),
            Color::Cyan,
        ),
        ActiveDialog::TodoForm(form) => form_dialog(form),
        ActiveDialog::Error(message) => (
            "Error".to_string(),
            vec![Line::raw(message.clone())],
            Color::Red,
        ),
    };

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(50, height, frame.area());

    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn form_dialog(form: &TodoForm) -> (String, Vec<Line<'static>>, Color) {
    let title = match form.mode {
        FormMode::Add => "New to-do",
        FormMode::Edit(_) => "Edit to-do",
    };

    let field_style = |field: FormField| {
        if form.field == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("To-do: "),
            Span::styled(format!("{}_", form.text), field_style(FormField::Text)),
        ]),
        Line::from(vec![
            Span::raw("Due:   "),
            Span::styled(format!("{}_", form.due), field_style(FormField::Due)),
        ]),
    ];

    if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), Style::default().fg(Color::Red)));
    }

    lines.push(Line::styled(
        "Tab: next field   Enter: save   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    ));

    (title.to_string(), lines, Color::Cyan)
}

/// Rect of `percent_x` width and `height` rows centered in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::session::SessionCore;
    use crate::storage::MemoryBlobStore;
    use crate::todo::TodoStore;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn app() -> App<MemoryBlobStore> {
        App::new(
            SessionCore::default(),
            TodoStore::load(MemoryBlobStore::new()),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        )
    }

    #[test]
    fn test_render_timer_screen() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Start work"));
        assert!(text.contains("10s"));
    }

    #[test]
    fn test_render_todos_and_dialog() {
        let mut app = app();
        app.todos
            .add("Water plants", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .unwrap();
        app.toggle_screen();
        app.request_delete();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Water plants"));
        assert!(text.contains("Delete this to-do?"));
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect.height, 10);
        assert_eq!(rect.width, 50);
    }
}
