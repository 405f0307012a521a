use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{App, FormField, TaskForm};
use crate::model::{Rating, Task};
use crate::output;

pub fn render(frame: &mut Frame, app: &mut App) {
    let detail_height = if app.show_detail { 15 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(detail_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    if app.show_detail {
        render_detail(frame, app, chunks[2]);
    }
    frame.render_widget(
        Paragraph::new("a: add  Space: toggle done  Enter: details  ?: help  q: quit")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );

    if app.show_help {
        render_help(frame);
    }
    if let Some(form) = &app.add_form {
        render_add_dialog(frame, form);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            app.header.title.as_str(),
            Style::default().bold(),
        )),
        Line::from(Span::styled(
            app.header.subtitle.as_str(),
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn task_item(task: &Task) -> ListItem<'_> {
    let style = if task.completed {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let due = task
        .due_date
        .map(|d| format!("  due {}", d.format("%Y-%m-%d")))
        .unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(format!("{} ", task.checkbox()), style.bold()),
        Span::styled(task.name.as_str(), style),
        Span::styled(due, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("  imp {} diff {}", task.importance, task.difficulty),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    ListItem::new(line)
}

fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(
        " Tasks ({}/{}) ",
        app.store.completed_count(),
        app.store.len()
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if app.store.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let middle = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .split(inner);
        frame.render_widget(
            Paragraph::new(output::EMPTY_LIST_MESSAGE).alignment(Alignment::Center),
            middle[1],
        );
        return;
    }

    let items: Vec<ListItem> = app.store.list().iter().map(task_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let (title, text) = match app.selected() {
        Some(task) => (
            format!(" {} ", task.name),
            output::format_task_detail(task),
        ),
        None => (" Details ".to_string(), "No task selected.".to_string()),
    };
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Center a rectangle within an area.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn rating_text(rating: Rating, label: &str) -> String {
    let filled = usize::from(rating.get());
    format!(
        "{}{} {} {label}",
        "\u{25cf}".repeat(filled),
        "\u{25cb}".repeat(5 - filled),
        rating
    )
}

fn field_value(form: &TaskForm, field: FormField) -> String {
    match field {
        FormField::Name => form.name.clone(),
        FormField::Description => form.description.clone(),
        FormField::Estimate => form.estimate.clone(),
        FormField::Deadline => form.deadline.clone(),
        FormField::Importance => rating_text(form.importance, form.importance.importance_label()),
        FormField::Difficulty => rating_text(form.difficulty, form.difficulty.difficulty_label()),
    }
}

fn render_add_dialog(frame: &mut Frame, form: &TaskForm) {
    let term = frame.area();
    let width = 60.min(term.width.saturating_sub(4));
    // label + input per field, optional error, hint
    let content_rows = FormField::ALL.len() as u16 * 2 + u16::from(form.error.is_some()) + 1;
    let height = (content_rows + 2).min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Create a new task ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for field in FormField::ALL {
        let focused = form.focused == field;
        let label_style = if focused {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let cursor = if focused && !field.is_rating() { "_" } else { "" };
        let hint = if focused && field.is_rating() {
            "  (Left/Right, 1-5)"
        } else {
            ""
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {}{cursor}", field_value(form, field))),
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]));

        if let Some(err) = form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("  {err}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        "Enter: save  Tab/S-Tab: fields  C-u: clear  Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help(frame: &mut Frame) {
    let term = frame.area();
    let width = 44.min(term.width.saturating_sub(4));
    let height = 17.min(term.height.saturating_sub(2));
    let area = centered_rect(width, height, term);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };
    let help_text = vec![
        key("j/Down    ", "Move down"),
        key("k/Up      ", "Move up"),
        key("Space/x   ", "Toggle completion"),
        key("Enter     ", "Show/hide details"),
        key("a         ", "Create a task"),
        key("?         ", "Toggle help"),
        key("q/Esc     ", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("Create Task Dialog:", Style::default().bold())),
        key("  Tab/S-Tab ", "Next/prev field"),
        key("  Left/Right", " Adjust rating"),
        key("  Enter     ", "Save"),
        key("  C-u       ", "Clear field"),
        key("  Esc       ", "Cancel"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
