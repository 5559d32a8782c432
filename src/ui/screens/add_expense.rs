use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::alert::Severity;
use crate::ui::app::{App, InputMode};
use crate::ui::form::render_form;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(4)])
        .split(area);

    let active = app.input_mode == InputMode::Form;
    render_form(f, chunks[0], &app.expense_form, "Add a New Expense", active);
    render_alert(f, chunks[1], app);
}

fn render_alert(f: &mut Frame, area: Rect, app: &App) {
    let Some(alert) = &app.last_alert else {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Budget alerts for the category you just added show up here.",
            theme::dim_style(),
        )))
        .block(theme::panel("Budget Alert"));
        f.render_widget(msg, area);
        return;
    };

    let style = match alert.severity() {
        Severity::Warning => theme::warning_style(),
        Severity::Exceeded => theme::error_style(),
    };

    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            alert.to_string(),
            style.add_modifier(Modifier::BOLD),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(theme::panel(format!("Budget Alert: {}", alert.category())).border_style(Style::default().fg(
        match alert.severity() {
            Severity::Warning => theme::YELLOW,
            Severity::Exceeded => theme::RED,
        },
    )));
    f.render_widget(msg, area);
}
