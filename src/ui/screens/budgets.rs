use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::{App, InputMode};
use crate::ui::form::render_form;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    let active = app.input_mode == InputMode::Form;
    render_form(f, chunks[0], &app.budget_form, "Set Monthly Budget", active);
    render_status(f, chunks[1], app);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Current Budget Status ({})", app.current_month);

    if app.budget_status.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budgets set yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use the form above or :budget <category> <limit>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel(title));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .budget_status
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, status)| {
            let ratio = status.progress();
            let color = if status.is_over() {
                theme::RED
            } else {
                theme::GREEN
            };

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&status.category, 17)), style),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>3.0}% ", ratio * 100.0),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "Spent {} of {}. Remaining: {}",
                        format_amount(status.spent),
                        format_amount(status.limit_amount),
                        format_amount(status.remaining()),
                    ),
                    Style::default().fg(color),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(theme::panel(title)), area);
}
