use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::report::chart_points;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.dashboard.summary;
    if summary.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses recorded yet. Add an expense to see your dashboard.",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press 2 for the Add Expense form or use :add <category> <amount>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel("Expense Dashboard"));
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Category bars
            Constraint::Min(8),    // Over time
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_over_time_chart(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let summary = &app.dashboard.summary;
    let average = summary.average().map(format_amount).unwrap_or_default();

    render_card(f, cards[0], "Total Spent", format_amount(summary.total), theme::RED);
    render_card(
        f,
        cards[1],
        "Number of Expenses",
        summary.count.to_string(),
        theme::ACCENT,
    );
    render_card(f, cards[2], "Average Expense", average, theme::YELLOW);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(theme::panel(title));
    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .dashboard
        .by_category
        .iter()
        .take(12)
        .map(|(name, amt)| {
            let val = amt.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .label(Line::from(truncate(name, 10)))
                .text_value(format_amount(*amt))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(theme::panel("Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_over_time_chart(f: &mut Frame, area: Rect, app: &App) {
    let over_time = &app.dashboard.over_time;
    let points = chart_points(over_time);

    let max_x = points.iter().map(|(x, _)| *x).fold(0.0, f64::max).max(1.0);
    let max_y = points.iter().map(|(_, y)| *y).fold(0.0, f64::max).max(1.0);

    let first_label = over_time
        .first()
        .map(|p| p.date.to_string())
        .unwrap_or_default();
    let last_label = over_time
        .last()
        .map(|p| p.date.to_string())
        .unwrap_or_default();

    let datasets = vec![Dataset::default()
        .name("Amount")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::YELLOW))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(theme::panel("Spending Over Time"))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, max_x])
                .labels([Span::raw(first_label), Span::raw(last_label)]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, max_y])
                .labels([
                    Span::raw(format!("{:.0}", 0.0)),
                    Span::raw(format!("{max_y:.0}")),
                ]),
        );

    f.render_widget(chart, area);
}
