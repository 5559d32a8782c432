use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet.", theme::dim_style())),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(theme::panel("All Expenses (0)")),
            area,
        );
        return;
    }

    let header_cells = ["#", "Date", "Category", "Amount", "Note"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            // Row numbers are positional, not database ids
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(expense.date.to_string()),
                Cell::from(truncate(&expense.category, 18)),
                Cell::from(format_amount(expense.amount)),
                Cell::from(truncate(&expense.note, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(format!("All Expenses ({})", app.expenses.len())));

    f.render_widget(table, area);
}
