use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme;

#[derive(Debug, Clone)]
pub(crate) struct FormField {
    pub(crate) label: &'static str,
    pub(crate) placeholder: &'static str,
    pub(crate) value: String,
}

impl FormField {
    fn new(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            value: String::new(),
        }
    }
}

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormEvent {
    Editing,
    Submit,
    Cancel,
}

/// A small stack of single-line text inputs with one focused field.
#[derive(Debug, Clone)]
pub(crate) struct Form {
    pub(crate) fields: Vec<FormField>,
    pub(crate) focus: usize,
}

impl Form {
    pub(crate) const CATEGORY: usize = 0;
    pub(crate) const AMOUNT: usize = 1;
    pub(crate) const NOTE: usize = 2;

    pub(crate) fn expense() -> Self {
        Self {
            fields: vec![
                FormField::new("Category", "e.g., Food, Travel, Shopping"),
                FormField::new("Amount", "0.00"),
                FormField::new("Note (Optional)", ""),
            ],
            focus: 0,
        }
    }

    pub(crate) fn budget() -> Self {
        Self {
            fields: vec![
                FormField::new("Category", "e.g., Food"),
                FormField::new("Budget Limit", "0.00"),
            ],
            focus: 0,
        }
    }

    pub(crate) fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub(crate) fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub(crate) fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
        }
    }

    /// Empty every field and focus the first one.
    pub(crate) fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }

    /// Enter on the last field submits; Ctrl-s submits from anywhere.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => FormEvent::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                FormEvent::Submit
            }
            KeyCode::Enter => {
                if self.focus + 1 >= self.fields.len() {
                    FormEvent::Submit
                } else {
                    self.next_field();
                    FormEvent::Editing
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.next_field();
                FormEvent::Editing
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.prev_field();
                FormEvent::Editing
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.pop();
                }
                FormEvent::Editing
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.value.push(c);
                }
                FormEvent::Editing
            }
            _ => FormEvent::Editing,
        }
    }
}

/// Draw `form` inside a bordered block. `active` highlights the focused
/// field and places the terminal cursor in it.
pub(crate) fn render_form(f: &mut Frame, area: Rect, form: &Form, title: &str, active: bool) {
    let label_width = form
        .fields
        .iter()
        .map(|field| field.label.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    let mut lines = vec![Line::from("")];
    let mut cursor = None;
    for (i, field) in form.fields.iter().enumerate() {
        let is_focused = active && i == form.focus;
        let label_style = if is_focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        let marker = if is_focused { "> " } else { "  " };
        let label = format!("{marker}{:<label_width$}", field.label);

        let value = if field.value.is_empty() && !is_focused {
            Span::styled(field.placeholder, theme::dim_style())
        } else {
            Span::styled(field.value.clone(), theme::normal_style())
        };

        if is_focused {
            let x = area.x + 1 + label.chars().count() as u16 + field.value.chars().count() as u16;
            let y = area.y + 1 + lines.len() as u16;
            cursor = Some((x, y));
        }
        lines.push(Line::from(vec![Span::styled(label, label_style), value]));
        lines.push(Line::from(""));
    }

    let hint = if active {
        "Tab next field | Enter on last field or Ctrl-s submits | Esc cancel"
    } else {
        "Press i or Enter to fill in the form"
    };
    lines.push(Line::from(Span::styled(hint, theme::dim_style())));

    let border = if active { theme::ACCENT } else { theme::OVERLAY };
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(
                format!(" {title} "),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(widget, area);

    if let Some((x, y)) = cursor {
        if x < area.x + area.width && y < area.y + area.height {
            f.set_cursor_position((x, y));
        }
    }
}
