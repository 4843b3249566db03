//! Generic input form used by the login, registration, diagnosis and
//! settings pages.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::HeartTheme;

/// Kind of input a field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Free text rendered masked
    Secret,
    /// Decimal number within bounds
    Number { min: f64, max: f64 },
    /// One of a fixed list of `(label, wire value)` options
    Choice(&'static [(&'static str, &'static str)]),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub value: String,
    /// Selected option for `Choice` fields
    pub choice: usize,
}

impl FormField {
    #[must_use]
    pub fn new(key: &'static str, label: &'static str, hint: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            hint,
            kind,
            value: String::new(),
            choice: 0,
        }
    }

    /// Current value as sent to the backend.
    #[must_use]
    pub fn wire_value(&self) -> &str {
        match &self.kind {
            FieldKind::Choice(options) => options
                .get(self.choice)
                .map(|(_, value)| *value)
                .unwrap_or(""),
            _ => self.value.as_str(),
        }
    }

    fn display_value(&self) -> Option<String> {
        match &self.kind {
            FieldKind::Choice(options) => options
                .get(self.choice)
                .map(|(label, _)| format!("◀ {label} ▶")),
            FieldKind::Secret if !self.value.is_empty() => {
                Some("•".repeat(self.value.chars().count()))
            }
            _ if !self.value.is_empty() => Some(self.value.clone()),
            _ => None,
        }
    }
}

/// Feedback line under a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

/// Form state
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub notice: Option<Notice>,
}

impl FormState {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            notice: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.fields.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn current(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.selected_field)
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        let Some(field) = self.current() else {
            return;
        };
        let accepted = match field.kind {
            FieldKind::Text | FieldKind::Secret => !c.is_control(),
            FieldKind::Number { .. } => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Choice(_) => false,
        };
        if accepted {
            field.value.push(c);
            self.notice = None;
        } else if c == ' ' {
            self.cycle_choice(true);
        }
    }

    /// Step through the options of a `Choice` field
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.current() else {
            return;
        };
        if let FieldKind::Choice(options) = field.kind {
            if options.is_empty() {
                return;
            }
            field.choice = if forward {
                (field.choice + 1) % options.len()
            } else {
                (field.choice + options.len() - 1) % options.len()
            };
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let Some(field) = self.current() {
            field.value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let Some(field) = self.current() {
            field.value.zeroize();
        }
    }

    /// Wipe every `Secret` buffer.
    pub fn clear_secrets(&mut self) {
        for field in self.fields.iter_mut() {
            if field.kind == FieldKind::Secret {
                field.value.zeroize();
            }
        }
    }

    /// Wipe all buffers and start over.
    pub fn clear_all(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
            field.choice = 0;
        }
        self.selected_field = 0;
        self.notice = None;
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Wire value of a field (trimmed for text inputs).
    #[must_use]
    pub fn value(&self, key: &str) -> String {
        match self.field(key) {
            Some(f) if f.kind == FieldKind::Secret => f.value.clone(),
            Some(f) => f.wire_value().trim().to_string(),
            None => String::new(),
        }
    }

    /// Set a text value, or select the option whose wire value matches.
    pub fn set_value(&mut self, key: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            match field.kind {
                FieldKind::Choice(options) => {
                    if let Some(idx) = options
                        .iter()
                        .position(|(_, v)| v.eq_ignore_ascii_case(value.trim()))
                    {
                        field.choice = idx;
                    }
                }
                _ => field.value = value.to_string(),
            }
        }
    }

    /// Parse a `Number` field and check its bounds.
    ///
    /// # Errors
    /// Returns a message naming the field.
    pub fn number(&self, key: &str) -> Result<f64, String> {
        let field = self
            .field(key)
            .ok_or_else(|| format!("{key}: campo desconocido"))?;
        let value: f64 = field
            .value
            .trim()
            .parse()
            .map_err(|_| format!("{}: número no válido", field.label))?;
        if let FieldKind::Number { min, max } = field.kind {
            if value < min || value > max {
                return Err(format!(
                    "{}: el valor debe estar entre {} y {}",
                    field.label, min, max
                ));
            }
        }
        Ok(value)
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Error(message.into()));
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::Success(message.into()));
    }
}

/// Render a form in one or two columns.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, columns: usize) {
    let columns = columns.clamp(1, 2);
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .margin(1)
        .split(area);

    let per_column = state.fields.len().div_ceil(columns);
    for (col, column_area) in areas.iter().enumerate() {
        let start = (col * per_column).min(state.fields.len());
        let end = (start + per_column).min(state.fields.len());
        render_field_column(
            f,
            *column_area,
            &state.fields[start..end],
            start,
            state.selected_field,
        );
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    selected: usize,
) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == selected;
        let (border_style, title_style) = if is_selected {
            (HeartTheme::border_focused(), HeartTheme::focused())
        } else {
            (HeartTheme::border(), HeartTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value = match field.display_value() {
            Some(v) => Span::styled(v, HeartTheme::text()),
            None => Span::styled(field.hint, HeartTheme::text_muted()),
        };

        let cursor = if is_selected && !matches!(field.kind, FieldKind::Choice(_)) {
            Span::styled("▌", Style::default().fg(HeartTheme::PRIMARY_LIGHT))
        } else {
            Span::raw("")
        };

        let content = Paragraph::new(Line::from(vec![Span::raw(" "), value, cursor])).block(block);
        f.render_widget(content, chunks[i]);
    }
}

/// Footer for form pages: the notice if any, otherwise key hints.
pub fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState, submit_label: &str) {
    let content = match &state.notice {
        Some(Notice::Error(err)) => Line::from(vec![
            Span::styled("! ", HeartTheme::danger()),
            Span::styled(err.clone(), HeartTheme::danger()),
        ]),
        Some(Notice::Success(msg)) => Line::from(vec![
            Span::styled("✓ ", HeartTheme::success()),
            Span::styled(msg.clone(), HeartTheme::success()),
        ]),
        None => Line::from(vec![
            Span::styled("[↑↓] ", HeartTheme::key_hint()),
            Span::styled("Navegar ", HeartTheme::key_desc()),
            Span::styled("[←→] ", HeartTheme::key_hint()),
            Span::styled("Opción ", HeartTheme::key_desc()),
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled(format!("{submit_label} "), HeartTheme::key_desc()),
            Span::styled("[Esc] ", HeartTheme::key_hint()),
            Span::styled("Volver", HeartTheme::key_desc()),
        ]),
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(footer, area);
}
