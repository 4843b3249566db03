//! Diagnosis form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::DiagnosisRequest;
use crate::tui::styles::HeartTheme;

use super::form::{render_form, render_form_footer, FieldKind, FormField, FormState};
use super::register::GENDERS;

const YES_NO: &[(&str, &str)] = &[("No", "n"), ("Sí", "s")];

const ACTIVITY: &[(&str, &str)] = &[
    ("No realizo actividad física", "No realizo actividad física"),
    ("1-2 veces por semana", "1-2 veces por semana"),
    ("3 o más veces por semana", "3 o más veces por semana"),
];

/// Diagnosis form state
#[derive(Debug, Clone)]
pub struct DiagnosisState {
    pub form: FormState,
    pub submitting: bool,
}

impl Default for DiagnosisState {
    fn default() -> Self {
        let number = |min, max| FieldKind::Number { min, max };
        Self {
            form: FormState::new(vec![
                FormField::new("edad", "Edad", "años", number(1.0, 120.0)),
                FormField::new("genero", "Género", "", FieldKind::Choice(GENDERS)),
                FormField::new("ps", "Presión sistólica", "mmHg", number(50.0, 250.0)),
                FormField::new("pd", "Presión diastólica", "mmHg", number(30.0, 150.0)),
                FormField::new("colesterol", "Colesterol", "mg/dL", number(50.0, 600.0)),
                FormField::new("glucosa", "Glucosa", "mg/dL", number(30.0, 600.0)),
                FormField::new("fuma", "¿Fuma?", "", FieldKind::Choice(YES_NO)),
                FormField::new("alcohol", "¿Consume alcohol?", "", FieldKind::Choice(YES_NO)),
                FormField::new("actividad", "Actividad física", "", FieldKind::Choice(ACTIVITY)),
                FormField::new("peso", "Peso", "kg", number(20.0, 300.0)),
                FormField::new("estatura", "Estatura", "cm", number(100.0, 250.0)),
            ]),
            submitting: false,
        }
    }
}

impl DiagnosisState {
    fn whole(&self, key: &str) -> Result<u32, String> {
        let value = self.form.number(key)?;
        Ok(value.round() as u32)
    }

    /// Build the request from the form.
    ///
    /// # Errors
    /// Returns the first field that does not parse or is out of range.
    pub fn request(&self) -> Result<DiagnosisRequest, String> {
        Ok(DiagnosisRequest {
            edad: self.whole("edad")?,
            genero: self.form.value("genero"),
            ps: self.whole("ps")?,
            pd: self.whole("pd")?,
            colesterol: self.form.number("colesterol")?,
            glucosa: self.form.number("glucosa")?,
            fuma: self.form.value("fuma"),
            alcohol: self.form.value("alcohol"),
            actividad: self.form.value("actividad"),
            peso: self.form.number("peso")?,
            estatura: self.whole("estatura")?,
        })
    }

    pub fn fail(&mut self, message: &str) {
        self.submitting = false;
        self.form.set_error(message);
    }
}

pub fn render_diagnosis(f: &mut Frame, area: Rect, state: &DiagnosisState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let mut header = vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Diagnóstico Cardiovascular", HeartTheme::title()),
    ];
    if state.submitting {
        header.push(Span::styled(" │ Calculando riesgo...", HeartTheme::info()));
    } else {
        header.push(Span::styled(" │ Datos clínicos", HeartTheme::text_secondary()));
    }
    let header = Paragraph::new(Line::from(header))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(HeartTheme::border()),
        );
    f.render_widget(header, chunks[0]);

    render_form(f, chunks[1], &state.form, 2);
    render_form_footer(f, chunks[2], &state.form, "Diagnosticar");
}
