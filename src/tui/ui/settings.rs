//! Personal data settings.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::PersonalData;
use crate::tui::styles::HeartTheme;

use super::form::{render_form, render_form_footer, FormState};
use super::register::{personal_data, personal_fields};

/// Settings page state
#[derive(Debug, Clone)]
pub struct SettingsState {
    pub form: FormState,
    pub loading: bool,
    pub saving: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            form: FormState::new(personal_fields()),
            loading: false,
            saving: false,
        }
    }
}

impl SettingsState {
    pub fn begin_loading(&mut self) {
        *self = Self {
            loading: true,
            ..Default::default()
        };
    }

    pub fn set_loaded(&mut self, result: Result<PersonalData, &'static str>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.form.set_value("nombre", &data.nombre);
                self.form.set_value("apellido", &data.apellido);
                self.form.set_value("fecha_nacimiento", &data.fecha_nacimiento);
                self.form.set_value("genero", &data.genero);
                self.form.set_value("telefono", &data.telefono);
                self.form.set_value("direccion", &data.direccion);
                self.form.set_value("dni", &data.dni);
            }
            Err(message) => self.form.set_error(message),
        }
    }

    #[must_use]
    pub fn data(&self) -> PersonalData {
        personal_data(&self.form)
    }

    pub fn set_saved(&mut self, result: Result<&'static str, &'static str>) {
        self.saving = false;
        match result {
            Ok(message) => self.form.set_success(message),
            Err(message) => self.form.set_error(message),
        }
    }
}

pub fn render_settings(f: &mut Frame, area: Rect, state: &SettingsState) {
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
        Span::styled("Configuración", HeartTheme::title()),
    ];
    if state.loading {
        header.push(Span::styled(" │ Cargando...", HeartTheme::info()));
    } else if state.saving {
        header.push(Span::styled(" │ Guardando...", HeartTheme::info()));
    } else {
        header.push(Span::styled(" │ Datos personales", HeartTheme::text_secondary()));
    }
    f.render_widget(
        Paragraph::new(Line::from(header)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(HeartTheme::border()),
        ),
        chunks[0],
    );

    render_form(f, chunks[1], &state.form, 2);
    render_form_footer(f, chunks[2], &state.form, "Guardar");
}
