//! Registration screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{Credentials, PersonalData, Registration};
use crate::tui::styles::HeartTheme;

use super::form::{render_form, render_form_footer, FieldKind, FormField, FormState};

pub(crate) const GENDERS: &[(&str, &str)] = &[("Masculino", "masculino"), ("Femenino", "femenino")];

/// Fields of [`PersonalData`], shared with the settings page.
pub(crate) fn personal_fields() -> Vec<FormField> {
    vec![
        FormField::new("nombre", "Nombre", "", FieldKind::Text),
        FormField::new("apellido", "Apellido", "", FieldKind::Text),
        FormField::new("fecha_nacimiento", "Fecha de nacimiento", "AAAA-MM-DD", FieldKind::Text),
        FormField::new("genero", "Género", "", FieldKind::Choice(GENDERS)),
        FormField::new("telefono", "Teléfono", "", FieldKind::Text),
        FormField::new("direccion", "Dirección", "", FieldKind::Text),
        FormField::new("dni", "DNI", "", FieldKind::Text),
    ]
}

pub(crate) fn personal_data(form: &FormState) -> PersonalData {
    PersonalData {
        nombre: form.value("nombre"),
        apellido: form.value("apellido"),
        fecha_nacimiento: form.value("fecha_nacimiento"),
        genero: form.value("genero"),
        telefono: form.value("telefono"),
        direccion: form.value("direccion"),
        dni: form.value("dni"),
    }
}

/// Registration form state
#[derive(Debug, Clone)]
pub struct RegisterState {
    pub form: FormState,
    pub submitting: bool,
}

impl Default for RegisterState {
    fn default() -> Self {
        let mut fields = vec![
            FormField::new("username", "Usuario", "", FieldKind::Text),
            FormField::new("password", "Contraseña", "", FieldKind::Secret),
        ];
        fields.extend(personal_fields());
        Self {
            form: FormState::new(fields),
            submitting: false,
        }
    }
}

impl RegisterState {
    #[must_use]
    pub fn registration(&self) -> Registration {
        Registration {
            credentials: Credentials {
                username: self.form.value("username"),
                password: self.form.value("password"),
            },
            personal: personal_data(&self.form),
        }
    }

    pub fn mark_submitted(&mut self) {
        self.submitting = true;
        self.form.notice = None;
        self.form.clear_secrets();
    }

    pub fn fail(&mut self, message: &str) {
        self.submitting = false;
        self.form.set_error(message);
    }
}

pub fn render_register(f: &mut Frame, area: Rect, state: &RegisterState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(19),   // Fields
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let mut title = vec![Span::styled("Registro de Paciente", HeartTheme::title())];
    if state.submitting {
        title.push(Span::styled(" │ Enviando...", HeartTheme::info()));
    }
    f.render_widget(
        Paragraph::new(Line::from(title)).alignment(Alignment::Center),
        chunks[0],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    render_form(f, inner, &state.form, 2);

    render_form_footer(f, chunks[2], &state.form, "Registrarse");
}
