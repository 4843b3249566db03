//! Login screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::Credentials;
use crate::tui::styles::HeartTheme;

use super::form::{render_form, render_form_footer, FieldKind, FormField, FormState};

/// Login form state
#[derive(Debug, Clone)]
pub struct LoginState {
    pub form: FormState,
    pub submitting: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            form: FormState::new(vec![
                FormField::new("username", "Usuario", "Nombre de usuario", FieldKind::Text),
                FormField::new("password", "Contraseña", "••••••••", FieldKind::Secret),
            ]),
            submitting: false,
        }
    }
}

impl LoginState {
    /// Credentials typed so far.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.form.value("username"),
            password: self.form.value("password"),
        }
    }

    /// Called once the request is queued; the password buffer is wiped.
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

pub fn render_login(f: &mut Frame, area: Rect, state: &LoginState) {
    let outer = centered(area, 60, 14);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(10), // Fields
            Constraint::Min(2),    // Footer
        ])
        .split(outer);

    let title = if state.submitting {
        Line::from(vec![
            Span::styled("Iniciar Sesión", HeartTheme::title()),
            Span::styled(" │ Verificando...", HeartTheme::info()),
        ])
    } else {
        Line::from(Span::styled("Iniciar Sesión", HeartTheme::title()))
    };
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);
    render_form(f, inner, &state.form, 1);

    render_form_footer(f, chunks[2], &state.form, "Entrar");
}

/// Rectangle of at most `width` x `height` centred in `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_and_wipe() {
        let mut state = LoginState::default();
        state.form.set_value("username", "  ana ");
        state.form.set_value("password", "secreto");

        let creds = state.credentials();
        assert_eq!(creds.username, "ana");
        assert_eq!(creds.password, "secreto");

        state.mark_submitted();
        assert!(state.submitting);
        assert_eq!(state.form.value("password"), "");
        assert_eq!(state.form.value("username"), "ana");
    }

    #[test]
    fn test_centered_clamps() {
        let r = centered(Rect::new(0, 0, 40, 10), 60, 12);
        assert_eq!(r, Rect::new(0, 0, 40, 10));
        let r = centered(Rect::new(0, 0, 100, 30), 60, 12);
        assert_eq!(r, Rect::new(20, 9, 60, 12));
    }
}
