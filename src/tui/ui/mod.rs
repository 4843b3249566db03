//! UI module: View components for the TUI.

pub mod admin;
pub mod diagnosis;
pub mod form;
pub mod header;
pub mod history;
pub mod home;
pub mod login;
pub mod register;
pub mod results;
pub mod settings;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::{HeartTheme, BRAND};

pub fn render_footer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "AVISO: Los resultados son orientativos y no sustituyen la evaluación de un profesional médico.",
            HeartTheme::text_muted(),
        )]),
        Line::from(vec![
            Span::styled(format!("© {BRAND} "), HeartTheme::text_muted()),
            Span::styled("[Ctrl+Q] ", HeartTheme::key_hint()),
            Span::styled("Salir", HeartTheme::key_desc()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(HeartTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

/// Flatten a test buffer into lines of text.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}
