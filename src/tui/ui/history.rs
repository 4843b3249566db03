//! Administrator view of one patient's diagnostic history.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{confidence_percent, format_measure, timestamp, DiagnosticRecord};
use crate::tui::styles::HeartTheme;

pub const NO_RECORDS: &str = "No hay diagnósticos registrados.";

const COLUMNS: [&str; 10] = [
    "Fecha",
    "P. Sistólica",
    "P. Diastólica",
    "Colesterol",
    "Glucosa",
    "Actividad",
    "Peso",
    "Estatura",
    "Riesgo",
    "Confianza",
];

/// History page state
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    pub patient_id: Option<i64>,
    /// Username shown in the title, when known
    pub patient_label: Option<String>,
    pub loading: bool,
    pub records: Vec<DiagnosticRecord>,
    pub error: Option<&'static str>,
    pub scroll: usize,
}

impl HistoryState {
    /// Reset for a new patient.
    pub fn begin(&mut self, patient_id: i64, label: Option<String>) {
        *self = Self {
            patient_id: Some(patient_id),
            patient_label: label,
            loading: true,
            ..Default::default()
        };
    }

    /// Store a fetch result. Responses for another patient are dropped.
    pub fn set_records(
        &mut self,
        patient_id: i64,
        result: Result<Vec<DiagnosticRecord>, &'static str>,
    ) -> bool {
        if self.patient_id != Some(patient_id) {
            tracing::debug!(patient_id, "Dropping history for a patient no longer shown");
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(message) => {
                self.records.clear();
                self.error = Some(message);
            }
        }
        self.scroll = 0;
        true
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.records.len() {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

fn record_cells(d: &DiagnosticRecord) -> [String; 10] {
    [
        timestamp::format_full(&d.fecha_diagnostico),
        format_measure(d.ps),
        format_measure(d.pd),
        format_measure(d.colesterol),
        format_measure(d.glucosa),
        d.actividad.clone(),
        format!("{} kg", format_measure(d.peso)),
        format!("{} cm", format_measure(d.estatura)),
        d.riesgo.label().to_string(),
        confidence_percent(d.confianza, 2),
    ]
}

pub fn render_history(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let mut header = vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Historial de Diagnósticos", HeartTheme::title()),
    ];
    if let Some(label) = &state.patient_label {
        header.push(Span::styled(format!(" │ {label}"), HeartTheme::text_secondary()));
    }
    f.render_widget(
        Paragraph::new(Line::from(header)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(HeartTheme::border()),
        ),
        chunks[0],
    );

    let message = if state.loading {
        Some(("Cargando historial...", HeartTheme::info()))
    } else if let Some(err) = state.error {
        Some((err, HeartTheme::danger()))
    } else if state.records.is_empty() {
        Some((NO_RECORDS, HeartTheme::text_secondary()))
    } else {
        None
    };

    match message {
        Some((text, style)) => {
            let p = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(text, style))])
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(HeartTheme::border()),
                );
            f.render_widget(p, chunks[1]);
        }
        None => {
            let header = Row::new(
                COLUMNS
                    .into_iter()
                    .map(|h| Cell::from(h).style(HeartTheme::table_header())),
            );
            let rows = state.records.iter().skip(state.scroll).map(|d| {
                let risk = HeartTheme::risk_level(d.riesgo);
                let cells = record_cells(d);
                Row::new(cells.into_iter().enumerate().map(move |(i, c)| {
                    let cell = Cell::from(c);
                    if i == 8 {
                        cell.style(risk)
                    } else {
                        cell.style(HeartTheme::text())
                    }
                }))
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Length(19),
                    Constraint::Length(12),
                    Constraint::Length(13),
                    Constraint::Length(10),
                    Constraint::Length(8),
                    Constraint::Min(14),
                    Constraint::Length(9),
                    Constraint::Length(9),
                    Constraint::Length(7),
                    Constraint::Length(9),
                ],
            )
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(HeartTheme::border()),
            );
            f.render_widget(table, chunks[1]);
        }
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", HeartTheme::key_hint()),
        Span::styled("Desplazar ", HeartTheme::key_desc()),
        Span::styled("[Esc] ", HeartTheme::key_hint()),
        Span::styled("Volver", HeartTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::sample_record;
    use crate::domain::RiskLevel;
    use crate::tui::ui::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(state: &HistoryState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 16)).expect("Test terminal");
        terminal
            .draw(|f| render_history(f, f.area(), state))
            .expect("Draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_cells() {
        let cells = record_cells(&sample_record(RiskLevel::Medium));
        assert_eq!(cells[0], "15/10/2024 10:30:05");
        assert_eq!(cells[6], "80.5 kg");
        assert_eq!(cells[7], "175 cm");
        assert_eq!(cells[8], "Medio");
        assert_eq!(cells[9], "91.34%");
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut state = HistoryState::default();
        state.begin(4, Some("ana".into()));
        assert!(!state.set_records(9, Ok(vec![sample_record(RiskLevel::Low)])));
        assert!(state.loading);
        assert!(state.set_records(4, Ok(vec![])));
        assert!(!state.loading);
    }

    #[test]
    fn test_render_states() {
        let mut state = HistoryState::default();
        state.begin(4, None);
        state.set_records(4, Ok(vec![]));
        assert!(screen_text(&state).contains(NO_RECORDS));

        state.set_records(4, Err("No se pudo cargar el historial del paciente."));
        let text = screen_text(&state);
        assert!(text.contains("No se pudo cargar el historial del paciente."));
        assert!(!text.contains(NO_RECORDS));

        state.set_records(4, Ok(vec![sample_record(RiskLevel::High)]));
        let text = screen_text(&state);
        assert!(text.contains("Alto"));
        assert!(text.contains("91.34%"));
    }
}
