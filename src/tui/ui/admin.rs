//! Administrator panel: patient list.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::domain::{timestamp, PatientSummary};
use crate::tui::styles::HeartTheme;

/// Patient list state
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub loading: bool,
    pub patients: Vec<PatientSummary>,
    pub error: Option<&'static str>,
    pub selected: usize,
    pub filter: String,
    pub editing_filter: bool,
}

impl AdminState {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a fetch result. A failure empties the table.
    pub fn set_patients(&mut self, result: Result<Vec<PatientSummary>, &'static str>) {
        self.loading = false;
        match result {
            Ok(patients) => {
                self.patients = patients;
                self.error = None;
            }
            Err(message) => {
                self.patients.clear();
                self.error = Some(message);
            }
        }
        self.selected = self.selected.min(self.patients.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.patients.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    #[must_use]
    pub fn selected_patient(&self) -> Option<&PatientSummary> {
        self.patients.get(self.selected)
    }

    /// Filter sent with the request, if any.
    #[must_use]
    pub fn active_filter(&self) -> Option<String> {
        let f = self.filter.trim();
        (!f.is_empty()).then(|| f.to_string())
    }
}

pub fn render_admin(f: &mut Frame, area: Rect, state: &AdminState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Filter
            Constraint::Min(0),    // Table
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let mut header = vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Panel de Administración", HeartTheme::title()),
    ];
    if state.loading {
        header.push(Span::styled(" │ Cargando...", HeartTheme::info()));
    } else {
        header.push(Span::styled(
            format!(" │ {} pacientes", state.patients.len()),
            HeartTheme::text_secondary(),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(header)).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(HeartTheme::border()),
        ),
        chunks[0],
    );

    let (filter_border, filter_text) = if state.editing_filter {
        (
            HeartTheme::border_focused(),
            Span::styled(format!("{}▌", state.filter), HeartTheme::text()),
        )
    } else if state.filter.is_empty() {
        (
            HeartTheme::border(),
            Span::styled("Pulsa / para buscar por nombre, usuario o DNI", HeartTheme::text_muted()),
        )
    } else {
        (
            HeartTheme::border(),
            Span::styled(state.filter.clone(), HeartTheme::text()),
        )
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![Span::raw(" "), filter_text])).block(
            Block::default()
                .title(Span::styled(" Filtro ", HeartTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(filter_border),
        ),
        chunks[1],
    );

    render_patient_table(f, chunks[2], state);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑↓] ", HeartTheme::key_hint()),
        Span::styled("Seleccionar ", HeartTheme::key_desc()),
        Span::styled("[Enter] ", HeartTheme::key_hint()),
        Span::styled("Ver Historial ", HeartTheme::key_desc()),
        Span::styled("[/] ", HeartTheme::key_hint()),
        Span::styled("Filtrar ", HeartTheme::key_desc()),
        Span::styled("[r] ", HeartTheme::key_hint()),
        Span::styled("Recargar", HeartTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(footer, chunks[3]);
}

fn render_patient_table(f: &mut Frame, area: Rect, state: &AdminState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());

    let area = if let Some(message) = state.error {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {message}"), HeartTheme::danger())),
            parts[0],
        );
        parts[1]
    } else {
        area
    };

    let header = Row::new(
        ["Usuario", "Nombre", "Total Diagnósticos", "Último Diagnóstico"]
            .into_iter()
            .map(|h| Cell::from(h).style(HeartTheme::table_header())),
    );

    let rows = state.patients.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.username.clone()),
            Cell::from(p.full_name()),
            Cell::from(p.diagnosis_count.to_string()),
            Cell::from(timestamp::format_short(p.last_diagnosis.as_deref())),
        ])
        .style(HeartTheme::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(HeartTheme::selected())
    .highlight_symbol("▶ ");

    let mut table_state =
        TableState::default().with_selected((!state.patients.is_empty()).then_some(state.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
