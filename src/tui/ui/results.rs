//! Results screen with the confidence donut.

use std::f64::consts::TAU;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::domain::{confidence_percent, timestamp, LatestDiagnosis, RiskLevel};
use crate::tui::styles::HeartTheme;

/// Inner radius of the ring relative to the outer one.
const CUTOUT: f64 = 0.70;
const RINGS: usize = 8;
const STEPS: usize = 240;

pub const NO_DIAGNOSIS: &str = "Aún no has realizado ningún diagnóstico.";

/// Donut of `confianza` against the remainder, in the colour of the level.
///
/// Point clouds are computed once when the chart is built and reused on
/// every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskChart {
    pub level: RiskLevel,
    pub confianza: f64,
    filled: Vec<(f64, f64)>,
    track: Vec<(f64, f64)>,
}

impl RiskChart {
    #[must_use]
    pub fn new(level: RiskLevel, confianza: f64) -> Self {
        let (filled, track) = segments(confianza, STEPS);
        Self {
            level,
            confianza,
            filled,
            track,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        HeartTheme::risk_color(self.level)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let color = self.color();
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-1.1, 1.1])
            .y_bounds([-1.1, 1.1])
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &self.track,
                    color: HeartTheme::CHART_TRACK,
                });
                ctx.draw(&Points {
                    coords: &self.filled,
                    color,
                });
            });
        f.render_widget(canvas, area);

        if area.height >= 2 {
            let label = Rect::new(area.x, area.y + area.height / 2 - 1, area.width, 2);
            let text = Paragraph::new(vec![
                Line::from(Span::styled(
                    confidence_percent(self.confianza, 1),
                    HeartTheme::risk_level(self.level),
                )),
                Line::from(Span::styled("Confianza", HeartTheme::text_secondary())),
            ])
            .alignment(Alignment::Center);
            f.render_widget(text, label);
        }
    }
}

/// Split an annulus into the share covered by `confianza` (clockwise from
/// twelve o'clock) and the remaining track.
#[must_use]
pub fn segments(confianza: f64, steps: usize) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let share = confianza.clamp(0.0, 1.0);
    let mut filled = Vec::new();
    let mut track = Vec::new();
    if steps == 0 {
        return (filled, track);
    }

    for ring in 0..RINGS {
        let r = CUTOUT + (1.0 - CUTOUT) * ring as f64 / (RINGS - 1) as f64;
        for step in 0..steps {
            let fraction = step as f64 / steps as f64;
            let theta = fraction * TAU;
            let point = (r * theta.sin(), r * theta.cos());
            if fraction < share {
                filled.push(point);
            } else {
                track.push(point);
            }
        }
    }
    (filled, track)
}

/// Results page state
#[derive(Debug, Clone, Default)]
pub struct ResultsState {
    pub loading: bool,
    pub diagnosis: Option<LatestDiagnosis>,
    /// At most one chart exists; a new result replaces it.
    pub chart: Option<RiskChart>,
    pub error: Option<&'static str>,
}

impl ResultsState {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn set_result(&mut self, result: Result<Option<LatestDiagnosis>, &'static str>) {
        self.loading = false;
        self.chart = None;
        match result {
            Ok(diagnosis) => {
                self.chart = diagnosis
                    .as_ref()
                    .map(|d| RiskChart::new(d.riesgo, d.confianza));
                self.diagnosis = diagnosis;
                self.error = None;
            }
            Err(message) => {
                self.diagnosis = None;
                self.error = Some(message);
            }
        }
    }
}

pub fn render_results(f: &mut Frame, area: Rect, state: &ResultsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", HeartTheme::text()),
        Span::styled("Resultados de tu Diagnóstico", HeartTheme::title()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(header, chunks[0]);

    if state.loading {
        render_message(f, chunks[1], "Cargando resultados...", HeartTheme::info());
    } else if let Some(message) = state.error {
        render_message(f, chunks[1], message, HeartTheme::danger());
    } else if let (Some(diagnosis), Some(chart)) = (&state.diagnosis, &state.chart) {
        render_result_card(f, chunks[1], diagnosis, chart);
    } else {
        render_message(f, chunks[1], NO_DIAGNOSIS, HeartTheme::text_secondary());
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[r] ", HeartTheme::key_hint()),
        Span::styled("Actualizar ", HeartTheme::key_desc()),
        Span::styled("[n] ", HeartTheme::key_hint()),
        Span::styled("Nuevo diagnóstico ", HeartTheme::key_desc()),
        Span::styled("[Esc] ", HeartTheme::key_hint()),
        Span::styled("Inicio", HeartTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(footer, chunks[2]);
}

fn render_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
    let p = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(message.to_string(), style))])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(HeartTheme::border()),
        );
    f.render_widget(p, area);
}

fn render_result_card(f: &mut Frame, area: Rect, diagnosis: &LatestDiagnosis, chart: &RiskChart) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .margin(1)
        .split(inner);

    let chart_area = Rect::new(cols[0].x, cols[0].y, cols[0].width, cols[0].height.min(14));
    chart.render(f, chart_area);

    let level = diagnosis.riesgo;
    let fecha = diagnosis
        .fecha
        .as_deref()
        .map(timestamp::format_full)
        .unwrap_or_else(|| "-".to_string());

    let details = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Nivel de Riesgo: ", HeartTheme::text()),
            Span::styled(level.label(), HeartTheme::risk_level(level)),
        ]),
        Line::from(Span::styled(level.alert(), HeartTheme::risk_level(level))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Fecha del diagnóstico: ", HeartTheme::text_secondary()),
            Span::styled(fecha, HeartTheme::title()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Recomendaciones:", HeartTheme::subtitle())),
        Line::from(Span::styled(level.recommendation(), HeartTheme::text())),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(details, cols[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::ui::buffer_text;
    use ratatui::{backend::TestBackend, Terminal};

    fn latest(riesgo: RiskLevel, confianza: f64) -> LatestDiagnosis {
        LatestDiagnosis {
            riesgo,
            confianza,
            fecha: Some("2024-10-15 10:30:05".into()),
        }
    }

    fn screen_text(state: &ResultsState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("Test terminal");
        terminal
            .draw(|f| render_results(f, f.area(), state))
            .expect("Draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_segments_split_by_confidence() {
        let (filled, track) = segments(0.25, 100);
        assert_eq!(filled.len(), 25 * RINGS);
        assert_eq!(track.len(), 75 * RINGS);

        let (filled, track) = segments(1.5, 100);
        assert_eq!(track.len(), 0);
        assert_eq!(filled.len(), 100 * RINGS);
    }

    #[test]
    fn test_segments_stay_on_ring() {
        let (filled, track) = segments(0.5, 60);
        for (x, y) in filled.iter().chain(track.iter()) {
            let r = (x * x + y * y).sqrt();
            assert!(r >= CUTOUT - 1e-9 && r <= 1.0 + 1e-9);
        }
        // The first filled point sits at twelve o'clock.
        let (x, y) = filled[0];
        assert!(x.abs() < 1e-9 && y > 0.0);
    }

    #[test]
    fn test_new_result_replaces_chart() {
        let mut state = ResultsState::default();
        state.set_result(Ok(Some(latest(RiskLevel::Low, 0.8))));
        assert_eq!(state.chart.as_ref().map(|c| c.level), Some(RiskLevel::Low));

        state.set_result(Ok(Some(latest(RiskLevel::High, 0.6))));
        let chart = state.chart.as_ref().expect("Chart for the new result");
        assert_eq!(chart.level, RiskLevel::High);
        assert_eq!(chart.color(), HeartTheme::DANGER);

        state.set_result(Ok(None));
        assert!(state.chart.is_none());
    }

    #[test]
    fn test_render_labels_per_level() {
        for (level, label, alert) in [
            (RiskLevel::Low, "Bajo", "¡Estás en buen estado!"),
            (RiskLevel::Medium, "Medio", "Precaución: cuida tus hábitos"),
            (RiskLevel::High, "Alto", "¡Alerta! Riesgo alto, consulta urgente"),
        ] {
            let mut state = ResultsState::default();
            state.set_result(Ok(Some(latest(level, 0.913))));
            let text = screen_text(&state);
            assert!(text.contains(&format!("Nivel de Riesgo: {label}")), "{label}");
            assert!(text.contains(alert));
            assert!(text.contains("91.3%"));
            assert_eq!(
                state.chart.as_ref().map(RiskChart::color),
                Some(HeartTheme::risk_color(level))
            );
        }
    }

    #[test]
    fn test_render_empty_and_error() {
        let mut state = ResultsState::default();
        state.set_result(Ok(None));
        assert!(screen_text(&state).contains(NO_DIAGNOSIS));

        state.set_result(Err("No se pudieron cargar los resultados."));
        assert!(screen_text(&state).contains("No se pudieron cargar los resultados."));
    }
}
