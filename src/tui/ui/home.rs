//! Welcome screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::User;
use crate::tui::styles::{HeartTheme, BRAND};

const INTRO: &str = "La salud cardiovascular se refiere al buen funcionamiento del corazón \
y los vasos sanguíneos. Mantenerla en buen estado es fundamental para prevenir infartos, \
hipertensión y otras enfermedades crónicas. Conocer tu estado de salud te permite actuar a tiempo.";

const CONDITIONS: [(&str, &str); 3] = [
    (
        "Infarto de miocardio",
        "El flujo sanguíneo se bloquea en una parte del corazón. Es una emergencia médica.",
    ),
    (
        "Insuficiencia cardíaca",
        "El corazón no puede bombear suficiente sangre para las necesidades del cuerpo.",
    ),
    (
        "Arritmias",
        "Latidos irregulares que pueden causar mareos, fatiga o desmayos.",
    ),
];

const PREVENTION: [&str; 5] = [
    "Alimentación saludable",
    "Actividad física regular",
    "Control del estrés",
    "No fumar",
    "Controles médicos frecuentes",
];

pub fn render_home(f: &mut Frame, area: Rect, user: Option<&User>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Banner
            Constraint::Min(8),    // Body
            Constraint::Length(4), // Call to action
        ])
        .split(area);

    let banner = Paragraph::new(vec![
        Line::from(Span::styled(format!("Bienvenido a {BRAND}"), HeartTheme::title())),
        Line::from(Span::styled(
            "Tu aliado en la prevención y diagnóstico de enfermedades cardíacas.",
            HeartTheme::text_secondary(),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(banner, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let mut left = vec![
        Line::from(Span::styled(
            "¿Qué es la salud cardiovascular?",
            HeartTheme::subtitle(),
        )),
        Line::from(Span::styled(INTRO, HeartTheme::text())),
        Line::from(""),
        Line::from(Span::styled(
            "Enfermedades cardíacas más comunes",
            HeartTheme::subtitle(),
        )),
    ];
    for (name, desc) in CONDITIONS {
        left.push(Line::from(vec![
            Span::styled(format!("• {name}: "), HeartTheme::focused()),
            Span::styled(desc, HeartTheme::text_secondary()),
        ]));
    }
    f.render_widget(
        Paragraph::new(left)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::RIGHT).border_style(HeartTheme::border())),
        body[0],
    );

    let mut right = vec![Line::from(Span::styled(
        "Consejos de prevención",
        HeartTheme::subtitle(),
    ))];
    right.extend(PREVENTION.iter().map(|tip| {
        Line::from(vec![
            Span::styled("✔ ", HeartTheme::success()),
            Span::styled(*tip, HeartTheme::text()),
        ])
    }));
    f.render_widget(Paragraph::new(right).wrap(Wrap { trim: true }), body[1]);

    let action = if user.is_some() {
        Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Realizar Diagnóstico", HeartTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", HeartTheme::key_hint()),
            Span::styled("Iniciar sesión para realizar un diagnóstico", HeartTheme::key_desc()),
        ])
    };
    let cta = Paragraph::new(vec![
        Line::from(Span::styled(
            "¿Quieres conocer tu riesgo cardíaco?",
            HeartTheme::subtitle(),
        )),
        action,
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(HeartTheme::border()),
    );
    f.render_widget(cta, chunks[2]);
}
