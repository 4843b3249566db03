//! Colour palette and preset styles.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLevel;

/// Application colour palette.
pub struct HeartTheme;

impl HeartTheme {
    // === Primary Colors ===

    /// Crimson - Primary colour
    pub const PRIMARY: Color = Color::Rgb(200, 35, 51); // #C82333

    /// Lighter crimson for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(240, 98, 110); // #F0626E

    /// Darker crimson for the header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(140, 20, 32); // #8C1420

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    pub const SUCCESS: Color = Color::Rgb(40, 167, 69); // #28A745
    pub const WARNING: Color = Color::Rgb(255, 193, 7); // #FFC107
    pub const DANGER: Color = Color::Rgb(220, 53, 69); // #DC3545
    pub const INFO: Color = Color::Rgb(59, 130, 246); // #3B82F6

    /// Unfilled part of the confidence donut
    pub const CHART_TRACK: Color = Color::Rgb(233, 236, 239); // #E9ECEF

    // === Background Colors ===

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42); // #0F172A
    pub const BG_CARD: Color = Color::Rgb(30, 41, 59); // #1E293B

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for selected rows and menu entries
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the navigation bar
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Navigation link, highlighted when it points at the current screen
    #[must_use]
    pub fn nav_link(active: bool) -> Style {
        if active {
            Style::default()
                .fg(Self::PRIMARY_DARK)
                .bg(Self::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::TEXT_PRIMARY).bg(Self::PRIMARY_DARK)
        }
    }

    /// Dropdown panel background
    #[must_use]
    pub fn dropdown() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_CARD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Table header row
    #[must_use]
    pub fn table_header() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Fixed colour of a risk level
    #[must_use]
    pub fn risk_color(level: RiskLevel) -> Color {
        let (r, g, b) = level.color();
        Color::Rgb(r, g, b)
    }

    /// Get risk level style
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        Style::default()
            .fg(Self::risk_color(level))
            .add_modifier(Modifier::BOLD)
    }
}

/// Brand shown at the left of the navigation bar
pub const BRAND: &str = "Salud del Corazón";
