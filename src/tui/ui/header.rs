//! Navigation bar with role-gated links and the user dropdown.
//!
//! Layout is computed once per frame by [`layout_header`] and kept by the
//! app, so mouse events can be hit-tested against what was drawn.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::domain::{User, UserType};
use crate::tui::styles::{HeartTheme, BRAND};

/// Header link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Home,
    Diagnosis,
    Results,
    AdminPanel,
    Login,
    Register,
    /// Session menu toggle
    UserMenu,
}

impl NavLink {
    /// Text shown in the bar. The session toggle shows the username.
    #[must_use]
    pub fn label(&self, user: Option<&User>) -> String {
        match self {
            Self::Home => "Inicio".into(),
            Self::Diagnosis => "Diagnóstico".into(),
            Self::Results => "Resultados".into(),
            Self::AdminPanel => "Panel Admin".into(),
            Self::Login => "Iniciar Sesión".into(),
            Self::Register => "Registrarse".into(),
            Self::UserMenu => match user {
                Some(u) => format!("{} ▼", u.username),
                None => "▼".into(),
            },
        }
    }

    /// Function key bound to the link.
    #[must_use]
    pub fn hotkey(&self) -> KeyCode {
        match self {
            Self::Home => KeyCode::F(1),
            Self::Diagnosis => KeyCode::F(2),
            Self::Results => KeyCode::F(3),
            Self::AdminPanel => KeyCode::F(4),
            Self::Login => KeyCode::F(5),
            Self::Register => KeyCode::F(6),
            Self::UserMenu => KeyCode::F(10),
        }
    }
}

/// Links visible for the current session, in display order.
#[must_use]
pub fn nav_links(user: Option<&User>) -> Vec<NavLink> {
    let mut links = vec![NavLink::Home];
    match user.map(|u| u.user_type) {
        Some(UserType::Paciente) => {
            links.extend([NavLink::Diagnosis, NavLink::Results, NavLink::UserMenu]);
        }
        Some(UserType::Administrador) => {
            links.extend([
                NavLink::AdminPanel,
                NavLink::Diagnosis,
                NavLink::Results,
                NavLink::UserMenu,
            ]);
        }
        None => links.extend([NavLink::Login, NavLink::Register]),
    }
    links
}

/// Visible link bound to `key`, if any.
#[must_use]
pub fn link_for_key(user: Option<&User>, key: KeyCode) -> Option<NavLink> {
    nav_links(user).into_iter().find(|l| l.hotkey() == key)
}

/// Session menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Settings,
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Settings, MenuItem::Logout];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Settings => "Configuración",
            Self::Logout => "Cerrar Sesión",
        }
    }
}

/// What a header interaction asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Follow(NavLink),
    Select(MenuItem),
}

/// Dropdown state
#[derive(Debug, Clone, Default)]
pub struct HeaderState {
    pub menu_open: bool,
    pub menu_selected: usize,
}

impl HeaderState {
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        self.menu_selected = 0;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Keyboard handling while the dropdown is open. Returns `None` for
    /// keys the dropdown does not consume.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<Option<HeaderAction>> {
        if !self.menu_open {
            return None;
        }
        match key {
            KeyCode::Up => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
                Some(None)
            }
            KeyCode::Down | KeyCode::Tab => {
                self.menu_selected = (self.menu_selected + 1).min(MenuItem::ALL.len() - 1);
                Some(None)
            }
            KeyCode::Enter => {
                let item = MenuItem::ALL.get(self.menu_selected).copied();
                self.close_menu();
                Some(item.map(HeaderAction::Select))
            }
            KeyCode::Esc | KeyCode::F(10) => {
                self.close_menu();
                Some(None)
            }
            _ => None,
        }
    }

    /// Mouse-down handling against the regions drawn last frame.
    ///
    /// While the dropdown is open, a press outside the toggle and the
    /// dropdown closes it. A press on the toggle flips the dropdown exactly
    /// once.
    pub fn on_mouse_down(&mut self, pos: Position, regions: &HeaderRegions) -> Option<HeaderAction> {
        if regions.toggle.is_some_and(|t| t.contains(pos)) {
            self.toggle_menu();
            return None;
        }

        if self.menu_open {
            if let Some(item) = regions.item_at(pos) {
                self.close_menu();
                return Some(HeaderAction::Select(item));
            }
            if regions.in_menu(pos) {
                return None;
            }
            self.close_menu();
        }

        regions.link_at(pos).map(HeaderAction::Follow)
    }
}

/// Screen rectangles of everything clickable in the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderRegions {
    pub bar: Rect,
    pub brand: Rect,
    pub links: Vec<(NavLink, Rect)>,
    pub toggle: Option<Rect>,
    pub dropdown: Option<Rect>,
    pub items: Vec<(MenuItem, Rect)>,
}

impl HeaderRegions {
    /// Inside the toggle or the open dropdown.
    #[must_use]
    pub fn in_menu(&self, pos: Position) -> bool {
        self.toggle.is_some_and(|r| r.contains(pos))
            || self.dropdown.is_some_and(|r| r.contains(pos))
    }

    #[must_use]
    pub fn link_at(&self, pos: Position) -> Option<NavLink> {
        if self.brand.contains(pos) {
            return Some(NavLink::Home);
        }
        self.links
            .iter()
            .find(|(link, r)| *link != NavLink::UserMenu && r.contains(pos))
            .map(|(link, _)| *link)
    }

    #[must_use]
    pub fn item_at(&self, pos: Position) -> Option<MenuItem> {
        self.items
            .iter()
            .find(|(_, r)| r.contains(pos))
            .map(|(item, _)| *item)
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Place the brand, links, toggle and (when open) the dropdown.
///
/// `bar` is the one-line header row and `screen` the whole frame, which
/// bounds the dropdown.
#[must_use]
pub fn layout_header(
    bar: Rect,
    screen: Rect,
    user: Option<&User>,
    state: &HeaderState,
) -> HeaderRegions {
    let mut regions = HeaderRegions {
        bar,
        ..Default::default()
    };

    let brand_width = text_width(&format!(" ♥ {BRAND} ")).min(bar.width);
    regions.brand = Rect::new(bar.x, bar.y, brand_width, bar.height.min(1));

    let links = nav_links(user);
    let mut right = bar.right();

    if links.contains(&NavLink::UserMenu) {
        let width = (text_width(&NavLink::UserMenu.label(user)) + 2).min(bar.width);
        let toggle = Rect::new(right.saturating_sub(width), bar.y, width, bar.height.min(1));
        right = toggle.x;
        regions.toggle = Some(toggle);
        regions.links.push((NavLink::UserMenu, toggle));

        if state.menu_open {
            let inner = MenuItem::ALL
                .iter()
                .map(|i| text_width(i.label()) + 2)
                .max()
                .unwrap_or(0);
            let width = (inner + 2).max(toggle.width).min(screen.width);
            let height = (MenuItem::ALL.len() as u16 + 2).min(screen.bottom().saturating_sub(toggle.bottom()));
            let x = toggle.right().saturating_sub(width).max(screen.x);
            let dropdown = Rect::new(x, toggle.bottom(), width, height);
            regions.dropdown = Some(dropdown);

            for (i, item) in MenuItem::ALL.iter().enumerate() {
                let y = dropdown.y + 1 + i as u16;
                if y + 1 < dropdown.bottom() {
                    regions
                        .items
                        .push((*item, Rect::new(dropdown.x + 1, y, dropdown.width.saturating_sub(2), 1)));
                }
            }
        }
    }

    let mut x = regions.brand.right() + 1;
    for link in links.iter().filter(|l| **l != NavLink::UserMenu) {
        let width = text_width(&link.label(user)) + 2;
        if x + width > right {
            break;
        }
        regions.links.push((*link, Rect::new(x, bar.y, width, bar.height.min(1))));
        x += width + 1;
    }

    regions
}

/// Draw the navigation bar. `active` is the link of the current screen.
pub fn render_header(
    f: &mut Frame,
    regions: &HeaderRegions,
    user: Option<&User>,
    active: Option<NavLink>,
) {
    f.render_widget(Block::default().style(HeartTheme::header()), regions.bar);

    let brand = Paragraph::new(Span::styled(format!(" ♥ {BRAND} "), HeartTheme::header()));
    f.render_widget(brand, regions.brand);

    for (link, rect) in &regions.links {
        let label = format!(" {} ", link.label(user));
        let style = HeartTheme::nav_link(Some(*link) == active);
        f.render_widget(Paragraph::new(Span::styled(label, style)), *rect);
    }
}

/// Draw the open dropdown over the page.
pub fn render_dropdown(f: &mut Frame, regions: &HeaderRegions, state: &HeaderState) {
    let Some(area) = regions.dropdown else {
        return;
    };

    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(HeartTheme::border_focused())
        .style(HeartTheme::dropdown());
    f.render_widget(block, area);

    for (i, (item, rect)) in regions.items.iter().enumerate() {
        let style = if i == state.menu_selected {
            HeartTheme::selected()
        } else {
            HeartTheme::dropdown()
        };
        let line = Line::from(Span::styled(format!(" {} ", item.label()), style));
        f.render_widget(Paragraph::new(line).style(style), *rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen() -> Rect {
        Rect::new(0, 0, 100, 30)
    }

    fn bar() -> Rect {
        Rect::new(0, 0, 100, 1)
    }

    fn patient() -> User {
        User::new("ana", UserType::Paciente)
    }

    #[test]
    fn test_patient_links() {
        let user = patient();
        assert_eq!(
            nav_links(Some(&user)),
            vec![
                NavLink::Home,
                NavLink::Diagnosis,
                NavLink::Results,
                NavLink::UserMenu
            ]
        );
    }

    #[test]
    fn test_admin_links_add_panel() {
        let user = User::new("root", UserType::Administrador);
        let links = nav_links(Some(&user));
        assert!(links.contains(&NavLink::AdminPanel));
        assert_eq!(links.len(), 5);
    }

    #[test]
    fn test_anonymous_links() {
        assert_eq!(
            nav_links(None),
            vec![NavLink::Home, NavLink::Login, NavLink::Register]
        );
    }

    #[test]
    fn test_hotkeys_follow_role() {
        let user = patient();
        assert_eq!(link_for_key(Some(&user), KeyCode::F(4)), None);
        assert_eq!(link_for_key(Some(&user), KeyCode::F(2)), Some(NavLink::Diagnosis));
        assert_eq!(link_for_key(None, KeyCode::F(2)), None);
        assert_eq!(link_for_key(None, KeyCode::F(5)), Some(NavLink::Login));
    }

    #[test]
    fn test_click_outside_closes_menu() {
        let user = patient();
        let mut state = HeaderState::default();
        let closed = layout_header(bar(), screen(), Some(&user), &state);
        let toggle = closed.toggle.expect("Patient has a menu toggle");

        state.on_mouse_down(Position::new(toggle.x, toggle.y), &closed);
        assert!(state.menu_open);

        let open = layout_header(bar(), screen(), Some(&user), &state);
        let action = state.on_mouse_down(Position::new(5, 20), &open);
        assert!(!state.menu_open);
        assert_eq!(action, None);
    }

    #[test]
    fn test_toggle_click_flips_once() {
        let user = patient();
        let mut state = HeaderState::default();
        let regions = layout_header(bar(), screen(), Some(&user), &state);
        let toggle = regions.toggle.expect("Patient has a menu toggle");
        let pos = Position::new(toggle.x + 1, toggle.y);

        state.on_mouse_down(pos, &regions);
        assert!(state.menu_open);

        let regions = layout_header(bar(), screen(), Some(&user), &state);
        state.on_mouse_down(pos, &regions);
        assert!(!state.menu_open);
    }

    #[test]
    fn test_dropdown_item_selects() {
        let user = patient();
        let mut state = HeaderState {
            menu_open: true,
            menu_selected: 0,
        };
        let regions = layout_header(bar(), screen(), Some(&user), &state);
        let (item, rect) = regions.items[1];
        assert_eq!(item, MenuItem::Logout);

        let action = state.on_mouse_down(Position::new(rect.x, rect.y), &regions);
        assert_eq!(action, Some(HeaderAction::Select(MenuItem::Logout)));
        assert!(!state.menu_open);
    }

    #[test]
    fn test_click_on_link_while_open_closes_and_follows() {
        let user = patient();
        let mut state = HeaderState {
            menu_open: true,
            menu_selected: 0,
        };
        let regions = layout_header(bar(), screen(), Some(&user), &state);
        let (_, rect) = regions
            .links
            .iter()
            .find(|(l, _)| *l == NavLink::Results)
            .copied()
            .expect("Results link is laid out");

        let action = state.on_mouse_down(Position::new(rect.x, rect.y), &regions);
        assert_eq!(action, Some(HeaderAction::Follow(NavLink::Results)));
        assert!(!state.menu_open);
    }

    #[test]
    fn test_keyboard_menu() {
        let mut state = HeaderState::default();
        assert_eq!(state.handle_key(KeyCode::Down), None);

        state.toggle_menu();
        assert_eq!(state.handle_key(KeyCode::Down), Some(None));
        assert_eq!(
            state.handle_key(KeyCode::Enter),
            Some(Some(HeaderAction::Select(MenuItem::Logout)))
        );
        assert!(!state.menu_open);
    }

    #[test]
    fn test_render_admin_bar() {
        let user = User::new("root", UserType::Administrador);
        let state = HeaderState::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 5)).expect("Test terminal");
        terminal
            .draw(|f| {
                let regions = layout_header(bar(), f.area(), Some(&user), &state);
                render_header(f, &regions, Some(&user), Some(NavLink::Home));
            })
            .expect("Draw");

        let row: String = (0..100u16)
            .map(|x| terminal.backend().buffer()[(x, 0u16)].symbol().to_string())
            .collect();
        assert!(row.contains("Panel Admin"));
        assert!(row.contains("root ▼"));
        assert!(!row.contains("Iniciar Sesión"));
    }
}
