//! Main TUI application state machine.
//!
//! Handles:
//! - Screen routing and role gating
//! - Input event handling (keyboard and mouse)
//! - Session updates from backend responses
//! - Background requests via the request worker

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position},
    Frame, Terminal,
};

use crate::adapters::{ApiError, HttpBackend};
use crate::application::{AuthService, ClinicalService, RegistrationOutcome};
use crate::config::ClientConfig;
use crate::domain::Session;
use crate::ports::Backend;
use crate::Result;

use super::ui::{
    admin::{render_admin, AdminState},
    diagnosis::{render_diagnosis, DiagnosisState},
    form::FormState,
    header::{
        layout_header, link_for_key, render_dropdown, render_header, HeaderAction, HeaderRegions,
        HeaderState, MenuItem, NavLink,
    },
    history::{render_history, HistoryState},
    home::render_home,
    login::{render_login, LoginState},
    register::{render_register, RegisterState},
    render_footer,
    results::{render_results, ResultsState},
    settings::{render_settings, SettingsState},
};
use super::worker::{ApiEvent, RequestWorker};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Login,
    Register,
    Diagnosis,
    Results,
    Admin,
    /// History of the patient with this id
    AdminHistory(i64),
    Settings,
}

impl Screen {
    /// Header link highlighted while this screen is shown.
    fn nav_link(&self) -> Option<NavLink> {
        match self {
            Self::Home => Some(NavLink::Home),
            Self::Login => Some(NavLink::Login),
            Self::Register => Some(NavLink::Register),
            Self::Diagnosis => Some(NavLink::Diagnosis),
            Self::Results => Some(NavLink::Results),
            Self::Admin | Self::AdminHistory(_) => Some(NavLink::AdminPanel),
            Self::Settings => None,
        }
    }
}

/// Outcome of a key press on a form page.
enum FormInput {
    Submit,
    Cancel,
    Edited,
}

fn form_key(form: &mut FormState, key: KeyCode) -> FormInput {
    match key {
        KeyCode::Enter => return FormInput::Submit,
        KeyCode::Esc => return FormInput::Cancel,
        KeyCode::Up | KeyCode::BackTab => form.prev_field(),
        KeyCode::Down | KeyCode::Tab => form.next_field(),
        KeyCode::Left => form.cycle_choice(false),
        KeyCode::Right => form.cycle_choice(true),
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Delete => form.clear_field(),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
    FormInput::Edited
}

/// Main application state
pub struct App<B>
where
    B: Backend + 'static,
    B::Error: Into<ApiError>,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Logged-in user, if any. Only response handlers mutate it.
    session: Session,

    auth: AuthService<B>,
    clinical: ClinicalService<B>,
    worker: RequestWorker,

    header: HeaderState,
    /// Header layout drawn last frame, for mouse hit-testing
    regions: HeaderRegions,

    login_state: LoginState,
    register_state: RegisterState,
    diagnosis_state: DiagnosisState,
    results_state: ResultsState,
    admin_state: AdminState,
    history_state: HistoryState,
    settings_state: SettingsState,
}

impl App<HttpBackend> {
    /// Create the application against the configured backend.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let backend = HttpBackend::new(config.api_base_url.clone())?;
        tracing::info!(api = %config.api_base_url, "Backend configured");
        Ok(Self::with_backend(Arc::new(backend)))
    }
}

impl<B> App<B>
where
    B: Backend + 'static,
    B::Error: Into<ApiError>,
{
    /// Create the application over any backend (Composition Root).
    pub fn with_backend(backend: Arc<B>) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            session: Session::new(),
            auth: AuthService::new(Arc::clone(&backend)),
            clinical: ClinicalService::new(backend),
            worker: RequestWorker::new(),
            header: HeaderState::default(),
            regions: HeaderRegions::default(),
            login_state: LoginState::default(),
            register_state: RegisterState::default(),
            diagnosis_state: DiagnosisState::default(),
            results_state: ResultsState::default(),
            admin_state: AdminState::default(),
            history_state: HistoryState::default(),
            settings_state: SettingsState::default(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal. Mouse capture stays on for the app's lifetime so
        // clicks outside the user menu can close it.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if self.worker.in_flight() > 0 {
            tracing::debug!(pending = self.worker.in_flight(), "Exiting with requests in flight");
        }
        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_worker();

            let mut regions = HeaderRegions::default();
            terminal.draw(|f| regions = self.render(f))?;
            self.regions = regions;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key.code, key.modifiers);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole frame and return where the header put its links.
    pub fn render(&self, f: &mut Frame) -> HeaderRegions {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Navigation bar
                Constraint::Min(0),    // Page
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let user = self.session.user();
        let regions = layout_header(chunks[0], area, user, &self.header);
        render_header(f, &regions, user, self.screen.nav_link());

        let page = chunks[1];
        match self.screen {
            Screen::Home => render_home(f, page, user),
            Screen::Login => render_login(f, page, &self.login_state),
            Screen::Register => render_register(f, page, &self.register_state),
            Screen::Diagnosis => render_diagnosis(f, page, &self.diagnosis_state),
            Screen::Results => render_results(f, page, &self.results_state),
            Screen::Admin => render_admin(f, page, &self.admin_state),
            Screen::AdminHistory(_) => render_history(f, page, &self.history_state),
            Screen::Settings => render_settings(f, page, &self.settings_state),
        }

        render_footer(f, chunks[2]);

        // Drawn last so it overlays the page.
        render_dropdown(f, &regions, &self.header);
        regions
    }

    /// Apply every completed background request.
    pub fn poll_worker(&mut self) {
        while let Some(event) = self.worker.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ApiEvent) {
        if event.is_private() && !self.session.is_authenticated() {
            tracing::debug!("Dropping response that arrived after logout");
            return;
        }

        match event {
            ApiEvent::LoggedIn(Ok(user)) => {
                self.session.login(user);
                self.login_state = LoginState::default();
                self.navigate(Screen::Home);
            }
            ApiEvent::LoggedIn(Err(message)) => self.login_state.fail(message),

            ApiEvent::Registered(Ok(RegistrationOutcome::LoggedIn(user))) => {
                self.session.login(user);
                self.register_state = RegisterState::default();
                self.navigate(Screen::Home);
            }
            ApiEvent::Registered(Ok(RegistrationOutcome::Registered(message))) => {
                self.register_state = RegisterState::default();
                self.login_state = LoginState::default();
                self.login_state.form.set_success(message);
                self.navigate(Screen::Login);
            }
            ApiEvent::Registered(Err(message)) => self.register_state.fail(message),

            ApiEvent::LoggedOut(Ok(())) => {
                self.session.logout();
                self.clear_private_state();
                self.navigate(Screen::Login);
            }
            ApiEvent::LoggedOut(Err(message)) => {
                tracing::error!(reason = message, "Logout failed; keeping session");
            }

            ApiEvent::Diagnosed(Ok(outcome)) => {
                tracing::debug!(riesgo = outcome.riesgo.code(), "Diagnosis stored");
                self.diagnosis_state.submitting = false;
                self.diagnosis_state.form.clear_all();
                self.navigate(Screen::Results);
            }
            ApiEvent::Diagnosed(Err(message)) => self.diagnosis_state.fail(message),

            ApiEvent::ResultsLoaded(result) => self.results_state.set_result(result),
            ApiEvent::PatientsLoaded(result) => self.admin_state.set_patients(result),
            ApiEvent::HistoryLoaded { patient_id, result } => {
                self.history_state.set_records(patient_id, result);
            }
            ApiEvent::SettingsLoaded(result) => self.settings_state.set_loaded(result),
            ApiEvent::SettingsSaved(result) => self.settings_state.set_saved(result),
        }
    }

    /// Forget everything fetched for the previous user.
    fn clear_private_state(&mut self) {
        self.diagnosis_state = DiagnosisState::default();
        self.results_state = ResultsState::default();
        self.admin_state = AdminState::default();
        self.history_state = HistoryState::default();
        self.settings_state = SettingsState::default();
        self.header = HeaderState::default();
    }

    fn permitted(&self, screen: Screen) -> bool {
        match screen {
            Screen::Home | Screen::Login | Screen::Register => true,
            Screen::Diagnosis | Screen::Results | Screen::Settings => {
                self.session.is_authenticated()
            }
            Screen::Admin | Screen::AdminHistory(_) => self
                .session
                .user_type()
                .is_some_and(|t| t.is_admin()),
        }
    }

    /// Switch screens and issue the screen's on-entry requests.
    pub fn navigate(&mut self, screen: Screen) {
        self.header.close_menu();

        if !self.permitted(screen) {
            if self.session.is_authenticated() {
                tracing::debug!(?screen, "Screen not available for this role");
            } else {
                self.screen = Screen::Login;
            }
            return;
        }

        self.screen = screen;
        match screen {
            Screen::Results => {
                self.results_state.begin_loading();
                let clinical = self.clinical.clone();
                self.worker.spawn("results", move || {
                    ApiEvent::ResultsLoaded(clinical.latest_result())
                });
            }
            Screen::Admin => self.load_patients(),
            Screen::AdminHistory(patient_id) => {
                let label = self
                    .admin_state
                    .patients
                    .iter()
                    .find(|p| p.id == patient_id)
                    .map(|p| p.username.clone());
                self.history_state.begin(patient_id, label);
                let clinical = self.clinical.clone();
                self.worker.spawn("history", move || ApiEvent::HistoryLoaded {
                    patient_id,
                    result: clinical.history(patient_id),
                });
            }
            Screen::Settings => {
                self.settings_state.begin_loading();
                let clinical = self.clinical.clone();
                self.worker.spawn("settings", move || {
                    ApiEvent::SettingsLoaded(clinical.personal_data())
                });
            }
            Screen::Login => self.login_state.form.selected_field = 0,
            Screen::Home | Screen::Register | Screen::Diagnosis => {}
        }
    }

    fn load_patients(&mut self) {
        self.admin_state.begin_loading();
        let filter = self.admin_state.active_filter();
        let clinical = self.clinical.clone();
        self.worker.spawn("patients", move || {
            ApiEvent::PatientsLoaded(clinical.patients(filter.as_deref()))
        });
    }

    fn logout(&mut self) {
        let auth = self.auth.clone();
        self.worker
            .spawn("logout", move || ApiEvent::LoggedOut(auth.logout()));
    }

    fn header_action(&mut self, action: HeaderAction) {
        match action {
            HeaderAction::Follow(NavLink::UserMenu) => self.header.toggle_menu(),
            HeaderAction::Follow(link) => {
                let screen = match link {
                    NavLink::Home => Screen::Home,
                    NavLink::Diagnosis => Screen::Diagnosis,
                    NavLink::Results => Screen::Results,
                    NavLink::AdminPanel => Screen::Admin,
                    NavLink::Login => Screen::Login,
                    NavLink::Register => Screen::Register,
                    NavLink::UserMenu => return,
                };
                self.navigate(screen);
            }
            HeaderAction::Select(MenuItem::Settings) => self.navigate(Screen::Settings),
            HeaderAction::Select(MenuItem::Logout) => self.logout(),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);
        if let Some(action) = self.header.on_mouse_down(pos, &self.regions) {
            self.header_action(action);
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.header.handle_key(key) {
            if let Some(action) = action {
                self.header_action(action);
            }
            return;
        }

        if let Some(link) = link_for_key(self.session.user(), key) {
            self.header_action(HeaderAction::Follow(link));
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
            Screen::Diagnosis => self.handle_diagnosis_key(key),
            Screen::Results => self.handle_results_key(key),
            Screen::Admin => self.handle_admin_key(key),
            Screen::AdminHistory(_) => self.handle_history_key(key),
            Screen::Settings => self.handle_settings_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.navigate(Screen::Diagnosis),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyCode) {
        if self.login_state.submitting {
            return;
        }
        match form_key(&mut self.login_state.form, key) {
            FormInput::Submit => {
                let credentials = self.login_state.credentials();
                self.login_state.mark_submitted();
                let auth = self.auth.clone();
                self.worker
                    .spawn("login", move || ApiEvent::LoggedIn(auth.login(&credentials)));
            }
            FormInput::Cancel => self.navigate(Screen::Home),
            FormInput::Edited => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyCode) {
        if self.register_state.submitting {
            return;
        }
        match form_key(&mut self.register_state.form, key) {
            FormInput::Submit => {
                let registration = self.register_state.registration();
                self.register_state.mark_submitted();
                let auth = self.auth.clone();
                self.worker.spawn("register", move || {
                    ApiEvent::Registered(auth.register(&registration))
                });
            }
            FormInput::Cancel => self.navigate(Screen::Home),
            FormInput::Edited => {}
        }
    }

    fn handle_diagnosis_key(&mut self, key: KeyCode) {
        if self.diagnosis_state.submitting {
            return;
        }
        match form_key(&mut self.diagnosis_state.form, key) {
            FormInput::Submit => match self.diagnosis_state.request() {
                Ok(request) => {
                    self.diagnosis_state.submitting = true;
                    self.diagnosis_state.form.notice = None;
                    let clinical = self.clinical.clone();
                    self.worker.spawn("diagnosis", move || {
                        ApiEvent::Diagnosed(clinical.submit_diagnosis(&request))
                    });
                }
                Err(e) => self.diagnosis_state.form.set_error(e),
            },
            FormInput::Cancel => self.navigate(Screen::Home),
            FormInput::Edited => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => self.navigate(Screen::Results),
            KeyCode::Char('n') | KeyCode::Char('N') => self.navigate(Screen::Diagnosis),
            KeyCode::Esc => self.navigate(Screen::Home),
            _ => {}
        }
    }

    fn handle_admin_key(&mut self, key: KeyCode) {
        if self.admin_state.editing_filter {
            match key {
                KeyCode::Enter => {
                    self.admin_state.editing_filter = false;
                    self.load_patients();
                }
                KeyCode::Esc => self.admin_state.editing_filter = false,
                KeyCode::Backspace => {
                    self.admin_state.filter.pop();
                }
                KeyCode::Char(c) if !c.is_control() => self.admin_state.filter.push(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Up => self.admin_state.select_prev(),
            KeyCode::Down => self.admin_state.select_next(),
            KeyCode::Enter => {
                if let Some(id) = self.admin_state.selected_patient().map(|p| p.id) {
                    self.navigate(Screen::AdminHistory(id));
                }
            }
            KeyCode::Char('/') => self.admin_state.editing_filter = true,
            KeyCode::Char('r') | KeyCode::Char('R') => self.load_patients(),
            KeyCode::Esc => self.navigate(Screen::Home),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.history_state.scroll_up(),
            KeyCode::Down => self.history_state.scroll_down(),
            KeyCode::Esc | KeyCode::Backspace => self.navigate(Screen::Admin),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyCode) {
        if self.settings_state.loading || self.settings_state.saving {
            return;
        }
        match form_key(&mut self.settings_state.form, key) {
            FormInput::Submit => {
                let data = self.settings_state.data();
                self.settings_state.saving = true;
                self.settings_state.form.notice = None;
                let clinical = self.clinical.clone();
                self.worker.spawn("settings-save", move || {
                    ApiEvent::SettingsSaved(clinical.update_personal_data(&data))
                });
            }
            FormInput::Cancel => self.navigate(Screen::Home),
            FormInput::Edited => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::messages;
    use crate::application::testing::{sample_patient, sample_record, FakeBackend};
    use crate::domain::{LatestDiagnosis, PersonalData, RiskLevel, User, UserType};
    use crate::ports::LoginReply;
    use crate::tui::ui::buffer_text;
    use ratatui::backend::TestBackend;
    use std::thread;
    use std::time::Instant;

    fn app(backend: FakeBackend) -> (App<FakeBackend>, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        (App::with_backend(Arc::clone(&backend)), backend)
    }

    fn admin_backend() -> FakeBackend {
        FakeBackend {
            login_reply: Some(LoginReply {
                message: None,
                user_type: UserType::Administrador,
            }),
            ..Default::default()
        }
    }

    /// Wait for every spawned request and apply its event.
    fn settle(app: &mut App<FakeBackend>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.worker.in_flight() > 0 && Instant::now() < deadline {
            app.poll_worker();
            thread::sleep(Duration::from_millis(2));
        }
        app.poll_worker();
    }

    fn draw(app: &mut App<FakeBackend>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 32)).expect("Test terminal");
        let mut regions = HeaderRegions::default();
        terminal
            .draw(|f| regions = app.render(f))
            .expect("Draw");
        app.regions = regions;
        buffer_text(terminal.backend().buffer())
    }

    fn press(app: &mut App<FakeBackend>, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn type_text(app: &mut App<FakeBackend>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn log_in(app: &mut App<FakeBackend>) {
        app.navigate(Screen::Login);
        type_text(app, "ana");
        press(app, KeyCode::Down);
        type_text(app, "secreto");
        press(app, KeyCode::Enter);
        settle(app);
    }

    #[test]
    fn test_session_starts_empty() {
        let (mut app, _) = app(FakeBackend::patient());
        assert!(!app.session().is_authenticated());
        assert_eq!(app.screen(), Screen::Home);
        let text = draw(&mut app);
        assert!(text.contains("Iniciar Sesión"));
        assert!(text.contains("Registrarse"));
    }

    #[test]
    fn test_login_sets_session() {
        let (mut app, backend) = app(FakeBackend::patient());
        log_in(&mut app);

        assert_eq!(backend.calls(), vec!["login"]);
        let user = app.session().user().expect("Logged in");
        assert_eq!(user.username, "ana");
        assert_eq!(user.user_type, UserType::Paciente);
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.login_state.form.value("password"), "");

        let text = draw(&mut app);
        assert!(text.contains("ana ▼"));
        assert!(!text.contains("Panel Admin"));
    }

    #[test]
    fn test_rejected_login_shows_message() {
        let (mut app, _) = app(FakeBackend::default());
        log_in(&mut app);
        assert!(!app.session().is_authenticated());
        assert_eq!(app.screen(), Screen::Login);
        assert!(draw(&mut app).contains(messages::LOGIN_REJECTED));
    }

    #[test]
    fn test_logout_clears_session() {
        let (mut app, backend) = app(FakeBackend::patient());
        log_in(&mut app);

        app.header_action(HeaderAction::Select(MenuItem::Logout));
        settle(&mut app);

        assert!(!app.session().is_authenticated());
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(backend.calls(), vec!["login", "logout"]);
    }

    #[test]
    fn test_late_responses_after_logout_are_dropped() {
        let (mut app, _) = app(admin_backend());
        log_in(&mut app);
        app.header_action(HeaderAction::Select(MenuItem::Logout));
        settle(&mut app);
        assert!(!app.session().is_authenticated());

        app.apply(ApiEvent::PatientsLoaded(Ok(vec![sample_patient(3, "luis")])));
        app.apply(ApiEvent::ResultsLoaded(Ok(Some(LatestDiagnosis {
            riesgo: RiskLevel::High,
            confianza: 0.9,
            fecha: None,
        }))));
        app.apply(ApiEvent::SettingsLoaded(Ok(PersonalData {
            nombre: "Luis".into(),
            dni: "12345678".into(),
            ..Default::default()
        })));

        assert!(app.admin_state.patients.is_empty());
        assert!(app.results_state.diagnosis.is_none());
        assert!(app.results_state.chart.is_none());
        assert_eq!(app.settings_state.form.value("dni"), "");
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn test_new_builds_http_backend_from_config() {
        let config = ClientConfig::from_lookup(|_| None).expect("Default config");
        let app = App::new(&config).expect("Should build client");
        assert_eq!(app.screen(), Screen::Home);
        assert!(!app.session().is_authenticated());
    }

    #[test]
    fn test_failed_logout_keeps_session() {
        let (mut app, _) = app(FakeBackend {
            fail_logout: true,
            ..FakeBackend::patient()
        });
        log_in(&mut app);

        app.header_action(HeaderAction::Select(MenuItem::Logout));
        settle(&mut app);
        assert!(app.session().is_authenticated());
    }

    #[test]
    fn test_registration_logs_in() {
        let (mut app, backend) = app(FakeBackend::patient());
        app.navigate(Screen::Register);
        type_text(&mut app, "nuevo");
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(backend.calls(), vec!["register", "login"]);
        assert_eq!(
            app.session().user().map(|u| u.username.as_str()),
            Some("nuevo")
        );
    }

    #[test]
    fn test_registration_conflict() {
        let (mut app, _) = app(FakeBackend {
            register_status: Some(409),
            ..FakeBackend::patient()
        });
        app.navigate(Screen::Register);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert!(!app.session().is_authenticated());
        assert!(draw(&mut app).contains(messages::REGISTRATION_CONFLICT));
    }

    #[test]
    fn test_admin_failure_shows_message_and_empty_table() {
        let (mut app, _) = app(admin_backend());
        log_in(&mut app);
        app.navigate(Screen::Admin);
        settle(&mut app);

        assert!(app.admin_state.patients.is_empty());
        let text = draw(&mut app);
        assert!(text.contains(messages::ADMIN_LOAD_FAILED));
        assert!(text.contains("Panel Admin"));
    }

    #[test]
    fn test_admin_opens_history() {
        let (mut app, backend) = app(FakeBackend {
            patients: Some(vec![sample_patient(4, "ana"), sample_patient(7, "luis")]),
            history: Some(vec![sample_record(RiskLevel::High)]),
            ..admin_backend()
        });
        log_in(&mut app);
        app.navigate(Screen::Admin);
        settle(&mut app);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(app.screen(), Screen::AdminHistory(7));
        assert!(backend.calls().contains(&"patient_history:7".to_string()));
        assert_eq!(app.history_state.records.len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen(), Screen::Admin);
    }

    #[test]
    fn test_admin_filter_is_sent() {
        let (mut app, backend) = app(FakeBackend {
            patients: Some(vec![]),
            ..admin_backend()
        });
        log_in(&mut app);
        app.navigate(Screen::Admin);
        settle(&mut app);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "ana");
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(
            backend.calls(),
            vec!["login", "list_patients", "list_patients:ana"]
        );
    }

    #[test]
    fn test_patient_cannot_open_admin() {
        let (mut app, backend) = app(FakeBackend::patient());
        log_in(&mut app);

        press(&mut app, KeyCode::F(4));
        app.navigate(Screen::Admin);
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(backend.calls(), vec!["login"]);
    }

    #[test]
    fn test_anonymous_is_sent_to_login() {
        let (mut app, _) = app(FakeBackend::patient());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen(), Screen::Login);
    }

    #[test]
    fn test_results_render_level() {
        let (mut app, _) = app(FakeBackend {
            latest: Some(LatestDiagnosis {
                riesgo: RiskLevel::Medium,
                confianza: 0.75,
                fecha: Some("2024-10-15 10:30:05".into()),
            }),
            ..FakeBackend::patient()
        });
        log_in(&mut app);
        press(&mut app, KeyCode::F(3));
        settle(&mut app);

        let text = draw(&mut app);
        assert!(text.contains("Nivel de Riesgo: Medio"));
        assert!(text.contains("Precaución: cuida tus hábitos"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn test_diagnosis_submission_moves_to_results() {
        let (mut app, backend) = app(FakeBackend {
            outcome: Some(crate::domain::DiagnosisOutcome {
                riesgo: RiskLevel::Low,
                confianza: 0.9,
            }),
            ..FakeBackend::patient()
        });
        log_in(&mut app);
        app.navigate(Screen::Diagnosis);
        for (key, value) in [
            ("edad", "52"),
            ("ps", "120"),
            ("pd", "80"),
            ("colesterol", "190"),
            ("glucosa", "90"),
            ("peso", "70"),
            ("estatura", "170"),
        ] {
            app.diagnosis_state.form.set_value(key, value);
        }
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(app.screen(), Screen::Results);
        assert_eq!(
            backend.calls(),
            vec!["login", "submit_diagnosis", "latest_result"]
        );
    }

    #[test]
    fn test_outside_click_closes_menu() {
        let (mut app, _) = app(FakeBackend::patient());
        app.session.login(User::new("ana", UserType::Paciente));
        draw(&mut app);

        let toggle = app.regions.toggle.expect("Toggle drawn");
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        app.handle_mouse(click(toggle.x, toggle.y));
        assert!(app.header.menu_open);
        let text = draw(&mut app);
        assert!(text.contains("Cerrar Sesión"));

        app.handle_mouse(click(2, 20));
        assert!(!app.header.menu_open);
        assert!(!draw(&mut app).contains("Cerrar Sesión"));
    }
}
