//! MediChain Portal: interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  MediChain    Doctor · Dr. John Smith                               │
//!   ├─── sidebar ────────┬─── panel ──────────────────────────────────────┤
//!   │  [1] Dashboard     │  Welcome back, Dr. John Smith                  │
//!   │  [2] Patients      │  ...                                           │
//!   ├────────────────────┴────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The landing and login screens replace the sidebar and panel. Login runs on
//! a tokio runtime owned by `main`, so the screen keeps redrawing through the
//! artificial delay.
//!
//! Set `MEDICHAIN_CONFIG` to a portal TOML file to override the defaults.

use std::{io, path::PathBuf, sync::Arc, time::Duration};

use chrono::Utc;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::{runtime::Runtime, task::JoinHandle};

use medichain_config::PortalConfig;
use medichain_contracts::{
    error::{PortalError, PortalResult, GENERIC_FAILURE_MESSAGE},
    form::LoginForm,
    session::{Role, Session},
};
use medichain_core::Preferences;
use medichain_ref_portal::{
    mock_data,
    panels::{
        analytics::{self, ChartData, ChartKind, TimeRange},
        appointments::{self, AppointmentTab},
        dashboard::{self, Panel},
        notifications::NotificationFeed,
        patients, records,
        settings::{self, SettingsTab},
    },
    Portal,
};

// ── Theme ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Theme {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
}

impl Theme {
    fn for_mode(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
            }
        } else {
            Self {
                bg: Color::White,
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
            }
        }
    }

    fn base(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    fn block(self, title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.muted))
            .style(self.base())
    }

    fn selected(self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Login,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
    Role,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Email => Field::Password,
            Field::Password => Field::Role,
            Field::Role => Field::Email,
        }
    }
}

struct LoginState {
    form: LoginForm,
    focus: Field,
    /// Validation message; authentication errors come from the manager.
    local_error: Option<String>,
}

impl LoginState {
    fn new(role: Role) -> Self {
        Self {
            form: LoginForm::new(role),
            focus: Field::Email,
            local_error: None,
        }
    }
}

/// Per-session dashboard state. Dropped on logout.
struct DashboardState {
    session: Session,
    panel: Panel,
    /// Highlighted row in the current panel.
    selected: usize,
    search: String,
    searching: bool,
    tab: AppointmentTab,
    range: TimeRange,
    chart_kind: ChartKind,
    chart: ChartData,
    settings_tab: usize,
    feed: NotificationFeed,
}

impl DashboardState {
    fn new(session: Session) -> Self {
        let chart = analytics::chart_data(session.role, TimeRange::Week, &mut rand::thread_rng());
        let feed = NotificationFeed::for_session(mock_data::notifications(Utc::now()), &session);
        Self {
            session,
            panel: Panel::Home,
            selected: 0,
            search: String::new(),
            searching: false,
            tab: AppointmentTab::Upcoming,
            range: TimeRange::Week,
            chart_kind: ChartKind::Line,
            chart,
            settings_tab: 0,
            feed,
        }
    }

    fn panels(&self) -> Vec<Panel> {
        dashboard::navigation(self.session.role)
    }

    fn settings_tab(&self) -> SettingsTab {
        SettingsTab::ALL[self.settings_tab % SettingsTab::ALL.len()]
    }

    fn refresh_chart(&mut self) {
        self.chart = analytics::chart_data(self.session.role, self.range, &mut rand::thread_rng());
    }

    /// Number of selectable rows in the current panel.
    fn row_count(&self) -> usize {
        match self.panel {
            Panel::Patients => patients::search(&mock_data::patients(), &self.search).len(),
            Panel::Appointments => appointments::rows(&self.session, self.tab, Utc::now()).len(),
            Panel::Records => {
                let visible = records::visible(&mock_data::medical_records(), &self.session);
                records::search(&visible, &self.search).len()
            }
            Panel::Notifications => self.feed.all().len(),
            Panel::Settings => settings::options_for(self.settings_tab(), self.session.role).len(),
            Panel::Home | Panel::Analytics => 0,
        }
    }
}

struct App {
    portal: Portal,
    screen: Screen,
    login: LoginState,
    pending: Option<JoinHandle<PortalResult<Session>>>,
    dash: Option<DashboardState>,
    prefs: Preferences,
    /// Transient message shown in the footer.
    status: Option<String>,
}

impl App {
    fn new(portal: Portal) -> Self {
        let prefs = portal.preferences();
        let mut app = Self {
            portal,
            screen: Screen::Landing,
            login: LoginState::new(Role::Patient),
            pending: None,
            dash: None,
            prefs,
            status: None,
        };
        // A session restored from durable storage skips the login screen.
        if let Some(session) = app.portal.manager().current_session() {
            app.enter_dashboard(session);
        }
        app
    }

    fn theme(&self) -> Theme {
        Theme::for_mode(self.prefs.dark_mode)
    }

    fn is_signing_in(&self) -> bool {
        self.pending.is_some() || self.portal.manager().is_loading()
    }

    fn open_login(&mut self, role: Role) {
        self.login = LoginState::new(role);
        self.portal.manager().clear_error();
        self.screen = Screen::Login;
    }

    fn edited(&mut self) {
        self.login.local_error = None;
        self.portal.manager().clear_error();
    }

    fn submit_login(&mut self, rt: &Runtime) {
        if self.is_signing_in() {
            return;
        }
        if let Err(e) = self.login.form.validate() {
            self.login.local_error = Some(e.user_message());
            return;
        }
        self.login.local_error = None;

        let manager = Arc::clone(self.portal.manager());
        let email = self.login.form.email.trim().to_string();
        let password = self.login.form.password.clone();
        let role = self.login.form.role;
        self.pending = Some(rt.spawn(async move { manager.login(&email, &password, role).await }));
    }

    /// Pick up a finished login attempt, if any.
    fn poll_login(&mut self, rt: &Runtime) {
        let finished = self.pending.as_ref().is_some_and(|h| h.is_finished());
        if !finished {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };
        match rt.block_on(handle) {
            Ok(Ok(session)) => self.enter_dashboard(session),
            // The manager already holds the message for the form.
            Ok(Err(_)) => {}
            Err(_) => self.login.local_error = Some(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }

    fn enter_dashboard(&mut self, session: Session) {
        match self.portal.open_panel(session.role, Panel::Home) {
            Ok(session) => {
                self.login.form.password.clear();
                self.dash = Some(DashboardState::new(session));
                self.screen = Screen::Dashboard;
            }
            Err(_) => self.open_login(session.role),
        }
    }

    fn logout(&mut self) {
        let role = self.dash.as_ref().map(|d| d.session.role).unwrap_or(Role::Patient);
        self.portal.manager().logout();
        self.dash = None;
        self.open_login(role);
        self.status = Some("Signed out".to_string());
    }

    fn select_panel(&mut self, panel: Panel) {
        let Some(dash) = self.dash.as_mut() else {
            return;
        };
        match self.portal.open_panel(dash.session.role, panel) {
            Ok(_) => {
                dash.panel = panel;
                dash.selected = 0;
                dash.search.clear();
                dash.searching = false;
                if panel == Panel::Analytics {
                    dash.refresh_chart();
                }
            }
            Err(e @ PortalError::PanelUnavailable { .. }) => {
                self.status = Some(e.user_message());
            }
            Err(_) => {
                // The session went away underneath us.
                let role = dash.session.role;
                self.dash = None;
                self.open_login(role);
            }
        }
    }

    fn toggle_dark_mode(&mut self) {
        self.prefs.toggle_dark_mode();
        self.save_prefs();
    }

    fn save_prefs(&mut self) {
        if let Err(e) = self.portal.save_preferences(&self.prefs) {
            self.status = Some(e.user_message());
        }
    }

    /// Handle one key press. Returns false when the app should exit.
    fn handle_key(&mut self, key: KeyEvent, rt: &Runtime) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        self.status = None;
        match self.screen {
            Screen::Landing => self.landing_key(key),
            Screen::Login => {
                self.login_key(key, rt);
                true
            }
            Screen::Dashboard => self.dashboard_key(key),
        }
    }

    fn landing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return false,
            KeyCode::Char('p') | KeyCode::Enter => self.open_login(Role::Patient),
            KeyCode::Char('d') => self.open_login(Role::Doctor),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            _ => {}
        }
        true
    }

    fn login_key(&mut self, key: KeyEvent, rt: &Runtime) {
        if self.is_signing_in() {
            return;
        }
        match key.code {
            KeyCode::Esc => self.screen = Screen::Landing,
            KeyCode::Tab | KeyCode::Down => self.login.focus = self.login.focus.next(),
            KeyCode::BackTab | KeyCode::Up => {
                self.login.focus = self.login.focus.next().next();
            }
            KeyCode::Enter => self.submit_login(rt),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if self.login.focus == Field::Role => {
                self.login.form.role = self.login.form.role.toggled();
                self.edited();
            }
            KeyCode::Backspace => {
                match self.login.focus {
                    Field::Email => {
                        self.login.form.email.pop();
                    }
                    Field::Password => {
                        self.login.form.password.pop();
                    }
                    Field::Role => {}
                }
                self.edited();
            }
            KeyCode::Char(c) => {
                match self.login.focus {
                    Field::Email => self.login.form.email.push(c),
                    Field::Password => self.login.form.password.push(c),
                    Field::Role => return,
                }
                self.edited();
            }
            _ => {}
        }
    }

    fn dashboard_key(&mut self, key: KeyEvent) -> bool {
        let Some(dash) = self.dash.as_mut() else {
            self.screen = Screen::Landing;
            return true;
        };

        if dash.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => dash.searching = false,
                KeyCode::Backspace => {
                    dash.search.pop();
                    dash.selected = 0;
                }
                KeyCode::Char(c) => {
                    dash.search.push(c);
                    dash.selected = 0;
                }
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return false,
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('t') => self.toggle_dark_mode(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(panel) = dash.panels().get(index).copied() {
                    self.select_panel(panel);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let count = dash.row_count();
                if count > 0 {
                    dash.selected = (dash.selected + 1).min(count - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => dash.selected = dash.selected.saturating_sub(1),
            KeyCode::Char('/') if matches!(dash.panel, Panel::Patients | Panel::Records) => {
                dash.searching = true;
            }
            KeyCode::Char('u') if dash.panel == Panel::Appointments => {
                dash.tab = dash.tab.toggled();
                dash.selected = 0;
            }
            KeyCode::Char('r') if dash.panel == Panel::Analytics => {
                dash.range = dash.range.next();
                dash.refresh_chart();
            }
            KeyCode::Char('c') if dash.panel == Panel::Analytics => {
                dash.chart_kind = dash.chart_kind.next();
            }
            KeyCode::Char('m') if dash.panel == Panel::Notifications => {
                if let Some(id) = dash.feed.all().get(dash.selected).map(|n| n.id) {
                    dash.feed.mark_read(id);
                }
            }
            KeyCode::Char('a') if dash.panel == Panel::Notifications => dash.feed.mark_all_read(),
            KeyCode::Left if dash.panel == Panel::Settings => {
                dash.settings_tab = (dash.settings_tab + SettingsTab::ALL.len() - 1) % SettingsTab::ALL.len();
                dash.selected = 0;
            }
            KeyCode::Right if dash.panel == Panel::Settings => {
                dash.settings_tab = (dash.settings_tab + 1) % SettingsTab::ALL.len();
                dash.selected = 0;
            }
            KeyCode::Char(' ') if dash.panel == Panel::Settings => {
                let role = dash.session.role;
                let option = settings::options_for(dash.settings_tab(), role).get(dash.selected).copied();
                if let Some(option) = option {
                    settings::flip(&mut self.prefs, role, option.id);
                    self.save_prefs();
                }
            }
            _ => {}
        }
        true
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();
    let theme = app.theme();
    f.render_widget(Block::default().style(theme.base()), full);

    // Split into: header, body, footer.
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // screen body
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);

    match (app.screen, app.dash.as_ref()) {
        (Screen::Dashboard, Some(dash)) => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(24), Constraint::Min(30)])
                .split(outer_chunks[1]);
            render_sidebar(f, body[0], theme, dash);
            render_panel(f, body[1], app, dash);
        }
        (Screen::Login, _) => render_login(f, outer_chunks[1], app),
        _ => render_landing(f, outer_chunks[1], theme),
    }

    render_footer(f, outer_chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let title_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("MediChain    ", title_style)];
    match app.dash.as_ref() {
        Some(dash) if app.screen == Screen::Dashboard => {
            spans.push(Span::raw(format!(
                "{} · {}",
                dash.session.role.label(),
                dash.session.display_name
            )));
            spans.push(Span::styled(
                format!("    {}", dash.panel.route(dash.session.role)),
                Style::default().fg(theme.muted),
            ));
        }
        _ => spans.push(Span::styled(
            "Secure healthcare portal",
            Style::default().fg(theme.muted),
        )),
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(theme.base()),
    );
    f.render_widget(header, area);
}

fn render_landing(f: &mut Frame, area: Rect, theme: Theme) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Your health records, in one place", bold)),
        Line::from(""),
        Line::from("Patients review appointments, records and notifications."),
        Line::from("Doctors manage their patients, schedules and analytics."),
        Line::from(""),
        Line::from(Span::styled("Demo accounts (password: password123)", Style::default().fg(theme.muted))),
        Line::from("  doctor@example.com    doctor2@example.com"),
        Line::from("  patient@example.com   patient2@example.com"),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(theme.block("Welcome"));
    f.render_widget(paragraph, area);
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let form = &app.login.form;
    let signing_in = app.is_signing_in();

    let field = |label: &str, value: String, which: Field| {
        let focused = app.login.focus == which && !signing_in;
        let style = if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), Style::default().fg(theme.muted)),
            Span::styled(format!("{}{}", value, cursor), style),
        ])
    };

    let mut lines = vec![
        Line::from(""),
        field("Role", format!("◂ {} ▸", form.role.label()), Field::Role),
        Line::from(""),
        field("Email", form.email.clone(), Field::Email),
        field("Password", "•".repeat(form.password.chars().count()), Field::Password),
        Line::from(""),
    ];

    if signing_in {
        lines.push(Line::from(Span::styled(
            "  Signing in...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    } else if let Some(message) = app.login.local_error.clone().or_else(|| app.portal.manager().last_error()) {
        lines.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Press Enter to sign in",
            Style::default().fg(theme.muted),
        )));
    }

    let title = format!("{} Login", form.role.label());
    let paragraph = Paragraph::new(lines).block(theme.block(&title));
    f.render_widget(paragraph, area);
}

fn render_sidebar(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let items: Vec<ListItem> = dash
        .panels()
        .into_iter()
        .enumerate()
        .map(|(i, panel)| {
            let style = if panel == dash.panel {
                theme.selected()
            } else {
                Style::default().fg(theme.fg)
            };
            ListItem::new(Line::from(Span::styled(format!(" [{}] {}", i + 1, panel.label()), style)))
        })
        .collect();

    let list = List::new(items).block(theme.block("Menu"));
    f.render_widget(list, area);
}

fn render_panel(f: &mut Frame, area: Rect, app: &App, dash: &DashboardState) {
    let theme = app.theme();
    match dash.panel {
        Panel::Home => render_home(f, area, theme, dash),
        Panel::Patients => render_patients(f, area, theme, dash),
        Panel::Appointments => render_appointments(f, area, theme, dash),
        Panel::Records => render_records(f, area, theme, dash),
        Panel::Notifications => render_notifications(f, area, theme, dash),
        Panel::Analytics => render_analytics(f, area, theme, dash),
        Panel::Settings => render_settings(f, area, app, dash),
    }
}

/// A list row, highlighted when it is the current selection.
fn row(theme: Theme, selected: bool, text: String) -> ListItem<'static> {
    let style = if selected {
        theme.selected()
    } else {
        Style::default().fg(theme.fg)
    };
    ListItem::new(Line::from(Span::styled(text, style)))
}

fn search_line(theme: Theme, dash: &DashboardState) -> Line<'static> {
    let cursor = if dash.searching { "▏" } else { "" };
    Line::from(vec![
        Span::styled(" Search: ", Style::default().fg(theme.muted)),
        Span::raw(format!("{}{}", dash.search, cursor)),
    ])
}

fn render_home(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let mut lines = vec![
        Line::from(Span::styled(
            dashboard::greeting(&dash.session.display_name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for stat in dashboard::home_stats(dash.session.role) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<24}", stat.name), Style::default().fg(theme.muted)),
            Span::styled(stat.value, Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
        ]));
    }
    f.render_widget(Paragraph::new(lines).block(theme.block("Dashboard")), area);
}

fn render_patients(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5), Constraint::Length(9)])
        .split(theme.block("Patients").inner(area));
    f.render_widget(theme.block("Patients"), area);
    f.render_widget(Paragraph::new(search_line(theme, dash)), chunks[0]);

    let all = mock_data::patients();
    let found = patients::search(&all, &dash.search);
    if found.is_empty() {
        f.render_widget(Paragraph::new(patients::no_match_message(&dash.search)), chunks[1]);
        return;
    }

    let items: Vec<ListItem> = found
        .iter()
        .enumerate()
        .map(|(i, p)| row(theme, i == dash.selected, format!(" {:<16} {:<28} {}", p.name, p.email, p.condition)))
        .collect();
    f.render_widget(List::new(items), chunks[1]);

    if let Some(patient) = found.get(dash.selected) {
        let lines: Vec<Line> = patients::details(patient)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!(" {:<12}", label), Style::default().fg(theme.muted)),
                    Span::raw(value),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines).block(theme.block("Details")), chunks[2]);
    }
}

fn render_appointments(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(theme.block("Appointments").inner(area));
    f.render_widget(theme.block("Appointments"), area);

    let selected_tab = match dash.tab {
        AppointmentTab::Upcoming => 0,
        AppointmentTab::Past => 1,
    };
    let tabs = Tabs::new(vec![AppointmentTab::Upcoming.label(), AppointmentTab::Past.label()])
        .select(selected_tab)
        .highlight_style(theme.selected());
    f.render_widget(tabs, chunks[0]);

    let rows = appointments::rows(&dash.session, dash.tab, Utc::now());
    if rows.is_empty() {
        f.render_widget(Paragraph::new(appointments::empty_message(dash.tab)), chunks[1]);
        return;
    }
    let items: Vec<ListItem> = rows
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            row(
                theme,
                i == dash.selected,
                format!(" {:<20} {:<9} {:<18} {:<13} {}", r.date, r.time, r.counterpart, r.kind, r.status),
            )
        })
        .collect();
    f.render_widget(List::new(items), chunks[1]);
}

fn render_records(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5), Constraint::Length(6)])
        .split(theme.block("Medical Records").inner(area));
    f.render_widget(theme.block("Medical Records"), area);
    f.render_widget(Paragraph::new(search_line(theme, dash)), chunks[0]);

    let visible = records::visible(&mock_data::medical_records(), &dash.session);
    let found = records::search(&visible, &dash.search);
    let items: Vec<ListItem> = found
        .iter()
        .enumerate()
        .map(|(i, r)| row(theme, i == dash.selected, format!(" {}", records::summary_line(r))))
        .collect();
    f.render_widget(List::new(items), chunks[1]);

    if let Some(record) = found.get(dash.selected) {
        let title = if records::can_edit(dash.session.role) {
            "Description (editable)"
        } else {
            "Description"
        };
        let paragraph = Paragraph::new(record.description.clone())
            .wrap(Wrap { trim: true })
            .block(theme.block(title));
        f.render_widget(paragraph, chunks[2]);
    }
}

fn render_notifications(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let title = format!("Notifications ({} unread)", dash.feed.unread_count());
    let items: Vec<ListItem> = dash
        .feed
        .all()
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let marker = if n.read { " " } else { "•" };
            let action = n.kind.action_label().map(|a| format!("  [{}]", a)).unwrap_or_default();
            row(theme, i == dash.selected, format!(" {} {} | {}{}", marker, n.title, n.message, action))
        })
        .collect();
    f.render_widget(List::new(items).block(theme.block(&title)), area);
}

fn render_analytics(f: &mut Frame, area: Rect, theme: Theme, dash: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(8)])
        .split(area);

    let stats: Vec<Line> = analytics::stats(dash.session.role)
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled(format!(" {:<26}", card.title), Style::default().fg(theme.muted)),
                Span::styled(format!("{:>5}", card.value), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  {}", card.change_label())),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(stats).block(theme.block("Overview")), chunks[0]);

    let title = format!(
        "{} · {} · {}",
        dash.chart.title,
        dash.range.label(),
        dash.chart_kind.label()
    );
    match dash.chart_kind {
        ChartKind::Bar => {
            let series = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(theme.block(&title).inner(chunks[1]));
            f.render_widget(theme.block(&title), chunks[1]);
            for (s, slot) in dash.chart.series.iter().zip(series.iter()) {
                let bars: Vec<(&str, u64)> = dash
                    .chart
                    .labels
                    .iter()
                    .map(String::as_str)
                    .zip(s.values.iter().map(|v| u64::from(*v)))
                    .collect();
                let chart = BarChart::default()
                    .block(Block::default().title(s.name))
                    .data(bars.as_slice())
                    .bar_width(5)
                    .bar_gap(1)
                    .bar_style(Style::default().fg(theme.accent));
                f.render_widget(chart, *slot);
            }
        }
        ChartKind::Line => {
            let mut lines = Vec::new();
            for s in &dash.chart.series {
                lines.push(Line::from(Span::styled(format!(" {}", s.name), Style::default().add_modifier(Modifier::BOLD))));
                lines.push(Line::from(format!(" {}", spark(&s.values))));
                lines.push(Line::from(Span::styled(
                    format!(" {}", s.values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")),
                    Style::default().fg(theme.muted),
                )));
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!(" {}", dash.chart.labels.join(" ")),
                Style::default().fg(theme.muted),
            )));
            f.render_widget(Paragraph::new(lines).block(theme.block(&title)), chunks[1]);
        }
        ChartKind::Pie => {
            let lines: Vec<Line> = dash
                .chart
                .pie
                .iter()
                .map(|slice| {
                    Line::from(vec![
                        Span::raw(format!(" {:<20} {:>3}% ", slice.label, slice.percent)),
                        Span::styled("█".repeat(slice.percent as usize / 2), Style::default().fg(theme.accent)),
                    ])
                })
                .collect();
            f.render_widget(Paragraph::new(lines).block(theme.block(&title)), chunks[1]);
        }
    }
}

fn render_settings(f: &mut Frame, area: Rect, app: &App, dash: &DashboardState) {
    let theme = app.theme();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(theme.block("Settings").inner(area));
    f.render_widget(theme.block("Settings"), area);

    let tabs = Tabs::new(SettingsTab::ALL.iter().map(|t| t.label()).collect::<Vec<_>>())
        .select(dash.settings_tab)
        .highlight_style(theme.selected());
    f.render_widget(tabs, chunks[0]);

    let tab = dash.settings_tab();
    let items: Vec<ListItem> = match tab {
        SettingsTab::Profile => {
            let mut fields = settings::profile_fields(&dash.session);
            fields.push(("Dark mode", if app.prefs.dark_mode { "on" } else { "off" }.to_string()));
            fields
                .into_iter()
                .map(|(label, value)| row(theme, false, format!(" {:<24} {}", label, value)))
                .collect()
        }
        SettingsTab::Notifications | SettingsTab::Privacy => {
            settings::resolve(settings::options_for(tab, dash.session.role), &app.prefs)
                .into_iter()
                .enumerate()
                .map(|(i, (option, enabled))| {
                    let mark = if enabled { "x" } else { " " };
                    row(theme, i == dash.selected, format!(" [{}] {}", mark, option.label))
                })
                .collect()
        }
        SettingsTab::Security => settings::security_items()
            .into_iter()
            .map(|(label, value)| row(theme, false, format!(" {:<28} {}", label, value)))
            .collect(),
        SettingsTab::Devices => settings::devices()
            .into_iter()
            .map(|(label, value)| row(theme, false, format!(" {:<28} {}", label, value)))
            .collect(),
    };
    f.render_widget(List::new(items), chunks[1]);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.theme();
    let key = |k: &str| Span::styled(format!("[{}] ", k), Style::default().fg(theme.accent));

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    match app.screen {
        Screen::Landing => {
            spans.extend([key("p"), Span::raw("Patient login  "), key("d"), Span::raw("Doctor login  ")]);
            spans.extend([key("t"), Span::raw("Theme  ")]);
        }
        Screen::Login => {
            spans.extend([key("Tab"), Span::raw("Next field  "), key("←/→"), Span::raw("Role  ")]);
            spans.extend([key("Enter"), Span::raw("Sign in  "), key("Esc"), Span::raw("Back  ")]);
        }
        Screen::Dashboard => {
            spans.extend([key("1-7"), Span::raw("Panel  "), key("↑/↓"), Span::raw("Select  ")]);
            if let Some(dash) = app.dash.as_ref() {
                match dash.panel {
                    Panel::Patients | Panel::Records => spans.extend([key("/"), Span::raw("Search  ")]),
                    Panel::Appointments => spans.extend([key("u"), Span::raw("Upcoming/Past  ")]),
                    Panel::Analytics => {
                        spans.extend([key("r"), Span::raw("Range  "), key("c"), Span::raw("Chart  ")]);
                    }
                    Panel::Notifications => {
                        spans.extend([key("m"), Span::raw("Mark read  "), key("a"), Span::raw("All read  ")]);
                    }
                    Panel::Settings => {
                        spans.extend([key("←/→"), Span::raw("Tab  "), key("Space"), Span::raw("Toggle  ")]);
                    }
                    Panel::Home => {}
                }
            }
            spans.extend([key("t"), Span::raw("Theme  "), key("o"), Span::raw("Logout  ")]);
        }
    }
    if app.screen != Screen::Login {
        spans.extend([key("q"), Span::raw("Quit")]);
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(format!("   {}", status), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(theme.base()),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// One block glyph per value, scaled to the series maximum.
fn spark(values: &[u32]) -> String {
    const LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = values.iter().copied().max().unwrap_or(0).max(1);
    values
        .iter()
        .map(|v| LEVELS[(*v as usize * (LEVELS.len() - 1)) / max as usize])
        .collect()
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    let config_path = std::env::var_os("MEDICHAIN_CONFIG").map(PathBuf::from);
    let config = PortalConfig::load(config_path.as_deref())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best-effort terminal restore on panic.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(Portal::from_config(&config));

    // Short polls while a login is pending so "Signing in..." clears promptly.
    const PENDING_POLL_MS: u64 = 50;
    const IDLE_POLL_MS: u64 = 200;

    loop {
        app.poll_login(&runtime);
        terminal.draw(|f| ui(f, &app))?;

        let timeout = if app.pending.is_some() {
            Duration::from_millis(PENDING_POLL_MS)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key, &runtime) {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
