// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use comptoir_app::{
    AppCommand, AppEvent, AppMode, AppState, CreateSink, Credentials, Screen, TablePage, UserInfo,
    Workspace,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

const SIDEBAR_WIDTH: u16 = 26;
const FLAG_MARKER: &str = "⚠ ";
const PASSWORD_MASK: char = '•';
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Everything the front end needs from the surrounding application.
pub trait AppRuntime: CreateSink {
    fn authenticate(&mut self, credentials: &Credentials) -> Result<UserInfo>;
    fn load_workspace(&mut self) -> Result<Workspace>;
    /// A user to sign in without showing the login screen.
    fn skip_login(&mut self) -> Option<UserInfo> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LoginUiState {
    username: String,
    password: String,
    field: LoginField,
}

impl LoginUiState {
    fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    login: LoginUiState,
    workspace: Option<Workspace>,
    // Selected position within the visible rows, one per page.
    cursors: Vec<usize>,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn active_page(&self) -> Option<&TablePage> {
        self.workspace
            .as_ref()
            .map(|workspace| workspace.navigator.active_page())
    }

    fn active_cursor(&self) -> usize {
        self.workspace
            .as_ref()
            .and_then(|workspace| self.cursors.get(workspace.navigator.active_index()))
            .copied()
            .unwrap_or(0)
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Some(user) = runtime.skip_login() {
        sign_in(state, runtime, &mut view_data, &internal_tx, user);
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        match next_key() {
            Ok(Some(key)) => {
                if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn next_key() -> Result<Option<KeyEvent>> {
    if !event::poll(Duration::from_millis(120)).context("poll event")? {
        return Ok(None);
    }
    match event::read().context("read event")? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_TTL);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
    events
}

fn sign_in<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    user: UserInfo,
) {
    match runtime.load_workspace() {
        Ok(workspace) => {
            view_data.cursors = vec![0; workspace.navigator.len()];
            view_data.workspace = Some(workspace);
            view_data.login = LoginUiState::default();
            dispatch(state, view_data, internal_tx, AppCommand::SignIn(user));
        }
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "workspace load failed");
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("load failed: {error:#}"),
            );
        }
    }
}

fn sign_out(state: &mut AppState, view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    view_data.workspace = None;
    view_data.cursors.clear();
    view_data.login = LoginUiState::default();
    view_data.help_visible = false;
    dispatch(state, view_data, internal_tx, AppCommand::SignOut);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.screen {
        Screen::Login => handle_login_key(state, runtime, view_data, internal_tx, key),
        Screen::Workspace if state.mode == AppMode::Search => {
            handle_search_key(state, view_data, internal_tx, key);
        }
        Screen::Workspace => handle_nav_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_login_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) | (KeyCode::Up, _) | (KeyCode::Down, _) => {
            view_data.login.toggle_field();
        }
        (KeyCode::Enter, _) => {
            let credentials = Credentials::new(
                view_data.login.username.clone(),
                view_data.login.password.clone(),
            );
            view_data.login.password.clear();
            match runtime.authenticate(&credentials) {
                Ok(user) => sign_in(state, runtime, view_data, internal_tx, user),
                Err(error) => {
                    view_data.login.field = LoginField::Password;
                    emit_status(
                        state,
                        view_data,
                        internal_tx,
                        format!("login failed: {error}"),
                    );
                }
            }
        }
        (KeyCode::Esc, _) => {
            view_data.login = LoginUiState::default();
        }
        (KeyCode::Backspace, _) => {
            view_data.login.active_field_mut().pop();
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.login.active_field_mut().push(ch);
        }
        _ => {}
    }
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(workspace) = view_data.workspace.as_mut() else {
        return;
    };

    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) | (KeyCode::Char(']'), _) => {
            workspace.navigator.next();
        }
        (KeyCode::BackTab, _) | (KeyCode::Char('['), _) => {
            workspace.navigator.previous();
        }
        (KeyCode::Char(digit @ '1'..='9'), KeyModifiers::NONE) => {
            let number = digit as usize - '0' as usize;
            if let Err(error) = workspace.navigator.select(number - 1) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("no page {number}: {error}"),
                );
            }
        }
        (KeyCode::Char('/'), _) => {
            dispatch(state, view_data, internal_tx, AppCommand::EnterSearch);
        }
        (KeyCode::Char('x'), KeyModifiers::NONE) => {
            workspace.navigator.active_page_mut().set_search("");
            clamp_cursor(view_data);
            emit_status(state, view_data, internal_tx, "search cleared");
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => move_cursor(view_data, 1),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => move_cursor(view_data, -1),
        (KeyCode::Char('g'), _) => set_cursor(view_data, 0),
        (KeyCode::Char('G'), _) => set_cursor(view_data, usize::MAX),
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            let page = workspace.navigator.active_page();
            page.request_create(runtime);
            let message = format!("fenêtre d'ajout {} (simulation)", page.title());
            emit_status(state, view_data, internal_tx, message);
        }
        (KeyCode::Char('L'), _) => sign_out(state, view_data, internal_tx),
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        _ => {}
    }
}

fn handle_search_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(workspace) = view_data.workspace.as_mut() else {
        return;
    };
    let page = workspace.navigator.active_page_mut();

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
            dispatch(state, view_data, internal_tx, AppCommand::ExitSearch);
            return;
        }
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            page.set_search("");
        }
        (KeyCode::Backspace, _) => {
            let mut search = page.search().to_owned();
            if search.pop().is_none() {
                return;
            }
            page.set_search(&search);
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let search = format!("{}{ch}", page.search());
            page.set_search(&search);
        }
        _ => return,
    }
    clamp_cursor(view_data);
}

fn move_cursor(view_data: &mut ViewData, delta: isize) {
    let current = view_data.active_cursor() as isize;
    set_cursor(view_data, (current + delta).max(0) as usize);
}

fn set_cursor(view_data: &mut ViewData, position: usize) {
    let Some(workspace) = view_data.workspace.as_ref() else {
        return;
    };
    let active = workspace.navigator.active_index();
    let visible = workspace.navigator.active_page().visible_count();
    if let Some(cursor) = view_data.cursors.get_mut(active) {
        *cursor = position.min(visible.saturating_sub(1));
    }
}

fn clamp_cursor(view_data: &mut ViewData) {
    let current = view_data.active_cursor();
    set_cursor(view_data, current);
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    match (state.screen, view_data.workspace.as_ref()) {
        (Screen::Workspace, Some(workspace)) => {
            render_workspace(frame, state, view_data, workspace);
        }
        _ => render_login(frame, state, view_data),
    }

    if view_data.help_visible {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("aide").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_login(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let area = centered_rect(50, 40, frame.area());
    frame.render_widget(Clear, area);
    let login = Paragraph::new(login_text(&view_data.login)).block(
        Block::default()
            .title("comptoir | connexion")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(login, area);

    let outer = frame.area();
    let status_area = Rect {
        y: outer.bottom().saturating_sub(3),
        height: 3.min(outer.height),
        ..outer
    };
    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, status_area);
}

fn render_workspace(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    view_data: &ViewData,
    workspace: &Workspace,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
        .split(rows[0]);

    render_sidebar(frame, columns[0], state, workspace);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(columns[1]);

    let entry = workspace.navigator.active_entry();
    let accent = accent_color(&entry.accent);
    let heading = Paragraph::new(format!("{}  [a] ajouter", page_heading(&entry.page)))
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(heading, main[0]);

    let search_style = if state.mode == AppMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(search_box_text(&entry.page, state.mode))
        .style(search_style)
        .block(Block::default().title("recherche").borders(Borders::ALL));
    frame.render_widget(search, main[1]);

    render_table(frame, main[2], &entry.page, view_data.active_cursor());

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, rows[1]);
}

fn render_sidebar(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, workspace: &Workspace) {
    let mut items = Vec::new();
    if let Some(user) = &state.user {
        items.push(ListItem::new(format!("{} ({})", user.full_name, user.role)));
        items.push(ListItem::new(String::new()));
    }

    for (index, (line, active)) in sidebar_lines(workspace).into_iter().enumerate() {
        let style = if active {
            let accent = accent_color(&workspace.navigator.entries()[index].accent);
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(line).style(style));
    }

    items.push(ListItem::new(String::new()));
    let flagged = workspace.flagged_total();
    let alert_style = if flagged > 0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    items.push(ListItem::new(format!("alertes stock: {flagged}")).style(alert_style));
    items.push(ListItem::new("L déconnexion").style(Style::default().fg(Color::Red)));

    let sidebar = List::new(items).block(
        Block::default()
            .title("comptoir")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(sidebar, area);
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, page: &TablePage, cursor: usize) {
    let labels = page.columns().labels().collect::<Vec<_>>();
    let widths = vec![Constraint::Min(8); labels.len().max(1)];
    let header = Row::new(labels.into_iter().map(|label| {
        Cell::from(label.to_owned()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let body = table_rows(page)
        .into_iter()
        .enumerate()
        .map(|(position, (cells, flagged))| {
            let mut style = Style::default();
            if flagged {
                style = style.fg(Color::Red);
            }
            if position == cursor {
                style = style.bg(Color::DarkGray);
            }
            Row::new(cells).style(style)
        })
        .collect::<Vec<_>>();

    let empty = body.is_empty();
    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(if empty { "aucune ligne" } else { "" })
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

/// Visible rows as display cells plus their flag state. Flagged rows carry the marker
/// in the first cell; stored values are shown as-is.
fn table_rows(page: &TablePage) -> Vec<(Vec<String>, bool)> {
    page.visible_row_indices()
        .map(|row| {
            let flagged = page.is_flagged(row);
            let cells = page
                .projected_cells(row)
                .into_iter()
                .enumerate()
                .map(|(column, value)| {
                    if flagged && column == 0 {
                        format!("{FLAG_MARKER}{value}")
                    } else {
                        value.to_owned()
                    }
                })
                .collect();
            (cells, flagged)
        })
        .collect()
}

fn sidebar_lines(workspace: &Workspace) -> Vec<(String, bool)> {
    workspace
        .navigator
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let line = format!(" {} {} {}", index + 1, entry.icon, entry.label);
            (line, workspace.navigator.is_active(index))
        })
        .collect()
}

fn page_heading(page: &TablePage) -> String {
    let mut parts = vec![format!(
        "{} r:{}/{}",
        page.title(),
        page.visible_count(),
        page.row_count()
    )];
    let flagged = page.flagged_count();
    if flagged > 0 {
        parts.push(format!("alertes {flagged}"));
    }
    parts.join(" | ")
}

fn search_box_text(page: &TablePage, mode: AppMode) -> String {
    match mode {
        AppMode::Search => format!("/{}▏", page.search()),
        AppMode::Nav if page.search().is_empty() => "/ pour rechercher".to_owned(),
        AppMode::Nav => format!("/{}", page.search()),
    }
}

fn login_text(login: &LoginUiState) -> String {
    let marker = |field: LoginField| if login.field == field { ">" } else { " " };
    let masked = PASSWORD_MASK.to_string().repeat(login.password.chars().count());
    [
        String::new(),
        "DANAYA | gestion commerciale".to_owned(),
        String::new(),
        format!("{} identifiant : {}", marker(LoginField::Username), login.username),
        format!("{} mot de passe: {masked}", marker(LoginField::Password)),
        String::new(),
        "enter connexion | tab champ | esc effacer | ctrl+q quitter".to_owned(),
    ]
    .join("\n")
}

fn status_text(state: &AppState) -> String {
    let mode = match (state.screen, state.mode) {
        (Screen::Login, _) => "LOGIN",
        (Screen::Workspace, AppMode::Nav) => "NAV",
        (Screen::Workspace, AppMode::Search) => "SEARCH",
    };
    let hints = match (state.screen, state.mode) {
        (Screen::Login, _) => "enter | tab | ctrl+q",
        (Screen::Workspace, AppMode::Nav) => {
            "tab/[ ] 1-9 page | / search x clear | j/k g/G | a add | L logout | ? | ctrl+q"
        }
        (Screen::Workspace, AppMode::Search) => "type to filter | ctrl+u clear | esc/enter done",
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "tab / ]      page suivante\n\
     shift+tab / [ page précédente\n\
     1-9          aller à la page\n\
     /            rechercher (esc/enter pour valider)\n\
     x            effacer la recherche\n\
     j/k g/G      déplacer la sélection\n\
     a            ajouter une fiche\n\
     L            déconnexion\n\
     ?            fermer l'aide\n\
     ctrl+q       quitter"
}

fn accent_color(hex: &str) -> Color {
    hex.parse::<Color>().unwrap_or(Color::Cyan)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        AppRuntime, FLAG_MARKER, InternalEvent, LoginField, ViewData, accent_color,
        handle_key_event, login_text, page_heading, process_internal_events, render,
        search_box_text, sidebar_lines, status_text, table_rows,
    };
    use anyhow::{Result, anyhow};
    use comptoir_app::{
        AppMode, AppState, CreateRequest, CreateSink, Credentials, PageKind, Screen, UserInfo,
        Workspace, WorkspaceOptions, authenticate,
    };
    use comptoir_testkit::{ShopFaker, StaticProvider, record};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use std::sync::mpsc;

    #[derive(Debug, Default)]
    struct TestRuntime {
        creates: Vec<CreateRequest>,
        fail_load: bool,
        skip: bool,
    }

    impl TestRuntime {
        fn manager() -> UserInfo {
            UserInfo {
                full_name: "Gérant".to_owned(),
                role: "admin".to_owned(),
            }
        }

        fn provider() -> StaticProvider {
            StaticProvider::new()
                .with(
                    PageKind::Articles,
                    vec![
                        record(&[
                            ("Code", "RIZ001"),
                            ("Nom", "Sac de Riz 50kg"),
                            ("Prix", "25 000"),
                            ("Stock", "120"),
                        ]),
                        record(&[
                            ("Code", "HUI002"),
                            ("Nom", "Huile 5L"),
                            ("Prix", "6 500"),
                            ("Stock", "45"),
                        ]),
                    ],
                )
                .with(
                    PageKind::Clients,
                    vec![
                        record(&[("Nom", "Moussa DIARRA"), ("Tel", "76 00 11 22")]),
                        record(&[("Nom", "Boutique Danaya"), ("Tel", "65 44 33 22")]),
                    ],
                )
                .with(PageKind::Suppliers, ShopFaker::new(5).clients(3))
        }
    }

    impl CreateSink for TestRuntime {
        fn create_requested(&mut self, request: &CreateRequest) {
            self.creates.push(request.clone());
        }
    }

    impl AppRuntime for TestRuntime {
        fn authenticate(&mut self, credentials: &Credentials) -> Result<UserInfo> {
            Ok(authenticate(
                credentials,
                &Credentials::new("admin", "admin"),
                &Self::manager(),
            )?)
        }

        fn load_workspace(&mut self) -> Result<Workspace> {
            if self.fail_load {
                return Err(anyhow!("dataset unavailable"));
            }
            Workspace::build(&mut Self::provider(), &WorkspaceOptions::default())
        }

        fn skip_login(&mut self) -> Option<UserInfo> {
            self.skip.then(Self::manager)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn internal_tx() -> mpsc::Sender<InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn press(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        keys: &[KeyEvent],
    ) {
        let tx = internal_tx();
        for key in keys {
            assert!(!handle_key_event(state, runtime, view_data, &tx, *key));
        }
    }

    fn type_text(
        state: &mut AppState,
        runtime: &mut TestRuntime,
        view_data: &mut ViewData,
        text: &str,
    ) {
        let keys = text.chars().map(|ch| key(KeyCode::Char(ch))).collect::<Vec<_>>();
        press(state, runtime, view_data, &keys);
    }

    fn signed_in() -> (AppState, TestRuntime, ViewData) {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Tab)]);
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Enter)]);
        (state, runtime, view_data)
    }

    fn active_titles(view_data: &ViewData) -> String {
        view_data
            .active_page()
            .map(|page| page.title().to_owned())
            .unwrap_or_default()
    }

    fn visible_first_cells(view_data: &ViewData) -> Vec<String> {
        view_data
            .active_page()
            .map(|page| {
                table_rows(page)
                    .into_iter()
                    .map(|(cells, _)| cells[0].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn login_with_valid_credentials_opens_workspace() {
        let (state, _runtime, view_data) = signed_in();
        assert_eq!(state.screen, Screen::Workspace);
        assert_eq!(state.user, Some(TestRuntime::manager()));
        assert_eq!(active_titles(&view_data), "Gestion des Ventes");
        assert_eq!(view_data.cursors.len(), PageKind::ALL.len());
        assert_eq!(view_data.login.username, "");
    }

    #[test]
    fn login_failure_reports_and_clears_password() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Down)]);
        type_text(&mut state, &mut runtime, &mut view_data, "secret");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Enter)]);

        assert_eq!(state.screen, Screen::Login);
        assert_eq!(view_data.login.username, "admin");
        assert!(view_data.login.password.is_empty());
        assert_eq!(view_data.login.field, LoginField::Password);
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("login failed"), "{status}");
        assert!(status.contains("incorrect"), "{status}");
    }

    #[test]
    fn login_with_blank_password_names_missing_field() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Enter)]);

        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("password is required"), "{status}");
    }

    #[test]
    fn workspace_load_failure_stays_on_login() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime {
            fail_load: true,
            ..TestRuntime::default()
        };
        let mut view_data = ViewData::default();
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Tab)]);
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Enter)]);

        assert_eq!(state.screen, Screen::Login);
        assert!(view_data.workspace.is_none());
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("dataset unavailable"), "{status}");
    }

    #[test]
    fn ctrl_q_quits_from_any_screen() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &internal_tx(),
            ctrl('q')
        ));

        let (mut state, mut runtime, mut view_data) = signed_in();
        assert!(handle_key_event(
            &mut state,
            &mut runtime,
            &mut view_data,
            &internal_tx(),
            ctrl('q')
        ));
    }

    #[test]
    fn tab_and_brackets_cycle_pages() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Tab)]);
        assert_eq!(active_titles(&view_data), "Gestion des Achats");

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('[')), key(KeyCode::Char('['))],
        );
        assert_eq!(active_titles(&view_data), "Entrepôts");

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char(']'))]);
        assert_eq!(active_titles(&view_data), "Gestion des Ventes");
    }

    #[test]
    fn digit_selects_page_and_out_of_range_reports() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);
        assert_eq!(active_titles(&view_data), "Catalogue Articles");

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('9'))]);
        assert_eq!(active_titles(&view_data), "Catalogue Articles");
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("no page 9"), "{status}");
        assert!(status.contains("out of range"), "{status}");
    }

    #[test]
    fn typing_in_search_mode_filters_live() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('4')), key(KeyCode::Char('/'))],
        );
        assert_eq!(state.mode, AppMode::Search);

        type_text(&mut state, &mut runtime, &mut view_data, "d");
        assert_eq!(
            visible_first_cells(&view_data),
            vec!["Moussa DIARRA", "Boutique Danaya"]
        );

        type_text(&mut state, &mut runtime, &mut view_data, "an");
        assert_eq!(visible_first_cells(&view_data), vec!["Boutique Danaya"]);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Backspace)]);
        assert_eq!(
            view_data.active_page().map(|page| page.search().to_owned()),
            Some("da".to_owned())
        );

        press(&mut state, &mut runtime, &mut view_data, &[ctrl('u')]);
        assert_eq!(visible_first_cells(&view_data).len(), 2);
    }

    #[test]
    fn letters_in_search_mode_are_text_not_commands() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('4')), key(KeyCode::Char('/'))],
        );
        type_text(&mut state, &mut runtime, &mut view_data, "La");

        assert_eq!(state.screen, Screen::Workspace);
        assert_eq!(
            view_data.active_page().map(|page| page.search().to_owned()),
            Some("La".to_owned())
        );
    }

    #[test]
    fn search_stays_with_its_page() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('4')), key(KeyCode::Char('/'))],
        );
        type_text(&mut state, &mut runtime, &mut view_data, "dan");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Enter)]);
        assert_eq!(state.mode, AppMode::Nav);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);
        assert_eq!(
            view_data.active_page().map(|page| page.search().to_owned()),
            Some(String::new())
        );
        assert_eq!(visible_first_cells(&view_data).len(), 2);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('4'))]);
        assert_eq!(visible_first_cells(&view_data), vec!["Boutique Danaya"]);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('x'))]);
        assert_eq!(visible_first_cells(&view_data).len(), 2);
    }

    #[test]
    fn flagged_rows_carry_marker_through_filtering() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);
        assert_eq!(
            visible_first_cells(&view_data),
            vec!["RIZ001".to_owned(), format!("{FLAG_MARKER}HUI002")]
        );

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('/'))]);
        type_text(&mut state, &mut runtime, &mut view_data, "huile");
        assert_eq!(
            visible_first_cells(&view_data),
            vec![format!("{FLAG_MARKER}HUI002")]
        );

        let page = view_data.active_page().expect("articles page");
        let stock = page
            .visible_rows()
            .map(|row| row.display("Code"))
            .collect::<Vec<_>>();
        assert_eq!(stock, vec!["HUI002"]);
    }

    #[test]
    fn cursor_moves_and_clamps_to_visible_rows() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('j')), key(KeyCode::Char('j'))],
        );
        assert_eq!(view_data.active_cursor(), 1);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('g'))]);
        assert_eq!(view_data.active_cursor(), 0);
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('G'))]);
        assert_eq!(view_data.active_cursor(), 1);

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('/'))]);
        type_text(&mut state, &mut runtime, &mut view_data, "riz");
        assert_eq!(view_data.active_cursor(), 0);
    }

    #[test]
    fn add_key_notifies_runtime_and_sets_status() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('a'))]);

        assert_eq!(
            runtime.creates,
            vec![CreateRequest {
                page_title: "Gestion des Ventes".to_owned()
            }]
        );
        let status = state.status_line.clone().unwrap_or_default();
        assert!(status.contains("Gestion des Ventes (simulation)"), "{status}");
    }

    #[test]
    fn logout_returns_to_login_and_drops_workspace() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('L'))]);
        assert_eq!(state.screen, Screen::Login);
        assert!(state.user.is_none());
        assert!(view_data.workspace.is_none());
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('?')), key(KeyCode::Tab)],
        );
        assert!(view_data.help_visible);
        assert_eq!(active_titles(&view_data), "Gestion des Ventes");

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Esc)]);
        assert!(!view_data.help_visible);
    }

    #[test]
    fn sidebar_highlights_only_the_active_entry() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('2'))]);
        let workspace = view_data.workspace.as_ref().expect("signed in");
        let lines = sidebar_lines(workspace);

        assert_eq!(lines.len(), PageKind::ALL.len());
        assert_eq!(lines.iter().filter(|(_, active)| *active).count(), 1);
        assert!(lines[1].1);
        assert!(lines[1].0.contains("2"));
        assert!(lines[1].0.contains("Achats"));
    }

    #[test]
    fn page_heading_counts_visible_rows_and_alerts() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);
        let page = view_data.active_page().expect("articles page");
        assert_eq!(page_heading(page), "Catalogue Articles r:2/2 | alertes 1");
    }

    #[test]
    fn search_box_text_tracks_mode() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        let page = view_data.active_page().expect("sales page");
        assert_eq!(search_box_text(page, AppMode::Nav), "/ pour rechercher");

        press(
            &mut state,
            &mut runtime,
            &mut view_data,
            &[key(KeyCode::Char('4')), key(KeyCode::Char('/'))],
        );
        type_text(&mut state, &mut runtime, &mut view_data, "mo");
        let page = view_data.active_page().expect("clients page");
        assert_eq!(search_box_text(page, AppMode::Search), "/mo▏");
        assert_eq!(search_box_text(page, AppMode::Nav), "/mo");
    }

    #[test]
    fn login_text_masks_password() {
        let mut state = AppState::default();
        let mut runtime = TestRuntime::default();
        let mut view_data = ViewData::default();
        type_text(&mut state, &mut runtime, &mut view_data, "admin");
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Tab)]);
        type_text(&mut state, &mut runtime, &mut view_data, "abc");

        let text = login_text(&view_data.login);
        assert!(text.contains("  identifiant : admin"), "{text}");
        assert!(text.contains("> mot de passe: •••"), "{text}");
        assert!(!text.contains("abc"));
    }

    #[test]
    fn status_text_names_mode_and_message() {
        let (mut state, mut runtime, mut view_data) = signed_in();
        state.status_line = None;
        assert!(status_text(&state).starts_with("NAV | "));

        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('/'))]);
        assert!(status_text(&state).starts_with("SEARCH | "));

        state.status_line = Some("ok".to_owned());
        assert!(status_text(&state).starts_with("SEARCH | ok | "));
        assert!(status_text(&AppState::default()).starts_with("LOGIN | "));
    }

    #[test]
    fn stale_status_tokens_are_ignored() {
        let (mut state, _runtime, mut view_data) = signed_in();
        state.status_line = Some("keep".to_owned());
        view_data.status_token = 5;

        let (tx, rx) = mpsc::channel();
        tx.send(InternalEvent::ClearStatus { token: 4 })
            .expect("send stale token");
        process_internal_events(&mut state, &view_data, &rx);
        assert_eq!(state.status_line.as_deref(), Some("keep"));

        tx.send(InternalEvent::ClearStatus { token: 5 })
            .expect("send current token");
        process_internal_events(&mut state, &view_data, &rx);
        assert!(state.status_line.is_none());
    }

    #[test]
    fn accent_color_parses_hex_and_falls_back() {
        assert_eq!(accent_color("#3498db"), Color::Rgb(0x34, 0x98, 0xdb));
        assert_eq!(accent_color("bleu"), Color::Cyan);
    }

    #[test]
    fn skip_login_runtime_flag_is_exposed() {
        let mut runtime = TestRuntime {
            skip: true,
            ..TestRuntime::default()
        };
        assert_eq!(runtime.skip_login(), Some(TestRuntime::manager()));
    }

    #[test]
    fn render_draws_sidebar_table_and_flag() -> Result<()> {
        let (mut state, mut runtime, mut view_data) = signed_in();
        press(&mut state, &mut runtime, &mut view_data, &[key(KeyCode::Char('3'))]);

        let mut terminal = Terminal::new(TestBackend::new(120, 30))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;
        let screen = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();

        assert!(screen.contains("Catalogue Articles"));
        assert!(screen.contains("Entrepôts"));
        assert!(screen.contains("HUI002"));
        assert!(screen.contains("alertes stock: 1"));
        Ok(())
    }

    #[test]
    fn render_login_screen() -> Result<()> {
        let state = AppState::default();
        let view_data = ViewData::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|frame| render(frame, &state, &view_data))?;
        let screen = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();

        assert!(screen.contains("connexion"));
        assert!(screen.contains("LOGIN"));
        Ok(())
    }
}
