use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context as _, Result, anyhow};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    backend::{Backend, CrosstermBackend, TestBackend},
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{
        Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
    },
};
use roster_core::common::messages::{DomainMessage, Effect};
use roster_core::domains::auth::messages::Message as AuthMessage;
use roster_core::domains::ui::confirm::{DELETE_MESSAGE, DELETE_TITLE};
use roster_core::domains::ui::messages::UiMessage;
use roster_core::domains::ui::view::{EDITOR_FIELDS, SKELETON_ROWS};
use roster_core::domains::ui::{FormField, UserEditor, ViewMode};
use roster_core::domains::users::messages::Message as UsersMessage;
use roster_core::{App, Route, Services};
use roster_model::User;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

use super::Context;
use super::theme::THEME;

const SCRIPT_ENV: &str = "ROSTERCTL_TUI_SCRIPT";
const TRACE_ENV: &str = "ROSTERCTL_TUI_TRACE";
const SCRIPT_SCREEN: (u16, u16) = (100, 32);

/// Source of key/input events so tests can drive the TUI without a real tty.
trait EventSource: Send {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>>;
    fn is_scripted(&self) -> bool {
        false
    }
}

struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

enum ScriptStep {
    Key(Event),
    Pause(Duration),
}

/// Scripted event source driven by a simple line-oriented DSL:
///   down|up|left|right|enter|esc|tab|backtab|backspace|space|ctrl-c|
///   key:<char>|type:<text>|wait:<millis>
/// Lines beginning with # are ignored. Blank lines are skipped.
/// When events are exhausted, we fail fast to avoid hangs.
struct ScriptEventSource {
    steps: Vec<ScriptStep>,
    cursor: usize,
    exhausted_at: Option<Instant>,
    trace: Option<File>,
}

fn key_event(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: event::KeyEventState::NONE,
    })
}

fn scripted(code: KeyCode, modifiers: KeyModifiers) -> ScriptStep {
    ScriptStep::Key(key_event(code, modifiers))
}

impl ScriptEventSource {
    fn from_path(path: PathBuf, trace_path: Option<PathBuf>) -> Result<Self> {
        let contents = std::fs::read_to_string(&path)
            .context("read scripted TUI input")?;
        let mut steps = Vec::new();
        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line {
                "down" => steps.push(scripted(KeyCode::Down, KeyModifiers::NONE)),
                "up" => steps.push(scripted(KeyCode::Up, KeyModifiers::NONE)),
                "left" => steps.push(scripted(KeyCode::Left, KeyModifiers::NONE)),
                "right" => steps.push(scripted(KeyCode::Right, KeyModifiers::NONE)),
                "enter" => steps.push(scripted(KeyCode::Enter, KeyModifiers::NONE)),
                "esc" => steps.push(scripted(KeyCode::Esc, KeyModifiers::NONE)),
                "tab" => steps.push(scripted(KeyCode::Tab, KeyModifiers::NONE)),
                "backtab" => steps.push(scripted(KeyCode::BackTab, KeyModifiers::SHIFT)),
                "backspace" => steps.push(scripted(KeyCode::Backspace, KeyModifiers::NONE)),
                "space" => steps.push(scripted(KeyCode::Char(' '), KeyModifiers::NONE)),
                "ctrl-c" => steps.push(scripted(KeyCode::Char('c'), KeyModifiers::CONTROL)),
                _ => {
                    if let Some(rest) = line.strip_prefix("type:") {
                        for ch in rest.chars() {
                            steps.push(scripted(KeyCode::Char(ch), KeyModifiers::NONE));
                        }
                    } else if let Some(rest) = line.strip_prefix("key:")
                        && let Some(ch) = rest.chars().next()
                    {
                        steps.push(scripted(KeyCode::Char(ch), KeyModifiers::NONE));
                    } else if let Some(rest) = line.strip_prefix("wait:") {
                        let millis: u64 = rest.trim().parse().with_context(|| {
                            format!("invalid wait at line {}: {}", idx + 1, line)
                        })?;
                        steps.push(ScriptStep::Pause(Duration::from_millis(millis)));
                    } else {
                        return Err(anyhow!(
                            "unrecognized TUI script token at line {}: {}",
                            idx + 1,
                            line
                        ));
                    }
                }
            }
        }

        let trace = trace_path
            .map(|p| File::create(p).context("create tui trace file"))
            .transpose()?;

        Ok(Self {
            steps,
            cursor: 0,
            exhausted_at: None,
            trace,
        })
    }
}

impl EventSource for ScriptEventSource {
    fn next(&mut self, _timeout: Duration) -> Result<Option<Event>> {
        let Some(step) = self.steps.get(self.cursor) else {
            // Allow a short grace period before failing to avoid tight loop.
            match self.exhausted_at {
                Some(ea) => {
                    if ea.elapsed() > Duration::from_secs(1) {
                        return Err(anyhow!(
                            "scripted TUI input exhausted before the console exited"
                        ));
                    }
                }
                None => self.exhausted_at = Some(Instant::now()),
            }
            std::thread::sleep(Duration::from_millis(25));
            return Ok(None);
        };
        self.cursor += 1;

        match step {
            ScriptStep::Pause(duration) => {
                std::thread::sleep(*duration);
                Ok(None)
            }
            ScriptStep::Key(ev) => {
                let ev = ev.clone();
                if let Some(trace) = self.trace.as_mut() {
                    let _ = writeln!(trace, "{:?}", ev);
                }
                Ok(Some(ev))
            }
        }
    }

    fn is_scripted(&self) -> bool {
        true
    }
}

fn event_source_from_env() -> Result<Box<dyn EventSource>> {
    if let Ok(path) = std::env::var(SCRIPT_ENV) {
        let trace = std::env::var(TRACE_ENV).ok();
        let src = ScriptEventSource::from_path(
            PathBuf::from(path),
            trace.map(PathBuf::from),
        )?;
        Ok(Box::new(src))
    } else {
        Ok(Box::new(CrosstermEventSource))
    }
}

/// Runs effects on the tokio runtime and posts their results back to the
/// console loop.
struct Dispatcher {
    services: Services,
    handle: Handle,
    tx: UnboundedSender<DomainMessage>,
}

impl Dispatcher {
    fn spawn_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            debug!(?effect, "spawning effect");
            let services = self.services.clone();
            let tx = self.tx.clone();
            self.handle.spawn(async move {
                let message = services.perform(effect).await;
                // The loop may already have exited.
                let _ = tx.send(message);
            });
        }
    }
}

enum KeyAction {
    Quit,
    Dispatch(Vec<DomainMessage>),
}

impl KeyAction {
    fn none() -> Self {
        Self::Dispatch(Vec::new())
    }

    fn one(message: impl Into<DomainMessage>) -> Self {
        Self::Dispatch(vec![message.into()])
    }
}

pub async fn run_console(ctx: Context) -> Result<()> {
    let source = event_source_from_env()?;
    let services = ctx.services.clone();
    let app = ctx.app();
    let handle = Handle::current();
    info!(api = %ctx.config.base_url, "starting console");

    tokio::task::spawn_blocking(move || run_blocking(app, services, source, handle))
        .await
        .context("console task failed")?
}

fn run_blocking(
    mut app: App,
    services: Services,
    mut source: Box<dyn EventSource>,
    handle: Handle,
) -> Result<()> {
    let (tx, mut rx) = unbounded_channel();
    let dispatcher = Dispatcher {
        services,
        handle,
        tx,
    };
    dispatcher.spawn_all(app.start());

    if source.is_scripted() {
        let (width, height) = SCRIPT_SCREEN;
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        let result =
            run_app(&mut terminal, &mut app, &dispatcher, &mut rx, source.as_mut());
        // Scripted runs print the last frame so callers can assert on it.
        println!("{}", buffer_text(terminal.backend().buffer()));
        return result;
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result =
        run_app(&mut terminal, &mut app, &dispatcher, &mut rx, source.as_mut());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    dispatcher: &Dispatcher,
    rx: &mut UnboundedReceiver<DomainMessage>,
    source: &mut dyn EventSource,
) -> Result<()> {
    loop {
        while let Ok(message) = rx.try_recv() {
            dispatcher.spawn_all(app.update(message));
        }
        app.update(UiMessage::Tick);

        terminal.draw(|f| render(f, app))?;

        if let Some(Event::Key(key)) = source.next(Duration::from_millis(100))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match handle_key(key, app) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Dispatch(messages) => {
                    for message in messages {
                        dispatcher.spawn_all(app.update(message));
                    }
                }
            }
        }
    }
}

fn handle_key(key: KeyEvent, app: &mut App) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match app.route {
        Route::Login => login_keys(key, app),
        Route::Users => {
            if app.view.delete.show {
                delete_keys(key)
            } else if let Some(editor) = app.view.editor.as_ref() {
                editor_keys(key, editor)
            } else if app.view.searching {
                search_keys(key, app)
            } else {
                list_keys(key, app)
            }
        }
    }
}

fn edited(current: &str, key: KeyCode) -> Option<String> {
    match key {
        KeyCode::Char(c) => {
            let mut next = current.to_string();
            next.push(c);
            Some(next)
        }
        KeyCode::Backspace => {
            let mut next = current.to_string();
            next.pop();
            Some(next)
        }
        _ => None,
    }
}

fn login_keys(key: KeyEvent, app: &App) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            KeyAction::one(AuthMessage::ToggleField)
        }
        KeyCode::Enter => KeyAction::one(AuthMessage::Submit),
        code => {
            let form = &app.login.form;
            match app.login.focus {
                FormField::Password => edited(&form.password, code)
                    .map(|v| KeyAction::one(AuthMessage::PasswordChanged(v))),
                _ => edited(&form.email, code)
                    .map(|v| KeyAction::one(AuthMessage::EmailChanged(v))),
            }
            .unwrap_or_else(KeyAction::none)
        }
    }
}

fn list_keys(key: KeyEvent, app: &mut App) -> KeyAction {
    let selected = app.view.selected_user(app.users.users()).map(|u| u.id);
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Down | KeyCode::Char('j') => KeyAction::one(UiMessage::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => KeyAction::one(UiMessage::SelectPrevious),
        KeyCode::Right | KeyCode::Char(']') => KeyAction::one(UsersMessage::NextPage),
        KeyCode::Left | KeyCode::Char('[') => KeyAction::one(UsersMessage::PreviousPage),
        KeyCode::Char(c @ '1'..='9') => {
            let page = c.to_digit(10).unwrap_or(1);
            KeyAction::one(UsersMessage::GoToPage(page))
        }
        KeyCode::Char('v') => KeyAction::one(UiMessage::ToggleViewMode),
        KeyCode::Char('/') => {
            app.view.searching = true;
            KeyAction::none()
        }
        KeyCode::Esc if !app.view.search.is_empty() => {
            KeyAction::one(UiMessage::SearchChanged(String::new()))
        }
        KeyCode::Char('c') => KeyAction::one(UiMessage::OpenCreate),
        KeyCode::Char('e') | KeyCode::Enter => selected
            .map(|id| KeyAction::one(UiMessage::OpenEdit(id)))
            .unwrap_or_else(KeyAction::none),
        KeyCode::Char('d') | KeyCode::Delete => selected
            .map(|id| KeyAction::one(UiMessage::DeleteRequested(id)))
            .unwrap_or_else(KeyAction::none),
        KeyCode::Char('r') => KeyAction::one(UsersMessage::Refresh),
        KeyCode::Char('l') => KeyAction::one(AuthMessage::Logout),
        _ => KeyAction::none(),
    }
}

fn search_keys(key: KeyEvent, app: &mut App) -> KeyAction {
    match key.code {
        KeyCode::Enter => {
            app.view.searching = false;
            KeyAction::none()
        }
        KeyCode::Esc => {
            app.view.searching = false;
            KeyAction::one(UiMessage::SearchChanged(String::new()))
        }
        code => edited(&app.view.search, code)
            .map(|v| KeyAction::one(UiMessage::SearchChanged(v)))
            .unwrap_or_else(KeyAction::none),
    }
}

fn editor_keys(key: KeyEvent, editor: &UserEditor) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::one(UiMessage::EditorCancel),
        KeyCode::Tab | KeyCode::Down => KeyAction::one(UiMessage::EditorFocusNext),
        KeyCode::BackTab | KeyCode::Up => {
            KeyAction::one(UiMessage::EditorFocusPrevious)
        }
        KeyCode::Enter => KeyAction::one(UiMessage::EditorSubmit),
        code => edited(editor.form.value(editor.focus), code)
            .map(|v| KeyAction::one(UiMessage::EditorFieldChanged(editor.focus, v)))
            .unwrap_or_else(KeyAction::none),
    }
}

fn delete_keys(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            KeyAction::one(UiMessage::DeleteConfirmed)
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            KeyAction::one(UiMessage::DeleteCancelled)
        }
        _ => KeyAction::none(),
    }
}

fn render(f: &mut Frame, app: &App) {
    let area = f.size();
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)]
                .as_ref(),
        )
        .split(area);

    render_top_bar(f, vertical[0], app);
    match app.route {
        Route::Login => render_login(f, vertical[1], app),
        Route::Users => render_users(f, vertical[1], app),
    }
    render_help(f, vertical[2], app);

    if app.route == Route::Users {
        if let Some(editor) = app.view.editor.as_ref() {
            render_editor(f, area, editor, app.users.is_loading());
        }
        if app.view.delete.show {
            render_delete(f, area, app.users.is_loading());
        }
    }
    render_toasts(f, area, app);
}

fn render_top_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Roster", THEME.title()),
        Span::styled("  ·  API: ", THEME.muted()),
        Span::styled(app.api_host.clone(), THEME.text()),
    ];
    if app.session.is_authenticated() {
        spans.push(Span::styled("   [l] Logout", THEME.muted()));
    }
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(THEME.border(false)));
    f.render_widget(bar, area);
}

fn render_help(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.route {
        Route::Login => "Enter: sign in · Tab: switch field · Esc: quit",
        Route::Users if app.view.delete.show => "y: delete · n/Esc: cancel",
        Route::Users if app.view.editor.is_some() => {
            "Tab/↓: next field · Shift-Tab/↑: previous · Enter: save · Esc: cancel"
        }
        Route::Users if app.view.searching => "Type to filter · Enter: done · Esc: clear",
        Route::Users => {
            "j/k: select · ←/→: page · /: search · v: view · c: create · e: edit · d: delete · r: refresh · q: quit"
        }
    };
    f.render_widget(Paragraph::new(Span::styled(text, THEME.muted())), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn skeleton_line(width: usize) -> Line<'static> {
    Line::from(Span::styled("░".repeat(width), THEME.skeleton()))
}

fn field_lines(
    label: &str,
    value: String,
    focused: bool,
    error: Option<&str>,
) -> Vec<Line<'static>> {
    let value_style = if focused {
        THEME.text().add_modifier(Modifier::UNDERLINED)
    } else {
        THEME.text()
    };
    let cursor = if focused { "▌" } else { "" };
    vec![
        Line::from(Span::styled(label.to_string(), THEME.border(focused))),
        Line::from(vec![
            Span::styled(value, value_style),
            Span::styled(cursor, THEME.border(true)),
        ]),
        Line::from(Span::styled(
            error.unwrap_or_default().to_string(),
            THEME.error_text(),
        )),
    ]
}

fn render_login(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered_rect(54, 14, area);
    let session = app.session.session();
    let login = &app.login;

    let mut lines = Vec::new();
    if session.loading {
        for _ in 0..6 {
            lines.push(skeleton_line(40));
        }
    } else {
        lines.extend(field_lines(
            "Email",
            login.form.email.clone(),
            login.focus == FormField::Email,
            login.errors.field(FormField::Email),
        ));
        lines.extend(field_lines(
            "Password",
            "•".repeat(login.form.password.chars().count()),
            login.focus == FormField::Password,
            login.errors.field(FormField::Password),
        ));
    }
    if let Some(error) = session.error.as_deref() {
        lines.push(Line::from(Span::styled(error.to_string(), THEME.error_text())));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        " Sign in ",
        THEME.button(!session.loading, true),
    )));

    let form = Paragraph::new(lines).block(
        Block::default()
            .title("Sign in")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(THEME.border(true)),
    );
    f.render_widget(form, popup);
}

fn render_users(f: &mut Frame, area: Rect, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [Constraint::Length(3), Constraint::Min(3), Constraint::Length(3)]
                .as_ref(),
        )
        .split(area);

    render_search(f, vertical[0], app);

    let visible = app.view.visible(app.users.users());
    if app.users.is_loading() {
        render_skeletons(f, vertical[1], app.view.mode);
    } else if visible.is_empty() {
        let empty = Paragraph::new(Span::styled("No users found", THEME.muted()))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(THEME.border(false)));
        f.render_widget(empty, vertical[1]);
    } else {
        match app.view.mode {
            ViewMode::Table => render_table(f, vertical[1], &visible, app.view.selected),
            ViewMode::Card => render_cards(f, vertical[1], &visible, app.view.selected),
        }
    }

    render_pagination(f, vertical[2], app);
}

fn render_search(f: &mut Frame, area: Rect, app: &App) {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(34)].as_ref())
        .split(area);

    let query = if app.view.search.is_empty() && !app.view.searching {
        Span::styled("Search by name or email (/)", THEME.muted())
    } else {
        Span::styled(app.view.search.clone(), THEME.text())
    };
    let search = Paragraph::new(Line::from(query)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(THEME.border(app.view.searching)),
    );
    f.render_widget(search, horizontal[0]);

    let actions = Paragraph::new(Line::from(vec![
        Span::styled(format!("View: {} (v)", app.view.mode.label()), THEME.text()),
        Span::raw("  "),
        Span::styled(" + Create (c) ", THEME.button(!app.users.is_loading(), true)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(THEME.border(false)));
    f.render_widget(actions, horizontal[1]);
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

fn render_table(f: &mut Frame, area: Rect, users: &[&User], selected: usize) {
    let header = Row::new(["ID", "Avatar", "Name", "Email", "Actions"])
        .style(THEME.title());
    let rows: Vec<Row> = users
        .iter()
        .map(|user| {
            Row::new(vec![
                Cell::from(user.id.to_string()),
                Cell::from(truncate(&user.avatar, 23)),
                Cell::from(user.full_name()),
                Cell::from(user.email.clone()),
                Cell::from("[e] Edit  [d] Delete"),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(4),
        Constraint::Length(24),
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title("Users").borders(Borders::ALL))
        .highlight_style(THEME.selection())
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(selected.min(users.len().saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

const CARD_WIDTH: u16 = 34;
const CARD_HEIGHT: u16 = 6;

fn card_rects(area: Rect, count: usize) -> Vec<Rect> {
    let columns = (area.width / CARD_WIDTH).max(1);
    let width = area.width / columns;
    (0..count)
        .map(|idx| {
            let idx = idx as u16;
            let x = area.x + (idx % columns) * width;
            let y = area.y + (idx / columns) * CARD_HEIGHT;
            Rect::new(x, y, width, CARD_HEIGHT)
        })
        .take_while(|rect| rect.bottom() <= area.bottom())
        .collect()
}

fn render_cards(f: &mut Frame, area: Rect, users: &[&User], selected: usize) {
    for (idx, (user, rect)) in users.iter().zip(card_rects(area, users.len())).enumerate() {
        let lines = vec![
            Line::from(Span::styled(user.full_name(), THEME.title())),
            Line::from(Span::styled(user.mailto(), THEME.text())),
            Line::from(Span::styled(truncate(&user.avatar, 30), THEME.muted())),
            Line::from(Span::styled("[e] Edit  [d] Delete", THEME.muted())),
        ];
        let card = Paragraph::new(lines).block(
            Block::default()
                .title(format!("#{}", user.id))
                .borders(Borders::ALL)
                .border_style(THEME.border(idx == selected)),
        );
        f.render_widget(card, rect);
    }
}

fn render_skeletons(f: &mut Frame, area: Rect, mode: ViewMode) {
    match mode {
        ViewMode::Table => {
            let lines: Vec<Line> =
                (0..SKELETON_ROWS).map(|_| skeleton_line(area.width.saturating_sub(4) as usize)).collect();
            let block = Paragraph::new(lines)
                .block(Block::default().title("Users").borders(Borders::ALL));
            f.render_widget(block, area);
        }
        ViewMode::Card => {
            for rect in card_rects(area, SKELETON_ROWS) {
                let inner = rect.width.saturating_sub(4) as usize;
                let card = Paragraph::new(vec![
                    skeleton_line(inner / 2),
                    skeleton_line(inner),
                    skeleton_line(inner),
                ])
                .block(Block::default().borders(Borders::ALL).border_style(THEME.skeleton()));
                f.render_widget(card, rect);
            }
        }
    }
}

fn render_pagination(f: &mut Frame, area: Rect, app: &App) {
    let users = &app.users;
    let mut spans = vec![Span::styled(
        "‹ Prev ",
        THEME.button(users.has_previous(), false),
    )];
    for page in users.page_numbers() {
        let style = if page == users.current_page() {
            THEME.selection()
        } else {
            THEME.text()
        };
        spans.push(Span::styled(format!(" {page} "), style));
    }
    spans.push(Span::styled(" Next ›", THEME.button(users.has_next(), false)));
    spans.push(Span::styled(
        format!("   {} users", users.total()),
        THEME.muted(),
    ));

    let bar = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(THEME.border(false)));
    f.render_widget(bar, area);
}

fn render_editor(f: &mut Frame, area: Rect, editor: &UserEditor, loading: bool) {
    let popup = centered_rect(64, 18, area);
    f.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for field in EDITOR_FIELDS {
        lines.extend(field_lines(
            field.label(),
            editor.form.value(field).to_string(),
            editor.focus == field,
            editor.errors.field(field),
        ));
    }
    lines.push(Line::from(vec![
        Span::styled(" Cancel (Esc) ", THEME.button(!loading, false)),
        Span::raw("  "),
        Span::styled(
            format!(" {} (Enter) ", editor.submit_label()),
            THEME.button(!loading, true),
        ),
    ]));

    let modal = Paragraph::new(lines).block(
        Block::default()
            .title(editor.title())
            .borders(Borders::ALL)
            .border_style(THEME.border(true)),
    );
    f.render_widget(modal, popup);
}

fn render_delete(f: &mut Frame, area: Rect, loading: bool) {
    let popup = centered_rect(60, 7, area);
    f.render_widget(Clear, popup);
    let lines = vec![
        Line::from(Span::styled(DELETE_MESSAGE, THEME.text())),
        Line::default(),
        Line::from(vec![
            Span::styled(" Cancel (n) ", THEME.button(!loading, false)),
            Span::raw("  "),
            Span::styled(" Delete (y) ", THEME.danger_button(!loading)),
        ]),
    ];
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(DELETE_TITLE)
            .borders(Borders::ALL)
            .border_style(THEME.error_text()),
    );
    f.render_widget(dialog, popup);
}

fn render_toasts(f: &mut Frame, area: Rect, app: &App) {
    let width = 44.min(area.width);
    let mut y = area.y + 3;
    for toast in app.toasts.visible().iter().rev() {
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(area.right().saturating_sub(width), y, width, 3);
        f.render_widget(Clear, rect);
        let style = THEME.toast(toast.kind);
        let body = Paragraph::new(Span::styled(toast.message.clone(), style))
            .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(body, rect);
        y += 3;
    }
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer.get(x, y).symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::domains::users::store::RefreshPolicy;
    use roster_core::{MemoryTokenStorage, SessionStore};
    use roster_core::infrastructure::testing::demo_page;
    use roster_model::AuthToken;
    use std::sync::Arc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(logged_in: bool) -> App {
        let storage = if logged_in {
            MemoryTokenStorage::with_token(AuthToken::new("abc"))
        } else {
            MemoryTokenStorage::new()
        };
        let mut app = App::new(
            SessionStore::restore(Arc::new(storage)),
            RefreshPolicy::default(),
        )
        .with_api_host("reqres.in");
        if let Some(Effect::FetchUsers(ticket)) = app.start().pop() {
            app.update(UsersMessage::PageLoaded(ticket, Ok(demo_page(1))));
        }
        app
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn script_parser_expands_typing_and_rejects_unknown_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script");
        std::fs::write(&path, "# sign in\ntype:ab\n\nwait:5\nenter\n").unwrap();
        let source = ScriptEventSource::from_path(path.clone(), None).unwrap();
        assert_eq!(source.steps.len(), 4);
        assert!(matches!(source.steps[2], ScriptStep::Pause(_)));

        std::fs::write(&path, "jump\n").unwrap();
        assert!(ScriptEventSource::from_path(path, None).is_err());
    }

    #[test]
    fn login_screen_masks_password() {
        let app = app(false);
        let screen = draw(&app);
        assert!(screen.contains("Sign in"));
        assert!(screen.contains("eve.holt@reqres.in"));
        assert!(!screen.contains("cityslicka"));
        assert!(screen.contains("reqres.in"));
    }

    #[test]
    fn users_table_lists_page_and_pagination() {
        let app = app(true);
        let screen = draw(&app);
        assert!(screen.contains("George Bluth"));
        assert!(screen.contains("tracey.ramos@reqres.in"));
        assert!(screen.contains("12 users"));
        assert!(screen.contains("[l] Logout"));
    }

    #[test]
    fn typing_on_login_page_edits_focused_field() {
        let mut app = app(false);
        let KeyAction::Dispatch(messages) = handle_key(press(KeyCode::Backspace), &mut app)
        else {
            panic!("backspace should not quit");
        };
        assert_eq!(messages.len(), 1);
        app.update(messages.into_iter().next().unwrap());
        assert_eq!(app.login.form.email, "eve.holt@reqres.i");
        assert!(matches!(handle_key(press(KeyCode::Esc), &mut app), KeyAction::Quit));
    }

    #[test]
    fn delete_key_opens_confirmation_for_selected_user() {
        let mut app = app(true);
        let KeyAction::Dispatch(messages) = handle_key(press(KeyCode::Char('d')), &mut app)
        else {
            panic!("d should not quit");
        };
        for message in messages {
            assert!(app.update(message).is_empty());
        }
        assert!(app.view.delete.show);
        let screen = draw(&app);
        assert!(screen.contains(DELETE_TITLE));
    }

    #[test]
    fn card_view_and_editor_render() {
        let mut app = app(true);
        app.update(UiMessage::ToggleViewMode);
        app.update(UiMessage::OpenCreate);
        let screen = draw(&app);
        assert!(screen.contains("Create New User"));
        assert!(screen.contains("Profile Image Link"));
    }
}
