//! Core TUI application state and event loop.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use tracing::info;

use portfoliobuilder_core::{Clipboard, PackageDelivery, PublishPipeline, Wizard};
use portfoliobuilder_shared::{
    AppConfig, Catalogs, Document, PipelineTiming, PortfolioBuilderError, resolve_output_dir,
};

use crate::screens::{Action, ScreenId, Screens};
use crate::widgets::status_bar;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything the screens share: the wizard, the finished snapshot, and the
/// publish pipeline.
pub(crate) struct Session {
    pub catalogs: Arc<Catalogs>,
    pub wizard: Wizard,
    /// Snapshot taken by "Generate Portfolio" on the last step.
    pub finished: Option<Document>,
    pub pipeline: PublishPipeline,
    pub template_id: String,
    pub scheme_name: String,
    config: AppConfig,
}

impl Session {
    pub(crate) fn new(
        catalogs: Arc<Catalogs>,
        config: AppConfig,
    ) -> portfoliobuilder_shared::Result<Self> {
        let template_id = config.defaults.template.clone();
        let scheme_name = config.defaults.color_scheme.clone();
        let pipeline = build_pipeline(&catalogs, &config, &template_id, &scheme_name)?;
        Ok(Self {
            wizard: Wizard::new(Arc::clone(&catalogs)),
            catalogs,
            finished: None,
            pipeline,
            template_id,
            scheme_name,
            config,
        })
    }

    /// Switch the package style. Rebuilds the pipeline, so any run is dropped.
    pub(crate) fn select_template(
        &mut self,
        template_id: &str,
        scheme_name: &str,
    ) -> portfoliobuilder_shared::Result<()> {
        self.pipeline = build_pipeline(&self.catalogs, &self.config, template_id, scheme_name)?;
        self.template_id = template_id.to_string();
        self.scheme_name = scheme_name.to_string();
        info!(template = template_id, scheme = scheme_name, "template selected");
        Ok(())
    }

    /// Drop the finished snapshot and any run; the user is editing again.
    pub(crate) fn back_to_edit(&mut self) {
        self.finished = None;
        self.pipeline.reset();
    }
}

fn build_pipeline(
    catalogs: &Arc<Catalogs>,
    config: &AppConfig,
    template_id: &str,
    scheme_name: &str,
) -> portfoliobuilder_shared::Result<PublishPipeline> {
    let output_root = resolve_output_dir(&config.defaults.output_dir)?;
    let delivery = PackageDelivery::new(
        catalogs,
        output_root,
        template_id,
        scheme_name,
        env!("CARGO_PKG_VERSION"),
    )?;
    Ok(PublishPipeline::new(
        Arc::clone(catalogs),
        PipelineTiming::from(config),
        Arc::new(delivery),
    ))
}

/// Copies through the terminal with an OSC 52 escape sequence.
pub(crate) struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn set_text(&self, text: &str) -> portfoliobuilder_shared::Result<()> {
        emit_osc52(&STANDARD.encode(text)).map_err(|e| PortfolioBuilderError::io("<terminal>", e))
    }
}

fn emit_osc52(payload: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b]52;c;{payload}\x07")?;
    stdout.flush()
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    pub active_tab: usize,
    /// Available screens.
    pub tabs: Vec<ScreenId>,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status message shown in bottom bar.
    pub status: String,
    /// Whether help overlay is visible.
    pub show_help: bool,
    pub screens: Screens,
    pub session: Session,
}

impl App {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            active_tab: 0,
            tabs: vec![ScreenId::Builder, ScreenId::Publish, ScreenId::Templates],
            should_quit: false,
            status: "Ready · press ? for help".to_string(),
            show_help: false,
            screens: Screens::new(),
            session,
        }
    }

    fn current(&self) -> ScreenId {
        self.tabs[self.active_tab]
    }

    fn is_editing(&self) -> bool {
        self.screens.is_editing(self.current())
    }

    fn switch_to(&mut self, id: ScreenId) {
        if let Some(idx) = self.tabs.iter().position(|t| *t == id) {
            self.active_tab = idx;
        }
    }
}

/// Entry point: sets up terminal, runs event loop, restores terminal.
pub(crate) fn run(session: Session) -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, App::new(session));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout so pipeline progress keeps redrawing
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(&mut app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='3') if !app.is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.tabs.len() {
                app.active_tab = idx;
                app.status = app.tabs[idx].to_string();
            }
            return;
        }
        KeyCode::Tab if !app.is_editing() => {
            app.active_tab = (app.active_tab + 1) % app.tabs.len();
            app.status = app.tabs[app.active_tab].to_string();
            return;
        }
        KeyCode::BackTab if !app.is_editing() => {
            app.active_tab = if app.active_tab == 0 {
                app.tabs.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = app.tabs[app.active_tab].to_string();
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    let current = app.current();
    match app.screens.handle_key(current, code, modifiers, &mut app.session) {
        Some(Action::Status(msg)) => app.status = msg,
        Some(Action::SwitchTo(id, msg)) => {
            app.switch_to(id);
            app.status = msg;
        }
        None => {}
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app.tabs.iter().map(|s| Line::from(s.to_string())).collect();

    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" PortfolioBuilder "),
        )
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area: delegate to screen
    app.screens.draw(app.current(), f, chunks[1], &app.session);

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(64, 70, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-3          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Builder:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓          Select field"),
        Line::from("  Enter        Edit field / add skill"),
        Line::from("  n / b        Next / previous step"),
        Line::from("  [ / ]        Select project or link"),
        Line::from("  a / x        Add / remove entry"),
        Line::from("  p / m        Toggle preview / device width"),
        Line::from("  g            Generate portfolio (last step)"),
        Line::from(""),
        Line::from("Publish:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  Enter        Publish to selected target"),
        Line::from("  c            Copy hosted URL"),
        Line::from("  e            Back to edit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help · press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
