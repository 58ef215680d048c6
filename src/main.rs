use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, anyhow};
use clap::Parser;
use crossterm::cursor::SetCursorStyle;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod autocomplete;
mod content;
mod engine;
mod events;
mod history;
mod interpreter;
mod picker;
mod registry;
mod response_log;
mod scheduler;
mod script;
mod text_layout;
mod theme;
mod typewriter;
mod ui;

use app::App;
use content::{Content, ContentCatalog, Locale};
use engine::Key;
use events::AppEvent;
use theme::Theme;

const LOG_FILE_ENV: &str = "PORTFOLIO_TERM_LOG";

/// A portfolio presented as a simulated command line.
#[derive(Debug, Parser)]
#[command(name = "portfolio-term", version)]
struct Cli {
    /// Starting language; F2 switches at runtime.
    #[arg(long, value_enum, default_value_t = Locale::En)]
    locale: Locale,
    /// TOML file replacing the built-in content for the locale it declares.
    #[arg(long)]
    content: Option<PathBuf>,
    #[arg(long, default_value = "theme.toml")]
    theme: PathBuf,
    /// Append logs to this file. Falls back to $PORTFOLIO_TERM_LOG.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Run a command headlessly and print the result as JSON. Repeatable.
    #[arg(long = "exec", value_name = "COMMAND")]
    exec: Vec<String>,
    /// Run every line of a file headlessly.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Hand links and mail addresses to the system opener.
    #[arg(long)]
    open_links: bool,
}

impl Cli {
    fn is_headless(&self) -> bool {
        !self.exec.is_empty() || self.script.is_some()
    }

    fn log_file(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file().as_deref(), cli.is_headless())?;

    let catalog = load_catalog(cli.content.as_deref())?;
    if cli.is_headless() {
        return run_headless(&cli, catalog.get(cli.locale).clone());
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetCursorStyle::SteadyBlock
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    let theme = Theme::load_or_default(&cli.theme);
    let app = App::new(catalog, cli.locale, Instant::now()).with_open_links(cli.open_links);
    info!(locale = cli.locale.code(), "terminal started");
    let result = run_app(&mut terminal, app, &theme);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        SetCursorStyle::DefaultUserShape,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.context("terminal loop failed")
}

fn init_tracing(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .try_init()
            .map_err(|err| anyhow!(err))?;
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err))?;
    }
    Ok(())
}

fn load_catalog(content_path: Option<&Path>) -> anyhow::Result<ContentCatalog> {
    let catalog = ContentCatalog::embedded().context("built-in content is invalid")?;
    let Some(path) = content_path else {
        return Ok(catalog);
    };
    let content = Content::load(path)
        .with_context(|| format!("failed to load content from {}", path.display()))?;
    Ok(catalog.with_override(content)?)
}

fn run_headless(cli: &Cli, content: Content) -> anyhow::Result<()> {
    let mut commands = cli.exec.clone();
    if let Some(path) = &cli.script {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        commands.extend(text.lines().map(str::to_string));
    }
    let records = script::run(content, &commands);
    script::write_json_lines(io::stdout().lock(), &records)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    theme: &Theme,
) -> io::Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, &app, theme))?;

        let event = events::next_event()?;
        let size = terminal.size()?;
        let screen = Rect::new(0, 0, size.width, size.height);
        step(&mut app, event, screen, Instant::now());
    }
    Ok(())
}

/// Brings the engine clock up to `now` before dispatching, so whatever the
/// event schedules is measured from the moment it arrived.
fn step(app: &mut App, event: AppEvent, screen: Rect, now: Instant) {
    app.on_tick(now);
    handle_event(app, event, screen, now);
}

fn handle_event(app: &mut App, event: AppEvent, screen: Rect, now: Instant) {
    match event {
        AppEvent::Tick => {}
        AppEvent::Quit => app.quit(),
        AppEvent::InputChar(ch) => app.input_char(ch),
        AppEvent::Backspace => app.backspace(),
        AppEvent::Submit => {
            app.key(Key::Enter);
        }
        AppEvent::HistoryUp => {
            app.key(Key::ArrowUp);
        }
        AppEvent::HistoryDown => {
            app.key(Key::ArrowDown);
        }
        AppEvent::AcceptCompletion => {
            app.key(Key::Tab);
        }
        AppEvent::CursorRight => {
            app.key(Key::ArrowRight);
        }
        AppEvent::ClearScreen => {
            app.key(Key::ClearScreen);
        }
        AppEvent::Escape => app.escape(now),
        AppEvent::ToggleLocale => app.toggle_locale(now),
        AppEvent::ActivateAction(number) => app.activate_latest(number),
        AppEvent::WheelUp => app.wheel(-1),
        AppEvent::WheelDown => app.wheel(1),
        AppEvent::LeftClick(x, y) => {
            if app.engine().picker().is_open() {
                let inside = ui::picker_hit_test(screen, app, x, y);
                app.click_picker(inside);
            } else if let Some((entry, action)) = ui::action_hit_test(screen, app, x, y) {
                app.activate(entry, action);
            }
        }
    }
}
