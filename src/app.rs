use std::io;
use std::process::{Command, Stdio};
use std::time::Instant;

use tracing::{info, warn};

use crate::content::{Content, ContentCatalog, Locale, PageContent};
use crate::engine::{Execution, HostRequest, Key, TerminalEngine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Terminal,
    /// A page reached through navigation. Holds the page name.
    Page(String),
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub ticks: u64,
    engine: TerminalEngine,
    catalog: ContentCatalog,
    locale: Locale,
    screen: Screen,
    status: Option<String>,
    open_links: bool,
}

impl App {
    pub fn new(catalog: ContentCatalog, locale: Locale, now: Instant) -> Self {
        let engine = TerminalEngine::new(catalog.get(locale).clone(), now);
        Self {
            running: true,
            ticks: 0,
            engine,
            catalog,
            locale,
            screen: Screen::Terminal,
            status: None,
            open_links: false,
        }
    }

    /// Hands external links to the system opener instead of only reporting
    /// them in the status line.
    pub fn with_open_links(mut self, open_links: bool) -> Self {
        self.open_links = open_links;
        self
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.ticks = self.ticks.saturating_add(1);
        for request in self.engine.tick(now) {
            self.handle_request(request);
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn input_char(&mut self, ch: char) {
        if self.screen != Screen::Terminal {
            return;
        }
        let mut next = self.engine.input().to_string();
        next.push(ch);
        self.engine.on_input(next);
    }

    pub fn backspace(&mut self) {
        if self.screen != Screen::Terminal || self.engine.input().is_empty() {
            return;
        }
        let mut next = self.engine.input().to_string();
        next.pop();
        self.engine.on_input(next);
    }

    pub fn key(&mut self, key: Key) -> Execution {
        if self.screen != Screen::Terminal {
            return Execution::Ignored;
        }
        let execution = self.engine.on_key(key);
        if execution != Execution::Ignored {
            self.status = None;
        }
        execution
    }

    /// Esc: closes an open page, otherwise goes to the terminal.
    pub fn escape(&mut self, now: Instant) {
        match self.screen {
            Screen::Page(_) => self.back_to_terminal(now),
            Screen::Terminal => {
                self.engine.on_key(Key::Escape);
            }
        }
    }

    pub fn wheel(&mut self, delta: i32) {
        if self.screen == Screen::Terminal {
            self.engine.on_wheel(delta);
        }
    }

    pub fn click_picker(&mut self, inside: bool) {
        if self.screen == Screen::Terminal {
            self.engine.on_click(inside);
        }
    }

    pub fn activate(&mut self, entry: usize, action: usize) {
        if self.screen != Screen::Terminal {
            return;
        }
        if let Some(request) = self.engine.activate(entry, action) {
            self.handle_request(request);
        }
    }

    /// Activates the `number`-th (1-based) action of the most recent entry
    /// that has actions.
    pub fn activate_latest(&mut self, number: u8) {
        let Some(action) = usize::from(number).checked_sub(1) else {
            return;
        };
        if let Some((entry, _)) = self.engine.log().last_with_actions() {
            self.activate(entry, action);
        }
    }

    pub fn toggle_locale(&mut self, now: Instant) {
        self.locale = self.locale.toggle();
        let content = self.catalog.get(self.locale).clone();
        self.engine.reinit_with(content, now);
        self.screen = Screen::Terminal;
        self.status = None;
        info!(locale = self.locale.code(), "locale switched");
    }

    pub fn back_to_terminal(&mut self, now: Instant) {
        self.screen = Screen::Terminal;
        self.status = None;
        self.engine.reinit(now);
    }

    pub fn handle_request(&mut self, request: HostRequest) {
        match request {
            HostRequest::Navigate(page) => {
                info!(page = %page, "showing page");
                self.engine.teardown();
                self.screen = Screen::Page(page);
            }
            HostRequest::OpenExternal(url) => self.open_target(url),
            HostRequest::OpenMailClient(address) => self.open_target(format!("mailto:{address}")),
        }
    }

    pub fn engine(&self) -> &TerminalEngine {
        &self.engine
    }

    pub fn content(&self) -> &Content {
        self.engine.content()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn current_page(&self) -> Option<&PageContent> {
        match &self.screen {
            Screen::Page(name) => self.content().page(name),
            Screen::Terminal => None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn open_target(&mut self, target: String) {
        info!(target = %target, "opening link");
        if self.open_links
            && let Err(err) = launch_opener(&target)
        {
            warn!(target = %target, error = %err, "system opener failed");
            self.status = Some(format!("Could not open {target}: {err}"));
            return;
        }
        self.status = Some(format!("Open {target}"));
    }
}

fn launch_opener(target: &str) -> io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    command
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(test)]
#[path = "../tests/unit/app_tests.rs"]
mod tests;
