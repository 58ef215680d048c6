//! The terminal engine: one scoped object that owns every piece of terminal
//! state and the timers that animate it.
//!
//! The host feeds it input through the `on_*` handlers and clock ticks
//! through [`TerminalEngine::tick`], then reads the log, the greeting and the
//! picker back out for rendering. Effects that leave the terminal (page
//! navigation, opening links) come back as [`HostRequest`] values.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::autocomplete;
use crate::content::Content;
use crate::history::{HistoryNavigator, Recall};
use crate::interpreter::{CommandInterpreter, DeferredNavigation, Outcome};
use crate::picker::SuggestionPicker;
use crate::registry::CandidateRegistry;
use crate::response_log::{ActionEffect, ResponseEntry, ResponseLog};
use crate::scheduler::{Scheduler, TaskId, Timer};
use crate::typewriter::Typewriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowRight,
    Tab,
    Escape,
    Enter,
    /// Ctrl+L.
    ClearScreen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum HostRequest {
    Navigate(String),
    OpenExternal(String),
    OpenMailClient(String),
}

impl HostRequest {
    fn from_effect(effect: &ActionEffect) -> Option<Self> {
        match effect {
            ActionEffect::NavigateTo(page) => Some(HostRequest::Navigate(page.clone())),
            ActionEffect::OpenExternal(url) => Some(HostRequest::OpenExternal(url.clone())),
            ActionEffect::OpenMailClient(address) => {
                Some(HostRequest::OpenMailClient(address.clone()))
            }
            ActionEffect::None => None,
        }
    }
}

/// What a submission did to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution {
    Ignored,
    Cleared,
    Responded { navigation: Option<DeferredNavigation> },
}

#[derive(Debug)]
pub struct TerminalEngine {
    content: Content,
    registry: CandidateRegistry,
    history: HistoryNavigator,
    log: ResponseLog,
    typewriter: Typewriter,
    picker: SuggestionPicker,
    scheduler: Scheduler,
    input: String,
    /// Last instant passed to `new`, `tick` or `reinit`. Deferred navigation
    /// is measured from it, so hosts tick at event time before dispatching.
    now: Instant,
    reveal_task: Option<TaskId>,
    blink_task: Option<TaskId>,
    navigation_task: Option<TaskId>,
    redirecting: Option<String>,
}

impl TerminalEngine {
    pub fn new(content: Content, now: Instant) -> Self {
        let mut engine = Self {
            registry: CandidateRegistry::from_content(&content),
            history: HistoryNavigator::new(),
            log: ResponseLog::new(),
            typewriter: Typewriter::new(content.greeting.clone()),
            picker: SuggestionPicker::new(content.suggestions.clone()),
            scheduler: Scheduler::new(),
            input: String::new(),
            now,
            reveal_task: None,
            blink_task: None,
            navigation_task: None,
            redirecting: None,
            content,
        };
        engine.start_timers(now);
        engine
    }

    /// Skips the greeting animation. Used by headless runs.
    pub fn finish_greeting(&mut self) {
        if let Some(id) = self.reveal_task.take() {
            self.scheduler.cancel(id);
        }
        self.typewriter.reveal_all();
    }

    /// True while the input line is shown and editable.
    pub fn accepting_input(&self) -> bool {
        self.typewriter.is_complete() && !self.picker.is_open() && self.redirecting.is_none()
    }

    /// Replaces the input line with `text`, as a text field's change event
    /// would. Returns `false` when input is not currently accepted.
    pub fn on_input(&mut self, text: impl Into<String>) -> bool {
        if !self.accepting_input() {
            return false;
        }
        self.input = text.into();
        self.history.exit_history_on_type();
        true
    }

    pub fn on_key(&mut self, key: Key) -> Execution {
        if self.picker.is_open() {
            match key {
                Key::Enter => return self.confirm_picker(),
                Key::Escape => self.picker.cancel(),
                _ => {}
            }
            return Execution::Ignored;
        }
        if !self.accepting_input() {
            return Execution::Ignored;
        }

        match key {
            Key::Tab | Key::ArrowRight => {
                let suffix = self.completion();
                if !suffix.is_empty() {
                    let accepted = format!("{}{suffix}", self.input.trim_end());
                    self.input = accepted;
                }
            }
            Key::ArrowUp => {
                if let Recall::Entry(entry) = self.history.up() {
                    self.input = entry.to_string();
                }
            }
            Key::ArrowDown => match self.history.down() {
                Recall::Entry(entry) => self.input = entry.to_string(),
                Recall::Live => self.input.clear(),
                Recall::Stay => {}
            },
            Key::Enter => {
                let line = std::mem::take(&mut self.input);
                return self.execute(&line);
            }
            Key::ClearScreen => {
                self.log.clear();
                return Execution::Cleared;
            }
            Key::Escape => {}
        }
        Execution::Ignored
    }

    /// A wheel event from the host. The first one after the greeting opens
    /// the picker at index 0; later ones move the selection.
    pub fn on_wheel(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        if self.picker.is_open() {
            self.picker.step(delta);
            return;
        }
        if self.redirecting.is_none() {
            self.picker.trigger(self.typewriter.is_complete());
        }
    }

    /// A click while the picker is open: on its surface confirms, anywhere
    /// else cancels.
    pub fn on_click(&mut self, inside_picker: bool) -> Execution {
        if !self.picker.is_open() {
            return Execution::Ignored;
        }
        if inside_picker {
            return self.confirm_picker();
        }
        self.picker.cancel();
        Execution::Ignored
    }

    pub fn execute(&mut self, raw: &str) -> Execution {
        let command = raw.trim();
        if command.is_empty() {
            return Execution::Ignored;
        }
        self.history.push(command);
        let outcome = CommandInterpreter::new(&self.content).interpret(command);
        self.input.clear();

        match outcome {
            Outcome::Ignored => Execution::Ignored,
            Outcome::ClearLog => {
                self.log.clear();
                Execution::Cleared
            }
            Outcome::Respond { entry, navigation } => {
                self.log.push(entry);
                if let Some(navigation) = &navigation {
                    self.schedule_navigation(navigation);
                }
                Execution::Responded { navigation }
            }
        }
    }

    /// Fires every task due at or before `now`, oldest first, and returns the
    /// requests the host has to carry out.
    pub fn tick(&mut self, now: Instant) -> Vec<HostRequest> {
        self.now = self.now.max(now);
        let mut requests = Vec::new();
        loop {
            let fired = self.scheduler.take_due(now);
            if fired.is_empty() {
                break;
            }
            for firing in fired {
                match firing.timer {
                    Timer::RevealGlyph => {
                        self.reveal_task = None;
                        if self.typewriter.reveal_next() {
                            self.reveal_task = Some(self.scheduler.schedule_once(
                                Timer::RevealGlyph,
                                firing.due,
                                self.content.timing.reveal_interval(),
                            ));
                        } else {
                            debug!("greeting revealed");
                        }
                    }
                    Timer::BlinkCaret => self.typewriter.toggle_caret(),
                    Timer::Navigate(page) => {
                        if self.navigation_task == Some(firing.id) {
                            self.navigation_task = None;
                        }
                        info!(page = %page, "navigation fired");
                        requests.push(HostRequest::Navigate(page));
                    }
                }
            }
        }
        requests
    }

    /// Restarts the greeting and empties the log and input line. History is
    /// kept for the lifetime of the engine.
    pub fn reinit(&mut self, now: Instant) {
        let content = self.content.clone();
        self.reinit_with(content, now);
    }

    /// Like [`TerminalEngine::reinit`], switching to new content (a locale
    /// change).
    pub fn reinit_with(&mut self, content: Content, now: Instant) {
        self.now = now;
        if let Some(id) = self.navigation_task.take()
            && self.scheduler.cancel(id)
        {
            info!("pending navigation canceled");
        }
        for id in [self.reveal_task.take(), self.blink_task.take()]
            .into_iter()
            .flatten()
        {
            self.scheduler.cancel(id);
        }

        self.registry = CandidateRegistry::from_content(&content);
        self.picker.set_candidates(content.suggestions.clone());
        self.typewriter.reset(content.greeting.clone());
        self.log.clear();
        self.input.clear();
        self.history.exit_history_on_type();
        self.redirecting = None;
        self.content = content;
        info!(locale = %self.content.locale, "terminal reinitialized");
        self.start_timers(now);
    }

    /// Cancels every timer. The engine stays readable but nothing fires.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.reveal_task = None;
        self.blink_task = None;
        self.navigation_task = None;
        self.picker.cancel();
        debug!("terminal torn down");
    }

    /// Activates the `action`-th button of log entry `entry`. Navigation is
    /// immediate and supersedes any pending deferred navigation.
    pub fn activate(&mut self, entry: usize, action: usize) -> Option<HostRequest> {
        let effect = &self.log.get(entry)?.actions.get(action)?.effect;
        let request = HostRequest::from_effect(effect)?;
        if matches!(request, HostRequest::Navigate(_))
            && let Some(id) = self.navigation_task.take()
        {
            self.scheduler.cancel(id);
        }
        info!(?request, "action activated");
        Some(request)
    }

    /// Ghost-text suffix for the current input; empty while input is not
    /// accepted.
    pub fn completion(&self) -> String {
        if !self.accepting_input() {
            return String::new();
        }
        autocomplete::suggest(self.registry.iter(), &self.input)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn greeting_text(&self) -> &str {
        self.typewriter.revealed_text()
    }

    pub fn greeting_complete(&self) -> bool {
        self.typewriter.is_complete()
    }

    pub fn caret_visible(&self) -> bool {
        self.typewriter.caret_visible()
    }

    pub fn is_redirecting(&self) -> bool {
        self.redirecting.is_some()
    }

    #[cfg(test)]
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirecting.as_deref()
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        self.log.entries()
    }

    pub fn log(&self) -> &ResponseLog {
        &self.log
    }

    #[cfg(test)]
    pub fn history(&self) -> &HistoryNavigator {
        &self.history
    }

    pub fn picker(&self) -> &SuggestionPicker {
        &self.picker
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    fn confirm_picker(&mut self) -> Execution {
        match self.picker.confirm() {
            Some(choice) => {
                debug!(choice = %choice, "picker confirmed");
                self.execute(&choice)
            }
            None => Execution::Ignored,
        }
    }

    fn schedule_navigation(&mut self, navigation: &DeferredNavigation) {
        if let Some(previous) = self.navigation_task.take() {
            self.scheduler.cancel(previous);
        }
        self.navigation_task = Some(self.scheduler.schedule_once(
            Timer::Navigate(navigation.page.clone()),
            self.now,
            navigation.delay,
        ));
        self.redirecting = Some(navigation.page.clone());
        info!(
            page = %navigation.page,
            delay_ms = navigation.delay.as_millis() as u64,
            "navigation scheduled"
        );
    }

    fn start_timers(&mut self, now: Instant) {
        let timing = &self.content.timing;
        self.blink_task = Some(self.scheduler.schedule_every(
            Timer::BlinkCaret,
            now,
            timing.blink_interval(),
        ));
        if !self.typewriter.is_complete() {
            self.reveal_task = Some(self.scheduler.schedule_once(
                Timer::RevealGlyph,
                now,
                timing.reveal_interval(),
            ));
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine_tests.rs"]
mod tests;
