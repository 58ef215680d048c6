use tracing::debug;

/// Wheel-driven chooser over the curated suggestion list.
///
/// `Closed -> Open(0) -> {Open(k) | Closed}`. The selected index is always
/// kept modulo the candidate count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPicker {
    candidates: Vec<String>,
    open: bool,
    selected: usize,
    triggered: bool,
}

impl SuggestionPicker {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    /// Replaces the candidates and closes the picker.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.close();
    }

    /// Handles the host's "user scrolled" signal. Opens at index 0 the first
    /// time it is called after a close, and only once the greeting is done.
    pub fn trigger(&mut self, greeting_complete: bool) -> bool {
        if self.triggered || !greeting_complete || self.open {
            return false;
        }
        self.triggered = self.open();
        self.triggered
    }

    pub fn open(&mut self) -> bool {
        if self.candidates.is_empty() {
            return false;
        }
        self.open = true;
        self.selected = 0;
        debug!(candidates = self.candidates.len(), "picker opened");
        true
    }

    /// Moves the selection by one step in the direction of `delta`.
    pub fn step(&mut self, delta: i32) {
        if delta > 0 {
            self.advance();
        } else if delta < 0 {
            self.retreat();
        }
    }

    pub fn advance(&mut self) {
        self.shift(1);
    }

    pub fn retreat(&mut self) {
        self.shift(-1);
    }

    /// Closes the picker and yields the selected candidate.
    pub fn confirm(&mut self) -> Option<String> {
        if !self.open {
            return None;
        }
        let choice = self.candidates.get(self.selected).cloned();
        self.close();
        choice
    }

    pub fn cancel(&mut self) {
        if self.open {
            debug!("picker canceled");
        }
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.candidates.get(self.selected).map(String::as_str)
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn shift(&mut self, delta: i64) {
        if !self.open || self.candidates.is_empty() {
            return;
        }
        let count = self.candidates.len() as i64;
        self.selected = (self.selected as i64 + delta).rem_euclid(count) as usize;
    }

    fn close(&mut self) {
        self.open = false;
        self.selected = 0;
        self.triggered = false;
    }
}
