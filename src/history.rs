/// What the caller should do with its input line after a history move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'a> {
    /// Nothing changed; keep the current input.
    Stay,
    /// Replace the input with this entry.
    Entry(&'a str),
    /// Browsing ended past the newest entry; clear the input.
    Live,
}

/// Session-only command history with shell-style up/down recall.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryNavigator {
    entries: Vec<String>,
    /// `None` while the live input line is authoritative.
    cursor: Option<usize>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<String>) {
        let command = command.into();
        if self.entries.last() != Some(&command) {
            self.entries.push(command);
        }
        self.cursor = None;
    }

    pub fn up(&mut self) -> Recall<'_> {
        if self.entries.is_empty() {
            self.cursor = None;
            return Recall::Stay;
        }
        let next = match self.cursor {
            None => self.entries.len() - 1,
            Some(index) => index.saturating_sub(1),
        };
        self.cursor = Some(next);
        Recall::Entry(&self.entries[next])
    }

    pub fn down(&mut self) -> Recall<'_> {
        let Some(index) = self.cursor else {
            return Recall::Stay;
        };
        let next = index + 1;
        if next >= self.entries.len() {
            self.cursor = None;
            return Recall::Live;
        }
        self.cursor = Some(next);
        Recall::Entry(&self.entries[next])
    }

    pub fn exit_history_on_type(&mut self) {
        self.cursor = None;
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[cfg(test)]
    pub fn is_browsing(&self) -> bool {
        self.cursor.is_some()
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
