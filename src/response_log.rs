use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    FileText,
    Mail,
    Linkedin,
    Github,
}

/// What activating an action asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ActionEffect {
    NavigateTo(String),
    OpenExternal(String),
    OpenMailClient(String),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub label: String,
    pub icon: Option<Icon>,
    pub effect: ActionEffect,
}

/// One question/answer pair shown in the terminal. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEntry {
    pub question: String,
    pub answer: String,
    pub actions: Vec<ActionDescriptor>,
    pub loading: bool,
}

impl ResponseEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            actions: Vec::new(),
            loading: false,
        }
    }

    pub fn with_actions(mut self, actions: Vec<ActionDescriptor>) -> Self {
        self.actions = actions;
        self
    }

    pub fn loading(mut self) -> Self {
        self.loading = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLog {
    entries: Vec<ResponseEntry>,
}

impl ResponseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ResponseEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ResponseEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&ResponseEntry> {
        self.entries.last()
    }

    /// Most recent entry that carries at least one action.
    pub fn last_with_actions(&self) -> Option<(usize, &ResponseEntry)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, entry)| !entry.actions.is_empty())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
