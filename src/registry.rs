use crate::content::Content;

pub const BUILTIN_COMMANDS: [&str; 4] = ["ls", "clear", "cls", "help"];

/// Ordered, duplicate-free list of strings the engine can complete against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRegistry {
    entries: Vec<String>,
}

impl CandidateRegistry {
    pub fn from_content(content: &Content) -> Self {
        let mut registry = Self::default();
        for command in BUILTIN_COMMANDS {
            registry.push(command);
        }
        for page in content.page_names() {
            registry.push(format!("cd {page}"));
        }
        for suggestion in &content.suggestions {
            registry.push(suggestion.as_str());
        }
        for entry in &content.responses {
            registry.push(entry.question.as_str());
        }
        registry
    }

    /// Appends `candidate` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, candidate: impl Into<String>) -> bool {
        let candidate = candidate.into();
        if self.contains(&candidate) {
            return false;
        }
        self.entries.push(candidate);
        true
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.entries.iter().any(|entry| entry == candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
