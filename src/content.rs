//! Localized content consumed by the terminal engine.
//!
//! Everything the engine says or offers (greeting, suggestions, the question
//! table, known pages, outbound links, timings) lives here as data so a locale
//! switch never touches engine logic.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED_EN: &str = include_str!("../content/en.toml");
const EMBEDDED_FA: &str = include_str!("../content/fa.toml");

pub const DEFAULT_REVEAL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_BLINK_INTERVAL_MS: u64 = 530;
pub const DEFAULT_NAVIGATION_DELAY_MS: u64 = 2000;
/// Upper bound for every timing value.
pub const MAX_TIMING_MS: u64 = 60_000;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse content: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
    #[error("invalid content: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Locale {
    En,
    Fa,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Locale::En => Locale::Fa,
            Locale::Fa => Locale::En,
        }
    }

    pub fn from_code(code: &str) -> Result<Self, ContentError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fa" => Ok(Locale::Fa),
            other => Err(ContentError::UnknownLocale(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub reveal_interval_ms: u64,
    pub blink_interval_ms: u64,
    pub navigation_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reveal_interval_ms: DEFAULT_REVEAL_INTERVAL_MS,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL_MS,
            navigation_delay_ms: DEFAULT_NAVIGATION_DELAY_MS,
        }
    }
}

impl Timing {
    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }
}

/// User-facing strings that are not part of the question table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Messages {
    pub input_placeholder: String,
    pub tip: String,
    pub default_response: String,
    pub usage_cd: String,
    /// `{target}` is replaced with the requested page name.
    pub no_such_page: String,
    /// `{pages}` is replaced with a comma separated page list.
    pub help: String,
    /// `{pages}` is replaced with a double-space separated page list.
    pub ls: String,
    /// `{page}` is replaced with the page name.
    pub open_page: String,
    pub picker_title: String,
    pub picker_hint: String,
    pub page_back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageContent {
    pub name: String,
    pub opening: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Links {
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconName {
    File,
    Mail,
    Linkedin,
    Github,
}

/// An action button attached to a question. Labels without an explicit
/// `navigate`/`open`/`mail` effect are resolved from the label text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActionSpec {
    pub label: String,
    #[serde(default)]
    pub navigate: Option<String>,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
    #[serde(default)]
    pub icon: Option<IconName>,
}

impl ActionSpec {
    #[cfg(test)]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            navigate: None,
            open: None,
            mail: None,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QaEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Content {
    pub locale: String,
    pub greeting: String,
    #[serde(default)]
    pub timing: Timing,
    pub messages: Messages,
    pub links: Links,
    pub pages: Vec<PageContent>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub responses: Vec<QaEntry>,
}

impl Content {
    pub fn embedded(locale: Locale) -> Result<Self, ContentError> {
        let text = match locale {
            Locale::En => EMBEDDED_EN,
            Locale::Fa => EMBEDDED_FA,
        };
        Self::from_toml_str(text)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ContentError> {
        let content: Content = toml::from_str(s)?;
        content.validate()?;
        Ok(content)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.pages.is_empty() {
            return Err(ContentError::Invalid("at least one page is required".into()));
        }
        let mut seen_pages = HashSet::new();
        for page in &self.pages {
            let name = page.name.trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(ContentError::Invalid(format!(
                    "page name `{}` must be a single non-empty word",
                    page.name
                )));
            }
            if !seen_pages.insert(name.to_lowercase()) {
                return Err(ContentError::Invalid(format!("duplicate page `{name}`")));
            }
        }

        let mut seen_questions = HashSet::new();
        for entry in &self.responses {
            if !seen_questions.insert(entry.question.as_str()) {
                return Err(ContentError::Invalid(format!(
                    "duplicate question `{}`",
                    entry.question
                )));
            }
            for action in &entry.actions {
                if let Some(target) = action.navigate.as_deref()
                    && self.page(target).is_none()
                {
                    return Err(ContentError::Invalid(format!(
                        "action `{}` navigates to unknown page `{target}`",
                        action.label
                    )));
                }
            }
        }

        let timing = &self.timing;
        if timing.reveal_interval_ms == 0 || timing.blink_interval_ms == 0 {
            return Err(ContentError::Invalid(
                "reveal and blink intervals must be greater than zero".into(),
            ));
        }
        for (name, value) in [
            ("reveal_interval_ms", timing.reveal_interval_ms),
            ("blink_interval_ms", timing.blink_interval_ms),
            ("navigation_delay_ms", timing.navigation_delay_ms),
        ] {
            if value > MAX_TIMING_MS {
                return Err(ContentError::Invalid(format!(
                    "{name} must be at most {MAX_TIMING_MS}, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Case-insensitive page lookup.
    pub fn page(&self, name: &str) -> Option<&PageContent> {
        let wanted = name.trim().to_lowercase();
        self.pages
            .iter()
            .find(|page| page.name.to_lowercase() == wanted)
    }

    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.name.as_str())
    }

    pub fn response(&self, question: &str) -> Option<&QaEntry> {
        self.responses.iter().find(|entry| entry.question == question)
    }
}

/// Content for every supported locale, so a language switch is a lookup.
#[derive(Debug, Clone)]
pub struct ContentCatalog {
    en: Content,
    fa: Content,
}

impl ContentCatalog {
    pub fn embedded() -> Result<Self, ContentError> {
        Ok(Self {
            en: Content::embedded(Locale::En)?,
            fa: Content::embedded(Locale::Fa)?,
        })
    }

    /// Replaces the entry for the locale `content` declares.
    pub fn with_override(mut self, content: Content) -> Result<Self, ContentError> {
        match Locale::from_code(&content.locale)? {
            Locale::En => self.en = content,
            Locale::Fa => self.fa = content,
        }
        Ok(self)
    }

    pub fn get(&self, locale: Locale) -> &Content {
        match locale {
            Locale::En => &self.en,
            Locale::Fa => &self.fa,
        }
    }
}
