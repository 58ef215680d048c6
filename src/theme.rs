//! Color theme read from `theme.toml`.
//!
//! Every key under `[colors]` is optional and falls back to the built-in
//! palette. A color is either an `{ r, g, b }` table or a string ratatui
//! understands: `"#1e1e1e"`, `"cyan"`, `"darkgray"` or an indexed `"42"`.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse theme: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("`{key}` is not a color: `{value}`")]
    InvalidColor { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub terminal_bg: Color,
    pub overlay_bg: Color,
    pub status_bg: Color,
    pub text_fg: Color,
    pub muted_fg: Color,
    pub prompt_fg: Color,
    pub action_fg: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            terminal_bg: Color::Rgb(12, 14, 12),
            overlay_bg: Color::Rgb(28, 32, 28),
            status_bg: Color::Rgb(20, 22, 20),
            text_fg: Color::Rgb(210, 230, 210),
            muted_fg: Color::Rgb(120, 140, 120),
            prompt_fg: Color::Rgb(80, 220, 120),
            action_fg: Color::Rgb(110, 190, 255),
            highlight_fg: Color::Rgb(255, 255, 255),
        }
    }
}

impl Theme {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// A missing file is silent; an unreadable or invalid one is logged.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(theme) => theme,
            Err(ThemeError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no theme file, using default palette");
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "theme file ignored, using default palette"
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ThemeError> {
        let colors = toml::from_str::<ThemeFile>(s)?.colors;
        let mut theme = Self::default();
        let slots = [
            ("terminal_bg", &mut theme.terminal_bg, colors.terminal_bg),
            ("overlay_bg", &mut theme.overlay_bg, colors.overlay_bg),
            ("status_bg", &mut theme.status_bg, colors.status_bg),
            ("text_fg", &mut theme.text_fg, colors.text_fg),
            ("muted_fg", &mut theme.muted_fg, colors.muted_fg),
            ("prompt_fg", &mut theme.prompt_fg, colors.prompt_fg),
            ("action_fg", &mut theme.action_fg, colors.action_fg),
            ("highlight_fg", &mut theme.highlight_fg, colors.highlight_fg),
        ];
        for (key, slot, value) in slots {
            if let Some(value) = value {
                *slot = value.resolve(key)?;
            }
        }
        Ok(theme)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    #[serde(default)]
    colors: ColorsToml,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ColorsToml {
    terminal_bg: Option<ColorToml>,
    overlay_bg: Option<ColorToml>,
    status_bg: Option<ColorToml>,
    text_fg: Option<ColorToml>,
    muted_fg: Option<ColorToml>,
    prompt_fg: Option<ColorToml>,
    action_fg: Option<ColorToml>,
    highlight_fg: Option<ColorToml>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorToml {
    Rgb { r: u8, g: u8, b: u8 },
    Spec(String),
}

impl ColorToml {
    fn resolve(self, key: &'static str) -> Result<Color, ThemeError> {
        match self {
            ColorToml::Rgb { r, g, b } => Ok(Color::Rgb(r, g, b)),
            ColorToml::Spec(value) => {
                Color::from_str(value.trim()).map_err(|_| ThemeError::InvalidColor { key, value })
            }
        }
    }
}
