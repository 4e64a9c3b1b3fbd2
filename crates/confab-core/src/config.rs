//! Widget construction-time configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Errors raised while validating configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Position string was not one of the supported corners.
    #[error("unknown position '{0}' (expected bottom-right or bottom-left)")]
    UnknownPosition(String),
    /// Color string was not `#rrggbb`.
    #[error("invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

/// Corner the launcher and popup anchor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    /// The configuration string for this position.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-right" => Ok(Self::BottomRight),
            "bottom-left" => Ok(Self::BottomLeft),
            other => Err(ConfigError::UnknownPosition(other.to_string())),
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = ConfigError;

    /// Parse a `#rrggbb` hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
        Ok(Self(r, g, b))
    }
}

/// Accent overrides applied on top of the built-in palettes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    /// Header title and user accent.
    pub primary: Option<Rgb>,
    /// Subtitle and secondary text accent.
    pub secondary: Option<Rgb>,
    /// Launcher button color.
    pub button: Option<Rgb>,
}

/// Construction-time configuration for the widget shell.
///
/// Every field has a default; hosts set only what they care about.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Header title; also the bot's display name.
    pub title: String,
    /// Header subtitle.
    pub subtitle: String,
    /// Display name attached to user messages.
    pub user_name: String,
    /// Corner the floating widget anchors to.
    pub position: Position,
    /// Accent color overrides.
    pub theme: ThemeOverrides,
    /// Embedded mode: always open, no launcher or close affordance.
    pub embedded: bool,
    /// Glyph drawn on the launcher button.
    pub launcher_icon: String,
    /// Messages the log is seeded with.
    pub initial_messages: Vec<Message>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "AI Assistant".to_string(),
            subtitle: "Always here to help".to_string(),
            user_name: "User".to_string(),
            position: Position::default(),
            theme: ThemeOverrides::default(),
            embedded: false,
            launcher_icon: "💬".to_string(),
            initial_messages: Vec::new(),
        }
    }
}

impl WidgetConfig {
    /// Set the header title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the header subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the user display name.
    #[must_use]
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// Set the anchor corner.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Set accent overrides.
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeOverrides) -> Self {
        self.theme = theme;
        self
    }

    /// Switch to embedded mode (always open, no chrome).
    #[must_use]
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Seed the log with initial messages.
    #[must_use]
    pub fn with_initial_messages(mut self, messages: Vec<Message>) -> Self {
        self.initial_messages = messages;
        self
    }
}
