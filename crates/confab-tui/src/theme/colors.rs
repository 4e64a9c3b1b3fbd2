//! Color palettes for the widget.

use confab_core::{Rgb, ThemeOverrides};
use ratatui::style::Color;

/// Dark or light palette selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,
    pub button: Color,

    // Semantic
    pub online: Color,
    pub error: Color,

    // Borders
    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark palette (default).
    pub fn dark() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(17, 24, 39),     // #111827
            surface: Color::Rgb(31, 41, 55),  // #1f2937

            // Foregrounds
            text: Color::Rgb(229, 231, 235),    // #e5e7eb
            subtext: Color::Rgb(156, 163, 175), // #9ca3af
            muted: Color::Rgb(107, 114, 128),   // #6b7280

            // Accents
            primary: Color::Rgb(129, 140, 248),   // #818cf8 (indigo)
            secondary: Color::Rgb(244, 114, 182), // #f472b6 (pink)
            button: Color::Rgb(99, 102, 241),     // #6366f1 (indigo)

            // Semantic
            online: Color::Rgb(52, 211, 153), // #34d399 (emerald)
            error: Color::Rgb(248, 113, 113), // #f87171 (red)

            // Borders
            border: Color::Rgb(55, 65, 81),           // #374151
            border_focused: Color::Rgb(129, 140, 248), // #818cf8 (indigo)
        }
    }

    /// Light palette.
    pub fn light() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(249, 250, 251),   // #f9fafb
            surface: Color::Rgb(255, 255, 255), // #ffffff

            // Foregrounds
            text: Color::Rgb(55, 65, 81),       // #374151
            subtext: Color::Rgb(107, 114, 128), // #6b7280
            muted: Color::Rgb(156, 163, 175),   // #9ca3af

            // Accents
            primary: Color::Rgb(99, 102, 241),   // #6366f1 (indigo)
            secondary: Color::Rgb(236, 72, 153), // #ec4899 (pink)
            button: Color::Rgb(99, 102, 241),    // #6366f1 (indigo)

            // Semantic
            online: Color::Rgb(16, 185, 129), // #10b981 (emerald)
            error: Color::Rgb(239, 68, 68),   // #ef4444 (red)

            // Borders
            border: Color::Rgb(229, 231, 235),        // #e5e7eb
            border_focused: Color::Rgb(99, 102, 241), // #6366f1 (indigo)
        }
    }

    /// Palette for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Apply accent overrides from the widget configuration.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        if let Some(color) = overrides.primary {
            self.primary = to_color(color);
            self.border_focused = to_color(color);
        }
        if let Some(color) = overrides.secondary {
            self.secondary = to_color(color);
        }
        if let Some(color) = overrides.button {
            self.button = to_color(color);
        }
        self
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
