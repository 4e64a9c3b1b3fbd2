//! Chat window header.
//!
//! Title and subtitle on the left, theme-toggle and close hints on the
//! right. The close hint only appears for the floating widget; embedded
//! and full-page windows have no close affordance.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{Theme, ThemeMode};

/// Chat window header widget.
pub struct Header<'a> {
    title: &'a str,
    subtitle: &'a str,
    theme: &'a Theme,
    mode: ThemeMode,
    show_close: bool,
}

impl<'a> Header<'a> {
    /// Create a header.
    pub fn new(title: &'a str, subtitle: &'a str, theme: &'a Theme, mode: ThemeMode) -> Self {
        Self {
            title,
            subtitle,
            theme,
            mode,
            show_close: false,
        }
    }

    /// Show the close hint (floating widget only).
    #[must_use]
    pub fn show_close(mut self, show: bool) -> Self {
        self.show_close = show;
        self
    }

    /// Title line with right-aligned key hints.
    fn title_line(&self, width: usize) -> Line<'static> {
        let mode_glyph = match self.mode {
            ThemeMode::Dark => "\u{263e}", // ☾
            ThemeMode::Light => "\u{2600}", // ☀
        };
        let mut hints = format!("{mode_glyph} ^T");
        if self.show_close {
            hints.push_str("  \u{2715} Esc"); // ✕
        }

        let left_width = self.title.width();
        let padding = width
            .saturating_sub(left_width)
            .saturating_sub(hints.width());

        Line::from(vec![
            Span::styled(
                self.title.to_string(),
                Style::default()
                    .fg(self.theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(padding)),
            Span::styled(hints, Style::default().fg(self.theme.muted)),
        ])
    }

    /// Subtitle line with the presence dot.
    fn subtitle_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                self.subtitle.to_string(),
                Style::default().fg(self.theme.subtext),
            ),
            Span::styled(" \u{b7} ", Style::default().fg(self.theme.muted)),
            Span::styled("\u{25cf} online", Style::default().fg(self.theme.online)),
        ])
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let lines = vec![self.title_line(area.width as usize), self.subtitle_line()];
        Paragraph::new(lines)
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
