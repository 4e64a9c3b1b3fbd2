//! Input bar widget.
//!
//! Always visible at the bottom of the chat window. Enter sends.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Placeholder shown while the input is empty.
const PLACEHOLDER: &str = "Type your message...";

/// Input bar for composing a message.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
    focused: bool,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self {
            input,
            theme,
            focused: false,
        }
    }

    /// Set whether the input bar is focused (shows the cursor).
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Build the visible slice of content with a cursor marker.
    ///
    /// Long input scrolls horizontally so the cursor stays in view.
    fn build_line(&self, inner_width: usize) -> Line<'static> {
        let prompt = "> ";

        if self.input.is_empty() {
            let mut spans = vec![Span::styled(
                prompt.to_string(),
                Style::default().fg(self.theme.primary),
            )];
            if self.focused {
                spans.push(Span::styled("█", Style::default().fg(self.theme.text)));
                spans.push(Span::styled(
                    format!(" {PLACEHOLDER}"),
                    Style::default().fg(self.theme.muted),
                ));
            } else {
                spans.push(Span::styled(
                    PLACEHOLDER.to_string(),
                    Style::default().fg(self.theme.muted),
                ));
            }
            return Line::from(spans);
        }

        let chars: Vec<char> = self.input.content().chars().collect();
        let cursor = self.input.cursor();
        let budget = inner_width.saturating_sub(prompt.len() + 1);

        // Walk back from the cursor until the window is full.
        let mut start = cursor.min(chars.len());
        let mut used = 0;
        while start > 0 {
            let w = chars[start - 1].width().unwrap_or(1);
            if used + w > budget {
                break;
            }
            used += w;
            start -= 1;
        }

        // Extend forward past the cursor with whatever width remains.
        let mut end = cursor.min(chars.len());
        while end < chars.len() {
            let w = chars[end].width().unwrap_or(1);
            if used + w > budget {
                break;
            }
            used += w;
            end += 1;
        }

        let before: String = chars[start..cursor.min(chars.len())].iter().collect();
        let after: String = chars[cursor.min(chars.len())..end].iter().collect();

        let mut spans = vec![
            Span::styled(prompt.to_string(), Style::default().fg(self.theme.primary)),
            Span::styled(before, Style::default().fg(self.theme.text)),
        ];
        if self.focused {
            spans.push(Span::styled("█", Style::default().fg(self.theme.text)));
        }
        spans.push(Span::styled(after, Style::default().fg(self.theme.text)));
        Line::from(spans)
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(self.theme.border_focused)
        } else {
            Style::default().fg(self.theme.border)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner_width = area.width.saturating_sub(2) as usize;
        let line = self.build_line(inner_width);

        Paragraph::new(line)
            .block(block)
            .style(Style::default().fg(self.theme.text).bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let input = TextInputState::new();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();

        terminal
            .draw(|frame| {
                let bar = InputBar::new(&input, &theme);
                frame.render_widget(bar, frame.area());
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("Type your message..."));
    }

    #[test]
    fn test_content_replaces_placeholder() {
        let mut input = TextInputState::new();
        for ch in "hello".chars() {
            input.insert(ch);
        }
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();

        terminal
            .draw(|frame| {
                let bar = InputBar::new(&input, &theme).focused(true);
                frame.render_widget(bar, frame.area());
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("hello"));
        assert!(!text.contains("Type your message..."));
    }

    #[test]
    fn test_long_input_keeps_cursor_visible() {
        let mut input = TextInputState::new();
        for ch in "a".repeat(100).chars() {
            input.insert(ch);
        }
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();

        // Must not panic and must show the cursor block at the tail.
        terminal
            .draw(|frame| {
                let bar = InputBar::new(&input, &theme).focused(true);
                frame.render_widget(bar, frame.area());
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains('█'));
    }
}
