//! Scrollable message list widget.
//!
//! Renders the log newest-at-bottom with wrapped content, an attribution
//! line per message, and an animated composing indicator while a
//! response is in flight. Follow mode keeps the view pinned to the
//! newest message until the user scrolls away; scrolling back to the
//! bottom re-engages it.

use chrono::{DateTime, Local};
use confab_core::Message;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::theme::Theme;

/// Lines scrolled per step.
pub const SCROLL_STEP: usize = 2;

/// Scroll and follow state for the message list.
#[derive(Debug, Clone)]
pub struct MessageListState {
    /// Index of the first visible line.
    scroll_offset: usize,
    /// Whether to pin the view to the newest message.
    follow: bool,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            follow: true,
        }
    }
}

impl MessageListState {
    /// Create a new state in follow mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if follow mode is engaged.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Scroll toward older messages. Disengages follow mode.
    pub fn scroll_up(&mut self) {
        self.follow = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
    }

    /// Scroll toward newer messages.
    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(SCROLL_STEP);
    }

    /// Jump to the newest message and re-engage follow mode.
    pub fn jump_to_end(&mut self) {
        self.follow = true;
    }
}

/// The message list widget.
pub struct MessageList<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
    /// Whether a response is awaited (shows the composing indicator).
    pending: bool,
    /// Bot display name for the composing indicator.
    bot_name: &'a str,
    /// Tick counter driving the composing animation.
    tick: usize,
}

impl<'a> MessageList<'a> {
    /// Create a message list over a log snapshot.
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self {
            messages,
            theme,
            pending: false,
            bot_name: "",
            tick: 0,
        }
    }

    /// Show the composing indicator attributed to `bot_name`.
    #[must_use]
    pub fn pending(mut self, pending: bool, bot_name: &'a str) -> Self {
        self.pending = pending;
        self.bot_name = bot_name;
        self
    }

    /// Set the animation tick.
    #[must_use]
    pub fn tick(mut self, tick: usize) -> Self {
        self.tick = tick;
        self
    }

    /// Attribution line: speaker symbol, name, HH:MM timestamp.
    fn attribution_line(&self, message: &Message) -> Line<'static> {
        let (symbol, accent) = if message.is_user() {
            ("\u{203a}", self.theme.secondary) // ›
        } else {
            ("\u{25cf}", self.theme.primary) // ●
        };
        let local: DateTime<Local> = message.timestamp.into();

        Line::from(vec![
            Span::styled(format!("{symbol} "), Style::default().fg(accent)),
            Span::styled(
                message.sender.name.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" \u{b7} {}", local.format("%H:%M")),
                Style::default().fg(self.theme.muted),
            ),
        ])
    }

    /// Build every display line for the log at the given width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let wrap_width = width.saturating_sub(2).max(1);
        let mut lines = Vec::new();

        for message in self.messages {
            lines.push(self.attribution_line(message));
            for wrapped in textwrap::wrap(&message.content, wrap_width) {
                lines.push(Line::from(Span::styled(
                    format!("  {wrapped}"),
                    Style::default().fg(self.theme.text),
                )));
            }
            lines.push(Line::default());
        }

        if self.pending {
            let dots = "\u{25cf} ".repeat(self.tick % 3 + 1);
            lines.push(Line::from(vec![
                Span::styled(
                    format!("\u{25cf} {}", self.bot_name),
                    Style::default().fg(self.theme.primary),
                ),
                Span::styled(
                    " is typing ".to_string(),
                    Style::default().fg(self.theme.muted),
                ),
                Span::styled(dots, Style::default().fg(self.theme.muted)),
            ]));
        }

        lines
    }
}

impl StatefulWidget for MessageList<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.build_lines(area.width as usize);
        let height = area.height as usize;
        let max_offset = lines.len().saturating_sub(height);

        if state.follow {
            state.scroll_offset = max_offset;
        } else {
            state.scroll_offset = state.scroll_offset.min(max_offset);
            if state.scroll_offset == max_offset {
                // Scrolled back to the bottom: pin to new messages again.
                state.follow = true;
            }
        }

        let visible: Vec<Line<'static>> = lines
            .into_iter()
            .skip(state.scroll_offset)
            .take(height)
            .collect();

        Paragraph::new(visible).render(area, buf);
    }
}
