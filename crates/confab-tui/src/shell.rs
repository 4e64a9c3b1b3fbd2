//! The embeddable shell: hosting modes, geometry, and the chat window.
//!
//! The shell hosts the chat window three ways:
//! - full page: the window fills the terminal
//! - floating: a corner launcher toggles a popup anchored to the same
//!   corner; closing preserves the log
//! - embedded: the window alone, pinned open, no launcher or close
//!   affordance

use confab_core::{Message, Position, QuickAction};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::theme::{Theme, ThemeMode};
use crate::widgets::{Header, InputBar, MessageList, MessageListState, QuickActionsBar, TextInputState};

/// How the widget is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellMode {
    /// The window fills the terminal (the demo's main chat).
    FullPage,
    /// Corner launcher plus a positioned popup.
    Floating,
    /// The window alone, permanently open, no chrome.
    Embedded,
}

/// Whether the floating widget is showing its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetVisibility {
    #[default]
    Closed,
    Open,
}

impl WidgetVisibility {
    /// The other state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Popup width in columns (roughly the original's 380px window).
pub const POPUP_WIDTH: u16 = 46;
/// Popup height in rows.
pub const POPUP_HEIGHT: u16 = 22;
/// Gap between the popup and the terminal edge.
pub const MARGIN: u16 = 1;
/// Launcher button width.
pub const LAUNCHER_WIDTH: u16 = 7;
/// Launcher button height.
pub const LAUNCHER_HEIGHT: u16 = 3;

/// Popup rectangle anchored to the configured corner, clamped to fit.
pub fn popup_rect(area: Rect, position: Position) -> Rect {
    let width = POPUP_WIDTH.min(area.width.saturating_sub(2 * MARGIN));
    let height = POPUP_HEIGHT.min(area.height.saturating_sub(2 * MARGIN));
    let x = match position {
        Position::BottomRight => area.right().saturating_sub(MARGIN + width),
        Position::BottomLeft => area.x + MARGIN,
    };
    let y = area.bottom().saturating_sub(MARGIN + height);
    Rect::new(x.max(area.x), y.max(area.y), width, height)
}

/// Launcher rectangle in the configured corner.
pub fn launcher_rect(area: Rect, position: Position) -> Rect {
    let width = LAUNCHER_WIDTH.min(area.width.saturating_sub(2 * MARGIN));
    let height = LAUNCHER_HEIGHT.min(area.height.saturating_sub(2 * MARGIN));
    let x = match position {
        Position::BottomRight => area.right().saturating_sub(MARGIN + width),
        Position::BottomLeft => area.x + MARGIN,
    };
    let y = area.bottom().saturating_sub(MARGIN + height);
    Rect::new(x.max(area.x), y.max(area.y), width, height)
}

/// The floating launcher button.
pub struct Launcher<'a> {
    icon: &'a str,
    theme: &'a Theme,
}

impl<'a> Launcher<'a> {
    /// Create a launcher showing the configured icon.
    pub fn new(icon: &'a str, theme: &'a Theme) -> Self {
        Self { icon, theme }
    }
}

impl Widget for Launcher<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.button));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(Span::styled(
            self.icon.to_string(),
            Style::default()
                .fg(self.theme.button)
                .add_modifier(Modifier::BOLD),
        )))
        .centered()
        .render(inner, buf);
    }
}

/// Header height inside the window (title + subtitle lines).
const HEADER_HEIGHT: u16 = 2;
/// Quick-action chip row height.
const ACTIONS_HEIGHT: u16 = 1;
/// Input bar height (bordered single line).
const INPUT_HEIGHT: u16 = 3;

/// The composed chat window: header, message list, quick actions, input.
///
/// ```text
/// ┌────────────────────────────────────────┐
/// │ AI Assistant                     ☾ ^T  │
/// │ Always here to help · ● online         │
/// │ ● AI Assistant · 12:04                 │
/// │   Hi! I'm AI Assistant, your AI...     │
/// │                                        │
/// │  New Topic   Help                      │
/// │ ┌────────────────────────────────────┐ │
/// │ │ > Type your message...             │ │
/// │ └────────────────────────────────────┘ │
/// └────────────────────────────────────────┘
/// ```
pub struct ChatWindow<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub messages: &'a [Message],
    pub pending: bool,
    pub actions: &'static [QuickAction],
    pub selected_action: Option<usize>,
    pub input: &'a TextInputState,
    pub theme: &'a Theme,
    pub theme_mode: ThemeMode,
    pub show_close: bool,
    pub tick: usize,
}

impl StatefulWidget for ChatWindow<'_> {
    type State = MessageListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < HEADER_HEIGHT + ACTIONS_HEIGHT + INPUT_HEIGHT + 1 {
            // Not enough space for the full stack; keep the input usable.
            InputBar::new(self.input, self.theme)
                .focused(true)
                .render(inner, buf);
            return;
        }

        let messages_height = inner
            .height
            .saturating_sub(HEADER_HEIGHT + ACTIONS_HEIGHT + INPUT_HEIGHT);

        let header_area = Rect::new(inner.x, inner.y, inner.width, HEADER_HEIGHT);
        let messages_area = Rect::new(
            inner.x,
            inner.y + HEADER_HEIGHT,
            inner.width,
            messages_height,
        );
        let actions_area = Rect::new(
            inner.x,
            messages_area.bottom(),
            inner.width,
            ACTIONS_HEIGHT,
        );
        let input_area = Rect::new(inner.x, actions_area.bottom(), inner.width, INPUT_HEIGHT);

        Header::new(self.title, self.subtitle, self.theme, self.theme_mode)
            .show_close(self.show_close)
            .render(header_area, buf);

        let list = MessageList::new(self.messages, self.theme)
            .pending(self.pending, self.title)
            .tick(self.tick);
        StatefulWidget::render(list, messages_area, buf, state);

        QuickActionsBar::new(self.actions, self.theme)
            .selected(self.selected_action)
            .render(actions_area, buf);

        InputBar::new(self.input, self.theme)
            .focused(true)
            .render(input_area, buf);
    }
}
