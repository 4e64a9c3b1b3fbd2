//! Quick-action suggestion chips.
//!
//! One row of chips below the message list. Tab cycles the highlight;
//! Enter with an empty input sends the highlighted suggestion through
//! the normal send path.

use confab_core::QuickAction;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Suggestion chip row widget.
pub struct QuickActionsBar<'a> {
    actions: &'static [QuickAction],
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> QuickActionsBar<'a> {
    /// Create a chip row for the given suggestion set.
    pub fn new(actions: &'static [QuickAction], theme: &'a Theme) -> Self {
        Self {
            actions,
            selected: None,
            theme,
        }
    }

    /// Highlight the chip at `index`.
    #[must_use]
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }
}

impl Widget for QuickActionsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let mut spans = Vec::with_capacity(self.actions.len() * 2 + 1);
        spans.push(Span::raw(" "));
        for (i, action) in self.actions.iter().enumerate() {
            let style = if self.selected == Some(i) {
                Style::default()
                    .fg(self.theme.base)
                    .bg(self.theme.button)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.subtext).bg(self.theme.surface)
            };
            spans.push(Span::styled(format!(" {} ", action.label), style));
            spans.push(Span::raw(" "));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::{DEFAULT_ACTIONS, FOLLOW_UP_ACTIONS};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_bar(actions: &'static [QuickAction], selected: Option<usize>) -> String {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|frame| {
                let bar = QuickActionsBar::new(actions, &theme).selected(selected);
                frame.render_widget(bar, frame.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_default_set_renders_both_labels() {
        let text = render_bar(&DEFAULT_ACTIONS, None);
        assert!(text.contains("New Topic"));
        assert!(text.contains("Help"));
    }

    #[test]
    fn test_follow_up_set_renders_all_four() {
        let text = render_bar(&FOLLOW_UP_ACTIONS, Some(1));
        for action in &FOLLOW_UP_ACTIONS {
            assert!(text.contains(action.label), "missing {}", action.label);
        }
    }
}
