//! Application state and update logic for the widget.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use confab_core::{
    quick_actions, ChatLog, HostEvent, Message, ProviderError, QuickAction, ResponseProvider,
    WidgetConfig,
};

use crate::event::Action;
use crate::shell::{ShellMode, WidgetVisibility};
use crate::theme::{Theme, ThemeMode};
use crate::widgets::{MessageListState, TextInputState};

/// Application state.
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Widget configuration.
    pub config: WidgetConfig,

    /// The conversation log.
    pub log: ChatLog,

    /// Text input state for the message input.
    pub input: TextInputState,

    /// Scroll state for the message list.
    pub list_state: MessageListState,

    /// Floating widget visibility.
    pub visibility: WidgetVisibility,

    /// Dark/light selection.
    pub theme_mode: ThemeMode,

    /// Highlighted quick-action chip, if any.
    pub selected_action: Option<usize>,

    /// Tick counter for animations.
    pub tick: usize,

    /// The response provider, shared with spawned reply tasks.
    pub provider: Arc<dyn ResponseProvider>,

    pub(crate) mode: ShellMode,
    pub(crate) theme_dark: Theme,
    pub(crate) theme_light: Theme,
    /// Host broadcast channel (embedded mode only).
    pub(crate) host_tx: Option<mpsc::UnboundedSender<HostEvent>>,
}

impl App {
    /// Create the app for the given hosting mode.
    ///
    /// `full_page` wins over the config's `embedded` flag; floating mode
    /// starts closed, the other modes start (and stay) open.
    pub fn new(
        config: WidgetConfig,
        provider: Arc<dyn ResponseProvider>,
        full_page: bool,
        host_tx: Option<mpsc::UnboundedSender<HostEvent>>,
    ) -> Self {
        let mode = if full_page {
            ShellMode::FullPage
        } else if config.embedded {
            ShellMode::Embedded
        } else {
            ShellMode::Floating
        };
        let visibility = match mode {
            ShellMode::Floating => WidgetVisibility::Closed,
            ShellMode::FullPage | ShellMode::Embedded => WidgetVisibility::Open,
        };

        let log = ChatLog::seeded(config.initial_messages.clone());
        let theme_dark = Theme::dark().with_overrides(&config.theme);
        let theme_light = Theme::light().with_overrides(&config.theme);

        Self {
            should_quit: false,
            config,
            log,
            input: TextInputState::new(),
            list_state: MessageListState::new(),
            visibility,
            theme_mode: ThemeMode::default(),
            selected_action: None,
            tick: 0,
            provider,
            mode,
            theme_dark,
            theme_light,
            host_tx,
        }
    }

    /// The hosting mode.
    pub fn mode(&self) -> ShellMode {
        self.mode
    }

    /// Whether the chat window is showing.
    pub fn is_open(&self) -> bool {
        self.visibility == WidgetVisibility::Open
    }

    /// The active palette for the current mode.
    pub fn theme(&self) -> &Theme {
        match self.theme_mode {
            ThemeMode::Dark => &self.theme_dark,
            ThemeMode::Light => &self.theme_light,
        }
    }

    /// Flip dark/light mode. The single theme mutation point.
    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggled();
    }

    /// Flip the floating widget open/closed.
    ///
    /// No effect in embedded or full-page mode; the log is preserved
    /// across toggles either way.
    pub fn toggle_widget(&mut self) {
        if self.mode == ShellMode::Floating {
            self.visibility = self.visibility.toggled();
        }
    }

    /// The suggestion set for the current log.
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        quick_actions(self.log.messages())
    }

    /// Move the quick-action highlight forward or backward, wrapping.
    pub fn cycle_suggestion(&mut self, forward: bool) {
        let len = self.quick_actions().len();
        self.selected_action = Some(match self.selected_action {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        });
    }

    /// Start a send: append the user message and mark the response
    /// pending. Returns the text the caller must hand to the provider.
    ///
    /// The text comes from the input if non-empty, otherwise from the
    /// highlighted quick action. Empty input and sends while a response
    /// is in flight are ignored without any state change.
    pub fn submit(&mut self) -> Option<String> {
        let text = if self.input.is_empty() {
            let actions = self.quick_actions();
            let selected = self.selected_action?;
            actions.get(selected)?.message.to_string()
        } else {
            self.input.submit()
        };

        let text = text.trim().to_string();
        if text.is_empty() || self.log.is_pending() {
            return None;
        }

        self.log
            .append(Message::user(&text, &*self.config.user_name));
        self.log
            .begin_response()
            .expect("pending checked just above");
        self.selected_action = None;
        self.list_state.jump_to_end();

        if let Some(tx) = &self.host_tx {
            let _ = tx.send(HostEvent::chat(&text));
        }

        Some(text)
    }

    /// Settle the in-flight response with the provider's result.
    pub fn complete_response(&mut self, result: Result<String, ProviderError>) {
        match result {
            Ok(reply) => {
                self.log
                    .end_response(Some(Message::bot(reply, &*self.config.title)));
            }
            Err(err) => {
                self.log.end_response(None);
                warn!(error = %err, "response provider failed");
            }
        }
        self.list_state.jump_to_end();
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ToggleTheme => self.toggle_theme(),
            Action::Back => {
                // Esc closes the floating popup; anywhere else it quits.
                if self.mode == ShellMode::Floating && self.is_open() {
                    self.toggle_widget();
                } else {
                    self.should_quit = true;
                }
            }
            Action::Select => {
                // Enter/Space on the launcher opens the popup. While the
                // window is open, Enter is consumed by the input handler
                // before actions are mapped.
                if !self.is_open() {
                    self.toggle_widget();
                }
            }
            Action::ScrollUp => {
                if self.is_open() {
                    self.list_state.scroll_up();
                }
            }
            Action::ScrollDown => {
                if self.is_open() {
                    self.list_state.scroll_down();
                }
            }
            Action::None => {}
        }
    }

    /// Advance animations.
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::{EchoProvider, Position};
    use std::time::Duration;

    fn test_provider() -> Arc<dyn ResponseProvider> {
        Arc::new(EchoProvider::new(Duration::ZERO))
    }

    fn floating_app() -> App {
        let config = WidgetConfig::default().with_initial_messages(vec![Message::welcome(
            "AI Assistant",
        )]);
        App::new(config, test_provider(), false, None)
    }

    #[test]
    fn test_floating_starts_closed_full_page_starts_open() {
        let app = floating_app();
        assert_eq!(app.mode(), ShellMode::Floating);
        assert!(!app.is_open());

        let full = App::new(WidgetConfig::default(), test_provider(), true, None);
        assert_eq!(full.mode(), ShellMode::FullPage);
        assert!(full.is_open());
    }

    #[test]
    fn test_embedded_is_pinned_open() {
        let config = WidgetConfig::default().embedded();
        let mut app = App::new(config, test_provider(), false, None);
        assert_eq!(app.mode(), ShellMode::Embedded);
        assert!(app.is_open());

        app.toggle_widget();
        assert!(app.is_open());
    }

    #[test]
    fn test_toggling_preserves_the_log() {
        let mut app = floating_app();
        app.toggle_widget();
        assert!(app.is_open());
        let before: Vec<String> = app
            .log
            .messages()
            .iter()
            .map(|m| m.content.clone())
            .collect();

        app.toggle_widget();
        app.toggle_widget();
        let after: Vec<String> = app
            .log
            .messages()
            .iter()
            .map(|m| m.content.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_submit_appends_user_message_and_marks_pending() {
        let mut app = floating_app();
        for ch in "hello".chars() {
            app.input.insert(ch);
        }

        let text = app.submit().unwrap();
        assert_eq!(text, "hello");
        assert!(app.log.is_pending());
        assert!(app.log.last().unwrap().is_user());
        assert_eq!(app.log.last().unwrap().content, "hello");
    }

    #[test]
    fn test_submit_whitespace_only_is_ignored() {
        let mut app = floating_app();
        for ch in "   ".chars() {
            app.input.insert(ch);
        }

        assert!(app.submit().is_none());
        assert!(!app.log.is_pending());
        assert_eq!(app.log.len(), 1); // just the welcome message
    }

    #[test]
    fn test_submit_while_pending_is_ignored() {
        let mut app = floating_app();
        for ch in "one".chars() {
            app.input.insert(ch);
        }
        app.submit().unwrap();
        let len_after_first = app.log.len();

        for ch in "two".chars() {
            app.input.insert(ch);
        }
        assert!(app.submit().is_none());
        assert_eq!(app.log.len(), len_after_first);
    }

    #[test]
    fn test_selected_quick_action_sends_its_message() {
        let mut app = floating_app();
        // Log ends with the bot welcome, so the follow-up set applies.
        app.cycle_suggestion(true);
        let text = app.submit().unwrap();
        assert_eq!(text, "Thank you, that was helpful!");
        assert_eq!(app.log.last().unwrap().content, text);
    }

    #[test]
    fn test_typed_text_wins_over_selected_chip() {
        let mut app = floating_app();
        app.cycle_suggestion(true);
        for ch in "typed".chars() {
            app.input.insert(ch);
        }
        assert_eq!(app.submit().unwrap(), "typed");
    }

    #[test]
    fn test_complete_response_success_appends_bot_reply() {
        let mut app = floating_app();
        for ch in "hi".chars() {
            app.input.insert(ch);
        }
        app.submit().unwrap();

        app.complete_response(Ok("echo: hi".to_string()));
        assert!(!app.log.is_pending());
        let last = app.log.last().unwrap();
        assert!(last.is_bot());
        assert_eq!(last.content, "echo: hi");
        assert_eq!(last.sender.name, "AI Assistant");
    }

    #[test]
    fn test_complete_response_failure_clears_pending_without_reply() {
        let mut app = floating_app();
        for ch in "hi".chars() {
            app.input.insert(ch);
        }
        app.submit().unwrap();
        let len = app.log.len();

        app.complete_response(Err(ProviderError::Failed("down".into())));
        assert!(!app.log.is_pending());
        assert_eq!(app.log.len(), len);
        assert!(app.log.last().unwrap().is_user());
    }

    #[test]
    fn test_cycle_suggestion_wraps_over_the_active_set() {
        let mut app = floating_app();
        // Follow-up set (4 entries) is active after the welcome message.
        app.cycle_suggestion(true);
        assert_eq!(app.selected_action, Some(0));
        for _ in 0..4 {
            app.cycle_suggestion(true);
        }
        assert_eq!(app.selected_action, Some(0));

        app.cycle_suggestion(false);
        assert_eq!(app.selected_action, Some(3));
    }

    #[test]
    fn test_host_broadcast_carries_user_sends() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let config = WidgetConfig::default().embedded();
        let mut app = App::new(config, test_provider(), false, Some(tx));

        for ch in "hello host".chars() {
            app.input.insert(ch);
        }
        app.submit().unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event, HostEvent::chat("hello host"));
    }

    #[test]
    fn test_esc_closes_popup_then_quits() {
        let mut app = floating_app();
        app.toggle_widget();
        assert!(app.is_open());

        app.handle_action(Action::Back);
        assert!(!app.is_open());
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_select_opens_the_launcher() {
        let mut app = floating_app();
        app.handle_action(Action::Select);
        assert!(app.is_open());
    }

    #[test]
    fn test_theme_toggle_switches_palette() {
        let config = WidgetConfig::default().with_position(Position::BottomLeft);
        let mut app = App::new(config, test_provider(), false, None);
        let dark_base = app.theme().base;
        app.handle_action(Action::ToggleTheme);
        assert_ne!(app.theme().base, dark_base);
    }
}
