//! confab-tui: terminal widget layer for the confab chat front-end
//!
//! This crate renders the chat window (header, message list, quick
//! actions, input bar) and hosts it as a full-page demo, a floating
//! corner widget, or an embedded always-open window. All chat state
//! lives in `confab-core`; this crate owns the event loop and keeps the
//! UI responsive while a response is in flight by running provider
//! calls as spawned tasks.

mod app;
mod event;
pub mod shell;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use confab_core;
pub use event::{key_to_action, Action, Event, EventHandler};

use std::io::{self, stdout};
use std::sync::Arc;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, style::Style, widgets::Block, Frame, Terminal};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use confab_core::{HostEvent, ProviderError, ResponseProvider, WidgetConfig};
use shell::{launcher_rect, popup_rect, ChatWindow, Launcher, ShellMode};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the widget until the user quits.
///
/// `full_page` hosts the window across the whole terminal; otherwise the
/// config's `embedded` flag selects between the embedded and floating
/// shells. `host_tx`, when given, receives a [`HostEvent`] for every
/// user send (the embedded broadcast channel).
pub async fn run_widget(
    config: WidgetConfig,
    provider: Arc<dyn ResponseProvider>,
    full_page: bool,
    host_tx: Option<mpsc::UnboundedSender<HostEvent>>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, provider, full_page, host_tx);

    // 4 Hz tick rate drives the composing animation
    let mut events = EventHandler::new(250);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    // In-flight provider calls; completions settle the log.
    let mut reply_handles: Vec<JoinHandle<Result<String, ProviderError>>> = Vec::new();

    loop {
        terminal.draw(|frame| draw(app, frame))?;

        // Check for settled replies (non-blocking)
        let mut completed = Vec::new();
        for (i, handle) in reply_handles.iter().enumerate() {
            if handle.is_finished() {
                completed.push(i);
            }
        }
        for i in completed.into_iter().rev() {
            match reply_handles.remove(i).await {
                Ok(result) => app.complete_response(result),
                Err(join_err) => {
                    app.complete_response(Err(ProviderError::Failed(join_err.to_string())));
                }
            }
        }

        if let Some(event) = events.next().await {
            match event {
                Event::Key(key) => {
                    if app.is_open() && handle_chat_key(app, key, &mut reply_handles) {
                        continue;
                    }
                    let action = key_to_action(key);
                    app.handle_action(action);
                }
                Event::Mouse(mouse) => {
                    use crossterm::event::MouseEventKind;
                    match mouse.kind {
                        MouseEventKind::ScrollUp => app.handle_action(Action::ScrollUp),
                        MouseEventKind::ScrollDown => app.handle_action(Action::ScrollDown),
                        _ => {}
                    }
                }
                Event::Tick => app.on_tick(),
                Event::Resize(_, _) => {
                    // Terminal will handle resize automatically
                }
            }
        }

        if app.should_quit {
            // Late provider completions must not touch a gone log.
            for handle in reply_handles {
                handle.abort();
            }
            break;
        }
    }

    Ok(())
}

/// Handle key input while the chat window is open.
/// Returns true if the key was consumed (should not be mapped to an action).
fn handle_chat_key(
    app: &mut App,
    key: KeyEvent,
    reply_handles: &mut Vec<JoinHandle<Result<String, ProviderError>>>,
) -> bool {
    // Let Ctrl combinations (quit, theme toggle) reach the action map.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match key.code {
        // Escape and arrows are handled as actions.
        KeyCode::Esc | KeyCode::Up | KeyCode::Down => false,

        // Enter sends the input, or the highlighted suggestion.
        KeyCode::Enter => {
            if let Some(text) = app.submit() {
                let provider = Arc::clone(&app.provider);
                let handle = tokio::spawn(async move { provider.respond(&text).await });
                reply_handles.push(handle);
            }
            true
        }

        // Tab cycles the quick-action highlight.
        KeyCode::Tab => {
            app.cycle_suggestion(true);
            true
        }
        KeyCode::BackTab => {
            app.cycle_suggestion(false);
            true
        }

        // Text input
        KeyCode::Char(c) => {
            app.input.insert(c);
            true
        }
        KeyCode::Backspace => {
            app.input.backspace();
            true
        }
        KeyCode::Delete => {
            app.input.delete();
            true
        }
        KeyCode::Left => {
            app.input.move_left();
            true
        }
        KeyCode::Right => {
            app.input.move_right();
            true
        }
        KeyCode::Home => {
            app.input.move_home();
            true
        }
        KeyCode::End => {
            app.input.move_end();
            true
        }

        _ => false,
    }
}

/// Draw the shell for the app's current mode and visibility.
fn draw(app: &mut App, frame: &mut Frame<'_>) {
    let area = frame.area();
    let theme = app.theme().clone();

    frame.render_widget(Block::default().style(Style::default().bg(theme.base)), area);

    if !app.is_open() {
        let rect = launcher_rect(area, app.config.position);
        frame.render_widget(Launcher::new(&app.config.launcher_icon, &theme), rect);
        return;
    }

    let rect = match app.mode() {
        ShellMode::Floating => popup_rect(area, app.config.position),
        ShellMode::FullPage | ShellMode::Embedded => area,
    };
    let show_close = app.mode() == ShellMode::Floating;
    let actions = app.quick_actions();
    let selected_action = app.selected_action;
    let theme_mode = app.theme_mode;
    let tick = app.tick;

    // Disjoint borrows: the window reads the log while the list state is
    // mutated by the scroll clamp.
    let App {
        config,
        log,
        input,
        list_state,
        ..
    } = app;

    let window = ChatWindow {
        title: &config.title,
        subtitle: &config.subtitle,
        messages: log.messages(),
        pending: log.is_pending(),
        actions,
        selected_action,
        input,
        theme: &theme,
        theme_mode,
        show_close,
        tick,
    };
    frame.render_stateful_widget(window, rect, list_state);
}

/// Get the TUI crate version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_core::EchoProvider;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn test_app(full_page: bool, embedded: bool) -> App {
        let mut config = WidgetConfig::default();
        if embedded {
            config = config.embedded();
        }
        let config =
            config.with_initial_messages(vec![confab_core::Message::welcome("AI Assistant")]);
        App::new(
            config,
            Arc::new(EchoProvider::new(Duration::ZERO)),
            full_page,
            None,
        )
    }

    fn draw_to_string(app: &mut App, size: (u16, u16)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(size.0, size.1)).unwrap();
        terminal.draw(|frame| draw(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_tui_version() {
        let version = tui_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }

    #[test]
    fn test_floating_closed_draws_launcher_only() {
        let mut app = test_app(false, false);
        let text = draw_to_string(&mut app, (80, 24));
        assert!(text.contains(&app.config.launcher_icon));
        assert!(!text.contains("Type your message..."));
    }

    #[test]
    fn test_floating_open_draws_chat_window() {
        let mut app = test_app(false, false);
        app.handle_action(Action::Select);
        let text = draw_to_string(&mut app, (80, 24));
        assert!(text.contains("AI Assistant"));
        assert!(text.contains("Type your message..."));
    }

    #[test]
    fn test_full_page_draws_without_close_hint() {
        let mut app = test_app(true, false);
        let text = draw_to_string(&mut app, (80, 24));
        assert!(text.contains("AI Assistant"));
        assert!(!text.contains("Esc"));
    }

    #[test]
    fn test_embedded_draws_open_without_launcher() {
        let mut app = test_app(false, true);
        let text = draw_to_string(&mut app, (80, 24));
        assert!(text.contains("Type your message..."));
        assert!(!text.contains(&app.config.launcher_icon));
    }

    #[test]
    fn test_enter_submits_and_spawns_reply_task() {
        let mut app = test_app(true, false);
        let mut handles = Vec::new();
        for ch in "hello".chars() {
            let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
            assert!(handle_chat_key(&mut app, key, &mut handles));
        }

        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
            assert!(handle_chat_key(&mut app, enter, &mut handles));
            assert_eq!(handles.len(), 1);
            assert!(app.log.is_pending());

            let reply = handles.pop().unwrap().await.unwrap().unwrap();
            assert_eq!(reply, EchoProvider::reply_to("hello"));
        });
    }

    #[test]
    fn test_ctrl_keys_pass_through_to_actions() {
        let mut app = test_app(true, false);
        let mut handles = Vec::new();
        let key = KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert!(!handle_chat_key(&mut app, key, &mut handles));
    }
}
