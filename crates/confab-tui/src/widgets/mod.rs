//! Widgets composing the chat window.

mod header;
mod input_bar;
mod message_list;
mod quick_actions;
mod text_input;

pub use header::Header;
pub use input_bar::InputBar;
pub use message_list::{MessageList, MessageListState, SCROLL_STEP};
pub use quick_actions::QuickActionsBar;
pub use text_input::TextInputState;
