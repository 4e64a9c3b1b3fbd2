//! Quick-action suggestions derived from the last message.
//!
//! A fixed two-branch classifier: the widget either prompts the user to
//! start something (default set) or to follow up on the bot's last reply
//! (follow-up set). Selection feeds the suggestion's message text through
//! the normal send path; it never bypasses input validation.

use crate::message::Message;

/// A suggested reply the user can send with one keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    /// Short chip label shown in the suggestion row.
    pub label: &'static str,
    /// Message text sent when the suggestion is selected.
    pub message: &'static str,
}

/// Generic prompts shown when the conversation is waiting on the user.
pub const DEFAULT_ACTIONS: [QuickAction; 2] = [
    QuickAction {
        label: "New Topic",
        message: "I'd like to start a new topic.",
    },
    QuickAction {
        label: "Help",
        message: "I need help with something.",
    },
];

/// Contextual follow-ups shown after a bot reply.
pub const FOLLOW_UP_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Thanks!",
        message: "Thank you, that was helpful!",
    },
    QuickAction {
        label: "Explain More",
        message: "Could you explain that in more detail?",
    },
    QuickAction {
        label: "Examples",
        message: "Can you provide some examples?",
    },
    QuickAction {
        label: "Related",
        message: "What other related topics should I know about?",
    },
];

/// Select the suggestion set for the given message snapshot.
///
/// The follow-up set applies only when the log ends with a bot message;
/// an empty log or a trailing user message yields the default set.
pub fn quick_actions(messages: &[Message]) -> &'static [QuickAction] {
    match messages.last() {
        Some(last) if last.is_bot() => &FOLLOW_UP_ACTIONS,
        _ => &DEFAULT_ACTIONS,
    }
}
