//! Append-only message log with response-in-flight tracking.

use crate::message::Message;

/// Errors raised by [`ChatLog`] state transitions.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    /// `begin_response` was called while a response was already awaited.
    #[error("a response is already in flight")]
    ResponseInFlight,
}

/// The ordered message sequence for one conversation instance.
///
/// Messages keep append order; there is no reordering and no deletion.
/// The `pending` flag marks the window between a user send and the
/// arrival (or failure) of the corresponding assistant reply:
///
/// ```text
/// Idle --begin_response()--> AwaitingResponse --end_response(_)--> Idle
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    pending: bool,
}

impl ChatLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-seeded with messages (display order preserved).
    pub fn seeded(initial: Vec<Message>) -> Self {
        Self {
            messages: initial,
            pending: false,
        }
    }

    /// Create a log holding only the widget's welcome message.
    pub fn with_welcome(title: &str) -> Self {
        Self::seeded(vec![Message::welcome(title)])
    }

    /// Append a message at the end of the log.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Mark a response as awaited.
    ///
    /// Overlapping sends are rejected rather than queued; the caller must
    /// wait for `end_response` before starting another exchange.
    pub fn begin_response(&mut self) -> Result<(), LogError> {
        if self.pending {
            return Err(LogError::ResponseInFlight);
        }
        self.pending = true;
        Ok(())
    }

    /// Settle the awaited response, appending the bot reply if one arrived.
    pub fn end_response(&mut self, message: Option<Message>) {
        self.pending = false;
        if let Some(message) = message {
            self.messages.push(message);
        }
    }

    /// Ordered snapshot of the log.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether a response is currently awaited.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the log has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut log = ChatLog::new();
        log.append(Message::user("first", "You"));
        log.append(Message::user("second", "You"));

        let contents: Vec<&str> = log.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_begin_then_end_response() {
        let mut log = ChatLog::new();
        assert!(!log.is_pending());

        log.begin_response().unwrap();
        assert!(log.is_pending());

        log.end_response(Some(Message::bot("reply", "Bot")));
        assert!(!log.is_pending());
        assert_eq!(log.len(), 1);
        assert!(log.last().unwrap().is_bot());
    }

    #[test]
    fn test_overlapping_begin_response_rejected() {
        let mut log = ChatLog::new();
        log.begin_response().unwrap();
        assert_eq!(log.begin_response(), Err(LogError::ResponseInFlight));
        // The failed call must not disturb the in-flight state.
        assert!(log.is_pending());
    }

    #[test]
    fn test_end_response_without_message_only_clears_pending() {
        let mut log = ChatLog::new();
        log.begin_response().unwrap();
        log.end_response(None);
        assert!(!log.is_pending());
        assert!(log.is_empty());
    }

    #[test]
    fn test_with_welcome_seeds_one_bot_message() {
        let log = ChatLog::with_welcome("AI Assistant");
        assert_eq!(log.len(), 1);
        assert!(log.last().unwrap().is_bot());
        assert!(!log.is_pending());
    }
}
