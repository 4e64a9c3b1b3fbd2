//! The send pipeline: one user turn against the response provider.

use tracing::warn;

use crate::log::{ChatLog, LogError};
use crate::message::Message;
use crate::provider::{ProviderError, ResponseProvider};

/// Errors raised by [`ChatSession::send`].
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// Input was empty after trimming; nothing was appended.
    #[error("message is empty")]
    EmptyInput,
    /// A previous send has not settled yet; nothing was appended.
    #[error("a response is already in flight")]
    ResponseInFlight,
    /// The provider rejected the request; the user message remains.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<LogError> for SendError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::ResponseInFlight => Self::ResponseInFlight,
        }
    }
}

/// A conversation bound to a response provider.
///
/// `send` runs the full exchange in one call and suspends across the
/// provider invocation. The interactive widget splits the same steps
/// across its event loop instead, so the UI can keep redrawing while a
/// reply is in flight.
pub struct ChatSession {
    log: ChatLog,
    provider: Box<dyn ResponseProvider>,
    bot_name: String,
    user_name: String,
}

impl ChatSession {
    /// Bind a log to a provider. The bot signs replies with `bot_name`.
    pub fn new(log: ChatLog, provider: Box<dyn ResponseProvider>, bot_name: impl Into<String>) -> Self {
        Self {
            log,
            provider,
            bot_name: bot_name.into(),
            user_name: "User".to_string(),
        }
    }

    /// Override the display name attached to user messages.
    #[must_use]
    pub fn with_user_name(mut self, name: impl Into<String>) -> Self {
        self.user_name = name.into();
        self
    }

    /// The underlying log.
    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    /// Send one user message and await the assistant's reply.
    ///
    /// The user message is appended synchronously, before any async work.
    /// After the call settles the log is never left pending: a successful
    /// exchange appends exactly two messages (user then bot), a failed
    /// one exactly one (the user's).
    pub async fn send(&mut self, raw: &str) -> Result<(), SendError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(SendError::EmptyInput);
        }
        if self.log.is_pending() {
            return Err(SendError::ResponseInFlight);
        }

        self.log.append(Message::user(text, &*self.user_name));
        self.log.begin_response()?;

        match self.provider.respond(text).await {
            Ok(reply) => {
                self.log
                    .end_response(Some(Message::bot(reply, &*self.bot_name)));
                Ok(())
            }
            Err(err) => {
                self.log.end_response(None);
                warn!(error = %err, "response provider failed");
                Err(SendError::Provider(err))
            }
        }
    }
}
