//! The response provider boundary.
//!
//! The provider is the widget's sole "backend": it turns user text into
//! assistant text and may suspend for an arbitrary duration. A real
//! deployment swaps the shipped echo stub for an HTTP-backed
//! implementation with no change to the send pipeline.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future returned by [`ResponseProvider::respond`].
pub type ProviderFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;

/// Errors surfaced by a response provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not produce a reply.
    #[error("provider failed: {0}")]
    Failed(String),
}

/// Turns user text into assistant text.
///
/// Callers apply no timeout; a provider that never settles leaves the
/// conversation pending indefinitely.
pub trait ResponseProvider: Send + Sync {
    fn respond<'a>(&'a self, text: &'a str) -> ProviderFuture<'a>;
}

/// Demo provider: waits a fixed delay, then echoes the input.
#[derive(Debug, Clone)]
pub struct EchoProvider {
    delay: Duration,
}

impl EchoProvider {
    /// Default simulated network latency.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    /// Create an echo provider with the given simulated latency.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The deterministic echo reply for a given input.
    pub fn reply_to(text: &str) -> String {
        format!("I received your message: \"{text}\". How can I help you further?")
    }
}

impl Default for EchoProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl ResponseProvider for EchoProvider {
    fn respond<'a>(&'a self, text: &'a str) -> ProviderFuture<'a> {
        let delay = self.delay;
        let reply = Self::reply_to(text);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            Ok(reply)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_reply_shape() {
        assert_eq!(
            EchoProvider::reply_to("hello"),
            "I received your message: \"hello\". How can I help you further?"
        );
    }

    #[tokio::test]
    async fn test_echo_provider_resolves() {
        let provider = EchoProvider::new(Duration::ZERO);
        let reply = provider.respond("ping").await.unwrap();
        assert_eq!(reply, EchoProvider::reply_to("ping"));
    }
}
