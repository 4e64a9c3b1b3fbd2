//! confab-core: headless chat state and interaction model
//!
//! This crate provides everything the confab widget knows that is not
//! rendering:
//! - The message model and the append-only [`ChatLog`]
//! - Quick-action suggestions derived from the last message
//! - The [`ResponseProvider`] boundary and the demo echo provider
//! - The send pipeline ([`ChatSession`])
//! - Widget configuration, including the embedded variant's query-string
//!   parsing and host wire contract

pub mod config;
pub mod embed;
pub mod log;
pub mod message;
pub mod provider;
pub mod quick_actions;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigError, Position, Rgb, ThemeOverrides, WidgetConfig};
pub use embed::{config_from_query, HostEvent};
pub use log::{ChatLog, LogError};
pub use message::{Attachment, Message, PresenceStatus, Reaction, Sender, SenderKind};
pub use provider::{EchoProvider, ProviderError, ProviderFuture, ResponseProvider};
pub use quick_actions::{quick_actions, QuickAction, DEFAULT_ACTIONS, FOLLOW_UP_ACTIONS};
pub use session::{ChatSession, SendError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_version() {
        let version = core_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
