//! The embedded deployment variant.
//!
//! When the widget is hosted inside another surface, configuration
//! arrives as a query string and outgoing user messages are broadcast
//! back to the host. The outbound wire shape is fixed:
//!
//! ```json
//! {"type": "chat-message", "message": "<text>"}
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::form_urlencoded;

use crate::config::{Rgb, WidgetConfig};

/// Event broadcast to the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostEvent {
    /// A user message left the widget.
    ChatMessage { message: String },
}

impl HostEvent {
    /// Wrap an outgoing user message.
    pub fn chat(message: impl Into<String>) -> Self {
        Self::ChatMessage {
            message: message.into(),
        }
    }

    /// Serialize to the host wire format.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Build an embedded-mode configuration from the host's query string.
///
/// Recognized keys: `title`, `subtitle`, `position`, `primaryColor`,
/// `secondaryColor`, `buttonColor`. Unknown keys are ignored. Invalid
/// positions and colors are warned about and fall back to defaults
/// rather than failing the whole widget.
pub fn config_from_query(query: &str) -> WidgetConfig {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut config = WidgetConfig::default().embedded();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "title" => config.title = value.into_owned(),
            "subtitle" => config.subtitle = value.into_owned(),
            "position" => match value.parse() {
                Ok(position) => config.position = position,
                Err(err) => warn!(%err, "ignoring position from query"),
            },
            "primaryColor" => parse_color(&mut config.theme.primary, &value),
            "secondaryColor" => parse_color(&mut config.theme.secondary, &value),
            "buttonColor" => parse_color(&mut config.theme.button, &value),
            _ => {}
        }
    }

    config
}

fn parse_color(slot: &mut Option<Rgb>, value: &str) {
    match value.parse() {
        Ok(color) => *slot = Some(color),
        Err(err) => warn!(%err, "ignoring color from query"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;

    #[test]
    fn test_host_event_wire_shape_is_exact() {
        let event = HostEvent::chat("hello world");
        assert_eq!(
            event.to_json().unwrap(),
            r#"{"type":"chat-message","message":"hello world"}"#
        );
    }

    #[test]
    fn test_host_event_round_trips() {
        let json = r#"{"type":"chat-message","message":"hi"}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, HostEvent::chat("hi"));
    }

    #[test]
    fn test_empty_query_yields_embedded_defaults() {
        let config = config_from_query("");
        assert!(config.embedded);
        assert_eq!(config.title, "AI Assistant");
        assert_eq!(config.subtitle, "Always here to help");
        assert_eq!(config.position, Position::BottomRight);
    }

    #[test]
    fn test_full_query_is_applied() {
        let config = config_from_query(
            "?title=Quick%20Chat&subtitle=Get+instant+help&position=bottom-left&primaryColor=%236366f1",
        );
        assert_eq!(config.title, "Quick Chat");
        assert_eq!(config.subtitle, "Get instant help");
        assert_eq!(config.position, Position::BottomLeft);
        assert_eq!(config.theme.primary, Some(Rgb(0x63, 0x66, 0xf1)));
        assert_eq!(config.theme.secondary, None);
    }

    #[test]
    fn test_invalid_position_falls_back_to_default() {
        let config = config_from_query("position=top-center&title=Chat");
        assert_eq!(config.position, Position::BottomRight);
        // The rest of the query still applies.
        assert_eq!(config.title, "Chat");
    }

    #[test]
    fn test_invalid_color_is_skipped() {
        let config = config_from_query("primaryColor=blue");
        assert_eq!(config.theme.primary, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = config_from_query("apiKey=secret&title=Chat");
        assert_eq!(config.title, "Chat");
    }
}
