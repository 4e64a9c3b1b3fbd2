//! confab CLI: terminal host for the chat widget.
//!
//! Three hosting modes: a full-page chat demo (default), a floating
//! corner widget with a launcher, and an embedded always-open window
//! configured from a query string.

use std::fs::File;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use confab_core::{
    config_from_query, EchoProvider, HostEvent, Message, Position, ResponseProvider, WidgetConfig,
};

/// Terminal chat widget with a full-page demo and embeddable shells
#[derive(Parser)]
#[command(name = "confab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Simulated response latency for the demo echo provider
    #[arg(long, global = true, default_value = "2000")]
    delay_ms: u64,

    /// Append tracing output to this file (the TUI owns the terminal)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the full-page chat demo (default when no command specified)
    Chat {
        /// Header title; also the bot's display name
        #[arg(long, default_value = "CSWynk")]
        title: String,

        /// Header subtitle
        #[arg(long, default_value = "AI Assistant")]
        subtitle: String,
    },

    /// Open the floating widget with a corner launcher
    Widget {
        /// Header title; also the bot's display name
        #[arg(long, default_value = "AI Assistant")]
        title: String,

        /// Header subtitle
        #[arg(long, default_value = "Always here to help")]
        subtitle: String,

        /// Corner to anchor to (bottom-right or bottom-left)
        #[arg(long, default_value = "bottom-right")]
        position: Position,
    },

    /// Open the embedded always-open widget, configured from a query string
    Embedded {
        /// Host query string, e.g. "title=Quick%20Chat&position=bottom-left"
        #[arg(long, default_value = "")]
        query: String,

        /// JSON-lines file receiving {"type":"chat-message",...} broadcasts
        #[arg(long)]
        event_log: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path);
    }

    let provider: Arc<dyn ResponseProvider> =
        Arc::new(EchoProvider::new(Duration::from_millis(cli.delay_ms)));

    // Default: open the full-page demo
    let command = cli.command.unwrap_or(Commands::Chat {
        title: "CSWynk".to_string(),
        subtitle: "AI Assistant".to_string(),
    });

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = match command {
        Commands::Chat { title, subtitle } => {
            let config = WidgetConfig::default()
                .with_title(&title)
                .with_subtitle(subtitle)
                .with_user_name("You")
                .with_initial_messages(vec![Message::welcome(&title)]);
            rt.block_on(confab_tui::run_widget(config, provider, true, None))
        }
        Commands::Widget {
            title,
            subtitle,
            position,
        } => {
            let config = WidgetConfig::default()
                .with_title(&title)
                .with_subtitle(subtitle)
                .with_position(position)
                .with_initial_messages(vec![Message::welcome(&title)]);
            rt.block_on(confab_tui::run_widget(config, provider, false, None))
        }
        Commands::Embedded { query, event_log } => {
            rt.block_on(run_embedded(provider, &query, event_log))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Embedded mode: query-string config plus the host broadcast channel.
async fn run_embedded(
    provider: Arc<dyn ResponseProvider>,
    query: &str,
    event_log: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config_from_query(query);
    if config.initial_messages.is_empty() {
        config.initial_messages = vec![Message::welcome(&config.title)];
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let writer = match event_log {
        Some(path) => Some(spawn_event_writer(path, rx)),
        None => {
            // No sink configured: drop the receiver, broadcasts become no-ops.
            drop(rx);
            None
        }
    };

    let result = confab_tui::run_widget(config, provider, false, Some(tx)).await;

    // The sender side is gone once the widget returns; the writer task
    // finishes flushing and exits on its own.
    if let Some(handle) = writer {
        let _ = handle.await;
    }

    result
}

/// Append each host broadcast to `path` as one JSON line.
fn spawn_event_writer(path: PathBuf, mut rx: mpsc::UnboundedReceiver<HostEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut file = match File::create(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "cannot open event log");
                return;
            }
        };
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if let Err(e) = writeln!(file, "{json}") {
                        tracing::warn!(error = %e, "event log write failed");
                        return;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "event serialization failed"),
            }
        }
    })
}

/// Install a file-backed tracing subscriber.
///
/// The TUI owns stdout, so tracing output goes to a side file; the
/// filter honors `RUST_LOG` and defaults to `info`.
fn init_tracing(path: &Path) {
    let Ok(file) = File::create(path) else {
        eprintln!("warning: cannot open log file {}", path.display());
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_embedded_query_parses() {
        let cli = Cli::parse_from([
            "confab",
            "embedded",
            "--query",
            "title=Quick%20Chat&position=bottom-left",
        ]);
        match cli.command {
            Some(Commands::Embedded { query, .. }) => {
                let config = config_from_query(&query);
                assert_eq!(config.title, "Quick Chat");
                assert_eq!(config.position, Position::BottomLeft);
            }
            _ => panic!("expected embedded command"),
        }
    }

    #[test]
    fn test_widget_position_is_validated_by_clap() {
        let result = Cli::try_parse_from(["confab", "widget", "--position", "top-center"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_event_writer_emits_wire_shape() {
        let dir = std::env::temp_dir().join(format!("confab-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("events.jsonl");

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = spawn_event_writer(path.clone(), rx);
        tx.send(HostEvent::chat("hello")).unwrap();
        drop(tx);
        writer.await.unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim(),
            r#"{"type":"chat-message","message":"hello"}"#
        );
        let _ = std::fs::remove_dir_all(&dir);
    }
}
