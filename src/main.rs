use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chat_widget::{
    config::{COMPANY_VAR, SERVER_URL_VAR, WidgetConfig},
    message::MessageRole,
    routes,
    services::message_client::MessageClient,
    state::AppState,
    widget::{ChatWidget, MessageSink},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chat with a backend from the terminal
    Chat {
        /// Backend base url
        #[arg(long, env = SERVER_URL_VAR)]
        server: Option<String>,

        /// Company id sent with every message
        #[arg(long, env = COMPANY_VAR)]
        company: Option<String>,
    },
    /// Run the reference chat backend
    Serve {
        #[arg(long, env = "CHAT_BACKEND_HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(long, env = "CHAT_BACKEND_PORT", default_value_t = 8000)]
        port: u16,
    },
}

/// Prints the conversation to stdout.
struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn append_message(&self, text: &str, role: MessageRole) {
        // The user already sees their own line on the terminal.
        if role == MessageRole::Bot {
            println!("bot> {text}");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap reads env-backed arguments.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Chat { server, company } => run_chat(server, company).await,
        Command::Serve { host, port } => run_serve(&host, port).await,
    }
}

async fn run_chat(server: Option<String>, company: Option<String>) -> anyhow::Result<()> {
    let config = WidgetConfig::from_lookup(|key| match key {
        SERVER_URL_VAR => server.clone(),
        COMPANY_VAR => company.clone(),
        _ => None,
    })
    .context("invalid widget configuration")?;

    tracing::info!(
        server = %config.server_url(),
        company_id = %config.company_id(),
        "chat widget ready, type a message and press enter"
    );

    let widget = ChatWidget::new(MessageClient::new(config), Arc::new(ConsoleSink));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = Vec::new();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if let Some(handle) = widget.submit(&line).await {
            pending.push(handle);
        }
        pending.retain(|h| !h.is_finished());
    }

    for handle in pending {
        if let Err(err) = handle.await {
            tracing::error!(error = %err, "reply task panicked");
        }
    }
    Ok(())
}

async fn run_serve(host: &str, port: u16) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new());
    let app = routes::create_router().with_state(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("chat backend running at http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
