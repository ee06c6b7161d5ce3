// src/services/message_client.rs
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::WidgetConfig,
    error::ClientError,
    message::{ChatRequest, ChatResponse},
};

/// Shown to the user whenever an exchange fails, whatever the cause.
pub const FALLBACK_MESSAGE: &str = "Sorry, I encountered an error.";

/// A successful bot answer.
#[derive(Debug, Clone, PartialEq)]
pub struct BotReply {
    pub text: String,
    pub confidence: Option<f64>,
    pub source: Option<String>,
}

/// Outcome of one exchange, already folded into something displayable.
#[derive(Debug)]
pub enum Reply {
    Bot(BotReply),
    Failed(ClientError),
}

impl Reply {
    /// What the widget should render for this reply.
    pub fn text(&self) -> &str {
        match self {
            Reply::Bot(reply) => &reply.text,
            Reply::Failed(_) => FALLBACK_MESSAGE,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }
}

#[derive(Debug, Clone)]
pub struct MessageClient {
    http: reqwest::Client,
    config: WidgetConfig,
}

impl MessageClient {
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: WidgetConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    /// Post `message` to `{server_url}/chat` once and extract the bot text.
    pub async fn send(&self, message: &str) -> Result<BotReply, ClientError> {
        let body = ChatRequest {
            message: message.to_string(),
            company_id: self.config.company_id().to_string(),
        };

        let response = self
            .http
            .post(self.config.chat_url())
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        let payload: ChatResponse =
            serde_json::from_slice(&bytes).map_err(ClientError::Decode)?;

        match payload.response {
            Some(text) if !text.is_empty() => Ok(BotReply {
                text,
                confidence: payload.confidence,
                source: payload.source,
            }),
            _ => Err(ClientError::MissingResponse),
        }
    }

    /// Like [`send`](Self::send), but never fails: errors are logged and
    /// turned into [`Reply::Failed`].
    pub async fn exchange(&self, message: &str) -> Reply {
        let span = tracing::info_span!(
            "chat_exchange",
            request_id = %Uuid::new_v4(),
            company_id = %self.config.company_id(),
        );

        async {
            match self.send(message).await {
                Ok(reply) => {
                    tracing::debug!(
                        confidence = ?reply.confidence,
                        source = ?reply.source,
                        "bot replied"
                    );
                    Reply::Bot(reply)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "chat exchange failed");
                    Reply::Failed(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
