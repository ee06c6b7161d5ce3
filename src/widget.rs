// src/widget.rs
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::{message::MessageRole, services::message_client::MessageClient};

/// The rendering side of the widget. Whatever displays messages only has
/// to accept appends.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn append_message(&self, text: &str, role: MessageRole);
}

/// Binds a [`MessageClient`] to a [`MessageSink`].
pub struct ChatWidget<S> {
    client: Arc<MessageClient>,
    sink: Arc<S>,
}

impl<S> Clone for ChatWidget<S> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<S: MessageSink + 'static> ChatWidget<S> {
    pub fn new(client: MessageClient, sink: Arc<S>) -> Self {
        Self {
            client: Arc::new(client),
            sink,
        }
    }

    pub fn sink(&self) -> &Arc<S> {
        &self.sink
    }

    /// Handle one user submission.
    ///
    /// Blank input is dropped and `None` is returned. Otherwise the trimmed
    /// text is shown as a user message and a background task fetches the
    /// reply and appends it. The task is detached: dropping the handle does
    /// not cancel it, and concurrent replies land in whatever order they
    /// arrive.
    pub async fn submit(&self, input: &str) -> Option<JoinHandle<()>> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        self.sink.append_message(message, MessageRole::User).await;

        let client = Arc::clone(&self.client);
        let sink = Arc::clone(&self.sink);
        let message = message.to_string();
        Some(tokio::spawn(async move {
            let reply = client.exchange(&message).await;
            sink.append_message(reply.text(), MessageRole::Bot).await;
        }))
    }
}
