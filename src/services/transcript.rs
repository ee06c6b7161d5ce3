// src/services/transcript.rs
use std::{fmt::Debug, sync::Arc, time::Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{message::MessageRole, widget::MessageSink};

#[derive(Clone, Debug)]
pub struct Entry {
    pub role: MessageRole,
    pub text: String,
    pub timestamp: Instant,
}

/// In-memory display list. Append-only; lives as long as the widget.
#[derive(Clone, Default)]
pub struct Transcript {
    inner: Arc<RwLock<Vec<Entry>>>,
}

impl Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript").finish_non_exhaustive()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every entry so far, oldest first.
    pub async fn entries(&self) -> Vec<Entry> {
        self.inner.read().await.clone()
    }

    /// Texts of the entries with the given role, oldest first.
    pub async fn texts(&self, role: MessageRole) -> Vec<String> {
        let guard = self.inner.read().await;
        guard
            .iter()
            .filter(|e| e.role == role)
            .map(|e| e.text.clone())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl MessageSink for Transcript {
    async fn append_message(&self, text: &str, role: MessageRole) {
        let mut guard = self.inner.write().await;
        guard.push(Entry {
            role,
            text: text.to_string(),
            timestamp: Instant::now(),
        });
    }
}
