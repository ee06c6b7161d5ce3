// src/state.rs
use std::sync::Arc;

use crate::services::knowledge::KnowledgeBase;
use crate::services::metrics_manager::MetricsManager;

pub type SharedState = Arc<AppState>;

#[derive(Debug, Default)]
pub struct AppState {
    pub knowledge: KnowledgeBase,
    pub metrics: MetricsManager,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            metrics: MetricsManager::new(),
        }
    }
}
