use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How many interactions `/analytics` echoes back.
pub const RECENT_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Interaction {
    pub message: String,
    pub response: String,
    pub confidence: f64,
}

#[derive(Debug, Default, Clone, Serialize, PartialEq)]
pub struct Analytics {
    pub total_interactions: u64,
    pub average_confidence: f64,
    pub recent: Vec<Interaction>,
}

#[derive(Debug, Default)]
struct CompanyStats {
    total: u64,
    confidence_sum: f64,
    recent: Vec<Interaction>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<HashMap<String, CompanyStats>>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn record(&self, company_id: &str, interaction: Interaction) {
        let mut data = self.inner.write().await;
        let stats = data.entry(company_id.to_string()).or_default();
        stats.total += 1;
        stats.confidence_sum += interaction.confidence;
        stats.recent.push(interaction);
        if stats.recent.len() > RECENT_LIMIT {
            let overflow = stats.recent.len() - RECENT_LIMIT;
            stats.recent.drain(..overflow);
        }
    }

    pub async fn get_analytics(&self, company_id: &str) -> Analytics {
        let data = self.inner.read().await;
        match data.get(company_id) {
            Some(stats) if stats.total > 0 => Analytics {
                total_interactions: stats.total,
                average_confidence: stats.confidence_sum / stats.total as f64,
                recent: stats.recent.clone(),
            },
            _ => Analytics::default(),
        }
    }
}
