use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use super::opportunities::Opportunity;

/// One alert that went out, and which opportunities it covered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub sent_at: DateTime<Utc>,
    pub opportunity_count: usize,
    pub opportunity_ids: Vec<String>,
}

/// Append-only history of sent alerts.
pub struct AlertLog {
    records: Arc<RwLock<Vec<AlertRecord>>>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn record(&self, opportunities: &[Opportunity]) {
        let record = AlertRecord {
            sent_at: Utc::now(),
            opportunity_count: opportunities.len(),
            opportunity_ids: opportunities.iter().map(|o| o.id.clone()).collect(),
        };
        self.records.write().await.push(record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn last_sent_at(&self) -> Option<DateTime<Utc>> {
        self.records.read().await.last().map(|r| r.sent_at)
    }

    pub async fn all(&self) -> Vec<AlertRecord> {
        self.records.read().await.clone()
    }
}
