use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::types::RawListing;
use crate::strategy::{Category, Projection, RiskLevel, Strategy};

use super::StoreError;

/// A listing that cleared the profit and confidence thresholds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    /// Marketplace item id. Doubles as the dedup key.
    pub id: String,
    #[serde(rename = "type")]
    pub strategy: Strategy,
    #[serde(flatten)]
    pub category: Category,
    pub title: String,
    pub item_url: String,
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub projection: Projection,
    pub discovered_at: DateTime<Utc>,
    /// The search keywords that surfaced this listing.
    pub keywords: String,
}

impl Opportunity {
    pub fn from_listing(
        listing: RawListing,
        strategy: Strategy,
        category: Category,
        keywords: &str,
        projection: Projection,
    ) -> Self {
        Self {
            id: listing.item_id,
            strategy,
            category,
            title: listing.title,
            item_url: listing.item_url,
            image_url: listing.image_url,
            projection,
            discovered_at: Utc::now(),
            keywords: keywords.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub strategy: Option<Strategy>,
    pub risk: Option<RiskLevel>,
    pub min_profit: Option<i64>,
}

impl OpportunityFilter {
    fn matches(&self, opportunity: &Opportunity) -> bool {
        if let Some(strategy) = self.strategy {
            if opportunity.strategy != strategy {
                return false;
            }
        }
        if let Some(risk) = self.risk {
            if opportunity.projection.risk_level != risk {
                return false;
            }
        }
        if let Some(min_profit) = self.min_profit {
            if opportunity.projection.net_profit < min_profit {
                return false;
            }
        }
        true
    }
}

/// In-memory opportunity store. Discovery order is preserved; queries get
/// their own sorted copies.
pub struct OpportunityStore {
    opportunities: Arc<RwLock<Vec<Opportunity>>>,
}

impl OpportunityStore {
    pub fn new() -> Self {
        Self {
            opportunities: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Appends candidates that were not seen before and returns them.
    /// Dedup and append happen under one write lock so a concurrent reader
    /// never observes a half-applied batch.
    pub async fn insert_new(&self, candidates: Vec<Opportunity>) -> Vec<Opportunity> {
        let mut opportunities = self.opportunities.write().await;
        let mut seen: HashSet<String> =
            opportunities.iter().map(|o| o.id.clone()).collect();

        let mut fresh = Vec::new();
        for candidate in candidates {
            if seen.insert(candidate.id.clone()) {
                opportunities.push(candidate.clone());
                fresh.push(candidate);
            } else {
                debug!("Skipping already-tracked listing {}", candidate.id);
            }
        }
        fresh
    }

    pub async fn get(&self, id: &str) -> Result<Opportunity, StoreError> {
        self.opportunities
            .read()
            .await
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| StoreError::OpportunityNotFound(id.to_string()))
    }

    /// Matching opportunities, most profitable first.
    pub async fn list(&self, filter: &OpportunityFilter) -> Vec<Opportunity> {
        let mut matches: Vec<Opportunity> = self
            .opportunities
            .read()
            .await
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.projection.net_profit.cmp(&a.projection.net_profit));
        matches
    }

    /// Everything tracked, in discovery order.
    pub async fn snapshot(&self) -> Vec<Opportunity> {
        self.opportunities.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.opportunities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.opportunities.read().await.is_empty()
    }
}
