use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::alert_log::AlertLog;
use super::opportunities::OpportunityStore;
use super::purchases::{PurchaseStatus, PurchaseTracker};

/// Confidence at or above which an opportunity counts as high confidence.
const HIGH_CONFIDENCE_FLOOR: u8 = 85;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub opportunities: OpportunityStats,
    pub purchases: PurchaseStats,
    pub alerts: AlertStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityStats {
    pub total: usize,
    pub avg_profit: i64,
    pub high_confidence: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseStats {
    pub total: usize,
    pub sold: usize,
    pub total_profit: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub sent: usize,
    pub last_sent: Option<DateTime<Utc>>,
}

/// Computes dashboard aggregates across the three stores on demand.
pub struct StatsReporter {
    opportunities: Arc<OpportunityStore>,
    purchases: Arc<PurchaseTracker>,
    alerts: Arc<AlertLog>,
}

impl StatsReporter {
    pub fn new(
        opportunities: Arc<OpportunityStore>,
        purchases: Arc<PurchaseTracker>,
        alerts: Arc<AlertLog>,
    ) -> Self {
        Self {
            opportunities,
            purchases,
            alerts,
        }
    }

    pub async fn summary(&self) -> StatsReport {
        let opportunities = self.opportunities.snapshot().await;
        let purchases = self.purchases.all().await;

        let total = opportunities.len();
        let avg_profit = if total == 0 {
            0
        } else {
            let sum: i64 = opportunities.iter().map(|o| o.projection.net_profit).sum();
            (sum as f64 / total as f64).round() as i64
        };
        let high_confidence = opportunities
            .iter()
            .filter(|o| o.projection.confidence >= HIGH_CONFIDENCE_FLOOR)
            .count();

        let sold = purchases
            .iter()
            .filter(|p| p.status == PurchaseStatus::Sold);
        let total_profit: f64 = sold
            .clone()
            .filter_map(|p| p.sale_price.map(|sale| sale - p.purchase_price))
            .sum();

        StatsReport {
            opportunities: OpportunityStats {
                total,
                avg_profit,
                high_confidence,
            },
            purchases: PurchaseStats {
                total: purchases.len(),
                sold: sold.count(),
                total_profit: total_profit.round() as i64,
            },
            alerts: AlertStats {
                sent: self.alerts.len().await,
                last_sent: self.alerts.last_sent_at().await,
            },
        }
    }
}
