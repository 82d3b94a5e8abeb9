use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Grading,
    Listed,
    Sold,
}

impl PurchaseStatus {
    /// The only stage a purchase may move to next. Stages are never skipped
    /// and never revisited.
    fn next(self) -> Option<PurchaseStatus> {
        match self {
            PurchaseStatus::Pending => Some(PurchaseStatus::Grading),
            PurchaseStatus::Grading => Some(PurchaseStatus::Listed),
            PurchaseStatus::Listed => Some(PurchaseStatus::Sold),
            PurchaseStatus::Sold => None,
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Grading => "grading",
            PurchaseStatus::Listed => "listed",
            PurchaseStatus::Sold => "sold",
        };
        write!(f, "{}", name)
    }
}

/// A card the operator actually bought, tracked from checkout to sale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: String,
    pub opportunity_id: String,
    pub purchase_price: f64,
    pub purchase_date: DateTime<Utc>,
    pub status: PurchaseStatus,
    pub sale_price: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update for a purchase. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseUpdate {
    pub status: Option<PurchaseStatus>,
    pub sale_price: Option<f64>,
    pub notes: Option<String>,
}

/// In-memory purchase store enforcing the forward-only lifecycle.
pub struct PurchaseTracker {
    purchases: Arc<RwLock<Vec<Purchase>>>,
}

impl PurchaseTracker {
    pub fn new() -> Self {
        Self {
            purchases: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn create(
        &self,
        opportunity_id: &str,
        purchase_price: f64,
        notes: Option<String>,
    ) -> Result<Purchase, StoreError> {
        if !purchase_price.is_finite() || purchase_price <= 0.0 {
            return Err(StoreError::InvalidPurchasePrice);
        }

        let purchase = Purchase {
            id: Uuid::new_v4().to_string(),
            opportunity_id: opportunity_id.to_string(),
            purchase_price,
            purchase_date: Utc::now(),
            status: PurchaseStatus::Pending,
            sale_price: None,
            notes,
        };

        self.purchases.write().await.push(purchase.clone());
        info!(
            "🛒 Tracking purchase {} for opportunity {}",
            purchase.id, opportunity_id
        );
        Ok(purchase)
    }

    /// Applies a partial update, all of it or none of it. Status moves must
    /// follow pending -> grading -> listed -> sold, and going to sold needs
    /// a sale price in the same request. A sale price on its own is only
    /// accepted as a correction to an already-sold purchase.
    pub async fn update(&self, id: &str, update: PurchaseUpdate) -> Result<Purchase, StoreError> {
        let mut purchases = self.purchases.write().await;
        let purchase = purchases
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::PurchaseNotFound(id.to_string()))?;

        // Validate the whole request before touching the record.
        if let Some(next) = update.status {
            if next != purchase.status && purchase.status.next() != Some(next) {
                return Err(StoreError::InvalidTransition {
                    from: purchase.status,
                    to: next,
                });
            }
            if next == PurchaseStatus::Sold
                && purchase.status != PurchaseStatus::Sold
                && update.sale_price.is_none()
            {
                return Err(StoreError::MissingSalePrice);
            }
        }
        if let Some(sale_price) = update.sale_price {
            let status_after = update.status.unwrap_or(purchase.status);
            if status_after != PurchaseStatus::Sold {
                return Err(StoreError::PrematureSalePrice);
            }
            if !sale_price.is_finite() || sale_price <= 0.0 {
                return Err(StoreError::InvalidSalePrice);
            }
        }

        if let Some(status) = update.status {
            if status != purchase.status {
                info!("📦 Purchase {} moved {} -> {}", purchase.id, purchase.status, status);
                purchase.status = status;
            }
        }
        if let Some(sale_price) = update.sale_price {
            purchase.sale_price = Some(sale_price);
        }
        if let Some(notes) = update.notes {
            purchase.notes = Some(notes);
        }

        Ok(purchase.clone())
    }

    /// All purchases in creation order.
    pub async fn all(&self) -> Vec<Purchase> {
        self.purchases.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.purchases.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.purchases.read().await.is_empty()
    }
}
