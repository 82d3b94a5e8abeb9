use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

use crate::alerts::AlertDispatcher;
use crate::api::ebay::ListingSource;
use crate::api::market_data::MarketDataProvider;
use crate::core::config::ScanningConfig;
use crate::store::opportunities::{Opportunity, OpportunityStore};
use crate::strategy::OpportunityAnalyzer;

use super::catalog::SearchTask;

/// Alert floor: a fresh opportunity must clear both to be mailed out.
const ALERT_MIN_PROFIT: i64 = 50;
const ALERT_MIN_CONFIDENCE: u8 = 80;

/// Pause between search tasks so the marketplace API is not hammered.
const TASK_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("a scan is already in progress")]
    AlreadyRunning,
}

/// Walks the search catalog, scores and projects every listing, stores the
/// keepers and mails out the best of them.
pub struct OpportunityScanner {
    source: Arc<dyn ListingSource>,
    market_data: Arc<dyn MarketDataProvider>,
    dispatcher: Arc<dyn AlertDispatcher>,
    opportunities: Arc<OpportunityStore>,
    analyzer: OpportunityAnalyzer,
    catalog: Vec<SearchTask>,
    config: ScanningConfig,
    scan_guard: Mutex<()>,
    shutdown: watch::Receiver<bool>,
}

impl OpportunityScanner {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Arc<dyn ListingSource>,
        market_data: Arc<dyn MarketDataProvider>,
        dispatcher: Arc<dyn AlertDispatcher>,
        opportunities: Arc<OpportunityStore>,
        analyzer: OpportunityAnalyzer,
        catalog: Vec<SearchTask>,
        config: ScanningConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            source,
            market_data,
            dispatcher,
            opportunities,
            analyzer,
            catalog,
            config,
            scan_guard: Mutex::new(()),
            shutdown,
        }
    }

    /// Runs one full scan and returns the opportunities it added.
    ///
    /// At most one scan runs at a time; a second caller gets
    /// `ScanError::AlreadyRunning` instead of queueing. One failing search
    /// task never aborts the rest of the rotation, and a failing alert
    /// never rolls back the store.
    pub async fn run_scan(&self) -> Result<Vec<Opportunity>, ScanError> {
        let _guard = self
            .scan_guard
            .try_lock()
            .map_err(|_| ScanError::AlreadyRunning)?;

        info!(
            "🔍 Scanning {} searches for flip opportunities...",
            self.catalog.len()
        );

        let mut candidates = Vec::new();
        for (index, task) in self.catalog.iter().enumerate() {
            if *self.shutdown.borrow() {
                warn!(
                    "🛑 Shutdown requested, stopping the scan after {} of {} searches",
                    index,
                    self.catalog.len()
                );
                break;
            }

            let listings = match self
                .source
                .search(task.keywords, task.price_min, task.price_max)
                .await
            {
                Ok(listings) => listings,
                Err(e) => {
                    warn!("⚠️ Listing search failed for '{}': {:#}", task.keywords, e);
                    Vec::new()
                }
            };

            for listing in listings {
                let market = match self
                    .market_data
                    .lookup(task.keywords, &listing.title)
                    .await
                {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        warn!(
                            "⚠️ Market data lookup failed for '{}': {:#}",
                            task.keywords, e
                        );
                        None
                    }
                };

                let projection =
                    self.analyzer
                        .analyze(&listing, market.as_ref(), task.strategy);

                if projection.net_profit >= self.config.min_profit
                    && projection.confidence >= self.config.min_confidence
                {
                    candidates.push(Opportunity::from_listing(
                        listing,
                        task.strategy,
                        task.category.clone(),
                        task.keywords,
                        projection,
                    ));
                }
            }

            if index + 1 < self.catalog.len() {
                tokio::time::sleep(TASK_PAUSE).await;
            }
        }

        let fresh = self.opportunities.insert_new(candidates).await;
        if fresh.is_empty() {
            info!("ℹ️ No new opportunities found");
            return Ok(fresh);
        }
        info!("✅ Found {} new opportunities", fresh.len());

        let alert_worthy: Vec<Opportunity> = fresh
            .iter()
            .filter(|o| {
                o.projection.net_profit >= ALERT_MIN_PROFIT
                    && o.projection.confidence >= ALERT_MIN_CONFIDENCE
            })
            .cloned()
            .collect();

        if !alert_worthy.is_empty() {
            if let Err(e) = self.dispatcher.notify(&alert_worthy).await {
                error!("❌ Alert dispatch failed: {:#}", e);
            }
        }

        Ok(fresh)
    }
}
