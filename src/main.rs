use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{info, warn};

use cardflip_bot::alerts::{AlertDispatcher, EmailAlerter};
use cardflip_bot::api::ebay::EbayClient;
use cardflip_bot::api::listing_gen::{ClaudeClient, ListingGenerator};
use cardflip_bot::api::market_data::{MarketDataProvider, StubMarketDataProvider};
use cardflip_bot::core::logging::init_logging;
use cardflip_bot::core::{Config, HealthChecker};
use cardflip_bot::scanner::{default_catalog, OpportunityScanner, ScanScheduler};
use cardflip_bot::store::{AlertLog, OpportunityStore, PurchaseTracker, StatsReporter};
use cardflip_bot::strategy::{AnalyzerConfig, OpportunityAnalyzer};
use cardflip_bot::web::{self, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.server.log_level);

    info!(
        "🚀 Starting Card Flip Assistant v{}",
        env!("CARGO_PKG_VERSION")
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let opportunities = Arc::new(OpportunityStore::new());
    let purchases = Arc::new(PurchaseTracker::new());
    let alert_log = Arc::new(AlertLog::new());
    let stats = Arc::new(StatsReporter::new(
        opportunities.clone(),
        purchases.clone(),
        alert_log.clone(),
    ));

    let marketplace = Arc::new(EbayClient::new(config.ebay.clone()));
    let market_data: Arc<dyn MarketDataProvider> = Arc::new(StubMarketDataProvider);
    let dispatcher: Arc<dyn AlertDispatcher> =
        Arc::new(EmailAlerter::new(config.email.clone(), alert_log.clone())?);
    let generator: Arc<dyn ListingGenerator> =
        Arc::new(ClaudeClient::new(config.generator.clone()));

    let scanner = Arc::new(OpportunityScanner::new(
        marketplace.clone(),
        market_data,
        dispatcher.clone(),
        opportunities.clone(),
        OpportunityAnalyzer::new(AnalyzerConfig::default()),
        default_catalog(),
        config.scanning.clone(),
        shutdown_rx.clone(),
    ));

    let health = Arc::new(HealthChecker::new());
    health
        .update_component("marketplace_api", config.ebay.is_configured())
        .await;
    health
        .update_component("smtp", config.email.is_configured())
        .await;

    if !config.scanning.auto_scan {
        warn!("⚠️ Auto-scanning is disabled, trigger scans via POST /api/scan");
    } else if config.ebay.is_configured() {
        ScanScheduler::new(
            scanner.clone(),
            config.scanning.interval_minutes,
            shutdown_rx.clone(),
        )
        .start();
        health.update_component("scanner", true).await;
    } else {
        warn!("⚠️ eBay API credentials not configured, automatic scanning is off");
    }

    let routes = web::routes(AppContext {
        opportunities,
        purchases,
        stats,
        scanner,
        dispatcher,
        generator,
        marketplace,
        health,
    });

    let mut server_shutdown = shutdown_rx.clone();
    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(
        ([0, 0, 0, 0], config.server.port),
        async move {
            let _ = server_shutdown.changed().await;
        },
    );

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("🛑 Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    info!("✅ API server listening on {}", addr);
    server.await;

    info!("👋 Card Flip Assistant stopped");
    Ok(())
}
