use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tokio::sync::watch;
use warp::test::request;

use cardflip_bot::alerts::AlertDispatcher;
use cardflip_bot::api::ebay::{EbayClient, ListingSource};
use cardflip_bot::api::listing_gen::{GeneratedListing, GenerationError, ListingGenerator};
use cardflip_bot::api::market_data::MarketDataProvider;
use cardflip_bot::api::types::{MarketSnapshot, RawListing};
use cardflip_bot::core::config::{EbayConfig, ScanningConfig};
use cardflip_bot::core::HealthChecker;
use cardflip_bot::scanner::{OpportunityScanner, SearchTask};
use cardflip_bot::store::{
    AlertLog, Opportunity, OpportunityStore, PurchaseStatus, PurchaseTracker, PurchaseUpdate,
    StatsReporter,
};
use cardflip_bot::strategy::{
    AnalyzerConfig, Category, OpportunityAnalyzer, Projection, RiskLevel, Strategy,
};
use cardflip_bot::web::{routes, AppContext};

struct EmptySource;

#[async_trait]
impl ListingSource for EmptySource {
    async fn search(&self, _: &str, _: f64, _: f64) -> Result<Vec<RawListing>> {
        Ok(Vec::new())
    }
}

struct NoComps;

#[async_trait]
impl MarketDataProvider for NoComps {
    async fn lookup(&self, _: &str, _: &str) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot::neutral())
    }
}

struct StubDispatcher {
    fail: bool,
}

#[async_trait]
impl AlertDispatcher for StubDispatcher {
    async fn notify(&self, _: &[Opportunity]) -> Result<()> {
        Ok(())
    }

    async fn send_test(&self) -> Result<()> {
        if self.fail {
            bail!("smtp connection refused");
        }
        Ok(())
    }
}

struct StubGenerator {
    fail: bool,
}

#[async_trait]
impl ListingGenerator for StubGenerator {
    async fn compose(&self, opportunity: &Opportunity) -> Result<GeneratedListing, GenerationError> {
        if self.fail {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(GeneratedListing {
            title: format!("{} - Investment Grade", opportunity.title),
            description: "Pack fresh card, ships in a top loader.".to_string(),
            starting_bid: 45.0,
            buy_it_now: 135.0,
            tags: vec!["rookie".to_string()],
            keywords: vec!["graded card".to_string()],
        })
    }
}

struct TestApp {
    ctx: AppContext,
    opportunities: Arc<OpportunityStore>,
    purchases: Arc<PurchaseTracker>,
    _shutdown_tx: watch::Sender<bool>,
}

fn app() -> TestApp {
    app_with(false, false)
}

fn app_with(generator_fails: bool, email_fails: bool) -> TestApp {
    let opportunities = Arc::new(OpportunityStore::new());
    let purchases = Arc::new(PurchaseTracker::new());
    let alert_log = Arc::new(AlertLog::new());
    let stats = Arc::new(StatsReporter::new(
        opportunities.clone(),
        purchases.clone(),
        alert_log.clone(),
    ));
    let (shutdown_tx, shutdown) = watch::channel(false);

    let scanner = Arc::new(OpportunityScanner::new(
        Arc::new(EmptySource),
        Arc::new(NoComps),
        Arc::new(StubDispatcher { fail: email_fails }),
        opportunities.clone(),
        OpportunityAnalyzer::new(AnalyzerConfig::default()),
        vec![SearchTask {
            keywords: "CJ Stroud Prizm Silver RC raw",
            strategy: Strategy::RawGrading,
            category: Category::sport("Football"),
            price_min: 50.0,
            price_max: 100.0,
        }],
        ScanningConfig {
            interval_minutes: 15,
            min_profit: 30,
            min_confidence: 70,
            auto_scan: true,
        },
        shutdown,
    ));

    // Port 9 is never listening, so the probe fails fast without leaving
    // the machine.
    let marketplace = Arc::new(EbayClient::new(EbayConfig {
        app_id: String::new(),
        cert_id: String::new(),
        dev_id: String::new(),
        endpoint: "http://127.0.0.1:9/services/search/FindingService/v1".to_string(),
    }));

    let ctx = AppContext {
        opportunities: opportunities.clone(),
        purchases: purchases.clone(),
        stats,
        scanner,
        dispatcher: Arc::new(StubDispatcher { fail: email_fails }),
        generator: Arc::new(StubGenerator {
            fail: generator_fails,
        }),
        marketplace,
        health: Arc::new(HealthChecker::new()),
    };

    TestApp {
        ctx,
        opportunities,
        purchases,
        _shutdown_tx: shutdown_tx,
    }
}

fn opportunity(
    id: &str,
    strategy: Strategy,
    risk: RiskLevel,
    net_profit: i64,
    confidence: u8,
) -> Opportunity {
    Opportunity {
        id: id.to_string(),
        strategy,
        category: Category::sport("Football"),
        title: format!("Test card {}", id),
        item_url: format!("https://www.ebay.com/itm/{}", id),
        image_url: None,
        projection: Projection {
            current_price: 60.0,
            projected_sale_price: 142,
            net_profit,
            roi: 37,
            confidence,
            risk_level: risk,
        },
        discovered_at: Utc::now(),
        keywords: "CJ Stroud Prizm Silver RC raw".to_string(),
    }
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("response body is JSON")
}

#[tokio::test]
async fn health_reports_degraded_without_credentials() {
    let app = app();
    let api = routes(app.ctx);

    let res = request().path("/health").reply(&api).await;
    assert_eq!(res.status(), 200);

    let body = parse(res.body());
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["components"]["marketplace_api"], false);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn opportunity_listing_sorts_and_filters() {
    let app = app();
    app.opportunities
        .insert_new(vec![
            opportunity("o1", Strategy::RawGrading, RiskLevel::Low, 40, 90),
            opportunity("o2", Strategy::RawGrading, RiskLevel::Medium, 90, 95),
            opportunity("o3", Strategy::QuickFlip, RiskLevel::High, 60, 75),
        ])
        .await;
    let api = routes(app.ctx);

    let res = request().path("/api/opportunities").reply(&api).await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);
    // Most profitable first.
    assert_eq!(body["opportunities"][0]["id"], "o2");
    assert_eq!(body["opportunities"][1]["id"], "o3");
    assert_eq!(body["opportunities"][2]["id"], "o1");

    let res = request()
        .path("/api/opportunities?minProfit=50")
        .reply(&api)
        .await;
    assert_eq!(parse(res.body())["count"], 2);

    let res = request()
        .path("/api/opportunities?type=quick_flip")
        .reply(&api)
        .await;
    let body = parse(res.body());
    assert_eq!(body["count"], 1);
    assert_eq!(body["opportunities"][0]["id"], "o3");

    let res = request()
        .path("/api/opportunities?risk=low")
        .reply(&api)
        .await;
    let body = parse(res.body());
    assert_eq!(body["count"], 1);
    assert_eq!(body["opportunities"][0]["id"], "o1");

    // A risk level nothing ever carries matches nothing.
    let res = request()
        .path("/api/opportunities?risk=mild")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse(res.body())["count"], 0);
}

#[tokio::test]
async fn opportunity_detail_uses_the_wire_shape() {
    let app = app();
    app.opportunities
        .insert_new(vec![opportunity(
            "o1",
            Strategy::RawGrading,
            RiskLevel::Low,
            40,
            90,
        )])
        .await;
    let api = routes(app.ctx);

    let res = request().path("/api/opportunities/o1").reply(&api).await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["opportunity"]["id"], "o1");
    assert_eq!(body["opportunity"]["type"], "raw_grading");
    assert_eq!(body["opportunity"]["sport"], "Football");
    assert_eq!(body["opportunity"]["netProfit"], 40);
    assert_eq!(body["opportunity"]["riskLevel"], "low");

    let res = request().path("/api/opportunities/zz").reply(&api).await;
    assert_eq!(res.status(), 404);
    let body = parse(res.body());
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn manual_scan_reports_fresh_finds() {
    let app = app();
    let api = routes(app.ctx);

    let res = request().method("POST").path("/api/scan").reply(&api).await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Found 0 new opportunities");
    assert_eq!(body["opportunities"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn purchase_lifecycle_over_the_api() {
    let app = app();
    let api = routes(app.ctx);

    let res = request()
        .method("POST")
        .path("/api/purchases")
        .json(&json!({ "opportunityId": "o1", "purchasePrice": 54.95 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["purchase"]["opportunityId"], "o1");
    assert_eq!(body["purchase"]["status"], "pending");
    assert!(body["purchase"]["salePrice"].is_null());
    let id = body["purchase"]["id"].as_str().unwrap().to_string();

    let res = request().path("/api/purchases").reply(&api).await;
    assert_eq!(parse(res.body())["purchases"].as_array().unwrap().len(), 1);

    let res = request()
        .method("PATCH")
        .path(&format!("/api/purchases/{}", id))
        .json(&json!({ "status": "grading" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse(res.body())["purchase"]["status"], "grading");

    // Jumping straight to sold skips the listed step.
    let res = request()
        .method("PATCH")
        .path(&format!("/api/purchases/{}", id))
        .json(&json!({ "status": "sold", "salePrice": 150.0 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 400);
    assert_eq!(parse(res.body())["success"], false);

    let res = request()
        .method("PATCH")
        .path(&format!("/api/purchases/{}", id))
        .json(&json!({ "status": "listed" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);

    let res = request()
        .method("PATCH")
        .path(&format!("/api/purchases/{}", id))
        .json(&json!({ "status": "sold", "salePrice": 150.0 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["purchase"]["status"], "sold");
    assert_eq!(body["purchase"]["salePrice"], 150.0);
}

#[tokio::test]
async fn purchase_validation_maps_to_client_errors() {
    let app = app();
    let api = routes(app.ctx);

    let res = request()
        .method("POST")
        .path("/api/purchases")
        .json(&json!({ "opportunityId": "o1", "purchasePrice": 0.0 }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 400);
    let body = parse(res.body());
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("greater than zero"));

    let res = request()
        .method("PATCH")
        .path("/api/purchases/nope")
        .json(&json!({ "status": "grading" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn generated_listing_uses_the_stored_card() {
    let app = app();
    app.opportunities
        .insert_new(vec![opportunity(
            "o1",
            Strategy::RawGrading,
            RiskLevel::Low,
            76,
            100,
        )])
        .await;
    let api = routes(app.ctx);

    let res = request()
        .method("POST")
        .path("/api/generate-listing")
        .json(&json!({ "opportunityId": "o1" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    let body = parse(res.body());
    assert_eq!(body["listing"]["title"], "Test card o1 - Investment Grade");
    assert_eq!(body["listing"]["startingBid"], 45.0);

    let res = request()
        .method("POST")
        .path("/api/generate-listing")
        .json(&json!({ "opportunityId": "zz" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn generator_failures_come_back_as_bad_gateway() {
    let app = app_with(true, false);
    app.opportunities
        .insert_new(vec![opportunity(
            "o1",
            Strategy::RawGrading,
            RiskLevel::Low,
            76,
            100,
        )])
        .await;
    let api = routes(app.ctx);

    let res = request()
        .method("POST")
        .path("/api/generate-listing")
        .json(&json!({ "opportunityId": "o1" }))
        .reply(&api)
        .await;
    assert_eq!(res.status(), 502);
    assert_eq!(parse(res.body())["success"], false);
}

#[tokio::test]
async fn stats_reflect_store_contents() {
    let app = app();
    app.opportunities
        .insert_new(vec![
            opportunity("o1", Strategy::RawGrading, RiskLevel::Low, 40, 90),
            opportunity("o2", Strategy::RawGrading, RiskLevel::Medium, 65, 75),
        ])
        .await;

    let kept = app.purchases.create("o1", 54.95, None).await.unwrap();
    for step in [
        PurchaseStatus::Grading,
        PurchaseStatus::Listed,
    ] {
        app.purchases
            .update(
                &kept.id,
                PurchaseUpdate {
                    status: Some(step),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }
    app.purchases
        .update(
            &kept.id,
            PurchaseUpdate {
                status: Some(PurchaseStatus::Sold),
                sale_price: Some(142.0),
                notes: None,
            },
        )
        .await
        .unwrap();

    let api = routes(app.ctx);
    let res = request().path("/api/stats").reply(&api).await;
    assert_eq!(res.status(), 200);

    let body = parse(res.body());
    let stats = &body["stats"];
    assert_eq!(stats["opportunities"]["total"], 2);
    assert_eq!(stats["opportunities"]["avgProfit"], 53);
    assert_eq!(stats["opportunities"]["highConfidence"], 1);
    assert_eq!(stats["purchases"]["total"], 1);
    assert_eq!(stats["purchases"]["sold"], 1);
    assert_eq!(stats["purchases"]["totalProfit"], 87);
    assert_eq!(stats["alerts"]["sent"], 0);
}

#[tokio::test]
async fn email_test_endpoint_reports_the_outcome() {
    let app = app();
    let api = routes(app.ctx);
    let res = request()
        .method("POST")
        .path("/api/test-email")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 200);
    assert_eq!(parse(res.body())["message"], "Test email sent");

    let app = app_with(false, true);
    let api = routes(app.ctx);
    let res = request()
        .method("POST")
        .path("/api/test-email")
        .reply(&api)
        .await;
    assert_eq!(res.status(), 500);
    assert_eq!(parse(res.body())["success"], false);
}

#[tokio::test]
async fn ebay_test_endpoint_surfaces_probe_failures() {
    let app = app();
    let api = routes(app.ctx);

    let res = request().path("/api/test-ebay").reply(&api).await;
    assert_eq!(res.status(), 500);
    assert_eq!(parse(res.body())["success"], false);
}
