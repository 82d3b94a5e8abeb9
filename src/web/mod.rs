pub mod handlers;

use std::convert::Infallible;
use std::sync::Arc;

use warp::Filter;

use crate::alerts::AlertDispatcher;
use crate::api::ebay::EbayClient;
use crate::api::listing_gen::ListingGenerator;
use crate::core::HealthChecker;
use crate::scanner::OpportunityScanner;
use crate::store::{OpportunityStore, PurchaseTracker, StatsReporter};

/// Everything the HTTP handlers need, shared by cloning.
#[derive(Clone)]
pub struct AppContext {
    pub opportunities: Arc<OpportunityStore>,
    pub purchases: Arc<PurchaseTracker>,
    pub stats: Arc<StatsReporter>,
    pub scanner: Arc<OpportunityScanner>,
    pub dispatcher: Arc<dyn AlertDispatcher>,
    pub generator: Arc<dyn ListingGenerator>,
    pub marketplace: Arc<EbayClient>,
    pub health: Arc<HealthChecker>,
}

pub fn routes(
    ctx: AppContext,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::health);

    let list_opportunities = warp::path!("api" / "opportunities")
        .and(warp::get())
        .and(warp::query::<handlers::OpportunityQuery>())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::list_opportunities);

    let get_opportunity = warp::path!("api" / "opportunities" / String)
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::get_opportunity);

    let trigger_scan = warp::path!("api" / "scan")
        .and(warp::post())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::trigger_scan);

    let generate_listing = warp::path!("api" / "generate-listing")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::generate_listing);

    let create_purchase = warp::path!("api" / "purchases")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::create_purchase);

    let list_purchases = warp::path!("api" / "purchases")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::list_purchases);

    let update_purchase = warp::path!("api" / "purchases" / String)
        .and(warp::patch())
        .and(warp::body::json())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::update_purchase);

    let stats = warp::path!("api" / "stats")
        .and(warp::get())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::stats);

    let test_email = warp::path!("api" / "test-email")
        .and(warp::post())
        .and(with_ctx(ctx.clone()))
        .and_then(handlers::test_email);

    let test_ebay = warp::path!("api" / "test-ebay")
        .and(warp::get())
        .and(with_ctx(ctx))
        .and_then(handlers::test_ebay);

    health
        .or(list_opportunities)
        .or(get_opportunity)
        .or(trigger_scan)
        .or(generate_listing)
        .or(create_purchase)
        .or(list_purchases)
        .or(update_purchase)
        .or(stats)
        .or(test_email)
        .or(test_ebay)
}

fn with_ctx(
    ctx: AppContext,
) -> impl Filter<Extract = (AppContext,), Error = Infallible> + Clone {
    warp::any().map(move || ctx.clone())
}
