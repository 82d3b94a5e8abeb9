use std::convert::Infallible;

use serde::Deserialize;
use serde_json::json;
use warp::http::StatusCode;
use warp::reply;

use crate::scanner::ScanError;
use crate::store::{OpportunityFilter, PurchaseUpdate, StoreError};
use crate::strategy::{RiskLevel, Strategy};

use super::AppContext;

type JsonReply = reply::WithStatus<reply::Json>;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityQuery {
    #[serde(rename = "type")]
    pub strategy: Option<String>,
    pub risk: Option<String>,
    pub min_profit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateListingRequest {
    pub opportunity_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub opportunity_id: String,
    pub purchase_price: f64,
    pub notes: Option<String>,
}

pub async fn health(ctx: AppContext) -> Result<JsonReply, Infallible> {
    let status = ctx.health.get_status().await;
    Ok(ok_json(json!(status)))
}

pub async fn list_opportunities(
    query: OpportunityQuery,
    ctx: AppContext,
) -> Result<JsonReply, Infallible> {
    let mut filter = OpportunityFilter {
        min_profit: query.min_profit,
        ..Default::default()
    };

    // A filter value that parses to nothing can never match anything.
    if let Some(raw) = query.strategy.as_deref() {
        match raw.parse::<Strategy>() {
            Ok(strategy) => filter.strategy = Some(strategy),
            Err(()) => return Ok(empty_opportunity_page()),
        }
    }
    if let Some(raw) = query.risk.as_deref() {
        match raw.parse::<RiskLevel>() {
            Ok(risk) => filter.risk = Some(risk),
            Err(()) => return Ok(empty_opportunity_page()),
        }
    }

    let opportunities = ctx.opportunities.list(&filter).await;
    Ok(ok_json(json!({
        "success": true,
        "count": opportunities.len(),
        "opportunities": opportunities,
    })))
}

pub async fn get_opportunity(id: String, ctx: AppContext) -> Result<JsonReply, Infallible> {
    match ctx.opportunities.get(&id).await {
        Ok(opportunity) => Ok(ok_json(json!({
            "success": true,
            "opportunity": opportunity,
        }))),
        Err(e) => Ok(store_error_reply(&e)),
    }
}

pub async fn trigger_scan(ctx: AppContext) -> Result<JsonReply, Infallible> {
    match ctx.scanner.run_scan().await {
        Ok(fresh) => Ok(ok_json(json!({
            "success": true,
            "message": format!("Found {} new opportunities", fresh.len()),
            "opportunities": fresh,
        }))),
        Err(e @ ScanError::AlreadyRunning) => Ok(error_reply(StatusCode::CONFLICT, &e.to_string())),
    }
}

pub async fn generate_listing(
    request: GenerateListingRequest,
    ctx: AppContext,
) -> Result<JsonReply, Infallible> {
    let opportunity = match ctx.opportunities.get(&request.opportunity_id).await {
        Ok(opportunity) => opportunity,
        Err(e) => return Ok(store_error_reply(&e)),
    };

    match ctx.generator.compose(&opportunity).await {
        Ok(listing) => Ok(ok_json(json!({
            "success": true,
            "listing": listing,
        }))),
        Err(e) => Ok(error_reply(StatusCode::BAD_GATEWAY, &e.to_string())),
    }
}

pub async fn create_purchase(
    request: CreatePurchaseRequest,
    ctx: AppContext,
) -> Result<JsonReply, Infallible> {
    match ctx
        .purchases
        .create(
            &request.opportunity_id,
            request.purchase_price,
            request.notes,
        )
        .await
    {
        Ok(purchase) => Ok(ok_json(json!({ "success": true, "purchase": purchase }))),
        Err(e) => Ok(store_error_reply(&e)),
    }
}

pub async fn list_purchases(ctx: AppContext) -> Result<JsonReply, Infallible> {
    let purchases = ctx.purchases.all().await;
    Ok(ok_json(json!({ "success": true, "purchases": purchases })))
}

pub async fn update_purchase(
    id: String,
    update: PurchaseUpdate,
    ctx: AppContext,
) -> Result<JsonReply, Infallible> {
    match ctx.purchases.update(&id, update).await {
        Ok(purchase) => Ok(ok_json(json!({ "success": true, "purchase": purchase }))),
        Err(e) => Ok(store_error_reply(&e)),
    }
}

pub async fn stats(ctx: AppContext) -> Result<JsonReply, Infallible> {
    let report = ctx.stats.summary().await;
    Ok(ok_json(json!({ "success": true, "stats": report })))
}

pub async fn test_email(ctx: AppContext) -> Result<JsonReply, Infallible> {
    match ctx.dispatcher.send_test().await {
        Ok(()) => Ok(ok_json(json!({
            "success": true,
            "message": "Test email sent",
        }))),
        Err(e) => Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("{:#}", e),
        )),
    }
}

pub async fn test_ebay(ctx: AppContext) -> Result<JsonReply, Infallible> {
    match ctx.marketplace.probe().await {
        Ok(count) => Ok(ok_json(json!({
            "success": true,
            "message": "eBay API is working!",
            "itemCount": count,
        }))),
        Err(e) => Ok(error_reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("{:#}", e),
        )),
    }
}

fn ok_json(value: serde_json::Value) -> JsonReply {
    reply::with_status(reply::json(&value), StatusCode::OK)
}

fn error_reply(status: StatusCode, message: &str) -> JsonReply {
    reply::with_status(
        reply::json(&json!({ "success": false, "error": message })),
        status,
    )
}

fn empty_opportunity_page() -> JsonReply {
    ok_json(json!({
        "success": true,
        "count": 0,
        "opportunities": [],
    }))
}

fn store_error_reply(error: &StoreError) -> JsonReply {
    let status = match error {
        StoreError::OpportunityNotFound(_) | StoreError::PurchaseNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        _ => StatusCode::BAD_REQUEST,
    };
    error_reply(status, &error.to_string())
}
