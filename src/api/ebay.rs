use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::core::config::EbayConfig;

use super::types::{FindingItem, FindingResponse, KeywordProbeResponse, RawListing};

const SERVICE_VERSION: &str = "1.0.0";
const PAGE_SIZE: &str = "100";
const SORT_ORDER: &str = "PricePlusShippingLowest";

/// Anything that can turn a keyword query into live listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Searches active listings inside a price band, cheapest first.
    /// Zero matches is `Ok(vec![])`; an upstream failure is an `Err`.
    async fn search(
        &self,
        keywords: &str,
        price_min: f64,
        price_max: f64,
    ) -> Result<Vec<RawListing>>;
}

/// eBay Finding API client.
pub struct EbayClient {
    client: Client,
    config: EbayConfig,
}

impl EbayClient {
    pub fn new(config: EbayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn find_items(
        &self,
        keywords: &str,
        price_min: f64,
        price_max: f64,
    ) -> Result<FindingResponse> {
        let min = price_min.to_string();
        let max = price_max.to_string();

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("OPERATION-NAME", "findItemsAdvanced"),
                ("SERVICE-VERSION", SERVICE_VERSION),
                ("SECURITY-APPNAME", self.config.app_id.as_str()),
                ("RESPONSE-DATA-FORMAT", "JSON"),
                ("REST-PAYLOAD", "true"),
                ("keywords", keywords),
                ("paginationInput.entriesPerPage", PAGE_SIZE),
                ("sortOrder", SORT_ORDER),
                ("itemFilter(0).name", "MinPrice"),
                ("itemFilter(0).value", min.as_str()),
                ("itemFilter(1).name", "MaxPrice"),
                ("itemFilter(1).value", max.as_str()),
                ("itemFilter(2).name", "ListingType"),
                ("itemFilter(2).value", "AuctionWithBIN"),
                ("itemFilter(3).name", "Condition"),
                ("itemFilter(3).value", "New"),
                ("itemFilter(4).name", "HideDuplicateItems"),
                ("itemFilter(4).value", "true"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Cheap connectivity check: a one-item keyword search. Returns the
    /// total match count the API reports.
    pub async fn probe(&self) -> Result<u64> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("OPERATION-NAME", "findItemsByKeywords"),
                ("SERVICE-VERSION", SERVICE_VERSION),
                ("SECURITY-APPNAME", self.config.app_id.as_str()),
                ("RESPONSE-DATA-FORMAT", "JSON"),
                ("REST-PAYLOAD", "true"),
                ("keywords", "pokemon"),
                ("paginationInput.entriesPerPage", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let probe: KeywordProbeResponse = response.json().await?;
        let page = probe
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Finding API returned an empty response"))?;
        if !page.succeeded() {
            return Err(anyhow!("Finding API reported ack {:?}", page.ack));
        }

        let count = page
            .search_result
            .first()
            .and_then(|result| result.count.parse().ok())
            .unwrap_or(0);
        Ok(count)
    }
}

#[async_trait]
impl ListingSource for EbayClient {
    async fn search(
        &self,
        keywords: &str,
        price_min: f64,
        price_max: f64,
    ) -> Result<Vec<RawListing>> {
        let response = self.find_items(keywords, price_min, price_max).await?;

        let page = response
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Finding API returned an empty response"))?;
        if !page.succeeded() {
            return Err(anyhow!("Finding API reported ack {:?}", page.ack));
        }

        let listings: Vec<RawListing> = page
            .search_result
            .into_iter()
            .next()
            .map(|result| result.item)
            .unwrap_or_default()
            .into_iter()
            .filter_map(FindingItem::into_listing)
            .collect();

        debug!("🔍 eBay returned {} listings for '{}'", listings.len(), keywords);
        Ok(listings)
    }
}
