use serde::{Deserialize, Serialize};

/// A marketplace listing after the Finding API noise has been stripped away.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListing {
    pub item_id: String,
    pub title: String,
    pub description: Option<String>,
    pub current_price: f64,
    pub item_url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Recent-sales summary for a card query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub avg_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub sales_volume: u32,
    pub trend: Trend,
}

impl MarketSnapshot {
    /// Placeholder snapshot meaning "no sales history available".
    pub fn neutral() -> Self {
        Self {
            avg_price: 0.0,
            high_price: 0.0,
            low_price: 0.0,
            sales_volume: 0,
            trend: Trend::Stable,
        }
    }
}

// eBay Finding API wire format. Every field arrives wrapped in a
// single-element array, prices as strings under "__value__".

#[derive(Debug, Deserialize)]
pub struct FindingResponse {
    #[serde(rename = "findItemsAdvancedResponse", default)]
    pub responses: Vec<FindingPage>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordProbeResponse {
    #[serde(rename = "findItemsByKeywordsResponse", default)]
    pub responses: Vec<FindingPage>,
}

#[derive(Debug, Deserialize)]
pub struct FindingPage {
    #[serde(default)]
    pub ack: Vec<String>,
    #[serde(rename = "searchResult", default)]
    pub search_result: Vec<FindingSearchResult>,
}

impl FindingPage {
    pub fn succeeded(&self) -> bool {
        self.ack.first().map(|a| a == "Success").unwrap_or(false)
    }
}

#[derive(Debug, Deserialize)]
pub struct FindingSearchResult {
    #[serde(rename = "@count", default)]
    pub count: String,
    #[serde(default)]
    pub item: Vec<FindingItem>,
}

#[derive(Debug, Deserialize)]
pub struct FindingItem {
    #[serde(rename = "itemId", default)]
    pub item_id: Vec<String>,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(rename = "viewItemURL", default)]
    pub view_item_url: Vec<String>,
    #[serde(rename = "galleryURL", default)]
    pub gallery_url: Vec<String>,
    #[serde(rename = "sellingStatus", default)]
    pub selling_status: Vec<FindingSellingStatus>,
}

#[derive(Debug, Deserialize)]
pub struct FindingSellingStatus {
    #[serde(rename = "currentPrice", default)]
    pub current_price: Vec<FindingPrice>,
}

#[derive(Debug, Deserialize)]
pub struct FindingPrice {
    #[serde(rename = "@currencyId", default)]
    pub currency_id: String,
    #[serde(rename = "__value__", default)]
    pub value: String,
}

impl FindingItem {
    /// Unwraps the array-of-one envelope. Items missing an id, title or URL
    /// are unusable downstream and dropped here.
    pub fn into_listing(mut self) -> Option<RawListing> {
        let item_id = take_first(&mut self.item_id)?;
        let title = take_first(&mut self.title)?;
        let item_url = take_first(&mut self.view_item_url)?;

        let current_price = self
            .selling_status
            .first()
            .and_then(|status| status.current_price.first())
            .and_then(|price| price.value.parse::<f64>().ok())
            .unwrap_or(0.0);

        Some(RawListing {
            item_id,
            title,
            description: take_first(&mut self.description),
            current_price,
            item_url,
            image_url: take_first(&mut self.gallery_url),
        })
    }
}

fn take_first(values: &mut Vec<String>) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.swap_remove(0))
    }
}
