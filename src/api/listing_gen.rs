use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::config::GeneratorConfig;
use crate::store::opportunities::Opportunity;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("listing provider request failed: {0}")]
    Provider(#[from] reqwest::Error),
    #[error("listing provider returned no content")]
    EmptyResponse,
    #[error("listing provider response was not valid listing JSON: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// A ready-to-post marketplace listing draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedListing {
    pub title: String,
    pub description: String,
    pub starting_bid: f64,
    pub buy_it_now: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Drafts sale listings for opportunities the user decided to buy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingGenerator: Send + Sync {
    async fn compose(&self, opportunity: &Opportunity)
        -> Result<GeneratedListing, GenerationError>;
}

/// Listing writer backed by the Anthropic Messages API.
pub struct ClaudeClient {
    client: Client,
    config: GeneratorConfig,
}

impl ClaudeClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ListingGenerator for ClaudeClient {
    async fn compose(
        &self,
        opportunity: &Opportunity,
    ) -> Result<GeneratedListing, GenerationError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": listing_prompt(opportunity) }],
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let message: MessagesResponse = response.json().await?;
        let block = message
            .content
            .into_iter()
            .find(|block| !block.text.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        let draft: GeneratedListing = serde_json::from_str(&block.text)?;
        info!("📝 Generated a listing draft for '{}'", opportunity.title);
        Ok(draft)
    }
}

fn listing_prompt(opportunity: &Opportunity) -> String {
    format!(
        "Create an eBay listing for this collectible card:\n\n\
         Card: {}\n\
         Category: {}\n\
         Strategy: {}\n\
         Purchase Price: ${}\n\
         Target Sale Price: ${}\n\n\
         Generate:\n\
         1. An SEO-optimized title (80 characters max)\n\
         2. A compelling description that emphasizes condition and investment potential\n\
         3. A suggested starting bid and Buy It Now price\n\
         4. Search tags and keywords\n\n\
         Respond with JSON only: \
         {{\"title\": \"...\", \"description\": \"...\", \"startingBid\": 0, \
         \"buyItNow\": 0, \"tags\": [], \"keywords\": []}}",
        opportunity.title,
        opportunity.category.label(),
        opportunity.strategy.label(),
        opportunity.projection.current_price,
        opportunity.projection.projected_sale_price,
    )
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}
