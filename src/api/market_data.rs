use anyhow::Result;
use async_trait::async_trait;

use super::types::MarketSnapshot;

/// Recent-sales lookup for a card, keyed on the search keywords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn lookup(&self, keywords: &str, title: &str) -> Result<MarketSnapshot>;
}

/// Placeholder provider until a real sales-history feed is wired in.
/// Always answers with a neutral snapshot, which the analyzer treats as
/// "no comps" and falls back to price multiples.
// TODO: integrate a real comps source (130point or PriceCharting) behind
// this trait.
pub struct StubMarketDataProvider;

#[async_trait]
impl MarketDataProvider for StubMarketDataProvider {
    async fn lookup(&self, _keywords: &str, _title: &str) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot::neutral())
    }
}
