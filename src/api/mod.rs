pub mod ebay;
pub mod listing_gen;
pub mod market_data;
pub mod types;

pub use ebay::{EbayClient, ListingSource};
pub use listing_gen::{ClaudeClient, GeneratedListing, GenerationError, ListingGenerator};
pub use market_data::{MarketDataProvider, StubMarketDataProvider};
pub use types::*;
