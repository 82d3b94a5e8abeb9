use crate::api::types::{MarketSnapshot, RawListing};

use super::grading::grading_potential;
use super::types::{Projection, RiskLevel, Strategy};

/// Cost model and fallback assumptions used when projecting a flip.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Per-card grading service fee (PSA bulk rate).
    pub grading_fee: f64,
    /// Inbound shipping cost per card.
    pub shipping_cost: f64,
    /// Marketplace selling fee as a fraction of the sale price.
    pub selling_fee_rate: f64,
    /// Discount applied to graded comps to sell quickly.
    pub graded_price_haircut: f64,
    /// Graded-value multiple assumed when no comps exist for a raw card.
    pub raw_fallback_multiplier: f64,
    /// Resale multiple assumed when no comps exist for a quick flip.
    pub flip_fallback_multiplier: f64,
    /// Sales volume above which a flip market counts as deep.
    pub deep_market_volume: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            grading_fee: 25.0,
            shipping_cost: 5.0,
            selling_fee_rate: 0.13,
            graded_price_haircut: 0.95,
            raw_fallback_multiplier: 2.5,
            flip_fallback_multiplier: 1.3,
            deep_market_volume: 10,
        }
    }
}

/// Turns a listing plus optional market comps into a financial projection.
#[derive(Debug, Clone)]
pub struct OpportunityAnalyzer {
    config: AnalyzerConfig,
}

impl OpportunityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn analyze(
        &self,
        listing: &RawListing,
        market: Option<&MarketSnapshot>,
        strategy: Strategy,
    ) -> Projection {
        match strategy {
            Strategy::RawGrading => self.analyze_raw_grading(listing, market),
            Strategy::QuickFlip => self.analyze_quick_flip(listing, market),
        }
    }

    fn analyze_raw_grading(
        &self,
        listing: &RawListing,
        market: Option<&MarketSnapshot>,
    ) -> Projection {
        let price = listing.current_price;
        let description = listing.description.as_deref().unwrap_or("");
        let confidence = grading_potential(&listing.title, description);

        let graded_value = market_average(market)
            .unwrap_or(price * self.config.raw_fallback_multiplier);
        let projected_sale_price = (graded_value * self.config.graded_price_haircut) as i64;

        let total_cost = price + self.config.grading_fee + self.config.shipping_cost;
        let net_revenue =
            projected_sale_price as f64 * (1.0 - self.config.selling_fee_rate);
        let margin = net_revenue - total_cost;

        let risk_level = if confidence >= 80 {
            RiskLevel::Low
        } else if confidence >= 65 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        Projection {
            current_price: price,
            projected_sale_price,
            net_profit: margin as i64,
            roi: (margin / total_cost * 100.0) as i64,
            confidence,
            risk_level,
        }
    }

    fn analyze_quick_flip(
        &self,
        listing: &RawListing,
        market: Option<&MarketSnapshot>,
    ) -> Projection {
        let price = listing.current_price;

        let projected_sale_price = market_average(market)
            .unwrap_or(price * self.config.flip_fallback_multiplier)
            as i64;

        let total_cost = price + self.config.shipping_cost;
        let net_revenue =
            projected_sale_price as f64 * (1.0 - self.config.selling_fee_rate);
        let margin = net_revenue - total_cost;

        let deep_market = market
            .map(|m| m.sales_volume > self.config.deep_market_volume)
            .unwrap_or(false);
        let confidence = if deep_market { 85 } else { 70 };

        let risk_level = if confidence >= 80 {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        };

        Projection {
            current_price: price,
            projected_sale_price,
            net_profit: margin as i64,
            roi: (margin / total_cost * 100.0) as i64,
            confidence,
            risk_level,
        }
    }
}

// Comps with a zero average are placeholders, not real data.
fn market_average(market: Option<&MarketSnapshot>) -> Option<f64> {
    market.map(|m| m.avg_price).filter(|avg| *avg > 0.0)
}
