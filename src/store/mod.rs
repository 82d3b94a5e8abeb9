pub mod alert_log;
pub mod opportunities;
pub mod purchases;
pub mod stats;

pub use alert_log::{AlertLog, AlertRecord};
pub use opportunities::{Opportunity, OpportunityFilter, OpportunityStore};
pub use purchases::{Purchase, PurchaseStatus, PurchaseTracker, PurchaseUpdate};
pub use stats::{StatsReport, StatsReporter};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("opportunity not found: {0}")]
    OpportunityNotFound(String),
    #[error("purchase not found: {0}")]
    PurchaseNotFound(String),
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: PurchaseStatus,
        to: PurchaseStatus,
    },
    #[error("a sale price is required to mark a purchase sold")]
    MissingSalePrice,
    #[error("sale price only applies to a sold purchase")]
    PrematureSalePrice,
    #[error("purchase price must be greater than zero")]
    InvalidPurchasePrice,
    #[error("sale price must be greater than zero")]
    InvalidSalePrice,
}
