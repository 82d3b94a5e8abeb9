pub mod analyzer;
pub mod grading;
pub mod types;

pub use analyzer::{AnalyzerConfig, OpportunityAnalyzer};
pub use grading::grading_potential;
pub use types::{Category, Projection, RiskLevel, Strategy};
