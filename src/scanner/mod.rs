pub mod catalog;
pub mod opportunity_scanner;
pub mod scheduler;

pub use catalog::{default_catalog, SearchTask};
pub use opportunity_scanner::{OpportunityScanner, ScanError};
pub use scheduler::ScanScheduler;
