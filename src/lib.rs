//! SubsFly - subscription price monitor
//! Re-verifies registered prices through an LLM web search and reports changes

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;
pub mod report;

// Re-export main types for convenience
pub use application::{CategoryOutcome, CategoryVerifier, PriceScan, QuickLookup};
pub use domain::price::{PriceAnalyzer, PriceDiff};
pub use report::PriceReport;
pub use shared::config::{ConfigLoader, Credentials, Settings};
pub use shared::types::{Catalog, PriceChange, ScanSummary};
