//! Application layer - use cases and services

pub mod verifier;
pub mod scan;
pub mod quick_check;

pub use verifier::{CategoryOutcome, CategoryVerifier};
pub use scan::PriceScan;
pub use quick_check::QuickLookup;
