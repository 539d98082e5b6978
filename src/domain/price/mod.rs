//! Price domain - diffing registered prices against reported ones

mod price_analyzer;

pub use price_analyzer::{PriceAnalyzer, PriceDiff};
