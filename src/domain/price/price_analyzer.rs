//! Price diff engine

use crate::shared::types::PriceChange;
use crate::shared::utils::calculate_percentage_change;

/// Outcome of comparing one registered price with the reported one
#[derive(Debug, Clone, PartialEq)]
pub enum PriceDiff {
    Unchanged,
    Changed(PriceChange),
    /// Registered price is zero, so no percentage can be computed
    ZeroBaseline,
}

/// Compares registered and reported prices
pub struct PriceAnalyzer;

impl PriceAnalyzer {
    pub fn diff(name: &str, category: &str, old_price: f64, new_price: f64) -> PriceDiff {
        if !old_price.is_finite() || !new_price.is_finite() || old_price == new_price {
            return PriceDiff::Unchanged;
        }

        let Some(change_percent) = calculate_percentage_change(old_price, new_price) else {
            return PriceDiff::ZeroBaseline;
        };

        PriceDiff::Changed(PriceChange {
            name: name.to_string(),
            category: category.to_string(),
            old_price,
            new_price,
            change_amount: new_price - old_price,
            change_percent,
            is_increase: new_price > old_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(diff: PriceDiff) -> PriceChange {
        match diff {
            PriceDiff::Changed(change) => change,
            other => panic!("expected a change, got {:?}", other),
        }
    }

    #[test]
    fn test_price_increase() {
        let change = changed(PriceAnalyzer::diff("Netflix", "Streaming", 12.99, 15.99));
        assert_eq!(change.name, "Netflix");
        assert_eq!(change.category, "Streaming");
        assert!((change.change_amount - 3.0).abs() < 1e-9);
        assert!((change.change_percent - 23.094688221709).abs() < 1e-6);
        assert!(change.is_increase);
    }

    #[test]
    fn test_price_decrease() {
        let change = changed(PriceAnalyzer::diff("Spotify", "Music", 10.99, 9.99));
        assert!((change.change_amount + 1.0).abs() < 1e-9);
        assert!(change.change_percent < 0.0);
        assert!(!change.is_increase);
    }

    #[test]
    fn test_equal_prices_are_unchanged() {
        assert_eq!(PriceAnalyzer::diff("Max", "Streaming", 9.99, 9.99), PriceDiff::Unchanged);
    }

    #[test]
    fn test_zero_baseline_is_skipped() {
        assert_eq!(PriceAnalyzer::diff("Free", "Streaming", 0.0, 4.99), PriceDiff::ZeroBaseline);
    }

    #[test]
    fn test_non_finite_prices_are_ignored() {
        assert_eq!(PriceAnalyzer::diff("X", "Y", f64::NAN, 4.99), PriceDiff::Unchanged);
        assert_eq!(PriceAnalyzer::diff("X", "Y", 4.99, f64::INFINITY), PriceDiff::Unchanged);
    }

    #[test]
    fn test_change_matches_arithmetic_across_pairs() {
        let pairs = [(1.0, 2.0), (5.49, 4.99), (100.0, 100.01), (7.0, 0.0)];
        for (old, new) in pairs {
            let change = changed(PriceAnalyzer::diff("P", "C", old, new));
            assert!((change.change_amount - (new - old)).abs() < 1e-9);
            assert!((change.change_percent - (new - old) / old * 100.0).abs() < 1e-9);
            assert_eq!(change.is_increase, new > old);
        }
    }
}
