//! Common types used across the application

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A subscription platform with its last-known monthly price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    pub name: String,
    pub category: String,
    pub registered_price: f64,
}

impl PlatformRecord {
    pub fn new(name: impl Into<String>, category: impl Into<String>, registered_price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            registered_price,
        }
    }

    /// Platforms without a usable price are left out of verification prompts
    pub fn has_price(&self) -> bool {
        self.registered_price.is_finite() && self.registered_price != 0.0
    }
}

/// A detected discrepancy between the registered and the reported price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChange {
    pub name: String,
    pub category: String,
    pub old_price: f64,
    pub new_price: f64,
    pub change_amount: f64,
    pub change_percent: f64,
    pub is_increase: bool,
}

/// A pricing tier reported by the search that has no registered record.
///
/// The payload is schema-less; only `name` and `price` are lifted out, the
/// rest is kept verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewPlan {
    pub name: Option<String>,
    pub price: Option<String>,
    pub details: Map<String, Value>,
}

/// ISO-8601 local time with microseconds, as in existing history files
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One line of the persisted run history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    pub changes: usize,
    pub platforms: usize,
}

impl RunRecord {
    pub fn at(at: NaiveDateTime, changes: usize, platforms: usize) -> Self {
        Self {
            timestamp: at.format(RUN_TIMESTAMP_FORMAT).to_string(),
            changes,
            platforms,
        }
    }

    pub fn now(changes: usize, platforms: usize) -> Self {
        Self::at(Local::now().naive_local(), changes, platforms)
    }
}

/// Aggregated result of a full scan
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    pub changes: Vec<PriceChange>,
    pub new_plans: Vec<NewPlan>,
    pub categories: usize,
    pub platforms: usize,
    pub failed_categories: Vec<String>,
    pub notified: bool,
}

/// A group of platforms as listed in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub platforms: Vec<PlatformRecord>,
}

/// Every category to verify, in catalog order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    pub fn platform_count(&self) -> usize {
        self.categories.iter().map(|c| c.platforms.len()).sum()
    }
}
