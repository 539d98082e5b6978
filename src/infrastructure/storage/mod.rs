//! File-backed catalog and run history

pub mod catalog;
pub mod history;

pub use catalog::CatalogLoader;
pub use history::{HistoryLog, HistoryStore};
