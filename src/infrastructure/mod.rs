//! Infrastructure layer - external services and persistence

pub mod model;
pub mod notify;
pub mod storage;

pub use model::{AnthropicSearchClient, SearchModel};
pub use notify::{Notifier, TelegramNotifier};
pub use storage::{CatalogLoader, HistoryStore};
