pub mod telegram;

use async_trait::async_trait;

pub use telegram::TelegramNotifier;

/// Delivery channel for the scan report
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message`; failures are reported as `false`, never raised
    async fn send(&self, message: &str) -> bool;
}
