pub mod anthropic_client;
pub mod response;

use async_trait::async_trait;

use crate::shared::errors::VerificationError;

pub use anthropic_client::AnthropicSearchClient;
pub use response::{parse_report, ModelReport, PriceCheck};

/// Language model with a web-search capability
#[async_trait]
pub trait SearchModel: Send + Sync {
    /// Run `prompt` with web search enabled, returning the text blocks of the answer in order
    async fn search(&self, prompt: &str, max_tokens: u32) -> Result<Vec<String>, VerificationError>;
}
