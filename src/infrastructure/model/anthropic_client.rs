use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::shared::config::ModelSettings;
use crate::shared::errors::VerificationError;
use super::SearchModel;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const WEB_SEARCH_TOOL: &str = "web_search_20250305";

/// Messages API response, only the parts we read
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// One content block; tool-use and search-result blocks carry no `text`
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

/// Anthropic Messages API client with the server-side web search tool enabled
pub struct AnthropicSearchClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_searches: Option<u32>,
}

impl AnthropicSearchClient {
    pub fn new(api_key: impl Into<String>, settings: &ModelSettings) -> Result<Self, VerificationError> {
        let http_client = Client::builder()
            .user_agent(concat!("subsfly/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: settings.model.clone(),
            max_searches: settings.max_searches,
        })
    }

    fn request_body(&self, prompt: &str, max_tokens: u32) -> Value {
        let mut tool = json!({ "type": WEB_SEARCH_TOOL, "name": "web_search" });
        if let Some(max_uses) = self.max_searches {
            tool["max_uses"] = json!(max_uses);
        }

        json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "tools": [tool],
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

#[async_trait]
impl SearchModel for AnthropicSearchClient {
    async fn search(&self, prompt: &str, max_tokens: u32) -> Result<Vec<String>, VerificationError> {
        let url = format!("{}/v1/messages", self.base_url);
        info!("🔍 Querying {} with web search (max_tokens={})", self.model, max_tokens);

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(prompt, max_tokens))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VerificationError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let message: MessagesResponse = response.json().await?;
        let texts = extract_texts(message);
        debug!("Model answered with {} text block(s)", texts.len());

        if texts.is_empty() {
            return Err(VerificationError::EmptyResponse);
        }
        Ok(texts)
    }
}

fn extract_texts(message: MessagesResponse) -> Vec<String> {
    message
        .content
        .into_iter()
        .filter_map(|block| match block.kind.as_str() {
            "text" => block.text,
            _ => None,
        })
        .collect()
}
