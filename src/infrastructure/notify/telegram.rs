use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

use crate::shared::config::TelegramSettings;
use super::Notifier;

pub const PARSE_MODE: &str = "HTML";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Telegram Bot API `sendMessage` notifier
pub struct TelegramNotifier {
    http_client: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        settings: &TelegramSettings,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.base_url, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> bool {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: PARSE_MODE,
        };

        match self.http_client.post(self.endpoint()).json(&payload).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("✅ Telegram accepted the report");
                true
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                warn!("⚠️ Telegram returned {}: {}", status, body);
                false
            }
            Err(e) => {
                // The request URL embeds the bot token, keep it out of the logs
                warn!("⚠️ Telegram request failed: {}", e.to_string().replace(&self.bot_token, "***"));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_layout() {
        let settings = TelegramSettings {
            api_url: "https://api.telegram.org/".to_string(),
            timeout_secs: 30,
        };
        let notifier = TelegramNotifier::new("123:abc", "-100", &settings).unwrap();
        assert_eq!(notifier.endpoint(), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn test_payload_shape() {
        let payload = SendMessage {
            chat_id: "-100",
            text: "<b>hola</b>",
            parse_mode: PARSE_MODE,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "chat_id": "-100", "text": "<b>hola</b>", "parse_mode": "HTML" }));
    }
}
