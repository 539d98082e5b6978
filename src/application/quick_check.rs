//! Ad-hoc lookup of every current plan of a single platform

use std::sync::Arc;

use crate::infrastructure::model::SearchModel;
use crate::shared::errors::VerificationError;

pub const USAGE: &str = "Uso: quick_check \"Nombre de plataforma\"\nEjemplo: quick_check \"Netflix\"";

pub struct QuickLookup {
    model: Arc<dyn SearchModel>,
    market: String,
    max_tokens: u32,
}

impl QuickLookup {
    pub fn new(model: Arc<dyn SearchModel>, market: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model,
            market: market.into(),
            max_tokens,
        }
    }

    pub fn build_prompt(&self, platform: &str) -> String {
        format!(
            "Busca los precios actuales de {} en {}. Lista todos los planes con precios mensuales y anuales.",
            platform, self.market
        )
    }

    pub fn progress_line(&self, platform: &str) -> String {
        format!("🔍 Buscando precios de {} en {}...", platform, self.market)
    }

    /// Raw text blocks of the model's answer, unparsed
    pub async fn lookup(&self, platform: &str) -> Result<Vec<String>, VerificationError> {
        self.model.search(&self.build_prompt(platform), self.max_tokens).await
    }
}
