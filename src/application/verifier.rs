//! Per-category verification against the search model

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::price::{PriceAnalyzer, PriceDiff};
use crate::infrastructure::model::{parse_report, ModelReport, SearchModel};
use crate::shared::errors::VerificationError;
use crate::shared::types::{NewPlan, PlatformRecord, PriceChange};
use crate::shared::utils::format_price;

/// Result of verifying one category. A failure never aborts the scan.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOutcome {
    Verified {
        changes: Vec<PriceChange>,
        new_plans: Vec<NewPlan>,
        discarded: usize,
    },
    Failed {
        reason: String,
    },
}

impl CategoryOutcome {
    fn empty() -> Self {
        CategoryOutcome::Verified {
            changes: Vec::new(),
            new_plans: Vec::new(),
            discarded: 0,
        }
    }
}

pub struct CategoryVerifier {
    model: Arc<dyn SearchModel>,
    market: String,
    max_tokens: u32,
}

impl CategoryVerifier {
    pub fn new(model: Arc<dyn SearchModel>, market: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model,
            market: market.into(),
            max_tokens,
        }
    }

    /// Prompt listing every priced platform in catalog order
    pub fn build_prompt(&self, category: &str, platforms: &[PlatformRecord]) -> String {
        let listing = platforms
            .iter()
            .filter(|p| p.has_price())
            .map(|p| format!("- {}: {}€/mes", p.name, format_price(p.registered_price)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Verifica los precios ACTUALES en {market} de estas suscripciones de {category}.\n\
             \n\
             PRECIOS REGISTRADOS:\n\
             {listing}\n\
             \n\
             Busca en las webs oficiales y responde SOLO en JSON:\n\
             {{\"results\": [{{\"name\": \"...\", \"registered\": 0.00, \"current\": 0.00, \"changed\": true/false}}], \"new_plans\": []}}",
            market = self.market,
        )
    }

    pub async fn verify(&self, category: &str, platforms: &[PlatformRecord]) -> CategoryOutcome {
        if !platforms.iter().any(PlatformRecord::has_price) {
            debug!("No priced platforms in {}, skipping model call", category);
            return CategoryOutcome::empty();
        }

        match self.try_verify(category, platforms).await {
            Ok(outcome) => outcome,
            Err(e) => CategoryOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    async fn try_verify(
        &self,
        category: &str,
        platforms: &[PlatformRecord],
    ) -> Result<CategoryOutcome, VerificationError> {
        let prompt = self.build_prompt(category, platforms);
        let texts = self.model.search(&prompt, self.max_tokens).await?;
        let report = parse_report(&texts.concat())?;
        Ok(Self::diff_report(category, report))
    }

    /// Turn validated model entries into change records
    pub fn diff_report(category: &str, report: ModelReport) -> CategoryOutcome {
        let mut changes = Vec::new();

        for check in report.results.iter().filter(|c| c.changed) {
            let (Some(registered), Some(current)) = (check.registered, check.current) else {
                continue;
            };

            match PriceAnalyzer::diff(&check.name, category, registered, current) {
                PriceDiff::Changed(change) => changes.push(change),
                PriceDiff::ZeroBaseline => {
                    warn!("⚠️ {}: registered price is 0, cannot compute percent", check.name);
                }
                PriceDiff::Unchanged => {}
            }
        }

        CategoryOutcome::Verified {
            changes,
            new_plans: report.new_plans,
            discarded: report.discarded,
        }
    }
}
