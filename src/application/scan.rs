//! Full scan: verify every category, report, notify, record history

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::application::verifier::{CategoryOutcome, CategoryVerifier};
use crate::infrastructure::model::SearchModel;
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::storage::HistoryStore;
use crate::report::PriceReport;
use crate::shared::config::Settings;
use crate::shared::types::{Catalog, RunRecord, ScanSummary};
use crate::shared::utils::format_price;

pub struct PriceScan {
    settings: Settings,
    verifier: CategoryVerifier,
    notifier: Arc<dyn Notifier>,
    history: HistoryStore,
}

impl PriceScan {
    pub fn new(settings: Settings, model: Arc<dyn SearchModel>, notifier: Arc<dyn Notifier>) -> Self {
        let verifier = CategoryVerifier::new(model, settings.scan.market.clone(), settings.model.max_tokens);
        let history = HistoryStore::new(settings.paths.history.clone());
        Self {
            settings,
            verifier,
            notifier,
            history,
        }
    }

    /// One linear pass over the catalog. Only history persistence can fail the run.
    pub async fn run(&self, catalog: &Catalog) -> Result<ScanSummary> {
        info!("🚀 SubsFly price intelligence: {} categories", catalog.categories.len());

        let mut summary = ScanSummary {
            categories: catalog.categories.len(),
            platforms: catalog.platform_count(),
            ..Default::default()
        };
        let delay = Duration::from_millis(self.settings.scan.category_delay_ms);

        for category in &catalog.categories {
            info!(
                "{} Verifying {}... ({} platforms)",
                category.icon,
                category.name,
                category.platforms.len()
            );

            match self.verifier.verify(&category.name, &category.platforms).await {
                CategoryOutcome::Verified {
                    changes,
                    new_plans,
                    discarded,
                } => {
                    if changes.is_empty() {
                        info!("   ✓ No changes");
                    }
                    for change in &changes {
                        info!(
                            "   ⚠️ {}: {}€ → {}€",
                            change.name,
                            format_price(change.old_price),
                            format_price(change.new_price)
                        );
                    }
                    if discarded > 0 {
                        warn!("   {} malformed entries discarded for {}", discarded, category.name);
                    }
                    summary.changes.extend(changes);
                    summary.new_plans.extend(new_plans);
                }
                CategoryOutcome::Failed { reason } => {
                    error!("❌ Error in {}: {}", category.name, reason);
                    summary.failed_categories.push(category.name.clone());
                }
            }

            // Pace calls to the model API
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!("📊 Summary: {} changes detected", summary.changes.len());
        if !summary.failed_categories.is_empty() {
            warn!("Categories not verified: {}", summary.failed_categories.join(", "));
        }

        let message = PriceReport::new(
            &summary.changes,
            &summary.new_plans,
            summary.categories,
            summary.platforms,
        )
        .with_failed_categories(&summary.failed_categories)
        .render(&self.settings.report);

        info!("📤 Sending report to Telegram...");
        summary.notified = self.notifier.send(&message).await;
        if summary.notified {
            info!("✅ Report delivered");
        } else {
            error!("❌ Report delivery failed");
        }

        let record = RunRecord::now(summary.changes.len(), summary.platforms);
        self.history
            .append(record)
            .with_context(|| format!("recording run in {}", self.history.path().display()))?;

        info!("✅ Verification complete");
        Ok(summary)
    }
}
