use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use subsfly::infrastructure::{AnthropicSearchClient, CatalogLoader, TelegramNotifier};
use subsfly::shared::logging::init_tracing;
use subsfly::{ConfigLoader, Credentials, PriceScan};

#[derive(Parser, Debug)]
#[command(version, about = "Re-verify subscription prices and report changes to Telegram")]
struct Args {
    /// Path to a TOML settings file (optional)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Catalog JSON with categories, platforms and registered prices (overrides settings)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// History JSON file (overrides settings)
    #[arg(long)]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let args = Args::parse();

    info!("==================================================");
    info!("  SUBSFLY PRICE INTELLIGENCE");
    info!("==================================================");

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // Priority: CLI args > settings file > defaults
    let mut settings = ConfigLoader::load_settings(args.settings.as_deref())?;
    if let Some(catalog) = args.catalog {
        settings.paths.catalog = catalog;
    }
    if let Some(history) = args.history {
        settings.paths.history = history;
    }

    let catalog = CatalogLoader::load(&settings.paths.catalog)?;

    let model = AnthropicSearchClient::new(credentials.anthropic_api_key.clone(), &settings.model)
        .context("building model client")?;
    let notifier = TelegramNotifier::new(
        credentials.telegram_bot_token.clone(),
        credentials.telegram_chat_id.clone(),
        &settings.telegram,
    )
    .context("building Telegram client")?;

    let scan = PriceScan::new(settings, Arc::new(model), Arc::new(notifier));
    scan.run(&catalog).await?;

    Ok(())
}
