use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use subsfly::application::quick_check::USAGE;
use subsfly::infrastructure::AnthropicSearchClient;
use subsfly::shared::config::ANTHROPIC_API_KEY;
use subsfly::shared::logging::init_tracing;
use subsfly::{ConfigLoader, QuickLookup};

#[derive(Parser, Debug)]
#[command(about = "Quick price lookup for a single platform")]
struct Args {
    /// Path to a TOML settings file (optional)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Platform name, e.g. "Netflix" (several words are joined)
    platform: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("warn");
    let args = Args::parse();

    if args.platform.is_empty() {
        println!("\n{}\n", USAGE);
        return Ok(());
    }

    let api_key = match std::env::var(ANTHROPIC_API_KEY) {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("❌ Configura {}", ANTHROPIC_API_KEY);
            std::process::exit(1);
        }
    };

    let settings = ConfigLoader::load_settings(args.settings.as_deref())?;
    let platform = args.platform.join(" ");

    let model = AnthropicSearchClient::new(api_key, &settings.model).context("building model client")?;
    let lookup = QuickLookup::new(Arc::new(model), settings.scan.market.clone(), settings.model.quick_max_tokens);
    println!("\n{}\n", lookup.progress_line(&platform));

    for block in lookup.lookup(&platform).await? {
        println!("{}", block);
    }
    println!();

    Ok(())
}
