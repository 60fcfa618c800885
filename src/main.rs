// This is the entry point of the review pipeline.
//
// **Architecture Overview:**
// - `core/` = Business logic (formatter, prompt bookkeeping, orchestration)
// - `infra/` = Implementations of core traits (LLM providers, Google APIs)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize clients and services (dependency injection)
// 3. Run the pipeline: read sheet -> generate -> rewrite -> publish -> link

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with a pile of mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::core::ai::ModelConfig;
use crate::core::review::{GenerationBackend, ReviewService};
use crate::core::rewrite::RewriteService;
use crate::infra::ai::{AnthropicClient, OpenAiClient, XaiClient};
use crate::infra::google::{
    DocsClient, DriveClient, ReviewPublisher, ServiceAccountAuth, SheetsClient,
};
use crate::infra::pricing::{format_btc_line, CoinMarketCapClient};
use crate::infra::templates::GithubTemplateStore;

/// Generates a casino review from the input sheet and publishes it as a
/// formatted Google Doc, writing the link back into the sheet.
#[derive(Debug, Parser)]
#[command(name = "review_writer", version)]
struct Args {
    /// Print the finished review to stdout instead of publishing it.
    #[arg(long)]
    dry_run: bool,

    /// Skip the voice rewrite pass and publish the merged review as-is.
    #[arg(long)]
    skip_rewrite: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create the clients and services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let auth = Arc::new(
        ServiceAccountAuth::from_env()
            .await
            .context("Failed to load Google service account credentials")?,
    );
    let sheets = SheetsClient::new(Arc::clone(&auth));
    let publisher = ReviewPublisher::new(
        DocsClient::new(Arc::clone(&auth)),
        DriveClient::new(Arc::clone(&auth)),
    );

    let templates = Arc::new(GithubTemplateStore::new(config.template_base_url.clone()));
    let claude = GenerationBackend {
        provider: Arc::new(AnthropicClient::new(config.anthropic_api_key.clone())),
        config: ModelConfig::generation(config.claude_model.clone()),
    };
    let grok = GenerationBackend {
        provider: Arc::new(XaiClient::new(config.grok_api_key.clone())),
        config: ModelConfig::generation(config.grok_model.clone()),
    };
    let review_service = ReviewService::new(templates, claude, grok);

    let rewrite_service = RewriteService::new(
        OpenAiClient::new(config.openai_api_key.clone()),
        ModelConfig::rewrite(config.rewrite_model.clone()),
    );

    let pricing = CoinMarketCapClient::new(config.coinmarketcap_api_key.clone());

    // ========================================================================
    // PIPELINE
    // ========================================================================

    let sheet = sheets
        .read_casino_sheet(&config.spreadsheet_id, &config.sheet_name)
        .await
        .context("Failed to load casino data from the sheet")?;
    tracing::info!("Writing review for {}", sheet.casino);

    // The quote only flavours the prompts; a miss degrades to a placeholder.
    let btc_line = match pricing.btc_usd_price().await {
        Ok(price) => format_btc_line(Some(price)),
        Err(e) => {
            tracing::warn!("BTC quote unavailable: {}", e);
            format_btc_line(None)
        }
    };

    let review = review_service.generate(&sheet, &btc_line).await?;

    let finished = if args.skip_rewrite {
        review
    } else {
        tracing::info!("Rewriting review in the editor's voice");
        rewrite_service.rewrite(&review).await
    };

    if args.dry_run {
        println!("{}", finished);
        return Ok(());
    }

    tracing::info!("Uploading review to Google Drive");
    let doc_title = format!("{} Review", sheet.casino);
    let url = publisher
        .publish(&config.folder_id, &doc_title, &finished)
        .await
        .context("Failed to publish the review document")?;

    sheets
        .write_review_link(&config.spreadsheet_id, &config.sheet_name, &url)
        .await
        .context("Failed to write the review link back to the sheet")?;

    tracing::info!("Review published: {}", url);
    println!("Review link: {}", url);

    Ok(())
}
