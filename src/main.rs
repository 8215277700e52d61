mod display;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use immo_sniper::docu_brain::DocumentPipeline;
use immo_sniper::models::UploadFile;
use immo_sniper::sniper::AdAnalyzer;
use immo_sniper::sources::MockAdSource;
use immo_sniper::{AppState, Config};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "immo-sniper", version, about = "Real-estate prospecting: ad scoring and document extraction")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List ads and score them for seller urgency
    Sniper {
        /// Ad id to analyze (repeatable)
        #[arg(long = "analyze", value_name = "ID")]
        analyze: Vec<String>,
        /// Analyze every ad that has no analysis yet
        #[arg(long)]
        all: bool,
        /// Write the ads as JSON to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Upload documents and extract their key fields
    DocuBrain {
        /// Images or PDF files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Storage bucket (overrides STORAGE_BUCKET)
        #[arg(long)]
        bucket: Option<String>,
        /// Write the session as JSON to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let mut state = AppState::from_config(&config)?;

    match cli.command {
        Command::Sniper { analyze, all, output } => {
            info!("🏠 Immo Sniper - Sniper Pige");
            state.load_ads(&MockAdSource::new()).await?;
            run_sniper(&state, analyze, all).await?;
            if let Some(path) = output {
                let ads = state.ads.read().await.ads().to_vec();
                write_json(&path, &ads).await?;
            }
        }
        Command::DocuBrain { files, bucket, output } => {
            info!("🧠 Immo Sniper - Docu-Brain");
            if let Some(bucket) = bucket {
                state.bucket = bucket;
            }
            run_docu_brain(&state, files).await?;
            if let Some(path) = output {
                let session = state.documents.read().await.clone();
                write_json(&path, &session).await?;
            }
        }
    }

    Ok(())
}

async fn run_sniper(state: &AppState, mut ids: Vec<String>, all: bool) -> Result<()> {
    let analyzer = AdAnalyzer::from_state(state);

    if all {
        let store = state.ads.read().await;
        ids.extend(
            store
                .ads()
                .iter()
                .filter(|ad| !ad.is_analyzed)
                .map(|ad| ad.id.clone()),
        );
    }
    let mut seen = HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));

    // Cards are independent: their analyses run concurrently
    let results = futures::future::join_all(ids.iter().map(|id| analyzer.analyze(id))).await;
    for (id, result) in ids.iter().zip(results) {
        if let Err(e) = result {
            warn!(id = %id, "Skipped: {}", e);
        }
    }

    let cards = analyzer.cards().await;
    println!("\n{} Annonces détectées\n", cards.len());
    for card in &cards {
        display::print_card(card);
    }
    Ok(())
}

async fn run_docu_brain(state: &AppState, paths: Vec<PathBuf>) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(UploadFile::open(path).await?);
    }

    let pipeline = DocumentPipeline::from_state(state);
    pipeline.on_drop(files).await;

    let docs = pipeline.snapshot().await;
    println!();
    for doc in &docs {
        display::print_document(doc);
    }
    Ok(())
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Saved to {}", path.display());
    Ok(())
}
