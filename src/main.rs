// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use catalog_suggest::utils::logging::{format_coverage, format_error, format_success};
use catalog_suggest::{Config, PipelineOrchestrator, TextNormalizer, TypoCorrector, Validator};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "catalog_suggest")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Index a product catalog and measure prefix-search coverage", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index, load the catalog and evaluate all queries (default)
    Run,

    /// Rebuild the index and load the catalog only
    Index,

    /// Evaluate the query file against the existing index
    Evaluate,

    /// Run a single prefix query and print the hits
    Search {
        /// Raw query text, corrected and normalized before searching
        query: String,
    },

    /// Print the corrected and normalized form of a text
    Normalize { text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    catalog_suggest::utils::logging::init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Catalog Suggest evaluation pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config_path = if cli.config.exists() {
        Some(cli.config.as_path())
    } else {
        warn!(
            "Config file {} not found, using defaults and environment overrides",
            cli.config.display()
        );
        None
    };
    let config = Config::load(config_path).context("Failed to load configuration")?;

    let orchestrator = PipelineOrchestrator::new(config)
        .context("Failed to create pipeline")?
        .with_progress(true, cli.color);

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&orchestrator).await,
        Commands::Index => cmd_index(&orchestrator).await,
        Commands::Evaluate => cmd_evaluate(&orchestrator).await,
        Commands::Search { query } => cmd_search(&orchestrator, &query).await,
        Commands::Normalize { text } => {
            cmd_normalize(&text);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        std::process::exit(1);
    }

    Ok(())
}

async fn cmd_run(orchestrator: &PipelineOrchestrator) -> Result<()> {
    let stats = orchestrator.run().await.context("Pipeline run failed")?;
    println!("{}", format_coverage(stats.coverage_percentage));
    Ok(())
}

async fn cmd_index(orchestrator: &PipelineOrchestrator) -> Result<()> {
    let (load_report, insert_stats) = orchestrator
        .index_catalog()
        .await
        .context("Catalog indexing failed")?;

    println!(
        "{}",
        format_success(&format!(
            "Indexed {} of {} products ({} skipped, {} rejected)",
            insert_stats.documents_indexed,
            load_report.products_found,
            load_report.products_skipped,
            insert_stats.errors
        ))
    );
    Ok(())
}

async fn cmd_evaluate(orchestrator: &PipelineOrchestrator) -> Result<()> {
    let report = orchestrator
        .evaluate()
        .await
        .context("Query evaluation failed")?;

    println!("{}", format_coverage(report.stats.coverage_percentage));
    Ok(())
}

async fn cmd_search(orchestrator: &PipelineOrchestrator, query: &str) -> Result<()> {
    info!("Searching for: {}", query);

    let hits = orchestrator.search(query).await.context("Search failed")?;

    if hits.is_empty() {
        println!("\nNo results found for query: \"{}\"\n", query);
        return Ok(());
    }

    println!("\nSearch Results for: \"{}\"\n", query);
    println!("Found {} result(s)\n", hits.len());
    println!("{}", "=".repeat(80));

    for (idx, hit) in hits.iter().enumerate() {
        println!("{}. {}", idx + 1, Validator::truncate_text(&hit.format_summary(), 76));
    }

    println!("{}", "=".repeat(80));
    Ok(())
}

fn cmd_normalize(text: &str) {
    let corrected = TypoCorrector::new().correct(text);
    let normalized = TextNormalizer::new().normalize_str(corrected);

    println!("input:      {}", text);
    println!("corrected:  {}", corrected);
    println!("normalized: {}", normalized);
}
