use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use resqa::application::{FilterByQualityUseCase, QualityAssessor, QualityReportUseCase};
use resqa::cli::{load_results, print_assessment, print_failure, print_report};
use resqa::infrastructure::{HttpLinkChecker, InMemoryAssessmentStore};
use resqa::{QAConfig, QualityAssessment, logging};

#[derive(Parser)]
#[command(name = "resqa")]
#[command(about = "Quality assessment for retrieved results", long_about = None)]
#[command(version)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess every result in a JSON file
    Assess {
        /// JSON array of results ({id, title, url, content, published_at})
        results: PathBuf,

        /// JSON config file; RESQA_* variables override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip link checks
        #[arg(long)]
        offline: bool,

        /// Print assessments and the report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Only print results scoring at least this much
        #[arg(long)]
        min_score: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match cli.command {
        Commands::Assess {
            results,
            config,
            offline,
            json,
            min_score,
        } => assess(results, config, offline, json, min_score).await,
    }
}

async fn assess(
    results_path: PathBuf,
    config_path: Option<PathBuf>,
    offline: bool,
    json: bool,
    min_score: Option<f64>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => QAConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => QAConfig::default(),
    }
    .apply_env()
    .context("Invalid RESQA_* environment configuration")?;

    if offline {
        config.check_links = false;
    }

    let results = load_results(&results_path)
        .with_context(|| format!("Failed to read results from {}", results_path.display()))?;
    info!(count = results.len(), path = %results_path.display(), "Loaded results");

    let store = Arc::new(InMemoryAssessmentStore::new());
    let link_checker = Arc::new(HttpLinkChecker::new(config.link_timeout)?);
    let assessor = QualityAssessor::new(store.clone(), link_checker);

    let outcomes = assessor.assess_batch(&results, &config).await;

    let mut assessments: Vec<QualityAssessment> = Vec::new();
    let mut failures = Vec::new();
    for (result, outcome) in results.iter().zip(outcomes) {
        match outcome {
            Ok(assessment) => assessments.push(assessment),
            Err(e) => failures.push((result.id.clone(), e)),
        }
    }

    if let Some(min_score) = min_score {
        let passing = FilterByQualityUseCase::new(store.as_ref())
            .execute(&results, min_score)
            .await?;
        assessments = passing.into_iter().map(|(_, assessment)| assessment).collect();
    }

    let report = QualityReportUseCase::new(store.as_ref())
        .execute(&config, chrono::Utc::now())
        .await?;

    if json {
        let failures: Vec<_> = failures
            .iter()
            .map(|(id, e)| serde_json::json!({ "result_id": id, "error": e.to_string() }))
            .collect();
        let output = serde_json::json!({
            "assessments": assessments,
            "failures": failures,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for assessment in &assessments {
        print_assessment(assessment, &config);
    }
    for (id, e) in &failures {
        print_failure(id, e);
    }
    print_report(&report);

    if !failures.is_empty() {
        println!(
            "{}",
            format!("{} of {} results could not be assessed", failures.len(), results.len()).yellow()
        );
    }

    Ok(())
}
