//! analyze-csv - run one sentiment analysis over a local CSV file
//!
//! Prints the consolidated summary, or the user-facing error message with a
//! non-zero exit status.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_common::config::{self, delimiter_to_byte, CONFIG_PATH_ENV};
use sentiment_service::ingest::IngestOptions;
use sentiment_service::models::SummaryReport;
use sentiment_service::{pipeline, services};

#[derive(Parser, Debug)]
#[command(name = "analyze-csv")]
#[command(about = "Analyze the sentiment of a CSV file of messages")]
#[command(version)]
struct Args {
    /// CSV file with `username` and `message` columns
    file: PathBuf,

    /// Field delimiter (overrides [csv] delimiter)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let (toml_config, config_source) =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::new(
                toml_config
                    .logging
                    .filter_directives(std::env::var("RUST_LOG").ok().as_deref()),
            ),
        )
        .with_writer(std::io::stderr)
        .init();
    config_source.log();

    let delimiter = match args.delimiter {
        Some(d) => delimiter_to_byte(d)?,
        None => toml_config.csv.delimiter_byte()?,
    };
    let classifier = services::build_classifier(&toml_config)?;

    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let options = IngestOptions::default().with_delimiter(delimiter);
    match pipeline::run_analysis(&bytes, &options, &classifier).await {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            tracing::debug!(error = %e, "Analysis failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(report: &SummaryReport) {
    println!("Consolidated Results ({} messages)", report.total_messages);
    println!("  Most Frequent Sentiment:   {}", report.most_frequent);
    println!(
        "  Worst Sentiment Identified: {} ({:.2})",
        report.worst_feeling.label, report.worst_feeling.score
    );
    println!("  Satisfaction Index:        {}", report.satisfaction_display());
    println!();
    for bucket in &report.sentiment_counts {
        println!("  {:<16} {}", bucket.label, bucket.count);
    }
}
