//! Batch processing command for multiple proposal files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use margem_core::models::proposal::{FieldKey, ProposalData};
use margem_core::proposal::extract_from_bytes;

use super::extract::{format_proposal, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct BatchOutcome {
    path: PathBuf,
    proposal: Option<ProposalData>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|entry| entry.ok())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Sequential processing keeps per-file logs readable and the summary
    // in input order.
    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        let outcome = match process_single_file(&path, &config) {
            Ok(proposal) => BatchOutcome {
                path: path.clone(),
                proposal: Some(proposal),
                error: None,
            },
            Err(e) => {
                warn!("failed to process {}: {}", path.display(), e);
                BatchOutcome {
                    path: path.clone(),
                    proposal: None,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
        pb.inc(1);
    }
    pb.finish_with_message("Complete");

    for outcome in &outcomes {
        if let (Some(proposal), Some(output_dir)) = (&outcome.proposal, &args.output_dir) {
            let stem = outcome
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("proposta");
            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Text => "txt",
            };
            let output_path = output_dir.join(format!("{}.{}", stem, extension));
            fs::write(&output_path, format_proposal(proposal, args.format)?)?;
            debug!("wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|dir| dir.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));
        write_summary(&summary_path, &outcomes)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = outcomes.iter().filter(|o| o.proposal.is_some()).count();
    let failed = outcomes.len() - successful;

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed).red()
    );

    if failed > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in outcomes.iter().filter(|o| o.error.is_some()) {
            println!(
                "  - {}: {}",
                outcome.path.display(),
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    config: &margem_core::MargemConfig,
) -> anyhow::Result<ProposalData> {
    let data = fs::read(path)?;
    let result = extract_from_bytes(&data, config)?;
    Ok(result.proposal)
}

fn write_summary(path: &Path, outcomes: &[BatchOutcome]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["file", "status"];
    header.extend(FieldKey::ALL.iter().map(|key| key.name()));
    writer.write_record(&header)?;

    for outcome in outcomes {
        let mut record = vec![
            outcome.path.display().to_string(),
            if outcome.proposal.is_some() {
                "ok".to_string()
            } else {
                "error".to_string()
            },
        ];
        match &outcome.proposal {
            Some(proposal) => {
                record.extend(FieldKey::ALL.iter().map(|key| proposal.get(*key).to_string()))
            }
            None => record.extend(FieldKey::ALL.iter().map(|_| String::new())),
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
