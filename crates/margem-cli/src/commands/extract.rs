//! Extract command - pull proposal fields from a single PDF.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use margem_core::models::proposal::{FieldKey, ProposalData};
use margem_core::proposal::extract_from_bytes;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print extraction warnings for defaulted fields
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text, one field per line
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("processing file: {}", args.input.display());

    let data = fs::read(&args.input)?;
    let result = extract_from_bytes(&data, &config)?;
    debug!("extraction took {}ms", result.processing_time_ms);

    let output = format_proposal(&result.proposal, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    Ok(())
}

/// Format a proposal record in the requested output format.
pub fn format_proposal(proposal: &ProposalData, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(proposal)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(FieldKey::ALL.iter().map(|key| key.name()))?;
            writer.write_record(FieldKey::ALL.iter().map(|key| proposal.get(*key)))?;
            Ok(String::from_utf8(writer.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for key in FieldKey::ALL {
                out.push_str(key.name());
                out.push_str(": ");
                out.push_str(proposal.get(key));
                out.push('\n');
            }
            Ok(out)
        }
    }
}
