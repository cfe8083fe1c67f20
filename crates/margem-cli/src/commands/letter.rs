//! Letter command - extract a proposal and render the confirmation letter.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use margem_core::models::letter::{LetterTemplate, LETTER_TEMPLATES};
use margem_core::proposal::extract_from_bytes;
use margem_core::render_letter;

/// Arguments for the letter command.
#[derive(Args)]
pub struct LetterArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template id override (default: auto-select by convention CNPJ)
    #[arg(short, long)]
    template: Option<String>,
}

pub async fn run(args: LetterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let result = extract_from_bytes(&data, &config)?;
    let proposal = result.proposal;

    let template = match &args.template {
        Some(id) => LetterTemplate::by_id(id).ok_or_else(|| {
            anyhow::anyhow!("unknown template '{}' (available: {})", id, available_ids())
        })?,
        None => LetterTemplate::for_cnpj(&proposal.convention_cnpj).ok_or_else(|| {
            anyhow::anyhow!(
                "no template matches convention CNPJ '{}'; pass --template (available: {})",
                proposal.convention_cnpj,
                available_ids()
            )
        })?,
    };
    info!("using template '{}'", template.id);

    let today = chrono::Local::now().date_naive();
    let letter = render_letter(&proposal, template, today);

    if let Some(output_path) = &args.output {
        fs::write(output_path, &letter)?;
        println!(
            "{} Letter written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", letter);
    }

    Ok(())
}

fn available_ids() -> String {
    LETTER_TEMPLATES
        .iter()
        .map(|t| t.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
