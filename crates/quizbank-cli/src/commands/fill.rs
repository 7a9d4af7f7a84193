//! Fill command - back-fill options into an existing question set.

use super::{load_config, load_text, parse_mode, write_json};
use anyhow::{Context, Result};
use colored::Colorize;
use quizbank_parse::fill_options;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-run overrides of the configured file names.
pub struct FillArgs {
    pub pdf: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

pub fn run(config_path: Option<&Path>, args: FillArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let pdf = args.pdf.unwrap_or_else(|| config.files.pdf.clone());
    let text = args.text.unwrap_or_else(|| config.files.text.clone());
    let source = args.source.unwrap_or_else(|| config.files.fill_source.clone());
    let output = args.output.unwrap_or_else(|| config.files.fill_output.clone());
    let mode = parse_mode(&config, args.strict);

    debug!("Parsing {} in {:?} mode", text.display(), mode);
    let lines = load_text(&config, &pdf, &text)?;

    let contents = std::fs::read_to_string(&source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let dataset: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", source.display()))?;

    let (filled, stats) = fill_options(&lines, &dataset, mode)
        .with_context(|| format!("Failed to recover options from {}", text.display()))?;

    write_json(&output, &filled)?;

    println!(
        "Processed: {} questions; filled options for: {}.",
        stats.total.to_string().cyan(),
        stats.filled.to_string().green()
    );
    println!("Output written to: {}", output.display());

    Ok(())
}
