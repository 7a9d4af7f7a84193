//! Build command - merge quizzes and solutions into a fresh question bank.

use super::{load_config, load_text, parse_mode, write_json};
use anyhow::{Context, Result};
use colored::Colorize;
use quizbank_parse::build_bank;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-run overrides of the configured file names.
pub struct BuildArgs {
    pub pdf: Option<PathBuf>,
    pub text: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict: bool,
}

pub fn run(config_path: Option<&Path>, args: BuildArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let pdf = args.pdf.unwrap_or_else(|| config.files.pdf.clone());
    let text = args.text.unwrap_or_else(|| config.files.text.clone());
    let output = args.output.unwrap_or_else(|| config.files.bank_output.clone());
    let mode = parse_mode(&config, args.strict);

    debug!("Parsing {} in {:?} mode", text.display(), mode);
    let lines = load_text(&config, &pdf, &text)?;

    // The bank records the PDF by file name only
    let source_file = pdf
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| pdf.display().to_string());

    let (bank, stats) = build_bank(&lines, &source_file, mode)
        .with_context(|| format!("Failed to parse {}", text.display()))?;

    println!(
        "Merged questions: {}; fully matched (options + answer): {}",
        stats.total.to_string().cyan(),
        stats.matched.to_string().green()
    );
    if stats.orphaned > 0 {
        println!(
            "  {} solutions had no matching quiz question",
            stats.orphaned.to_string().yellow()
        );
    }

    write_json(&output, &bank)?;
    println!(
        "{} {} questions to {}",
        "Wrote".green().bold(),
        bank.question_count(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_existing_dump() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("dump.txt");
        let output = dir.path().join("bank.json");
        std::fs::write(
            &text,
            "1 Quizzes\n1.1 Intro\n1. What is a Pod?\nA. A container\nB. A group of containers\nAnswer\n\
             2 Solutions\n2.1 Intro\n1. Question What is a Pod?\nCorrect Answer: B\n",
        )
        .unwrap();

        let args = BuildArgs {
            pdf: Some(dir.path().join("book.pdf")),
            text: Some(text),
            output: Some(output.clone()),
            strict: false,
        };
        let config = dir.path().join("quizbank.toml");
        quizbank_config::Config::default().save_to(&config).unwrap();
        run(Some(config.as_path()), args).unwrap();

        let bank: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(bank["source_file"], "book.pdf");
        assert_eq!(bank["sections"][0]["section_key"], "2.1");
        assert_eq!(bank["sections"][0]["questions"][0]["answerIndex"], 1);
    }
}
