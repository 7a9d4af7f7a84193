//! CLI command implementations.

pub mod build;
pub mod config;
pub mod fill;
pub mod init;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use quizbank_config::{AppPaths, Config};
use quizbank_core::ParseMode;
use quizbank_process::{ensure_text, read_lines, Converter};
use serde::Serialize;
use std::path::Path;

/// Get the application paths.
pub fn get_paths() -> Result<AppPaths> {
    AppPaths::new().context("Failed to determine application directories")
}

/// Load the config from an explicit path, or discover it.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Config::load_from(path).with_context(|| format!("Failed to load {}", path.display()))
        }
        None => Config::load().context("Failed to load config"),
    }
}

/// `--strict` wins over the configured mode.
pub fn parse_mode(config: &Config, strict: bool) -> ParseMode {
    if strict {
        ParseMode::Strict
    } else {
        config.parser.mode
    }
}

/// Make sure the pdftotext dump exists and read it into lines.
pub fn load_text(config: &Config, pdf: &Path, text: &Path) -> Result<Vec<String>> {
    let converter = Converter::new(&config.converter.program, config.converter.layout);

    if !text.exists() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Converting {}", pdf.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let converted = ensure_text(&converter, pdf, text);
        pb.finish_and_clear();
        converted.with_context(|| format!("Failed to convert {}", pdf.display()))?;

        println!("{} {}", "Converted:".green().bold(), text.display());
    }

    read_lines(text).with_context(|| format!("Failed to read {}", text.display()))
}

/// Write a value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_override() {
        let config = Config::default();
        assert_eq!(parse_mode(&config, false), ParseMode::Permissive);
        assert_eq!(parse_mode(&config, true), ParseMode::Strict);
    }

    #[test]
    fn test_load_text_reuses_dump() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("dump.txt");
        std::fs::write(&text, "1 Quizzes\n1.1 Intro\n").unwrap();

        let lines = load_text(&Config::default(), &dir.path().join("missing.pdf"), &text).unwrap();
        assert_eq!(lines, vec!["1 Quizzes", "1.1 Intro"]);
    }

    #[test]
    fn test_load_text_missing_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_text(
            &Config::default(),
            &dir.path().join("missing.pdf"),
            &dir.path().join("dump.txt"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_write_json_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("bank.json");

        write_json(&path, &serde_json::json!({"q": "caf\u{e9}"})).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n  \"q\": \"café\"\n}");
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
