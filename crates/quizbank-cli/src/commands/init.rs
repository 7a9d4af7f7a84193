//! Create the default config file.

use super::get_paths;
use anyhow::{Context, Result};
use colored::Colorize;
use quizbank_config::Config;

pub fn run() -> Result<()> {
    let paths = get_paths()?;

    if paths.config_file.exists() {
        println!(
            "{} Config already exists: {}",
            "Note:".yellow().bold(),
            paths.config_file.display()
        );
        return Ok(());
    }

    paths.ensure_dirs().context("Failed to create config directory")?;
    Config::create_default_file(&paths.config_file).context("Failed to create config file")?;

    println!(
        "  {} Created config: {}",
        "✓".green(),
        paths.config_file.display()
    );
    println!(
        "  A {} in the working directory takes precedence.",
        "quizbank.toml".cyan()
    );

    Ok(())
}
