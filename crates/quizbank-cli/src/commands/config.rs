//! Configuration commands.

use super::load_config;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

pub fn show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    let contents = config.to_toml().context("Failed to render config")?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));
    println!("{}", contents);

    Ok(())
}
