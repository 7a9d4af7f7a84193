//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use quizbank_core::ParseMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub converter: ConverterConfig,

    #[serde(default)]
    pub parser: ParserConfig,
}

impl Config {
    /// Load configuration from `./quizbank.toml` or the user config directory.
    ///
    /// Falls back to defaults when neither exists.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        match paths.active_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Quizbank Configuration
# Turns the KCNA exam-prep PDF into a JSON question bank

[files]
# Source PDF and its pdftotext dump (the dump is reused when present)
pdf = "KCNA-exam-prep.pdf"
text = "KCNA-exam-prep.txt"

# Output of `quizbank build`
bank_output = "kcna_from_pdf.json"

# Input and output of `quizbank fill`
fill_source = "kcna_prep_qna_clean.json"
fill_output = "kcna_prep_qna_clean.filled.json"

[converter]
# PDF to text program, must be on PATH
program = "pdftotext"

# Pass -layout to keep option letters aligned
layout = true

[parser]
# permissive: skip unexpected lines
# strict: fail on the first layout surprise
mode = "permissive"
"#
        .to_string()
    }
}

/// Input and output file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub pdf: PathBuf,
    pub text: PathBuf,
    pub bank_output: PathBuf,
    pub fill_source: PathBuf,
    pub fill_output: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            pdf: PathBuf::from("KCNA-exam-prep.pdf"),
            text: PathBuf::from("KCNA-exam-prep.txt"),
            bank_output: PathBuf::from("kcna_from_pdf.json"),
            fill_source: PathBuf::from("kcna_prep_qna_clean.json"),
            fill_output: PathBuf::from("kcna_prep_qna_clean.filled.json"),
        }
    }
}

/// External PDF-to-text converter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub program: String,
    pub layout: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "pdftotext".to_string(),
            layout: true,
        }
    }
}

/// Text parser settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub mode: ParseMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.files.pdf, PathBuf::from("KCNA-exam-prep.pdf"));
        assert_eq!(config.converter.program, "pdftotext");
        assert!(config.converter.layout);
        assert_eq!(config.parser.mode, ParseMode::Permissive);
    }

    #[test]
    fn test_default_config_string_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.files.bank_output, PathBuf::from("kcna_from_pdf.json"));
        assert_eq!(
            config.files.fill_output,
            PathBuf::from("kcna_prep_qna_clean.filled.json")
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [parser]
            mode = "strict"

            [files]
            text = "dump.txt"
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert!(config.parser.mode.is_strict());
        assert_eq!(config.files.text, PathBuf::from("dump.txt"));
        // Defaults should still work
        assert_eq!(config.files.pdf, PathBuf::from("KCNA-exam-prep.pdf"));
        assert_eq!(config.converter.program, "pdftotext");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.files.fill_source, PathBuf::from("kcna_prep_qna_clean.json"));
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quizbank.toml");

        let mut config = Config::default();
        config.converter.layout = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.converter.layout);
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[parser]\nmode = \"lenient\"").unwrap();

        let result = Config::load_from(temp_file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
