//! PDF to text conversion using pdftotext.

use crate::error::{ProcessError, ProcessResult};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Invokes an external PDF-to-text program.
#[derive(Debug, Clone)]
pub struct Converter {
    program: String,
    layout: bool,
}

impl Converter {
    /// Create a converter for the given program.
    pub fn new(program: impl Into<String>, layout: bool) -> Self {
        Self {
            program: program.into(),
            layout,
        }
    }

    /// Check the program is on PATH.
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Convert `pdf_path` into a plain text file at `text_path`.
    ///
    /// Requires `pdftotext` (poppler-utils) or a compatible program.
    pub fn convert(&self, pdf_path: &Path, text_path: &Path) -> ProcessResult<()> {
        if !pdf_path.exists() {
            return Err(ProcessError::FileNotFound(pdf_path.to_path_buf()));
        }

        if !self.is_available() {
            return Err(ProcessError::ToolNotFound {
                tool: self.program.clone(),
            });
        }

        info!("Converting {:?} to {:?}", pdf_path, text_path);

        let mut command = Command::new(&self.program);
        if self.layout {
            // Keeps option letters in their own column
            command.arg("-layout");
        }
        let output = command.arg(pdf_path).arg(text_path).output()?;

        if !output.status.success() {
            return Err(ProcessError::ProcessFailed {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("Conversion finished");
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new("pdftotext", true)
    }
}

/// Make sure the text dump exists, converting the PDF only when it does not.
///
/// Returns `true` when a conversion ran.
pub fn ensure_text(converter: &Converter, pdf_path: &Path, text_path: &Path) -> ProcessResult<bool> {
    if text_path.exists() {
        debug!("Reusing existing text dump {:?}", text_path);
        return Ok(false);
    }

    converter.convert(pdf_path, text_path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_check() {
        // Just verify the tool check doesn't panic
        let _ = Converter::default().is_available();
    }

    #[test]
    fn test_missing_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let result = Converter::default().convert(&dir.path().join("in.pdf"), &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ProcessError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_tool() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("in.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        let converter = Converter::new("quizbank-no-such-converter", true);
        let result = converter.convert(&pdf, &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ProcessError::ToolNotFound { .. })));
    }

    #[test]
    fn test_ensure_text_reuses_existing_dump() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("dump.txt");
        std::fs::write(&text, "1 Quizzes\n").unwrap();

        // The PDF does not exist and the tool is bogus, so any conversion would fail
        let converter = Converter::new("quizbank-no-such-converter", true);
        let converted = ensure_text(&converter, &dir.path().join("in.pdf"), &text).unwrap();
        assert!(!converted);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_reports_exit_code() {
        if which::which("false").is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("in.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        let converter = Converter::new("false", true);
        let result = converter.convert(&pdf, &dir.path().join("out.txt"));
        assert!(matches!(result, Err(ProcessError::ProcessFailed { code: 1, .. })));
    }
}
