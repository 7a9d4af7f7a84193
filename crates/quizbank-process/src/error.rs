//! Error types for PDF conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that can occur while producing or reading the text dump.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Tool not found: {tool}. Please install it.")]
    ToolNotFound { tool: String },

    #[error("Process failed with exit code {code}: {stderr}")]
    ProcessFailed { code: i32, stderr: String },
}
