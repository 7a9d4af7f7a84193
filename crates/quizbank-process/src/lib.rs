//! Quizbank Process - Getting text out of the exam-prep PDF.
//!
//! This crate provides:
//! - PDF to text conversion (via the `pdftotext` CLI from poppler)
//! - Reading the converted dump as an ordered line sequence
//!
//! The conversion relies on the external tool being installed on the system.

mod error;
mod pdftotext;
mod text;

pub use error::{ProcessError, ProcessResult};
pub use pdftotext::{ensure_text, Converter};
pub use text::read_lines;
