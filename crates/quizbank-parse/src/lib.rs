//! Quizbank Parse - Recovering the question bank from pdftotext output.
//!
//! This crate provides:
//! - Text normalization (hyphen repair, quote unification, join keys)
//! - A line classifier for the book's part/section/question markers
//! - State-machine parsers for the Quizzes and Solutions parts
//! - The section merge (build) and option back-fill (fill) pipelines

mod classify;
mod error;
mod fill;
mod merge;
mod normalize;
mod pipeline;
mod quizzes;
mod solutions;

pub use classify::{LineClassifier, LineKind, MetadataField, Part};
pub use error::{ParseError, ParseResult};
pub use fill::{fill_dataset, FillStats, OptionIndex};
pub use merge::{merge_sections, MergeStats};
pub use normalize::{clean_line, join_fragments, join_lines, keyify, normalize_text};
pub use pipeline::{build_bank, fill_options, BUILD_NOTE};
pub use quizzes::{parse_quizzes, QuizParse};
pub use solutions::parse_solutions;
