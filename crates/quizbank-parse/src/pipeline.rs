//! The two conversion pipelines over an in-memory text dump.

use crate::error::{ParseError, ParseResult};
use crate::fill::{fill_dataset, FillStats, OptionIndex};
use crate::merge::{merge_sections, MergeStats};
use crate::quizzes::parse_quizzes;
use crate::solutions::parse_solutions;
use chrono::Utc;
use quizbank_core::{BankNotes, ParseMode, QuestionBank};
use serde_json::Value;
use tracing::debug;

/// Note recorded in every generated bank.
pub const BUILD_NOTE: &str =
    "Parsed Quizzes for options and Solutions for answers/explanations/domains. Merged by section + number.";

/// Build a complete question bank from the quizzes and solutions parts.
pub fn build_bank<S: AsRef<str>>(
    lines: &[S],
    source_file: &str,
    mode: ParseMode,
) -> ParseResult<(QuestionBank, MergeStats)> {
    let quizzes = parse_quizzes(lines, mode)?;
    let solutions = parse_solutions(lines, mode)?;

    let (sections, stats) = merge_sections(&quizzes.sections, &solutions);
    debug!(
        "Merged questions: {}; fully matched (options + answer): {}",
        stats.total, stats.matched
    );

    let bank = QuestionBank {
        source_file: source_file.to_string(),
        generated_at: Utc::now(),
        sections,
        notes: BankNotes {
            build: BUILD_NOTE.to_string(),
        },
    };
    Ok((bank, stats))
}

/// Fill options and answer indices of `dataset` from the quizzes part.
///
/// Fails when the text yields no options at all, which means it does not
/// have the expected layout.
pub fn fill_options<S: AsRef<str>>(
    lines: &[S],
    dataset: &Value,
    mode: ParseMode,
) -> ParseResult<(Value, FillStats)> {
    let quizzes = parse_quizzes(lines, mode)?;
    let index = OptionIndex::from_quizzes(&quizzes);
    if index.is_empty() {
        return Err(ParseError::NoOptions);
    }

    let (filled, stats) = fill_dataset(dataset, &index);
    debug!(
        "Processed: {} questions; filled options for: {}",
        stats.total, stats.filled
    );
    Ok((filled, stats))
}
