//! Back-filling options and answer indices into an existing dataset.
//!
//! The dataset is plain JSON so unknown fields and key order survive the
//! round trip. Two shapes are understood: a flat list of questions, or an
//! object with `sections: [{questions: [...]}]`.

use crate::normalize::keyify;
use crate::quizzes::QuizParse;
use quizbank_core::letter_to_index;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Option lists keyed by the normalized question text.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    options: HashMap<String, Vec<String>>,
    collisions: usize,
}

impl OptionIndex {
    /// Index every quiz question that has options, sectioned or not.
    pub fn from_quizzes(parsed: &QuizParse) -> Self {
        let mut index = Self::default();
        for question in parsed.questions() {
            index.insert(&question.question, question.options.clone());
        }
        debug!(
            "Indexed options for {} questions ({} key collisions)",
            index.len(),
            index.collisions
        );
        index
    }

    /// Add an option list. Empty lists are ignored; a repeated key is overwritten.
    pub fn insert(&mut self, question: &str, options: Vec<String>) {
        if options.is_empty() {
            return;
        }
        if self.options.insert(keyify(question), options).is_some() {
            self.collisions += 1;
        }
    }

    /// Look up the options for a question, by its normalized text.
    pub fn get(&self, question: &str) -> Option<&[String]> {
        self.options.get(&keyify(question)).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// How many inserts replaced an existing key.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

/// Counts from a fill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Questions visited.
    pub total: usize,
    /// Questions whose options were replaced.
    pub filled: usize,
}

/// Return a copy of `dataset` with options and answer indices filled in.
pub fn fill_dataset(dataset: &Value, index: &OptionIndex) -> (Value, FillStats) {
    let mut filled = dataset.clone();
    let mut stats = FillStats::default();

    match &mut filled {
        Value::Array(questions) => {
            for question in questions.iter_mut().filter_map(Value::as_object_mut) {
                fill_question(question, index, &mut stats);
            }
        }
        Value::Object(root) => match root.get_mut("sections") {
            Some(Value::Array(sections)) => {
                let questions = sections
                    .iter_mut()
                    .filter_map(|section| section.get_mut("questions"))
                    .filter_map(Value::as_array_mut)
                    .flat_map(|questions| questions.iter_mut())
                    .filter_map(Value::as_object_mut);
                for question in questions {
                    fill_question(question, index, &mut stats);
                }
            }
            _ => warn!("Dataset object has no sections list; nothing to fill"),
        },
        _ => warn!("Dataset is neither a question list nor a sections object"),
    }

    (filled, stats)
}

fn fill_question(question: &mut Map<String, Value>, index: &OptionIndex, stats: &mut FillStats) {
    stats.total += 1;

    let text = question.get("question").and_then(Value::as_str).unwrap_or("");
    if let Some(options) = index.get(text) {
        let options = options.iter().cloned().map(Value::String).collect();
        question.insert("options".to_string(), Value::Array(options));
        stats.filled += 1;
    }

    if !has_integer_index(question) {
        let answer_index = letter_to_index(answer_letter(question));
        // An index past a non-empty option list is never written
        let in_range = |i: usize| match question.get("options").and_then(Value::as_array) {
            Some(options) if !options.is_empty() => i < options.len(),
            _ => true,
        };
        if let Some(answer_index) = answer_index.filter(|&i| in_range(i)) {
            question.insert("answerIndex".to_string(), Value::from(answer_index));
        }
    }
}

fn has_integer_index(question: &Map<String, Value>) -> bool {
    matches!(question.get("answerIndex"), Some(Value::Number(n)) if n.is_i64() || n.is_u64())
}

/// The letter from `answer`, or from `Answer` when `answer` is missing or blank.
fn answer_letter(question: &Map<String, Value>) -> Option<&str> {
    let present = |key: &str| {
        question
            .get(key)
            .filter(|v| !matches!(v, Value::Null) && v.as_str() != Some(""))
    };
    present("answer").or_else(|| present("Answer")).and_then(Value::as_str)
}
