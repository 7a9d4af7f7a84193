//! Core domain types for the question bank.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key prefix of quiz sections ("1.<n>").
pub const QUIZ_PART: u8 = 1;

/// Key prefix of solution sections ("2.<n>").
pub const SOLUTION_PART: u8 = 2;

/// Build a section key such as `1.3` from a part number and section index.
pub fn section_key(part: u8, index: &str) -> String {
    format!("{}.{}", part, index)
}

/// Lettered multiple-choice option marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLetter {
    /// All letters in display order.
    pub const ALL: [OptionLetter; 5] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
        OptionLetter::E,
    ];

    /// Zero-based option index (A=0 .. E=4).
    pub fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
            OptionLetter::E => 4,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
            OptionLetter::E => 'E',
        }
    }

    /// Map an uppercase `A`..`E` character. Anything else is rejected.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            'E' => Some(OptionLetter::E),
            _ => None,
        }
    }

    /// Parse a single letter, ignoring surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Map an answer letter to its zero-based option index.
pub fn letter_to_index(letter: Option<&str>) -> Option<usize> {
    letter.and_then(OptionLetter::parse).map(OptionLetter::index)
}

/// How the parsers react to text that does not fit the expected layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip anything unexpected and leave fields empty.
    #[default]
    Permissive,
    /// Fail on the first layout surprise.
    Strict,
}

impl ParseMode {
    pub fn is_strict(&self) -> bool {
        matches!(self, ParseMode::Strict)
    }
}

/// A question recovered from the quizzes part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub number: u32,
    pub question: String,
    pub options: Vec<String>,
}

/// A `1.<n>` section of the quizzes part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSection {
    /// The `<n>` digits exactly as they appear in the text.
    pub index: String,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

impl QuizSection {
    pub fn key(&self) -> String {
        section_key(QUIZ_PART, &self.index)
    }

    /// Key of the solutions section covering the same topic.
    pub fn solution_key(&self) -> String {
        section_key(SOLUTION_PART, &self.index)
    }
}

/// Answer, explanation and metadata for one question of the solutions part.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub question: String,
    pub answer: Option<OptionLetter>,
    pub explanation: String,
    pub domain: Option<String>,
    pub competency: Option<String>,
}

/// A `2.<n>` section of the solutions part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSection {
    pub index: String,
    pub title: String,
    pub entries: BTreeMap<u32, Solution>,
}

impl SolutionSection {
    pub fn key(&self) -> String {
        section_key(SOLUTION_PART, &self.index)
    }
}

/// A fully merged question as written to the output bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankQuestion {
    pub number: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: Option<OptionLetter>,
    #[serde(rename = "answerIndex")]
    pub answer_index: Option<usize>,
    pub explanation: String,
    pub domain: String,
    pub competency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankSection {
    pub section_key: String,
    pub title: String,
    pub questions: Vec<BankQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankNotes {
    pub build: String,
}

/// The document produced by the build pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pub source_file: String,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<BankSection>,
    pub notes: BankNotes,
}

impl QuestionBank {
    /// Total number of questions across all sections.
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}
