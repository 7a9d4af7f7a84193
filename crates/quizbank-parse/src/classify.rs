//! Line classification for the exam-prep book layout.
//!
//! The book has two parts, "1 Quizzes" and "2 Solutions". Each part is split
//! into numbered sections ("1.3 Orchestration" / "2.3 Orchestration") holding
//! numbered questions. Quiz questions carry lettered options, solutions carry
//! the answer letter, an explanation and domain/competency tags.

use quizbank_core::OptionLetter;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Top-level division of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Quizzes,
    Solutions,
}

impl Part {
    pub fn header(self) -> &'static str {
        match self {
            Part::Quizzes => "1 Quizzes",
            Part::Solutions => "2 Solutions",
        }
    }
}

/// Metadata tag attached to a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Domain,
    Competency,
}

/// What a single line of the text dump is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// "1 Quizzes" or "2 Solutions".
    PartHeader(Part),
    /// "1.3 Orchestration": `index` is the digit run after the dot.
    SectionHeader { index: &'a str, title: &'a str },
    /// "4. Which of ..." in quizzes, "4. Question Which of ..." in solutions.
    QuestionStart { number: u32, text: &'a str },
    /// "B. A group of containers".
    OptionStart { letter: OptionLetter, text: &'a str },
    /// "Correct Answer: B" anywhere on the line.
    AnswerMarker(OptionLetter),
    /// "Explanation: ..." with the rest of the line.
    ExplanationMarker(&'a str),
    Metadata { field: MetadataField, value: &'a str },
    /// A quiz line starting with "Answer" (the blank answer slot).
    AnswerPrompt,
    /// The "Return to Question" back-link of a solution.
    ReturnLink,
    /// A line holding nothing but a page number.
    PageNumber,
    Plain,
}

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).expect("Invalid line regex"))
        }
    };
    ($name:ident, $pattern:expr, case_insensitive) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| {
                RegexBuilder::new($pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("Invalid line regex")
            })
        }
    };
}

static_regex!(quizzes_header, r"^\s*1\s+Quizzes\s*$");
static_regex!(solutions_header, r"^\s*2\s+Solutions\s*$");
static_regex!(quiz_section, r"^\s*1\.(\d+)\s+(.*)");
static_regex!(solution_section, r"^\s*2\.(\d+)\s+(.*)");
static_regex!(quiz_question, r"^\s*(\d+)\.\s*(.*)");
static_regex!(solution_question, r"^\s*(\d+)\.\s*Question\s*(.*)", case_insensitive);
static_regex!(option_start, r"^\s*([A-E])\.(.*)");
static_regex!(answer_marker, r"Correct\s+Answer\s*:\s*([A-E])", case_insensitive);
static_regex!(explanation_marker, r"^\s*Explanation\s*:\s*(.*)", case_insensitive);
static_regex!(domain_marker, r"^\s*Domain\s*:\s*(.*)$");
static_regex!(competency_marker, r"^\s*Competency\s*:\s*(.*)$");
static_regex!(page_number, r"^\s*\d+\s*$");

/// Classifies lines within one part of the book.
///
/// Only the markers meaningful to that part are recognised: options and the
/// answer slot in quizzes; answers, explanations, metadata and back-links in
/// solutions. Everything else falls through to [`LineKind::Plain`].
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    part: Part,
}

impl LineClassifier {
    pub fn new(part: Part) -> Self {
        Self { part }
    }

    /// Classify a cleaned line. Precedence is top to bottom.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if quizzes_header().is_match(line) {
            return LineKind::PartHeader(Part::Quizzes);
        }
        if solutions_header().is_match(line) {
            return LineKind::PartHeader(Part::Solutions);
        }

        let (section, question) = match self.part {
            Part::Quizzes => (quiz_section(), quiz_question()),
            Part::Solutions => (solution_section(), solution_question()),
        };

        if let Some(caps) = section.captures(line) {
            if let (Some(index), Some(title)) = (caps.get(1), caps.get(2)) {
                return LineKind::SectionHeader {
                    index: index.as_str(),
                    title: title.as_str(),
                };
            }
        }

        if let Some(caps) = question.captures(line) {
            // Digit runs too long for a question number are just text
            if let Some(number) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                return LineKind::QuestionStart {
                    number,
                    text: caps.get(2).map_or("", |m| m.as_str()),
                };
            }
        }

        let kind = match self.part {
            Part::Quizzes => Self::classify_quiz_line(line),
            Part::Solutions => Self::classify_solution_line(line),
        };
        if kind != LineKind::Plain {
            return kind;
        }

        if page_number().is_match(line) {
            return LineKind::PageNumber;
        }
        LineKind::Plain
    }

    fn classify_quiz_line(line: &str) -> LineKind<'_> {
        if let Some(caps) = option_start().captures(line) {
            let letter = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .and_then(OptionLetter::from_char);
            if let Some(letter) = letter {
                return LineKind::OptionStart {
                    letter,
                    text: caps.get(2).map_or("", |m| m.as_str()),
                };
            }
        }
        if line.trim().starts_with("Answer") {
            return LineKind::AnswerPrompt;
        }
        LineKind::Plain
    }

    fn classify_solution_line(line: &str) -> LineKind<'_> {
        if let Some(caps) = answer_marker().captures(line) {
            // Case-insensitive match, so "b" shows up here as well
            let letter = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .and_then(|c| OptionLetter::from_char(c.to_ascii_uppercase()));
            if let Some(letter) = letter {
                return LineKind::AnswerMarker(letter);
            }
        }
        if let Some(caps) = explanation_marker().captures(line) {
            return LineKind::ExplanationMarker(caps.get(1).map_or("", |m| m.as_str()));
        }
        if let Some(caps) = domain_marker().captures(line) {
            return LineKind::Metadata {
                field: MetadataField::Domain,
                value: caps.get(1).map_or("", |m| m.as_str()),
            };
        }
        if let Some(caps) = competency_marker().captures(line) {
            return LineKind::Metadata {
                field: MetadataField::Competency,
                value: caps.get(1).map_or("", |m| m.as_str()),
            };
        }
        if line.trim().starts_with("Return to Question") {
            return LineKind::ReturnLink;
        }
        LineKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(line: &str) -> LineKind<'_> {
        LineClassifier::new(Part::Quizzes).classify(line)
    }

    fn solution(line: &str) -> LineKind<'_> {
        LineClassifier::new(Part::Solutions).classify(line)
    }

    #[test]
    fn test_part_headers() {
        assert_eq!(quiz("1 Quizzes"), LineKind::PartHeader(Part::Quizzes));
        assert_eq!(quiz("   2   Solutions  "), LineKind::PartHeader(Part::Solutions));
        assert_eq!(solution("2 Solutions"), LineKind::PartHeader(Part::Solutions));
        assert_eq!(quiz("1 Quizzes and more"), LineKind::Plain);
    }

    #[test]
    fn test_section_headers_are_part_specific() {
        assert_eq!(
            quiz("1.3 Orchestration"),
            LineKind::SectionHeader {
                index: "3",
                title: "Orchestration"
            }
        );
        assert_eq!(
            solution("  2.12   Cloud Native Observability"),
            LineKind::SectionHeader {
                index: "12",
                title: "Cloud Native Observability"
            }
        );
        assert!(matches!(solution("1.3 Orchestration"), LineKind::Plain));
    }

    #[test]
    fn test_question_starts() {
        assert_eq!(
            quiz("  12. Which of the following"),
            LineKind::QuestionStart {
                number: 12,
                text: "Which of the following"
            }
        );
        assert_eq!(
            solution("3. question What is a Pod?"),
            LineKind::QuestionStart {
                number: 3,
                text: "What is a Pod?"
            }
        );
        // Solutions only count numbered lines with the Question keyword
        assert_eq!(solution("3. What is a Pod?"), LineKind::Plain);
        // A number that does not fit is not a question number
        assert_eq!(quiz("99999999999. huge"), LineKind::Plain);
    }

    #[test]
    fn test_option_start() {
        assert_eq!(
            quiz("   B. A group of containers"),
            LineKind::OptionStart {
                letter: OptionLetter::B,
                text: " A group of containers"
            }
        );
        assert_eq!(quiz("F. Not an option"), LineKind::Plain);
        assert_eq!(solution("B. Not an option in solutions"), LineKind::Plain);
    }

    #[test]
    fn test_answer_prompt() {
        assert_eq!(quiz("  Answer"), LineKind::AnswerPrompt);
        assert_eq!(quiz("Answer: ______"), LineKind::AnswerPrompt);
        assert_eq!(solution("Answer"), LineKind::Plain);
    }

    #[test]
    fn test_answer_marker_anywhere() {
        assert_eq!(
            solution("     Correct Answer: B"),
            LineKind::AnswerMarker(OptionLetter::B)
        );
        assert_eq!(
            solution("see above   correct   answer :d"),
            LineKind::AnswerMarker(OptionLetter::D)
        );
        assert_eq!(quiz("Correct Answer: B"), LineKind::Plain);
    }

    #[test]
    fn test_explanation_and_metadata() {
        assert_eq!(
            solution("EXPLANATION:  It groups containers."),
            LineKind::ExplanationMarker("It groups containers.")
        );
        assert_eq!(
            solution("Domain: Fundamentals"),
            LineKind::Metadata {
                field: MetadataField::Domain,
                value: "Fundamentals"
            }
        );
        assert_eq!(
            solution("  Competency : Pods"),
            LineKind::Metadata {
                field: MetadataField::Competency,
                value: "Pods"
            }
        );
        assert_eq!(solution("Return to Question"), LineKind::ReturnLink);
    }

    #[test]
    fn test_page_numbers() {
        assert_eq!(quiz("   42   "), LineKind::PageNumber);
        assert_eq!(solution("\x0c7"), LineKind::PageNumber);
        assert_eq!(quiz(""), LineKind::Plain);
        assert_eq!(quiz("42 pods"), LineKind::Plain);
    }
}
