//! Parser for the "1 Quizzes" part.

use crate::classify::{LineClassifier, LineKind, Part};
use crate::error::{ParseError, ParseResult};
use crate::normalize::{clean_line, join_fragments, join_lines, normalize_text};
use quizbank_core::{OptionLetter, ParseMode, QuizQuestion, QuizSection};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything recovered from the quizzes part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizParse {
    /// Sections in order of first appearance.
    pub sections: Vec<QuizSection>,
    /// Questions found before any section header.
    pub unsectioned: Vec<QuizQuestion>,
}

impl QuizParse {
    /// All questions, sectioned ones first.
    pub fn questions(&self) -> impl Iterator<Item = &QuizQuestion> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter())
            .chain(self.unsectioned.iter())
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }

    pub fn section(&self, key: &str) -> Option<&QuizSection> {
        self.sections.iter().find(|s| s.key() == key)
    }
}

/// Parse the quizzes part into sections of questions with their options.
pub fn parse_quizzes<S: AsRef<str>>(lines: &[S], mode: ParseMode) -> ParseResult<QuizParse> {
    QuizParser::new(lines, mode).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeQuizzes,
    InQuizzes,
    Done,
}

/// Section under construction.
struct SectionBuilder {
    index: String,
    title: String,
    questions: Vec<QuizQuestion>,
}

impl SectionBuilder {
    fn finish(self) -> QuizSection {
        QuizSection {
            index: self.index,
            title: self.title,
            questions: self.questions,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    sections: Vec<QuizSection>,
    current: Option<SectionBuilder>,
    unsectioned: Vec<QuizQuestion>,
}

impl Accumulator {
    fn open_section(&mut self, index: &str, title: String) {
        self.close_section();
        debug!("Quiz section 1.{}: {}", index, title);
        self.current = Some(SectionBuilder {
            index: index.to_string(),
            title,
            questions: Vec::new(),
        });
    }

    /// A section key seen twice keeps its first position but the later contents.
    fn close_section(&mut self) {
        if let Some(builder) = self.current.take() {
            let section = builder.finish();
            match self.sections.iter_mut().find(|s| s.index == section.index) {
                Some(existing) => *existing = section,
                None => self.sections.push(section),
            }
        }
    }

    fn finish(mut self) -> QuizParse {
        self.close_section();
        QuizParse {
            sections: self.sections,
            unsectioned: self.unsectioned,
        }
    }
}

struct QuizParser {
    lines: Vec<String>,
    classifier: LineClassifier,
    mode: ParseMode,
}

impl QuizParser {
    fn new<S: AsRef<str>>(lines: &[S], mode: ParseMode) -> Self {
        Self {
            lines: lines.iter().map(|l| clean_line(l.as_ref())).collect(),
            classifier: LineClassifier::new(Part::Quizzes),
            mode,
        }
    }

    fn kind(&self, pos: usize) -> LineKind<'_> {
        self.classifier.classify(&self.lines[pos])
    }

    fn parse(&self) -> ParseResult<QuizParse> {
        let mut state = State::BeforeQuizzes;
        let mut acc = Accumulator::default();
        let mut pos = 0;

        while pos < self.lines.len() && state != State::Done {
            match (state, self.kind(pos)) {
                (State::BeforeQuizzes, LineKind::PartHeader(Part::Quizzes)) => {
                    state = State::InQuizzes;
                    pos += 1;
                }
                (State::BeforeQuizzes, _) => pos += 1,
                (State::InQuizzes, LineKind::PartHeader(Part::Solutions)) => {
                    state = State::Done;
                }
                (State::InQuizzes, LineKind::SectionHeader { index, title }) => {
                    acc.open_section(index, normalize_text(title));
                    pos += 1;
                }
                (State::InQuizzes, LineKind::QuestionStart { number, text }) => {
                    let (question, next) = self.read_question(pos, number, text)?;
                    match acc.current.as_mut() {
                        Some(section) => section.questions.push(question),
                        None if self.mode.is_strict() => {
                            return Err(ParseError::UnexpectedLayout {
                                line: pos + 1,
                                message: format!("question {} before any section header", number),
                            });
                        }
                        None => {
                            debug!("Question {} at line {} has no section", number, pos + 1);
                            acc.unsectioned.push(question);
                        }
                    }
                    pos = next;
                }
                (State::InQuizzes, _) => pos += 1,
                (State::Done, _) => break,
            }
        }

        if state == State::BeforeQuizzes && self.mode.is_strict() {
            return Err(ParseError::MissingHeader(Part::Quizzes.header().to_string()));
        }

        let parsed = acc.finish();
        info!(
            "Parsed {} quiz questions in {} sections",
            parsed.question_count(),
            parsed.sections.len()
        );
        Ok(parsed)
    }

    /// Read one question starting at `start`; returns it and the position
    /// of the first line after its options.
    fn read_question(&self, start: usize, number: u32, text: &str) -> ParseResult<(QuizQuestion, usize)> {
        let mut fragments = vec![text.trim().to_string()];
        let mut pos = start + 1;

        while pos < self.lines.len() {
            match self.kind(pos) {
                LineKind::OptionStart { .. }
                | LineKind::QuestionStart { .. }
                | LineKind::SectionHeader { .. }
                | LineKind::AnswerPrompt
                | LineKind::PartHeader(_) => break,
                LineKind::PageNumber => {}
                _ => fragments.push(self.lines[pos].trim().to_string()),
            }
            pos += 1;
        }

        let (options, next) = self.read_options(pos);
        if options.is_empty() {
            if self.mode.is_strict() {
                return Err(ParseError::UnexpectedLayout {
                    line: start + 1,
                    message: format!("question {} has no options", number),
                });
            }
            debug!("Question {} at line {} has no options", number, start + 1);
        }

        let question = QuizQuestion {
            number,
            question: join_fragments(&fragments),
            options,
        };
        Ok((question, next))
    }

    /// Collect lettered options from `start`. Missing letters leave no gap.
    fn read_options(&self, start: usize) -> (Vec<String>, usize) {
        let mut letters: BTreeMap<OptionLetter, String> = BTreeMap::new();
        let mut current: Option<(OptionLetter, Vec<String>)> = None;
        let mut pos = start;

        while pos < self.lines.len() {
            match self.kind(pos) {
                LineKind::QuestionStart { .. }
                | LineKind::SectionHeader { .. }
                | LineKind::AnswerPrompt
                | LineKind::PartHeader(_) => break,
                LineKind::OptionStart { letter, text } => {
                    if let Some((previous, buf)) = current.take() {
                        letters.insert(previous, join_lines(&buf));
                    }
                    current = Some((letter, vec![text.trim().to_string()]));
                }
                LineKind::PageNumber => {}
                _ => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push(self.lines[pos].trim().to_string());
                    }
                }
            }
            pos += 1;
        }

        if let Some((letter, buf)) = current {
            letters.insert(letter, join_lines(&buf));
        }

        let options = OptionLetter::ALL
            .iter()
            .filter_map(|letter| letters.remove(letter))
            .filter(|text| !text.is_empty())
            .collect();
        (options, pos)
    }
}
