//! Parser for the "2 Solutions" part.

use crate::classify::{LineClassifier, LineKind, MetadataField, Part};
use crate::error::{ParseError, ParseResult};
use crate::normalize::{clean_line, join_fragments, join_lines, normalize_text};
use quizbank_core::{ParseMode, Solution, SolutionSection};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Parse the solutions part into sections of answers keyed by question number.
pub fn parse_solutions<S: AsRef<str>>(lines: &[S], mode: ParseMode) -> ParseResult<Vec<SolutionSection>> {
    SolutionParser::new(lines, mode).parse()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeSolutions,
    InSolutions,
}

struct SectionBuilder {
    index: String,
    title: String,
    entries: BTreeMap<u32, Solution>,
}

impl SectionBuilder {
    fn finish(self) -> SolutionSection {
        SolutionSection {
            index: self.index,
            title: self.title,
            entries: self.entries,
        }
    }
}

#[derive(Default)]
struct Accumulator {
    sections: Vec<SolutionSection>,
    current: Option<SectionBuilder>,
}

impl Accumulator {
    fn open_section(&mut self, index: &str, title: String) {
        self.close_section();
        debug!("Solution section 2.{}: {}", index, title);
        self.current = Some(SectionBuilder {
            index: index.to_string(),
            title,
            entries: BTreeMap::new(),
        });
    }

    fn close_section(&mut self) {
        if let Some(builder) = self.current.take() {
            let section = builder.finish();
            match self.sections.iter_mut().find(|s| s.index == section.index) {
                Some(existing) => *existing = section,
                None => self.sections.push(section),
            }
        }
    }

    fn finish(mut self) -> Vec<SolutionSection> {
        self.close_section();
        self.sections
    }
}

/// Explanation text plus the metadata found inside the explanation block.
#[derive(Default)]
struct ExplanationBlock {
    lines: Vec<String>,
    domain: Option<String>,
    competency: Option<String>,
}

struct SolutionParser {
    lines: Vec<String>,
    classifier: LineClassifier,
    mode: ParseMode,
}

impl SolutionParser {
    fn new<S: AsRef<str>>(lines: &[S], mode: ParseMode) -> Self {
        Self {
            lines: lines.iter().map(|l| clean_line(l.as_ref())).collect(),
            classifier: LineClassifier::new(Part::Solutions),
            mode,
        }
    }

    fn kind(&self, pos: usize) -> LineKind<'_> {
        self.classifier.classify(&self.lines[pos])
    }

    fn parse(&self) -> ParseResult<Vec<SolutionSection>> {
        let mut state = State::BeforeSolutions;
        let mut acc = Accumulator::default();
        let mut pos = 0;

        while pos < self.lines.len() {
            match (state, self.kind(pos)) {
                (State::BeforeSolutions, LineKind::PartHeader(Part::Solutions)) => {
                    state = State::InSolutions;
                    pos += 1;
                }
                (State::BeforeSolutions, _) => pos += 1,
                (State::InSolutions, LineKind::SectionHeader { index, title }) => {
                    acc.open_section(index, normalize_text(title));
                    pos += 1;
                }
                (State::InSolutions, LineKind::QuestionStart { number, text }) => {
                    let Some(section) = acc.current.as_mut() else {
                        if self.mode.is_strict() {
                            return Err(ParseError::UnexpectedLayout {
                                line: pos + 1,
                                message: format!("solution {} before any section header", number),
                            });
                        }
                        debug!("Skipping solution {} at line {}: no section", number, pos + 1);
                        pos += 1;
                        continue;
                    };
                    let (solution, next) = self.read_solution(pos, number, text)?;
                    section.entries.insert(number, solution);
                    pos = next;
                }
                (State::InSolutions, _) => pos += 1,
            }
        }

        if state == State::BeforeSolutions && self.mode.is_strict() {
            return Err(ParseError::MissingHeader(Part::Solutions.header().to_string()));
        }

        let sections = acc.finish();
        info!(
            "Parsed {} solutions in {} sections",
            sections.iter().map(|s| s.entries.len()).sum::<usize>(),
            sections.len()
        );
        Ok(sections)
    }

    /// Read the solution whose "N. Question" line is at `start`.
    fn read_solution(&self, start: usize, number: u32, text: &str) -> ParseResult<(Solution, usize)> {
        let mut fragments = vec![text.trim().to_string()];
        let mut pos = start + 1;

        while pos < self.lines.len() {
            match self.kind(pos) {
                LineKind::AnswerMarker(_) | LineKind::SectionHeader { .. } | LineKind::QuestionStart { .. } => break,
                LineKind::PageNumber => {}
                _ => fragments.push(self.lines[pos].trim().to_string()),
            }
            pos += 1;
        }

        let mut answer = None;
        let mut block = ExplanationBlock::default();

        while pos < self.lines.len() {
            match self.kind(pos) {
                LineKind::SectionHeader { .. } | LineKind::QuestionStart { .. } => break,
                LineKind::AnswerMarker(letter) => {
                    answer = Some(letter);
                    pos += 1;
                }
                LineKind::ExplanationMarker(rest) => {
                    block.lines.push(rest.trim().to_string());
                    pos = self.read_explanation(pos + 1, &mut block);
                    break;
                }
                // Anything between the answer and the explanation is dropped
                _ => pos += 1,
            }
        }

        if answer.is_none() {
            if self.mode.is_strict() {
                return Err(ParseError::UnexpectedLayout {
                    line: start + 1,
                    message: format!("solution {} has no correct answer", number),
                });
            }
            debug!("Solution {} at line {} has no correct answer", number, start + 1);
        }

        let solution = Solution {
            question: join_fragments(&fragments),
            answer,
            explanation: join_lines(&block.lines),
            domain: block.domain,
            competency: block.competency,
        };
        Ok((solution, pos))
    }

    /// Greedily collect explanation lines up to the next section or question.
    fn read_explanation(&self, start: usize, block: &mut ExplanationBlock) -> usize {
        let mut pos = start;
        while pos < self.lines.len() {
            match self.kind(pos) {
                LineKind::SectionHeader { .. } | LineKind::QuestionStart { .. } => break,
                LineKind::Metadata {
                    field: MetadataField::Domain,
                    value,
                } => block.domain = Some(normalize_text(value)),
                LineKind::Metadata {
                    field: MetadataField::Competency,
                    value,
                } => block.competency = Some(normalize_text(value)),
                LineKind::PageNumber | LineKind::ReturnLink => {}
                _ => block.lines.push(self.lines[pos].trim().to_string()),
            }
            pos += 1;
        }
        pos
    }
}
