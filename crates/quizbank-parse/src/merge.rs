//! Joining quiz sections with their solutions by section index and number.

use quizbank_core::{BankQuestion, BankSection, QuizSection, SolutionSection};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Diagnostic counts from a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Quiz questions seen.
    pub total: usize,
    /// Questions with options and a resolved answer index.
    pub matched: usize,
    /// Solutions with no quiz question to attach to.
    pub orphaned: usize,
}

/// Merge quiz section `1.<n>` with solution section `2.<n>`.
///
/// Output sections follow quiz order and carry the solution key.
pub fn merge_sections(quizzes: &[QuizSection], solutions: &[SolutionSection]) -> (Vec<BankSection>, MergeStats) {
    let by_key: HashMap<String, &SolutionSection> = solutions.iter().map(|s| (s.key(), s)).collect();
    let mut used: HashSet<(String, u32)> = HashSet::new();
    let mut stats = MergeStats::default();
    let mut sections = Vec::with_capacity(quizzes.len());

    for quiz in quizzes {
        let solution_key = quiz.solution_key();
        let solution_section = by_key.get(&solution_key);

        let questions = quiz
            .questions
            .iter()
            .map(|q| {
                stats.total += 1;
                let solution = solution_section.and_then(|s| s.entries.get(&q.number));
                if solution.is_some() {
                    used.insert((solution_key.clone(), q.number));
                }

                let answer = solution.and_then(|s| s.answer);
                let answer_index = answer.map(|letter| letter.index()).filter(|&index| {
                    let in_range = q.options.is_empty() || index < q.options.len();
                    if !in_range {
                        debug!(
                            "Answer {:?} of {} question {} is beyond its {} options",
                            answer,
                            solution_key,
                            q.number,
                            q.options.len()
                        );
                    }
                    in_range
                });

                if solution.is_some() && !q.options.is_empty() && answer_index.is_some() {
                    stats.matched += 1;
                }

                BankQuestion {
                    number: q.number,
                    question: q.question.clone(),
                    options: q.options.clone(),
                    answer,
                    answer_index,
                    explanation: solution.map(|s| s.explanation.clone()).unwrap_or_default(),
                    domain: solution.and_then(|s| s.domain.clone()).unwrap_or_default(),
                    competency: solution.and_then(|s| s.competency.clone()).unwrap_or_default(),
                }
            })
            .collect();

        sections.push(BankSection {
            section_key: solution_key,
            title: quiz.title.clone(),
            questions,
        });
    }

    stats.orphaned = solutions
        .iter()
        .flat_map(|s| {
            let key = s.key();
            s.entries.keys().map(move |&number| (key.clone(), number))
        })
        .filter(|entry| !used.contains(entry))
        .count();

    (sections, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_core::{OptionLetter, QuizQuestion, Solution};
    use std::collections::BTreeMap;

    fn quiz_section(index: &str, questions: Vec<QuizQuestion>) -> QuizSection {
        QuizSection {
            index: index.to_string(),
            title: format!("Section {}", index),
            questions,
        }
    }

    fn question(number: u32, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            number,
            question: format!("Question {}", number),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    fn solution_section(index: &str, entries: Vec<(u32, Solution)>) -> SolutionSection {
        SolutionSection {
            index: index.to_string(),
            title: format!("Section {}", index),
            entries: entries.into_iter().collect::<BTreeMap<_, _>>(),
        }
    }

    fn answer(letter: OptionLetter) -> Solution {
        Solution {
            answer: Some(letter),
            explanation: "Because.".to_string(),
            domain: Some("Fundamentals".to_string()),
            ..Solution::default()
        }
    }

    #[test]
    fn test_merges_matching_sections() {
        let quizzes = vec![quiz_section("3", vec![question(1, &["a", "b"]), question(2, &["c", "d"])])];
        let solutions = vec![solution_section("3", vec![(1, answer(OptionLetter::B))])];

        let (sections, stats) = merge_sections(&quizzes, &solutions);

        assert_eq!(sections[0].section_key, "2.3");
        assert_eq!(sections[0].title, "Section 3");
        let first = &sections[0].questions[0];
        assert_eq!(first.answer, Some(OptionLetter::B));
        assert_eq!(first.answer_index, Some(1));
        assert_eq!(first.explanation, "Because.");
        assert_eq!(first.domain, "Fundamentals");
        assert_eq!(first.competency, "");

        // Quiz-only question
        let second = &sections[0].questions[1];
        assert_eq!(second.answer, None);
        assert_eq!(second.answer_index, None);
        assert_eq!(second.explanation, "");
        assert_eq!(second.domain, "");

        assert_eq!(stats, MergeStats { total: 2, matched: 1, orphaned: 0 });
    }

    #[test]
    fn test_sections_do_not_cross_match() {
        let quizzes = vec![quiz_section("1", vec![question(1, &["a", "b"])])];
        let solutions = vec![solution_section("2", vec![(1, answer(OptionLetter::A))])];

        let (sections, stats) = merge_sections(&quizzes, &solutions);

        assert_eq!(sections[0].section_key, "2.1");
        assert_eq!(sections[0].questions[0].answer, None);
        assert_eq!(stats, MergeStats { total: 1, matched: 0, orphaned: 1 });
    }

    #[test]
    fn test_out_of_range_answer_has_no_index() {
        let quizzes = vec![quiz_section("1", vec![question(1, &["a", "b"])])];
        let solutions = vec![solution_section("1", vec![(1, answer(OptionLetter::E))])];

        let (sections, stats) = merge_sections(&quizzes, &solutions);

        let merged = &sections[0].questions[0];
        assert_eq!(merged.answer, Some(OptionLetter::E));
        assert_eq!(merged.answer_index, None);
        assert_eq!(stats.matched, 0);
    }

    #[test]
    fn test_answer_without_options_is_not_matched() {
        let quizzes = vec![quiz_section("1", vec![question(1, &[])])];
        let solutions = vec![solution_section("1", vec![(1, answer(OptionLetter::C))])];

        let (sections, stats) = merge_sections(&quizzes, &solutions);

        assert_eq!(sections[0].questions[0].answer_index, Some(2));
        assert_eq!(stats, MergeStats { total: 1, matched: 0, orphaned: 0 });
    }
}
