//! Quizbank Core - Domain types for the exam-prep question bank.

mod types;

pub use types::*;
