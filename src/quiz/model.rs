//! Question model
//!
//! A question is either single-selection (one correct option) or
//! multiple-selection (a non-empty set of correct options). The two shapes are
//! a sum type so every consumer (answer checking, scoring, rendering) has to
//! handle both.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category used when a question carries none
pub const DEFAULT_CATEGORY: &str = "General";

/// The correct answer(s) of a question, as 0-based option indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "selection_type", rename_all = "snake_case")]
pub enum AnswerKey {
    /// Exactly one option is correct
    Single { correct_answer: usize },
    /// Every listed option must be selected (sorted, no duplicates)
    Multiple { correct_answers: Vec<usize> },
}

impl AnswerKey {
    /// Number of options a complete answer selects
    pub fn required_count(&self) -> usize {
        match self {
            AnswerKey::Single { .. } => 1,
            AnswerKey::Multiple { correct_answers } => correct_answers.len(),
        }
    }

    /// Whether `index` is one of the correct options
    pub fn contains(&self, index: usize) -> bool {
        match self {
            AnswerKey::Single { correct_answer } => *correct_answer == index,
            AnswerKey::Multiple { correct_answers } => correct_answers.contains(&index),
        }
    }

    /// Correct indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        match self {
            AnswerKey::Single { correct_answer } => vec![*correct_answer],
            AnswerKey::Multiple { correct_answers } => correct_answers.clone(),
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self, AnswerKey::Multiple { .. })
    }
}

/// Errors from building a question by hand
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuestionError {
    /// The question has no options to choose from
    #[error("question has no options")]
    NoOptions,

    /// A multiple-selection key lists no correct options
    #[error("multiple-selection question has no correct answers")]
    EmptyAnswerKey,

    /// A correct index points past the option list
    #[error("correct answer index {index} is out of range for {len} options")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of options
        len: usize,
    },
}

/// A single quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text
    pub question: String,
    /// Answer options in display order
    pub options: Vec<String>,
    /// Correct answer(s)
    #[serde(flatten)]
    pub answer: AnswerKey,
    /// Shown after checking an answer and on the review screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Grouping tag for the results breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Weight in weighted scoring
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    1
}

impl Question {
    /// Create a question, checking that every correct index is a valid option
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        answer: AnswerKey,
    ) -> Result<Self, QuestionError> {
        let answer = match answer {
            AnswerKey::Multiple { correct_answers } => {
                let set: BTreeSet<usize> = correct_answers.into_iter().collect();
                AnswerKey::Multiple { correct_answers: set.into_iter().collect() }
            }
            single => single,
        };

        let question = Self {
            question: question.into(),
            options,
            answer,
            explanation: None,
            category: None,
            points: default_points(),
        };
        question.validate()?;
        Ok(question)
    }

    /// Set the explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the point weight
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    /// Check the index invariant
    pub fn validate(&self) -> Result<(), QuestionError> {
        let len = self.options.len();
        if len == 0 {
            return Err(QuestionError::NoOptions);
        }
        if let AnswerKey::Multiple { correct_answers } = &self.answer {
            if correct_answers.is_empty() {
                return Err(QuestionError::EmptyAnswerKey);
            }
        }
        match self.answer.indices().into_iter().find(|&i| i >= len) {
            Some(index) => Err(QuestionError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Category name, falling back to [`DEFAULT_CATEGORY`]
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// A fresh, unanswered selection of the right shape
    pub fn empty_selection(&self) -> Selection {
        match self.answer {
            AnswerKey::Single { .. } => Selection::Single(None),
            AnswerKey::Multiple { .. } => Selection::Multiple(BTreeSet::new()),
        }
    }
}

/// The user's current answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Chosen option of a single-selection question, `None` when unanswered
    Single(Option<usize>),
    /// Checked options of a multiple-selection question
    Multiple(BTreeSet<usize>),
}

impl Selection {
    /// Selected indices in ascending order
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Selection::Single(choice) => choice.iter().copied().collect(),
            Selection::Multiple(set) => set.iter().copied().collect(),
        }
    }

    /// Whether `index` is currently selected
    pub fn contains(&self, index: usize) -> bool {
        match self {
            Selection::Single(choice) => *choice == Some(index),
            Selection::Multiple(set) => set.contains(&index),
        }
    }

    /// Number of selected options
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(choice) => usize::from(choice.is_some()),
            Selection::Multiple(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Option {}", i)).collect()
    }

    #[test]
    fn new_accepts_valid_single() {
        let q = Question::new("Q", options(3), AnswerKey::Single { correct_answer: 2 }).unwrap();
        assert_eq!(q.points, 1);
        assert_eq!(q.category_name(), DEFAULT_CATEGORY);
    }

    #[test]
    fn new_rejects_out_of_range_single() {
        let err = Question::new("Q", options(3), AnswerKey::Single { correct_answer: 3 });
        assert_eq!(err, Err(QuestionError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn new_normalizes_multiple_key() {
        let q = Question::new("Q", options(4), AnswerKey::Multiple { correct_answers: vec![3, 1, 3] })
            .unwrap();
        assert_eq!(q.answer, AnswerKey::Multiple { correct_answers: vec![1, 3] });
        assert_eq!(q.answer.required_count(), 2);
    }

    #[test]
    fn new_rejects_empty_multiple_key() {
        let err = Question::new("Q", options(2), AnswerKey::Multiple { correct_answers: vec![] });
        assert_eq!(err, Err(QuestionError::EmptyAnswerKey));
    }

    #[test]
    fn new_rejects_no_options() {
        let err = Question::new("Q", vec![], AnswerKey::Single { correct_answer: 0 });
        assert_eq!(err, Err(QuestionError::NoOptions));
    }

    #[test]
    fn empty_selection_matches_shape() {
        let single = Question::new("Q", options(2), AnswerKey::Single { correct_answer: 0 }).unwrap();
        let multi =
            Question::new("Q", options(2), AnswerKey::Multiple { correct_answers: vec![0, 1] })
                .unwrap();
        assert_eq!(single.empty_selection(), Selection::Single(None));
        assert!(matches!(multi.empty_selection(), Selection::Multiple(s) if s.is_empty()));
    }

    #[test]
    fn question_serializes_with_selection_type_tag() {
        let q = Question::new("Q", options(2), AnswerKey::Single { correct_answer: 1 })
            .unwrap()
            .with_category("Security");
        let json = serde_json::to_string(&q).unwrap();
        assert!(json.contains(r#""selection_type":"single""#));
        assert!(json.contains(r#""correct_answer":1"#));

        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }
}
