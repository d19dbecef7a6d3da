//! Answer checking and scoring
//!
//! Everything here is a pure function of the question list and the current
//! selections. Nothing is cached, so derived values can never drift from the
//! selections they describe.

use super::model::{AnswerKey, Question, Selection};
use super::settings::{AnswerRule, ScoringMode};

/// Whether `selection` is a complete answer to `question`
pub fn is_answered(question: &Question, selection: &Selection, rule: AnswerRule) -> bool {
    match (&question.answer, selection) {
        (AnswerKey::Single { .. }, Selection::Single(choice)) => choice.is_some(),
        (AnswerKey::Multiple { correct_answers }, Selection::Multiple(set)) => match rule {
            AnswerRule::Exact => set.len() == correct_answers.len(),
            AnswerRule::AnyNonEmpty => !set.is_empty(),
        },
        _ => false,
    }
}

/// Whether `selection` is exactly the correct answer. No partial credit.
pub fn is_correct(question: &Question, selection: &Selection) -> bool {
    match (&question.answer, selection) {
        (AnswerKey::Single { correct_answer }, Selection::Single(choice)) => {
            *choice == Some(*correct_answer)
        }
        (AnswerKey::Multiple { correct_answers }, Selection::Multiple(set)) => {
            set.len() == correct_answers.len() && correct_answers.iter().all(|i| set.contains(i))
        }
        _ => false,
    }
}

/// Earned versus possible units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    /// Units earned (questions or points)
    pub correct: u64,
    /// Units available
    pub total: u64,
}

impl Score {
    /// Rounded percentage, 0 when nothing was available
    pub fn percentage(&self) -> u8 {
        percentage(self.correct, self.total)
    }
}

/// `round(correct / total * 100)`, halves rounding up
pub fn percentage(correct: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u128::from(correct), u128::from(total));
    ((correct * 200 + total) / (2 * total)).min(100) as u8
}

/// Units a question is worth in `mode`
fn weight(question: &Question, mode: ScoringMode) -> u64 {
    match mode {
        ScoringMode::Count => 1,
        ScoringMode::Weighted => u64::from(question.points),
    }
}

/// Score a run
pub fn score(questions: &[Question], selections: &[Selection], mode: ScoringMode) -> Score {
    questions.iter().zip(selections).fold(Score::default(), |mut acc, (q, s)| {
        acc.total += weight(q, mode);
        if is_correct(q, s) {
            acc.correct += weight(q, mode);
        }
        acc
    })
}

/// Result line for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub name: String,
    pub correct: u64,
    pub total: u64,
}

impl CategoryScore {
    pub fn percentage(&self) -> u8 {
        percentage(self.correct, self.total)
    }
}

/// Per-category scores in the same units as [`score`], in order of first appearance
pub fn category_breakdown(
    questions: &[Question],
    selections: &[Selection],
    mode: ScoringMode,
) -> Vec<CategoryScore> {
    let mut categories: Vec<CategoryScore> = Vec::new();

    for (q, s) in questions.iter().zip(selections) {
        let name = q.category_name();
        let idx = match categories.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                categories.push(CategoryScore { name: name.to_string(), correct: 0, total: 0 });
                categories.len() - 1
            }
        };

        categories[idx].total += weight(q, mode);
        if is_correct(q, s) {
            categories[idx].correct += weight(q, mode);
        }
    }

    categories
}

/// Performance tier shown on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Perfect,
    Outstanding,
    Excellent,
    Good,
    KeepLearning,
    KeepPracticing,
}

impl Feedback {
    /// Tier for a percentage
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            100.. => Feedback::Perfect,
            90..=99 => Feedback::Outstanding,
            80..=89 => Feedback::Excellent,
            70..=79 => Feedback::Good,
            60..=69 => Feedback::KeepLearning,
            _ => Feedback::KeepPracticing,
        }
    }

    /// Headline, personalized when a name is known
    pub fn message(&self, name: Option<&str>) -> String {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        match (self, name) {
            (Feedback::Perfect, Some(n)) => format!("{}, Perfect Score!", n),
            (Feedback::Perfect, None) => "Perfect Score!".to_string(),
            (Feedback::Outstanding, Some(n)) => format!("Outstanding, {}!", n),
            (Feedback::Outstanding, None) => "Outstanding!".to_string(),
            (Feedback::Excellent, Some(n)) => format!("Excellent Work, {}!", n),
            (Feedback::Excellent, None) => "Excellent Work!".to_string(),
            (Feedback::Good, Some(n)) => format!("Good Job, {}!", n),
            (Feedback::Good, None) => "Good Job!".to_string(),
            (Feedback::KeepLearning, Some(n)) => format!("Keep Learning, {}!", n),
            (Feedback::KeepLearning, None) => "Keep Learning!".to_string(),
            (Feedback::KeepPracticing, Some(n)) => format!("Keep Practicing, {}!", n),
            (Feedback::KeepPracticing, None) => "Keep Practicing!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use pretty_assertions::assert_eq;

    fn single(correct: usize) -> Question {
        Question::new("Q", vec!["A".into(), "B".into(), "C".into()], AnswerKey::Single {
            correct_answer: correct,
        })
        .unwrap()
    }

    fn multiple(correct: &[usize]) -> Question {
        let options = (0..5).map(|i| i.to_string()).collect();
        Question::new("Q", options, AnswerKey::Multiple { correct_answers: correct.to_vec() })
            .unwrap()
    }

    fn set(indices: &[usize]) -> Selection {
        Selection::Multiple(indices.iter().copied().collect::<BTreeSet<_>>())
    }

    #[test]
    fn single_answered_and_correct() {
        let q = single(1);
        assert!(!is_answered(&q, &Selection::Single(None), AnswerRule::Exact));
        assert!(is_answered(&q, &Selection::Single(Some(0)), AnswerRule::Exact));
        assert!(is_correct(&q, &Selection::Single(Some(1))));
        assert!(!is_correct(&q, &Selection::Single(Some(2))));
    }

    #[test]
    fn multiple_answered_depends_on_rule() {
        let q = multiple(&[0, 2]);
        assert!(!is_answered(&q, &set(&[0]), AnswerRule::Exact));
        assert!(is_answered(&q, &set(&[0]), AnswerRule::AnyNonEmpty));
        assert!(is_answered(&q, &set(&[0, 4]), AnswerRule::Exact));
        assert!(!is_answered(&q, &set(&[]), AnswerRule::AnyNonEmpty));
    }

    #[test]
    fn multiple_requires_exact_set() {
        let q = multiple(&[0, 2]);
        assert!(is_correct(&q, &set(&[0, 2])));
        assert!(!is_correct(&q, &set(&[0])), "strict subset");
        assert!(!is_correct(&q, &set(&[0, 1, 2])), "strict superset");
        assert!(!is_correct(&q, &set(&[0, 1])), "same size, partial overlap");
    }

    #[test]
    fn mismatched_selection_shape_is_never_correct() {
        assert!(!is_correct(&single(0), &set(&[0])));
        assert!(!is_answered(&multiple(&[0]), &Selection::Single(Some(0)), AnswerRule::Exact));
    }

    #[test]
    fn weighted_score_percentage() {
        let questions =
            vec![single(0).with_points(1), single(0).with_points(20), single(0).with_points(20)];
        let selections = vec![
            Selection::Single(Some(1)),
            Selection::Single(Some(0)),
            Selection::Single(Some(0)),
        ];

        let weighted = score(&questions, &selections, ScoringMode::Weighted);
        assert_eq!(weighted, Score { correct: 40, total: 41 });
        assert_eq!(weighted.percentage(), 98);

        let counted = score(&questions, &selections, ScoringMode::Count);
        assert_eq!(counted, Score { correct: 2, total: 3 });
        assert_eq!(counted.percentage(), 67);
    }

    #[test]
    fn percentage_of_nothing_is_zero() {
        assert_eq!(Score::default().percentage(), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
    }

    #[test]
    fn breakdown_keeps_first_appearance_order() {
        let questions = vec![
            single(0).with_category("Security"),
            single(0),
            single(0).with_category("Security"),
        ];
        let selections = vec![
            Selection::Single(Some(0)),
            Selection::Single(Some(0)),
            Selection::Single(Some(2)),
        ];

        let breakdown = category_breakdown(&questions, &selections, ScoringMode::Count);
        assert_eq!(breakdown, vec![
            CategoryScore { name: "Security".into(), correct: 1, total: 2 },
            CategoryScore { name: "General".into(), correct: 1, total: 1 },
        ]);
        assert_eq!(breakdown[0].percentage(), 50);
    }

    #[test]
    fn breakdown_uses_points_when_weighted() {
        let questions = vec![
            single(0).with_category("Security").with_points(5),
            single(0).with_category("Security").with_points(1),
        ];
        let selections = vec![Selection::Single(Some(0)), Selection::Single(Some(1))];

        let breakdown = category_breakdown(&questions, &selections, ScoringMode::Weighted);
        assert_eq!(breakdown, vec![CategoryScore {
            name: "Security".into(),
            correct: 5,
            total: 6
        }]);
        assert_eq!(breakdown[0].percentage(), 83);
    }

    #[test]
    fn weighted_totals_beyond_u32_do_not_overflow() {
        let questions = vec![
            single(0).with_points(u32::MAX),
            single(0).with_points(u32::MAX),
            single(0).with_points(u32::MAX),
        ];
        let selections = vec![
            Selection::Single(Some(0)),
            Selection::Single(Some(0)),
            Selection::Single(Some(1)),
        ];

        let weighted = score(&questions, &selections, ScoringMode::Weighted);
        assert_eq!(weighted.total, 3 * u64::from(u32::MAX));
        assert_eq!(weighted.correct, 2 * u64::from(u32::MAX));
        assert_eq!(weighted.percentage(), 67);
    }

    #[test]
    fn feedback_tiers() {
        assert_eq!(Feedback::from_percentage(100), Feedback::Perfect);
        assert_eq!(Feedback::from_percentage(90), Feedback::Outstanding);
        assert_eq!(Feedback::from_percentage(89), Feedback::Excellent);
        assert_eq!(Feedback::from_percentage(70), Feedback::Good);
        assert_eq!(Feedback::from_percentage(60), Feedback::KeepLearning);
        assert_eq!(Feedback::from_percentage(0), Feedback::KeepPracticing);
    }

    #[test]
    fn feedback_message_uses_name() {
        assert_eq!(Feedback::Good.message(Some("Sam")), "Good Job, Sam!");
        assert_eq!(Feedback::Perfect.message(Some("  ")), "Perfect Score!");
        assert_eq!(Feedback::KeepPracticing.message(None), "Keep Practicing!");
    }
}
