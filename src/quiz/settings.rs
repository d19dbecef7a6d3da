//! Per-run quiz configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default delay before an auto-advance fires
pub const DEFAULT_AUTO_ADVANCE_DELAY_MS: u64 = 1500;

/// Default pass threshold in percent
pub const DEFAULT_PASS_PERCENTAGE: u8 = 70;

/// When a multiple-selection question counts as answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerRule {
    /// Exactly as many options as there are correct answers. Selections are
    /// capped at that count.
    #[default]
    Exact,
    /// Any non-empty selection, no cap
    AnyNonEmpty,
}

/// How a run is scored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// One unit per correct question
    #[default]
    Count,
    /// Each correct question contributes its points
    Weighted,
}

/// Invalid quiz configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("max_questions must be at least 1")]
    ZeroMaxQuestions,

    #[error("time_limit_seconds must be at least 1")]
    ZeroTimeLimit,

    #[error("auto_advance_delay_ms must be at least 1")]
    ZeroAutoAdvanceDelay,

    #[error("pass_percentage must be between 0 and 100, got {0}")]
    PassPercentageOutOfRange(u8),
}

/// Configuration for one quiz run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// Display label
    pub title: String,
    /// Show the category badge and per-category results
    pub show_categories: bool,
    /// Shuffle question order on every run
    pub randomize: bool,
    /// Keep only the first N questions after shuffling
    pub max_questions: Option<usize>,
    /// Hide the "Check Answer" control
    pub hide_check_answer: bool,
    /// Advance automatically after a complete selection
    pub auto_advance: bool,
    /// Delay before auto-advancing, in milliseconds
    pub auto_advance_delay_ms: u64,
    /// Ask for a name before starting
    pub require_name: bool,
    /// Overall countdown; the run finishes when it reaches zero
    pub time_limit_seconds: Option<u32>,
    /// Multiple-selection answered rule
    pub answer_rule: AnswerRule,
    /// Count or weighted scoring
    pub scoring: ScoringMode,
    /// Minimum percentage that counts as a pass
    pub pass_percentage: u8,
    /// Seed for reproducible shuffles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            title: "Quiz".to_string(),
            show_categories: true,
            randomize: false,
            max_questions: None,
            hide_check_answer: false,
            auto_advance: false,
            auto_advance_delay_ms: DEFAULT_AUTO_ADVANCE_DELAY_MS,
            require_name: false,
            time_limit_seconds: None,
            answer_rule: AnswerRule::default(),
            scoring: ScoringMode::default(),
            pass_percentage: DEFAULT_PASS_PERCENTAGE,
            seed: None,
        }
    }
}

impl QuizSettings {
    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_questions == Some(0) {
            return Err(SettingsError::ZeroMaxQuestions);
        }
        if self.time_limit_seconds == Some(0) {
            return Err(SettingsError::ZeroTimeLimit);
        }
        if self.auto_advance && self.auto_advance_delay_ms == 0 {
            return Err(SettingsError::ZeroAutoAdvanceDelay);
        }
        if self.pass_percentage > 100 {
            return Err(SettingsError::PassPercentageOutOfRange(self.pass_percentage));
        }
        Ok(())
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_delay_ms)
    }

    /// Whether the run has an overall countdown
    pub fn is_timed(&self) -> bool {
        self.time_limit_seconds.is_some_and(|s| s > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = QuizSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.auto_advance_delay(), Duration::from_millis(1500));
        assert!(!settings.is_timed());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let settings = QuizSettings { max_questions: Some(0), ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroMaxQuestions));

        let settings = QuizSettings { time_limit_seconds: Some(0), ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroTimeLimit));

        let settings =
            QuizSettings { auto_advance: true, auto_advance_delay_ms: 0, ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroAutoAdvanceDelay));
    }

    #[test]
    fn pass_percentage_over_100_is_rejected() {
        let settings = QuizSettings { pass_percentage: 101, ..Default::default() };
        assert_eq!(settings.validate(), Err(SettingsError::PassPercentageOutOfRange(101)));
    }

    #[test]
    fn deserializes_partial_json() {
        let json = r#"{"randomize":true,"answer_rule":"any_non_empty","scoring":"weighted"}"#;
        let settings: QuizSettings = serde_json::from_str(json).unwrap();
        assert!(settings.randomize);
        assert_eq!(settings.answer_rule, AnswerRule::AnyNonEmpty);
        assert_eq!(settings.scoring, ScoringMode::Weighted);
        assert_eq!(settings.title, "Quiz");
    }
}
