//! Quiz run state machine
//!
//! A [`QuizRun`] owns one attempt at a question set: the (possibly shuffled
//! and truncated) question list, one [`Selection`] per question, the current
//! position and the lifecycle [`Phase`]. Every operation is synchronous and
//! applied in the order the caller dispatches it. Operations that make no
//! sense in the current phase or for the given index are silent no-ops.
//!
//! Time is pushed in from outside through [`QuizRun::elapse`], which drives
//! both the overall countdown and the pending auto-advance.

use std::time::Duration;

use rand::rngs::StdRng;
use thiserror::Error;

use super::model::{AnswerKey, Question, Selection};
use super::score::{self, CategoryScore, Feedback, Score};
use super::settings::{AnswerRule, QuizSettings, SettingsError};
use super::shuffle::{rng_from_seed, shuffle};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Coarse lifecycle stage of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player's name
    NotStarted,
    InProgress,
    Finished,
}

/// Errors creating a run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid quiz settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("question set is empty")]
    NoQuestions,
}

/// One line of the results review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// Position in the run (0-based)
    pub index: usize,
    pub is_correct: bool,
    /// What the player picked, ascending
    pub selected: Vec<usize>,
    /// The correct options, ascending
    pub expected: Vec<usize>,
}

/// A single attempt at a question set
#[derive(Debug)]
pub struct QuizRun {
    /// Full set the run draws from
    source: Vec<Question>,
    settings: QuizSettings,
    rng: StdRng,

    questions: Vec<Question>,
    selections: Vec<Selection>,
    /// Bumped whenever `selections` is replaced
    revision: u64,
    current: usize,
    phase: Phase,
    player_name: Option<String>,

    show_explanation: bool,
    auto_advance_enabled: bool,
    pending_advance: Option<Duration>,

    remaining_seconds: Option<u32>,
    /// Time accumulated toward the next whole-second decrement
    partial_second: Duration,
}

impl QuizRun {
    /// Start a run over `questions` with `settings`
    pub fn new(questions: Vec<Question>, settings: QuizSettings) -> Result<Self, RunError> {
        settings.validate()?;
        if questions.is_empty() {
            return Err(RunError::NoQuestions);
        }

        let mut run = Self {
            rng: rng_from_seed(settings.seed),
            auto_advance_enabled: settings.auto_advance,
            phase: if settings.require_name { Phase::NotStarted } else { Phase::InProgress },
            source: questions,
            settings,
            questions: Vec::new(),
            selections: Vec::new(),
            revision: 0,
            current: 0,
            player_name: None,
            show_explanation: false,
            pending_advance: None,
            remaining_seconds: None,
            partial_second: Duration::ZERO,
        };
        run.rebuild();

        tracing::debug!(
            questions = run.questions.len(),
            available = run.source.len(),
            phase = ?run.phase,
            "Created quiz run"
        );
        Ok(run)
    }

    /// Recompute the question list and clear all per-run state
    fn rebuild(&mut self) {
        let mut list = self.source.clone();
        if self.settings.randomize {
            list = shuffle(list, &mut self.rng);
        }
        if let Some(max) = self.settings.max_questions {
            list.truncate(max);
        }

        self.selections = list.iter().map(Question::empty_selection).collect();
        self.questions = list;
        self.revision += 1;
        self.current = 0;
        self.show_explanation = false;
        self.pending_advance = None;
        self.remaining_seconds = self.settings.time_limit_seconds.filter(|&s| s > 0);
        self.partial_second = Duration::ZERO;
    }

    // ---- accessors ----

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Changes whenever the selection list is replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_selection(&self) -> Option<&Selection> {
        self.selections.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    pub fn explanation_visible(&self) -> bool {
        self.show_explanation
    }

    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance_enabled
    }

    /// Time left before a scheduled auto-advance fires
    pub fn auto_advance_remaining(&self) -> Option<Duration> {
        self.pending_advance
    }

    // ---- transitions ----

    /// Leave the name gate. Blank names are ignored.
    pub fn start(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.phase != Phase::NotStarted || name.is_empty() {
            return false;
        }

        self.player_name = Some(name.to_string());
        self.phase = Phase::InProgress;
        tracing::info!(player = name, "Quiz started");
        true
    }

    /// Apply a click on option `index` of the current question
    ///
    /// Returns whether the click was accepted. Single-selection questions take
    /// the new index; multiple-selection questions toggle it, refusing to grow
    /// past the number of correct answers under [`AnswerRule::Exact`].
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.phase != Phase::InProgress {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        if index >= question.options.len() {
            return false;
        }

        let required = question.answer.required_count();
        let mut next = self.selections[self.current].clone();
        match &mut next {
            Selection::Single(choice) => *choice = Some(index),
            Selection::Multiple(set) => {
                if !set.remove(&index) {
                    let capped = self.settings.answer_rule == AnswerRule::Exact;
                    if capped && set.len() >= required {
                        return false;
                    }
                    set.insert(index);
                }
            }
        }

        let qualifies = match &question.answer {
            AnswerKey::Single { .. } => true,
            AnswerKey::Multiple { .. } => next.len() == required,
        };

        if next != self.selections[self.current] {
            let mut selections = self.selections.clone();
            selections[self.current] = next;
            self.selections = selections;
            self.revision += 1;
        }

        if self.auto_advance_enabled {
            self.pending_advance = qualifies.then(|| self.settings.auto_advance_delay());
        }
        true
    }

    /// Move to the next question, or finish from the last one
    pub fn advance(&mut self) {
        if self.phase != Phase::InProgress {
            return;
        }
        self.clear_ephemeral();

        if self.is_last() {
            self.finish();
        } else {
            self.current += 1;
        }
    }

    /// Move to the previous question
    ///
    /// Unavailable in timed runs and while auto-advance is on.
    pub fn retreat(&mut self) {
        if !self.can_retreat() {
            return;
        }
        self.clear_ephemeral();
        self.current -= 1;
    }

    /// Retake: fresh question list, no selections, full time limit
    pub fn reset(&mut self) {
        let started = self.phase != Phase::NotStarted;
        self.rebuild();
        self.phase = if started { Phase::InProgress } else { Phase::NotStarted };
        tracing::info!(questions = self.questions.len(), "Quiz reset");
    }

    /// Reveal the explanation for the current, answered question
    pub fn reveal_explanation(&mut self) -> bool {
        if !self.can_check_answer() {
            return false;
        }
        self.show_explanation = true;
        true
    }

    /// Flip the auto-advance switch (only when the run was configured with it)
    pub fn toggle_auto_advance(&mut self) -> bool {
        if !self.settings.auto_advance {
            return false;
        }
        self.auto_advance_enabled = !self.auto_advance_enabled;
        if !self.auto_advance_enabled {
            self.pending_advance = None;
        } else {
            self.show_explanation = false;
        }
        true
    }

    /// Let `dt` of wall time pass
    pub fn elapse(&mut self, dt: Duration) {
        if self.phase != Phase::InProgress {
            return;
        }

        if let Some(mut remaining) = self.remaining_seconds {
            self.partial_second += dt;
            while self.partial_second >= ONE_SECOND && remaining > 0 {
                self.partial_second -= ONE_SECOND;
                remaining -= 1;
            }
            self.remaining_seconds = Some(remaining);

            if remaining == 0 {
                tracing::info!("Time limit reached");
                self.finish();
                return;
            }
        }

        if let Some(pending) = self.pending_advance {
            if dt >= pending {
                self.pending_advance = None;
                self.advance();
            } else {
                self.pending_advance = Some(pending - dt);
            }
        }
    }

    /// One second of wall time
    pub fn tick(&mut self) {
        self.elapse(ONE_SECOND);
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.clear_ephemeral();

        let score = self.score();
        tracing::info!(
            correct = score.correct,
            total = score.total,
            percentage = score.percentage(),
            "Quiz finished"
        );
    }

    fn clear_ephemeral(&mut self) {
        self.show_explanation = false;
        self.pending_advance = None;
    }

    // ---- derived state ----

    /// Whether question `i` has a complete answer
    pub fn is_answered(&self, i: usize) -> bool {
        match (self.questions.get(i), self.selections.get(i)) {
            (Some(q), Some(s)) => score::is_answered(q, s, self.settings.answer_rule),
            _ => false,
        }
    }

    /// Whether question `i` is answered exactly right
    pub fn is_correct(&self, i: usize) -> bool {
        match (self.questions.get(i), self.selections.get(i)) {
            (Some(q), Some(s)) => score::is_correct(q, s),
            _ => false,
        }
    }

    /// Whether "Next"/"Finish" is enabled
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::InProgress && self.is_answered(self.current)
    }

    /// Whether "Previous" is enabled
    pub fn can_retreat(&self) -> bool {
        self.phase == Phase::InProgress
            && self.current > 0
            && !self.settings.is_timed()
            && !self.auto_advance_enabled
    }

    /// Whether "Check Answer" is offered
    pub fn can_check_answer(&self) -> bool {
        self.phase == Phase::InProgress
            && !self.settings.hide_check_answer
            && !self.auto_advance_enabled
            && !self.show_explanation
            && self.is_answered(self.current)
    }

    /// Score in the configured mode
    pub fn score(&self) -> Score {
        score::score(&self.questions, &self.selections, self.settings.scoring)
    }

    /// Whether the score meets the pass threshold
    pub fn passed(&self) -> bool {
        self.score().percentage() >= self.settings.pass_percentage
    }

    pub fn feedback(&self) -> Feedback {
        Feedback::from_percentage(self.score().percentage())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryScore> {
        score::category_breakdown(&self.questions, &self.selections, self.settings.scoring)
    }

    /// Position of the current question within its category, 1-based
    pub fn category_position(&self) -> Option<(usize, usize)> {
        let category = self.current_question()?.category_name();
        let in_category = |q: &&Question| q.category_name() == category;

        let position = self.questions[..=self.current].iter().filter(in_category).count();
        let total = self.questions.iter().filter(in_category).count();
        Some((position, total))
    }

    /// Per-question review for the results screen
    pub fn review(&self) -> Vec<ReviewEntry> {
        self.questions
            .iter()
            .zip(&self.selections)
            .enumerate()
            .map(|(index, (q, s))| ReviewEntry {
                index,
                is_correct: score::is_correct(q, s),
                selected: s.indices(),
                expected: q.answer.indices(),
            })
            .collect()
    }
}
