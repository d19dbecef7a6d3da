//! Application state definitions

use std::time::Duration;

use super::input::Action;
use crate::quiz::{Phase, QuizRun};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NameEntry,
    Question,
    Results,
}

/// Text field for the player's name
#[derive(Debug, Clone, Default)]
pub struct NameInput {
    /// Input buffer
    pub input: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl NameInput {
    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.input.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Whether the trimmed input is usable as a name
    pub fn is_valid(&self) -> bool {
        !self.input.trim().is_empty()
    }
}

/// Full application state
#[derive(Debug)]
pub struct AppState {
    /// The quiz being taken
    pub run: QuizRun,

    /// Records dropped while loading the set
    pub skipped: usize,

    /// Highlighted option on the question screen
    pub cursor: usize,

    /// Name entry field
    pub name: NameInput,

    /// First visible review row on the results screen
    pub review_scroll: usize,

    /// Last scroll offset that still fills the review pane
    pub review_max_scroll: usize,

    /// Help overlay visible
    pub show_help: bool,

    /// One-line status message
    pub message: Option<String>,
}

impl AppState {
    pub fn new(run: QuizRun, skipped: usize) -> Self {
        Self {
            run,
            skipped,
            cursor: 0,
            name: NameInput::default(),
            review_scroll: 0,
            review_max_scroll: 0,
            show_help: false,
            message: None,
        }
    }

    /// Screen for the run's current phase
    pub fn screen(&self) -> Screen {
        match self.run.phase() {
            Phase::NotStarted => Screen::NameEntry,
            Phase::InProgress => Screen::Question,
            Phase::Finished => Screen::Results,
        }
    }

    /// Record the scroll limit of the review pane as last drawn
    pub fn set_review_max_scroll(&mut self, max: usize) {
        self.review_max_scroll = max;
        self.review_scroll = self.review_scroll.min(max);
    }

    /// Submit the name field
    pub fn submit_name(&mut self) {
        if self.run.start(&self.name.input) {
            self.message = None;
        } else {
            self.message = Some("Please enter your name to begin".to_string());
        }
    }

    /// Let wall time pass
    pub fn tick(&mut self, dt: Duration) {
        let before = (self.run.phase(), self.run.current_index());
        self.run.elapse(dt);
        self.after_transition(before);
    }

    /// Apply an action, returns true if the app should exit
    pub fn apply(&mut self, action: Action) -> bool {
        if action == Action::Quit {
            return true;
        }
        if self.show_help {
            self.show_help = false;
            return false;
        }
        if action == Action::Help {
            self.show_help = true;
            return false;
        }

        let before = (self.run.phase(), self.run.current_index());
        match self.screen() {
            Screen::NameEntry => {}
            Screen::Question => self.apply_question(action),
            Screen::Results => self.apply_results(action),
        }
        self.after_transition(before);
        false
    }

    fn apply_question(&mut self, action: Action) {
        let option_count = self.run.current_question().map_or(0, |q| q.options.len());

        match action {
            Action::Up => self.cursor = self.cursor.saturating_sub(1),
            Action::Down => {
                if self.cursor + 1 < option_count {
                    self.cursor += 1;
                }
            }
            Action::Select => self.select(self.cursor),
            Action::Pick(i) if i < option_count => {
                self.cursor = i;
                self.select(i);
            }
            Action::CheckAnswer => {
                if !self.run.reveal_explanation() && !self.run.is_answered(self.run.current_index())
                {
                    self.message = Some("Answer the question to check it".to_string());
                }
            }
            Action::Next => {
                if self.run.can_advance() {
                    self.run.advance();
                } else {
                    self.message = Some(self.unanswered_hint());
                }
            }
            Action::Previous => self.run.retreat(),
            Action::ToggleAutoAdvance => {
                if self.run.toggle_auto_advance() {
                    let state = if self.run.auto_advance_enabled() { "on" } else { "off" };
                    self.message = Some(format!("Auto-advance {}", state));
                }
            }
            _ => {}
        }
    }

    fn apply_results(&mut self, action: Action) {
        let max_scroll = self.review_max_scroll;
        match action {
            Action::Up => self.review_scroll = self.review_scroll.saturating_sub(1),
            Action::Down => self.review_scroll = (self.review_scroll + 1).min(max_scroll),
            Action::PageUp => self.review_scroll = self.review_scroll.saturating_sub(10),
            Action::PageDown => self.review_scroll = (self.review_scroll + 10).min(max_scroll),
            Action::Retake => {
                self.run.reset();
                self.review_scroll = 0;
            }
            _ => {}
        }
    }

    fn select(&mut self, index: usize) {
        if self.run.select_option(index) {
            self.message = None;
        } else if let Some(q) = self.run.current_question() {
            self.message = Some(format!(
                "Only {} answers allowed, deselect one first",
                q.answer.required_count()
            ));
        }
    }

    fn unanswered_hint(&self) -> String {
        match self.run.current_question() {
            Some(q) if q.answer.is_multiple() => {
                format!("Select {} answers to continue", q.answer.required_count())
            }
            _ => "Select an answer to continue".to_string(),
        }
    }

    /// Reset per-question view state when the run moved
    fn after_transition(&mut self, before: (Phase, usize)) {
        if (self.run.phase(), self.run.current_index()) != before {
            self.cursor = 0;
            self.message = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{AnswerKey, Question, QuizSettings};

    fn question(correct: usize) -> Question {
        let options = vec!["A".into(), "B".into(), "C".into()];
        Question::new("Q", options, AnswerKey::Single { correct_answer: correct }).unwrap()
    }

    fn state(settings: QuizSettings) -> AppState {
        let run = QuizRun::new(vec![question(1), question(2)], settings).unwrap();
        AppState::new(run, 0)
    }

    #[test]
    fn name_entry_until_submitted() {
        let mut s = state(QuizSettings { require_name: true, ..Default::default() });
        assert_eq!(s.screen(), Screen::NameEntry);

        s.submit_name();
        assert_eq!(s.screen(), Screen::NameEntry);
        assert!(s.message.is_some());

        for c in "Ada".chars() {
            s.name.insert_char(c);
        }
        s.submit_name();
        assert_eq!(s.screen(), Screen::Question);
    }

    #[test]
    fn cursor_moves_within_options() {
        let mut s = state(QuizSettings::default());
        s.apply(Action::Up);
        assert_eq!(s.cursor, 0);
        s.apply(Action::Down);
        s.apply(Action::Down);
        s.apply(Action::Down);
        assert_eq!(s.cursor, 2);
    }

    #[test]
    fn next_requires_answer() {
        let mut s = state(QuizSettings::default());
        s.apply(Action::Next);
        assert_eq!(s.run.current_index(), 0);
        assert_eq!(s.message.as_deref(), Some("Select an answer to continue"));

        s.apply(Action::Pick(1));
        s.apply(Action::Next);
        assert_eq!(s.run.current_index(), 1);
        assert_eq!(s.cursor, 0);
        assert!(s.message.is_none());
    }

    #[test]
    fn full_run_reaches_results_and_retakes() {
        let mut s = state(QuizSettings::default());
        s.apply(Action::Pick(1));
        s.apply(Action::Next);
        s.apply(Action::Pick(0));
        s.apply(Action::Next);
        assert_eq!(s.screen(), Screen::Results);
        assert_eq!(s.run.score().correct, 1);

        s.apply(Action::Retake);
        assert_eq!(s.screen(), Screen::Question);
        assert_eq!(s.run.score().correct, 0);
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut s = state(QuizSettings::default());
        s.apply(Action::Help);
        assert!(s.show_help);
        s.apply(Action::Pick(1));
        assert!(!s.show_help);
        assert!(!s.run.is_answered(0));
    }

    #[test]
    fn quit_exits() {
        let mut s = state(QuizSettings::default());
        assert!(s.apply(Action::Quit));
    }

    #[test]
    fn tick_resets_cursor_on_auto_advance() {
        let settings = QuizSettings { auto_advance: true, ..Default::default() };
        let mut s = state(settings);
        s.apply(Action::Pick(2));
        assert_eq!(s.cursor, 2);

        s.tick(Duration::from_secs(2));
        assert_eq!(s.run.current_index(), 1);
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn name_input_edits_at_cursor() {
        let mut name = NameInput::default();
        name.insert_char('a');
        name.insert_char('c');
        name.move_left();
        name.insert_char('b');
        assert_eq!(name.input, "abc");
        name.move_right();
        name.delete_char();
        assert_eq!(name.input, "ab");
    }

    #[test]
    fn review_scroll_stays_within_pane_limit() {
        let mut s = state(QuizSettings::default());
        s.apply(Action::Pick(0));
        s.apply(Action::Next);
        s.apply(Action::Pick(0));
        s.apply(Action::Next);
        s.set_review_max_scroll(12);

        s.apply(Action::PageDown);
        s.apply(Action::Down);
        s.apply(Action::Down);
        assert_eq!(s.review_scroll, 12);

        s.set_review_max_scroll(5);
        assert_eq!(s.review_scroll, 5);

        s.apply(Action::Retake);
        assert_eq!(s.review_scroll, 0);
    }
}
