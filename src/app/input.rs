//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Vim-style key mapping for the question and results screens
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('l') | KeyCode::Char('n') | KeyCode::Right => Some(Action::Next),
        KeyCode::Char('h') | KeyCode::Char('p') | KeyCode::Left => Some(Action::Previous),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Select),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Pick(c as usize - '1' as usize)),
        KeyCode::Char('c') => Some(Action::CheckAnswer),
        KeyCode::Char('a') => Some(Action::ToggleAutoAdvance),
        KeyCode::Char('r') => Some(Action::Retake),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Option cursor / review scrolling
    Up,
    Down,
    PageUp,
    PageDown,

    // Answering
    Select,
    /// Choose option N directly (0-based)
    Pick(usize),
    CheckAnswer,

    // Navigation
    Next,
    Previous,

    // Run control
    ToggleAutoAdvance,
    Retake,
    Help,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(vim_key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn vim_k_maps_to_up() {
        assert_eq!(vim_key_to_action(KeyCode::Char('k')), Some(Action::Up));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(vim_key_to_action(KeyCode::Char('x')), None);
    }

    #[test]
    fn digits_pick_options() {
        assert_eq!(vim_key_to_action(KeyCode::Char('1')), Some(Action::Pick(0)));
        assert_eq!(vim_key_to_action(KeyCode::Char('4')), Some(Action::Pick(3)));
        assert_eq!(vim_key_to_action(KeyCode::Char('0')), None);
    }

    #[test]
    fn space_and_enter_select() {
        assert_eq!(vim_key_to_action(KeyCode::Char(' ')), Some(Action::Select));
        assert_eq!(vim_key_to_action(KeyCode::Enter), Some(Action::Select));
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn no_modifier_uses_vim_keys() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::NONE),
            Some(Action::CheckAnswer)
        );
    }
}
