//! Display cleanup for authored question text

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{AnswerKey, Question};

/// Trailing "(Select TWO.)" style instructions
static SELECT_INSTRUCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*(?:\(|\b)\s*select\s+(?:one|two|three|four|\d+)\s*\.?\s*\)?\s*$")
        .expect("select instruction pattern is valid")
});

/// Leading "A. ", "A) " or "(A) " labels, one pattern per letter
static OPTION_PREFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    ('A'..='Z')
        .map(|l| {
            Regex::new(&format!(r"(?i)^(?:\({l}\)|{l}[.)])\s+"))
                .expect("option prefix pattern is valid")
        })
        .collect()
});

/// Display letter for an option index (A, B, ...; numbers past Z)
pub fn letter(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

/// Comma-separated letters for a set of indices, or a dash when empty
pub fn letters(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "\u{2014}".to_string(); // —
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.into_iter().map(letter).collect::<Vec<_>>().join(", ")
}

/// Remove an authored label that matches the option's own position
///
/// "B. Amazon S3" at index 1 becomes "Amazon S3"; the same text at index 0 is
/// left alone.
pub fn strip_option_prefix(option: &str, index: usize) -> &str {
    let Some(pattern) = OPTION_PREFIXES.get(index) else {
        return option;
    };
    let trimmed = option.trim_start();
    match pattern.find(trimmed) {
        Some(m) => &trimmed[m.end()..],
        None => option,
    }
}

/// Remove a trailing "Select N" instruction; the TUI shows its own hint
pub fn strip_select_instruction(question: &str) -> &str {
    match SELECT_INSTRUCTION.find(question) {
        Some(m) => &question[..m.start()],
        None => question,
    }
}

/// "Select N answers" for multiple-selection questions
pub fn selection_hint(question: &Question) -> Option<String> {
    match &question.answer {
        AnswerKey::Multiple { correct_answers } => {
            Some(format!("Select {} answers", correct_answers.len()))
        }
        AnswerKey::Single { .. } => None,
    }
}
