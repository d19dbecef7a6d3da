//! Question-set files on disk

use std::path::Path;

use anyhow::{Context, Result};

use super::adapter::{Normalized, RawQuiz, normalize};

/// Read a raw question set from a JSON file
pub fn load_question_set(path: &Path) -> Result<RawQuiz> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read question set from {:?}", path))?;
    let quiz: RawQuiz = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse question set {:?}", path))?;

    tracing::debug!(path = ?path, records = quiz.questions.len(), "Loaded question set");
    Ok(quiz)
}

/// Read and normalize a question set, tagging every question with `category`
pub fn load_questions(path: &Path, category: &str) -> Result<(RawQuiz, Normalized)> {
    let quiz = load_question_set(path)?;
    let normalized = normalize(&quiz.questions, category);
    Ok((quiz, normalized))
}

/// Category derived from a file name: `aws-starter.json` becomes `aws-starter`
pub fn category_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(super::model::DEFAULT_CATEGORY)
        .to_string()
}
