//! Normalization of externally authored question sets
//!
//! Authored sets number their answers from 1 and are loose about types: a key
//! may be a number, numeric text, or an array of either. [`normalize`] maps
//! them onto [`Question`] and drops any record it cannot make sense of. It
//! never fails; the caller only learns how many records were skipped.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use super::model::{AnswerKey, Question};

/// A question set in the external authoring format
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuiz {
    /// Display title of the set
    #[serde(default)]
    pub quiz_title: Option<String>,
    /// Records in authoring order
    #[serde(default)]
    pub questions: Vec<RawRecord>,
}

/// One entry of a raw question set
///
/// Entries that do not have the shape of a question at all are kept as
/// `Malformed` so parsing a set never fails on a single bad record.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawRecord {
    Question(RawQuestion),
    Malformed(Value),
}

/// A loosely typed question record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer_selection_type: Option<String>,
    #[serde(default)]
    pub answers: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<Value>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub message_for_correct_answer: Option<String>,
    #[serde(default)]
    pub message_for_incorrect_answer: Option<String>,
    #[serde(default)]
    pub point: Option<Value>,
}

/// Result of normalizing a raw set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Valid questions in input order
    pub questions: Vec<Question>,
    /// Number of records dropped
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectionKind {
    Single,
    Multiple,
}

/// Why a record was dropped (logged, never returned)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    NotAQuestion,
    NoAnswers,
    UndecodableKey,
    OutOfRange,
}

/// Convert raw records into questions tagged with `category`
pub fn normalize(raw: &[RawRecord], category: &str) -> Normalized {
    let mut out = Normalized::default();

    for (i, record) in raw.iter().enumerate() {
        let result = match record {
            RawRecord::Question(q) => convert(q, category),
            RawRecord::Malformed(_) => Err(SkipReason::NotAQuestion),
        };

        match result {
            Ok(question) => out.questions.push(question),
            Err(reason) => {
                tracing::debug!(record = i, ?reason, "Skipping question record");
                out.skipped += 1;
            }
        }
    }

    if out.skipped > 0 {
        tracing::info!(
            kept = out.questions.len(),
            skipped = out.skipped,
            "Normalized question set with skipped records"
        );
    }

    out
}

fn convert(raw: &RawQuestion, category: &str) -> Result<Question, SkipReason> {
    let options = match &raw.answers {
        Some(answers) if !answers.is_empty() => answers.clone(),
        _ => return Err(SkipReason::NoAnswers),
    };
    let len = options.len();

    let answer = match selection_kind(raw) {
        SelectionKind::Multiple => {
            let indices = decode_multiple(raw.correct_answer.as_ref())
                .ok_or(SkipReason::UndecodableKey)?;
            if indices.iter().any(|&i| i < 0 || i >= len as i64) {
                return Err(SkipReason::OutOfRange);
            }
            AnswerKey::Multiple { correct_answers: indices.into_iter().map(|i| i as usize).collect() }
        }
        SelectionKind::Single => {
            let index =
                decode_single(raw.correct_answer.as_ref()).ok_or(SkipReason::UndecodableKey)?;
            if index < 0 || index >= len as i64 {
                return Err(SkipReason::OutOfRange);
            }
            AnswerKey::Single { correct_answer: index as usize }
        }
    };

    let explanation = [
        &raw.explanation,
        &raw.message_for_correct_answer,
        &raw.message_for_incorrect_answer,
    ]
    .into_iter()
    .flatten()
    .find(|text| !text.is_empty())
    .cloned();

    Ok(Question {
        question: raw.question.clone(),
        options,
        answer,
        explanation,
        category: Some(category.to_string()),
        points: decode_points(raw.point.as_ref()),
    })
}

fn selection_kind(raw: &RawQuestion) -> SelectionKind {
    match raw.answer_selection_type.as_deref() {
        Some("multiple") => SelectionKind::Multiple,
        Some("single") => SelectionKind::Single,
        _ if matches!(raw.correct_answer, Some(Value::Array(_))) => SelectionKind::Multiple,
        _ => SelectionKind::Single,
    }
}

/// Decode a scalar 1-based key into a 0-based index (may be negative)
fn decode_single(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Array(_) => None,
        scalar => decode_one_based(scalar),
    }
}

/// Decode an array key into sorted, unique 0-based indices
///
/// Elements that do not decode are dropped; an empty result fails.
fn decode_multiple(value: Option<&Value>) -> Option<Vec<i64>> {
    let Value::Array(items) = value? else {
        return None;
    };

    let indices: BTreeSet<i64> = items.iter().filter_map(decode_one_based).collect();
    if indices.is_empty() { None } else { Some(indices.into_iter().collect()) }
}

fn decode_one_based(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                let f = n.as_f64()?;
                if !f.is_finite() || f.fract() != 0.0 || f.abs() > i64::MAX as f64 {
                    return None;
                }
                f as i64
            }
        }
        Value::String(s) => parse_int_prefix(s)?,
        _ => return None,
    };
    n.checked_sub(1)
}

/// Parse the leading integer of `s`: optional whitespace, optional sign,
/// then at least one digit. Trailing text is ignored.
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn decode_points(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => parse_int_prefix(s).and_then(|n| u64::try_from(n).ok()),
        _ => None,
    };
    parsed.and_then(|p| u32::try_from(p).ok()).filter(|&p| p > 0).unwrap_or(1)
}
