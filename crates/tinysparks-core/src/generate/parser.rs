//! Response parsing with explicit validation.
//!
//! Parses raw model output into [`ActivityDraft`]s and checks:
//! - The text is non-empty JSON whose top level is an array of objects.
//! - Every object carries every required field with the right JSON type.
//! - Every category is one of the known categories.
//! - The plan has the expected size and category distribution.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::activity::{ActivityDraft, Category};

use super::prompt::{PLAN_SIZE, REQUIRED_FIELDS, SENSORY_COUNT};

/// Errors that can occur while turning model output into drafts.
#[derive(Debug, Error)]
pub enum ResponseParseError {
    #[error("response is empty")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a JSON array")]
    NotAnArray,

    #[error("item {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("item {index} is missing required field {field:?}")]
    MissingField { index: usize, field: &'static str },

    #[error("item {index} field {field:?} has the wrong type (expected {expected})")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },

    #[error("item {index} has unknown category {value:?}")]
    UnknownCategory { index: usize, value: String },

    #[error("expected {expected} activities, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    #[error("unexpected category distribution: {0}")]
    WrongDistribution(String),
}

/// Parse raw model output into drafts.
///
/// Does not check plan shape; see [`validate_plan_shape`].
pub fn parse_activities(raw: &str) -> Result<Vec<ActivityDraft>, ResponseParseError> {
    let text = strip_code_fence(raw.trim());
    if text.is_empty() {
        return Err(ResponseParseError::Empty);
    }

    let value: Value = serde_json::from_str(text)?;
    let items = value.as_array().ok_or(ResponseParseError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect()
}

/// Check that a plan holds exactly one activity per developmental category
/// followed by the sensory set, in any order.
pub fn validate_plan_shape(drafts: &[ActivityDraft]) -> Result<(), ResponseParseError> {
    if drafts.len() != PLAN_SIZE {
        return Err(ResponseParseError::WrongCount {
            expected: PLAN_SIZE,
            actual: drafts.len(),
        });
    }

    let mut counts: HashMap<Category, usize> = HashMap::new();
    for draft in drafts {
        *counts.entry(draft.category).or_default() += 1;
    }

    let mut problems = Vec::new();
    for category in Category::DEVELOPMENTAL {
        let n = counts.get(&category).copied().unwrap_or(0);
        if n != 1 {
            problems.push(format!("{category}: {n} (expected 1)"));
        }
    }
    let sensory = counts.get(&Category::SensoryPlay).copied().unwrap_or(0);
    if sensory != SENSORY_COUNT {
        problems.push(format!(
            "{}: {sensory} (expected {SENSORY_COUNT})",
            Category::SensoryPlay
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ResponseParseError::WrongDistribution(problems.join(", ")))
    }
}

fn parse_item(index: usize, item: &Value) -> Result<ActivityDraft, ResponseParseError> {
    let obj = item
        .as_object()
        .ok_or(ResponseParseError::NotAnObject { index })?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(ResponseParseError::MissingField { index, field });
        }
    }

    let string = |field: &'static str| -> Result<String, ResponseParseError> {
        obj[field]
            .as_str()
            .map(str::to_owned)
            .ok_or(ResponseParseError::InvalidField {
                index,
                field,
                expected: "string",
            })
    };
    let string_list = |field: &'static str| -> Result<Vec<String>, ResponseParseError> {
        let invalid = ResponseParseError::InvalidField {
            index,
            field,
            expected: "array of strings",
        };
        let Some(values) = obj[field].as_array() else {
            return Err(invalid);
        };
        values
            .iter()
            .map(|v| v.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .ok_or(invalid)
    };

    let raw_category = string("category")?;
    let category = raw_category
        .trim()
        .parse::<Category>()
        .map_err(|_| ResponseParseError::UnknownCategory {
            index,
            value: raw_category.clone(),
        })?;

    Ok(ActivityDraft {
        title: string("title")?,
        category,
        description: string("description")?,
        materials: string_list("materials")?,
        duration: string("duration")?,
        safety_tip: string("safetyTip")?,
        tags: string_list("tags")?,
    })
}

/// Remove a surrounding Markdown code fence (```json ... ```), if present.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
