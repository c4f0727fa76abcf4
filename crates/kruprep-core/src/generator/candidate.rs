//! Validation and normalization of model-generated questions.
//!
//! The model is asked for strict JSON but drifts in practice: markdown
//! fences around the payload, answers that differ from their choice by case
//! or stray whitespace, the occasional malformed entry. Parsing strips the
//! fences, normalization rewrites the answer to the matched choice's exact
//! string, and anything still invalid is skipped with a warning instead of
//! failing the whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated, uncommitted AI-generated question. The answer always equals
/// one of the choices exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

/// Candidate shape as the model emits it, every field optional until
/// validated.
#[derive(Debug, Clone, Deserialize)]
struct RawCandidate {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    choices: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

/// Removes a surrounding markdown code fence (with or without a `json`
/// language tag). Text without a complete fence pair is returned trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Validates each candidate independently, keeping the survivors. Rejected
/// candidates are logged and dropped; an entirely rejected batch simply
/// comes back empty.
pub fn validate_candidates(items: Vec<Value>) -> Vec<GeneratedQuestion> {
    let mut valid = Vec::with_capacity(items.len());
    for item in items {
        let raw: RawCandidate = match serde_json::from_value(item) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("skipping malformed AI candidate: {e}");
                continue;
            }
        };
        match validate_candidate(raw) {
            Ok(question) => valid.push(question),
            Err(reason) => log::warn!("skipping invalid AI candidate: {reason}"),
        }
    }
    valid
}

fn validate_candidate(raw: RawCandidate) -> Result<GeneratedQuestion, String> {
    let Some(question) = raw.question.filter(|q| !q.trim().is_empty()) else {
        return Err("missing question text".to_string());
    };
    let Some(choices) = raw.choices else {
        return Err("missing choices".to_string());
    };
    if choices.len() < 2 {
        return Err("fewer than two choices".to_string());
    }
    let Some(answer) = raw.answer.filter(|a| !a.trim().is_empty()) else {
        return Err("missing answer".to_string());
    };
    let Some(explanation) = raw.explanation else {
        return Err("missing explanation".to_string());
    };

    // The model sometimes answers with different casing or whitespace than
    // the choice it means; match leniently, then pin the answer to the
    // choice's exact string so everything downstream compares exactly.
    let wanted = answer.trim().to_lowercase();
    let Some(matched) = choices
        .iter()
        .find(|c| c.trim().to_lowercase() == wanted)
        .cloned()
    else {
        return Err("answer does not match any choice".to_string());
    };

    Ok(GeneratedQuestion {
        question,
        choices,
        answer: matched,
        explanation,
    })
}
