//! Domain events returned by quiz and generator commands.
//!
//! Commands hand events back to the caller instead of pushing them anywhere;
//! the frontend decides whether to render, log, or drop them. The `type` tag
//! keeps the serialized form easy to switch on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A quiz left Setup with a freshly drawn question set.
    QuizStarted {
        category: String,
        question_count: usize,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The current question was confirmed and graded.
    AnswerConfirmed {
        question_id: String,
        correct: bool,
        at: DateTime<Utc>,
    },
    /// The quiz reached Results, whether finished, ended early, or expired.
    QuizCompleted {
        score: usize,
        total: usize,
        percentage: u32,
        at: DateTime<Utc>,
    },
    /// The session returned to Setup.
    QuizReset { at: DateTime<Utc> },
    /// A generator batch came back and passed validation.
    QuestionsGenerated {
        category: String,
        requested: usize,
        accepted: usize,
        at: DateTime<Utc>,
    },
}
