//! Per-question outcomes and the final score summary.

use serde::{Deserialize, Serialize};

use crate::question::Question;

/// Outcome of one drawn question. `selected` is `None` when the quiz ended
/// before the question was confirmed; unanswered questions always grade
/// incorrect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub question: Question,
    pub selected: Option<String>,
    pub correct: bool,
}

/// Final score for a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
}

impl QuizSummary {
    pub fn from_results(results: &[QuizResult]) -> Self {
        let total = results.len();
        let score = results.iter().filter(|r| r.correct).count();
        let percentage = if total == 0 {
            0
        } else {
            (score as f64 / total as f64 * 100.0).round() as u32
        };
        Self {
            score,
            total,
            percentage,
        }
    }

    /// Encouragement band shown on the results screen.
    pub fn tier(&self) -> SummaryTier {
        if self.percentage >= 70 {
            SummaryTier::Excellent
        } else if self.percentage >= 50 {
            SummaryTier::Close
        } else {
            SummaryTier::KeepTrying
        }
    }
}

/// Results-screen messaging band: 70 % and up is excellent, 50 % and up is
/// nearly there, anything lower gets encouragement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryTier {
    Excellent,
    Close,
    KeepTrying,
}
