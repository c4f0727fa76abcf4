//! Interactive try-out of generated candidates before committing them.
//!
//! Mirrors the quiz's select/confirm flow, one candidate at a time: the user
//! answers, reveals feedback, optionally commits the candidate to the bank,
//! and advances. Each candidate can be committed once per batch; committed
//! questions take the review's category, since candidates carry none of
//! their own.

use crate::error::{QuizError, StoreError};
use crate::generator::candidate::GeneratedQuestion;
use crate::generator::gemini::GeneratedBatch;
use crate::question::{Question, QuestionDraft};
use crate::storage::QuestionStore;

pub struct CandidateReview {
    category: String,
    candidates: Vec<GeneratedQuestion>,
    current: usize,
    added: Vec<bool>,
    selected: Option<String>,
    feedback_shown: bool,
}

impl CandidateReview {
    /// `None` when the batch has no usable candidates; the caller reports
    /// that as a generation failure.
    pub fn new(category: impl Into<String>, candidates: Vec<GeneratedQuestion>) -> Option<Self> {
        if candidates.is_empty() {
            return None;
        }
        let added = vec![false; candidates.len()];
        Some(Self {
            category: category.into(),
            candidates,
            current: 0,
            added,
            selected: None,
            feedback_shown: false,
        })
    }

    pub fn from_batch(batch: GeneratedBatch) -> Option<Self> {
        Self::new(batch.category, batch.questions)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_candidate(&self) -> &GeneratedQuestion {
        &self.candidates[self.current]
    }

    /// 1-based position and batch size, for the "ข้อที่ n/m" header.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.candidates.len())
    }

    pub fn selected_choice(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_feedback_shown(&self) -> bool {
        self.feedback_shown
    }

    /// Whether the current candidate was already committed to the bank.
    pub fn is_added(&self) -> bool {
        self.added[self.current]
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Picks a choice for the current candidate; ignored once feedback is
    /// shown.
    pub fn select_choice(&mut self, choice: &str) {
        if self.feedback_shown {
            return;
        }
        self.selected = Some(choice.to_string());
    }

    /// Reveals feedback and returns whether the selection was correct.
    /// Grading is exact string equality; the generator already normalized
    /// the answer to a choice.
    pub fn check_answer(&mut self) -> Result<bool, QuizError> {
        let Some(selected) = self.selected.clone() else {
            return Err(QuizError::NoSelection);
        };
        self.feedback_shown = true;
        Ok(selected == self.current_candidate().answer)
    }

    /// Commits the current candidate to the bank under the review category.
    /// `Ok(None)` when it was already committed.
    pub fn accept_current(
        &mut self,
        store: &mut QuestionStore,
    ) -> Result<Option<Question>, StoreError> {
        if self.added[self.current] {
            return Ok(None);
        }
        let candidate = self.current_candidate().clone();
        let question = store.create(QuestionDraft {
            category: self.category.clone(),
            question: candidate.question,
            choices: candidate.choices,
            answer: candidate.answer,
            explanation: candidate.explanation,
        })?;
        self.added[self.current] = true;
        Ok(Some(question))
    }

    /// Moves to the next candidate, clearing selection and feedback. `None`
    /// when the batch is exhausted and a fresh one is needed.
    pub fn advance(&mut self) -> Option<&GeneratedQuestion> {
        if self.current + 1 >= self.candidates.len() {
            return None;
        }
        self.current += 1;
        self.selected = None;
        self.feedback_shown = false;
        Some(self.current_candidate())
    }
}
