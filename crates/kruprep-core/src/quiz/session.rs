//! The three-phase quiz state machine.
//!
//! ```text
//!            start()                        end() / last next() / expiry
//!   Setup ─────────────▶ InProgress ─────────────────────────────▶ Results
//!     ▲                     │    │                                    │
//!     │                     │    └── select / confirm / next / prev   │
//!     └───────── reset() ◀──┘                            reset() ◀────┘
//! ```
//!
//! The session owns a snapshot of the bank, draws a shuffled subset on
//! `start`, and advances time only through [`tick`](QuizSession::tick);
//! there is no interior mutability and no background thread, so a frontend
//! drives it from a single-threaded event loop and renders whatever the
//! queries report.
//!
//! Confirming an answer locks that question's feedback open: while locked,
//! the answer cannot change and countdown expiry is deferred until
//! navigation clears the lock. Navigating back releases the lock, and the
//! revisited question may be re-confirmed, replacing its earlier result.

use std::collections::HashMap;
use std::fmt;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::events::Event;
use crate::question::{CategoryFilter, Question};
use crate::quiz::countdown::Countdown;
use crate::quiz::results::{QuizResult, QuizSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    Setup,
    InProgress,
    Results,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizPhase::Setup => "setup",
            QuizPhase::InProgress => "in_progress",
            QuizPhase::Results => "results",
        };
        f.write_str(name)
    }
}

pub struct QuizSession {
    phase: QuizPhase,
    snapshot: Vec<Question>,
    question_set: Vec<Question>,
    current_index: usize,
    answers: HashMap<String, String>,
    results: Vec<QuizResult>,
    feedback_for: Option<String>,
    countdown: Countdown,
    seconds_per_question: u64,
    rng: Mcg128Xsl64,
}

impl QuizSession {
    /// A session over a snapshot of the bank, with an entropy-seeded draw.
    pub fn new(snapshot: Vec<Question>) -> Self {
        Self::build(snapshot, Mcg128Xsl64::from_entropy())
    }

    /// Deterministic draw order, for tests and replays.
    pub fn with_seed(snapshot: Vec<Question>, seed: u64) -> Self {
        Self::build(snapshot, Mcg128Xsl64::seed_from_u64(seed))
    }

    /// Overrides the per-question countdown budget (default 60 seconds).
    pub fn with_seconds_per_question(mut self, secs: u64) -> Self {
        self.seconds_per_question = secs;
        self
    }

    fn build(snapshot: Vec<Question>, rng: Mcg128Xsl64) -> Self {
        Self {
            phase: QuizPhase::Setup,
            snapshot,
            question_set: Vec::new(),
            current_index: 0,
            answers: HashMap::new(),
            results: Vec::new(),
            feedback_for: None,
            countdown: Countdown::new(),
            seconds_per_question: 60,
            rng,
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question_set(&self) -> &[Question] {
        &self.question_set
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress => self.question_set.get(self.current_index),
            _ => None,
        }
    }

    pub fn selected_answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Whether the current question's feedback is locked open.
    pub fn is_feedback_locked(&self) -> bool {
        self.feedback_for.is_some()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.countdown.remaining_secs()
    }

    /// Header clock: minutes unpadded, seconds zero-padded.
    pub fn format_remaining(&self) -> String {
        let secs = self.countdown.remaining_secs();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    pub fn results(&self) -> &[QuizResult] {
        &self.results
    }

    /// Final score; `Some` only once the quiz reached Results.
    pub fn summary(&self) -> Option<QuizSummary> {
        match self.phase {
            QuizPhase::Results => Some(QuizSummary::from_results(&self.results)),
            _ => None,
        }
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Draws `min(count, pool)` shuffled questions matching `filter` and
    /// starts the countdown at `len * seconds_per_question`. Fails with
    /// [`QuizError::EmptyPool`] when nothing can be drawn, leaving the
    /// session in Setup.
    pub fn start(&mut self, filter: &CategoryFilter, count: usize) -> Result<Event, QuizError> {
        if self.phase != QuizPhase::Setup {
            return Err(QuizError::InvalidPhase {
                expected: QuizPhase::Setup,
                actual: self.phase,
            });
        }
        let mut pool: Vec<Question> = self
            .snapshot
            .iter()
            .filter(|q| q.matches(filter))
            .cloned()
            .collect();
        pool.shuffle(&mut self.rng);
        pool.truncate(count);
        if pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let duration_secs = pool.len() as u64 * self.seconds_per_question;
        self.question_set = pool;
        self.current_index = 0;
        self.answers.clear();
        self.results.clear();
        self.feedback_for = None;
        self.countdown.start(duration_secs);
        self.phase = QuizPhase::InProgress;
        log::info!(
            "quiz started: {} questions from {}",
            self.question_set.len(),
            filter.label()
        );
        Ok(Event::QuizStarted {
            category: filter.label().to_string(),
            question_count: self.question_set.len(),
            duration_secs,
            at: Utc::now(),
        })
    }

    /// Advances the countdown by one second; the caller invokes this once
    /// per second while in progress. When time runs out and no feedback is
    /// locked, the quiz ends itself; while locked, expiry is deferred until
    /// navigation.
    pub fn tick(&mut self) -> Option<Event> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        let remaining = self.countdown.tick();
        if remaining == 0 && self.feedback_for.is_none() {
            return Some(self.finish());
        }
        None
    }

    /// Records or overwrites the tentative answer for a question. A no-op
    /// outside InProgress or while that question's feedback is locked.
    pub fn select_choice(&mut self, question_id: &str, choice: &str) {
        if self.phase != QuizPhase::InProgress {
            return;
        }
        if self.feedback_for.as_deref() == Some(question_id) {
            return;
        }
        self.answers
            .insert(question_id.to_string(), choice.to_string());
    }

    /// Grades the current question and locks its feedback open. Confirming
    /// again after navigating back replaces the earlier result.
    pub fn confirm_answer(&mut self) -> Result<Event, QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::InvalidPhase {
                expected: QuizPhase::InProgress,
                actual: self.phase,
            });
        }
        let question = self.question_set[self.current_index].clone();
        let Some(selected) = self.answers.get(&question.id).cloned() else {
            return Err(QuizError::NoSelection);
        };
        let correct = selected == question.answer;
        let question_id = question.id.clone();
        self.results.retain(|r| r.question.id != question_id);
        self.results.push(QuizResult {
            question,
            selected: Some(selected),
            correct,
        });
        self.feedback_for = Some(question_id.clone());
        Ok(Event::AnswerConfirmed {
            question_id,
            correct,
            at: Utc::now(),
        })
    }

    /// Clears the feedback lock and advances; ends the quiz from the last
    /// question, or right away when the countdown expired under the lock.
    pub fn next(&mut self) -> Option<Event> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.feedback_for = None;
        if self.countdown.is_expired() {
            return Some(self.finish());
        }
        if self.current_index + 1 < self.question_set.len() {
            self.current_index += 1;
            None
        } else {
            Some(self.finish())
        }
    }

    /// Clears the feedback lock and steps back (no wrap below zero). The
    /// revisited question keeps its tentative answer.
    pub fn previous(&mut self) -> Option<Event> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.feedback_for = None;
        if self.countdown.is_expired() {
            return Some(self.finish());
        }
        if self.current_index > 0 {
            self.current_index -= 1;
        }
        None
    }

    /// Ends the quiz now; tentative answers that were never confirmed are
    /// graded as they stand.
    pub fn end(&mut self) -> Option<Event> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        Some(self.finish())
    }

    /// Discards the attempt and returns to Setup. `None` when already there.
    pub fn reset(&mut self) -> Option<Event> {
        if self.phase == QuizPhase::Setup {
            return None;
        }
        self.countdown.stop();
        self.question_set.clear();
        self.current_index = 0;
        self.answers.clear();
        self.results.clear();
        self.feedback_for = None;
        self.phase = QuizPhase::Setup;
        Some(Event::QuizReset { at: Utc::now() })
    }

    /// Stops the countdown, rebuilds `results` in question-set order, and
    /// moves to Results. A question without a confirmed result is graded
    /// from its tentative answer; no selection at all scores incorrect.
    fn finish(&mut self) -> Event {
        self.countdown.stop();
        self.feedback_for = None;
        let mut final_results = Vec::with_capacity(self.question_set.len());
        for question in &self.question_set {
            let result = match self.results.iter().find(|r| r.question.id == question.id) {
                Some(confirmed) => confirmed.clone(),
                None => {
                    let selected = self.answers.get(&question.id).cloned();
                    let correct = selected.as_deref() == Some(question.answer.as_str());
                    QuizResult {
                        question: question.clone(),
                        selected,
                        correct,
                    }
                }
            };
            final_results.push(result);
        }
        self.results = final_results;
        self.phase = QuizPhase::Results;

        let summary = QuizSummary::from_results(&self.results);
        log::info!(
            "quiz completed: {}/{} ({}%)",
            summary.score,
            summary.total,
            summary.percentage
        );
        Event::QuizCompleted {
            score: summary.score,
            total: summary.total,
            percentage: summary.percentage,
            at: Utc::now(),
        }
    }
}
