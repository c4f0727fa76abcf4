//! # KruPrep Core Library
//!
//! Core business logic for KruPrep, an exam-prep app for the Thai teacher
//! license ("ติวสอบใบประกอบวิชาชีพครู 2568"). The crate is UI-free: a
//! frontend (CLI, TUI, or desktop shell) drives it by calling command
//! methods and rendering the returned state and events.
//!
//! ## Architecture
//!
//! - **Question bank**: CRUD, category filtering, JSON import/export with
//!   duplicate skipping, and one-time seeding, persisted through an injected
//!   blob repository
//! - **Quiz engine**: an explicit Setup → InProgress → Results state machine
//!   with a caller-ticked countdown; no interior mutability, no threads
//! - **Generator**: a Gemini client with strict response validation plus an
//!   interactive review flow for committing generated questions to the bank
//!
//! ## Key Components
//!
//! - [`QuestionStore`]: the persistent question bank
//! - [`QuizSession`]: the quiz state machine
//! - [`GeminiGenerator`]: AI question generation
//! - [`CandidateReview`]: try-out session for generated questions
//! - [`Config`]: TOML configuration for quiz and generator settings

pub mod error;
pub mod events;
pub mod generator;
pub mod question;
pub mod quiz;
pub mod storage;

pub use error::{
    ConfigError, CoreError, GeneratorError, ImportError, QuizError, Result, StoreError,
    ValidationError,
};
pub use events::Event;
pub use generator::{CandidateReview, GeminiGenerator, GeneratedBatch, GeneratedQuestion};
pub use question::{
    CategoryFilter, Question, QuestionDraft, QuestionPatch, CATEGORIES, CHOICE_LETTERS,
    DEFAULT_QUESTION_COUNTS,
};
pub use quiz::{Countdown, QuizPhase, QuizResult, QuizSession, QuizSummary, SummaryTier};
pub use storage::{
    data_dir, export_file_name, BlobRepository, Config, FileRepository, GeneratorConfig,
    ImportOutcome, MemoryRepository, QuestionStore, QuizConfig,
};
