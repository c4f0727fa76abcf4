//! The question bank: CRUD, JSON import/export, and one-time seeding over an
//! injected [`BlobRepository`].
//!
//! Every operation loads the full bank, mutates it in memory, and persists
//! the full bank in one write; the last writer wins. The starter set is
//! installed exactly once, guarded by a persisted flag, so a user who empties
//! the bank stays with an empty bank.

use std::collections::HashSet;
use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ImportError, StoreError};
use crate::question::{CategoryFilter, Question, QuestionDraft, QuestionPatch};
use crate::storage::repository::{BlobRepository, FileRepository};
use crate::storage::seed::starter_questions;

/// Storage key for the serialized question array.
pub const QUESTIONS_KEY: &str = "questions";
/// Storage key for the seed-once flag.
pub const SEEDED_KEY: &str = "questions_seeded";

/// Persistent question bank over a pluggable blob repository.
pub struct QuestionStore {
    repo: Box<dyn BlobRepository>,
}

impl QuestionStore {
    pub fn new(repo: Box<dyn BlobRepository>) -> Self {
        Self { repo }
    }

    /// File-backed store under the default data directory.
    pub fn open_default() -> Self {
        Self::new(Box::new(FileRepository::open()))
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Returns every question, installing the starter set on first use.
    pub fn list_all(&mut self) -> Result<Vec<Question>, StoreError> {
        self.load_or_seed()
    }

    /// Returns the questions matching `filter`.
    pub fn list_by_category(
        &mut self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Question>, StoreError> {
        let questions = self.load_or_seed()?;
        Ok(questions.into_iter().filter(|q| q.matches(filter)).collect())
    }

    /// Number of questions currently in the bank.
    pub fn count(&mut self) -> Result<usize, StoreError> {
        Ok(self.load_or_seed()?.len())
    }

    /// Pretty-printed JSON array of the full bank, ids included.
    pub fn export_all(&mut self) -> Result<String, StoreError> {
        let questions = self.load_or_seed()?;
        Ok(serde_json::to_string_pretty(&questions)?)
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Adds a new question and returns it with its generated id. Duplicate
    /// question text is allowed here; only [`import_batch`](Self::import_batch)
    /// deduplicates.
    pub fn create(&mut self, draft: QuestionDraft) -> Result<Question, StoreError> {
        let mut questions = self.load_or_seed()?;
        let question = new_question(draft);
        questions.push(question.clone());
        self.save(&questions)?;
        log::info!("added question {} to the bank", question.id);
        Ok(question)
    }

    /// Merges `patch` into the question with `id`. `Ok(None)` when the id is
    /// unknown.
    pub fn update(
        &mut self,
        id: &str,
        patch: QuestionPatch,
    ) -> Result<Option<Question>, StoreError> {
        let mut questions = self.load_or_seed()?;
        let Some(slot) = questions.iter_mut().find(|q| q.id == id) else {
            return Ok(None);
        };
        if let Some(category) = patch.category {
            slot.category = category;
        }
        if let Some(question) = patch.question {
            slot.question = question;
        }
        if let Some(choices) = patch.choices {
            slot.choices = choices;
        }
        if let Some(answer) = patch.answer {
            slot.answer = answer;
        }
        if let Some(explanation) = patch.explanation {
            slot.explanation = explanation;
        }
        let updated = slot.clone();
        self.save(&questions)?;
        Ok(Some(updated))
    }

    /// Removes the question with `id`. `Ok(false)` when the id is unknown.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut questions = self.load_or_seed()?;
        let before = questions.len();
        questions.retain(|q| q.id != id);
        if questions.len() == before {
            return Ok(false);
        }
        self.save(&questions)?;
        Ok(true)
    }

    /// Imports a JSON array of questions.
    ///
    /// Structural validation is all-or-nothing: the first invalid record
    /// aborts the import with nothing persisted. Records whose question text
    /// exactly matches a bank entry are skipped silently, so re-importing an
    /// export is a no-op. Accepted records keep a non-empty incoming id and
    /// receive a generated one otherwise.
    pub fn import_batch(&mut self, json: &str) -> Result<ImportOutcome, ImportError> {
        let records = parse_import_records(json)?;
        let mut questions = self.load_or_seed()?;
        // Duplicates are judged against the bank as it stood before the
        // import; a question repeated within the payload is added each time.
        let existing: HashSet<String> =
            questions.iter().map(|q| q.question.clone()).collect();

        let mut added = 0usize;
        let mut skipped = 0usize;
        for record in records {
            if existing.contains(&record.draft.question) {
                skipped += 1;
                continue;
            }
            questions.push(record.into_question());
            added += 1;
        }
        self.save(&questions)?;

        let outcome = ImportOutcome { added, skipped };
        log::info!("question import: {outcome}");
        Ok(outcome)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Loads the bank, installing the starter set when the bank blob is
    /// absent and the seed flag was never set. A present blob short-circuits
    /// seeding; an absent blob with the flag set is an intentionally empty
    /// bank.
    fn load_or_seed(&mut self) -> Result<Vec<Question>, StoreError> {
        if let Some(blob) = self.repo.get(QUESTIONS_KEY)? {
            return Ok(serde_json::from_str(&blob)?);
        }
        if self.repo.get(SEEDED_KEY)?.is_none() {
            let starter = starter_questions();
            self.save(&starter)?;
            self.repo.put(SEEDED_KEY, "true")?;
            log::info!("seeded the bank with {} starter questions", starter.len());
            return Ok(starter);
        }
        Ok(Vec::new())
    }

    fn save(&mut self, questions: &[Question]) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(questions)?;
        self.repo.put(QUESTIONS_KEY, &blob)
    }
}

/// Counts reported by [`QuestionStore::import_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub added: usize,
    pub skipped: usize,
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped > 0 {
            write!(
                f,
                "imported {} questions ({} duplicates skipped)",
                self.added, self.skipped
            )
        } else {
            write!(f, "imported {} questions", self.added)
        }
    }
}

/// File name for a bank export: `คลังข้อสอบ_YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("คลังข้อสอบ_{}.json", date.format("%Y-%m-%d"))
}

fn new_question(draft: QuestionDraft) -> Question {
    Question {
        id: next_question_id(),
        category: draft.category,
        question: draft.question,
        choices: draft.choices,
        answer: draft.answer,
        explanation: draft.explanation,
    }
}

/// A structurally validated import payload entry.
struct ImportRecord {
    id: Option<String>,
    draft: QuestionDraft,
}

impl ImportRecord {
    fn into_question(self) -> Question {
        match self.id {
            Some(id) => Question {
                id,
                category: self.draft.category,
                question: self.draft.question,
                choices: self.draft.choices,
                answer: self.draft.answer,
                explanation: self.draft.explanation,
            },
            None => new_question(self.draft),
        }
    }
}

fn next_question_id() -> String {
    format!("q-{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4())
}

fn parse_import_records(json: &str) -> Result<Vec<ImportRecord>, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = parse_import_record(item)
            .map_err(|reason| ImportError::InvalidRecord { index, reason })?;
        records.push(record);
    }
    Ok(records)
}

fn parse_import_record(item: Value) -> Result<ImportRecord, String> {
    let Value::Object(fields) = item else {
        return Err("expected a question object".to_string());
    };

    let question = required_string(&fields, "question")?;
    let answer = required_string(&fields, "answer")?;
    let category = required_string(&fields, "category")?;
    let explanation = required_string(&fields, "explanation")?;
    let choices = match fields.get("choices") {
        Some(Value::Array(items)) if !items.is_empty() => {
            let mut choices = Vec::with_capacity(items.len());
            for choice in items {
                match choice {
                    Value::String(s) => choices.push(s.clone()),
                    _ => return Err("every choice must be a string".to_string()),
                }
            }
            choices
        }
        _ => return Err("`choices` must be a non-empty array".to_string()),
    };
    // Anything other than a non-empty string id counts as absent.
    let id = match fields.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };

    Ok(ImportRecord {
        id,
        draft: QuestionDraft {
            category,
            question,
            choices,
            answer,
            explanation,
        },
    })
}

fn required_string(
    fields: &serde_json::Map<String, Value>,
    key: &'static str,
) -> Result<String, String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(format!("`{key}` must be a non-empty string")),
    }
}
