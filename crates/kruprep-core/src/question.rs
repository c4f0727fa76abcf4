//! Question domain types: stored questions, drafts, patches, and the fixed
//! exam category list.
//!
//! A [`Question`] serializes to the flat JSON shape used by bank export and
//! import, so the field names double as the interchange format. Validation
//! lives on [`QuestionDraft`]: the store persists whatever it is given, and
//! the edges (admin form, import, generator) decide what is acceptable.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The seven exam categories, in display order.
pub const CATEGORIES: [&str; 7] = [
    "กฎหมายการศึกษา",
    "จรรยาบรรณครู",
    "หลักสูตรและการสอน",
    "นวัตกรรมและเทคโนโลยีทางการศึกษา",
    "การวัดและประเมินผลการศึกษา",
    "จิตวิทยาสำหรับครู",
    "ความเป็นครู",
];

/// Thai letters used to label choices in order.
pub const CHOICE_LETTERS: [char; 6] = ['ก', 'ข', 'ค', 'ง', 'จ', 'ฉ'];

/// Question-count options offered on the quiz setup screen.
pub const DEFAULT_QUESTION_COUNTS: [usize; 3] = [10, 20, 30];

/// A stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl Question {
    pub fn matches(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => self.category == *category,
        }
    }
}

/// Category selection for bank filtering and quiz setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    All,
    /// Exactly one category, matched by exact string equality.
    Only(String),
}

impl CategoryFilter {
    /// Display form used in events and headers ("ทั้งหมด" for [`All`](Self::All)).
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "ทั้งหมด",
            CategoryFilter::Only(category) => category,
        }
    }
}

/// An unsaved question: admin form input or an accepted AI candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub category: String,
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    pub explanation: String,
}

impl QuestionDraft {
    /// Returns a copy with every field trimmed and empty choices dropped.
    pub fn trimmed(&self) -> Self {
        Self {
            category: self.category.trim().to_string(),
            question: self.question.trim().to_string(),
            choices: self
                .choices
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            answer: self.answer.trim().to_string(),
            explanation: self.explanation.trim().to_string(),
        }
    }

    /// Admin form rules, applied to the already-trimmed draft: every field
    /// present, at least two choices, and the answer equal to one of the
    /// choices.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.question.is_empty() {
            return Err(ValidationError::MissingField { field: "question" });
        }
        if self.category.is_empty() {
            return Err(ValidationError::MissingField { field: "category" });
        }
        if self.answer.is_empty() {
            return Err(ValidationError::MissingField { field: "answer" });
        }
        if self.explanation.is_empty() {
            return Err(ValidationError::MissingField {
                field: "explanation",
            });
        }
        if self.choices.len() < 2 {
            return Err(ValidationError::TooFewChoices);
        }
        if !self.choices.contains(&self.answer) {
            return Err(ValidationError::AnswerNotInChoices);
        }
        Ok(())
    }
}

/// Partial update for a stored question; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionPatch {
    pub category: Option<String>,
    pub question: Option<String>,
    pub choices: Option<Vec<String>>,
    pub answer: Option<String>,
    pub explanation: Option<String>,
}
