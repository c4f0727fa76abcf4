//! AI question generation: the Gemini client, response validation, and the
//! interactive candidate-review flow.

mod candidate;
mod gemini;
mod review;

pub use candidate::{strip_code_fences, validate_candidates, GeneratedQuestion};
pub use gemini::{GeminiGenerator, GeneratedBatch};
pub use review::CandidateReview;
