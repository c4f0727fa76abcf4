//! Persistence: the repository seam, the question bank, seeding, and
//! configuration.

mod config;
mod repository;
mod seed;
mod store;

pub use config::{Config, GeneratorConfig, QuizConfig};
pub use repository::{BlobRepository, FileRepository, MemoryRepository};
pub use seed::starter_questions;
pub use store::{export_file_name, ImportOutcome, QuestionStore, QUESTIONS_KEY, SEEDED_KEY};

use std::path::PathBuf;

/// Application data directory: `~/.config/kruprep`, or `~/.config/kruprep-dev`
/// when `KRUPREP_ENV=dev`.
pub fn data_dir() -> PathBuf {
    let app_name = match std::env::var("KRUPREP_ENV") {
        Ok(env) if env == "dev" => "kruprep-dev",
        _ => "kruprep",
    };
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(app_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let dir = data_dir();
        let name = dir.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("kruprep"));
    }
}
