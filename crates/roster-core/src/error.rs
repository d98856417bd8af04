//! Error types for the registry store, record conversion, and quiz engine.
//!
//! Invalid quiz answers and empty score sets are not represented here: they
//! are ordinary outcomes handled where they occur.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving the persisted collections.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not a valid JSON array of the expected records.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An entry in the file is not a valid record of the file's kind.
    #[error("invalid record in {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        source: RecordError,
    },

    /// The collection could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A quiz score above the number of questions.
    #[error("score {score} is out of range (0..={max})")]
    ScoreOutOfRange { score: u32, max: u32 },
}

/// Errors converting a record from its flat key-value form.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("invalid {kind} record: {source}")]
    Invalid {
        kind: &'static str,
        source: serde_json::Error,
    },
}

/// Errors raised by the quiz engine.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The built-in question bank failed to parse or validate.
    #[error("invalid question bank: {0}")]
    InvalidBank(String),

    /// An answer was submitted before the session was started.
    #[error("quiz has not been started")]
    NotStarted,

    /// `start` was called on a session that already left `NotStarted`.
    #[error("quiz has already been started")]
    AlreadyStarted,

    /// An answer was submitted after the last question.
    #[error("quiz is already finished")]
    AlreadyFinished,

    /// The answer source failed (e.g. stdin closed).
    #[error("failed to read answer: {0}")]
    Input(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_mentions_path() {
        let source = serde_json::from_str::<Vec<u32>>("[1,").unwrap_err();
        let err = StoreError::Parse {
            path: PathBuf::from("alunos.json"),
            source,
        };
        assert!(err.to_string().contains("alunos.json"));
    }

    #[test]
    fn record_error_names_file_and_kind() {
        let source = serde_json::from_value::<u32>(serde_json::json!("x")).unwrap_err();
        let err = StoreError::Record {
            path: PathBuf::from("professores.json"),
            source: RecordError::Invalid {
                kind: "teacher",
                source,
            },
        };
        let message = err.to_string();
        assert!(message.contains("professores.json"));
        assert!(message.contains("invalid teacher record"));
    }

    #[test]
    fn score_error_message() {
        let err = StoreError::ScoreOutOfRange { score: 11, max: 10 };
        assert_eq!(err.to_string(), "score 11 is out of range (0..=10)");
    }
}
