//! roster-core: record model, quiz engine, statistics, and registry store.
//!
//! This crate holds everything the `roster` CLI does apart from terminal
//! interaction and chart rendering.

pub mod config;
pub mod error;
pub mod model;
pub mod questions;
pub mod quiz;
pub mod statistics;
pub mod store;
pub mod traits;

pub use config::{RosterConfig, StorePaths};
pub use error::{QuizError, RecordError, StoreError};
pub use model::{Person, QuizRecord, Record, RecordKind, Student, Teacher};
pub use questions::{Question, QuestionBank};
pub use quiz::{AnswerOutcome, QuizEngine, QuizSession, QuizState};
pub use statistics::{Histogram, Mode, ScoreReport, ScoreSummary};
pub use store::RegistryStore;
