//! File-backed registry store.
//!
//! Holds students, teachers, and quiz records for one program run. Each
//! collection lives in its own pretty-printed JSON file and all three are
//! rewritten in full after every mutation. There is no locking: a second
//! process writing the same files wins whichever save lands last.
//!
//! People are kept as [`Record`]s and cross the file boundary only through
//! [`Record::to_flat`] and [`Record::from_flat`].

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::StorePaths;
use crate::error::StoreError;
use crate::model::{FlatRecord, QuizRecord, Record, RecordKind, Student, Teacher};
use crate::statistics::{ScoreReport, MAX_SCORE};
use crate::traits::ScoreSink;

/// In-memory registry backed by three JSON files.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    paths: StorePaths,
    people: Vec<Record>,
    scores: Vec<QuizRecord>,
}

impl RegistryStore {
    /// An empty store; nothing is read until [`load_all`](Self::load_all).
    pub fn new(paths: StorePaths) -> Self {
        Self {
            paths,
            people: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Create a store and load whatever is on disk.
    pub fn open(paths: StorePaths) -> Result<Self, StoreError> {
        let mut store = Self::new(paths);
        store.load_all()?;
        Ok(store)
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    /// Replace the in-memory collections with the contents of the files.
    ///
    /// A missing file is an empty collection. A malformed file fails the
    /// whole load and leaves the store untouched.
    pub fn load_all(&mut self) -> Result<(), StoreError> {
        let mut people = load_people(&self.paths.students, RecordKind::Student)?;
        people.extend(load_people(&self.paths.teachers, RecordKind::Teacher)?);
        let scores = load_collection(&self.paths.scores)?;

        self.people = people;
        self.scores = scores;
        tracing::debug!(
            people = self.people.len(),
            scores = self.scores.len(),
            "registry loaded"
        );
        Ok(())
    }

    /// Rewrite all three files from memory.
    pub fn save_all(&self) -> Result<(), StoreError> {
        save_collection(&self.paths.students, &self.flat_people(RecordKind::Student))?;
        save_collection(&self.paths.teachers, &self.flat_people(RecordKind::Teacher))?;
        save_collection(&self.paths.scores, &self.scores)?;
        Ok(())
    }

    /// Register a student with a fresh id and persist.
    pub fn add_student(
        &mut self,
        name: &str,
        email: &str,
        matricula: &str,
    ) -> Result<Student, StoreError> {
        let student = Student::new(name, email, matricula, None);
        self.add_person(student.clone().into())?;
        tracing::info!(id = student.id(), "student registered");
        Ok(student)
    }

    /// Register a teacher with a fresh id and persist.
    pub fn add_teacher(
        &mut self,
        name: &str,
        email: &str,
        subject: &str,
    ) -> Result<Teacher, StoreError> {
        let teacher = Teacher::new(name, email, subject, None);
        self.add_person(teacher.clone().into())?;
        tracing::info!(id = teacher.id(), "teacher registered");
        Ok(teacher)
    }

    /// Append a quiz result and persist.
    pub fn record_quiz_score(
        &mut self,
        student_name: &str,
        score: u32,
    ) -> Result<QuizRecord, StoreError> {
        if score > MAX_SCORE {
            return Err(StoreError::ScoreOutOfRange {
                score,
                max: MAX_SCORE,
            });
        }
        let record = QuizRecord::new(student_name, score);
        self.scores.push(record.clone());
        if let Err(e) = self.save_all() {
            self.scores.pop();
            return Err(e);
        }
        tracing::info!(student = student_name, score, "quiz score recorded");
        Ok(record)
    }

    /// Summaries of every student, then every teacher, in insertion order.
    pub fn list_all(&self) -> Vec<String> {
        self.people_of(RecordKind::Student)
            .chain(self.people_of(RecordKind::Teacher))
            .map(Record::summary)
            .collect()
    }

    /// Quiz records in insertion order, or `None` when nothing is recorded.
    pub fn list_scores(&self) -> Option<&[QuizRecord]> {
        if self.scores.is_empty() {
            None
        } else {
            Some(&self.scores)
        }
    }

    /// Statistics over every recorded score, or `None` when there are none.
    pub fn compute_statistics(&self) -> Option<ScoreReport> {
        let scores: Vec<u32> = self.scores.iter().map(|r| r.score).collect();
        ScoreReport::from_scores(&scores)
    }

    pub fn people(&self) -> &[Record] {
        &self.people
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> + '_ {
        self.people.iter().filter_map(Record::as_student)
    }

    pub fn teachers(&self) -> impl Iterator<Item = &Teacher> + '_ {
        self.people.iter().filter_map(Record::as_teacher)
    }

    pub fn scores(&self) -> &[QuizRecord] {
        &self.scores
    }

    /// True once at least one student or teacher is registered.
    pub fn has_people(&self) -> bool {
        !self.people.is_empty()
    }

    pub fn has_students(&self) -> bool {
        self.students().next().is_some()
    }

    /// Keep `record` only if the save that includes it succeeds.
    fn add_person(&mut self, record: Record) -> Result<(), StoreError> {
        self.people.push(record);
        if let Err(e) = self.save_all() {
            self.people.pop();
            return Err(e);
        }
        Ok(())
    }

    fn people_of(&self, kind: RecordKind) -> impl Iterator<Item = &Record> + '_ {
        self.people.iter().filter(move |r| r.kind() == kind)
    }

    fn flat_people(&self, kind: RecordKind) -> Vec<FlatRecord> {
        self.people_of(kind).map(Record::to_flat).collect()
    }
}

impl ScoreSink for RegistryStore {
    fn record_score(&mut self, record: &QuizRecord) -> anyhow::Result<()> {
        self.record_quiz_score(&record.student_name, record.score)?;
        Ok(())
    }
}

/// Read one people file, rebuilding each entry as a record of `kind`.
fn load_people(path: &Path, kind: RecordKind) -> Result<Vec<Record>, StoreError> {
    load_collection::<FlatRecord>(path)?
        .into_iter()
        .map(|flat| {
            Record::from_flat(kind, flat).map_err(|source| StoreError::Record {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} not found, starting empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn save_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = to_pretty_json(items).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    let write_err = |source| StoreError::Write {
        path: PathBuf::from(path),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)?;
    tracing::debug!("wrote {} record(s) to {}", items.len(), path.display());
    Ok(())
}

/// JSON with four-space indentation.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}
