//! Record model: people, students, teachers, and quiz records.
//!
//! Students and teachers share the person fields and differ by one extra
//! field. They are a closed set, so [`Record`] is an enum and every
//! behavior that differs by type is a `match` over it.
//!
//! The flat form is the JSON object written to disk. Its keys match the
//! files the registry has always produced (`nome`, `email`, `id`,
//! `matricula`, `disciplina`). `to_flat` is the only writer and `from_flat`
//! the only reader; the store goes through [`Record`] for both.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::RecordError;

/// Flat key-value form of a record.
pub type FlatRecord = Map<String, Value>;

pub const NAME_KEY: &str = "nome";
pub const EMAIL_KEY: &str = "email";
pub const ID_KEY: &str = "id";
pub const MATRICULA_KEY: &str = "matricula";
pub const SUBJECT_KEY: &str = "disciplina";

/// Generate a fresh record identifier (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Fields common to every registered person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    id: String,
}

impl Person {
    /// Create a person, generating an identifier when none is supplied.
    pub fn new(name: impl Into<String>, email: impl Into<String>, id: Option<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            id: id.unwrap_or_else(generate_id),
        }
    }

    /// The identifier assigned at construction.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn summary(&self) -> String {
        format!("id:{}: {}\n Email: {}\n", self.id, self.name, self.email)
    }

    pub fn to_flat(&self) -> FlatRecord {
        let mut flat = Map::new();
        flat.insert(NAME_KEY.into(), Value::String(self.name.clone()));
        flat.insert(EMAIL_KEY.into(), Value::String(self.email.clone()));
        flat.insert(ID_KEY.into(), Value::String(self.id.clone()));
        flat
    }

    pub fn from_flat(flat: FlatRecord) -> Result<Self, RecordError> {
        from_flat_as("person", flat)
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Student {
    #[serde(flatten)]
    person: Person,
    /// Enrollment number. Not checked for uniqueness.
    pub matricula: String,
}

impl Student {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        matricula: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        Self {
            person: Person::new(name, email, id),
            matricula: matricula.into(),
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn id(&self) -> &str {
        self.person.id()
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn email(&self) -> &str {
        &self.person.email
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} | Enrollment: {}",
            RecordKind::Student.tag(),
            self.person.summary(),
            self.matricula
        )
    }

    pub fn to_flat(&self) -> FlatRecord {
        let mut flat = self.person.to_flat();
        flat.insert(MATRICULA_KEY.into(), Value::String(self.matricula.clone()));
        flat
    }

    pub fn from_flat(flat: FlatRecord) -> Result<Self, RecordError> {
        from_flat_as("student", flat)
    }
}

/// A registered teacher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Teacher {
    #[serde(flatten)]
    person: Person,
    #[serde(rename = "disciplina")]
    pub subject: String,
}

impl Teacher {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        id: Option<String>,
    ) -> Self {
        Self {
            person: Person::new(name, email, id),
            subject: subject.into(),
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn id(&self) -> &str {
        self.person.id()
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub fn email(&self) -> &str {
        &self.person.email
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} \n Subject: {}",
            RecordKind::Teacher.tag(),
            self.person.summary(),
            self.subject
        )
    }

    pub fn to_flat(&self) -> FlatRecord {
        let mut flat = self.person.to_flat();
        flat.insert(SUBJECT_KEY.into(), Value::String(self.subject.clone()));
        flat
    }

    pub fn from_flat(flat: FlatRecord) -> Result<Self, RecordError> {
        from_flat_as("teacher", flat)
    }
}

fn from_flat_as<T: serde::de::DeserializeOwned>(
    kind: &'static str,
    flat: FlatRecord,
) -> Result<T, RecordError> {
    serde_json::from_value(Value::Object(flat)).map_err(|source| RecordError::Invalid { kind, source })
}

/// Which kind of record a [`Record`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Student,
    Teacher,
}

impl RecordKind {
    /// Tag shown at the start of a record summary.
    pub fn tag(&self) -> &'static str {
        match self {
            RecordKind::Student => "[Student]",
            RecordKind::Teacher => "[Teacher]",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Student => write!(f, "student"),
            RecordKind::Teacher => write!(f, "teacher"),
        }
    }
}

/// A registered person of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Student(Student),
    Teacher(Teacher),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Student(_) => RecordKind::Student,
            Record::Teacher(_) => RecordKind::Teacher,
        }
    }

    pub fn person(&self) -> &Person {
        match self {
            Record::Student(s) => s.person(),
            Record::Teacher(t) => t.person(),
        }
    }

    pub fn id(&self) -> &str {
        self.person().id()
    }

    pub fn name(&self) -> &str {
        &self.person().name
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Record::Student(s) => Some(s),
            Record::Teacher(_) => None,
        }
    }

    pub fn as_teacher(&self) -> Option<&Teacher> {
        match self {
            Record::Teacher(t) => Some(t),
            Record::Student(_) => None,
        }
    }

    /// Multi-line, human-readable summary including the type tag.
    pub fn summary(&self) -> String {
        match self {
            Record::Student(s) => s.summary(),
            Record::Teacher(t) => t.summary(),
        }
    }

    pub fn to_flat(&self) -> FlatRecord {
        match self {
            Record::Student(s) => s.to_flat(),
            Record::Teacher(t) => t.to_flat(),
        }
    }

    /// Rebuild a record of the given kind from its flat form.
    ///
    /// The identifier must be present; it is never generated here.
    pub fn from_flat(kind: RecordKind, flat: FlatRecord) -> Result<Self, RecordError> {
        match kind {
            RecordKind::Student => Student::from_flat(flat).map(Record::Student),
            RecordKind::Teacher => Teacher::from_flat(flat).map(Record::Teacher),
        }
    }
}

impl From<Student> for Record {
    fn from(student: Student) -> Self {
        Record::Student(student)
    }
}

impl From<Teacher> for Record {
    fn from(teacher: Teacher) -> Self {
        Record::Teacher(teacher)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// One completed quiz attempt.
///
/// Linked to a student only by the name typed at quiz time, not by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    #[serde(rename = "aluno")]
    pub student_name: String,
    #[serde(rename = "pontuacao")]
    pub score: u32,
}

impl QuizRecord {
    pub fn new(student_name: impl Into<String>, score: u32) -> Self {
        Self {
            student_name: student_name.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn new_generates_id_when_absent() {
        let student = Student::new("Ana", "ana@example.com", "2024001", None);
        assert!(Uuid::parse_str(student.id()).is_ok());

        let teacher = Teacher::new("Rui", "rui@example.com", "Math", Some("t-1".into()));
        assert_eq!(teacher.id(), "t-1");
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<String> = (0..10_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn student_flat_roundtrip() {
        let student = Student::new("Ana", "ana@example.com", "2024001", None);
        let flat = student.to_flat();
        assert_eq!(flat.get(NAME_KEY), Some(&Value::from("Ana")));
        assert_eq!(flat.get(MATRICULA_KEY), Some(&Value::from("2024001")));
        assert_eq!(Student::from_flat(flat).unwrap(), student);
    }

    #[test]
    fn teacher_flat_roundtrip() {
        let teacher = Teacher::new("Rui", "rui@example.com", "Physics", None);
        let flat = teacher.to_flat();
        assert_eq!(flat.get(SUBJECT_KEY), Some(&Value::from("Physics")));
        assert_eq!(Teacher::from_flat(flat).unwrap(), teacher);
    }

    #[test]
    fn record_flat_roundtrip_by_kind() {
        let records: Vec<Record> = vec![
            Student::new("Ana", "ana@example.com", "1", None).into(),
            Teacher::new("Rui", "rui@example.com", "Art", None).into(),
        ];
        for record in records {
            let back = Record::from_flat(record.kind(), record.to_flat()).unwrap();
            assert_eq!(back, record);
        }
    }

    #[test]
    fn flat_form_uses_persisted_keys() {
        let student: Record = Student::new("Ana", "ana@example.com", "7", Some("s-1".into())).into();
        assert_eq!(
            Value::Object(student.to_flat()),
            serde_json::json!({"nome": "Ana", "email": "ana@example.com", "id": "s-1", "matricula": "7"})
        );

        let teacher: Record = Teacher::new("Rui", "rui@x.org", "Math", Some("t-1".into())).into();
        assert_eq!(
            Value::Object(teacher.to_flat()),
            serde_json::json!({"nome": "Rui", "email": "rui@x.org", "id": "t-1", "disciplina": "Math"})
        );
    }

    #[test]
    fn from_flat_rejects_wrong_kind() {
        let teacher = Teacher::new("Rui", "rui@x.org", "Math", None).to_flat();
        let err = Record::from_flat(RecordKind::Student, teacher).unwrap_err();
        assert!(err.to_string().contains("invalid student record"));
    }

    #[test]
    fn kind_accessors() {
        let record = Record::from(Teacher::new("Rui", "rui@x.org", "Math", None));
        assert_eq!(record.kind(), RecordKind::Teacher);
        assert!(record.as_student().is_none());
        assert_eq!(record.as_teacher().map(|t| t.subject.as_str()), Some("Math"));
    }

    #[test]
    fn from_flat_requires_id() {
        let mut flat = Student::new("Ana", "a@b", "1", None).to_flat();
        flat.remove(ID_KEY);
        let err = Student::from_flat(flat).unwrap_err();
        assert!(err.to_string().contains("student"));
    }

    #[test]
    fn summaries_carry_type_tag() {
        let student = Student::new("Ana", "ana@example.com", "2024001", Some("s-1".into()));
        assert_eq!(
            student.summary(),
            "[Student] id:s-1: Ana\n Email: ana@example.com\n | Enrollment: 2024001"
        );

        let teacher = Record::from(Teacher::new("Rui", "rui@x.org", "Math", Some("t-1".into())));
        assert!(teacher.summary().starts_with("[Teacher] id:t-1: Rui"));
        assert!(teacher.summary().ends_with("Subject: Math"));
        assert_eq!(teacher.to_string(), teacher.summary());
    }

    #[test]
    fn quiz_record_uses_persisted_keys() {
        let record = QuizRecord::new("Ana", 7);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"aluno": "Ana", "pontuacao": 7}));
    }
}
