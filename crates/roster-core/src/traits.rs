//! Seams between the quiz engine and its collaborators.
//!
//! The engine pulls answers from an [`AnswerSource`], reports progress to a
//! [`QuizObserver`], and hands the finished record to a [`ScoreSink`]. The
//! CLI implements the first two over stdin/stdout; the registry store
//! implements the sink.

use crate::model::QuizRecord;
use crate::questions::Question;
use crate::quiz::AnswerOutcome;

// ---------------------------------------------------------------------------
// Answer source
// ---------------------------------------------------------------------------

/// Supplies one raw answer per question.
pub trait AnswerSource {
    /// Read the answer for question `number` (1-based).
    ///
    /// The returned text is validated by the engine; an error aborts the
    /// quiz without recording a score.
    fn next_answer(&mut self, number: usize, question: &Question) -> anyhow::Result<String>;
}

/// Answers taken from a fixed list, in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    answers: std::collections::VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnswerSource for ScriptedAnswers {
    fn next_answer(&mut self, number: usize, _: &Question) -> anyhow::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted answer for question {number}"))
    }
}

// ---------------------------------------------------------------------------
// Progress observer
// ---------------------------------------------------------------------------

/// Progress reporting for a quiz run.
pub trait QuizObserver {
    fn on_quiz_start(&self, student_name: &str, total: usize);
    fn on_question(&self, number: usize, question: &Question);
    fn on_answer(&self, number: usize, outcome: &AnswerOutcome);
    fn on_quiz_complete(&self, record: &QuizRecord, total: usize);
}

/// No-op observer.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_quiz_start(&self, _: &str, _: usize) {}
    fn on_question(&self, _: usize, _: &Question) {}
    fn on_answer(&self, _: usize, _: &AnswerOutcome) {}
    fn on_quiz_complete(&self, _: &QuizRecord, _: usize) {}
}

// ---------------------------------------------------------------------------
// Score sink
// ---------------------------------------------------------------------------

/// Destination for finished quiz records.
pub trait ScoreSink {
    fn record_score(&mut self, record: &QuizRecord) -> anyhow::Result<()>;
}

impl ScoreSink for Vec<QuizRecord> {
    fn record_score(&mut self, record: &QuizRecord) -> anyhow::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionBank;

    #[test]
    fn scripted_answers_run_out() {
        let bank = QuestionBank::builtin().unwrap();
        let q = &bank.questions()[0];
        let mut answers = ScriptedAnswers::new(["1"]);
        assert_eq!(answers.next_answer(1, q).unwrap(), "1");
        let err = answers.next_answer(2, q).unwrap_err();
        assert!(err.to_string().contains("question 2"));
    }

    #[test]
    fn vec_sink_collects_records() {
        let mut sink: Vec<QuizRecord> = Vec::new();
        sink.record_score(&QuizRecord::new("Ana", 3)).unwrap();
        assert_eq!(sink, vec![QuizRecord::new("Ana", 3)]);
    }
}
