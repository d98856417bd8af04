//! Quiz engine.
//!
//! A [`QuizSession`] walks one shuffled pass over the question bank:
//! `NotStarted -> InProgress { index } -> Finished { score }`. The
//! [`QuizEngine`] owns the bank and the shuffle RNG, creates sessions, and
//! drives a whole run against an answer source, an observer, and a score
//! sink.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::model::QuizRecord;
use crate::questions::{Question, QuestionBank};
use crate::traits::{AnswerSource, QuizObserver, ScoreSink};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    /// Waiting for the answer to the question at `index` (0-based).
    InProgress { index: usize },
    Finished { score: u32 },
}

/// How a single answer was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        explanation: String,
    },
    Incorrect {
        correct: String,
        explanation: String,
    },
    /// A number, but not one of the option selectors.
    OutOfRange { input: String },
    /// Not a number at all.
    Invalid { input: String },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }

    /// Explanation shown after an in-range answer.
    pub fn explanation(&self) -> Option<&str> {
        match self {
            AnswerOutcome::Correct { explanation } | AnswerOutcome::Incorrect { explanation, .. } => {
                Some(explanation.as_str())
            }
            AnswerOutcome::OutOfRange { .. } | AnswerOutcome::Invalid { .. } => None,
        }
    }
}

/// A parsed answer selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selector {
    Number(usize),
    /// All digits, but too large for `usize`.
    Overflow,
    NotANumber,
}

/// Only plain ASCII digits count as a number (no sign, no decimal point).
fn parse_selector(input: &str) -> Selector {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Selector::NotANumber;
    }
    digits
        .parse::<usize>()
        .map(Selector::Number)
        .unwrap_or(Selector::Overflow)
}

/// One pass over the question bank in shuffled order.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    bank: &'a QuestionBank,
    student_name: String,
    order: Vec<usize>,
    state: QuizState,
    score: u32,
}

impl<'a> QuizSession<'a> {
    /// Create a session whose question order is a uniform shuffle of the bank.
    pub fn new<R: Rng + ?Sized>(
        bank: &'a QuestionBank,
        student_name: impl Into<String>,
        rng: &mut R,
    ) -> Self {
        let mut order: Vec<usize> = (0..bank.len()).collect();
        order.shuffle(rng);
        Self {
            bank,
            student_name: student_name.into(),
            order,
            state: QuizState::NotStarted,
            score: 0,
        }
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Running score.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Questions in presentation order.
    pub fn questions(&self) -> impl Iterator<Item = &'a Question> + '_ {
        let bank = self.bank;
        self.order.iter().map(move |&i| &bank.questions()[i])
    }

    pub fn start(&mut self) -> Result<(), QuizError> {
        match self.state {
            QuizState::NotStarted => {
                self.state = QuizState::InProgress { index: 0 };
                tracing::debug!(student = %self.student_name, total = self.total(), "quiz started");
                Ok(())
            }
            QuizState::InProgress { .. } => Err(QuizError::AlreadyStarted),
            QuizState::Finished { .. } => Err(QuizError::AlreadyFinished),
        }
    }

    /// The question awaiting an answer, with its 1-based number.
    pub fn current(&self) -> Option<(usize, &'a Question)> {
        match self.state {
            QuizState::InProgress { index } => {
                let bank: &'a QuestionBank = self.bank;
                Some((index + 1, &bank.questions()[self.order[index]]))
            }
            _ => None,
        }
    }

    /// Judge an answer to the current question and advance.
    ///
    /// Unparsable or out-of-range input is not an error: it scores nothing
    /// and the session moves on.
    pub fn answer(&mut self, input: &str) -> Result<AnswerOutcome, QuizError> {
        let index = match self.state {
            QuizState::NotStarted => return Err(QuizError::NotStarted),
            QuizState::Finished { .. } => return Err(QuizError::AlreadyFinished),
            QuizState::InProgress { index } => index,
        };
        let bank = self.bank;
        let question = &bank.questions()[self.order[index]];

        let outcome = match parse_selector(input) {
            Selector::NotANumber => AnswerOutcome::Invalid {
                input: input.to_string(),
            },
            Selector::Overflow => AnswerOutcome::OutOfRange {
                input: input.to_string(),
            },
            Selector::Number(n) => match question.option(n) {
                None => AnswerOutcome::OutOfRange {
                    input: input.to_string(),
                },
                Some(chosen) => {
                    let explanation = bank.explanation_for(&question.correct).to_string();
                    if chosen == question.correct {
                        self.score += 1;
                        AnswerOutcome::Correct { explanation }
                    } else {
                        AnswerOutcome::Incorrect {
                            correct: question.correct.clone(),
                            explanation,
                        }
                    }
                }
            },
        };

        self.state = if index + 1 >= self.order.len() {
            QuizState::Finished { score: self.score }
        } else {
            QuizState::InProgress { index: index + 1 }
        };

        Ok(outcome)
    }

    /// The record for a finished session.
    pub fn record(&self) -> Option<QuizRecord> {
        match self.state {
            QuizState::Finished { score } => Some(QuizRecord::new(self.student_name.clone(), score)),
            _ => None,
        }
    }
}

/// Owns the question bank and the shuffle RNG.
pub struct QuizEngine {
    bank: QuestionBank,
    rng: StdRng,
}

impl QuizEngine {
    /// Engine over `bank`, shuffling with OS-seeded randomness.
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Engine with a deterministic shuffle sequence.
    pub fn with_seed(bank: QuestionBank, seed: u64) -> Self {
        Self {
            bank,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Engine over the built-in catalog, seeded when `seed` is given.
    pub fn builtin(seed: Option<u64>) -> Result<Self, QuizError> {
        let bank = QuestionBank::builtin()?;
        Ok(match seed {
            Some(seed) => Self::with_seed(bank, seed),
            None => Self::new(bank),
        })
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// A freshly shuffled session. Every session reshuffles the full bank.
    pub fn session(&mut self, student_name: impl Into<String>) -> QuizSession<'_> {
        QuizSession::new(&self.bank, student_name, &mut self.rng)
    }

    /// Run a complete quiz and hand the result to `sink`.
    pub fn run(
        &mut self,
        student_name: &str,
        answers: &mut dyn AnswerSource,
        observer: &dyn QuizObserver,
        sink: &mut dyn ScoreSink,
    ) -> Result<QuizRecord> {
        let mut session = self.session(student_name);
        session.start()?;
        observer.on_quiz_start(student_name, session.total());

        while let Some((number, question)) = session.current() {
            observer.on_question(number, question);
            let input = answers
                .next_answer(number, question)
                .map_err(|e| QuizError::Input(format!("{e:#}")))?;
            let outcome = session.answer(&input)?;
            tracing::debug!(number, correct = outcome.is_correct(), "answer judged");
            observer.on_answer(number, &outcome);
        }

        let record = session.record().ok_or(QuizError::NotStarted)?;
        observer.on_quiz_complete(&record, session.total());
        sink.record_score(&record)?;
        tracing::info!(student = %record.student_name, score = record.score, "quiz finished");
        Ok(record)
    }
}
