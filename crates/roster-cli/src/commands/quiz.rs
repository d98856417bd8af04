//! The quiz, driven from the terminal.

use std::io::BufRead;

use anyhow::{bail, Result};

use roster_core::questions::Question;
use roster_core::traits::{AnswerSource, QuizObserver};
use roster_core::{AnswerOutcome, QuizEngine, QuizRecord, RegistryStore};

use super::prompt;

/// Reads one answer per line, prompting on stdout.
struct PromptAnswers<'a> {
    input: &'a mut dyn BufRead,
}

impl AnswerSource for PromptAnswers<'_> {
    fn next_answer(&mut self, _: usize, _: &Question) -> Result<String> {
        match prompt(&mut *self.input, "Your answer (number): ")? {
            Some(line) => Ok(line),
            None => bail!("input closed before the quiz finished"),
        }
    }
}

/// Prints quiz progress to stdout.
struct ConsoleObserver {
    title: String,
}

impl QuizObserver for ConsoleObserver {
    fn on_quiz_start(&self, student_name: &str, total: usize) {
        println!("\nStarting the quiz on {}, {student_name}! ({total} questions)", self.title);
    }

    fn on_question(&self, number: usize, question: &Question) {
        println!("\nQuestion {number}: {}", question.text);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
    }

    fn on_answer(&self, _: usize, outcome: &AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct { .. } => println!("Correct!"),
            AnswerOutcome::Incorrect { correct, .. } => {
                println!("Wrong! Correct answer: {correct}")
            }
            AnswerOutcome::OutOfRange { .. } => println!("Option out of range."),
            AnswerOutcome::Invalid { .. } => println!("Invalid answer."),
        }
        if let Some(explanation) = outcome.explanation() {
            println!("Explanation: {explanation}");
        }
    }

    fn on_quiz_complete(&self, record: &QuizRecord, total: usize) {
        println!("\nEnd of quiz! Your score: {}/{total}", record.score);
    }
}

/// Run one quiz for `name` and record the score in `store`.
///
/// Returns `None` when no student is registered yet.
pub fn execute(
    engine: &mut QuizEngine,
    store: &mut RegistryStore,
    input: &mut dyn BufRead,
    name: &str,
) -> Result<Option<QuizRecord>> {
    if !store.has_students() {
        println!("No students registered to start the quiz.");
        return Ok(None);
    }

    let observer = ConsoleObserver {
        title: engine.bank().title.clone(),
    };
    let mut answers = PromptAnswers { input };

    let record = engine.run(name, &mut answers, &observer, store)?;
    Ok(Some(record))
}
