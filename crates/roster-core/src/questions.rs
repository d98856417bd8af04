//! The built-in question bank.
//!
//! The catalog ships as TOML inside the crate and is parsed and validated
//! once per engine. Explanations are keyed by the text of a question's
//! correct answer, so questions sharing an answer share the explanation.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::QuizError;

/// Number of options every question offers.
pub const OPTION_COUNT: usize = 4;

const BUILTIN_BANK: &str = include_str!("../data/questions.toml");

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    /// Prompt shown to the student.
    pub text: String,
    /// Options in display order. Never reshuffled.
    pub options: [String; OPTION_COUNT],
    /// Text of the correct option.
    pub correct: String,
}

impl Question {
    /// The option behind a 1-based selector, if in range.
    pub fn option(&self, selector: usize) -> Option<&str> {
        selector
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// 1-based position of the correct option.
    pub fn correct_selector(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|o| *o == self.correct)
            .map(|i| i + 1)
    }
}

#[derive(Debug, Deserialize)]
struct TomlQuestionBank {
    #[serde(default)]
    title: String,
    fallback_explanation: String,
    #[serde(default)]
    questions: Vec<Question>,
    #[serde(default)]
    explanations: HashMap<String, String>,
}

/// A validated catalog of questions plus explanations.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub title: String,
    questions: Vec<Question>,
    explanations: HashMap<String, String>,
    fallback_explanation: String,
}

impl QuestionBank {
    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self, QuizError> {
        Self::from_toml_str(BUILTIN_BANK)
    }

    /// Parse and validate a TOML catalog (useful for testing).
    pub fn from_toml_str(content: &str) -> Result<Self, QuizError> {
        let parsed: TomlQuestionBank =
            toml::from_str(content).map_err(|e| QuizError::InvalidBank(e.to_string()))?;

        let bank = Self {
            title: parsed.title,
            questions: parsed.questions,
            explanations: parsed.explanations,
            fallback_explanation: parsed.fallback_explanation,
        };
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::InvalidBank("no questions".into()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.correct_selector().is_none() {
                return Err(QuizError::InvalidBank(format!(
                    "question {} has correct answer '{}' which is not among its options",
                    i + 1,
                    q.correct
                )));
            }
        }
        let missing = self
            .questions
            .iter()
            .filter(|q| !self.explanations.contains_key(&q.correct))
            .count();
        if missing > 0 {
            tracing::debug!("{missing} question(s) fall back to the generic explanation");
        }
        Ok(())
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Explanation for a correct answer, or the generic fallback.
    pub fn explanation_for(&self, correct: &str) -> &str {
        self.explanations
            .get(correct)
            .map(String::as_str)
            .unwrap_or(self.fallback_explanation.as_str())
    }
}
