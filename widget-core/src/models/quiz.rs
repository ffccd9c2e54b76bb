use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by quiz definitions and quiz sessions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz declares no personality types")]
    NoTypes,

    #[error("quiz has no questions")]
    NoQuestions,

    #[error("personality type '{0}' is declared twice")]
    DuplicateType(String),

    #[error("question {0} has no choices")]
    NoChoices(usize),

    #[error("question {question}, choice {choice} scores unknown type '{key}'")]
    UnknownType {
        question: usize,
        choice: usize,
        key: String,
    },

    #[error("choice {choice} is out of range for question {question} ({available} choices)")]
    ChoiceOutOfRange {
        question: usize,
        choice: usize,
        available: usize,
    },

    #[error("quiz is already finished")]
    Finished,
}

/// A result profile the quiz can land on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityType {
    pub key: String,
    pub name: String,
    pub summary: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: String,
    #[serde(default)]
    pub opening_lines: Vec<String>,
    #[serde(default)]
    pub date_courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub reaction: String,
    pub scores: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub choices: Vec<Choice>,
}

/// A personality quiz: declared types in tie-break order, then questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub types: Vec<PersonalityType>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Checks that the quiz is answerable and every score names a declared
    /// type.
    pub fn validate(self) -> Result<Self, QuizError> {
        if self.types.is_empty() {
            return Err(QuizError::NoTypes);
        }
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        for (i, ty) in self.types.iter().enumerate() {
            if self.types[..i].iter().any(|t| t.key == ty.key) {
                return Err(QuizError::DuplicateType(ty.key.clone()));
            }
        }

        for (question, q) in self.questions.iter().enumerate() {
            if q.choices.is_empty() {
                return Err(QuizError::NoChoices(question));
            }
            for (choice, c) in q.choices.iter().enumerate() {
                if let Some(key) = c.scores.keys().find(|k| self.type_index(k).is_none()) {
                    return Err(QuizError::UnknownType {
                        question,
                        choice,
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(self)
    }

    /// Position of `key` in the declared type order.
    pub fn type_index(
        &self,
        key: &str,
    ) -> Option<usize> {
        self.types.iter().position(|t| t.key == key)
    }
}
