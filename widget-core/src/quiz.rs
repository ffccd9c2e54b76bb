//! Personality quiz scoring with back navigation.

use tracing::debug;

use crate::models::{PersonalityType, Quiz, QuizError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    question: usize,
    previous_totals: Vec<u32>,
    choice: usize,
}

/// One pass through a [`Quiz`].
///
/// Totals are kept per type in declared order, which is also the tie-break
/// order for [`QuizSession::result`].
#[derive(Debug, Clone)]
pub struct QuizSession<'q> {
    quiz: &'q Quiz,
    current: usize,
    totals: Vec<u32>,
    history: Vec<Step>,
}

impl<'q> QuizSession<'q> {
    pub fn new(quiz: &'q Quiz) -> Self {
        Self {
            quiz,
            current: 0,
            totals: vec![0; quiz.types.len()],
            history: Vec::new(),
        }
    }

    /// Index of the next unanswered question, or `None` once finished.
    pub fn current_question(&self) -> Option<usize> {
        (self.current < self.quiz.questions.len()).then_some(self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.current_question().is_none()
    }

    /// `(answered, total)` question counts.
    pub fn progress(&self) -> (usize, usize) {
        (self.current, self.quiz.questions.len())
    }

    /// Answers the current question and returns the choice's reaction.
    ///
    /// # Errors
    ///
    /// [`QuizError::Finished`] after the last question and
    /// [`QuizError::ChoiceOutOfRange`] for an unknown choice.
    pub fn answer(
        &mut self,
        choice: usize,
    ) -> Result<&'q str, QuizError> {
        let quiz = self.quiz;
        let question_index = self.current_question().ok_or(QuizError::Finished)?;
        let question = &quiz.questions[question_index];
        let picked = question
            .choices
            .get(choice)
            .ok_or(QuizError::ChoiceOutOfRange {
                question: question_index,
                choice,
                available: question.choices.len(),
            })?;

        self.history.push(Step {
            question: question_index,
            previous_totals: self.totals.clone(),
            choice,
        });

        for (key, points) in &picked.scores {
            if let Some(slot) = quiz.type_index(key) {
                self.totals[slot] += points;
            }
        }
        self.current += 1;

        debug!(question = question_index, choice, totals = ?self.totals, "quiz answer recorded");
        Ok(&picked.reaction)
    }

    /// Undoes the last answer. Returns `false` when there is nothing to undo.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(step) => {
                self.current = step.question;
                self.totals = step.previous_totals;
                true
            }
            None => false,
        }
    }

    /// Choices made so far, in question order.
    pub fn answers(&self) -> Vec<usize> {
        self.history.iter().map(|step| step.choice).collect()
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.totals.iter_mut().for_each(|t| *t = 0);
        self.history.clear();
    }

    /// Current total for the type named `key`.
    pub fn total(
        &self,
        key: &str,
    ) -> Option<u32> {
        self.quiz.type_index(key).map(|i| self.totals[i])
    }

    /// The highest-scoring type once every question is answered. Ties go to
    /// the type declared first.
    pub fn result(&self) -> Option<&'q PersonalityType> {
        if !self.is_finished() {
            return None;
        }

        let mut best: Option<(usize, u32)> = None;
        for (index, &total) in self.totals.iter().enumerate() {
            if best.is_none_or(|(_, best_total)| total > best_total) {
                best = Some((index, total));
            }
        }

        best.map(|(index, _)| &self.quiz.types[index])
    }
}
