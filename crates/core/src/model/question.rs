use thiserror::Error;

/// Minimum number of answer choices a question must offer.
pub const MIN_ANSWERS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question needs at least 2 answers, got {count}")]
    TooFewAnswers { count: usize },

    #[error("correct answer index {index} is out of range for {count} answers")]
    CorrectIndexOutOfRange { index: usize, count: usize },
}

/// A multiple-choice question with a validated correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    answers: Vec<String>,
    correct_index: usize,
}

impl Question {
    /// Creates a question, checking the answer list and the 0-based correct index.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewAnswers` if fewer than two answers are given,
    /// or `QuestionError::CorrectIndexOutOfRange` if `correct_index` does not point
    /// into `answers`.
    pub fn new(
        text: impl Into<String>,
        answers: Vec<String>,
        correct_index: usize,
    ) -> Result<Self, QuestionError> {
        let count = answers.len();
        if count < MIN_ANSWERS {
            return Err(QuestionError::TooFewAnswers { count });
        }
        if correct_index >= count {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: correct_index,
                count,
            });
        }

        Ok(Self {
            text: text.into(),
            answers,
            correct_index,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }

    /// Answer text at `index`, if it exists.
    #[must_use]
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.answers[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}
