use quiz_core::model::ScoreSummary;
use quiz_core::{QuizSession, SessionError};

use super::progress::SessionProgress;

/// Presentation-agnostic snapshot of what a session wants on screen.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    /// Ask the current question.
    Question {
        prompt: String,
        answers: Vec<String>,
        progress: SessionProgress,
    },
    /// Show whether the last answer was right, and what the right answer was.
    Feedback {
        prompt: String,
        answers: Vec<String>,
        selected: usize,
        correct_index: usize,
        correct: bool,
        progress: SessionProgress,
    },
    /// All questions answered.
    Finished { summary: ScoreSummary },
}

impl SessionView {
    /// Snapshot `session` in its current phase.
    ///
    /// # Errors
    ///
    /// Propagates `SessionError` from the session accessors; a consistent session
    /// never produces one.
    pub fn from_session(session: &QuizSession) -> Result<Self, SessionError> {
        let progress = SessionProgress::from_session(session);

        if let Some(feedback) = session.feedback() {
            return Ok(Self::Feedback {
                prompt: feedback.question.text().to_owned(),
                answers: feedback.question.answers().to_vec(),
                selected: feedback.selected,
                correct_index: feedback.question.correct_index(),
                correct: feedback.correct,
                progress,
            });
        }

        if session.is_finished() {
            return Ok(Self::Finished {
                summary: session.final_score_summary()?,
            });
        }

        let question = session.current_question()?;
        Ok(Self::Question {
            prompt: question.text().to_owned(),
            answers: question.answers().to_vec(),
            progress,
        })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}
