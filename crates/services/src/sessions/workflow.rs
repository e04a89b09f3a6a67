use tracing::{debug, warn};

use quiz_core::{AnswerOutcome, QuizSession, SessionError};

use super::view::SessionView;

/// Something the user did on a session screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "Submit" on the question screen, with the selected answer if any.
    Submit(Option<usize>),
    /// "Next" on the feedback screen.
    Next,
}

/// Apply `intent` to `session` and return what to show next.
///
/// # Errors
///
/// Returns the `SessionError` from the state machine when the intent does not fit
/// the current phase or the selection is out of range. The session is unchanged.
pub fn apply_intent(session: &mut QuizSession, intent: Intent) -> Result<SessionView, SessionError> {
    let result = match intent {
        Intent::Submit(selected) => session.submit_answer(selected).map(|outcome| {
            match outcome {
                AnswerOutcome::Skipped => debug!("submit without a selection ignored"),
                AnswerOutcome::Recorded { correct } => debug!(
                    question = session.current_index(),
                    correct,
                    score = session.score(),
                    "answer recorded"
                ),
            }
        }),
        Intent::Next => session.advance().map(|()| {
            debug!(
                question = session.current_index(),
                phase = %session.phase(),
                "advanced"
            );
        }),
    };

    if let Err(err) = &result {
        warn!(?intent, error = %err, "session rejected intent");
    }
    result?;

    SessionView::from_session(session)
}
