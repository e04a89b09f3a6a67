use quiz_core::{QuizSession, SessionPhase};

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen, capped at `total`.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub score: u32,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let total = session.total();
        let answered = session.recorded_answers().len();
        let is_complete = session.phase() == SessionPhase::Finished;
        Self {
            position: (session.current_index() + 1).min(total),
            total,
            answered,
            remaining: total.saturating_sub(answered),
            score: session.score(),
            is_complete,
        }
    }
}
