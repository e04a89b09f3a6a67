use std::fmt;

use crate::error::{InputError, SessionError, StateError};
use crate::model::{Question, ScoreSummary, Topic};

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

/// Where a session is in its question-by-question walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Waiting for the user to pick an answer for the current question.
    AwaitingAnswer,
    /// The current question has been answered and feedback is on screen.
    ShowingFeedback,
    /// Every question has been answered. Terminal.
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionPhase::AwaitingAnswer => "awaiting an answer",
            SessionPhase::ShowingFeedback => "showing feedback",
            SessionPhase::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// Operation names used in `StateError::InvalidTransition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionAction {
    SubmitAnswer,
    Advance,
    FinalSummary,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionAction::SubmitAnswer => "submit an answer",
            SessionAction::Advance => "advance",
            SessionAction::FinalSummary => "summarize the score",
        };
        f.write_str(label)
    }
}

/// Result of `QuizSession::submit_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Nothing was selected; the session is unchanged.
    Skipped,
    /// The selection was recorded and the session moved to feedback.
    Recorded { correct: bool },
}

/// Data for the feedback screen of the question just answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub question: &'a Question,
    pub selected: usize,
    pub correct: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a topic's questions.
///
/// Transitions:
///
/// ```text
/// AwaitingAnswer --submit_answer(Some)--> ShowingFeedback
/// ShowingFeedback --advance--> AwaitingAnswer | Finished
/// ```
///
/// `submit_answer(None)` is accepted in `AwaitingAnswer` and changes nothing.
/// Every other call fails with `StateError`.
#[derive(Clone, PartialEq, Eq)]
pub struct QuizSession {
    topic: Topic,
    current: usize,
    answers: Vec<usize>,
    score: u32,
    phase: SessionPhase,
}

impl QuizSession {
    /// Start a session at the first question of `topic`.
    #[must_use]
    pub fn new(topic: Topic) -> Self {
        // Topics always hold at least one question, so a fresh session is never finished.
        Self {
            topic,
            current: 0,
            answers: Vec::new(),
            score: 0,
            phase: SessionPhase::AwaitingAnswer,
        }
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Index of the question being asked (or shown with feedback).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.topic.question_count()
    }

    /// Selected answer index for each answered question, in order.
    #[must_use]
    pub fn recorded_answers(&self) -> &[usize] {
        &self.answers
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// The question currently on screen.
    ///
    /// # Errors
    ///
    /// Returns `StateError::SessionFinished` once every question is done.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        if self.is_finished() {
            return Err(StateError::SessionFinished.into());
        }
        Ok(&self.topic.questions()[self.current])
    }

    /// Record the user's choice for the current question.
    ///
    /// `None` means the user pressed on without choosing; it is accepted and ignored.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidTransition` outside `AwaitingAnswer`, and
    /// `InputError::IndexOutOfRange` if `selected` is not one of the answers. The
    /// session is unchanged on error.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Result<AnswerOutcome, SessionError> {
        self.require_phase(SessionPhase::AwaitingAnswer, SessionAction::SubmitAnswer)?;
        let Some(selected) = selected else {
            return Ok(AnswerOutcome::Skipped);
        };

        let question = &self.topic.questions()[self.current];
        let len = question.answer_count();
        if selected >= len {
            return Err(InputError::IndexOutOfRange {
                index: selected,
                len,
            }
            .into());
        }

        let correct = question.is_correct(selected);
        self.answers.push(selected);
        if correct {
            self.score = self.score.saturating_add(1);
        }
        self.phase = SessionPhase::ShowingFeedback;

        Ok(AnswerOutcome::Recorded { correct })
    }

    /// Leave the feedback screen for the next question, or finish.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidTransition` outside `ShowingFeedback`.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.require_phase(SessionPhase::ShowingFeedback, SessionAction::Advance)?;

        self.current += 1;
        self.phase = if self.current == self.total() {
            SessionPhase::Finished
        } else {
            SessionPhase::AwaitingAnswer
        };
        Ok(())
    }

    /// Whether the answer recorded for question `index` was right.
    ///
    /// `false` when no answer has been recorded at `index`.
    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        match (self.answers.get(index), self.topic.questions().get(index)) {
            (Some(&selected), Some(question)) => question.is_correct(selected),
            _ => false,
        }
    }

    /// Feedback for the question just answered, while in `ShowingFeedback`.
    #[must_use]
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        if self.phase != SessionPhase::ShowingFeedback {
            return None;
        }
        let question = self.topic.questions().get(self.current)?;
        let selected = *self.answers.get(self.current)?;
        Some(Feedback {
            question,
            selected,
            correct: question.is_correct(selected),
        })
    }

    /// Final score and band.
    ///
    /// # Errors
    ///
    /// Returns `StateError::InvalidTransition` until the session is finished.
    pub fn final_score_summary(&self) -> Result<ScoreSummary, SessionError> {
        self.require_phase(SessionPhase::Finished, SessionAction::FinalSummary)?;
        let total = u32::try_from(self.total()).unwrap_or(u32::MAX);
        Ok(ScoreSummary::new(self.score, total))
    }

    fn require_phase(&self, expected: SessionPhase, action: SessionAction) -> Result<(), StateError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(StateError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic_id", &self.topic.id())
            .field("total", &self.total())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .field("score", &self.score)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScoreBand, TopicId};

    /// Topic whose question `i` has three answers and correct index `i % 3`.
    fn build_topic(count: usize) -> Topic {
        let questions = (0..count)
            .map(|i| {
                Question::new(
                    format!("Q{i}"),
                    vec!["a".into(), "b".into(), "c".into()],
                    i % 3,
                )
                .unwrap()
            })
            .collect();
        Topic::new(TopicId::new(1), "Test", "", questions).unwrap()
    }

    fn correct_for(i: usize) -> usize {
        i % 3
    }

    fn wrong_for(i: usize) -> usize {
        (i + 1) % 3
    }

    fn assert_invariants(session: &QuizSession) {
        let answered = session.recorded_answers().len();
        assert!(u64::from(session.score()) <= answered as u64);
        assert!(session.current_index() <= session.total());
        assert_eq!(
            session.is_finished(),
            session.current_index() == session.total()
        );
        match session.phase() {
            SessionPhase::ShowingFeedback => assert_eq!(answered, session.current_index() + 1),
            SessionPhase::AwaitingAnswer | SessionPhase::Finished => {
                assert_eq!(answered, session.current_index());
                assert!(session.score() as usize <= session.current_index());
            }
        }
    }

    #[test]
    fn fresh_session_awaits_first_answer() {
        let session = QuizSession::new(build_topic(2));
        assert_eq!(session.phase(), SessionPhase::AwaitingAnswer);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_question().unwrap().text(), "Q0");
        assert_invariants(&session);
    }

    #[test]
    fn correct_answer_scores_and_shows_feedback() {
        let mut session = QuizSession::new(build_topic(2));
        let outcome = session.submit_answer(Some(correct_for(0))).unwrap();

        assert_eq!(outcome, AnswerOutcome::Recorded { correct: true });
        assert_eq!(session.phase(), SessionPhase::ShowingFeedback);
        assert_eq!(session.score(), 1);
        assert!(session.is_correct(0));

        let feedback = session.feedback().unwrap();
        assert_eq!(feedback.selected, 0);
        assert!(feedback.correct);
        assert_eq!(feedback.question.text(), "Q0");
        assert_invariants(&session);
    }

    #[test]
    fn wrong_answer_does_not_score() {
        let mut session = QuizSession::new(build_topic(2));
        let outcome = session.submit_answer(Some(wrong_for(0))).unwrap();

        assert_eq!(outcome, AnswerOutcome::Recorded { correct: false });
        assert_eq!(session.score(), 0);
        assert!(!session.is_correct(0));
        assert_invariants(&session);
    }

    #[test]
    fn absent_selection_is_a_no_op() {
        let mut session = QuizSession::new(build_topic(2));
        let before = session.clone();

        let outcome = session.submit_answer(None).unwrap();

        assert_eq!(outcome, AnswerOutcome::Skipped);
        assert_eq!(session, before);
        assert_eq!(session.phase(), SessionPhase::AwaitingAnswer);
        assert_eq!(session.current_index(), 0);
        assert!(session.recorded_answers().is_empty());
    }

    #[test]
    fn out_of_range_selection_leaves_state_unchanged() {
        let mut session = QuizSession::new(build_topic(2));
        let before = session.clone();

        let err = session.submit_answer(Some(5)).unwrap_err();

        assert_eq!(
            err,
            SessionError::Input(InputError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(session, before);
        assert_eq!(session.phase(), SessionPhase::AwaitingAnswer);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn submit_during_feedback_is_rejected() {
        let mut session = QuizSession::new(build_topic(2));
        session.submit_answer(Some(0)).unwrap();

        let err = session.submit_answer(Some(1)).unwrap_err();
        assert_eq!(
            err,
            SessionError::State(StateError::InvalidTransition {
                phase: SessionPhase::ShowingFeedback,
                action: SessionAction::SubmitAnswer,
            })
        );
        assert_eq!(session.recorded_answers(), &[0]);
    }

    #[test]
    fn advance_while_awaiting_is_rejected() {
        let mut session = QuizSession::new(build_topic(2));
        let err = session.advance().unwrap_err();
        assert!(matches!(
            err,
            SessionError::State(StateError::InvalidTransition {
                phase: SessionPhase::AwaitingAnswer,
                action: SessionAction::Advance,
            })
        ));
    }

    #[test]
    fn finished_session_rejects_everything_but_summary() {
        let mut session = QuizSession::new(build_topic(1));
        session.submit_answer(Some(0)).unwrap();
        session.advance().unwrap();
        assert!(session.is_finished());

        assert_eq!(
            session.current_question().unwrap_err(),
            SessionError::State(StateError::SessionFinished)
        );
        assert!(matches!(
            session.submit_answer(Some(0)).unwrap_err(),
            SessionError::State(StateError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.submit_answer(None).unwrap_err(),
            SessionError::State(StateError::InvalidTransition { .. })
        ));
        assert!(matches!(
            session.advance().unwrap_err(),
            SessionError::State(StateError::InvalidTransition { .. })
        ));
        assert!(session.feedback().is_none());
        assert!(session.final_score_summary().is_ok());
    }

    #[test]
    fn summary_before_finish_is_rejected() {
        let session = QuizSession::new(build_topic(1));
        assert!(matches!(
            session.final_score_summary().unwrap_err(),
            SessionError::State(StateError::InvalidTransition {
                action: SessionAction::FinalSummary,
                ..
            })
        ));
    }

    #[test]
    fn advancing_total_times_reaches_finished() {
        for total in 1..=7 {
            let mut session = QuizSession::new(build_topic(total));
            let mut advances = 0;
            while !session.is_finished() {
                let i = session.current_index();
                let pick = if i % 2 == 0 { correct_for(i) } else { wrong_for(i) };
                session.submit_answer(Some(pick)).unwrap();
                assert_invariants(&session);
                session.advance().unwrap();
                assert_invariants(&session);
                advances += 1;
            }

            assert_eq!(advances, total);
            let summary = session.final_score_summary().unwrap();
            assert_eq!(summary.total as usize, total);
            assert_eq!(summary.score as usize, total.div_ceil(2));
        }
    }

    #[test]
    fn two_of_four_is_fair() {
        let mut session = QuizSession::new(build_topic(4));
        for i in 0..4 {
            let pick = if i == 0 || i == 2 { correct_for(i) } else { wrong_for(i) };
            session.submit_answer(Some(pick)).unwrap();
            session.advance().unwrap();
        }

        let summary = session.final_score_summary().unwrap();
        assert_eq!(summary, ScoreSummary::new(2, 4));
        assert_eq!(summary.score, 2);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.band, ScoreBand::Fair);

        assert!(session.is_correct(0));
        assert!(!session.is_correct(1));
        assert!(session.is_correct(2));
        assert!(!session.is_correct(3));
    }

    #[test]
    fn perfect_run_is_perfect() {
        let mut session = QuizSession::new(build_topic(3));
        for i in 0..3 {
            session.submit_answer(Some(correct_for(i))).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(
            session.final_score_summary().unwrap().band,
            ScoreBand::Perfect
        );
    }

    #[test]
    fn is_correct_is_false_for_unanswered_questions() {
        let session = QuizSession::new(build_topic(3));
        assert!(!session.is_correct(0));
        assert!(!session.is_correct(99));
    }

    #[test]
    fn invalid_transition_message_names_phase_and_action() {
        let err = StateError::InvalidTransition {
            phase: SessionPhase::Finished,
            action: SessionAction::Advance,
        };
        assert_eq!(err.to_string(), "cannot advance while finished");
    }
}
