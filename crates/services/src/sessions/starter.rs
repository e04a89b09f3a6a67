use rand::rng;
use rand::seq::SliceRandom;
use tracing::debug;

use quiz_core::QuizSession;
use quiz_core::model::{Topic, TopicId, TopicList};

use crate::error::SessionStartError;

/// Creates sessions for topics the user picks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStarter {
    shuffle_questions: bool,
}

impl SessionStarter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask questions in a random order instead of document order.
    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle_questions: bool) -> Self {
        self.shuffle_questions = shuffle_questions;
        self
    }

    #[must_use]
    pub fn start(&self, topic: &Topic) -> QuizSession {
        debug!(topic = %topic.id(), shuffle = self.shuffle_questions, "starting session");
        if self.shuffle_questions {
            QuizSession::new(topic.with_reordered_questions(|questions| questions.shuffle(&mut rng())))
        } else {
            QuizSession::new(topic.clone())
        }
    }

    /// Start a session for the topic with `id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionStartError::UnknownTopic` if `topics` has no such topic.
    pub fn start_by_id(
        &self,
        topics: &TopicList,
        id: TopicId,
    ) -> Result<QuizSession, SessionStartError> {
        let topic = topics.get(id).ok_or(SessionStartError::UnknownTopic(id))?;
        Ok(self.start(topic))
    }
}
