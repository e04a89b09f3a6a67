use thiserror::Error;

use crate::model::ids::TopicId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic must contain at least one question")]
    NoQuestions,
}

/// A named collection of quiz questions.
///
/// Immutable once built; sessions borrow nothing from it and clone what they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    questions: Vec<Question>,
}

impl Topic {
    /// Creates a topic.
    ///
    /// # Errors
    ///
    /// Returns `TopicError::NoQuestions` if `questions` is empty.
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, TopicError> {
        if questions.is_empty() {
            return Err(TopicError::NoQuestions);
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> TopicId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Copy of this topic with its questions rearranged by `reorder`.
    ///
    /// `reorder` only sees a slice, so the question count cannot change.
    #[must_use]
    pub fn with_reordered_questions(&self, reorder: impl FnOnce(&mut [Question])) -> Self {
        let mut copy = self.clone();
        reorder(&mut copy.questions);
        copy
    }
}

/// The in-memory list of topics shown to the user.
///
/// Only ever replaced wholesale, so a failed reload cannot leave it half-updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicList {
    topics: Vec<Topic>,
}

impl TopicList {
    #[must_use]
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }

    pub fn replace(&mut self, topics: Vec<Topic>) {
        self.topics = topics;
    }
}
