//! Decoding of the remote quiz document.
//!
//! Wire shape:
//!
//! ```text
//! [ { "title": "...", "desc": "...",
//!     "questions": [ { "text": "...", "answer": "2", "answers": ["...", "..."] } ] } ]
//! ```
//!
//! `answer` is a 1-based digit string. It is converted to a 0-based index here,
//! once, so nothing downstream ever re-parses it.

use serde::Deserialize;
use serde_json::error::Category;
use thiserror::Error;

use crate::model::{Question, QuestionError, Topic, TopicError, TopicId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Why a well-formed document was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaViolation {
    #[error("unexpected document shape: {0}")]
    Shape(String),

    #[error("topics[{topic}] has no questions")]
    NoQuestions { topic: usize },

    #[error("topics[{topic}].questions[{question}]: answer {raw:?} is not a 1-based number")]
    InvalidAnswerReference {
        topic: usize,
        question: usize,
        raw: String,
    },

    #[error("topics[{topic}].questions[{question}]: {reason}")]
    Question {
        topic: usize,
        question: usize,
        #[source]
        reason: QuestionError,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("document is not well-formed JSON: {0}")]
    Malformed(String),

    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::SchemaViolation(SchemaViolation::Shape(err.to_string())),
            Category::Syntax | Category::Eof | Category::Io => Self::Malformed(err.to_string()),
        }
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct WireTopic {
    title: String,
    desc: String,
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    text: String,
    answer: String,
    answers: Vec<String>,
}

//
// ─── DECODING ──────────────────────────────────────────────────────────────────
//

/// Decode a raw quiz document into validated topics.
///
/// Either every topic is accepted or the whole document is rejected.
///
/// # Errors
///
/// Returns `DecodeError::Malformed` if `raw` is not well-formed JSON, and
/// `DecodeError::SchemaViolation` if it does not match the wire shape, a topic has
/// no questions, a question has fewer than two answers, or an `answer` reference
/// is not a 1-based position in its `answers`.
pub fn parse_document(raw: &[u8]) -> Result<Vec<Topic>, DecodeError> {
    let wire: Vec<WireTopic> = serde_json::from_slice(raw)?;
    wire.into_iter()
        .enumerate()
        .map(|(position, topic)| convert_topic(position, topic))
        .collect()
}

fn convert_topic(position: usize, wire: WireTopic) -> Result<Topic, DecodeError> {
    let questions = wire
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| convert_question(position, index, question))
        .collect::<Result<Vec<_>, _>>()?;

    Topic::new(TopicId::from_position(position), wire.title, wire.desc, questions).map_err(
        |err| match err {
            TopicError::NoQuestions => SchemaViolation::NoQuestions { topic: position }.into(),
        },
    )
}

fn convert_question(
    topic: usize,
    question: usize,
    wire: WireQuestion,
) -> Result<Question, DecodeError> {
    let correct_index = wire
        .answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|one_based| one_based.checked_sub(1))
        .ok_or_else(|| SchemaViolation::InvalidAnswerReference {
            topic,
            question,
            raw: wire.answer.clone(),
        })?;

    Question::new(wire.text, wire.answers, correct_index).map_err(|reason| {
        SchemaViolation::Question {
            topic,
            question,
            reason,
        }
        .into()
    })
}
