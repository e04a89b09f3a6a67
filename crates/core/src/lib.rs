#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod model;
pub mod session;
pub mod time;

pub use document::{DecodeError, SchemaViolation, parse_document};
pub use error::{InputError, SessionError, StateError};
pub use session::{AnswerOutcome, Feedback, QuizSession, SessionAction, SessionPhase};
pub use time::Clock;
