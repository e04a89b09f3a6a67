use thiserror::Error;

use crate::session::{SessionAction, SessionPhase};

/// The caller passed an answer the current question cannot accept.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("answer index {index} is out of range for {len} answers")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The caller asked for something the session's current phase does not allow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        phase: SessionPhase,
        action: SessionAction,
    },

    #[error("session already finished")]
    SessionFinished,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    State(#[from] StateError),
}
