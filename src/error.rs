use thiserror::Error;

use crate::domain::OrderStatus;

/// Failures talking to the REST backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Http(String),
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Could not decode backend response: {0}")]
    Decode(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Http(e.to_string())
        }
    }
}

/// Errors surfaced to whoever drives the desk.
///
/// `InvalidTransition` and `ValidationError` are raised locally and never
/// cost a network request. `TransitionRejected` and `FetchFailed` mean the
/// backend was asked and did not succeed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeskError {
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },
    #[error("Transition rejected: {0}")]
    TransitionRejected(String),
    #[error("Order fetch failed: {0}")]
    FetchFailed(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
