use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownErrorKind {
    InvalidRequest,
    Timeout,
    Transport,
    MalformedResponse,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownError {
    pub kind: BreakdownErrorKind,
    pub message: String,
}

impl BreakdownError {
    pub fn new(kind: BreakdownErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    // Transient assistant-side failures release the reservation and fall
    // back locally instead of surfacing as hard failures.
    pub fn is_assistant_failure(&self) -> bool {
        matches!(
            self.kind,
            BreakdownErrorKind::Timeout
                | BreakdownErrorKind::Transport
                | BreakdownErrorKind::MalformedResponse
        )
    }
}

impl fmt::Display for BreakdownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for BreakdownError {}

pub fn invalid_request(message: impl Into<String>) -> BreakdownError {
    BreakdownError::new(BreakdownErrorKind::InvalidRequest, message)
}

pub fn timeout(message: impl Into<String>) -> BreakdownError {
    BreakdownError::new(BreakdownErrorKind::Timeout, message)
}

pub fn transport(message: impl Into<String>) -> BreakdownError {
    BreakdownError::new(BreakdownErrorKind::Transport, message)
}

pub fn malformed_response(message: impl Into<String>) -> BreakdownError {
    BreakdownError::new(BreakdownErrorKind::MalformedResponse, message)
}

pub fn internal_error(message: impl Into<String>) -> BreakdownError {
    BreakdownError::new(BreakdownErrorKind::Internal, message)
}
