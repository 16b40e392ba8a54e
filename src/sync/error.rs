use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncErrorKind {
    Storage,
    InvalidEntry,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncError {
    pub kind: SyncErrorKind,
    pub message: String,
}

impl SyncError {
    pub fn new(kind: SyncErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SyncError {}

pub fn storage_error(message: impl Into<String>) -> SyncError {
    SyncError::new(SyncErrorKind::Storage, message)
}

pub fn invalid_entry(message: impl Into<String>) -> SyncError {
    SyncError::new(SyncErrorKind::InvalidEntry, message)
}

pub fn internal_error(message: impl Into<String>) -> SyncError {
    SyncError::new(SyncErrorKind::Internal, message)
}
