use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaErrorKind {
    StoreUnavailable,
    RecordMissing,
    InvalidRecord,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaError {
    pub kind: QuotaErrorKind,
    pub message: String,
}

impl QuotaError {
    pub fn new(kind: QuotaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QuotaError {}

pub fn store_unavailable(message: impl Into<String>) -> QuotaError {
    QuotaError::new(QuotaErrorKind::StoreUnavailable, message)
}

pub fn record_missing(message: impl Into<String>) -> QuotaError {
    QuotaError::new(QuotaErrorKind::RecordMissing, message)
}

pub fn invalid_record(message: impl Into<String>) -> QuotaError {
    QuotaError::new(QuotaErrorKind::InvalidRecord, message)
}

pub fn internal_error(message: impl Into<String>) -> QuotaError {
    QuotaError::new(QuotaErrorKind::Internal, message)
}
