use std::fmt;

use serde::{Deserialize, Serialize};

pub type UserId = String;
pub type TaskId = String;
pub type RequestId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

pub fn out_of_range(field: &str, value: impl fmt::Display, min: u32, max: u32) -> ValidationError {
    ValidationError::new(field, format!("{value} is outside [{min}, {max}]"))
}

pub fn too_long(field: &str, len: usize, max: usize) -> ValidationError {
    ValidationError::new(field, format!("{len} chars exceeds the {max} char maximum"))
}

pub fn empty_field(field: &str) -> ValidationError {
    ValidationError::new(field, "must not be empty")
}
