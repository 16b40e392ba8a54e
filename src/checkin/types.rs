use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::{ValidationError, out_of_range, too_long};

pub const LEVEL_MIN: u8 = 1;
pub const LEVEL_MAX: u8 = 10;
pub const NOTE_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveState {
    pub energy: u8,
    pub focus: u8,
    pub mood: u8,
    #[serde(default)]
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub captured_at: OffsetDateTime,
}

impl CognitiveState {
    pub fn new(
        energy: u8,
        focus: u8,
        mood: u8,
        note: impl Into<String>,
        captured_at: OffsetDateTime,
    ) -> Result<Self, ValidationError> {
        let state = Self {
            energy,
            focus,
            mood,
            note: note.into(),
            captured_at,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_level("energy", self.energy)?;
        validate_level("focus", self.focus)?;
        validate_level("mood", self.mood)?;
        let note_chars = self.note.chars().count();
        if note_chars > NOTE_MAX_CHARS {
            return Err(too_long("note", note_chars, NOTE_MAX_CHARS));
        }
        Ok(())
    }
}

fn validate_level(field: &str, value: u8) -> Result<(), ValidationError> {
    if !(LEVEL_MIN..=LEVEL_MAX).contains(&value) {
        return Err(out_of_range(
            field,
            value,
            LEVEL_MIN as u32,
            LEVEL_MAX as u32,
        ));
    }
    Ok(())
}

// Ties keep the later slice entry; a re-submission of the same instant
// stays read-after-write consistent.
pub fn latest(history: &[CognitiveState]) -> Option<&CognitiveState> {
    history.iter().reduce(|best, candidate| {
        if candidate.captured_at >= best.captured_at {
            candidate
        } else {
            best
        }
    })
}
