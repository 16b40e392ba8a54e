use serde::{Deserialize, Serialize};

use crate::types::{TaskId, ValidationError, empty_field, out_of_range, too_long};

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const COMPLEXITY_MIN: u8 = 1;
pub const COMPLEXITY_MAX: u8 = 5;
pub const ESTIMATED_MINUTES_MAX: u16 = 1440;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub complexity: u8,
    pub estimated_minutes: u16,
    pub completed: bool,
    // Attached only by the breakdown orchestrator.
    #[serde(default)]
    pub breakdown: Option<Breakdown>,
}

impl Task {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(empty_field("title"));
        }
        let title_chars = self.title.chars().count();
        if title_chars > TITLE_MAX_CHARS {
            return Err(too_long("title", title_chars, TITLE_MAX_CHARS));
        }
        let description_chars = self.description.chars().count();
        if description_chars > DESCRIPTION_MAX_CHARS {
            return Err(too_long(
                "description",
                description_chars,
                DESCRIPTION_MAX_CHARS,
            ));
        }
        if !(COMPLEXITY_MIN..=COMPLEXITY_MAX).contains(&self.complexity) {
            return Err(out_of_range(
                "complexity",
                self.complexity,
                COMPLEXITY_MIN as u32,
                COMPLEXITY_MAX as u32,
            ));
        }
        if !(1..=ESTIMATED_MINUTES_MAX).contains(&self.estimated_minutes) {
            return Err(out_of_range(
                "estimated_minutes",
                self.estimated_minutes,
                1,
                ESTIMATED_MINUTES_MAX as u32,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownSource {
    Assistant,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub title: String,
    pub minutes: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    pub steps: Vec<BreakdownStep>,
    pub total_minutes: u16,
    pub adapted: bool,
    pub source: BreakdownSource,
    #[serde(default)]
    pub encouragement: Option<String>,
}
