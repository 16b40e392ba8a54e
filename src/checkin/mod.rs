pub mod types;

pub use types::{CognitiveState, LEVEL_MAX, LEVEL_MIN, NOTE_MAX_CHARS, latest};
