mod policy;
mod visibility;

use time::macros::datetime;
use tidemark_core::checkin::CognitiveState;

pub fn state(energy: u8, focus: u8, mood: u8) -> CognitiveState {
    CognitiveState::new(energy, focus, mood, "", datetime!(2026-03-01 09:00 UTC))
        .expect("levels are in range")
}
