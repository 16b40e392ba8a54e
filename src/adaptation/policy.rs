use crate::{
    adaptation::types::{AdaptationRecord, Spacing, Tone, TouchTarget, UiTier},
    checkin::CognitiveState,
};

// Spacing and tone follow the energy-focus average; the complexity ceiling
// follows energy alone and the touch target follows focus alone. The
// asymmetry is a fixed contract.
pub fn adapt(state: Option<&CognitiveState>) -> AdaptationRecord {
    let Some(state) = state else {
        return AdaptationRecord::medium_defaults();
    };

    let tier = tier_for(state.energy, state.focus);
    AdaptationRecord {
        tier,
        complexity_ceiling: complexity_ceiling(state.energy),
        spacing: spacing_for(tier),
        tone: tone_for(tier),
        touch_target: touch_target_for(state.focus),
    }
}

pub fn complexity_ceiling(energy: u8) -> u8 {
    match energy {
        0..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        7..=8 => 4,
        _ => 5,
    }
}

fn tier_for(energy: u8, focus: u8) -> UiTier {
    // Fractional mean: energy 3 / focus 4 must land in the medium band.
    let avg = (energy as f32 + focus as f32) / 2.0;
    if avg <= 3.0 {
        UiTier::Low
    } else if avg <= 6.0 {
        UiTier::Medium
    } else {
        UiTier::High
    }
}

fn spacing_for(tier: UiTier) -> Spacing {
    match tier {
        UiTier::Low => Spacing::Relaxed,
        UiTier::Medium => Spacing::Normal,
        UiTier::High => Spacing::Compact,
    }
}

fn tone_for(tier: UiTier) -> Tone {
    match tier {
        UiTier::Low => Tone::Gentle,
        UiTier::Medium => Tone::Standard,
        UiTier::High => Tone::Energetic,
    }
}

fn touch_target_for(focus: u8) -> TouchTarget {
    match focus {
        0..=3 => TouchTarget::Large,
        4..=6 => TouchTarget::Normal,
        _ => TouchTarget::Compact,
    }
}
