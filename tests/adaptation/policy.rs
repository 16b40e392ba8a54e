use tidemark_core::adaptation::{Spacing, Tone, TouchTarget, UiTier, adapt, complexity_ceiling};

use crate::state;

#[test]
fn given_any_energy_when_ceiling_is_computed_then_it_never_decreases() {
    for focus in 1..=10u8 {
        let mut previous = 0;
        for energy in 1..=10u8 {
            let record = adapt(Some(&state(energy, focus, 5)));
            assert_eq!(record.complexity_ceiling, complexity_ceiling(energy));
            assert!(record.complexity_ceiling >= previous);
            previous = record.complexity_ceiling;
        }
    }
}

#[test]
fn given_a_depleted_checkin_when_adapted_then_every_low_parameter_applies() {
    let record = adapt(Some(&state(2, 3, 2)));
    assert_eq!(record.tier, UiTier::Low);
    assert_eq!(record.complexity_ceiling, 1);
    assert_eq!(record.spacing, Spacing::Relaxed);
    assert_eq!(record.tone, Tone::Gentle);
    assert_eq!(record.touch_target, TouchTarget::Large);
}

#[test]
fn given_an_energized_checkin_when_adapted_then_every_high_parameter_applies() {
    let record = adapt(Some(&state(8, 9, 7)));
    assert_eq!(record.tier, UiTier::High);
    assert_eq!(record.complexity_ceiling, 5);
    assert_eq!(record.spacing, Spacing::Compact);
    assert_eq!(record.tone, Tone::Energetic);
    assert_eq!(record.touch_target, TouchTarget::Compact);
}

#[test]
fn given_the_same_checkin_when_adapted_twice_then_results_are_identical() {
    let checkin = state(6, 4, 8);
    assert_eq!(adapt(Some(&checkin)), adapt(Some(&checkin)));
}

#[test]
fn given_mood_swings_when_adapted_then_mood_never_moves_the_record() {
    // No UI parameter keys off mood.
    for mood in 1..=10u8 {
        assert_eq!(adapt(Some(&state(5, 5, mood))), adapt(Some(&state(5, 5, 1))));
    }
}
