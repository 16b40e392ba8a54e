pub mod policy;
pub mod types;

pub use policy::{adapt, complexity_ceiling};
pub use types::{AdaptationRecord, Spacing, Tone, TouchTarget, UiTier};
