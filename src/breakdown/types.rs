use serde::{Deserialize, Serialize};

use crate::{
    quota::PlanTier,
    tasks::Breakdown,
};

pub const MIN_STEPS: usize = 3;
pub const MAX_STEPS: usize = 6;
pub const DEFAULT_FALLBACK_MINUTES: u16 = 30;

fn default_completion_timeout_ms() -> u64 {
    8_000
}

fn default_max_completion_tokens() -> u32 {
    512
}

fn default_fallback_minutes() -> u16 {
    DEFAULT_FALLBACK_MINUTES
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownConfig {
    #[serde(default = "default_completion_timeout_ms")]
    pub completion_timeout_ms: u64,
    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,
    #[serde(default = "default_fallback_minutes")]
    pub fallback_default_minutes: u16,
}

impl Default for BreakdownConfig {
    fn default() -> Self {
        Self {
            completion_timeout_ms: default_completion_timeout_ms(),
            max_completion_tokens: default_max_completion_tokens(),
            fallback_default_minutes: default_fallback_minutes(),
        }
    }
}

// The raw counters never reach the user verbatim; `message` is the
// pre-templated copy the caller renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownDenial {
    pub tier: PlanTier,
    pub remaining: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BreakdownOutcome {
    Ready { breakdown: Breakdown },
    Declined { denial: BreakdownDenial },
}
