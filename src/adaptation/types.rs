use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTier {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    Relaxed,
    Normal,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Gentle,
    Standard,
    Energetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchTarget {
    Large,
    Normal,
    Compact,
}

// Derived on every read, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationRecord {
    pub tier: UiTier,
    pub complexity_ceiling: u8,
    pub spacing: Spacing,
    pub tone: Tone,
    pub touch_target: TouchTarget,
}

impl AdaptationRecord {
    pub fn medium_defaults() -> Self {
        Self {
            tier: UiTier::Medium,
            complexity_ceiling: 3,
            spacing: Spacing::Normal,
            tone: Tone::Standard,
            touch_target: TouchTarget::Normal,
        }
    }
}

impl Default for AdaptationRecord {
    fn default() -> Self {
        Self::medium_defaults()
    }
}
