use std::fmt;

use serde::{Deserialize, Serialize};

/// Tier used when a caller does not pick one.
pub const DEFAULT_TIER: u8 = 1;

/// How much of the pattern's match set a tier is allowed to reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintLevel {
    None,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TierName {
    Scout,
    Hunter,
    Tracker,
    Mythic,
}

impl TierName {
    /// Key of the question template written for this tier's register.
    pub fn template_key(&self) -> &'static str {
        match self {
            TierName::Scout => "scout",
            TierName::Hunter => "hunter",
            TierName::Tracker => "tracker",
            TierName::Mythic => "mythic",
        }
    }
}

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierName::Scout => write!(f, "SCOUT"),
            TierName::Hunter => write!(f, "HUNTER"),
            TierName::Tracker => write!(f, "TRACKER"),
            TierName::Mythic => write!(f, "MYTHIC"),
        }
    }
}

/// One of the four fixed difficulty records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdTier {
    pub tier: u8,
    pub name: TierName,
    pub hint_level: HintLevel,
    pub reward_multiplier: f64,
    /// Symmetric integer jitter added to generated numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_jitter: Option<f64>,
    /// Carried for rule compatibility; generation does not read it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distractor_density: Option<f64>,
}

impl ThresholdTier {
    const fn fixed(tier: u8, name: TierName, hint_level: HintLevel, reward_multiplier: f64) -> Self {
        Self {
            tier,
            name,
            hint_level,
            reward_multiplier,
            value_jitter: None,
            distractor_density: None,
        }
    }

    pub fn all() -> [ThresholdTier; 4] {
        [
            Self::fixed(0, TierName::Scout, HintLevel::High, 1.0),
            Self::fixed(1, TierName::Hunter, HintLevel::Medium, 1.5),
            Self::fixed(2, TierName::Tracker, HintLevel::Low, 2.0),
            Self::fixed(3, TierName::Mythic, HintLevel::None, 3.0),
        ]
    }

    /// Look up a tier by id; unknown ids map to the default (Hunter).
    pub fn for_tier(tier: u8) -> Self {
        let all = Self::all();
        let idx = if (tier as usize) < all.len() { tier } else { DEFAULT_TIER };
        all[idx as usize].clone()
    }

    pub fn with_value_jitter(mut self, jitter: f64) -> Self {
        self.value_jitter = Some(jitter);
        self
    }

    pub fn with_distractor_density(mut self, density: f64) -> Self {
        self.distractor_density = Some(density);
        self
    }
}

impl Default for ThresholdTier {
    fn default() -> Self {
        Self::for_tier(DEFAULT_TIER)
    }
}
