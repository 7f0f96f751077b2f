//! Rule kind enum for two-pass deserialization dispatch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported rule kinds for two-pass deserialization dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    DatasetRules,
    LevelProgression,
}

impl RuleKind {
    pub const ALL: [RuleKind; 2] = [RuleKind::DatasetRules, RuleKind::LevelProgression];
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::DatasetRules => write!(f, "DatasetRules"),
            RuleKind::LevelProgression => write!(f, "LevelProgression"),
        }
    }
}

impl FromStr for RuleKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "DatasetRules" => Ok(RuleKind::DatasetRules),
            "LevelProgression" => Ok(RuleKind::LevelProgression),
            other => Err(format!("unknown rule kind: '{}'", other)),
        }
    }
}
