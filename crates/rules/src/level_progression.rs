//! LevelProgression rule kind: which dataset types, patterns and grid sizes
//! each level draws from.
//!
//! Two shapes are accepted: a bare ordered array of level rules, or an
//! object carrying an optional `patternRegistry` next to the `levels` array.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

/// `patternRegistry[datasetType][requestedKey] = patternId`.
pub type PatternRegistryMap = IndexMap<String, IndexMap<String, String>>;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level LevelProgression rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LevelProgressionRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: LevelProgression,
}

/// Which levels a rule applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LevelRange {
    List(Vec<u32>),
    /// `"N+"`: level N and every level above it.
    OpenEnded(String),
}

impl LevelRange {
    /// Lower bound of an `"N+"` range; `None` for lists and malformed strings.
    pub fn open_start(&self) -> Option<u32> {
        match self {
            LevelRange::OpenEnded(s) => s.trim().strip_suffix('+')?.trim().parse().ok(),
            LevelRange::List(_) => None,
        }
    }

    pub fn contains(&self, level: u32) -> bool {
        match self {
            LevelRange::List(levels) => levels.contains(&level),
            LevelRange::OpenEnded(_) => self.open_start().is_some_and(|min| level >= min),
        }
    }
}

/// `datasetTypes`: a single name or a list to pick from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DatasetTypes {
    One(String),
    Many(Vec<String>),
}

impl DatasetTypes {
    pub fn names(&self) -> Vec<&str> {
        match self {
            DatasetTypes::One(name) => vec![name.as_str()],
            DatasetTypes::Many(names) => names.iter().map(|s| s.as_str()).collect(),
        }
    }
}

/// `patternTypes`: `"ALL"`/`"random"`, a single id, or a list of ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PatternTypes {
    Keyword(String),
    List(Vec<String>),
}

impl PatternTypes {
    /// True for `"ALL"` and `"random"`: pick among every registered pattern.
    pub fn is_random(&self) -> bool {
        match self {
            PatternTypes::Keyword(k) => k.eq_ignore_ascii_case("all") || k.eq_ignore_ascii_case("random"),
            PatternTypes::List(_) => false,
        }
    }

    /// Explicitly listed ids (empty for the random keywords).
    pub fn listed(&self) -> Vec<&str> {
        match self {
            _ if self.is_random() => Vec::new(),
            PatternTypes::Keyword(id) => vec![id.as_str()],
            PatternTypes::List(ids) => ids.iter().map(|s| s.as_str()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetSize {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LevelRule {
    pub levels: LevelRange,
    pub dataset_types: DatasetTypes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_types: Option<PatternTypes>,
    pub dataset_size: DatasetSize,
}

/// Wire shape accepted for the progression table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawProgression {
    Levels(Vec<LevelRule>),
    Registry {
        #[serde(rename = "patternRegistry", default, skip_serializing_if = "Option::is_none")]
        pattern_registry: Option<PatternRegistryMap>,
        levels: Vec<LevelRule>,
    },
}

/// Ordered level rules plus the optional pattern registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawProgression", into = "RawProgression")]
pub struct LevelProgression {
    pub pattern_registry: Option<PatternRegistryMap>,
    pub levels: Vec<LevelRule>,
}

impl From<RawProgression> for LevelProgression {
    fn from(raw: RawProgression) -> Self {
        match raw {
            RawProgression::Levels(levels) => Self {
                pattern_registry: None,
                levels,
            },
            RawProgression::Registry {
                pattern_registry,
                levels,
            } => Self {
                pattern_registry,
                levels,
            },
        }
    }
}

impl From<LevelProgression> for RawProgression {
    fn from(p: LevelProgression) -> Self {
        match p.pattern_registry {
            None => RawProgression::Levels(p.levels),
            Some(registry) => RawProgression::Registry {
                pattern_registry: Some(registry),
                levels: p.levels,
            },
        }
    }
}

impl LevelProgression {
    /// Parse the bare, envelope-less JSON form (array or registry object).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// First rule whose range contains `level`; an unmatched level falls back
    /// to the last rule. `None` only when the table is empty.
    pub fn resolve(&self, level: u32) -> Option<&LevelRule> {
        self.levels
            .iter()
            .find(|rule| rule.levels.contains(level))
            .or_else(|| self.levels.last())
    }

    /// Registry entries for one dataset type, when a registry is configured.
    pub fn registry_for(&self, dataset_type: &str) -> Option<&IndexMap<String, String>> {
        self.pattern_registry.as_ref()?.get(dataset_type)
    }

    pub fn has_registry(&self) -> bool {
        self.pattern_registry.is_some()
    }
}

impl LevelProgressionRule {
    pub fn compile(&self) -> LevelProgression {
        self.spec.clone()
    }
}
