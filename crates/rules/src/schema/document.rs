//! Multi-kind rule document container and accessors.

use super::{CommonMetadata, RuleKind};
use crate::dataset_rules::DatasetRulesRule;
use crate::level_progression::LevelProgressionRule;

/// A fully deserialized rule of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDocument {
    /// Generation parameters per dataset type.
    DatasetRules(DatasetRulesRule),
    /// Level table plus optional pattern registry.
    LevelProgression(LevelProgressionRule),
}

impl RuleDocument {
    /// Get the rule's metadata regardless of kind.
    pub fn metadata(&self) -> &CommonMetadata {
        match self {
            RuleDocument::DatasetRules(rule) => &rule.metadata,
            RuleDocument::LevelProgression(rule) => &rule.metadata,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            RuleDocument::DatasetRules(_) => RuleKind::DatasetRules,
            RuleDocument::LevelProgression(_) => RuleKind::LevelProgression,
        }
    }

    pub fn as_dataset_rules(&self) -> Option<&DatasetRulesRule> {
        match self {
            RuleDocument::DatasetRules(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_level_progression(&self) -> Option<&LevelProgressionRule> {
        match self {
            RuleDocument::LevelProgression(rule) => Some(rule),
            _ => None,
        }
    }

    /// Serialize this document to JSON, delegating to the inner type.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            RuleDocument::DatasetRules(r) => serde_json::to_value(r),
            RuleDocument::LevelProgression(r) => serde_json::to_value(r),
        }
    }

    pub fn to_yaml(&self) -> std::result::Result<String, serde_yaml::Error> {
        match self {
            RuleDocument::DatasetRules(r) => serde_yaml::to_string(r),
            RuleDocument::LevelProgression(r) => serde_yaml::to_string(r),
        }
    }
}
