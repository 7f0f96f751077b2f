//! Rule tables for the challenge engine.
//!
//! This crate provides:
//! - YAML/JSON rule documents with `apiVersion/kind/metadata/spec` envelopes
//! - Dataset generation rules keyed by dataset type
//! - Level progression (explicit level lists, `"N+"` ranges, pattern registry)
//! - Filesystem loader assembling a [`loader::RuleSet`]
//! - Structured validation with "did you mean" suggestions

pub mod dataset_rules;
pub mod level_progression;
pub mod loader;
pub mod schema;
pub mod validation;

pub use dataset_rules::{DatasetRules, DatasetRulesRule, DatasetTypeRule};
pub use level_progression::{
    DatasetSize, DatasetTypes, LevelProgression, LevelProgressionRule, LevelRange, LevelRule,
    PatternTypes,
};
pub use loader::{RuleLoader, RuleSet};
