//! Filesystem rule loader.
//!
//! Scans the rules directory for YAML and JSON documents and assembles the
//! rule tables the engine runs on. Supports every rule kind via two-pass
//! deserialization (RuleEnvelope -> RuleDocument), plus envelope-less JSON.

mod core;
mod error;
mod rule_set;

#[cfg(test)]
mod tests;

pub use self::core::RuleLoader;
pub use self::error::{LoadResult, LoadStatus, Result, RuleError};
pub use self::rule_set::RuleSet;
