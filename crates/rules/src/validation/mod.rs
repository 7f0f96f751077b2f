//! Rule validation with structured errors and suggestions.
//!
//! Validates DatasetRules and LevelProgression documents. Returns a
//! [`ValidationResult`] with errors (block use) and warnings (advisory).

mod common_checks;
mod dataset_checks;
mod progression_checks;

pub mod fuzzy;

use hunter_core::DatasetKind;
use serde::{Deserialize, Serialize};

use crate::schema::{RuleDocument, RuleEnvelope};

// ── Result types ────────────────────────────────────────────────────

/// Overall validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

/// A blocking validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-path-like location, e.g. `"spec.datasetTypes.numbers.generation"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A non-blocking advisory warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    pub(crate) fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationError {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    pub(crate) fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Report an unknown dataset type name, with a suggestion when one is close.
pub(crate) fn unknown_dataset_type(result: &mut ValidationResult, path: &str, name: &str) {
    let known = DatasetKind::names();
    match fuzzy::fuzzy_match(name, &known) {
        Some(s) => result.error_with_suggestion(
            path,
            format!("Unknown dataset type '{name}'"),
            format!("Did you mean '{s}'?"),
        ),
        None => result.error(
            path,
            format!("Unknown dataset type '{name}' (expected one of: {})", known.join(", ")),
        ),
    }
}

// ── Public API ──────────────────────────────────────────────────────

/// Validate any [`RuleDocument`] variant, dispatching to the appropriate validator.
pub fn validate_document(doc: &RuleDocument) -> ValidationResult {
    let mut result = ValidationResult::new();
    match doc {
        RuleDocument::DatasetRules(rule) => {
            dataset_checks::validate_dataset_rules(rule, &mut result);
        }
        RuleDocument::LevelProgression(rule) => {
            progression_checks::validate_level_progression(rule, &mut result);
        }
    }
    result
}

/// Parse raw YAML (any kind) and validate. Parse errors become validation errors.
pub fn validate_yaml(yaml: &str) -> ValidationResult {
    let parsed = serde_yaml::from_str::<RuleEnvelope>(yaml)
        .map_err(|e| format!("YAML parse error: {e}"))
        .and_then(|env| env.parse_full());
    match parsed {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut result = ValidationResult::new();
            result.error("", e);
            result
        }
    }
}

#[cfg(test)]
mod tests;
