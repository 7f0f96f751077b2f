use chrono::NaiveDate;
use hunter_core::{CellPosition, CellValue, DatasetKind};
use serde::Serialize;

use crate::formatting::FormattingRule;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternRequirements {
    pub dataset_type: DatasetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<usize>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Scoring {
    pub base_points: u32,
    pub difficulty_multiplier: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiProfile {
    pub glyphs_to_activate: Vec<String>,
    pub lens_summaries: Vec<String>,
    pub highlight_column: bool,
    pub lens_type: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SigilHint {
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub hint: String,
}

impl SigilHint {
    pub fn new(icon: &str, kind: &str, hint: &str) -> Self {
        Self {
            icon: icon.to_string(),
            kind: kind.to_string(),
            hint: hint.to_string(),
        }
    }

    pub fn fallback() -> Self {
        Self::new("🔮", "FALLBACK", "Analyze the grid.")
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionHints {
    pub preferred_question_types: Vec<String>,
    pub avoid_question_types: Vec<String>,
}

impl QuestionHints {
    pub fn new(preferred: &[&str], avoid: &[&str]) -> Self {
        Self {
            preferred_question_types: preferred.iter().map(|s| s.to_string()).collect(),
            avoid_question_types: avoid.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Everything about a pattern except its behaviour.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternProfile {
    pub id: String,
    pub label: String,
    pub difficulty: u8,
    pub category: String,
    pub requires: PatternRequirements,
    pub scoring: Scoring,
    pub context: UiProfile,
    pub sigil: SigilHint,
    pub question_hints: QuestionHints,
    pub formatting_rule: FormattingRule,
}

/// What an injection wrote, kept so highlighting can be re-derived later.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InjectionDetails {
    pub target_cells: Vec<CellPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_value: Option<CellValue>,
    /// Weekend samples the pattern draws from.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weekends: Vec<NaiveDate>,
}

impl InjectionDetails {
    pub fn single(target: CellPosition, value: CellValue) -> Self {
        Self {
            target_cells: vec![target],
            target_value: Some(value),
            weekends: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.target_cells.is_empty()
    }
}
