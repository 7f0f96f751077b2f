use hunter_core::{CellValue, Dataset, DatasetKind};
use rand::RngCore;

use super::{numeric_values, pick_random_cells};
use crate::formatting::FormattingRule;
use crate::patterns::{
    InjectionDetails, PatternDefinition, PatternProfile, PatternRequirements, QuestionHints,
    Scoring, SigilHint, UiProfile,
};

/// "The Deep Valley": one cell forced strictly below the current minimum.
pub struct RangePattern {
    profile: PatternProfile,
}

impl RangePattern {
    pub fn new() -> Self {
        Self {
            profile: PatternProfile {
                id: "range".into(),
                label: "The Deep Valley".into(),
                difficulty: 1,
                category: "range".into(),
                requires: PatternRequirements {
                    dataset_type: DatasetKind::Numbers,
                    min_rows: None,
                },
                scoring: Scoring {
                    base_points: 100,
                    difficulty_multiplier: 1.0,
                },
                context: UiProfile {
                    glyphs_to_activate: vec!["below".into()],
                    lens_summaries: vec!["stats".into()],
                    highlight_column: false,
                    lens_type: "stats".into(),
                },
                sigil: SigilHint::new("🕳️", "MIN_VALUE", "Smallest number (MIN)"),
                question_hints: QuestionHints::new(&["value_below_mean", "min_value"], &["max_value"]),
                formatting_rule: FormattingRule::HighlightMaxOrMin,
            },
        }
    }

    /// `min(floor(min / 2), min − 1)`; halving alone does not lower a
    /// minimum of 0 or 1.
    pub fn valley_for(values: &[f64]) -> Option<f64> {
        let min = values.iter().copied().reduce(f64::min)?;
        Some((min / 2.0).floor().min(min - 1.0))
    }
}

impl Default for RangePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDefinition for RangePattern {
    fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails {
        let Some(valley) = Self::valley_for(&numeric_values(dataset)) else {
            return InjectionDetails::default();
        };
        let Some(target) = pick_random_cells(dataset, 1, rng).pop() else {
            return InjectionDetails::default();
        };
        let value = CellValue::Number(valley);
        if let Some(cell) = dataset.cell_mut(target) {
            cell.set_value(value.clone());
        }
        InjectionDetails::single(target, value)
    }

    fn matches(&self, value: &CellValue, details: &InjectionDetails) -> bool {
        match (value.as_number(), details.target_value.as_ref().and_then(|v| v.as_number())) {
            (Some(v), Some(target)) => v == target,
            _ => false,
        }
    }
}
