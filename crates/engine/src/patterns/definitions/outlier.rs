use hunter_core::{CellValue, Dataset, DatasetKind};
use rand::RngCore;

use super::{numeric_values, pick_random_cells};
use crate::formatting::FormattingRule;
use crate::patterns::{
    InjectionDetails, PatternDefinition, PatternProfile, PatternRequirements, QuestionHints,
    Scoring, SigilHint, UiProfile,
};

/// "The Broken Pattern": one cell pushed far above the mean.
pub struct OutlierPattern {
    profile: PatternProfile,
}

impl OutlierPattern {
    pub fn new() -> Self {
        Self {
            profile: PatternProfile {
                id: "outlier".into(),
                label: "The Broken Pattern".into(),
                difficulty: 2,
                category: "outlier".into(),
                requires: PatternRequirements {
                    dataset_type: DatasetKind::Numbers,
                    min_rows: None,
                },
                scoring: Scoring {
                    base_points: 120,
                    difficulty_multiplier: 1.3,
                },
                context: UiProfile {
                    glyphs_to_activate: vec!["outlier".into(), "above".into()],
                    lens_summaries: vec!["stats".into()],
                    highlight_column: false,
                    lens_type: "stats".into(),
                },
                sigil: SigilHint::new("⚡", "OUTLIER", "Anomaly / Outlier"),
                question_hints: QuestionHints::new(&["value_above_mean", "max_value"], &["min_value"]),
                formatting_rule: FormattingRule::HighlightOutlier,
            },
        }
    }

    /// `floor(mean × 2.5) + 100`.
    pub fn spike_for(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some((mean * 2.5).floor() + 100.0)
    }
}

impl Default for OutlierPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDefinition for OutlierPattern {
    fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails {
        let Some(spike) = Self::spike_for(&numeric_values(dataset)) else {
            return InjectionDetails::default();
        };
        let Some(target) = pick_random_cells(dataset, 1, rng).pop() else {
            return InjectionDetails::default();
        };
        let value = CellValue::Number(spike);
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
