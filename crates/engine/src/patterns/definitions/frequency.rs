use hunter_core::{CellValue, Dataset, DatasetKind};
use rand::{Rng, RngCore};

use super::pick_random_cells;
use crate::formatting::FormattingRule;
use crate::patterns::{
    InjectionDetails, PatternDefinition, PatternProfile, PatternRequirements, QuestionHints,
    Scoring, SigilHint, UiProfile,
};

/// Cells overwritten with the echoed value.
pub const ECHO_COUNT: usize = 3;

/// "Echo of the Archive": one existing value copied into several cells.
pub struct FrequencyPattern {
    profile: PatternProfile,
}

impl FrequencyPattern {
    pub fn new() -> Self {
        Self {
            profile: PatternProfile {
                id: "frequency".into(),
                label: "Echo of the Archive".into(),
                difficulty: 2,
                category: "sequence".into(),
                requires: PatternRequirements {
                    dataset_type: DatasetKind::Categories,
                    min_rows: Some(4),
                },
                scoring: Scoring {
                    base_points: 100,
                    difficulty_multiplier: 1.2,
                },
                context: UiProfile {
                    glyphs_to_activate: vec!["frequency".into()],
                    lens_summaries: vec!["frequency".into()],
                    highlight_column: false,
                    lens_type: "frequency".into(),
                },
                sigil: SigilHint::new("🔁", "FREQUENCY", "Repeated values (frequency)"),
                question_hints: QuestionHints::new(&["frequency_count"], &["unique_category", "min_value"]),
                formatting_rule: FormattingRule::HighlightMostFrequent,
            },
        }
    }
}

impl Default for FrequencyPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDefinition for FrequencyPattern {
    fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails {
        if dataset.is_empty() {
            return InjectionDetails::default();
        }
        let source = rng.gen_range(0..dataset.len());
        let Some(echo) = dataset.cells().nth(source).map(|c| c.value.clone()) else {
            return InjectionDetails::default();
        };

        let targets = pick_random_cells(dataset, ECHO_COUNT, rng);
        for pos in &targets {
            if let Some(cell) = dataset.cell_mut(*pos) {
                cell.set_value(echo.clone());
            }
        }
        InjectionDetails {
            target_cells: targets,
            target_value: Some(echo),
            weekends: Vec::new(),
        }
    }

    fn matches(&self, value: &CellValue, details: &InjectionDetails) -> bool {
        details
            .target_value
            .as_ref()
            .is_some_and(|t| t.group_key() == value.group_key())
    }
}
