use std::collections::HashSet;

use hunter_core::{CellValue, Dataset, DatasetKind};
use rand::{Rng, RngCore};

use super::pick_random_cells;
use crate::formatting::FormattingRule;
use crate::patterns::{
    InjectionDetails, PatternDefinition, PatternProfile, PatternRequirements, QuestionHints,
    Scoring, SigilHint, UiProfile,
};

const SENTINEL_PREFIX: &str = "Anomaly-";
const SENTINEL_RANGE: u32 = 999;

/// "The Lone Star": one cell replaced by a value found nowhere else.
pub struct UniquePattern {
    profile: PatternProfile,
}

impl UniquePattern {
    pub fn new() -> Self {
        Self {
            profile: PatternProfile {
                id: "unique".into(),
                label: "The Lone Star".into(),
                difficulty: 3,
                category: "unique".into(),
                requires: PatternRequirements {
                    dataset_type: DatasetKind::Categories,
                    min_rows: Some(3),
                },
                scoring: Scoring {
                    base_points: 150,
                    difficulty_multiplier: 1.5,
                },
                context: UiProfile {
                    glyphs_to_activate: vec!["unique".into()],
                    lens_summaries: vec!["unique".into()],
                    highlight_column: false,
                    lens_type: "frequency".into(),
                },
                sigil: SigilHint::new("⭐", "UNIQUE", "Unique value (appears once)"),
                question_hints: QuestionHints::new(&["unique_category"], &["frequency_count"]),
                formatting_rule: FormattingRule::HighlightUnique,
            },
        }
    }

    /// Draw `Anomaly-N` until it collides with nothing in `existing`.
    fn mint_sentinel(existing: &HashSet<String>, rng: &mut dyn RngCore) -> Option<String> {
        // Bounded by the sentinel space; every id is taken only on a pathological grid.
        for _ in 0..SENTINEL_RANGE * 4 {
            let candidate = format!("{}{}", SENTINEL_PREFIX, rng.gen_range(0..SENTINEL_RANGE));
            if !existing.contains(&candidate) {
                return Some(candidate);
            }
        }
        (0..SENTINEL_RANGE)
            .map(|n| format!("{}{}", SENTINEL_PREFIX, n))
            .find(|c| !existing.contains(c))
    }
}

impl Default for UniquePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDefinition for UniquePattern {
    fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails {
        let existing: HashSet<String> = dataset.cells().map(|c| c.value.to_string()).collect();
        let Some(sentinel) = Self::mint_sentinel(&existing, rng) else {
            return InjectionDetails::default();
        };
        let Some(target) = pick_random_cells(dataset, 1, rng).pop() else {
            return InjectionDetails::default();
        };
        let value = CellValue::Category(sentinel);
        if let Some(cell) = dataset.cell_mut(target) {
            cell.set_value(value.clone());
        }
        InjectionDetails::single(target, value)
    }

    fn matches(&self, value: &CellValue, details: &InjectionDetails) -> bool {
        details.target_value.as_ref() == Some(value)
    }
}
