use chrono::NaiveDate;
use hunter_core::{CellValue, Dataset, DatasetKind};
use rand::RngCore;

use super::pick_random_cells;
use crate::formatting::FormattingRule;
use crate::patterns::{
    InjectionDetails, PatternDefinition, PatternProfile, PatternRequirements, QuestionHints,
    Scoring, SigilHint, UiProfile,
};

/// Cells forced onto a weekend.
pub const WEEKEND_COUNT: usize = 2;

/// Two October 2023 weekends, Saturday then Sunday.
const WEEKEND_SAMPLES: [(i32, u32, u32); 4] = [(2023, 10, 21), (2023, 10, 22), (2023, 10, 28), (2023, 10, 29)];

/// "Twin Suns": cells rewritten to known Saturday/Sunday dates.
pub struct WeekendPattern {
    profile: PatternProfile,
    samples: Vec<NaiveDate>,
}

impl WeekendPattern {
    pub fn new() -> Self {
        Self {
            profile: PatternProfile {
                id: "weekend".into(),
                label: "Twin Suns".into(),
                difficulty: 2,
                category: "date".into(),
                requires: PatternRequirements {
                    dataset_type: DatasetKind::Dates,
                    min_rows: None,
                },
                scoring: Scoring {
                    base_points: 110,
                    difficulty_multiplier: 1.2,
                },
                context: UiProfile {
                    glyphs_to_activate: vec!["weekend".into()],
                    lens_summaries: Vec::new(),
                    highlight_column: false,
                    lens_type: "weekend".into(),
                },
                sigil: SigilHint::new("☀️☀️", "WEEKEND", "Weekend dates (Sat/Sun)"),
                question_hints: QuestionHints::new(&["count_weekends", "identify_date_pattern"], &[]),
                formatting_rule: FormattingRule::HighlightWeekends,
            },
            samples: WEEKEND_SAMPLES
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
                .collect(),
        }
    }
}

impl Default for WeekendPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDefinition for WeekendPattern {
    fn profile(&self) -> &PatternProfile {
        &self.profile
    }

    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails {
        if self.samples.is_empty() {
            return InjectionDetails::default();
        }
        let targets = pick_random_cells(dataset, WEEKEND_COUNT, rng);
        for (i, pos) in targets.iter().enumerate() {
            let date = self.samples[i % self.samples.len()];
            if let Some(cell) = dataset.cell_mut(*pos) {
                cell.set_value(CellValue::Date(date));
            }
        }
        InjectionDetails {
            target_cells: targets,
            target_value: None,
            weekends: self.samples.clone(),
        }
    }

    fn matches(&self, value: &CellValue, details: &InjectionDetails) -> bool {
        value.as_date().is_some_and(|d| details.weekends.contains(&d))
    }
}
