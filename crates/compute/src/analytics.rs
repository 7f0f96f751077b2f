//! The canonical analytics shape consumed by formatting, questions and the
//! glyph/sigil/lens codices. Every index is a flat row-major cell index.

use chrono::NaiveDate;
use hunter_core::CellValue;
use serde::Serialize;

use crate::algorithms::frequency::ValueCount;
use crate::algorithms::stats::PopulationStats;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub above: Vec<usize>,
    pub below: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexSet {
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrequencySummary {
    pub repeated: Vec<usize>,
}

/// Cheap booleans for UI gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GlyphFlags {
    pub outlier: bool,
    pub frequency: bool,
    pub unique: bool,
    pub weekend: bool,
    pub sequence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigilSupport {
    pub max_value: Option<f64>,
    pub min_value: Option<f64>,
    /// Value of the first cell that occurs exactly once.
    pub unique_value: Option<CellValue>,
    /// Distinct values that occur more than once, first-seen order.
    pub frequency_values: Vec<CellValue>,
    pub weekend_indices: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LensSupport {
    /// Numeric grids only.
    pub stats: Option<PopulationStats>,
    pub frequency: Vec<ValueCount>,
    pub unique: Vec<usize>,
    pub weekend: Vec<usize>,
    pub sequence: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DateStats {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub mode: Option<CellValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsMetadata {
    pub distribution: Distribution,
    pub outliers: IndexSet,
    pub frequency: FrequencySummary,
    pub unique: IndexSet,
    pub weekends: IndexSet,
    pub clusters: Vec<Vec<usize>>,
    pub sequences: Vec<Vec<usize>>,
    pub glyphs: GlyphFlags,
    pub sigil_support: SigilSupport,
    pub lens: LensSupport,
    pub date_stats: DateStats,
    pub category_stats: CategoryStats,
}

impl AnalyticsMetadata {
    pub fn stats(&self) -> Option<&PopulationStats> {
        self.lens.stats.as_ref()
    }

    pub fn longest_sequence(&self) -> usize {
        crate::algorithms::sequences::longest_run(&self.sequences)
    }
}
