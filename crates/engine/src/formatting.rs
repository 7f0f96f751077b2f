//! Maps a pattern and tier to the cells revealed as a hint plus their style.

use hunter_core::{Cell, Dataset, HintLevel, ThresholdTier};
use serde::{Deserialize, Serialize};

use crate::patterns::{apply_highlight_logic, PatternMeta, PatternRegistry, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormattingRule {
    HighlightWeekends,
    HighlightSpecificWeekday,
    HighlightEarliestOrLatest,
    HighlightDateRange,
    HighlightAboveThreshold,
    HighlightBelowThreshold,
    HighlightOutlier,
    HighlightCluster,
    HighlightMaxOrMin,
    HighlightMostFrequent,
    HighlightUnique,
    HighlightRowOrColumnPattern,
    HighlightEarlyLate,
    HighlightAmPm,
    HighlightTimeRange,
    None,
}

impl FormattingRule {
    pub fn css_class(&self) -> &'static str {
        match self {
            FormattingRule::HighlightWeekends => "fmt-weekend",
            FormattingRule::HighlightSpecificWeekday => "fmt-weekday",
            FormattingRule::HighlightEarliestOrLatest => "fmt-extreme",
            FormattingRule::HighlightDateRange => "fmt-range",
            FormattingRule::HighlightAboveThreshold => "fmt-above",
            FormattingRule::HighlightBelowThreshold => "fmt-below",
            FormattingRule::HighlightOutlier => "fmt-outlier",
            FormattingRule::HighlightCluster => "fmt-cluster",
            FormattingRule::HighlightMaxOrMin => "fmt-extreme",
            FormattingRule::HighlightMostFrequent => "fmt-frequency",
            FormattingRule::HighlightUnique => "fmt-unique",
            FormattingRule::HighlightRowOrColumnPattern => "fmt-rowcol",
            FormattingRule::HighlightEarlyLate => "fmt-earlylate",
            FormattingRule::HighlightAmPm => "fmt-ampm",
            FormattingRule::HighlightTimeRange => "fmt-timerange",
            FormattingRule::None => "fmt-default",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormattingResult {
    pub formatting_rule: FormattingRule,
    pub css_class: String,
    pub highlighted_cells: Vec<Cell>,
    pub lens_type: String,
    pub lens_summaries: Vec<String>,
    pub glyphs: Vec<String>,
    pub sigil_type: String,
}

/// Hint-tier policy: how many of `matches` a tier may reveal.
///
/// `none` reveals nothing; `low` reveals one cell, or every match when the
/// pattern highlights a whole column, or exactly `targetCellsCount` cells when
/// the pattern wrote several; `medium` and `high` reveal everything.
pub fn reveal(matches: &[Cell], hint_level: HintLevel, ui: &UiContext) -> Vec<Cell> {
    let take = match hint_level {
        HintLevel::None => 0,
        HintLevel::Low if ui.highlight_column => matches.len(),
        HintLevel::Low if ui.target_cells_count > 1 => ui.target_cells_count,
        HintLevel::Low => 1,
        HintLevel::Medium | HintLevel::High => matches.len(),
    };
    matches.iter().take(take).cloned().collect()
}

/// Resolve formatting for an injected pattern.
pub fn resolve_formatting(
    registry: &PatternRegistry,
    dataset: &Dataset,
    meta: &PatternMeta,
    tier: &ThresholdTier,
) -> FormattingResult {
    let matches = apply_highlight_logic(registry, dataset, meta);
    FormattingResult {
        formatting_rule: meta.formatting_rule,
        css_class: meta.formatting_rule.css_class().to_string(),
        highlighted_cells: reveal(&matches, tier.hint_level, &meta.ui_context),
        lens_type: meta.lens.kind.clone(),
        lens_summaries: meta.lens.summaries.clone(),
        glyphs: meta.glyphs.activate.clone(),
        sigil_type: meta.sigil.kind.clone(),
    }
}
