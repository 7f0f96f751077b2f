use std::str::FromStr;

use hunter_core::{validate_cells, Cell, CellPosition, Dataset, DatasetKind, ThresholdTier};
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, warn};

use super::{
    InjectionDetails, PatternDefinition, PatternRegistry, QuestionHints, SigilHint, NONE_PATTERN,
};
use crate::formatting::FormattingRule;

/// Tag written onto every injected cell.
fn pattern_tag(id: &str) -> String {
    format!("pattern:{}", id)
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringMeta {
    pub base_points: u32,
    pub difficulty_multiplier: f64,
    pub tier_multiplier: f64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiContext {
    pub glyphs_to_activate: Vec<String>,
    pub lens_summaries: Vec<String>,
    pub highlight_column: bool,
    pub lens_type: String,
    pub target_cells_count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LensMeta {
    #[serde(rename = "type")]
    pub kind: String,
    pub summaries: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GlyphActivation {
    pub activate: Vec<String>,
}

/// Semantic envelope consumed by formatting, questions and presentation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternMeta {
    pub id: String,
    pub label: String,
    pub category: String,
    pub dataset_type: Option<DatasetKind>,
    pub scoring: ScoringMeta,
    pub question_hints: QuestionHints,
    pub ui_context: UiContext,
    pub sigil: SigilHint,
    pub lens: LensMeta,
    pub glyphs: GlyphActivation,
    pub formatting_rule: FormattingRule,
    /// Absent for the fallback pattern.
    pub injection_result: Option<InjectionDetails>,
}

impl PatternMeta {
    pub fn is_fallback(&self) -> bool {
        self.injection_result.is_none()
    }
}

/// The canonical "none" envelope: zero scoring, fallback sigil, nothing activated.
pub fn fallback_meta(tier: &ThresholdTier) -> PatternMeta {
    PatternMeta {
        id: NONE_PATTERN.to_string(),
        label: "No Pattern".to_string(),
        category: "none".to_string(),
        dataset_type: None,
        scoring: ScoringMeta {
            base_points: 0,
            difficulty_multiplier: 1.0,
            tier_multiplier: tier.reward_multiplier,
        },
        question_hints: QuestionHints::default(),
        ui_context: UiContext::default(),
        sigil: SigilHint::fallback(),
        lens: LensMeta {
            kind: "none".to_string(),
            summaries: Vec::new(),
        },
        glyphs: GlyphActivation::default(),
        formatting_rule: FormattingRule::None,
        injection_result: None,
    }
}

fn build_meta(
    definition: &dyn PatternDefinition,
    kind: DatasetKind,
    details: InjectionDetails,
    tier: &ThresholdTier,
) -> PatternMeta {
    let profile = definition.profile();
    PatternMeta {
        id: profile.id.clone(),
        label: profile.label.clone(),
        category: profile.category.clone(),
        dataset_type: Some(kind),
        scoring: ScoringMeta {
            base_points: profile.scoring.base_points,
            difficulty_multiplier: profile.scoring.difficulty_multiplier,
            tier_multiplier: tier.reward_multiplier,
        },
        question_hints: profile.question_hints.clone(),
        ui_context: UiContext {
            glyphs_to_activate: profile.context.glyphs_to_activate.clone(),
            lens_summaries: profile.context.lens_summaries.clone(),
            highlight_column: profile.context.highlight_column,
            lens_type: profile.context.lens_type.clone(),
            target_cells_count: details.target_cells.len(),
        },
        sigil: profile.sigil.clone(),
        lens: LensMeta {
            kind: profile.context.lens_type.clone(),
            summaries: profile.context.lens_summaries.clone(),
        },
        glyphs: GlyphActivation {
            activate: profile.context.glyphs_to_activate.clone(),
        },
        formatting_rule: profile.formatting_rule,
        injection_result: Some(details),
    }
}

/// Output of [`inject_pattern`]. The dataset is handed back, mutated or not.
#[derive(Debug, Clone)]
pub struct InjectionResult {
    pub dataset: Dataset,
    pub target_cells: Vec<CellPosition>,
    pub pattern_type: String,
    /// What the pattern wrote; the same value `meta.injection_result` carries.
    pub params: Option<InjectionDetails>,
    pub meta: PatternMeta,
}

impl InjectionResult {
    fn none(dataset: Dataset, tier: &ThresholdTier) -> Self {
        Self {
            dataset,
            target_cells: Vec::new(),
            pattern_type: NONE_PATTERN.to_string(),
            params: None,
            meta: fallback_meta(tier),
        }
    }
}

/// Resolve `pattern_id` for `dataset_type`, write it into `dataset` and build
/// its metadata.
///
/// Never fails: an unknown dataset type, the explicit `"none"` id, unmet
/// requirements or a target cell that no longer passes its type validator all
/// yield the `"none"` result with the dataset as it was before injection.
pub fn inject_pattern(
    registry: &PatternRegistry,
    mut dataset: Dataset,
    dataset_type: &str,
    pattern_id: &str,
    tier: &ThresholdTier,
    rng: &mut dyn RngCore,
) -> InjectionResult {
    if pattern_id == NONE_PATTERN {
        debug!(dataset_type, "no pattern requested");
        return InjectionResult::none(dataset, tier);
    }

    let Ok(kind) = DatasetKind::from_str(dataset_type) else {
        warn!(dataset_type, pattern = pattern_id, "unregistered dataset type, falling back");
        return InjectionResult::none(dataset, tier);
    };

    let Some(definition) = registry.resolve(kind, pattern_id) else {
        warn!(dataset_type, pattern = pattern_id, "no patterns registered for dataset type, falling back");
        return InjectionResult::none(dataset, tier);
    };

    let requires = &definition.profile().requires;
    let rows_ok = requires.min_rows.map_or(true, |min| dataset.row_count() >= min);
    if requires.dataset_type != kind || dataset.kind() != kind || !rows_ok {
        warn!(
            dataset_type,
            pattern = definition.id(),
            rows = dataset.row_count(),
            "pattern requirements failed, falling back"
        );
        return InjectionResult::none(dataset, tier);
    }

    let snapshot = dataset.grid.clone();
    let details = definition.inject(&mut dataset, rng);

    let targets: Vec<&Cell> = details
        .target_cells
        .iter()
        .filter_map(|pos| dataset.cell(*pos))
        .collect();
    let purity = if targets.len() == details.target_cells.len() {
        validate_cells(targets, kind)
    } else {
        Err(hunter_core::HunterError::Other(
            "pattern reported a target outside the grid".to_string(),
        ))
    };
    if let Err(e) = purity {
        warn!(dataset_type, pattern = definition.id(), error = %e, "injection produced invalid values, discarding");
        dataset.grid = snapshot;
        return InjectionResult::none(dataset, tier);
    }

    let tag = pattern_tag(definition.id());
    for pos in &details.target_cells {
        if let Some(cell) = dataset.cell_mut(*pos) {
            cell.tag(tag.clone());
        }
    }

    debug!(
        dataset_type,
        requested = pattern_id,
        pattern = definition.id(),
        targets = details.target_cells.len(),
        "pattern injected"
    );

    let target_cells = details.target_cells.clone();
    let pattern_type = definition.id().to_string();
    let params = Some(details.clone());
    let meta = build_meta(definition, kind, details, tier);
    InjectionResult {
        dataset,
        target_cells,
        pattern_type,
        params,
        meta,
    }
}

/// Every cell the pattern's predicate accepts, in row-major order. May be a
/// superset of the injected cells. Empty for the fallback pattern.
pub fn apply_highlight_logic(
    registry: &PatternRegistry,
    dataset: &Dataset,
    meta: &PatternMeta,
) -> Vec<Cell> {
    let (Some(kind), Some(details)) = (meta.dataset_type, meta.injection_result.as_ref()) else {
        return Vec::new();
    };
    let Some(definition) = registry.get(kind, &meta.id) else {
        return Vec::new();
    };
    dataset
        .cells()
        .filter(|c| definition.matches(&c.value, details))
        .cloned()
        .collect()
}
