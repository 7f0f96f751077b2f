use hunter_core::{Cell, CellValue, Dataset, DatasetKind, ThresholdTier};
use hunter_compute::algorithms::stats::compute_population_stats;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, warn};

use super::registry::{QuestionDefinition, QuestionRegistry};
use super::Answer;
use crate::patterns::PatternMeta;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueryStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Everything a question may read when computing its answer.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub dataset_type: DatasetKind,
    pub pattern_type: String,
    pub highlighted_cells: Vec<Cell>,
    pub highlighted_values: Vec<CellValue>,
    /// Numeric grids only.
    pub stats: Option<QueryStats>,
    pub has_highlights: bool,
}

impl QueryContext {
    pub fn new(dataset: &Dataset, pattern_type: &str, highlighted: &[Cell]) -> Self {
        let stats = if dataset.kind() == DatasetKind::Numbers {
            let nums: Vec<f64> = dataset.cells().filter_map(|c| c.value.as_number()).collect();
            compute_population_stats(&nums).map(|s| QueryStats {
                min: s.min,
                max: s.max,
                mean: s.mean,
            })
        } else {
            None
        };
        Self {
            dataset_type: dataset.kind(),
            pattern_type: pattern_type.to_string(),
            highlighted_cells: highlighted.to_vec(),
            highlighted_values: highlighted.iter().map(|c| c.value.clone()).collect(),
            stats,
            has_highlights: !highlighted.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub answer: Answer,
    #[serde(rename = "type")]
    pub kind: String,
    pub sigil_type: String,
    pub sigil_icon: String,
    pub sigil_hint: String,
    pub lens_type: String,
    pub glyphs: Vec<String>,
}

impl Question {
    pub fn is_fallback(&self) -> bool {
        self.kind == "fallback"
    }
}

/// "Analyze the grid." with answer `-`, dressed with the pattern's sigil.
pub fn fallback_question(meta: &PatternMeta) -> Question {
    Question {
        text: "Analyze the grid.".to_string(),
        answer: Answer::text("-"),
        kind: "fallback".to_string(),
        sigil_type: meta.sigil.kind.clone(),
        sigil_icon: meta.sigil.icon.clone(),
        sigil_hint: meta.sigil.hint.clone(),
        lens_type: meta.lens.kind.clone(),
        glyphs: meta.glyphs.activate.clone(),
    }
}

/// Narrow the registry to the final pool for `ctx`.
///
/// Candidates must satisfy their requirements. The pattern's preferred
/// questions win if any are candidates; otherwise questions naming the
/// pattern; otherwise every candidate. Avoided questions are then removed.
pub fn candidate_pool<'a>(
    registry: &'a QuestionRegistry,
    ctx: &QueryContext,
    meta: &PatternMeta,
) -> Vec<&'a QuestionDefinition> {
    let candidates: Vec<&QuestionDefinition> = registry
        .questions()
        .iter()
        .filter(|q| q.requires.admits(ctx))
        .collect();

    let preferred = &meta.question_hints.preferred_question_types;
    let preferred_pool: Vec<&QuestionDefinition> = candidates
        .iter()
        .copied()
        .filter(|q| preferred.contains(&q.id))
        .collect();

    let pool = if !preferred_pool.is_empty() {
        preferred_pool
    } else {
        let primary: Vec<&QuestionDefinition> = candidates
            .iter()
            .copied()
            .filter(|q| q.requires.names_pattern(&ctx.pattern_type))
            .collect();
        if primary.is_empty() {
            candidates
        } else {
            primary
        }
    };

    let avoid = &meta.question_hints.avoid_question_types;
    pool.into_iter().filter(|q| !avoid.contains(&q.id)).collect()
}

/// Pick and phrase a question for an injected pattern. `highlighted` is the
/// set of cells the answer is derived from.
pub fn select_question(
    registry: &QuestionRegistry,
    dataset: &Dataset,
    highlighted: &[Cell],
    tier: &ThresholdTier,
    meta: &PatternMeta,
    rng: &mut dyn RngCore,
) -> Question {
    let ctx = QueryContext::new(dataset, &meta.id, highlighted);
    let pool = candidate_pool(registry, &ctx, meta);

    let Some(chosen) = pool.choose(rng).copied() else {
        debug!(pattern = %meta.id, dataset_type = %ctx.dataset_type, "no candidate question, using fallback");
        return fallback_question(meta);
    };

    let Some(text) = chosen.templates.resolve(tier.name) else {
        warn!(question = %chosen.id, "question has no templates, using fallback");
        return fallback_question(meta);
    };

    let answer = match (chosen.compute)(&ctx) {
        Ok(answer) => answer,
        Err(e) => {
            warn!(question = %chosen.id, error = %e, "question computation failed");
            Answer::text("Error")
        }
    };

    debug!(question = %chosen.id, pool = pool.len(), tier = %tier.name, "question selected");

    Question {
        text: text.to_string(),
        answer,
        kind: chosen.id.clone(),
        sigil_type: meta.sigil.kind.clone(),
        sigil_icon: meta.sigil.icon.clone(),
        sigil_hint: meta.sigil.hint.clone(),
        lens_type: meta.lens.kind.clone(),
        glyphs: meta.glyphs.activate.clone(),
    }
}
