//! Challenge orchestration: level resolution, generation, injection,
//! analytics, formatting and question selection in one pass.

mod context;

pub use context::{EngineContext, EngineContextBuilder};

use std::str::FromStr;

use hunter_compute::{compute_for_dataset, AnalyticsMetadata};
use hunter_core::{
    validate_dataset, Cell, Dataset, DatasetKind, DatasetMeta, HunterError, Result, ThresholdTier,
};
use hunter_rules::validation::fuzzy::fuzzy_match;
use hunter_rules::LevelRule;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::formatting::{resolve_formatting, FormattingResult};
use crate::generator::DatasetGenerator;
use crate::patterns::{apply_highlight_logic, fallback_meta, inject_pattern, PatternMeta, NONE_PATTERN};
use crate::presentation::Insights;
use crate::questions::{select_question, Question};

/// Pattern key meaning "any pattern registered for the dataset type".
const RANDOM_KEY: &str = "random";

/// A fully assembled challenge, ready to serialize for a client.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub level: u32,
    pub dataset_type: DatasetKind,
    pub pattern_type: String,
    pub grid: Vec<Vec<Cell>>,
    pub formatting: FormattingResult,
    pub question: Question,
    pub threshold_config: ThresholdTier,
    pub config: LevelRule,
    pub pattern_meta: PatternMeta,
    pub analytics: AnalyticsMetadata,
    pub dataset_meta: DatasetMeta,
    pub insights: Insights,
}

impl Challenge {
    /// The grid and its metadata as a dataset again.
    pub fn dataset(&self) -> Dataset {
        Dataset {
            grid: self.grid.clone(),
            meta: self.dataset_meta.clone(),
        }
    }
}

impl EngineContext {
    /// Build the challenge for `level` at `tier`.
    ///
    /// Only configuration problems are errors. Data-integrity failures degrade
    /// to the "none" pattern and a fallback question.
    pub fn generate_level(
        &self,
        level: u32,
        tier: &ThresholdTier,
        rng: &mut dyn RngCore,
    ) -> Result<Challenge> {
        let config = self
            .progression
            .resolve(level)
            .ok_or(HunterError::UnknownLevel(level))?;

        let type_name = config
            .dataset_types
            .names()
            .choose(rng)
            .copied()
            .ok_or_else(|| HunterError::InvalidConfig(format!("level {} lists no dataset types", level)))?;
        let kind = DatasetKind::from_str(type_name).map_err(|_| HunterError::UnknownDatasetType {
            name: type_name.to_string(),
            suggestion: fuzzy_match(type_name, &DatasetKind::names()).map(str::to_string),
        })?;

        let requested = requested_pattern_key(config, rng);
        let pattern_id = self.resolve_pattern_id(kind, &requested, rng);
        debug!(level, dataset_type = %kind, requested = %requested, pattern = %pattern_id, "level resolved");

        let generator = DatasetGenerator::new(&self.dataset_rules, self.today());
        let dataset = generator.generate(kind, config.dataset_size, tier, rng)?;

        let (dataset, meta) = self.inject_with_gates(dataset, &pattern_id, tier, rng);

        let analytics = compute_for_dataset(&dataset);
        let matches = apply_highlight_logic(&self.patterns, &dataset, &meta);
        let formatting = resolve_formatting(&self.patterns, &dataset, &meta, tier);
        let question = select_question(&self.questions, &dataset, &matches, tier, &meta, rng);
        let insights = Insights::from_analytics(&analytics, kind);

        info!(
            level,
            tier = %tier.name,
            dataset_type = %kind,
            pattern = %meta.id,
            question = %question.kind,
            highlighted = formatting.highlighted_cells.len(),
            "challenge generated"
        );

        Ok(Challenge {
            level,
            dataset_type: kind,
            pattern_type: meta.id.clone(),
            grid: dataset.grid,
            formatting,
            question,
            threshold_config: tier.clone(),
            config: config.clone(),
            pattern_meta: meta,
            analytics,
            dataset_meta: dataset.meta,
            insights,
        })
    }

    /// [`generate_level`](Self::generate_level) with a seeded `StdRng`.
    pub fn generate_level_seeded(&self, level: u32, tier: &ThresholdTier, seed: u64) -> Result<Challenge> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_level(level, tier, &mut rng)
    }

    /// Map a requested key to a pattern id for `kind`.
    ///
    /// `"random"` draws from the registered patterns. With a pattern registry
    /// configured the key is looked up there and must name a registered
    /// pattern; anything else becomes `"none"`. Without one the key passes
    /// through for the injector to resolve.
    fn resolve_pattern_id(&self, kind: DatasetKind, key: &str, rng: &mut dyn RngCore) -> String {
        if key == NONE_PATTERN {
            return NONE_PATTERN.to_string();
        }
        if key == RANDOM_KEY {
            return self
                .patterns
                .ids_for(kind)
                .choose(rng)
                .map(|id| id.to_string())
                .unwrap_or_else(|| NONE_PATTERN.to_string());
        }
        if !self.progression.has_registry() {
            return key.to_string();
        }
        match self.progression.registry_for(kind.as_str()).and_then(|m| m.get(key)) {
            Some(id) if id == NONE_PATTERN => NONE_PATTERN.to_string(),
            Some(id) if self.patterns.get(kind, id).is_some() => id.clone(),
            Some(id) => {
                warn!(dataset_type = %kind, key, pattern = %id, "registry maps to an unregistered pattern");
                NONE_PATTERN.to_string()
            }
            None => {
                warn!(dataset_type = %kind, key, "key not in pattern registry");
                NONE_PATTERN.to_string()
            }
        }
    }

    /// Run the injector between two whole-grid integrity checks. Either check
    /// failing leaves the generated grid untouched under the fallback meta.
    fn inject_with_gates(
        &self,
        dataset: Dataset,
        pattern_id: &str,
        tier: &ThresholdTier,
        rng: &mut dyn RngCore,
    ) -> (Dataset, PatternMeta) {
        if let Err(e) = validate_dataset(&dataset) {
            warn!(dataset_type = %dataset.kind(), error = %e, "generated grid failed integrity check, skipping injection");
            return (dataset, fallback_meta(tier));
        }

        let snapshot = dataset.clone();
        let kind = dataset.kind();
        let result = inject_pattern(&self.patterns, dataset, kind.as_str(), pattern_id, tier, rng);

        if let Err(e) = validate_dataset(&result.dataset) {
            warn!(dataset_type = %kind, pattern = %result.pattern_type, error = %e, "injected grid failed integrity check, discarding");
            return (snapshot, fallback_meta(tier));
        }
        (result.dataset, result.meta)
    }
}

/// The pattern key a level asks for: `"random"` for `ALL`/`random`, one of
/// the listed ids, or `"none"` when nothing is listed.
fn requested_pattern_key(config: &LevelRule, rng: &mut dyn RngCore) -> String {
    match &config.pattern_types {
        Some(types) if types.is_random() => RANDOM_KEY.to_string(),
        Some(types) => types
            .listed()
            .choose(rng)
            .map(|id| id.to_string())
            .unwrap_or_else(|| NONE_PATTERN.to_string()),
        None => NONE_PATTERN.to_string(),
    }
}

#[cfg(test)]
mod tests;
