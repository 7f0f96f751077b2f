//! Synthesizes typed grids from the dataset rule table.

use chrono::{Duration, NaiveDate};
use hunter_core::{
    format_clock, validate_dataset, Cell, CellValue, Dataset, DatasetKind, DatasetMeta,
    GenerationRules, HunterError, Result, ThresholdTier,
};
use hunter_rules::{DatasetRules, DatasetSize};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

/// Builds raw grids for one set of dataset rules. `today` anchors the date window.
pub struct DatasetGenerator<'a> {
    rules: &'a DatasetRules,
    today: NaiveDate,
}

impl<'a> DatasetGenerator<'a> {
    pub fn new(rules: &'a DatasetRules, today: NaiveDate) -> Self {
        Self { rules, today }
    }

    /// Generate a `rows × cols` grid of `kind` values and run the full
    /// integrity pass over it before returning.
    pub fn generate(
        &self,
        kind: DatasetKind,
        size: DatasetSize,
        tier: &ThresholdTier,
        rng: &mut dyn RngCore,
    ) -> Result<Dataset> {
        if size.rows == 0 || size.cols == 0 {
            return Err(HunterError::InvalidConfig(format!(
                "dataset size must be at least 1x1, got {}x{}",
                size.rows, size.cols
            )));
        }
        let generation = self.rules.generation_for(kind).cloned().ok_or_else(|| {
            HunterError::InvalidConfig(format!("no generation rules for dataset type '{}'", kind))
        })?;

        let sampler = ValueSampler::new(kind, &generation, tier, self.today)?;
        let mut grid = Vec::with_capacity(size.rows);
        for r in 0..size.rows {
            let mut row = Vec::with_capacity(size.cols);
            for c in 0..size.cols {
                let value = sampler.sample(rng)?;
                row.push(Cell::new(r, c, kind, value));
            }
            grid.push(row);
        }

        let dataset_id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let dataset = Dataset {
            grid,
            meta: DatasetMeta {
                dataset_type: kind,
                rows: size.rows,
                cols: size.cols,
                value_type: kind.value_type().to_string(),
                generation_rules: generation,
                dataset_id,
            },
        };

        validate_dataset(&dataset)?;
        debug!(dataset_type = %kind, rows = size.rows, cols = size.cols, id = %dataset_id, "dataset generated");
        Ok(dataset)
    }
}

/// Per-kind bounds resolved once, then sampled per cell.
enum ValueSampler {
    Numbers { min: i64, max: i64, jitter: i64 },
    Dates { today: NaiveDate, before: i64, after: i64 },
    Categories { pool: Vec<String> },
    Times { start: u32, end: u32 },
}

impl ValueSampler {
    fn new(
        kind: DatasetKind,
        generation: &GenerationRules,
        tier: &ThresholdTier,
        today: NaiveDate,
    ) -> Result<Self> {
        Ok(match kind {
            DatasetKind::Numbers => {
                let (min, max) = generation.numeric_range()?;
                let jitter = tier
                    .value_jitter
                    .filter(|j| j.is_finite() && *j >= 1.0)
                    .map(|j| j.floor() as i64)
                    .unwrap_or(0);
                ValueSampler::Numbers { min, max, jitter }
            }
            DatasetKind::Dates => {
                let (before, after) = generation.day_window()?;
                ValueSampler::Dates { today, before, after }
            }
            DatasetKind::Categories => {
                let pool = generation.category_pool();
                if pool.is_empty() {
                    return Err(HunterError::InvalidConfig(
                        "category pool is empty".to_string(),
                    ));
                }
                ValueSampler::Categories { pool }
            }
            DatasetKind::Times => {
                let (start, end) = generation.time_window()?;
                ValueSampler::Times { start, end }
            }
        })
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<CellValue> {
        match self {
            ValueSampler::Numbers { min, max, jitter } => {
                let mut n = rng.gen_range(*min..=*max);
                if *jitter > 0 {
                    n += rng.gen_range(-*jitter..=*jitter);
                }
                Ok(CellValue::Number(n as f64))
            }
            ValueSampler::Dates { today, before, after } => {
                let offset = rng.gen_range(-*before..=*after);
                Duration::try_days(offset)
                    .and_then(|delta| today.checked_add_signed(delta))
                    .map(CellValue::Date)
                    .ok_or_else(|| {
                        HunterError::InvalidConfig(format!("date offset {} days out of range", offset))
                    })
            }
            ValueSampler::Categories { pool } => pool
                .choose(rng)
                .map(|c| CellValue::Category(c.clone()))
                .ok_or_else(|| HunterError::InvalidConfig("category pool is empty".to_string())),
            ValueSampler::Times { start, end } => {
                Ok(CellValue::Time(format_clock(rng.gen_range(*start..=*end))))
            }
        }
    }
}
