//! Built-in pattern definitions.

mod frequency;
mod outlier;
mod range;
mod unique;
mod weekend;

pub use frequency::FrequencyPattern;
pub use outlier::OutlierPattern;
pub use range::RangePattern;
pub use unique::UniquePattern;
pub use weekend::WeekendPattern;

use hunter_core::{CellPosition, Dataset};
use rand::RngCore;

/// Up to `count` distinct cells, uniformly sampled.
pub(crate) fn pick_random_cells(
    dataset: &Dataset,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<CellPosition> {
    let len = dataset.len();
    rand::seq::index::sample(rng, len, count.min(len))
        .into_iter()
        .filter_map(|idx| dataset.position_of(idx))
        .collect()
}

pub(crate) fn numeric_values(dataset: &Dataset) -> Vec<f64> {
    dataset.cells().filter_map(|c| c.value.as_number()).collect()
}
