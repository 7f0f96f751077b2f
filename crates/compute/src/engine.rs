use chrono::{Datelike, NaiveDate, Weekday};
use hunter_core::{Cell, CellValue, Dataset, DatasetKind, DatasetMeta};
use tracing::{debug, warn};

use crate::algorithms::clusters::{adjacency_clusters, CLUSTER_DELTA};
use crate::algorithms::frequency::{group_values, mode, repeated_indices, unique_indices};
use crate::algorithms::sequences::{increasing_runs, MIN_SEQUENCE_LEN};
use crate::algorithms::stats::{compute_population_stats, outlier_indices, split_by_mean};
use crate::analytics::*;

/// Compute analytics for a whole dataset.
pub fn compute_for_dataset(dataset: &Dataset) -> AnalyticsMetadata {
    compute_metadata(&dataset.grid, &dataset.meta)
}

/// Derive the full analytics record from cell values alone.
///
/// Which sections are filled depends on `meta.dataset_type`: numeric
/// sections for number grids, weekend and date stats for date grids,
/// frequency and uniqueness for every grid. A grid whose cells do not all
/// match the declared type is logged and its numeric sections are left empty.
pub fn compute_metadata(grid: &[Vec<Cell>], meta: &DatasetMeta) -> AnalyticsMetadata {
    let kind = meta.dataset_type;
    let flat: Vec<&CellValue> = grid.iter().flatten().map(|c| &c.value).collect();
    let mut out = AnalyticsMetadata::default();

    let mixed = flat.iter().filter(|v| v.kind() != kind).count();
    if mixed > 0 {
        warn!(dataset_type = %kind, mismatched = mixed, cells = flat.len(), "grid mixes value types");
    }

    // ── Numeric ──────────────────────────────────────────────
    if kind == DatasetKind::Numbers && mixed == 0 {
        let nums: Vec<f64> = flat.iter().filter_map(|v| v.as_number()).collect();
        if let Some(stats) = compute_population_stats(&nums) {
            let (above, below) = split_by_mean(&nums, stats.mean);
            out.distribution = Distribution { above, below };
            out.outliers.indices = outlier_indices(&nums, &stats);
            out.sigil_support.max_value = Some(stats.max);
            out.sigil_support.min_value = Some(stats.min);
            out.lens.stats = Some(stats);
        }

        let rows = grid.len();
        let cols = grid.first().map(|r| r.len()).unwrap_or(0);
        if grid.iter().all(|r| r.len() == cols) {
            out.clusters = adjacency_clusters(&nums, rows, cols, CLUSTER_DELTA);
        } else {
            warn!(dataset_type = %kind, "ragged grid, skipping cluster search");
        }
        out.sequences = increasing_runs(&nums, MIN_SEQUENCE_LEN);
    }

    // ── Frequency & unique (all types) ───────────────────────
    let groups = group_values(flat.iter().copied());
    out.frequency.repeated = repeated_indices(&groups);
    out.unique.indices = unique_indices(&groups);
    out.sigil_support.unique_value = out.unique.indices.first().map(|&i| flat[i].clone());
    out.sigil_support.frequency_values = groups
        .iter()
        .filter(|g| g.count > 1)
        .map(|g| g.value.clone())
        .collect();
    out.category_stats.mode = mode(&groups).cloned();

    // ── Dates ────────────────────────────────────────────────
    if kind == DatasetKind::Dates {
        let mut earliest: Option<NaiveDate> = None;
        let mut latest: Option<NaiveDate> = None;
        for (idx, v) in flat.iter().enumerate() {
            let Some(d) = v.as_date() else { continue };
            if matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
                out.weekends.indices.push(idx);
            }
            earliest = Some(earliest.map_or(d, |e| e.min(d)));
            latest = Some(latest.map_or(d, |l| l.max(d)));
        }
        out.date_stats = DateStats { earliest, latest };
        out.sigil_support.weekend_indices = out.weekends.indices.clone();
    }

    out.glyphs = GlyphFlags {
        outlier: !out.outliers.indices.is_empty(),
        frequency: !out.frequency.repeated.is_empty(),
        unique: !out.unique.indices.is_empty(),
        weekend: !out.weekends.indices.is_empty(),
        sequence: !out.sequences.is_empty(),
    };

    out.lens.frequency = groups;
    out.lens.unique = out.unique.indices.clone();
    out.lens.weekend = out.weekends.indices.clone();
    out.lens.sequence = out.sequences.clone();

    debug!(
        dataset_type = %kind,
        cells = flat.len(),
        outliers = out.outliers.indices.len(),
        clusters = out.clusters.len(),
        sequences = out.sequences.len(),
        "analytics computed"
    );

    out
}

#[cfg(test)]
mod tests;
