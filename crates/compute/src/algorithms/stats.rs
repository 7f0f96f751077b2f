//! Population-level statistics over a numeric grid.
//!
//! Mean and standard deviation use the population form (divide by `n`),
//! which is what the outlier z-score is tuned against.

use serde::Serialize;

/// A value is an outlier when `|z| >= OUTLIER_Z_THRESHOLD`.
pub const OUTLIER_Z_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl PopulationStats {
    /// z-score of `v`; a zero std is treated as 1 so flat grids never divide by zero.
    pub fn z_score(&self, v: f64) -> f64 {
        let std = if self.std == 0.0 { 1.0 } else { self.std };
        (v - self.mean) / std
    }
}

/// Compute min/max/mean/std for a set of values. `None` when empty.
pub fn compute_population_stats(values: &[f64]) -> Option<PopulationStats> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(PopulationStats {
        min,
        max,
        mean,
        std: variance.sqrt(),
        count: values.len(),
    })
}

/// Indices strictly above and strictly below the mean.
pub fn split_by_mean(values: &[f64], mean: f64) -> (Vec<usize>, Vec<usize>) {
    let mut above = Vec::new();
    let mut below = Vec::new();
    for (idx, &v) in values.iter().enumerate() {
        if v > mean {
            above.push(idx);
        } else if v < mean {
            below.push(idx);
        }
    }
    (above, below)
}

pub fn outlier_indices(values: &[f64], stats: &PopulationStats) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, &v)| stats.z_score(v).abs() >= OUTLIER_Z_THRESHOLD)
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_stats_basic() {
        let stats = compute_population_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-10);
        assert!((stats.std - 2.0).abs() < 1e-10);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.count, 8);
    }

    #[test]
    fn population_stats_empty() {
        assert!(compute_population_stats(&[]).is_none());
    }

    #[test]
    fn flat_values_have_no_outliers() {
        let values = [7.0; 9];
        let stats = compute_population_stats(&values).unwrap();
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.z_score(7.0), 0.0);
        assert!(outlier_indices(&values, &stats).is_empty());
    }

    #[test]
    fn split_skips_values_equal_to_mean() {
        let (above, below) = split_by_mean(&[1.0, 2.0, 3.0], 2.0);
        assert_eq!(above, vec![2]);
        assert_eq!(below, vec![0]);
    }

    #[test]
    fn spike_is_an_outlier() {
        let values = [12.0, 14.0, 13.0, 11.0, 139.0, 15.0, 10.0, 13.0, 12.0];
        let stats = compute_population_stats(&values).unwrap();
        assert_eq!(outlier_indices(&values, &stats), vec![4]);
    }
}
