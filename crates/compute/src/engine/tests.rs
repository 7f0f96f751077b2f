use chrono::NaiveDate;
use hunter_core::{Cell, CellValue, Dataset, DatasetKind, DatasetMeta, GenerationRules};
use uuid::Uuid;

use super::*;

fn dataset(kind: DatasetKind, rows: Vec<Vec<CellValue>>) -> Dataset {
    let grid: Vec<Vec<Cell>> = rows
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(|(c, v)| Cell::new(r, c, kind, v))
                .collect()
        })
        .collect();
    Dataset {
        meta: DatasetMeta {
            dataset_type: kind,
            rows: grid.len(),
            cols: grid[0].len(),
            value_type: kind.value_type().to_string(),
            generation_rules: GenerationRules::default(),
            dataset_id: Uuid::nil(),
        },
        grid,
    }
}

fn numbers(rows: &[&[f64]]) -> Dataset {
    dataset(
        DatasetKind::Numbers,
        rows.iter()
            .map(|r| r.iter().map(|v| CellValue::Number(*v)).collect())
            .collect(),
    )
}

fn date(y: i32, m: u32, d: u32) -> CellValue {
    CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn cat(s: &str) -> CellValue {
    CellValue::Category(s.to_string())
}

#[test]
fn injected_spike_is_flagged_as_outlier() {
    let base = numbers(&[&[12.0, 14.0, 13.0], &[11.0, 42.0, 15.0], &[10.0, 13.0, 12.0]]);
    let before = compute_for_dataset(&base);
    let mean = before.stats().unwrap().mean;
    assert!((mean - 15.777).abs() < 0.01);

    // floor(mean * 2.5) + 100 at the centre cell
    let spiked = numbers(&[&[12.0, 14.0, 13.0], &[11.0, 139.0, 15.0], &[10.0, 13.0, 12.0]]);
    let after = compute_for_dataset(&spiked);
    assert!(after.stats().unwrap().mean > mean);
    assert!(after.outliers.indices.contains(&4));
    let stats = after.stats().unwrap();
    assert!(stats.z_score(139.0) >= 2.0);
    assert!(after.glyphs.outlier);
    assert_eq!(after.sigil_support.max_value, Some(139.0));
    assert_eq!(after.sigil_support.min_value, Some(10.0));
}

#[test]
fn outliers_are_idempotent() {
    let ds = numbers(&[&[1.0, 2.0, 3.0], &[4.0, 90.0, 6.0], &[7.0, 8.0, 9.0]]);
    let first = compute_for_dataset(&ds);
    let second = compute_for_dataset(&ds);
    assert_eq!(first.outliers, second.outliers);
    assert_eq!(first, second);
}

#[test]
fn distribution_splits_around_mean() {
    let ds = numbers(&[&[1.0, 2.0, 3.0]]);
    let meta = compute_for_dataset(&ds);
    assert_eq!(meta.distribution.above, vec![2]);
    assert_eq!(meta.distribution.below, vec![0]);
    assert_eq!(meta.sequences, vec![vec![0, 1, 2]]);
    assert!(meta.glyphs.sequence);
    assert_eq!(meta.longest_sequence(), 3);
}

#[test]
fn single_unique_category() {
    let ds = dataset(
        DatasetKind::Categories,
        vec![
            vec![cat("A"), cat("B"), cat("C")],
            vec![cat("A"), cat("Anomaly-417"), cat("B")],
            vec![cat("C"), cat("A"), cat("B")],
        ],
    );
    let meta = compute_for_dataset(&ds);
    assert_eq!(meta.unique.indices, vec![4]);
    assert_eq!(meta.sigil_support.unique_value, Some(cat("Anomaly-417")));
    assert_eq!(meta.category_stats.mode, Some(cat("A")));
    assert_eq!(meta.frequency.repeated.len(), 8);
    // numeric sections stay empty for categories
    assert!(meta.stats().is_none());
    assert!(meta.clusters.is_empty());
    assert!(meta.outliers.indices.is_empty());
}

#[test]
fn weekends_and_date_range() {
    let ds = dataset(
        DatasetKind::Dates,
        vec![
            vec![date(2023, 10, 20), date(2023, 10, 21)],
            vec![date(2023, 10, 22), date(2023, 10, 23)],
        ],
    );
    let meta = compute_for_dataset(&ds);
    assert_eq!(meta.weekends.indices, vec![1, 2]);
    assert_eq!(meta.sigil_support.weekend_indices, vec![1, 2]);
    assert!(meta.glyphs.weekend);
    assert_eq!(meta.date_stats.earliest, NaiveDate::from_ymd_opt(2023, 10, 20));
    assert_eq!(meta.date_stats.latest, NaiveDate::from_ymd_opt(2023, 10, 23));
}

#[test]
fn same_day_dates_group_together() {
    let ds = dataset(
        DatasetKind::Dates,
        vec![vec![date(2024, 1, 6), date(2024, 1, 6), date(2024, 1, 8)]],
    );
    let meta = compute_for_dataset(&ds);
    assert_eq!(meta.frequency.repeated, vec![0, 1]);
    assert_eq!(meta.unique.indices, vec![2]);
}

#[test]
fn mixed_grid_skips_numeric_sections() {
    let mut ds = numbers(&[&[1.0, 2.0], &[3.0, 4.0]]);
    ds.grid[0][1].set_value(cat("X"));
    let meta = compute_for_dataset(&ds);
    assert!(meta.stats().is_none());
    assert!(meta.distribution.above.is_empty());
    assert_eq!(meta.unique.indices, vec![0, 1, 2, 3]);
}

#[test]
fn serializes_camel_case_dates_as_iso() {
    let ds = dataset(DatasetKind::Dates, vec![vec![date(2023, 10, 21)]]);
    let json = serde_json::to_value(compute_for_dataset(&ds)).unwrap();
    assert_eq!(json["dateStats"]["earliest"], "2023-10-21");
    assert_eq!(json["sigilSupport"]["weekendIndices"][0], 0);
    assert!(json["lens"]["stats"].is_null());
}
