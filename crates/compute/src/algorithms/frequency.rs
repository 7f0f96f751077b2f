//! Value grouping for frequency, uniqueness and mode.

use hunter_core::{CellValue, ValueKey};
use indexmap::IndexMap;
use serde::Serialize;

/// Occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: CellValue,
    pub count: usize,
    #[serde(skip)]
    pub indices: Vec<usize>,
}

/// Group flat cell values by content, preserving first-seen order.
pub fn group_values<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Vec<ValueCount> {
    let mut groups: IndexMap<ValueKey, ValueCount> = IndexMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        groups
            .entry(value.group_key())
            .and_modify(|g| {
                g.count += 1;
                g.indices.push(idx);
            })
            .or_insert_with(|| ValueCount {
                value: value.clone(),
                count: 1,
                indices: vec![idx],
            });
    }
    groups.into_values().collect()
}

/// Every member index of every group larger than one, group by group.
pub fn repeated_indices(groups: &[ValueCount]) -> Vec<usize> {
    groups
        .iter()
        .filter(|g| g.count > 1)
        .flat_map(|g| g.indices.iter().copied())
        .collect()
}

/// Index of every value that occurs exactly once, in grid order.
pub fn unique_indices(groups: &[ValueCount]) -> Vec<usize> {
    groups
        .iter()
        .filter(|g| g.count == 1)
        .map(|g| g.indices[0])
        .collect()
}

/// Most frequent value; ties go to the value seen first.
pub fn mode(groups: &[ValueCount]) -> Option<&CellValue> {
    let mut best: Option<&ValueCount> = None;
    for g in groups {
        if best.map_or(true, |b| g.count > b.count) {
            best = Some(g);
        }
    }
    best.map(|g| &g.value)
}
