use std::sync::Arc;

use hunter_core::DatasetKind;
use hunter_rules::validation::fuzzy::fuzzy_match;
use indexmap::IndexMap;
use tracing::debug;

use super::definitions::{FrequencyPattern, OutlierPattern, RangePattern, UniquePattern, WeekendPattern};
use super::PatternDefinition;

/// Pattern definitions grouped by the dataset kind they require, in
/// registration order. Read-only once handed to an engine context.
#[derive(Clone, Default)]
pub struct PatternRegistry {
    groups: IndexMap<DatasetKind, Vec<Arc<dyn PatternDefinition>>>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in patterns: frequency and unique for categories, outlier
    /// and range for numbers, weekend for dates. Times have none.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(FrequencyPattern::new()));
        registry.register(Arc::new(UniquePattern::new()));
        registry.register(Arc::new(OutlierPattern::new()));
        registry.register(Arc::new(RangePattern::new()));
        registry.register(Arc::new(WeekendPattern::new()));
        registry
    }

    /// Register under the definition's required dataset kind, replacing any
    /// definition with the same id.
    pub fn register(&mut self, definition: Arc<dyn PatternDefinition>) {
        let kind = definition.profile().requires.dataset_type;
        let id = definition.id().to_string();
        let group = self.groups.entry(kind).or_default();
        match group.iter().position(|d| d.id() == id) {
            Some(idx) => group[idx] = definition,
            None => group.push(definition),
        }
        debug!(pattern = %id, dataset_type = %kind, "pattern registered");
    }

    pub fn get(&self, kind: DatasetKind, id: &str) -> Option<&dyn PatternDefinition> {
        self.groups
            .get(&kind)?
            .iter()
            .find(|d| d.id() == id)
            .map(|d| d.as_ref())
    }

    /// Exact id, else the closest registered id by edit distance, else the
    /// first pattern of the group. `None` when the kind has no patterns.
    pub fn resolve(&self, kind: DatasetKind, id: &str) -> Option<&dyn PatternDefinition> {
        if let Some(found) = self.get(kind, id) {
            return Some(found);
        }
        let group = self.groups.get(&kind)?;
        let ids: Vec<&str> = group.iter().map(|d| d.id()).collect();
        let resolved = fuzzy_match(id, &ids)
            .and_then(|name| self.get(kind, name))
            .or_else(|| group.first().map(|d| d.as_ref()));
        if let Some(def) = resolved {
            debug!(requested = id, resolved = def.id(), dataset_type = %kind, "pattern id resolved loosely");
        }
        resolved
    }

    pub fn ids_for(&self, kind: DatasetKind) -> Vec<&str> {
        self.groups
            .get(&kind)
            .map(|g| g.iter().map(|d| d.id()).collect())
            .unwrap_or_default()
    }

    pub fn has_patterns(&self, kind: DatasetKind) -> bool {
        self.groups.get(&kind).is_some_and(|g| !g.is_empty())
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PatternRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, group) in &self.groups {
            map.entry(kind, &group.iter().map(|d| d.id()).collect::<Vec<_>>());
        }
        map.finish()
    }
}
