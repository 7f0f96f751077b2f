//! DatasetRules rule kind: per-dataset-type generation parameters.

use hunter_core::{DatasetKind, GenerationRules};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::CommonMetadata;

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level DatasetRules rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetRulesRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: DatasetRules,
}

/// Generation rules keyed by dataset type name.
///
/// Keys are kept as strings so validation can report unknown types with a
/// suggestion instead of failing the whole parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRules {
    pub dataset_types: IndexMap<String, DatasetTypeRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DatasetTypeRule {
    #[serde(default)]
    pub generation: GenerationRules,
}

impl DatasetRules {
    /// Parse the bare, envelope-less JSON form (`{"datasetTypes": {...}}`).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn get(&self, dataset_type: &str) -> Option<&DatasetTypeRule> {
        self.dataset_types.get(dataset_type)
    }

    pub fn generation_for(&self, kind: DatasetKind) -> Option<&GenerationRules> {
        self.get(kind.as_str()).map(|r| &r.generation)
    }

    /// Configured dataset type names in declaration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.dataset_types.keys().map(|k| k.as_str()).collect()
    }

    pub fn with_type(mut self, kind: DatasetKind, generation: GenerationRules) -> Self {
        self.dataset_types
            .insert(kind.as_str().to_string(), DatasetTypeRule { generation });
        self
    }
}

impl DatasetRulesRule {
    pub fn compile(&self) -> DatasetRules {
        self.spec.clone()
    }
}
