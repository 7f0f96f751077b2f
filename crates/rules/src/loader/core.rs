//! Core [`RuleLoader`] struct: filesystem-backed rule loading.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::dataset_rules::DatasetRulesRule;
use crate::level_progression::LevelProgressionRule;
use crate::schema::{CommonMetadata, RuleDocument, RuleEnvelope, RuleKind};

use super::error::{LoadResult, LoadStatus, Result, RuleError};
use super::rule_set::RuleSet;

/// Filesystem-backed rule loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` / `*.json` files,
/// deserializes them into [`RuleDocument`] instances via two-pass
/// deserialization, and keeps them keyed by rule ID in load order.
pub struct RuleLoader {
    /// Root directory containing rule files.
    rules_dir: PathBuf,
    /// All loaded documents keyed by `metadata.id`.
    documents: IndexMap<String, RuleDocument>,
}

impl RuleLoader {
    pub fn new(rules_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.into(),
            documents: IndexMap::new(),
        }
    }

    /// Recursively scan the rules directory and load every rule file.
    ///
    /// Dotfiles and unsupported extensions are skipped. Entries are visited
    /// in path order. Parse errors are reported per-file but do not abort the scan.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        let root = self.rules_dir.clone();
        self.scan_dir_recursive(&root, &mut results)?;
        Ok(results)
    }

    fn scan_dir_recursive(&mut self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "failed to read directory");
                return Ok(());
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        paths.sort();

        for path in paths {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            if !is_rule_file(&path) {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML or JSON file".to_string(),
                    },
                });
                continue;
            }

            match self.load_file(&path) {
                Ok(doc) => {
                    let rule_id = doc.metadata().id.clone();
                    info!(rule_id = %rule_id, kind = %doc.kind(), path = %path.display(), "loaded rule");
                    if self.documents.insert(rule_id.clone(), doc).is_some() {
                        warn!(rule_id = %rule_id, path = %path.display(), "duplicate rule id, replacing earlier document");
                    }
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Loaded { rule_id },
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load rule file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a single rule file into a [`RuleDocument`].
    ///
    /// YAML files must carry the `apiVersion/kind/metadata` envelope. JSON
    /// files may carry it too, or be a bare table whose kind is inferred
    /// from its shape.
    pub fn load_file(&self, path: &Path) -> Result<RuleDocument> {
        let contents = fs::read_to_string(path)?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

        if is_json {
            let value: serde_json::Value = serde_json::from_str(&contents)?;
            if value.get("apiVersion").is_none() {
                return parse_bare_json(path, value);
            }
            let envelope: RuleEnvelope = serde_json::from_value(value)?;
            return finish_envelope(envelope);
        }

        // First pass: extract envelope (kind + metadata).
        let envelope: RuleEnvelope = serde_yaml::from_str(&contents)?;
        finish_envelope(envelope)
    }

    pub fn rules_dir(&self) -> &Path {
        &self.rules_dir
    }

    pub fn documents(&self) -> &IndexMap<String, RuleDocument> {
        &self.documents
    }

    /// Assemble the rule tables from the loaded, enabled documents.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::from_documents(self.documents.values())
    }
}

fn is_rule_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "yml" || e == "yaml" || e == "json")
        .unwrap_or(false)
}

fn finish_envelope(envelope: RuleEnvelope) -> Result<RuleDocument> {
    if envelope.metadata.id.is_empty() {
        return Err(RuleError::Validation(
            "rule metadata.id must not be empty".to_string(),
        ));
    }

    // Second pass: deserialize into kind-specific type.
    envelope.parse_full().map_err(|e| {
        RuleError::Validation(format!("failed to parse rule '{}': {}", envelope.metadata.id, e))
    })
}

/// Envelope-less JSON: an array or `{levels}` object is a level progression,
/// a `{datasetTypes}` object is dataset rules.
fn parse_bare_json(path: &Path, value: serde_json::Value) -> Result<RuleDocument> {
    let kind = if value.is_array() || value.get("levels").is_some() {
        RuleKind::LevelProgression
    } else if value.get("datasetTypes").is_some() {
        RuleKind::DatasetRules
    } else {
        return Err(RuleError::Validation(format!(
            "cannot infer rule kind for '{}': expected datasetTypes or levels",
            path.display()
        )));
    };

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("rules");
    let metadata = CommonMetadata::synthesized(to_kebab_case(stem));

    let doc = match kind {
        RuleKind::DatasetRules => RuleDocument::DatasetRules(DatasetRulesRule {
            api_version: "v1".to_string(),
            kind: kind.to_string(),
            metadata,
            spec: serde_json::from_value(value)?,
        }),
        RuleKind::LevelProgression => RuleDocument::LevelProgression(LevelProgressionRule {
            api_version: "v1".to_string(),
            kind: kind.to_string(),
            metadata,
            spec: serde_json::from_value(value)?,
        }),
    };
    Ok(doc)
}

/// `levelProgression` / `dataset_rules` -> `level-progression` / `dataset-rules`.
fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for ch in s.chars() {
        if ch.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == ' ' || ch == '.' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod kebab_tests {
    use super::to_kebab_case;

    #[test]
    fn converts_camel_and_snake() {
        assert_eq!(to_kebab_case("levelProgression"), "level-progression");
        assert_eq!(to_kebab_case("dataset_rules"), "dataset-rules");
        assert_eq!(to_kebab_case("plain"), "plain");
    }
}
