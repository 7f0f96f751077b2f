//! Validation for LevelProgression documents.

use std::collections::HashMap;

use hunter_core::DatasetKind;

use super::common_checks::validate_common_metadata;
use super::fuzzy::fuzzy_match;
use super::{unknown_dataset_type, ValidationResult};
use crate::level_progression::{LevelProgressionRule, LevelRange, LevelRule, PatternRegistryMap, PatternTypes};

pub fn validate_level_progression(rule: &LevelProgressionRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "LevelProgression",
        &rule.metadata.id,
        result,
    );

    let spec = &rule.spec;
    if spec.levels.is_empty() {
        result.error("spec.levels", "level progression must define at least one level rule");
    }

    // level number -> index of the first rule that claims it
    let mut claimed: HashMap<u32, usize> = HashMap::new();

    for (i, level_rule) in spec.levels.iter().enumerate() {
        let base = format!("spec.levels[{i}]");

        match &level_rule.levels {
            LevelRange::List(levels) => {
                if levels.is_empty() {
                    result.error(format!("{base}.levels"), "level list must not be empty");
                }
                for level in levels {
                    if let Some(first) = claimed.insert(*level, i) {
                        result.warn(
                            format!("{base}.levels"),
                            format!("level {level} is already claimed by spec.levels[{first}]; the first match wins"),
                        );
                    }
                }
            }
            LevelRange::OpenEnded(raw) => {
                if level_rule.levels.open_start().is_none() {
                    result.error(
                        format!("{base}.levels"),
                        format!("open-ended range must look like 'N+', got '{raw}'"),
                    );
                }
            }
        }

        let names = level_rule.dataset_types.names();
        if names.is_empty() {
            result.error(format!("{base}.datasetTypes"), "at least one dataset type is required");
        }
        for (j, name) in names.iter().enumerate() {
            if name.parse::<DatasetKind>().is_err() {
                unknown_dataset_type(result, &format!("{base}.datasetTypes[{j}]"), name);
            }
        }

        let size = level_rule.dataset_size;
        if size.rows == 0 || size.cols == 0 {
            result.error(
                format!("{base}.datasetSize"),
                format!("datasetSize must be at least 1x1, got {}x{}", size.rows, size.cols),
            );
        }

        match &level_rule.pattern_types {
            None => result.warn(
                format!("{base}.patternTypes"),
                "no patternTypes; these levels carry no pattern",
            ),
            Some(PatternTypes::List(ids)) if ids.is_empty() => result.warn(
                format!("{base}.patternTypes"),
                "empty patternTypes; these levels carry no pattern",
            ),
            Some(_) => {}
        }

        if let Some(registry) = &spec.pattern_registry {
            check_registry_keys(level_rule, registry, &base, result);
        }
    }

    if let Some(registry) = &spec.pattern_registry {
        for (dataset_type, entries) in registry {
            let base = format!("spec.patternRegistry.{dataset_type}");
            if dataset_type.parse::<DatasetKind>().is_err() {
                unknown_dataset_type(result, &base, dataset_type);
            }
            for (key, id) in entries {
                if id.trim().is_empty() {
                    result.error(format!("{base}.{key}"), "pattern id must not be empty");
                }
            }
        }
    }
}

/// Every listed key must be mapped for each of the rule's dataset types, or
/// that combination silently resolves to no pattern.
fn check_registry_keys(
    level_rule: &LevelRule,
    registry: &PatternRegistryMap,
    base: &str,
    result: &mut ValidationResult,
) {
    let Some(types) = &level_rule.pattern_types else {
        return;
    };
    let is_list = matches!(types, PatternTypes::List(_));

    for (j, key) in types.listed().into_iter().enumerate() {
        if key == "none" || key.eq_ignore_ascii_case("random") {
            continue;
        }
        let path = if is_list {
            format!("{base}.patternTypes[{j}]")
        } else {
            format!("{base}.patternTypes")
        };
        for name in level_rule.dataset_types.names() {
            if name.parse::<DatasetKind>().is_err() {
                continue;
            }
            let known: Vec<&str> = registry
                .get(name)
                .map(|m| m.keys().map(|k| k.as_str()).collect())
                .unwrap_or_default();
            if known.contains(&key) {
                continue;
            }
            let message = match fuzzy_match(key, &known) {
                Some(s) => format!(
                    "key '{key}' is not in patternRegistry.{name} (did you mean '{s}'?); {name} grids fall back to no pattern"
                ),
                None => format!("key '{key}' is not in patternRegistry.{name}; {name} grids fall back to no pattern"),
            };
            result.warn(path.clone(), message);
        }
    }
}
