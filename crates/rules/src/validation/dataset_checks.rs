//! Validation for DatasetRules documents.

use hunter_core::{is_clock_shape, parse_clock, DatasetKind};

use super::common_checks::validate_common_metadata;
use super::{unknown_dataset_type, ValidationResult};
use crate::dataset_rules::DatasetRulesRule;

pub fn validate_dataset_rules(rule: &DatasetRulesRule, result: &mut ValidationResult) {
    validate_common_metadata(
        &rule.api_version,
        &rule.kind,
        "DatasetRules",
        &rule.metadata.id,
        result,
    );

    let spec = &rule.spec;
    if spec.dataset_types.is_empty() {
        result.error("spec.datasetTypes", "at least one dataset type must be configured");
        return;
    }

    for (name, type_rule) in &spec.dataset_types {
        let base = format!("spec.datasetTypes.{name}");
        if name.parse::<DatasetKind>().is_err() {
            unknown_dataset_type(result, &base, name);
            continue;
        }
        let gen = &type_rule.generation;
        let gen_path = format!("{base}.generation");

        if let Err(e) = gen.numeric_range() {
            result.error(format!("{gen_path}.minValue"), e.to_string());
        }
        if let Err(e) = gen.day_window() {
            result.error(format!("{gen_path}.rangeDaysBefore"), e.to_string());
        }

        let mut times_ok = true;
        for (field, value) in [("startTime", &gen.start_time), ("endTime", &gen.end_time)] {
            if let Some(t) = value {
                if !is_clock_shape(t) || parse_clock(t).is_none() {
                    times_ok = false;
                    result.error(
                        format!("{gen_path}.{field}"),
                        format!("{field} must be a valid HH:MM clock time, got '{t}'"),
                    );
                }
            }
        }
        if times_ok {
            if let Err(e) = gen.time_window() {
                result.error(format!("{gen_path}.startTime"), e.to_string());
            }
        }

        if let Some(pool) = &gen.categories {
            if pool.is_empty() {
                result.warn(
                    format!("{gen_path}.categories"),
                    "empty category pool; the default letters A-F will be used",
                );
            }
            let mut seen = std::collections::HashSet::new();
            for (i, c) in pool.iter().enumerate() {
                if c.trim().is_empty() {
                    result.error(format!("{gen_path}.categories[{i}]"), "category must not be blank");
                } else if !seen.insert(c) {
                    result.warn(
                        format!("{gen_path}.categories[{i}]"),
                        format!("duplicate category '{c}' skews the draw"),
                    );
                }
            }
        }
    }

    for kind in DatasetKind::ALL {
        if !spec.dataset_types.contains_key(kind.as_str()) {
            result.warn(
                "spec.datasetTypes",
                format!("no rule for dataset type '{}'; levels using it will fail", kind),
            );
        }
    }
}
