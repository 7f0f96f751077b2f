//! Tests for rule validation.

use super::*;

const GOOD_DATASETS: &str = r#"
apiVersion: v1
kind: DatasetRules
metadata:
  id: good-datasets
  name: Good
spec:
  datasetTypes:
    numbers: { generation: { minValue: 1, maxValue: 100 } }
    dates: { generation: { rangeDaysBefore: 30, rangeDaysAfter: 30 } }
    categories: { generation: { categories: [A, B, C] } }
    times: { generation: { startTime: "08:00", endTime: "18:00" } }
"#;

const GOOD_LEVELS: &str = r#"
apiVersion: v1
kind: LevelProgression
metadata:
  id: good-levels
  name: Good
spec:
  patternRegistry:
    numbers: { outlier: outlier }
  levels:
    - levels: [1, 2]
      datasetTypes: [numbers]
      patternTypes: [outlier]
      datasetSize: { rows: 3, cols: 3 }
    - levels: "3+"
      datasetTypes: [numbers, dates]
      patternTypes: ALL
      datasetSize: { rows: 4, cols: 4 }
"#;

fn messages(result: &ValidationResult) -> Vec<String> {
    result.errors.iter().map(|e| e.message.clone()).collect()
}

#[test]
fn good_documents_are_valid() {
    let datasets = validate_yaml(GOOD_DATASETS);
    assert!(datasets.valid, "{:?}", datasets.errors);
    assert!(datasets.warnings.is_empty());

    let levels = validate_yaml(GOOD_LEVELS);
    assert!(levels.valid, "{:?}", levels.errors);
}

#[test]
fn misspelled_dataset_type_gets_suggestion() {
    let yaml = GOOD_DATASETS.replace("    dates:", "    dtaes:");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    let err = &result.errors[0];
    assert_eq!(err.path, "spec.datasetTypes.dtaes");
    assert_eq!(err.suggestion.as_deref(), Some("Did you mean 'dates'?"));
    // and the real `dates` key is now missing
    assert!(result.warnings.iter().any(|w| w.message.contains("'dates'")));
}

#[test]
fn inverted_numeric_range_is_an_error() {
    let yaml = GOOD_DATASETS.replace("minValue: 1, maxValue: 100", "minValue: 100, maxValue: 1");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    assert_eq!(result.errors[0].path, "spec.datasetTypes.numbers.generation.minValue");
}

#[test]
fn bad_clock_times_are_errors() {
    let yaml = GOOD_DATASETS.replace("startTime: \"08:00\"", "startTime: \"8am\"");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    assert!(messages(&result)[0].contains("HH:MM"));

    let yaml = GOOD_DATASETS.replace("endTime: \"18:00\"", "endTime: \"07:00\"");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    assert!(messages(&result)[0].contains("after endTime"));
}

#[test]
fn empty_category_pool_warns() {
    let yaml = GOOD_DATASETS.replace("categories: [A, B, C]", "categories: []");
    let result = validate_yaml(&yaml);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn non_kebab_id_and_wrong_version() {
    let yaml = GOOD_DATASETS
        .replace("id: good-datasets", "id: GoodDatasets")
        .replace("apiVersion: v1", "apiVersion: v2");
    let result = validate_yaml(&yaml);
    let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert!(paths.contains(&"apiVersion"));
    assert!(paths.contains(&"metadata.id"));
}

#[test]
fn malformed_open_range_and_zero_size() {
    let yaml = GOOD_LEVELS
        .replace("levels: \"3+\"", "levels: \"three+\"")
        .replace("rows: 4, cols: 4", "rows: 0, cols: 4");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    let paths: Vec<&str> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert!(paths.contains(&"spec.levels[1].levels"));
    assert!(paths.contains(&"spec.levels[1].datasetSize"));
}

#[test]
fn duplicate_levels_warn() {
    let yaml = GOOD_LEVELS.replace("levels: \"3+\"", "levels: [2, 3]");
    let result = validate_yaml(&yaml);
    assert!(result.valid);
    assert!(result.warnings.iter().any(|w| w.message.contains("level 2")));
}

#[test]
fn unknown_registry_and_level_dataset_types() {
    let yaml = GOOD_LEVELS
        .replace("numbers: { outlier: outlier }", "nums: { outlier: outlier }")
        .replace("datasetTypes: [numbers, dates]", "datasetTypes: [numbers, widgets]");
    let result = validate_yaml(&yaml);
    assert!(!result.valid);
    let registry = result
        .errors
        .iter()
        .find(|e| e.path == "spec.patternRegistry.nums")
        .unwrap();
    assert_eq!(registry.suggestion.as_deref(), Some("Did you mean 'numbers'?"));
    let widgets = result
        .errors
        .iter()
        .find(|e| e.path == "spec.levels[1].datasetTypes[1]")
        .unwrap();
    assert!(widgets.suggestion.is_none());
}

#[test]
fn unmapped_pattern_key_warns_with_suggestion() {
    let yaml = GOOD_LEVELS.replace("patternTypes: [outlier]", "patternTypes: [outlir]");
    let result = validate_yaml(&yaml);
    assert!(result.valid, "{:?}", result.errors);
    let warning = result
        .warnings
        .iter()
        .find(|w| w.path == "spec.levels[0].patternTypes[0]")
        .unwrap();
    assert!(warning.message.contains("patternRegistry.numbers"));
    assert!(warning.message.contains("did you mean 'outlier'?"));
}

#[test]
fn pattern_key_must_be_mapped_for_every_dataset_type() {
    let yaml = GOOD_LEVELS.replace(
        "datasetTypes: [numbers]\n      patternTypes: [outlier]",
        "datasetTypes: [numbers, dates]\n      patternTypes: [outlier, none]",
    );
    let result = validate_yaml(&yaml);
    let paths: Vec<&str> = result.warnings.iter().map(|w| w.path.as_str()).collect();
    assert_eq!(paths, vec!["spec.levels[0].patternTypes[0]"]);
    assert!(result.warnings[0].message.contains("patternRegistry.dates"));
}

#[test]
fn random_keyword_needs_no_registry_entry() {
    let result = validate_yaml(GOOD_LEVELS);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn parse_failure_becomes_error() {
    let result = validate_yaml("apiVersion: v1\nkind: [");
    assert!(!result.valid);
    assert!(result.errors[0].message.contains("YAML parse error"));
}
