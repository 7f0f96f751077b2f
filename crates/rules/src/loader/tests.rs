//! Tests for the rule loader module.

use std::fs;

use tempfile::TempDir;

use super::*;
use crate::schema::RuleKind;

const DATASET_RULES_YAML: &str = r#"
apiVersion: v1
kind: DatasetRules
metadata:
  id: test-datasets
  name: Test Datasets
spec:
  datasetTypes:
    numbers:
      generation:
        minValue: 1
        maxValue: 9
"#;

const PROGRESSION_YAML: &str = r#"
apiVersion: v1
kind: LevelProgression
metadata:
  id: test-levels
  name: Test Levels
spec:
  levels:
    - levels: "1+"
      datasetTypes: numbers
      patternTypes: [outlier]
      datasetSize: { rows: 3, cols: 3 }
"#;

fn temp_loader() -> (TempDir, RuleLoader) {
    let dir = TempDir::new().expect("create tempdir");
    let loader = RuleLoader::new(dir.path().to_path_buf());
    (dir, loader)
}

fn loaded_count(results: &[LoadResult]) -> usize {
    results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Loaded { .. }))
        .count()
}

#[test]
fn load_rule_from_file() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("datasets.yml");
    fs::write(&path, DATASET_RULES_YAML).unwrap();

    let doc = loader.load_file(&path).unwrap();
    assert_eq!(doc.metadata().id, "test-datasets");
    assert_eq!(doc.kind(), RuleKind::DatasetRules);
}

#[test]
fn load_all_skips_dotfiles_and_other_extensions() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("datasets.yml"), DATASET_RULES_YAML).unwrap();
    fs::write(dir.path().join(".hidden.yml"), DATASET_RULES_YAML).unwrap();
    fs::write(dir.path().join("readme.txt"), "not a rule").unwrap();

    let results = loader.load_all().unwrap();
    let skipped = results
        .iter()
        .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
        .count();

    assert_eq!(loaded_count(&results), 1);
    assert_eq!(skipped, 2);
    assert!(loader.documents().contains_key("test-datasets"));
}

#[test]
fn load_all_recursive_subdirectories() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("datasets.yaml"), DATASET_RULES_YAML).unwrap();
    let sub = dir.path().join("levels");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("levels.yml"), PROGRESSION_YAML).unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_count(&results), 2);

    let set = loader.rule_set();
    assert!(set.is_complete());
    assert_eq!(
        set.dataset_rules.unwrap().dataset_types["numbers"].generation.max_value,
        Some(9)
    );
}

#[test]
fn broken_file_is_reported_not_fatal() {
    let (dir, mut loader) = temp_loader();
    fs::write(dir.path().join("datasets.yml"), DATASET_RULES_YAML).unwrap();
    fs::write(dir.path().join("broken.yml"), "apiVersion: v1\nkind: [oops").unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_count(&results), 1);
    assert_eq!(results.iter().filter(|r| r.is_failure()).count(), 1);
}

#[test]
fn empty_id_is_rejected() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("noid.yml");
    fs::write(&path, DATASET_RULES_YAML.replace("id: test-datasets", "id: \"\"")).unwrap();

    match loader.load_file(&path) {
        Err(RuleError::Validation(msg)) => assert!(msg.contains("metadata.id")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn bare_json_tables_are_inferred() {
    let (dir, mut loader) = temp_loader();
    fs::write(
        dir.path().join("datasetRules.json"),
        r#"{"datasetTypes": {"dates": {"generation": {"rangeDaysBefore": 5, "rangeDaysAfter": 5}}}}"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("levelProgression.json"),
        r#"[{"levels": [1], "datasetTypes": ["dates"], "patternTypes": ["weekend"], "datasetSize": {"rows": 4, "cols": 4}}]"#,
    )
    .unwrap();

    let results = loader.load_all().unwrap();
    assert_eq!(loaded_count(&results), 2);
    assert!(loader.documents().contains_key("dataset-rules"));
    assert!(loader.documents().contains_key("level-progression"));
    assert!(loader.rule_set().is_complete());
}

#[test]
fn enveloped_json_is_accepted() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("levels.json");
    fs::write(
        &path,
        r#"{"apiVersion": "v1", "kind": "LevelProgression",
            "metadata": {"id": "json-levels", "name": "JSON Levels"},
            "spec": [{"levels": "1+", "datasetTypes": "times", "datasetSize": {"rows": 2, "cols": 2}}]}"#,
    )
    .unwrap();

    let doc = loader.load_file(&path).unwrap();
    assert_eq!(doc.metadata().id, "json-levels");
    assert_eq!(doc.kind(), RuleKind::LevelProgression);
}

#[test]
fn json_without_known_shape_fails() {
    let (dir, loader) = temp_loader();
    let path = dir.path().join("mystery.json");
    fs::write(&path, r#"{"something": 1}"#).unwrap();
    assert!(matches!(loader.load_file(&path), Err(RuleError::Validation(_))));
}

#[test]
fn disabled_documents_do_not_form_rule_set() {
    let (dir, mut loader) = temp_loader();
    let disabled = DATASET_RULES_YAML.replace("name: Test Datasets", "name: Test Datasets\n  enabled: false");
    fs::write(dir.path().join("datasets.yml"), disabled).unwrap();
    fs::write(dir.path().join("levels.yml"), PROGRESSION_YAML).unwrap();

    loader.load_all().unwrap();
    let set = loader.rule_set();
    assert!(set.dataset_rules.is_none());
    assert!(set.progression.is_some());
    assert!(!set.is_complete());
}

#[test]
fn missing_directory_loads_nothing() {
    let mut loader = RuleLoader::new("/definitely/not/a/rules/dir");
    let results = loader.load_all().unwrap();
    assert!(results.is_empty());
    assert_eq!(loader.rule_set(), RuleSet::default());
}
