//! Tests for schema types.

use super::*;

const DATASET_RULES_YAML: &str = r#"
apiVersion: v1
kind: DatasetRules
metadata:
  id: default-datasets
  name: Default Datasets
  tags: [core]
spec:
  datasetTypes:
    numbers:
      generation:
        minValue: 10
        maxValue: 50
    categories:
      generation:
        categories: [Red, Green, Blue]
"#;

const PROGRESSION_YAML: &str = r#"
apiVersion: v1
kind: LevelProgression
metadata:
  id: starter-levels
  name: Starter Levels
  enabled: false
spec:
  - levels: [1, 2, 3]
    datasetTypes: [numbers]
    patternTypes: [outlier]
    datasetSize: { rows: 3, cols: 3 }
  - levels: "4+"
    datasetTypes: categories
    patternTypes: ALL
    datasetSize: { rows: 4, cols: 4 }
"#;

#[test]
fn rule_kind_round_trips() {
    for kind in RuleKind::ALL {
        assert_eq!(kind.to_string().parse::<RuleKind>().unwrap(), kind);
    }
    assert!("AnomalyRule".parse::<RuleKind>().is_err());
}

#[test]
fn envelope_reads_header_only() {
    let env: RuleEnvelope = serde_yaml::from_str(DATASET_RULES_YAML).unwrap();
    assert_eq!(env.api_version, "v1");
    assert_eq!(env.rule_kind().unwrap(), RuleKind::DatasetRules);
    assert_eq!(env.metadata.id, "default-datasets");
    assert!(env.metadata.enabled);
}

#[test]
fn two_pass_dataset_rules() {
    let env: RuleEnvelope = serde_yaml::from_str(DATASET_RULES_YAML).unwrap();
    let doc = env.parse_full().unwrap();
    assert_eq!(doc.kind(), RuleKind::DatasetRules);

    let rule = doc.as_dataset_rules().unwrap();
    let numbers = &rule.spec.dataset_types["numbers"].generation;
    assert_eq!(numbers.numeric_range().unwrap(), (10, 50));
    assert_eq!(
        rule.spec.dataset_types["categories"].generation.category_pool(),
        vec!["Red", "Green", "Blue"]
    );
    assert!(doc.as_level_progression().is_none());
}

#[test]
fn two_pass_level_progression() {
    let env: RuleEnvelope = serde_yaml::from_str(PROGRESSION_YAML).unwrap();
    let doc = env.parse_full().unwrap();
    let rule = doc.as_level_progression().unwrap();
    assert!(!rule.metadata.enabled);
    assert_eq!(rule.spec.levels.len(), 2);
    assert_eq!(rule.spec.resolve(9).unwrap().levels.open_start(), Some(4));
}

#[test]
fn unknown_kind_fails_second_pass() {
    let yaml = DATASET_RULES_YAML.replace("kind: DatasetRules", "kind: ScoringConfig");
    let env: RuleEnvelope = serde_yaml::from_str(&yaml).unwrap();
    let err = env.parse_full().unwrap_err();
    assert!(err.contains("unknown rule kind"));
}

#[test]
fn unknown_top_level_field_is_rejected() {
    let yaml = format!("{}\nextra: 1\n", DATASET_RULES_YAML.trim_end());
    let env: RuleEnvelope = serde_yaml::from_str(&yaml).unwrap();
    assert!(env.parse_full().is_err());
}

#[test]
fn document_serializes_with_header() {
    let env: RuleEnvelope = serde_yaml::from_str(DATASET_RULES_YAML).unwrap();
    let doc = env.parse_full().unwrap();
    let json = doc.to_json().unwrap();
    assert_eq!(json["kind"], "DatasetRules");
    assert_eq!(json["spec"]["datasetTypes"]["numbers"]["generation"]["maxValue"], 50);

    let yaml = doc.to_yaml().unwrap();
    let again: RuleEnvelope = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(again.parse_full().unwrap(), doc);
}
