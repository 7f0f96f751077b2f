use chrono::NaiveDate;
use hunter_core::{DatasetKind, GenerationRules, HintLevel, HunterError, ThresholdTier};
use hunter_rules::{DatasetRules, LevelProgression};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

const LEGACY_LEVELS: &str = r#"[
    {"levels": [1, 2, 3], "datasetTypes": ["numbers"], "patternTypes": ["outlier"], "datasetSize": {"rows": 3, "cols": 3}},
    {"levels": [4, 5], "datasetTypes": ["categories"], "patternTypes": ["unique", "frequency"], "datasetSize": {"rows": 4, "cols": 4}},
    {"levels": [6, 7], "datasetTypes": ["dates"], "patternTypes": ["weekend"], "datasetSize": {"rows": 4, "cols": 4}},
    {"levels": "8+", "datasetTypes": ["numbers", "categories", "dates"], "patternTypes": "ALL", "datasetSize": {"rows": 5, "cols": 5}}
]"#;

const REGISTRY_LEVELS: &str = r#"{
    "patternRegistry": {
        "numbers": {"spike": "outlier", "ghost": "phantom", "quiet": "none"}
    },
    "levels": [
        {"levels": [1], "datasetTypes": "numbers", "patternTypes": ["spike"], "datasetSize": {"rows": 3, "cols": 3}},
        {"levels": [2], "datasetTypes": "numbers", "patternTypes": ["ghost"], "datasetSize": {"rows": 3, "cols": 3}},
        {"levels": [3], "datasetTypes": "numbers", "patternTypes": ["missing"], "datasetSize": {"rows": 3, "cols": 3}},
        {"levels": [4], "datasetTypes": "numbers", "patternTypes": "random", "datasetSize": {"rows": 3, "cols": 3}}
    ]
}"#;

fn dataset_rules() -> DatasetRules {
    DatasetRules::default()
        .with_type(
            DatasetKind::Numbers,
            GenerationRules {
                min_value: Some(1),
                max_value: Some(100),
                ..Default::default()
            },
        )
        .with_type(DatasetKind::Dates, GenerationRules::default())
        .with_type(DatasetKind::Categories, GenerationRules::default())
        .with_type(DatasetKind::Times, GenerationRules::default())
}

fn context(levels: &str) -> EngineContext {
    EngineContext::builder()
        .dataset_rules(dataset_rules())
        .progression(LevelProgression::from_json(levels).unwrap())
        .today(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        .build()
        .unwrap()
}

#[test]
fn build_requires_both_tables() {
    let err = EngineContext::builder()
        .progression(LevelProgression::default())
        .build()
        .unwrap_err();
    assert!(matches!(err, HunterError::NotInitialized("dataset rules")));

    let err = EngineContext::builder()
        .dataset_rules(dataset_rules())
        .build()
        .unwrap_err();
    assert!(matches!(err, HunterError::NotInitialized("level progression")));
}

#[test]
fn first_level_is_a_numeric_outlier() {
    let ctx = context(LEGACY_LEVELS);
    let challenge = ctx.generate_level_seeded(1, &ThresholdTier::for_tier(0), 42).unwrap();
    assert_eq!(challenge.dataset_type, DatasetKind::Numbers);
    assert_eq!(challenge.pattern_type, "outlier");
    assert_eq!(challenge.grid.len(), 3);
    assert_eq!(challenge.grid[0].len(), 3);
    assert_eq!(challenge.threshold_config.hint_level, HintLevel::High);
    assert!(!challenge.formatting.highlighted_cells.is_empty());
    assert!(!challenge.question.is_fallback());
    assert_eq!(challenge.pattern_meta.scoring.tier_multiplier, 1.0);
}

#[test]
fn unmatched_level_uses_last_rule() {
    let ctx = context(
        r#"[{"levels": [1, 2], "datasetTypes": ["dates"], "patternTypes": ["weekend"], "datasetSize": {"rows": 2, "cols": 2}},
            {"levels": [3], "datasetTypes": ["categories"], "patternTypes": ["frequency"], "datasetSize": {"rows": 4, "cols": 2}}]"#,
    );
    let challenge = ctx.generate_level_seeded(50, &ThresholdTier::default(), 1).unwrap();
    assert_eq!(challenge.dataset_type, DatasetKind::Categories);
    assert_eq!(challenge.pattern_type, "frequency");
}

#[test]
fn empty_progression_is_unknown_level() {
    let ctx = context("[]");
    let err = ctx.generate_level_seeded(1, &ThresholdTier::default(), 1).unwrap_err();
    assert!(matches!(err, HunterError::UnknownLevel(1)));
}

#[test]
fn misspelled_dataset_type_suggests_fix() {
    let ctx = context(
        r#"[{"levels": [1], "datasetTypes": ["nubmers"], "datasetSize": {"rows": 2, "cols": 2}}]"#,
    );
    let err = ctx.generate_level_seeded(1, &ThresholdTier::default(), 1).unwrap_err();
    match err {
        HunterError::UnknownDatasetType { name, suggestion } => {
            assert_eq!(name, "nubmers");
            assert_eq!(suggestion.as_deref(), Some("numbers"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_pattern_types_means_none() {
    let ctx = context(
        r#"[{"levels": [1], "datasetTypes": ["numbers"], "datasetSize": {"rows": 3, "cols": 3}}]"#,
    );
    let challenge = ctx.generate_level_seeded(1, &ThresholdTier::for_tier(0), 9).unwrap();
    assert_eq!(challenge.pattern_type, NONE_PATTERN);
    assert!(challenge.pattern_meta.is_fallback());
    assert!(challenge.formatting.highlighted_cells.is_empty());
}

#[test]
fn times_degrade_to_none() {
    let ctx = context(
        r#"[{"levels": [1], "datasetTypes": ["times"], "patternTypes": "ALL", "datasetSize": {"rows": 3, "cols": 3}}]"#,
    );
    let challenge = ctx.generate_level_seeded(1, &ThresholdTier::default(), 3).unwrap();
    assert_eq!(challenge.dataset_type, DatasetKind::Times);
    assert_eq!(challenge.pattern_type, NONE_PATTERN);
    assert_eq!(challenge.pattern_meta.sigil.kind, "FALLBACK");
}

#[test]
fn registry_keys_map_to_validated_ids() {
    let ctx = context(REGISTRY_LEVELS);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Numbers, "spike", &mut rng), "outlier");
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Numbers, "ghost", &mut rng), NONE_PATTERN);
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Numbers, "quiet", &mut rng), NONE_PATTERN);
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Numbers, "missing", &mut rng), NONE_PATTERN);
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Dates, "spike", &mut rng), NONE_PATTERN);

    for seed in 0..8 {
        let id = ctx.resolve_pattern_id(DatasetKind::Numbers, "random", &mut StdRng::seed_from_u64(seed));
        assert!(id == "outlier" || id == "range", "{id}");
    }
}

#[test]
fn registry_levels_generate() {
    let ctx = context(REGISTRY_LEVELS);
    let tier = ThresholdTier::default();
    assert_eq!(ctx.generate_level_seeded(1, &tier, 5).unwrap().pattern_type, "outlier");
    assert_eq!(ctx.generate_level_seeded(2, &tier, 5).unwrap().pattern_type, NONE_PATTERN);
    assert_eq!(ctx.generate_level_seeded(3, &tier, 5).unwrap().pattern_type, NONE_PATTERN);
    let random = ctx.generate_level_seeded(4, &tier, 5).unwrap();
    assert!(["outlier", "range"].contains(&random.pattern_type.as_str()));
}

#[test]
fn without_registry_keys_pass_through() {
    let ctx = context(LEGACY_LEVELS);
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Numbers, "outlir", &mut rng), "outlir");
    assert_eq!(ctx.resolve_pattern_id(DatasetKind::Times, "random", &mut rng), NONE_PATTERN);
}

#[test]
fn seeded_generation_is_reproducible() {
    let ctx = context(LEGACY_LEVELS);
    let tier = ThresholdTier::for_tier(2);
    for level in [1, 4, 6, 9] {
        let a = ctx.generate_level_seeded(level, &tier, 1234).unwrap();
        let b = ctx.generate_level_seeded(level, &tier, 1234).unwrap();
        assert_eq!(a, b, "level {level}");
    }
}

#[test]
fn challenge_serializes_camel_case() {
    let ctx = context(LEGACY_LEVELS);
    let challenge = ctx.generate_level_seeded(6, &ThresholdTier::default(), 77).unwrap();
    let json = serde_json::to_value(&challenge).unwrap();
    assert_eq!(json["datasetType"], "dates");
    assert_eq!(json["patternType"], "weekend");
    assert!(json["thresholdConfig"]["rewardMultiplier"].is_number());
    assert!(json["datasetMeta"]["datasetId"].is_string());
    let first = json["grid"][0][0]["value"].as_str().unwrap();
    assert!(NaiveDate::parse_from_str(first, "%Y-%m-%d").is_ok());
}

#[test]
fn challenge_dataset_round_trips_meta() {
    let ctx = context(LEGACY_LEVELS);
    let challenge = ctx.generate_level_seeded(4, &ThresholdTier::default(), 8).unwrap();
    let ds = challenge.dataset();
    assert_eq!(ds.kind(), DatasetKind::Categories);
    assert_eq!(ds.len(), 16);
}
