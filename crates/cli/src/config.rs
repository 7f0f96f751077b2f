use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use hunter_core::{Settings, ThresholdTier};
use hunter_engine::EngineContext;
use hunter_rules::loader::{LoadResult, LoadStatus, RuleLoader};
use tracing::{info, warn};

/// Environment settings with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub rules_dir: PathBuf,
    pub default_tier: u8,
    pub seed: Option<u64>,
    pub pretty: bool,
}

impl RunConfig {
    pub fn resolve(settings: Settings, rules_dir: Option<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.unwrap_or(settings.rules_dir),
            default_tier: settings.default_tier,
            seed: settings.seed,
            pretty: settings.pretty,
        }
    }

    pub fn tier(&self, requested: Option<u8>) -> ThresholdTier {
        ThresholdTier::for_tier(requested.unwrap_or(self.default_tier))
    }

    /// Explicit seed, else the configured one, else a fresh random seed.
    pub fn seed(&self, requested: Option<u64>) -> u64 {
        requested.or(self.seed).unwrap_or_else(rand::random)
    }
}

/// Load every rule document under `dir`, failing on any file that did not parse.
pub fn load_rules(dir: &Path) -> Result<(RuleLoader, Vec<LoadResult>)> {
    if !dir.is_dir() {
        bail!("rules directory {} does not exist", dir.display());
    }
    let mut loader = RuleLoader::new(dir);
    let results = loader
        .load_all()
        .with_context(|| format!("failed to scan {}", dir.display()))?;
    for r in &results {
        if let LoadStatus::Skipped { reason } = &r.status {
            warn!(path = %r.path.display(), reason = %reason, "skipped file");
        }
    }
    Ok((loader, results))
}

/// Engine context over the rule files in `dir`.
pub fn load_context(dir: &Path) -> Result<EngineContext> {
    let (loader, results) = load_rules(dir)?;
    let failures: Vec<String> = results
        .iter()
        .filter_map(|r| match &r.status {
            LoadStatus::Failed { error } => Some(format!("{}: {}", r.path.display(), error)),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        bail!("failed to load rule files:\n  {}", failures.join("\n  "));
    }

    let rule_set = loader.rule_set();
    info!(
        documents = loader.documents().len(),
        complete = rule_set.is_complete(),
        "rules loaded"
    );
    EngineContext::from_rule_set(rule_set)
        .with_context(|| format!("incomplete rule set in {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            profile: String::new(),
            rules_dir: PathBuf::from("data/rules"),
            default_tier: 2,
            seed: Some(11),
            pretty: false,
        }
    }

    #[test]
    fn flag_overrides_env_rules_dir() {
        let run = RunConfig::resolve(settings(), Some(PathBuf::from("elsewhere")));
        assert_eq!(run.rules_dir, PathBuf::from("elsewhere"));
        let run = RunConfig::resolve(settings(), None);
        assert_eq!(run.rules_dir, PathBuf::from("data/rules"));
    }

    #[test]
    fn tier_and_seed_fall_back_to_settings() {
        let run = RunConfig::resolve(settings(), None);
        assert_eq!(run.tier(None).tier, 2);
        assert_eq!(run.tier(Some(0)).tier, 0);
        assert_eq!(run.seed(None), 11);
        assert_eq!(run.seed(Some(5)), 5);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_context(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn incomplete_rule_set_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dataset-rules.json"),
            r#"{"datasetTypes": {"numbers": {"generation": {}}}}"#,
        )
        .unwrap();
        let err = load_context(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("level progression"));
    }
}
