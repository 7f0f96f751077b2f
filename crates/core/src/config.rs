use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::tier::DEFAULT_TIER;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

// ── Top-level settings ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Active profile name (empty = default).
    pub profile: String,
    /// Directory holding the dataset-rule and level-progression documents.
    pub rules_dir: PathBuf,
    /// Tier used when the caller does not pass one.
    pub default_tier: u8,
    /// Fixed seed for reproducible challenges.
    pub seed: Option<u64>,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Settings {
    /// Build settings from environment variables (call `load_dotenv()` first).
    /// Profile is read from `HUNTER_PROFILE`. When set (e.g. `PROD`), every key
    /// is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("HUNTER_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            rules_dir: PathBuf::from(profiled_env_or(p, "HUNTER_RULES_DIR", "data/rules")),
            default_tier: profiled_env_opt(p, "HUNTER_DEFAULT_TIER")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIER),
            seed: profiled_env_opt(p, "HUNTER_SEED").and_then(|v| v.parse().ok()),
            pretty: profiled_env_or(p, "HUNTER_PRETTY", "false") == "true",
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Settings loaded (profile: {}):", self.profile_label());
        tracing::info!("  rules_dir:    {}", self.rules_dir.display());
        tracing::info!("  default_tier: {}", self.default_tier);
        tracing::info!(
            "  seed:         {}",
            self.seed.map(|s| s.to_string()).unwrap_or_else(|| "(random)".to_string())
        );
    }
}
