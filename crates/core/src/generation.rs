//! Per-dataset-type generation rules, as supplied by the rule tables.

use serde::{Deserialize, Serialize};

use crate::dataset::parse_clock;
use crate::error::{HunterError, Result};

pub const DEFAULT_MIN_VALUE: i64 = 1;
pub const DEFAULT_MAX_VALUE: i64 = 100;
pub const DEFAULT_RANGE_DAYS: i64 = 30;
/// Widest day window on either side of today; keeps every offset inside `NaiveDate`.
pub const MAX_RANGE_DAYS: i64 = 36_500_000;
pub const DEFAULT_START_TIME: &str = "08:00";
pub const DEFAULT_END_TIME: &str = "18:00";
pub const DEFAULT_CATEGORIES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_days_before: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_days_after: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl GenerationRules {
    /// Inclusive `[min, max]` for numeric grids.
    pub fn numeric_range(&self) -> Result<(i64, i64)> {
        let min = self.min_value.unwrap_or(DEFAULT_MIN_VALUE);
        let max = self.max_value.unwrap_or(DEFAULT_MAX_VALUE);
        if min > max {
            return Err(HunterError::InvalidConfig(format!(
                "minValue {} exceeds maxValue {}",
                min, max
            )));
        }
        Ok((min, max))
    }

    /// Days before and after today that date cells may fall on.
    pub fn day_window(&self) -> Result<(i64, i64)> {
        let before = self.range_days_before.unwrap_or(DEFAULT_RANGE_DAYS);
        let after = self.range_days_after.unwrap_or(DEFAULT_RANGE_DAYS);
        if before < 0 || after < 0 {
            return Err(HunterError::InvalidConfig(format!(
                "day range must be non-negative, got -{}..+{}",
                before, after
            )));
        }
        if before > MAX_RANGE_DAYS || after > MAX_RANGE_DAYS {
            return Err(HunterError::InvalidConfig(format!(
                "day range -{}..+{} exceeds the {} day limit",
                before, after, MAX_RANGE_DAYS
            )));
        }
        Ok((before, after))
    }

    /// Inclusive minute-of-day band for time grids.
    pub fn time_window(&self) -> Result<(u32, u32)> {
        let start_raw = self.start_time.as_deref().unwrap_or(DEFAULT_START_TIME);
        let end_raw = self.end_time.as_deref().unwrap_or(DEFAULT_END_TIME);
        let start = parse_clock(start_raw)
            .ok_or_else(|| HunterError::InvalidConfig(format!("invalid startTime '{}'", start_raw)))?;
        let end = parse_clock(end_raw)
            .ok_or_else(|| HunterError::InvalidConfig(format!("invalid endTime '{}'", end_raw)))?;
        if start > end {
            return Err(HunterError::InvalidConfig(format!(
                "startTime {} is after endTime {}",
                start_raw, end_raw
            )));
        }
        Ok((start, end))
    }

    /// Configured category pool, or the default letters.
    pub fn category_pool(&self) -> Vec<String> {
        match &self.categories {
            Some(pool) if !pool.is_empty() => pool.clone(),
            _ => DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let rules = GenerationRules::default();
        assert_eq!(rules.numeric_range().unwrap(), (1, 100));
        assert_eq!(rules.day_window().unwrap(), (30, 30));
        assert_eq!(rules.time_window().unwrap(), (480, 1080));
        assert_eq!(rules.category_pool().len(), 6);
    }

    #[test]
    fn inverted_numeric_range_is_rejected() {
        let rules = GenerationRules {
            min_value: Some(50),
            max_value: Some(10),
            ..Default::default()
        };
        assert!(matches!(rules.numeric_range(), Err(HunterError::InvalidConfig(_))));
    }

    #[test]
    fn oversized_day_window_is_rejected() {
        let rules = GenerationRules {
            range_days_before: Some(200_000_000_000_000),
            ..Default::default()
        };
        assert!(matches!(rules.day_window(), Err(HunterError::InvalidConfig(_))));

        let rules = GenerationRules {
            range_days_after: Some(MAX_RANGE_DAYS + 1),
            ..Default::default()
        };
        assert!(rules.day_window().is_err());

        let rules = GenerationRules {
            range_days_before: Some(MAX_RANGE_DAYS),
            range_days_after: Some(MAX_RANGE_DAYS),
            ..Default::default()
        };
        assert_eq!(rules.day_window().unwrap(), (MAX_RANGE_DAYS, MAX_RANGE_DAYS));
    }

    #[test]
    fn empty_category_pool_falls_back_to_letters() {
        let rules = GenerationRules {
            categories: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(rules.category_pool()[0], "A");
    }

    #[test]
    fn parses_camel_case_json() {
        let rules: GenerationRules = serde_json::from_str(
            r#"{"minValue": 10, "maxValue": 20, "startTime": "09:00", "endTime": "17:30"}"#,
        )
        .unwrap();
        assert_eq!(rules.numeric_range().unwrap(), (10, 20));
        assert_eq!(rules.time_window().unwrap(), (540, 1050));
    }
}
