use chrono::NaiveDate;
use hunter_core::{HunterError, Result};
use hunter_rules::{DatasetRules, LevelProgression, RuleSet};

use crate::patterns::PatternRegistry;
use crate::questions::QuestionRegistry;

/// Rule tables and registries for one engine instance.
///
/// Built once, read-only afterwards. Independent contexts may coexist.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub(super) dataset_rules: DatasetRules,
    pub(super) progression: LevelProgression,
    pub(super) patterns: PatternRegistry,
    pub(super) questions: QuestionRegistry,
    /// Fixed anchor for date generation; the local date when unset.
    pub(super) today: Option<NaiveDate>,
}

impl EngineContext {
    pub fn builder() -> EngineContextBuilder {
        EngineContextBuilder::default()
    }

    /// Context over a loaded rule set with the standard registries.
    pub fn from_rule_set(rules: RuleSet) -> Result<Self> {
        Self::builder().rule_set(rules).build()
    }

    pub fn dataset_rules(&self) -> &DatasetRules {
        &self.dataset_rules
    }

    pub fn progression(&self) -> &LevelProgression {
        &self.progression
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn questions(&self) -> &QuestionRegistry {
        &self.questions
    }

    pub(super) fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[derive(Debug, Default)]
pub struct EngineContextBuilder {
    dataset_rules: Option<DatasetRules>,
    progression: Option<LevelProgression>,
    patterns: Option<PatternRegistry>,
    questions: Option<QuestionRegistry>,
    today: Option<NaiveDate>,
}

impl EngineContextBuilder {
    pub fn dataset_rules(mut self, rules: DatasetRules) -> Self {
        self.dataset_rules = Some(rules);
        self
    }

    pub fn progression(mut self, progression: LevelProgression) -> Self {
        self.progression = Some(progression);
        self
    }

    /// Take whichever tables the rule set carries.
    pub fn rule_set(mut self, rules: RuleSet) -> Self {
        if let Some(d) = rules.dataset_rules {
            self.dataset_rules = Some(d);
        }
        if let Some(p) = rules.progression {
            self.progression = Some(p);
        }
        self
    }

    pub fn patterns(mut self, registry: PatternRegistry) -> Self {
        self.patterns = Some(registry);
        self
    }

    pub fn questions(mut self, registry: QuestionRegistry) -> Self {
        self.questions = Some(registry);
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Fails with [`HunterError::NotInitialized`] when either rule table is missing.
    /// Registries default to the standard sets.
    pub fn build(self) -> Result<EngineContext> {
        let dataset_rules = self
            .dataset_rules
            .ok_or(HunterError::NotInitialized("dataset rules"))?;
        let progression = self
            .progression
            .ok_or(HunterError::NotInitialized("level progression"))?;
        Ok(EngineContext {
            dataset_rules,
            progression,
            patterns: self.patterns.unwrap_or_else(PatternRegistry::standard),
            questions: self.questions.unwrap_or_else(QuestionRegistry::standard),
            today: self.today,
        })
    }
}
