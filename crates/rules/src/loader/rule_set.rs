//! The assembled rule tables handed to the engine.

use tracing::warn;

use crate::dataset_rules::DatasetRules;
use crate::level_progression::LevelProgression;
use crate::schema::RuleDocument;

/// One table of each kind, taken from the enabled documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    pub dataset_rules: Option<DatasetRules>,
    pub progression: Option<LevelProgression>,
}

impl RuleSet {
    /// The first enabled document of each kind wins; later ones are ignored
    /// with a warning. Disabled documents are skipped.
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a RuleDocument>) -> Self {
        let mut set = RuleSet::default();
        for doc in docs {
            let meta = doc.metadata();
            if !meta.enabled {
                continue;
            }
            match doc {
                RuleDocument::DatasetRules(rule) => {
                    if set.dataset_rules.is_some() {
                        warn!(rule_id = %meta.id, kind = %doc.kind(), "ignoring additional enabled document");
                    } else {
                        set.dataset_rules = Some(rule.compile());
                    }
                }
                RuleDocument::LevelProgression(rule) => {
                    if set.progression.is_some() {
                        warn!(rule_id = %meta.id, kind = %doc.kind(), "ignoring additional enabled document");
                    } else {
                        set.progression = Some(rule.compile());
                    }
                }
            }
        }
        set
    }

    /// True when both tables are present.
    pub fn is_complete(&self) -> bool {
        self.dataset_rules.is_some() && self.progression.is_some()
    }
}
