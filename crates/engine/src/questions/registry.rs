use hunter_core::{CellValue, DatasetKind, TierName};

use super::selector::QueryContext;
use super::{Answer, QuestionError};

/// What a context must offer for a question to be a candidate.
#[derive(Debug, Clone, Default)]
pub struct QuestionRequirements {
    /// `None` admits every dataset type.
    pub dataset_types: Option<Vec<DatasetKind>>,
    /// `None` admits every pattern.
    pub pattern_types: Option<Vec<String>>,
    pub highlighted: bool,
}

impl QuestionRequirements {
    pub fn admits(&self, ctx: &QueryContext) -> bool {
        if let Some(types) = &self.dataset_types {
            if !types.contains(&ctx.dataset_type) {
                return false;
            }
        }
        if let Some(patterns) = &self.pattern_types {
            if !patterns.iter().any(|p| *p == ctx.pattern_type) {
                return false;
            }
        }
        !self.highlighted || ctx.has_highlights
    }

    pub fn names_pattern(&self, pattern: &str) -> bool {
        self.pattern_types
            .as_ref()
            .is_some_and(|p| p.iter().any(|id| id == pattern))
    }
}

/// Phrasing per tier register.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    pub scout: Option<String>,
    pub hunter: Option<String>,
    pub tracker: Option<String>,
    pub mythic: Option<String>,
}

impl Templates {
    pub fn all(scout: &str, hunter: &str, tracker: &str, mythic: &str) -> Self {
        Self {
            scout: Some(scout.to_string()),
            hunter: Some(hunter.to_string()),
            tracker: Some(tracker.to_string()),
            mythic: Some(mythic.to_string()),
        }
    }

    fn for_tier(&self, tier: TierName) -> Option<&String> {
        match tier {
            TierName::Scout => self.scout.as_ref(),
            TierName::Hunter => self.hunter.as_ref(),
            TierName::Tracker => self.tracker.as_ref(),
            TierName::Mythic => self.mythic.as_ref(),
        }
    }

    /// Requested tier, then hunter, then scout, then whichever exists.
    pub fn resolve(&self, tier: TierName) -> Option<&str> {
        self.for_tier(tier)
            .or(self.hunter.as_ref())
            .or(self.scout.as_ref())
            .or(self.tracker.as_ref())
            .or(self.mythic.as_ref())
            .map(|s| s.as_str())
    }
}

pub type ComputeFn = fn(&QueryContext) -> Result<Answer, QuestionError>;

#[derive(Clone)]
pub struct QuestionDefinition {
    pub id: String,
    pub requires: QuestionRequirements,
    pub templates: Templates,
    pub compute: ComputeFn,
}

impl std::fmt::Debug for QuestionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionDefinition")
            .field("id", &self.id)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

/// Ordered question definitions. Read-only once handed to an engine context.
#[derive(Debug, Clone, Default)]
pub struct QuestionRegistry {
    questions: Vec<QuestionDefinition>,
}

fn first_highlighted(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    ctx.highlighted_values
        .first()
        .cloned()
        .map(Answer::Value)
        .ok_or(QuestionError::NoHighlight)
}

fn highlighted_count(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    Ok(Answer::Count(ctx.highlighted_cells.len()))
}

fn date_or_na(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    Ok(ctx
        .highlighted_values
        .first()
        .cloned()
        .map(Answer::Value)
        .unwrap_or_else(|| Answer::text("N/A")))
}

fn stats_min(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    let stats = ctx.stats.ok_or(QuestionError::MissingStats)?;
    Ok(Answer::Value(CellValue::Number(stats.min)))
}

fn stats_max(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    let stats = ctx.stats.ok_or(QuestionError::MissingStats)?;
    Ok(Answer::Value(CellValue::Number(stats.max)))
}

/// 1-based row of the first highlighted cell.
fn highlighted_row(ctx: &QueryContext) -> Result<Answer, QuestionError> {
    ctx.highlighted_cells
        .first()
        .map(|c| Answer::Count(c.row + 1))
        .ok_or(QuestionError::NoHighlight)
}

fn types(kinds: &[DatasetKind]) -> Option<Vec<DatasetKind>> {
    Some(kinds.to_vec())
}

fn patterns(ids: &[&str]) -> Option<Vec<String>> {
    Some(ids.iter().map(|s| s.to_string()).collect())
}

impl QuestionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question, replacing any with the same id in place.
    pub fn register(&mut self, question: QuestionDefinition) {
        match self.questions.iter().position(|q| q.id == question.id) {
            Some(idx) => self.questions[idx] = question,
            None => self.questions.push(question),
        }
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The built-in question set.
    pub fn standard() -> Self {
        use DatasetKind::*;

        let mut r = Self::new();

        // ── Dates ────────────────────────────────────────────────
        r.register(QuestionDefinition {
            id: "count_weekends".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Dates]),
                pattern_types: patterns(&["weekend"]),
                highlighted: true,
            },
            templates: Templates::all(
                "Count the weekend dates (Saturday & Sunday).",
                "How many Twin Suns shine in this sequence?",
                "Count the days of rest.",
                "Quantify the Twin Suns.",
            ),
            compute: highlighted_count,
        });
        r.register(QuestionDefinition {
            id: "identify_date_pattern".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Dates]),
                pattern_types: None,
                highlighted: true,
            },
            templates: Templates::all(
                "Identify the highlighted date.",
                "What date marks the anomaly?",
                "Identify the mark.",
                "Name the echo.",
            ),
            compute: date_or_na,
        });

        // ── Numbers ──────────────────────────────────────────────
        r.register(QuestionDefinition {
            id: "value_above_mean".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Numbers]),
                pattern_types: patterns(&["above", "outlier"]),
                highlighted: true,
            },
            templates: Templates::all(
                "Identify the value above the average.",
                "Find the Rising Flame among the numbers.",
                "Seek the high ground.",
                "What ascends?",
            ),
            compute: first_highlighted,
        });
        r.register(QuestionDefinition {
            id: "value_below_mean".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Numbers]),
                pattern_types: patterns(&["below", "outlier"]),
                highlighted: true,
            },
            templates: Templates::all(
                "Identify the value below the average.",
                "Find the Falling Stone.",
                "Seek the depth.",
                "What descends?",
            ),
            compute: first_highlighted,
        });
        r.register(QuestionDefinition {
            id: "min_value".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Numbers]),
                pattern_types: None,
                highlighted: false,
            },
            templates: Templates::all(
                "What is the lowest value?",
                "Where is the floor of the dataset?",
                "Find the minimum.",
                "The lowest depth.",
            ),
            compute: stats_min,
        });
        r.register(QuestionDefinition {
            id: "max_value".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Numbers]),
                pattern_types: None,
                highlighted: false,
            },
            templates: Templates::all(
                "What is the highest value?",
                "Where is the peak?",
                "Find the maximum.",
                "The highest reach.",
            ),
            compute: stats_max,
        });

        // ── Categories / frequency ───────────────────────────────
        r.register(QuestionDefinition {
            id: "unique_category".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Categories, Numbers]),
                pattern_types: patterns(&["unique"]),
                highlighted: true,
            },
            templates: Templates::all(
                "Identify the unique value.",
                "Find the Lone Star.",
                "What stands alone?",
                "The singularity.",
            ),
            compute: first_highlighted,
        });
        r.register(QuestionDefinition {
            id: "frequency_count".into(),
            requires: QuestionRequirements {
                dataset_types: types(&[Categories, Numbers]),
                pattern_types: patterns(&["frequency"]),
                highlighted: true,
            },
            templates: Templates::all(
                "How many times does this value appear?",
                "Count the Echoes of the pattern.",
                "Count the repetition.",
                "Quantify the resonance.",
            ),
            compute: highlighted_count,
        });

        // ── Generic ──────────────────────────────────────────────
        r.register(QuestionDefinition {
            id: "highlight_value".into(),
            requires: QuestionRequirements {
                dataset_types: None,
                pattern_types: None,
                highlighted: true,
            },
            templates: Templates::all(
                "What is the value of the highlighted cell?",
                "Read the marked glyph.",
                "Identify target.",
                "Speak the mark.",
            ),
            compute: first_highlighted,
        });
        r.register(QuestionDefinition {
            id: "highlight_row".into(),
            requires: QuestionRequirements {
                dataset_types: None,
                pattern_types: None,
                highlighted: true,
            },
            templates: Templates::all(
                "Which row contains the highlighted cell?",
                "In which stratum does the mark lie?",
                "Row number.",
                "Locate the vector.",
            ),
            compute: highlighted_row,
        });

        r
    }
}
