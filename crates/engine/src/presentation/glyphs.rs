use hunter_compute::AnalyticsMetadata;
use hunter_core::DatasetKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSource {
    Outliers,
    Above,
    Below,
    Repeated,
    Unique,
    Weekends,
    Sequences,
    Clusters,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub css_class: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub strength: f64,
    #[serde(skip)]
    pub source: GlyphSource,
}

pub const GLYPH_CODEX: [GlyphDefinition; 8] = [
    GlyphDefinition {
        id: "outlier",
        name: "Broken Pattern",
        icon: "⚡",
        css_class: "fmt-outlier",
        description: "Highlights values that defy the expected structure.",
        category: "anomaly",
        strength: 1.0,
        source: GlyphSource::Outliers,
    },
    GlyphDefinition {
        id: "above",
        name: "Rising Flame",
        icon: "🔥",
        css_class: "fmt-above",
        description: "Marks values rising above the dataset's center.",
        category: "distribution",
        strength: 1.0,
        source: GlyphSource::Above,
    },
    GlyphDefinition {
        id: "below",
        name: "Falling Stone",
        icon: "🌑",
        css_class: "fmt-below",
        description: "Marks values sinking below the dataset's center.",
        category: "distribution",
        strength: 1.0,
        source: GlyphSource::Below,
    },
    GlyphDefinition {
        id: "frequency",
        name: "Echo",
        icon: "〰",
        css_class: "fmt-frequency",
        description: "Highlights values that repeat across the grid.",
        category: "frequency",
        strength: 1.0,
        source: GlyphSource::Repeated,
    },
    GlyphDefinition {
        id: "unique",
        name: "Lone Star",
        icon: "★",
        css_class: "fmt-unique",
        description: "Marks values that stand alone in the dataset.",
        category: "uniqueness",
        strength: 1.5,
        source: GlyphSource::Unique,
    },
    GlyphDefinition {
        id: "weekend",
        name: "Twin Suns",
        icon: "☀",
        css_class: "fmt-weekend",
        description: "Reveals the resting days of the temporal cycle.",
        category: "temporal",
        strength: 1.0,
        source: GlyphSource::Weekends,
    },
    GlyphDefinition {
        id: "sequence",
        name: "Path of the Hunter",
        icon: "👣",
        css_class: "fmt-sequence",
        description: "Traces sequential connections through the data.",
        category: "pattern",
        strength: 1.2,
        source: GlyphSource::Sequences,
    },
    GlyphDefinition {
        id: "cluster",
        name: "Gathering",
        icon: "❄",
        css_class: "fmt-cluster",
        description: "Highlights tight groupings of data.",
        category: "pattern",
        strength: 1.1,
        source: GlyphSource::Clusters,
    },
];

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGlyph {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub css_class: String,
    pub description: String,
    pub category: String,
    pub strength: f64,
    pub indices: Vec<usize>,
}

impl GlyphDefinition {
    fn indices(&self, analytics: &AnalyticsMetadata, kind: DatasetKind) -> Vec<usize> {
        match self.source {
            GlyphSource::Outliers => analytics.outliers.indices.clone(),
            GlyphSource::Above => analytics.distribution.above.clone(),
            GlyphSource::Below => analytics.distribution.below.clone(),
            GlyphSource::Repeated => analytics.frequency.repeated.clone(),
            GlyphSource::Unique => analytics.unique.indices.clone(),
            GlyphSource::Weekends if kind == DatasetKind::Dates => analytics.weekends.indices.clone(),
            GlyphSource::Weekends => Vec::new(),
            GlyphSource::Sequences => analytics.sequences.concat(),
            GlyphSource::Clusters => analytics.clusters.concat(),
        }
    }
}

/// Every glyph whose index list is non-empty, in codex order.
pub fn compute_glyphs(analytics: &AnalyticsMetadata, kind: DatasetKind) -> Vec<ActiveGlyph> {
    GLYPH_CODEX
        .iter()
        .filter_map(|def| {
            let indices = def.indices(analytics, kind);
            if indices.is_empty() {
                return None;
            }
            Some(ActiveGlyph {
                id: def.id.to_string(),
                name: def.name.to_string(),
                icon: def.icon.to_string(),
                css_class: def.css_class.to_string(),
                description: def.description.to_string(),
                category: def.category.to_string(),
                strength: def.strength,
                indices,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_empty_sources_activate() {
        let mut a = AnalyticsMetadata::default();
        a.outliers.indices = vec![4];
        a.distribution.above = vec![1, 4];
        a.clusters = vec![vec![0, 1], vec![6, 7, 8]];
        let ids: Vec<String> = compute_glyphs(&a, DatasetKind::Numbers)
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec!["outlier", "above", "cluster"]);

        let cluster = compute_glyphs(&a, DatasetKind::Numbers).pop().unwrap();
        assert_eq!(cluster.indices, vec![0, 1, 6, 7, 8]);
        assert_eq!(cluster.strength, 1.1);
    }

    #[test]
    fn weekend_glyph_is_dates_only() {
        let mut a = AnalyticsMetadata::default();
        a.weekends.indices = vec![2];
        assert!(compute_glyphs(&a, DatasetKind::Numbers).is_empty());
        let g = compute_glyphs(&a, DatasetKind::Dates);
        assert_eq!(g.len(), 1);
        assert_eq!(g[0].css_class, "fmt-weekend");
    }
}
