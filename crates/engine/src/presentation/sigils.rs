use hunter_compute::AnalyticsMetadata;
use serde::Serialize;
use serde_json::{json, Value};

/// Strength and supporting data of a sigil that manifested.
#[derive(Debug, Clone, PartialEq)]
pub struct SigilReading {
    pub strength: f64,
    pub metadata: Value,
}

impl SigilReading {
    fn new(strength: f64, metadata: Value) -> Option<Self> {
        Some(Self { strength, metadata })
    }
}

pub type SigilCompute = fn(&AnalyticsMetadata) -> Option<SigilReading>;

#[derive(Clone, Copy)]
pub struct SigilDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub hint: &'static str,
    pub description: &'static str,
    pub compute: SigilCompute,
}

impl std::fmt::Debug for SigilDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigilDefinition").field("id", &self.id).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActiveSigil {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub hint: String,
    pub description: String,
    pub strength: f64,
    pub metadata: Value,
}

// ── Readings ─────────────────────────────────────────────────

fn peak(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let max = a.sigil_support.max_value?;
    SigilReading::new(1.0, json!({ "value": max }))
}

fn valley(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let min = a.sigil_support.min_value?;
    SigilReading::new(1.0, json!({ "value": min }))
}

fn unique(a: &AnalyticsMetadata) -> Option<SigilReading> {
    match a.unique.indices.as_slice() {
        [only] => SigilReading::new(1.0, json!({ "index": only })),
        _ => None,
    }
}

fn frequency(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let n = a.frequency.repeated.len();
    if n == 0 {
        return None;
    }
    SigilReading::new((n as f64 * 0.2).min(1.0), json!({ "count": n }))
}

fn weekend(a: &AnalyticsMetadata) -> Option<SigilReading> {
    if a.weekends.indices.is_empty() {
        return None;
    }
    SigilReading::new(1.0, json!({ "indices": a.weekends.indices }))
}

fn sequence(a: &AnalyticsMetadata) -> Option<SigilReading> {
    if a.sequences.is_empty() {
        return None;
    }
    let longest = a.longest_sequence();
    SigilReading::new(
        (longest as f64 * 0.3).min(1.0),
        json!({ "longestLength": longest, "count": a.sequences.len() }),
    )
}

fn outlier(a: &AnalyticsMetadata) -> Option<SigilReading> {
    if a.outliers.indices.is_empty() {
        return None;
    }
    SigilReading::new(1.0, json!({ "indices": a.outliers.indices }))
}

fn date_mark(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let earliest = a.date_stats.earliest?;
    SigilReading::new(
        1.0,
        json!({ "earliest": earliest.to_string(), "latest": a.date_stats.latest.map(|d| d.to_string()) }),
    )
}

fn never(_: &AnalyticsMetadata) -> Option<SigilReading> {
    None
}

fn balance(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let (above, below) = (a.distribution.above.len(), a.distribution.below.len());
    if above == 0 || below == 0 {
        return None;
    }
    SigilReading::new(0.8, json!({ "aboveCount": above, "belowCount": below }))
}

fn cluster(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let n = a.clusters.len();
    if n == 0 {
        return None;
    }
    SigilReading::new((n as f64 * 0.5).min(1.0), json!({ "count": n }))
}

fn trend(a: &AnalyticsMetadata) -> Option<SigilReading> {
    if a.sequences.is_empty() {
        return None;
    }
    let longest = a.longest_sequence();
    SigilReading::new((longest as f64 / 5.0).min(1.0), json!({ "maxLength": longest }))
}

fn symmetry(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let (above, below) = (a.distribution.above.len(), a.distribution.below.len());
    let diff = above.abs_diff(below);
    if above + below == 0 || diff > 1 {
        return None;
    }
    SigilReading::new(0.9, json!({ "diff": diff }))
}

fn entropy(a: &AnalyticsMetadata) -> Option<SigilReading> {
    let std = a.stats()?.std;
    if std <= 10.0 {
        return None;
    }
    SigilReading::new((std / 50.0).min(1.0), json!({ "stdDev": std }))
}

pub const SIGIL_CODEX: [SigilDefinition; 14] = [
    SigilDefinition {
        id: "sigil_peak",
        name: "The Peak",
        icon: "🗻",
        hint: "Max Value / Largest number",
        description: "A single value towers above the rest, marking the summit of the dataset.",
        compute: peak,
    },
    SigilDefinition {
        id: "sigil_valley",
        name: "The Valley",
        icon: "🕳️",
        hint: "Min Value / Smallest number",
        description: "A depth revealed; the lowest point in the landscape of data.",
        compute: valley,
    },
    SigilDefinition {
        id: "sigil_unique",
        name: "The Solitary",
        icon: "⭐",
        hint: "Unique / One-of-a-kind",
        description: "A singular entity stands apart, defying the common pattern.",
        compute: unique,
    },
    SigilDefinition {
        id: "sigil_frequency",
        name: "The Echo",
        icon: "🔁",
        hint: "Frequency / Repetition",
        description: "Voices in the data repeat themselves, forming a rhythmic chant.",
        compute: frequency,
    },
    SigilDefinition {
        id: "sigil_weekend",
        name: "The Respite",
        icon: "🛌",
        hint: "Weekend / Days of rest",
        description: "Time pauses for breath; days of rest emerge from the calendar.",
        compute: weekend,
    },
    SigilDefinition {
        id: "sigil_sequence",
        name: "The Chain",
        icon: "🔗",
        hint: "Sequence / Range",
        description: "Order emerges from chaos as values link together in succession.",
        compute: sequence,
    },
    SigilDefinition {
        id: "sigil_outlier",
        name: "The Spark",
        icon: "⚡",
        hint: "Outlier / Anomaly",
        description: "A rogue element breaks the established norm, demanding attention.",
        compute: outlier,
    },
    SigilDefinition {
        id: "sigil_date_mark",
        name: "The Epoch",
        icon: "📅",
        hint: "Identify the highlighted date",
        description: "The grid is not merely numbers, but moments in time.",
        compute: date_mark,
    },
    SigilDefinition {
        id: "sigil_fallback",
        name: "The Void",
        icon: "🔮",
        hint: "Analyze the grid.",
        description: "Silence reigns. No clear signs have yet revealed themselves.",
        compute: never,
    },
    SigilDefinition {
        id: "sigil_balance",
        name: "The Scales",
        icon: "⚖️",
        hint: "Above/Below Mean Balance",
        description: "Opposing forces exist in equilibrium; the high and low coexist.",
        compute: balance,
    },
    SigilDefinition {
        id: "sigil_cluster",
        name: "The Constellation",
        icon: "🧩",
        hint: "Cluster / Adjacency Pattern",
        description: "Data points gather together, forming a tight-knit community.",
        compute: cluster,
    },
    SigilDefinition {
        id: "sigil_trend",
        name: "The Flow",
        icon: "📈",
        hint: "Trend / Directional Flow",
        description: "A current runs through the numbers, moving with purpose.",
        compute: trend,
    },
    SigilDefinition {
        id: "sigil_symmetry",
        name: "The Mirror",
        icon: "🔷",
        hint: "Symmetry / Mirrored Values",
        description: "One side reflects the other; a perfect balance of form.",
        compute: symmetry,
    },
    SigilDefinition {
        id: "sigil_entropy",
        name: "The Storm",
        icon: "🌪️",
        hint: "Variance / Chaos",
        description: "Turbulence disrupts the order; the values scatter wildly.",
        compute: entropy,
    },
];

/// Every sigil whose reading manifests, in codex order.
pub fn compute_sigils(analytics: &AnalyticsMetadata) -> Vec<ActiveSigil> {
    SIGIL_CODEX
        .iter()
        .filter_map(|def| {
            let reading = (def.compute)(analytics)?;
            Some(ActiveSigil {
                id: def.id.to_string(),
                name: def.name.to_string(),
                icon: def.icon.to_string(),
                hint: def.hint.to_string(),
                description: def.description.to_string(),
                strength: reading.strength,
                metadata: reading.metadata,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_compute::PopulationStats;

    fn ids(a: &AnalyticsMetadata) -> Vec<String> {
        compute_sigils(a).into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn empty_analytics_manifest_nothing() {
        assert!(compute_sigils(&AnalyticsMetadata::default()).is_empty());
    }

    #[test]
    fn unique_needs_exactly_one() {
        let mut a = AnalyticsMetadata::default();
        a.unique.indices = vec![3];
        assert_eq!(ids(&a), vec!["sigil_unique"]);
        a.unique.indices = vec![3, 5];
        assert!(ids(&a).is_empty());
    }

    #[test]
    fn strengths_are_capped() {
        let mut a = AnalyticsMetadata::default();
        a.frequency.repeated = vec![0, 1, 2];
        a.sequences = vec![vec![0, 1, 2]];
        a.clusters = vec![vec![0, 1], vec![2, 3], vec![4, 5]];
        let sigils = compute_sigils(&a);
        let strength = |id: &str| sigils.iter().find(|s| s.id == id).unwrap().strength;
        assert!((strength("sigil_frequency") - 0.6).abs() < 1e-9);
        assert!((strength("sigil_sequence") - 0.9).abs() < 1e-9);
        assert!((strength("sigil_trend") - 0.6).abs() < 1e-9);
        assert_eq!(strength("sigil_cluster"), 1.0);
    }

    #[test]
    fn balance_and_symmetry_read_distribution() {
        let mut a = AnalyticsMetadata::default();
        a.distribution.above = vec![0, 1];
        a.distribution.below = vec![2];
        assert_eq!(ids(&a), vec!["sigil_balance", "sigil_symmetry"]);
        a.distribution.below.clear();
        assert!(ids(&a).is_empty());
    }

    #[test]
    fn entropy_only_above_threshold() {
        let mut a = AnalyticsMetadata::default();
        a.lens.stats = Some(PopulationStats {
            min: 0.0,
            max: 100.0,
            mean: 50.0,
            std: 25.0,
            count: 9,
        });
        let storm = compute_sigils(&a)
            .into_iter()
            .find(|s| s.id == "sigil_entropy")
            .unwrap();
        assert!((storm.strength - 0.5).abs() < 1e-9);

        a.lens.stats.as_mut().unwrap().std = 10.0;
        assert!(!ids(&a).contains(&"sigil_entropy".to_string()));
    }

    #[test]
    fn fallback_never_manifests() {
        let fallback = SIGIL_CODEX.iter().find(|s| s.id == "sigil_fallback").unwrap();
        let mut a = AnalyticsMetadata::default();
        a.outliers.indices = vec![1];
        assert!((fallback.compute)(&a).is_none());
    }
}
