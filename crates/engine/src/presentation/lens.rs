use std::fmt;
use std::str::FromStr;

use hunter_compute::AnalyticsMetadata;
use hunter_core::{Dataset, HunterError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LensMode {
    Standard,
    Focus,
    Xray,
    Summary,
    Void,
}

impl LensMode {
    pub const ALL: [LensMode; 5] = [
        LensMode::Standard,
        LensMode::Focus,
        LensMode::Xray,
        LensMode::Summary,
        LensMode::Void,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            LensMode::Standard => "lens_standard",
            LensMode::Focus => "lens_focus",
            LensMode::Xray => "lens_xray",
            LensMode::Summary => "lens_summary",
            LensMode::Void => "lens_void",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LensMode::Standard => "Standard",
            LensMode::Focus => "Focus (Clusters)",
            LensMode::Xray => "X-Ray (Pivot)",
            LensMode::Summary => "Summary (Timeline)",
            LensMode::Void => "Void (Anomalies)",
        }
    }
}

impl fmt::Display for LensMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LensMode {
    type Err = HunterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("lens_").unwrap_or(&key);
        match key {
            "standard" => Ok(LensMode::Standard),
            "focus" => Ok(LensMode::Focus),
            "xray" | "x-ray" => Ok(LensMode::Xray),
            "summary" => Ok(LensMode::Summary),
            "void" => Ok(LensMode::Void),
            _ => Err(HunterError::InvalidConfig(format!("unknown lens: {s}"))),
        }
    }
}

/// How a client should rearrange the grid under a lens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LensTransform {
    None,
    Spacing {
        clusters: Vec<Vec<usize>>,
    },
    Pivot {
        #[serde(rename = "rowSums")]
        row_sums: Vec<f64>,
        #[serde(rename = "colSums")]
        col_sums: Vec<f64>,
    },
    Timeline {
        sequences: Vec<Vec<usize>>,
    },
    Zoom {
        outliers: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LensView {
    pub lens: String,
    pub name: String,
    pub message: String,
    /// Number of groups the lens reveals, where that makes sense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub indices: Vec<usize>,
    pub transform: LensTransform,
}

/// Per-row and per-column sums; non-numeric cells count as zero.
fn pivot_sums(dataset: &Dataset) -> (Vec<f64>, Vec<f64>) {
    let cols = dataset.grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut col_sums = vec![0.0; cols];
    let row_sums = dataset
        .grid
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    let v = cell.value.as_number().unwrap_or(0.0);
                    col_sums[c] += v;
                    v
                })
                .sum()
        })
        .collect();
    (row_sums, col_sums)
}

pub fn apply_lens(mode: LensMode, dataset: &Dataset, analytics: &AnalyticsMetadata) -> LensView {
    let (message, count, indices, transform) = match mode {
        LensMode::Standard => ("Neutral baseline view", None, Vec::new(), LensTransform::None),
        LensMode::Focus => (
            "Segmentation by cluster groups",
            Some(analytics.clusters.len()),
            analytics.clusters.concat(),
            LensTransform::Spacing {
                clusters: analytics.clusters.clone(),
            },
        ),
        LensMode::Xray => {
            let (row_sums, col_sums) = pivot_sums(dataset);
            (
                "Structural view with row/col aggregates",
                None,
                Vec::new(),
                LensTransform::Pivot { row_sums, col_sums },
            )
        }
        LensMode::Summary => (
            "Temporal emphasis / linear progression",
            Some(analytics.sequences.len()),
            analytics.sequences.concat(),
            LensTransform::Timeline {
                sequences: analytics.sequences.clone(),
            },
        ),
        LensMode::Void => (
            "Spotlight anomalies, dim normal cells",
            Some(analytics.outliers.indices.len()),
            analytics.outliers.indices.clone(),
            LensTransform::Zoom {
                outliers: analytics.outliers.indices.clone(),
            },
        ),
    };

    LensView {
        lens: mode.id().to_string(),
        name: mode.name().to_string(),
        message: message.to_string(),
        count,
        indices,
        transform,
    }
}
