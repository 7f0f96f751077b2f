use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HunterError, Result};
use crate::generation::GenerationRules;

/// The four kinds of grid a challenge can be built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Numbers,
    Dates,
    Categories,
    Times,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 4] = [
        DatasetKind::Numbers,
        DatasetKind::Dates,
        DatasetKind::Categories,
        DatasetKind::Times,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Numbers => "numbers",
            DatasetKind::Dates => "dates",
            DatasetKind::Categories => "categories",
            DatasetKind::Times => "times",
        }
    }

    /// Name of the runtime value type every cell of this kind must carry.
    pub fn value_type(&self) -> &'static str {
        match self {
            DatasetKind::Numbers => "number",
            DatasetKind::Dates => "date",
            DatasetKind::Categories => "category",
            DatasetKind::Times => "time",
        }
    }

    pub fn names() -> [&'static str; 4] {
        Self::ALL.map(|k| k.as_str())
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = HunterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "numbers" => Ok(DatasetKind::Numbers),
            "dates" => Ok(DatasetKind::Dates),
            "categories" => Ok(DatasetKind::Categories),
            "times" => Ok(DatasetKind::Times),
            other => Err(HunterError::UnknownDatasetType {
                name: other.to_string(),
                suggestion: None,
            }),
        }
    }
}

/// Typed cell value. The variant must agree with the owning dataset's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    /// Calendar date; serializes as ISO-8601 `YYYY-MM-DD`.
    Date(NaiveDate),
    Category(String),
    /// `HH:MM` clock string.
    Time(String),
}

/// Hashable identity of a cell value, used for frequency grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Number(u64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    pub fn kind(&self) -> DatasetKind {
        match self {
            CellValue::Number(_) => DatasetKind::Numbers,
            CellValue::Date(_) => DatasetKind::Dates,
            CellValue::Category(_) => DatasetKind::Categories,
            CellValue::Time(_) => DatasetKind::Times,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Category(s) | CellValue::Time(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn group_key(&self) -> ValueKey {
        match self {
            // -0.0 and 0.0 compare equal, so they must share a key.
            CellValue::Number(n) => ValueKey::Number(if *n == 0.0 { 0f64.to_bits() } else { n.to_bits() }),
            CellValue::Date(d) => ValueKey::Date(*d),
            CellValue::Category(s) | CellValue::Time(s) => ValueKey::Text(s.clone()),
        }
    }

    /// Check this value against the validator for `kind`.
    ///
    /// Returns a human-readable reason on failure.
    pub fn conforms_to(&self, kind: DatasetKind) -> std::result::Result<(), String> {
        if self.kind() != kind {
            return Err(format!(
                "expected {} value, found {}",
                kind.value_type(),
                self.kind().value_type()
            ));
        }
        match self {
            CellValue::Number(n) if !n.is_finite() => Err(format!("number is not finite: {}", n)),
            CellValue::Time(t) if !is_clock_shape(t) => {
                Err(format!("time '{}' does not match HH:MM", t))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Category(s) | CellValue::Time(s) => write!(f, "{}", s),
        }
    }
}

/// Render integral numbers without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// True iff `s` is exactly two digits, a colon, and two digits.
pub fn is_clock_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b':'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
}

/// Parse `HH:MM` into minutes past midnight.
pub fn parse_clock(s: &str) -> Option<u32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

/// Format minutes past midnight as zero-padded `HH:MM`.
pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: CellValue,
    /// Declared type; fixed at generation, never rewritten by injection.
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub tags: Vec<String>,
    pub display_value: String,
}

impl Cell {
    pub fn new(row: usize, col: usize, kind: DatasetKind, value: CellValue) -> Self {
        let display_value = value.to_string();
        Self {
            row,
            col,
            value,
            kind,
            tags: Vec::new(),
            display_value,
        }
    }

    /// Overwrite the value, keeping the display string in sync.
    pub fn set_value(&mut self, value: CellValue) {
        self.display_value = value.to_string();
        self.value = value;
    }

    pub fn tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn position(&self) -> CellPosition {
        CellPosition {
            row: self.row,
            col: self.col,
        }
    }

    pub fn validate(&self, expected: DatasetKind) -> Result<()> {
        if self.kind != expected {
            return Err(HunterError::DatasetIntegrity {
                row: self.row,
                col: self.col,
                reason: format!("cell declares type '{}', dataset is '{}'", self.kind, expected),
            });
        }
        self.value
            .conforms_to(expected)
            .map_err(|reason| HunterError::DatasetIntegrity {
                row: self.row,
                col: self.col,
                reason,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMeta {
    pub dataset_type: DatasetKind,
    pub rows: usize,
    pub cols: usize,
    pub value_type: String,
    pub generation_rules: GenerationRules,
    pub dataset_id: Uuid,
}

/// Row-major grid of typed cells plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub grid: Vec<Vec<Cell>>,
    pub meta: DatasetMeta,
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        self.meta.dataset_type
    }

    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    pub fn col_count(&self) -> usize {
        self.grid.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.grid.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells in flattened row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.grid.iter_mut().flatten()
    }

    pub fn cell(&self, pos: CellPosition) -> Option<&Cell> {
        self.grid.get(pos.row).and_then(|r| r.get(pos.col))
    }

    pub fn cell_mut(&mut self, pos: CellPosition) -> Option<&mut Cell> {
        self.grid.get_mut(pos.row).and_then(|r| r.get_mut(pos.col))
    }

    /// Position of the `idx`-th cell in row-major order.
    pub fn position_of(&self, idx: usize) -> Option<CellPosition> {
        let cols = self.col_count();
        if cols == 0 || idx >= self.len() {
            return None;
        }
        Some(CellPosition {
            row: idx / cols,
            col: idx % cols,
        })
    }

    pub fn flat_index(&self, pos: CellPosition) -> usize {
        pos.row * self.col_count() + pos.col
    }
}

/// Walk every cell and fail fast on the first type or shape violation.
pub fn validate_dataset(dataset: &Dataset) -> Result<()> {
    validate_cells(dataset.cells(), dataset.kind())
}

/// Validate only the given cells against `expected`.
pub fn validate_cells<'a>(
    cells: impl IntoIterator<Item = &'a Cell>,
    expected: DatasetKind,
) -> Result<()> {
    for cell in cells {
        cell.validate(expected)?;
    }
    Ok(())
}
