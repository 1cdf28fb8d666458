//! Header-row detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tagsheet_model::CellValue;

/// How the first row of a sheet is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    /// Decide from the first row's contents.
    #[default]
    Auto,
    Present,
    Absent,
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Present => "present",
            Self::Absent => "absent",
        })
    }
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "present" | "yes" => Ok(Self::Present),
            "absent" | "no" => Ok(Self::Absent),
            other => Err(format!("unknown header mode '{other}'")),
        }
    }
}

impl HeaderMode {
    /// Whether `first_row` is a header row under this mode.
    pub fn is_header(self, first_row: &[CellValue]) -> bool {
        match self {
            Self::Present => true,
            Self::Absent => false,
            Self::Auto => looks_like_header(first_row),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RowStats {
    total: usize,
    non_empty: usize,
    numeric: usize,
    alpha: usize,
    data_marker: usize,
}

impl RowStats {
    fn ratio(count: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }

    fn non_empty_ratio(self) -> f64 {
        Self::ratio(self.non_empty, self.total)
    }

    fn numeric_ratio(self) -> f64 {
        Self::ratio(self.numeric, self.non_empty)
    }

    fn alpha_ratio(self) -> f64 {
        Self::ratio(self.alpha, self.non_empty)
    }
}

fn row_stats(row: &[CellValue]) -> RowStats {
    let mut stats = RowStats {
        total: row.len(),
        ..RowStats::default()
    };
    for cell in row {
        let text = match cell {
            CellValue::Missing => continue,
            CellValue::Number(_) | CellValue::Bool(_) => {
                stats.non_empty += 1;
                stats.numeric += 1;
                continue;
            }
            CellValue::Text(text) => text.trim(),
        };
        if text.is_empty() {
            continue;
        }
        stats.non_empty += 1;
        if text.parse::<f64>().is_ok() {
            stats.numeric += 1;
        }
        if text.chars().any(|ch| ch.is_ascii_alphabetic()) {
            stats.alpha += 1;
        }
        if is_data_marker(text) {
            stats.data_marker += 1;
        }
    }
    stats
}

/// Placement IDs and URLs only ever appear in data rows.
fn is_data_marker(value: &str) -> bool {
    let is_placement_like = value.len() >= 5 && value.bytes().all(|b| b.is_ascii_digit());
    is_placement_like || value.to_ascii_lowercase().contains("http")
}

fn looks_like_header(row: &[CellValue]) -> bool {
    let stats = row_stats(row);
    stats.data_marker == 0
        && stats.non_empty_ratio() >= 0.5
        && stats.alpha_ratio() >= 0.5
        && stats.numeric_ratio() <= 0.1
}
