//! Column detectors: header rules and value predicates.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of leading data cells sampled per column.
pub const SAMPLE_SIZE: usize = 20;

/// Bare numeric identifier: digits only, at least five of them.
static PLACEMENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5,}$").expect("Invalid placement ID regex"));

/// Whether a sampled (lower-cased, stringified) value looks like a placement ID.
pub fn is_placement_id(sample: &str) -> bool {
    PLACEMENT_ID_REGEX.is_match(sample)
}

/// Value predicate that marks a column as holding ad tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagDetector {
    /// A sampled value contains `http`.
    Url,
    /// A sampled value contains `timestamp`, for sheets carrying literal
    /// macro placeholders instead of resolved URLs.
    TimestampMacro,
}

impl TagDetector {
    /// Default priority order.
    pub const DEFAULT_ORDER: [TagDetector; 2] = [Self::Url, Self::TimestampMacro];

    const fn needle(self) -> &'static str {
        match self {
            Self::Url => "http",
            Self::TimestampMacro => "timestamp",
        }
    }

    /// Whether one sampled (lower-cased) value satisfies this detector.
    pub fn matches(self, sample: &str) -> bool {
        sample.contains(self.needle())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::TimestampMacro => "timestamp",
        }
    }
}

impl fmt::Display for TagDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TagDetector {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "url" | "http" => Ok(Self::Url),
            "timestamp" | "timestamp_macro" => Ok(Self::TimestampMacro),
            other => Err(format!(
                "unknown tag detector '{other}' (expected url or timestamp)"
            )),
        }
    }
}

/// Header text rule for the placement ID column.
pub fn is_placement_header(label: &str) -> bool {
    let lowered = label.to_lowercase();
    lowered.contains("placement") && lowered.contains("id")
}

/// Header text rule for the tag column.
pub fn is_tag_header(label: &str) -> bool {
    label.to_lowercase().contains("tag")
}
