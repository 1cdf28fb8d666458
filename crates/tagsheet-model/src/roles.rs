use std::fmt;

use serde::{Deserialize, Serialize};

/// Role the column resolver assigns to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    PlacementId,
    Tag,
    Unresolved,
}

impl ColumnRole {
    /// Human-readable name used in user-facing messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PlacementId => "placement ID",
            Self::Tag => "tag",
            Self::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
