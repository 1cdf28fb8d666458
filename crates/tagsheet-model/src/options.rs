//! Per-invocation options for tag normalization.

use serde::{Deserialize, Serialize};

/// Policy flags threaded unchanged into every `clean` call for a sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationContext {
    /// Rewrite child-directed-treatment and TFUA parameters on Google
    /// Campaign Manager tags.
    #[serde(default)]
    pub apply_kids_compliance: bool,
}

impl NormalizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kids_compliance(mut self, enable: bool) -> Self {
        self.apply_kids_compliance = enable;
        self
    }
}
