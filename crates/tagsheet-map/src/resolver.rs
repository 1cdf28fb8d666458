//! Column resolver.
//!
//! Locates the placement ID and tag columns of a [`RawTable`]. Each role is
//! first looked up by header text; when that is not conclusive the leading
//! data cells of every column are sampled, left to right, and the first
//! column satisfying the role's predicate wins.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tagsheet_model::{ColumnRole, RawTable};

use crate::detect::{SAMPLE_SIZE, TagDetector, is_placement_header, is_placement_id, is_tag_header};
use crate::error::ColumnResolutionError;

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverOptions {
    /// Tag detectors in priority order.
    pub tag_detectors: Vec<TagDetector>,
    /// Match header labels before sampling values.
    pub use_headers: bool,
    /// Leading data cells sampled per column.
    pub sample_size: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            tag_detectors: TagDetector::DEFAULT_ORDER.to_vec(),
            use_headers: true,
            sample_size: SAMPLE_SIZE,
        }
    }
}

impl ResolverOptions {
    #[must_use]
    pub fn with_tag_detectors(mut self, detectors: Vec<TagDetector>) -> Self {
        self.tag_detectors = detectors;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, use_headers: bool) -> Self {
        self.use_headers = use_headers;
        self
    }
}

/// How a role's column was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detector")]
pub enum ResolutionStrategy {
    /// Unique header label match.
    Header,
    /// Sampled values matched the placement ID pattern.
    PlacementIdPattern,
    /// Sampled values matched a tag detector.
    TagValues(TagDetector),
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::PlacementIdPattern => f.write_str("values (placement ID pattern)"),
            Self::TagValues(detector) => write!(f, "values ({detector} detector)"),
        }
    }
}

/// A located column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    pub index: usize,
    pub strategy: ResolutionStrategy,
}

/// Result of a successful resolution. The two columns are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnResolution {
    pub placement_id: ResolvedColumn,
    pub tag: ResolvedColumn,
}

impl ColumnResolution {
    /// Role of every column of a table `width` columns wide.
    pub fn roles(&self, width: usize) -> Vec<ColumnRole> {
        (0..width).map(|column| self.role_of(column)).collect()
    }

    pub fn role_of(&self, column: usize) -> ColumnRole {
        if column == self.placement_id.index {
            ColumnRole::PlacementId
        } else if column == self.tag.index {
            ColumnRole::Tag
        } else {
            ColumnRole::Unresolved
        }
    }
}

/// Column resolver.
#[derive(Debug, Clone, Default)]
pub struct ColumnResolver {
    options: ResolverOptions,
}

impl ColumnResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolves both roles, or fails naming every role that matched no column.
    pub fn resolve(&self, table: &RawTable) -> Result<ColumnResolution, ColumnResolutionError> {
        let samples = self.sample_columns(table);

        let (placement_header, tag_header) = match table.header() {
            Some(labels) if self.options.use_headers => header_candidates(labels),
            _ => (None, None),
        };

        let placement_id = placement_header
            .map(|index| ResolvedColumn {
                index,
                strategy: ResolutionStrategy::Header,
            })
            .or_else(|| scan_placement(&samples, tag_header));

        let excluded = placement_id.map(|column| column.index);
        let tag = tag_header
            .filter(|index| Some(*index) != excluded)
            .map(|index| ResolvedColumn {
                index,
                strategy: ResolutionStrategy::Header,
            })
            .or_else(|| self.scan_tag(&samples, excluded));

        match (placement_id, tag) {
            (Some(placement_id), Some(tag)) => {
                info!(
                    placement_column = placement_id.index,
                    placement_strategy = %placement_id.strategy,
                    tag_column = tag.index,
                    tag_strategy = %tag.strategy,
                    "columns resolved"
                );
                Ok(ColumnResolution { placement_id, tag })
            }
            (placement_id, tag) => {
                let mut missing = Vec::new();
                if placement_id.is_none() {
                    missing.push(ColumnRole::PlacementId);
                }
                if tag.is_none() {
                    missing.push(ColumnRole::Tag);
                }
                Err(ColumnResolutionError::MissingRoles { missing })
            }
        }
    }

    /// Lower-cased, stringified leading data cells of every column.
    fn sample_columns(&self, table: &RawTable) -> Vec<Vec<String>> {
        (0..table.width())
            .map(|column| {
                table
                    .column(column)
                    .take(self.options.sample_size)
                    .map(|cell| cell.to_string().to_lowercase())
                    .collect()
            })
            .collect()
    }

    fn scan_tag(&self, samples: &[Vec<String>], excluded: Option<usize>) -> Option<ResolvedColumn> {
        samples
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != excluded)
            .find_map(|(index, values)| {
                let detector = self
                    .options
                    .tag_detectors
                    .iter()
                    .copied()
                    .find(|detector| values.iter().any(|value| detector.matches(value)))?;
                debug!(column = index, %detector, "tag column candidate");
                Some(ResolvedColumn {
                    index,
                    strategy: ResolutionStrategy::TagValues(detector),
                })
            })
    }
}

fn scan_placement(samples: &[Vec<String>], excluded: Option<usize>) -> Option<ResolvedColumn> {
    samples
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != excluded)
        .find(|(_, values)| values.iter().any(|value| is_placement_id(value)))
        .map(|(index, _)| ResolvedColumn {
            index,
            strategy: ResolutionStrategy::PlacementIdPattern,
        })
}

/// Unique header matches for each role; the tag rule skips the placement column.
fn header_candidates(labels: &[String]) -> (Option<usize>, Option<usize>) {
    let placement = unique_match(labels, |_, label| is_placement_header(label));
    let tag = unique_match(labels, |index, label| {
        Some(index) != placement && is_tag_header(label)
    });
    debug!(?placement, ?tag, "header candidates");
    (placement, tag)
}

fn unique_match(labels: &[String], rule: impl Fn(usize, &str) -> bool) -> Option<usize> {
    let mut matches = labels
        .iter()
        .enumerate()
        .filter(|(index, label)| rule(*index, label.as_str()))
        .map(|(index, _)| index);
    match (matches.next(), matches.next()) {
        (Some(index), None) => Some(index),
        _ => None,
    }
}

/// Resolves with the default options.
pub fn resolve(table: &RawTable) -> Result<ColumnResolution, ColumnResolutionError> {
    ColumnResolver::default().resolve(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagsheet_model::CellValue;

    fn table(header: &[&str], rows: &[&[&str]]) -> RawTable {
        let header = (!header.is_empty())
            .then(|| header.iter().map(|label| (*label).to_string()).collect());
        RawTable::new(
            header,
            rows.iter()
                .map(|row| row.iter().map(|cell| CellValue::text(*cell)).collect())
                .collect(),
        )
    }

    #[test]
    fn header_match_is_unique_per_role() {
        let labels = ["Placement ID", "Site", "VAST Tag"].map(String::from);
        assert_eq!(header_candidates(&labels), (Some(0), Some(2)));

        let ambiguous = ["Placement ID", "Tag Type", "VAST Tag"].map(String::from);
        assert_eq!(header_candidates(&ambiguous), (Some(0), None));
    }

    #[test]
    fn placement_header_containing_tag_is_not_a_tag_candidate() {
        let labels = ["Tag Placement ID", "Tag"].map(String::from);
        assert_eq!(header_candidates(&labels), (Some(0), Some(1)));
    }

    #[test]
    fn ambiguous_tag_header_falls_back_to_values() {
        let table = table(
            &["Placement ID", "Tag Type", "Tag URL"],
            &[&["12345", "display", "https://a.com/x"]],
        );
        let resolution = resolve(&table).unwrap();
        assert_eq!(resolution.placement_id.strategy, ResolutionStrategy::Header);
        assert_eq!(resolution.tag.index, 2);
        assert_eq!(
            resolution.tag.strategy,
            ResolutionStrategy::TagValues(TagDetector::Url)
        );
    }

    #[test]
    fn headers_can_be_ignored() {
        let table = table(
            &["Tag", "Placement ID", "Other"],
            &[&["x", "y", "12345"], &["https://a.com", "z", "67890"]],
        );
        let resolver = ColumnResolver::new(ResolverOptions::default().with_headers(false));
        let resolution = resolver.resolve(&table).unwrap();
        assert_eq!(resolution.placement_id.index, 2);
        assert_eq!(resolution.tag.index, 0);
    }

    #[test]
    fn roles_cover_every_column() {
        let resolution = ColumnResolution {
            placement_id: ResolvedColumn {
                index: 1,
                strategy: ResolutionStrategy::Header,
            },
            tag: ResolvedColumn {
                index: 2,
                strategy: ResolutionStrategy::Header,
            },
        };
        assert_eq!(
            resolution.roles(4),
            vec![
                ColumnRole::Unresolved,
                ColumnRole::PlacementId,
                ColumnRole::Tag,
                ColumnRole::Unresolved
            ]
        );
    }
}
