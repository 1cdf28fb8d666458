//! Error types for column resolution.

use thiserror::Error;

use tagsheet_model::ColumnRole;

/// Errors from column resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColumnResolutionError {
    /// One or more required roles matched no column.
    #[error("could not locate the {}", describe_missing(.missing))]
    MissingRoles {
        /// Missing roles, placement ID first.
        missing: Vec<ColumnRole>,
    },
}

impl ColumnResolutionError {
    /// Roles that could not be located.
    pub fn missing_roles(&self) -> &[ColumnRole] {
        match self {
            Self::MissingRoles { missing } => missing,
        }
    }
}

fn describe_missing(roles: &[ColumnRole]) -> String {
    let labels: Vec<&str> = roles.iter().map(ColumnRole::label).collect();
    let noun = if labels.len() == 1 { "column" } else { "columns" };
    format!("{} {noun}", labels.join(" and "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_single_role() {
        let err = ColumnResolutionError::MissingRoles {
            missing: vec![ColumnRole::PlacementId],
        };
        assert_eq!(err.to_string(), "could not locate the placement ID column");
    }

    #[test]
    fn test_message_names_both_roles() {
        let err = ColumnResolutionError::MissingRoles {
            missing: vec![ColumnRole::PlacementId, ColumnRole::Tag],
        };
        assert_eq!(
            err.to_string(),
            "could not locate the placement ID and tag columns"
        );
        assert_eq!(err.missing_roles().len(), 2);
    }
}
