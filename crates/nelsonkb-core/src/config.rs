//! Run configuration for the enrichment pipeline.

use serde::{Deserialize, Serialize};

/// What to do with a row the CSV reader cannot deserialize.
///
/// Heuristic failures inside a well-formed row never reach this policy;
/// they degrade to empty/default field values. The policy only governs rows
/// the reader itself rejects (bad quoting, wrong field count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorPolicy {
    /// Substitute an all-empty record and keep going.
    #[default]
    DefaultFill,
    /// Drop the row and log a warning.
    Skip,
    /// Abort the whole run on the first bad row.
    Strict,
}

impl std::str::FromStr for RowErrorPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "default" | "default_fill" => Ok(Self::DefaultFill),
            "skip" => Ok(Self::Skip),
            "strict" => Ok(Self::Strict),
            other => Err(crate::Error::Config(format!(
                "unknown row error policy: {other} (expected default, skip, or strict)"
            ))),
        }
    }
}

/// Options for one enrichment run.
#[derive(Debug, Clone, Default)]
pub struct EnrichOptions {
    /// Row-level error handling.
    pub policy: RowErrorPolicy,
    /// Process at most this many rows (testing aid).
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "skip".parse::<RowErrorPolicy>().unwrap(),
            RowErrorPolicy::Skip
        );
        assert_eq!(
            "default".parse::<RowErrorPolicy>().unwrap(),
            RowErrorPolicy::DefaultFill
        );
        assert!("lenient".parse::<RowErrorPolicy>().is_err());
    }

    #[test]
    fn test_default_policy_is_default_fill() {
        assert_eq!(RowErrorPolicy::default(), RowErrorPolicy::DefaultFill);
    }
}
