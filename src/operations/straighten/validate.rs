use std::fmt;

use crate::error::OperationError;

use super::island::EdgeIsland;
use super::options::Severity;
use super::report::Diagnostic;

/// Topological classification of an island.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IslandStatus {
    /// A simple open path with two endpoints.
    Valid,
    /// No endpoints: the selection closes on itself.
    Closed,
    /// One endpoint: the walk stopped without reaching another terminus.
    Unterminated,
    /// The walk passed a fork, or found more than two endpoints.
    Branching,
}

impl IslandStatus {
    /// Classifies an island.
    ///
    /// A path that crossed a fork is `Branching` even with two endpoints:
    /// only one arm of the fork was followed, so the result depends on edge
    /// order.
    #[must_use]
    pub fn classify(island: &EdgeIsland) -> Self {
        match island.endpoints().len() {
            0 => Self::Closed,
            1 => Self::Unterminated,
            2 if island.branch_points().is_empty() => Self::Valid,
            _ => Self::Branching,
        }
    }

    /// Returns `true` for [`IslandStatus::Valid`].
    #[must_use]
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

impl fmt::Display for IslandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "open path",
            Self::Closed => "closed loop",
            Self::Unterminated => "unterminated path",
            Self::Branching => "branching",
        })
    }
}

/// What the pass does with an island.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Hand the island to the solver.
    Process,
    /// Leave the island alone, optionally reporting why.
    Skip(Option<Diagnostic>),
}

/// Applies the invalid-island policy to one island.
///
/// # Errors
///
/// Returns [`OperationError::InvalidIsland`] if the island is invalid and
/// `severity` is [`Severity::Fail`].
pub fn check_island(
    index: usize,
    island: &EdgeIsland,
    severity: Severity,
) -> Result<Verdict, OperationError> {
    let status = IslandStatus::classify(island);
    if status.is_valid() {
        return Ok(Verdict::Process);
    }

    let endpoints = island.endpoints().len();
    match severity {
        Severity::Ignore => {
            tracing::debug!(index, %status, "ignoring invalid edge island");
            Ok(Verdict::Skip(None))
        }
        Severity::Warn => {
            tracing::warn!(index, %status, endpoints, "skipping invalid edge island");
            Ok(Verdict::Skip(Some(Diagnostic::InvalidIsland {
                index,
                status,
                endpoints,
            })))
        }
        Severity::Fail => Err(OperationError::InvalidIsland { index, endpoints }),
    }
}
