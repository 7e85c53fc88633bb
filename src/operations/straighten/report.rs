use std::fmt;

use super::island::EdgeIsland;
use super::validate::IslandStatus;

/// A non-fatal problem found during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Nothing usable was selected.
    EmptySelection,
    /// An island was skipped because it is not a simple open path.
    InvalidIsland {
        /// Discovery index of the island.
        index: usize,
        /// Why the island was rejected.
        status: IslandStatus,
        /// Number of endpoints the walk found.
        endpoints: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection => f.write_str("edge selection is empty"),
            Self::InvalidIsland {
                index,
                status,
                endpoints,
            } => write!(
                f,
                "edge island {index} skipped: {status} ({endpoints} endpoints)"
            ),
        }
    }
}

/// Summary of one straighten pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StraightenReport {
    /// Islands discovered by the partitioner.
    pub islands: usize,
    /// Islands whose vertices were moved.
    pub straightened: usize,
    /// Valid islands left alone because they have a single edge.
    pub single_edge: usize,
    /// Valid islands left alone because their endpoints coincide.
    pub degenerate: usize,
    /// Islands rejected by validation.
    pub invalid: usize,
    /// Selected edges dropped as self-loops or dangling.
    pub skipped_edges: usize,
    /// Non-fatal problems, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl StraightenReport {
    /// Returns `true` if any diagnostic was recorded.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Logs one island at `info` level.
pub(crate) fn log_island(index: usize, island: &EdgeIsland, status: IslandStatus) {
    let state = if status.is_valid() { "VALID" } else { "INVALID" };
    tracing::info!(
        index,
        state,
        edges = island.edge_count(),
        points = ?island.visitation(),
        endpoints = ?island.endpoints(),
        branch_points = ?island.branch_points(),
        "edge island"
    );
}
