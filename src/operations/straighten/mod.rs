pub mod adjacency;
pub mod island;
mod options;
mod report;
pub mod solve;
pub mod validate;

pub use island::EdgeIsland;
pub use options::{Severity, StraightenOptions};
pub use report::{Diagnostic, StraightenReport};
pub use solve::{PositionSnapshot, SolveOutcome};
pub use validate::{IslandStatus, Verdict};

use crate::error::{OperationError, Result};
use crate::interrupt::Interrupt;
use crate::topology::{EdgeSelection, MeshPositions};

/// Straightens every chain of selected edges.
///
/// The selection is split into edge islands. Each island that is a simple
/// open path has its interior vertices moved onto the line between its two
/// endpoints, optionally respaced evenly and blended with the original
/// positions.
///
/// Islands are processed in discovery order and their positions are written
/// as soon as they are computed. A pass that stops early, through
/// cancellation or a [`Severity::Fail`] policy, keeps every edit made before
/// that point.
#[derive(Debug)]
pub struct Straighten {
    selection: EdgeSelection,
    options: StraightenOptions,
}

impl Straighten {
    /// Creates a new `Straighten` operation.
    #[must_use]
    pub fn new(selection: EdgeSelection, options: StraightenOptions) -> Self {
        Self { selection, options }
    }

    /// Discovers the edge islands of the selection without moving anything.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Cancelled` if `interrupt` fires.
    pub fn islands<M>(&self, mesh: &M, interrupt: &Interrupt) -> Result<Vec<EdgeIsland>>
    where
        M: MeshPositions + ?Sized,
    {
        let extraction = adjacency::extract(&self.selection, mesh, interrupt)?;
        Ok(island::partition(
            &extraction.adjacency,
            &extraction.endpoints,
            interrupt,
        )?)
    }

    /// Executes the pass, moving vertices of `mesh` in place.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidParameter` for unusable options,
    /// `OperationError::Cancelled` if `interrupt` fires,
    /// `OperationError::EmptySelection` for an empty selection under
    /// [`Severity::Fail`], and `OperationError::InvalidIsland` for the first
    /// invalid island under [`Severity::Fail`].
    #[tracing::instrument(skip_all, fields(edges = self.selection.len()))]
    pub fn execute<M>(&self, mesh: &mut M, interrupt: &Interrupt) -> Result<StraightenReport>
    where
        M: MeshPositions + ?Sized,
    {
        self.options.validate()?;
        let mut report = StraightenReport::default();

        // Step 1: Build adjacency and endpoints.
        let extraction = adjacency::extract(&self.selection, &*mesh, interrupt)?;
        report.skipped_edges = extraction.skipped;
        if extraction.adjacency.is_empty() {
            self.missing_selection(&mut report)?;
            return Ok(report);
        }

        // Step 2: Split into islands.
        let islands = island::partition(&extraction.adjacency, &extraction.endpoints, interrupt)?;
        report.islands = islands.len();
        tracing::debug!(
            edges = extraction.adjacency.edge_count(),
            endpoints = extraction.endpoints.len(),
            islands = islands.len(),
            "partitioned edge selection"
        );

        // Step 3 and 4: Validate and solve each island in order.
        for (index, island) in islands.iter().enumerate() {
            interrupt.check()?;

            if self.options.report_islands {
                report::log_island(index, island, IslandStatus::classify(island));
            }

            match validate::check_island(index, island, self.options.island_error_severity)? {
                Verdict::Process => {}
                Verdict::Skip(diagnostic) => {
                    report.invalid += 1;
                    report.diagnostics.extend(diagnostic);
                    continue;
                }
            }

            match solve::solve(island, mesh, &self.options, interrupt)? {
                SolveOutcome::Straightened => report.straightened += 1,
                SolveOutcome::SingleEdge => report.single_edge += 1,
                SolveOutcome::Degenerate => report.degenerate += 1,
            }
        }

        tracing::debug!(
            straightened = report.straightened,
            invalid = report.invalid,
            "straighten pass finished"
        );
        Ok(report)
    }

    fn missing_selection(&self, report: &mut StraightenReport) -> Result<()> {
        match self.options.group_missing_severity {
            Severity::Ignore => Ok(()),
            Severity::Warn => {
                tracing::warn!("edge selection is empty");
                report.diagnostics.push(Diagnostic::EmptySelection);
                Ok(())
            }
            Severity::Fail => Err(OperationError::EmptySelection.into()),
        }
    }
}
