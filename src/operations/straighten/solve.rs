use std::collections::HashMap;

use crate::error::Result;
use crate::interrupt::Interrupt;
use crate::math::path_3d::{blend, cumulative_lengths, unit_direction};
use crate::math::{Point3, Vector3};
use crate::topology::{MeshPositions, VertexId};

use super::island::EdgeIsland;
use super::options::StraightenOptions;

/// Pre-edit positions of an island's vertices.
#[derive(Debug, Clone, Default)]
pub struct PositionSnapshot {
    positions: HashMap<VertexId, Point3>,
}

impl PositionSnapshot {
    /// Records the current position of every vertex of `island`.
    ///
    /// # Errors
    ///
    /// Returns an error if a vertex is missing from `mesh` or `interrupt` fires.
    pub fn capture<M>(island: &EdgeIsland, mesh: &M, interrupt: &Interrupt) -> Result<Self>
    where
        M: MeshPositions + ?Sized,
    {
        let mut positions = HashMap::with_capacity(island.vertex_count());
        for &v in island.visitation() {
            interrupt.check()?;
            positions.insert(v, mesh.position(v)?);
        }
        Ok(Self { positions })
    }

    /// Recorded position of `v`.
    #[must_use]
    pub fn get(&self, v: VertexId) -> Option<&Point3> {
        self.positions.get(&v)
    }

    /// Number of recorded vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// What the solver did with a valid island.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Vertices were moved.
    Straightened,
    /// A single edge has nothing to straighten.
    SingleEdge,
    /// The endpoints coincide, so there is no direction to straighten along.
    Degenerate,
}

/// Straightens one valid island in place.
///
/// Phases run in order: straighten, then uniform redistribution, then blend.
/// Each phase writes its positions before the next starts; nothing is rolled
/// back if a later phase is interrupted.
///
/// # Errors
///
/// Returns an error if an island vertex is missing from `mesh` or `interrupt`
/// fires.
pub fn solve<M>(
    island: &EdgeIsland,
    mesh: &mut M,
    options: &StraightenOptions,
    interrupt: &Interrupt,
) -> Result<SolveOutcome>
where
    M: MeshPositions + ?Sized,
{
    if island.edge_count() <= 1 {
        return Ok(SolveOutcome::SingleEdge);
    }
    let (Some(first), Some(last)) = (island.first(), island.last()) else {
        return Ok(SolveOutcome::Degenerate);
    };
    if first == last {
        return Ok(SolveOutcome::Degenerate);
    }

    let snapshot = if options.morph_enabled {
        Some(PositionSnapshot::capture(island, &*mesh, interrupt)?)
    } else {
        None
    };

    let origin = mesh.position(first)?;
    let Ok(direction) = unit_direction(&origin, &mesh.position(last)?) else {
        tracing::debug!(?first, ?last, "edge island endpoints coincide");
        return Ok(SolveOutcome::Degenerate);
    };

    straighten(island, mesh, origin, direction, interrupt)?;

    if options.uniform_distribution {
        redistribute(island, mesh, origin, direction, interrupt)?;
    }

    if let Some(snapshot) = snapshot {
        morph(island, mesh, &snapshot, options, interrupt)?;
    }

    Ok(SolveOutcome::Straightened)
}

/// Places every interior vertex on the line through `origin` along
/// `direction`, at its original arc length from the first vertex.
fn straighten<M>(
    island: &EdgeIsland,
    mesh: &mut M,
    origin: Point3,
    direction: Vector3,
    interrupt: &Interrupt,
) -> Result<()>
where
    M: MeshPositions + ?Sized,
{
    let order = island.visitation();
    let mut original = Vec::with_capacity(order.len());
    for &v in order {
        interrupt.check()?;
        original.push(mesh.position(v)?);
    }

    let lengths = cumulative_lengths(&original);
    for (&v, &length) in order.iter().zip(&lengths) {
        interrupt.check()?;
        if island.is_endpoint(v) {
            continue;
        }
        mesh.set_position(v, origin + direction * length)?;
    }
    Ok(())
}

/// Respaces interior vertices at equal intervals between the endpoints.
fn redistribute<M>(
    island: &EdgeIsland,
    mesh: &mut M,
    origin: Point3,
    direction: Vector3,
    interrupt: &Interrupt,
) -> Result<()>
where
    M: MeshPositions + ?Sized,
{
    let order = island.visitation();
    let [_, interior @ .., last] = order else {
        return Ok(());
    };
    let span = (mesh.position(*last)? - origin).norm();
    #[allow(clippy::cast_precision_loss)]
    let segment = span / (order.len() - 1) as f64;

    for (k, &v) in interior.iter().enumerate() {
        interrupt.check()?;
        #[allow(clippy::cast_precision_loss)]
        let offset = segment * (k + 1) as f64;
        mesh.set_position(v, origin + direction * offset)?;
    }
    Ok(())
}

/// Pulls every vertex back towards its snapshot by the configured factor.
fn morph<M>(
    island: &EdgeIsland,
    mesh: &mut M,
    snapshot: &PositionSnapshot,
    options: &StraightenOptions,
    interrupt: &Interrupt,
) -> Result<()>
where
    M: MeshPositions + ?Sized,
{
    let factor = options.morph_factor();
    for &v in island.visitation() {
        interrupt.check()?;
        let Some(before) = snapshot.get(v) else {
            continue;
        };
        let after = mesh.position(v)?;
        mesh.set_position(v, blend(before, &after, factor))?;
    }
    Ok(())
}
