use std::collections::HashSet;

use crate::error::OperationError;
use crate::interrupt::Interrupt;
use crate::topology::{Edge, VertexId};

use super::adjacency::AdjacencyMap;

/// One chain of selected edges discovered by a single walk.
///
/// Every vertex touched by the island's edges is recorded either as an
/// endpoint or as an interior vertex, and appears once in the visitation
/// order.
#[derive(Debug, Clone, Default)]
pub struct EdgeIsland {
    edges: Vec<Edge>,
    edge_set: HashSet<Edge>,
    interior: Vec<VertexId>,
    endpoints: Vec<VertexId>,
    branch_points: Vec<VertexId>,
    order: Vec<VertexId>,
    members: HashSet<VertexId>,
}

impl EdgeIsland {
    fn add_edge(&mut self, edge: Edge) {
        if self.edge_set.insert(edge) {
            self.edges.push(edge);
        }
    }

    fn visit(&mut self, v: VertexId) -> bool {
        if self.members.insert(v) {
            self.order.push(v);
            true
        } else {
            false
        }
    }

    fn add_endpoint(&mut self, v: VertexId) {
        if self.visit(v) {
            self.endpoints.push(v);
        }
    }

    fn add_interior(&mut self, v: VertexId, branching: bool) {
        if self.visit(v) {
            self.interior.push(v);
            if branching {
                self.branch_points.push(v);
            }
        }
    }

    /// Edges in the order the walk took them.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Vertices that are not endpoints.
    #[must_use]
    pub fn interior(&self) -> &[VertexId] {
        &self.interior
    }

    /// Path termini reached by the walk.
    #[must_use]
    pub fn endpoints(&self) -> &[VertexId] {
        &self.endpoints
    }

    /// Interior vertices where the selection forks (more than two selected
    /// edges). Only one fork was followed at each.
    #[must_use]
    pub fn branch_points(&self) -> &[VertexId] {
        &self.branch_points
    }

    /// All vertices in the order the walk visited them.
    #[must_use]
    pub fn visitation(&self) -> &[VertexId] {
        &self.order
    }

    /// First visited vertex.
    #[must_use]
    pub fn first(&self) -> Option<VertexId> {
        self.order.first().copied()
    }

    /// Last visited vertex.
    #[must_use]
    pub fn last(&self) -> Option<VertexId> {
        self.order.last().copied()
    }

    /// Returns `true` if the walk touched `v`.
    #[must_use]
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.members.contains(&v)
    }

    /// Returns `true` if `v` is a path terminus of this island.
    #[must_use]
    pub fn is_endpoint(&self, v: VertexId) -> bool {
        self.endpoints.contains(&v)
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of vertices, endpoints included.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// An island is a usable open path when it has exactly two endpoints
    /// and never passed through a fork.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.endpoints.len() == 2 && self.branch_points.is_empty()
    }
}

/// Splits a selection into islands.
///
/// Walks start at every endpoint not already part of an island, in endpoint
/// order. A connected component without any endpoint (a closed loop) is then
/// walked once from its first vertex in adjacency order and produces a single
/// island with no endpoints. Vertices a walk abandoned at a fork are not
/// walked again; their component is already reported through the island that
/// crossed the fork.
///
/// # Errors
///
/// Returns [`OperationError::Cancelled`] if `interrupt` fires.
pub fn partition(
    adjacency: &AdjacencyMap,
    endpoints: &[VertexId],
    interrupt: &Interrupt,
) -> Result<Vec<EdgeIsland>, OperationError> {
    let mut islands = Vec::new();
    let mut visited: HashSet<VertexId> = HashSet::new();

    for &start in endpoints {
        interrupt.check()?;
        if visited.contains(&start) {
            continue;
        }
        let island = walk(adjacency, start, interrupt)?;
        visited.extend(island.visitation().iter().copied());
        islands.push(island);
    }

    // components reachable from an endpoint are already reported
    let mut covered: HashSet<VertexId> = HashSet::new();
    for &start in endpoints {
        flood(adjacency, start, &mut covered, interrupt)?;
    }

    // one island per endpoint-free component
    for start in adjacency.vertices() {
        interrupt.check()?;
        if covered.contains(&start) {
            continue;
        }
        let island = walk(adjacency, start, interrupt)?;
        flood(adjacency, start, &mut covered, interrupt)?;
        islands.push(island);
    }

    Ok(islands)
}

/// Adds every vertex connected to `start` to `seen`.
fn flood(
    adjacency: &AdjacencyMap,
    start: VertexId,
    seen: &mut HashSet<VertexId>,
    interrupt: &Interrupt,
) -> Result<(), OperationError> {
    if !seen.insert(start) {
        return Ok(());
    }
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        interrupt.check()?;
        for edge in adjacency.incident(v) {
            let next = edge.other(v);
            if seen.insert(next) {
                stack.push(next);
            }
        }
    }
    Ok(())
}

/// Follows a single path from `start`.
///
/// At a fork the first incident edge leading to a vertex not yet in the
/// island is taken; the other branches are left for other walks.
fn walk(
    adjacency: &AdjacencyMap,
    start: VertexId,
    interrupt: &Interrupt,
) -> Result<EdgeIsland, OperationError> {
    let mut island = EdgeIsland::default();
    let mut current = start;

    loop {
        interrupt.check()?;
        let incident = adjacency.incident(current);
        match incident.len() {
            0 => {
                tracing::warn!(?current, "walk reached a vertex without selected edges");
                break;
            }
            1 => {
                island.add_endpoint(current);
                if current != start {
                    break;
                }
                let edge = incident[0];
                island.add_edge(edge);
                current = edge.other(current);
            }
            n => {
                island.add_interior(current, n > 2);
                let next = incident
                    .iter()
                    .find(|e| !island.contains_vertex(e.other(current)));
                let Some(&edge) = next else {
                    break;
                };
                island.add_edge(edge);
                current = edge.other(current);
            }
        }
    }

    Ok(island)
}
