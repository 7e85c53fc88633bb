use std::collections::HashMap;

use crate::error::OperationError;
use crate::interrupt::Interrupt;
use crate::topology::{Edge, EdgeSelection, MeshPositions, VertexId};

/// Vertex to incident selected edges.
///
/// Vertices enumerate in the order they were first seen in the selection, and
/// each incident set enumerates in insertion order. Every edge appears in the
/// sets of exactly its two vertices.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyMap {
    index: HashMap<VertexId, usize>,
    entries: Vec<(VertexId, Vec<Edge>)>,
    edge_count: usize,
}

impl AdjacencyMap {
    /// Adds `edge` to the incident set of both of its vertices.
    ///
    /// Returns `false` if the edge was already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        let (a, b) = edge.vertices();
        let added = self.insert_incident(a, edge);
        if added {
            self.insert_incident(b, edge);
            self.edge_count += 1;
        }
        added
    }

    fn insert_incident(&mut self, v: VertexId, edge: Edge) -> bool {
        let slot = *self.index.entry(v).or_insert_with(|| {
            self.entries.push((v, Vec::new()));
            self.entries.len() - 1
        });
        let incident = &mut self.entries[slot].1;
        if incident.contains(&edge) {
            return false;
        }
        incident.push(edge);
        true
    }

    /// Edges incident to `v`; empty if `v` has none selected.
    #[must_use]
    pub fn incident(&self, v: VertexId) -> &[Edge] {
        self.index
            .get(&v)
            .map_or(&[][..], |&slot| self.entries[slot].1.as_slice())
    }

    /// Number of selected edges touching `v`.
    #[must_use]
    pub fn degree(&self, v: VertexId) -> usize {
        self.incident(v).len()
    }

    /// Vertices in first-seen order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.entries.iter().map(|(v, _)| *v)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of vertices touched by the selection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no edge survived extraction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of [`extract`].
#[derive(Debug, Default, Clone)]
pub struct Extraction {
    pub adjacency: AdjacencyMap,
    /// Vertices with exactly one incident edge, in adjacency order.
    pub endpoints: Vec<VertexId>,
    /// Input edges dropped as degenerate or malformed.
    pub skipped: usize,
}

/// Builds the adjacency map and endpoint set of a selection.
///
/// Self-loops and edges referencing vertices missing from `mesh` are dropped
/// without error.
///
/// # Errors
///
/// Returns [`OperationError::Cancelled`] if `interrupt` fires.
pub fn extract<M>(
    selection: &EdgeSelection,
    mesh: &M,
    interrupt: &Interrupt,
) -> Result<Extraction, OperationError>
where
    M: MeshPositions + ?Sized,
{
    let mut adjacency = AdjacencyMap::default();
    let mut skipped = 0;

    for &edge in selection.edges() {
        interrupt.check()?;
        let (a, b) = edge.vertices();
        if edge.is_degenerate() || !mesh.contains(a) || !mesh.contains(b) {
            tracing::trace!(?edge, "skipping degenerate edge");
            skipped += 1;
            continue;
        }
        adjacency.insert(edge);
    }

    let mut endpoints = Vec::new();
    for v in adjacency.vertices() {
        interrupt.check()?;
        if adjacency.degree(v) == 1 {
            endpoints.push(v);
        }
    }

    Ok(Extraction {
        adjacency,
        endpoints,
        skipped,
    })
}
