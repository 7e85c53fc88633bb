pub mod edge;
pub mod selection;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use selection::{Edge, EdgeSelection};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Read/write access to vertex positions.
///
/// This is the only view of a mesh the straighten pass needs. Hosts with
/// their own geometry storage implement it over that storage;
/// [`TopologyStore`] implements it for standalone use.
pub trait MeshPositions {
    /// Returns `true` if the vertex exists.
    fn contains(&self, vertex: VertexId) -> bool;

    /// Current position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    fn position(&self, vertex: VertexId) -> Result<Point3, TopologyError>;

    /// Moves a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex does not exist.
    fn set_position(&mut self, vertex: VertexId, point: Point3) -> Result<(), TopologyError>;
}

/// Central arena that owns mesh vertices and edges.
///
/// Entities reference each other via typed IDs (generational indices),
/// avoiding self-referential structures and enabling safe mutation.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an open polyline: one vertex per point, one edge per
    /// consecutive pair. Returns the vertex and edge IDs in path order.
    pub fn add_polyline(&mut self, points: &[Point3]) -> (Vec<VertexId>, Vec<EdgeId>) {
        let vertices: Vec<VertexId> = points
            .iter()
            .map(|&p| self.add_vertex(VertexData::new(p)))
            .collect();
        let edges = vertices
            .windows(2)
            .map(|w| self.add_edge(EdgeData::new(w[0], w[1])))
            .collect();
        (vertices, edges)
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Removes a vertex. Edges still referencing it become malformed.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<VertexData> {
        self.vertices.remove(id)
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Resolves stored edges into a vertex-pair selection, keeping order.
    ///
    /// # Errors
    ///
    /// Returns an error if any edge ID is not found in the store.
    pub fn selection_from_edges(&self, ids: &[EdgeId]) -> Result<EdgeSelection, TopologyError> {
        ids.iter()
            .map(|&id| self.edge(id).map(|e| Edge::new(e.start, e.end)))
            .collect()
    }
}

impl MeshPositions for TopologyStore {
    fn contains(&self, vertex: VertexId) -> bool {
        self.vertices.contains_key(vertex)
    }

    fn position(&self, vertex: VertexId) -> Result<Point3, TopologyError> {
        self.vertex(vertex).map(|v| v.point)
    }

    fn set_position(&mut self, vertex: VertexId, point: Point3) -> Result<(), TopologyError> {
        self.vertex_mut(vertex)?.point = point;
        Ok(())
    }
}
