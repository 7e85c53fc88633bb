use crate::math::Point3;

slotmap::new_key_type! {
    /// Stable reference to a mesh vertex for the lifetime of the store.
    pub struct VertexId;
}

/// A stored mesh vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexData {
    /// Position in model space.
    pub point: Point3,
}

impl VertexData {
    /// Creates a vertex at `point`.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self { point }
    }
}

impl From<Point3> for VertexData {
    fn from(point: Point3) -> Self {
        Self::new(point)
    }
}
