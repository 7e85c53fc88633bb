use super::vertex::VertexId;

/// An unordered pair of vertices picked by an edge selection.
///
/// The pair is stored in canonical order, so `Edge::new(a, b) == Edge::new(b, a)`
/// and both hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    lo: VertexId,
    hi: VertexId,
}

impl Edge {
    /// Creates an edge between `a` and `b`.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Both vertices, in canonical order.
    #[must_use]
    pub fn vertices(&self) -> (VertexId, VertexId) {
        (self.lo, self.hi)
    }

    /// Returns `true` if both ends are the same vertex.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// The end opposite to `v`.
    ///
    /// Returns `lo` when `v` is not on the edge; callers only ask with a
    /// vertex they reached through this edge.
    #[must_use]
    pub fn other(&self, v: VertexId) -> VertexId {
        if self.lo == v {
            self.hi
        } else {
            self.lo
        }
    }
}

/// An ordered collection of selected edges.
///
/// Duplicates and self-loops are kept as given; the straighten pass tolerates
/// both.
#[derive(Debug, Clone, Default)]
pub struct EdgeSelection {
    edges: Vec<Edge>,
}

impl EdgeSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edge between `a` and `b`.
    pub fn push(&mut self, a: VertexId, b: VertexId) {
        self.edges.push(Edge::new(a, b));
    }

    /// The selected edges, in selection order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of selected edges, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<Edge> for EdgeSelection {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<(VertexId, VertexId)> for EdgeSelection {
    fn from_iter<I: IntoIterator<Item = (VertexId, VertexId)>>(iter: I) -> Self {
        iter.into_iter().map(|(a, b)| Edge::new(a, b)).collect()
    }
}
