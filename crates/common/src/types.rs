/// Dense index of an interned vertex label (0..vertex_count).
pub type VertexId = usize;

/// Non-negative trip length carried by an edge.
pub type Weight = u32;

/// Sum of weights along a path.
///
/// Weights are `u32` and a simple path has fewer than `usize::MAX` edges, so a
/// `u64` accumulator cannot overflow for any graph that fits in memory.
pub type Distance = u64;

/// Type alias for an interned edge: (from, to, weight)
pub type Edge = (VertexId, VertexId, Weight);

/// A single city-to-city trip as read from the input, before interning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub origin: String,
    pub destination: String,
    pub weight: Weight,
}

impl Trip {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, weight: Weight) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            weight,
        }
    }
}

/// Represents a directed cycle found in the graph.
///
/// `vertices` lists the cycle in traversal order, starting at the vertex the
/// closing back edge points to. The closing edge runs from the last vertex
/// back to the first; a self loop is a single-vertex cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub vertices: Vec<VertexId>,
}

impl Cycle {
    /// Returns the back edge `(from, to)` that closes the cycle.
    pub fn closing_edge(&self) -> Option<(VertexId, VertexId)> {
        let first = *self.vertices.first()?;
        let last = *self.vertices.last()?;
        Some((last, first))
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if the cycle is a single edge from a vertex to itself.
    pub fn is_self_loop(&self) -> bool {
        self.vertices.len() == 1
    }
}
