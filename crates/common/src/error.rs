use thiserror::Error;

use crate::types::VertexId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An edge referenced a label that was never registered as a vertex.
    #[error("Unknown vertex '{0}': register it before adding edges that use it.")]
    UnknownVertex(String),

    /// A label was registered twice through the strict registration path.
    #[error("Vertex '{0}' is already registered.")]
    DuplicateVertex(String),

    /// The requested start vertex is not part of the graph.
    #[error("Start vertex '{0}' not found in the graph.")]
    StartVertexNotFound(String),

    /// Indicates an attempt to access a vertex index that exceeds the graph size (N).
    #[error("Vertex index {0} is out of bounds.")]
    VertexOutOfBounds(VertexId),

    /// A weight was requested for an ordered pair with no connecting edge.
    #[error("No edge from vertex {origin} to vertex {destination}.")]
    EdgeNotFound {
        origin: VertexId,
        destination: VertexId,
    },
}
