use common::types::{Cycle, VertexId};
use tracing::debug;

use super::adjacency::{Adjacent, Neighbors};
use super::csr::GraphCSR;
use super::traits::CycleDetector;

/// DFS colouring. `OnPath` carries the vertex's frame index on the active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Colour {
    Unvisited,
    OnPath(usize),
    Done,
}

/// Detects directed cycles with a three-colour depth-first search.
///
/// Recursion is replaced by an explicit stack of `(vertex, remaining
/// neighbours)` frames, so path depth is limited by heap memory rather than
/// the thread's call stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct DfsCycleDetector;

impl DfsCycleDetector {
    /// Explores everything reachable from `root` that is still unvisited.
    ///
    /// Returns the cycle closed by the first edge that points back onto the
    /// active path.
    fn explore(&self, graph: &GraphCSR, root: VertexId, colour: &mut [Colour]) -> Option<Cycle> {
        let mut path: Vec<(VertexId, Neighbors<'_>)> = Vec::new();

        colour[root] = Colour::OnPath(0);
        path.push((root, graph.neighbors_of(root)));

        while let Some((vertex, neighbors)) = path.last_mut() {
            let vertex = *vertex;

            let Some(Adjacent { vertex: next, .. }) = neighbors.next() else {
                colour[vertex] = Colour::Done;
                path.pop();
                continue;
            };

            match colour[next] {
                Colour::Unvisited => {
                    colour[next] = Colour::OnPath(path.len());
                    path.push((next, graph.neighbors_of(next)));
                }
                Colour::OnPath(entry) => {
                    debug!(from = vertex, to = next, "back edge found");
                    let vertices = path[entry..].iter().map(|(v, _)| *v).collect();
                    return Some(Cycle { vertices });
                }
                // Cross or forward edge into a finished subtree.
                Colour::Done => {}
            }
        }

        None
    }
}

impl CycleDetector for DfsCycleDetector {
    /// Seeds a work stack with every vertex in id order and pops roots from
    /// the top, so the most recently registered vertex is explored first.
    fn find_cycle(&self, graph: &GraphCSR) -> Option<Cycle> {
        let num_nodes = graph.vertex_count();
        let mut colour = vec![Colour::Unvisited; num_nodes];
        let mut roots: Vec<VertexId> = (0..num_nodes).collect();

        while let Some(root) = roots.pop() {
            if colour[root] != Colour::Unvisited {
                continue;
            }

            if let Some(cycle) = self.explore(graph, root, &mut colour) {
                return Some(cycle);
            }
        }

        None
    }
}
