use std::iter::FusedIterator;
use std::slice;

use common::types::{VertexId, Weight};

/// One outgoing edge as seen from its source vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacent {
    pub vertex: VertexId,
    pub weight: Weight,
}

/// Iterator over the outgoing edges of a single vertex, in edge insertion order.
///
/// Borrows one CSR row; both the shortest-path engine and the cycle detector
/// walk adjacency exclusively through this type.
#[derive(Debug, Clone)]
pub struct Neighbors<'g> {
    targets: slice::Iter<'g, VertexId>,
    weights: slice::Iter<'g, Weight>,
}

impl<'g> Neighbors<'g> {
    pub(crate) fn new(targets: &'g [VertexId], weights: &'g [Weight]) -> Self {
        debug_assert_eq!(targets.len(), weights.len());
        Self {
            targets: targets.iter(),
            weights: weights.iter(),
        }
    }

    /// Drops the weights and yields only destination vertices.
    pub fn vertices(self) -> impl Iterator<Item = VertexId> + 'g {
        self.targets.copied()
    }
}

impl Iterator for Neighbors<'_> {
    type Item = Adjacent;

    fn next(&mut self) -> Option<Adjacent> {
        let vertex = *self.targets.next()?;
        let weight = *self.weights.next()?;
        Some(Adjacent { vertex, weight })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.targets.size_hint()
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

impl FusedIterator for Neighbors<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_targets_with_matching_weights() {
        let targets = [3, 1, 2];
        let weights = [30, 10, 20];
        let neighbors = Neighbors::new(&targets, &weights);

        assert_eq!(neighbors.len(), 3);
        let collected: Vec<_> = neighbors.collect();
        assert_eq!(
            collected,
            vec![
                Adjacent { vertex: 3, weight: 30 },
                Adjacent { vertex: 1, weight: 10 },
                Adjacent { vertex: 2, weight: 20 },
            ]
        );
    }

    #[test]
    fn empty_row_yields_nothing() {
        let mut neighbors = Neighbors::new(&[], &[]);
        assert_eq!(neighbors.len(), 0);
        assert_eq!(neighbors.next(), None);
        assert_eq!(neighbors.next(), None);
    }

    #[test]
    fn vertices_drops_weights() {
        let targets = [5, 4];
        let weights = [1, 1];
        let vertices: Vec<_> = Neighbors::new(&targets, &weights).vertices().collect();
        assert_eq!(vertices, vec![5, 4]);
    }
}
