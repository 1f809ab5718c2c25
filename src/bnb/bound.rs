//! Minimum spanning tree lower bound (Prim, dense form).

use crate::instance::CostMatrix;

/// Reusable scratch space for repeated spanning-tree weights.
#[derive(Debug, Default)]
pub(crate) struct SpanningTree {
    nodes: Vec<usize>,
    key: Vec<u64>,
    in_tree: Vec<bool>,
}

impl SpanningTree {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n + 1),
            key: Vec::with_capacity(n + 1),
            in_tree: Vec::with_capacity(n + 1),
        }
    }

    /// Weight of the minimum spanning tree over `head`, every vertex of
    /// `rest` except `rest[skip]`, and `tail`.
    ///
    /// Stops early and returns a value `>= limit` as soon as the partial
    /// tree reaches `limit`.
    pub(crate) fn weight(
        &mut self,
        matrix: &CostMatrix,
        head: usize,
        rest: &[usize],
        skip: usize,
        tail: usize,
        limit: u64,
    ) -> u64 {
        self.nodes.clear();
        self.nodes.push(head);
        self.nodes.extend(
            rest.iter()
                .enumerate()
                .filter(|&(k, _)| k != skip)
                .map(|(_, &v)| v),
        );
        self.nodes.push(tail);

        let k = self.nodes.len();
        self.key.clear();
        self.key.resize(k, u64::MAX);
        self.in_tree.clear();
        self.in_tree.resize(k, false);

        self.key[0] = 0;
        let mut total = 0u64;
        for _ in 0..k {
            let mut pick = usize::MAX;
            let mut best = u64::MAX;
            for (idx, &key) in self.key.iter().enumerate() {
                if !self.in_tree[idx] && key < best {
                    best = key;
                    pick = idx;
                }
            }
            if pick == usize::MAX {
                break;
            }
            self.in_tree[pick] = true;
            total += best;
            if total >= limit {
                return total;
            }

            let from = self.nodes[pick];
            for idx in 0..k {
                if !self.in_tree[idx] {
                    let c = matrix.get(from, self.nodes[idx]);
                    if c < self.key[idx] {
                        self.key[idx] = c;
                    }
                }
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Point;

    fn square() -> CostMatrix {
        let points: Vec<Point> = [(0, 0), (0, 10), (10, 10), (10, 0)]
            .into_iter()
            .map(Point::from)
            .collect();
        CostMatrix::from_points(&points, 100).unwrap()
    }

    #[test]
    fn test_weight_square() {
        let m = square();
        let mut mst = SpanningTree::with_capacity(4);
        // {1} ∪ {2, 3} ∪ {0}: three sides of the square.
        assert_eq!(mst.weight(&m, 1, &[2, 3], usize::MAX, 0, u64::MAX), 30);
    }

    #[test]
    fn test_weight_skips_index() {
        let m = square();
        let mut mst = SpanningTree::with_capacity(4);
        // {2} ∪ {3} ∪ {0}: rest[0] = 1 is skipped.
        assert_eq!(mst.weight(&m, 2, &[1, 3], 0, 0, u64::MAX), 20);
    }

    #[test]
    fn test_weight_two_nodes_is_the_edge() {
        let m = square();
        let mut mst = SpanningTree::default();
        assert_eq!(mst.weight(&m, 2, &[], usize::MAX, 0, u64::MAX), 14);
    }

    #[test]
    fn test_weight_stops_at_limit() {
        let m = square();
        let mut mst = SpanningTree::default();
        let w = mst.weight(&m, 1, &[2, 3], usize::MAX, 0, 15);
        assert!(w >= 15);
    }
}
