use crate::{CapacitatedGraph, Flow, FlowError, NodeHandle, Result};

/// Dense `n x n` flow network.
///
/// `capacity[u][v]` is the capacity of the pair `u -> v` and `flow[u][v]`
/// the flow on it; adding an edge between a pair that already has capacity
/// increases that capacity. The residual capacity from `u` to `v` is
/// `capacity[u][v] - flow[u][v] + flow[v][u]`. Both matrices hold the wide
/// accumulator type, since merged parallel edges may exceed the capacity
/// type.
#[derive(Clone, Debug)]
pub struct CapacityMatrix<F: Flow> {
    capacity: Vec<Vec<F::Wide>>,
    flow: Vec<Vec<F::Wide>>,
    adjacency: Vec<Vec<usize>>,
}

/// The residual arc of the node pair `from -> to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatrixArc {
    from: usize,
    to: usize,
}

impl<F: Flow> CapacityMatrix<F> {
    pub fn new(node_count: usize) -> Self {
        let zero = F::zero().widen();
        CapacityMatrix {
            capacity: vec![vec![zero; node_count]; node_count],
            flow: vec![vec![zero; node_count]; node_count],
            adjacency: vec![Vec::new(); node_count],
        }
    }

    pub fn from_rows(rows: Vec<Vec<F>>) -> Result<Self> {
        let n = rows.len();
        let mut matrix = Self::new(n);

        for (u, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(FlowError::MalformedMatrix {
                    row: u,
                    len: row.len(),
                    expected: n,
                });
            }
            for (v, capacity) in row.into_iter().enumerate() {
                if capacity != F::zero() {
                    matrix.add_edge(
                        NodeHandle { index: u },
                        NodeHandle { index: v },
                        capacity,
                    )?;
                }
            }
        }

        Ok(matrix)
    }

    pub fn capacity(&self, from: NodeHandle, to: NodeHandle) -> F::Wide {
        self.capacity[from.index][to.index]
    }

    pub fn flow(&self, from: NodeHandle, to: NodeHandle) -> F::Wide {
        self.flow[from.index][to.index]
    }

    fn link(&mut self, u: usize, v: usize) {
        if !self.adjacency[u].contains(&v) {
            self.adjacency[u].push(v);
        }
    }
}

impl<F: Flow> CapacitatedGraph for CapacityMatrix<F> {
    type Capacity = F;
    type Edge = ();
    type Arc = MatrixArc;

    fn node_count(&self) -> usize {
        self.capacity.len()
    }

    fn add_edge(&mut self, from: NodeHandle, to: NodeHandle, capacity: F) -> Result<()> {
        self.node(from.index)?;
        self.node(to.index)?;
        if capacity < F::zero() {
            return Err(FlowError::NegativeCapacity {
                from: from.index,
                to: to.index,
            });
        }

        let (u, v) = (from.index, to.index);
        self.capacity[u][v] = self.capacity[u][v] + capacity.widen();
        self.link(u, v);
        self.link(v, u);
        Ok(())
    }

    fn degree(&self, node: NodeHandle) -> usize {
        self.adjacency[node.index].len()
    }

    fn arc(&self, node: NodeHandle, position: usize) -> MatrixArc {
        MatrixArc {
            from: node.index,
            to: self.adjacency[node.index][position],
        }
    }

    fn arc_head(&self, arc: MatrixArc) -> NodeHandle {
        NodeHandle { index: arc.to }
    }

    fn arc_residual(&self, arc: MatrixArc) -> F::Wide {
        let MatrixArc { from: u, to: v } = arc;
        self.capacity[u][v] - self.flow[u][v] + self.flow[v][u]
    }

    fn push_arc(&mut self, arc: MatrixArc, amount: F::Wide) {
        let MatrixArc { from: u, to: v } = arc;
        let cancelled = amount.min(self.flow[v][u]);
        self.flow[v][u] = self.flow[v][u] - cancelled;
        self.flow[u][v] = self.flow[u][v] + (amount - cancelled);
    }

    fn clear_flow(&mut self) {
        let zero = F::zero().widen();
        for row in &mut self.flow {
            row.fill(zero);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(index: usize) -> NodeHandle {
        NodeHandle { index }
    }

    fn heads<F: Flow>(matrix: &CapacityMatrix<F>, node: NodeHandle) -> Vec<NodeHandle> {
        (0..matrix.degree(node))
            .map(|position| matrix.arc_head(matrix.arc(node, position)))
            .collect()
    }

    #[test]
    fn test_from_rows() {
        let matrix: CapacityMatrix<i32> =
            CapacityMatrix::from_rows(vec![vec![0, 3, 0], vec![0, 0, 2], vec![0, 0, 0]]).unwrap();

        assert_eq!(matrix.node_count(), 3);
        assert_eq!(matrix.capacity(n(0), n(1)), 3);
        assert_eq!(heads(&matrix, n(1)), vec![n(0), n(2)]);
        assert_eq!(heads(&matrix, n(2)), vec![n(1)]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            CapacityMatrix::from_rows(vec![vec![0i64, 1, 2], vec![0, 0, 0]]),
            Err(FlowError::MalformedMatrix {
                row: 0,
                len: 3,
                expected: 2
            })
        ));
        assert!(matches!(
            CapacityMatrix::from_rows(vec![vec![0i64, -1], vec![0, 0]]),
            Err(FlowError::NegativeCapacity { from: 0, to: 1 })
        ));
    }

    #[test]
    fn test_parallel_edges_accumulate() {
        let mut matrix: CapacityMatrix<u64> = CapacityMatrix::new(2);
        matrix.add_edge(n(0), n(1), 4).unwrap();
        matrix.add_edge(n(0), n(1), 6).unwrap();

        assert_eq!(matrix.capacity(n(0), n(1)), 10);
        assert_eq!(heads(&matrix, n(0)), vec![n(1)]);
    }

    #[test]
    fn test_merged_capacity_exceeds_capacity_type() {
        let mut matrix: CapacityMatrix<i32> = CapacityMatrix::new(2);
        matrix.add_edge(n(0), n(1), i32::MAX).unwrap();
        matrix.add_edge(n(0), n(1), i32::MAX).unwrap();

        assert_eq!(matrix.capacity(n(0), n(1)), 2 * i64::from(i32::MAX));
        assert_eq!(matrix.residual_capacity(n(0), n(1)), 2 * i64::from(i32::MAX));
    }

    #[test]
    fn test_push_flow_and_residuals() {
        let mut matrix: CapacityMatrix<u32> = CapacityMatrix::new(2);
        matrix.add_edge(n(0), n(1), 5).unwrap();
        matrix.add_edge(n(1), n(0), 2).unwrap();

        matrix.push_flow(n(0), n(1), 5).unwrap();
        assert_eq!(matrix.residual_capacity(n(0), n(1)), 0);
        assert_eq!(matrix.residual_capacity(n(1), n(0)), 7);

        // Pushing back first cancels the existing flow, then uses 1 -> 0.
        matrix.push_flow(n(1), n(0), 6).unwrap();
        assert_eq!(matrix.flow(n(0), n(1)), 0);
        assert_eq!(matrix.flow(n(1), n(0)), 1);

        assert!(matrix.push_flow(n(1), n(0), 2).is_err());

        matrix.clear_flow();
        assert_eq!(matrix.residual_capacity(n(0), n(1)), 5);
    }
}
