use crate::{Cost, Flow, NodeHandle};

/// A stored edge. Its twin backward arc is implicit: it has no capacity of
/// its own and its residual capacity is the flow on this edge.
#[derive(Clone, Debug)]
pub struct FlowEdge<F, C>
where
    F: Flow,
    C: Cost,
{
    pub(crate) from: NodeHandle,
    pub(crate) to: NodeHandle,
    pub(crate) capacity: F,
    pub(crate) flow: F,
    pub(crate) cost: C,
}

impl<F, C> FlowEdge<F, C>
where
    F: Flow,
    C: Cost,
{
    pub fn from(&self) -> NodeHandle {
        self.from
    }

    pub fn to(&self) -> NodeHandle {
        self.to
    }

    pub fn capacity(&self) -> F {
        self.capacity
    }

    pub fn flow(&self) -> F {
        self.flow
    }

    pub fn cost(&self) -> C {
        self.cost
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeHandle {
    pub(crate) index: usize,
}

impl EdgeHandle {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One direction of an edge in the residual graph.
///
/// Edge `i` owns arcs `2i` (forward) and `2i + 1` (backward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResidualArc(usize);

impl ResidualArc {
    pub(crate) fn forward(edge: usize) -> Self {
        ResidualArc(edge << 1)
    }

    pub(crate) fn backward(edge: usize) -> Self {
        ResidualArc((edge << 1) | 1)
    }

    pub(crate) fn edge(self) -> usize {
        self.0 >> 1
    }

    pub(crate) fn is_forward(self) -> bool {
        self.0 & 1 == 0
    }

    pub(crate) fn reverse(self) -> Self {
        ResidualArc(self.0 ^ 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_pairs() {
        let forward = ResidualArc::forward(3);
        let backward = ResidualArc::backward(3);

        assert!(forward.is_forward());
        assert!(!backward.is_forward());
        assert_eq!(forward.edge(), 3);
        assert_eq!(backward.edge(), 3);
        assert_eq!(forward.reverse(), backward);
        assert_eq!(backward.reverse(), forward);
    }
}
