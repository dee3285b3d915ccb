use std::collections::VecDeque;

use crate::{CapacitatedGraph, Cost, EdgeHandle, Flow, FlowError, FlowGraph, NodeHandle, Result};

/// The source side of an `s`-`t` cut, taken as everything reachable from the
/// source in the residual graph.
///
/// After a maximum flow the sink is not on the source side and
/// [`MinCut::capacity`] equals the flow value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut<F> {
    source_side: Vec<bool>,
    edges: Vec<EdgeHandle>,
    capacity: F,
}

impl<F: Flow> MinCut<F> {
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.source_side.get(node.index).copied().unwrap_or(false)
    }

    pub fn source_side(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.source_side
            .iter()
            .enumerate()
            .filter(|(_, inside)| **inside)
            .map(|(index, _)| NodeHandle { index })
    }

    /// Edges leaving the source side.
    pub fn edges(&self) -> &[EdgeHandle] {
        &self.edges
    }

    pub fn capacity(&self) -> F {
        self.capacity
    }
}

/// Cut capacities are summed in the wide accumulator type.
pub fn min_cut<F, C>(graph: &FlowGraph<F, C>, source: NodeHandle) -> Result<MinCut<F::Wide>>
where
    F: Flow,
    C: Cost,
{
    graph.node(source.index)?;

    let mut source_side = vec![false; graph.node_count()];
    source_side[source.index] = true;
    let mut queue = VecDeque::from([source.index]);

    while let Some(u) = queue.pop_front() {
        for &arc in graph.arcs(u) {
            let v = graph.head(arc);
            if !source_side[v] && graph.residual(arc) > F::zero() {
                source_side[v] = true;
                queue.push_back(v);
            }
        }
    }

    let mut edges = Vec::new();
    let mut capacity = F::zero().widen();
    for (handle, edge) in graph.edges() {
        if source_side[edge.from.index] && !source_side[edge.to.index] {
            edges.push(handle);
            capacity = capacity + edge.capacity.widen();
        }
    }

    Ok(MinCut {
        source_side,
        edges,
        capacity,
    })
}

/// Whether the residual graph still has a path from `source` to `sink`.
pub fn has_augmenting_path<F, C>(
    graph: &FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<bool>
where
    F: Flow,
    C: Cost,
{
    graph.check_terminals(source, sink)?;
    Ok(min_cut(graph, source)?.contains(sink))
}

/// Checks that the stored flow respects every capacity and is conserved at
/// every node other than `source` and `sink`.
pub fn verify_flow<F, C>(
    graph: &FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<()>
where
    F: Flow,
    C: Cost,
{
    graph.check_terminals(source, sink)?;

    let n = graph.node_count();
    let mut inflow = vec![F::zero().widen(); n];
    let mut outflow = vec![F::zero().widen(); n];

    for (handle, edge) in graph.edges() {
        if edge.flow < F::zero() || edge.flow > edge.capacity {
            return Err(FlowError::CapacityExceeded {
                edge: handle.index,
            });
        }
        outflow[edge.from.index] = outflow[edge.from.index] + edge.flow.widen();
        inflow[edge.to.index] = inflow[edge.to.index] + edge.flow.widen();
    }

    for node in 0..n {
        if node != source.index && node != sink.index && inflow[node] != outflow[node] {
            return Err(FlowError::Unbalanced { node });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dinic;

    fn diamond() -> (FlowGraph<i64>, Vec<NodeHandle>) {
        let mut graph = FlowGraph::with_nodes(4);
        let n: Vec<_> = graph.nodes().collect();
        graph.add_edge(n[0], n[1], 3).unwrap();
        graph.add_edge(n[0], n[2], 2).unwrap();
        graph.add_edge(n[1], n[3], 1).unwrap();
        graph.add_edge(n[2], n[3], 4).unwrap();
        graph.add_edge(n[1], n[2], 1).unwrap();
        (graph, n)
    }

    #[test]
    fn test_min_cut_after_max_flow() {
        let (mut graph, n) = diamond();
        let value = dinic(&mut graph, n[0], n[3]).unwrap();
        let cut = min_cut(&graph, n[0]).unwrap();

        assert_eq!(value, 4);
        assert_eq!(cut.capacity(), value);
        assert!(cut.contains(n[0]));
        assert!(cut.contains(n[1]));
        assert!(!cut.contains(n[3]));
        assert_eq!(cut.source_side().count(), 2);
        assert_eq!(cut.edges().len(), 3);
        assert!(!has_augmenting_path(&graph, n[0], n[3]).unwrap());
    }

    #[test]
    fn test_zero_flow_has_augmenting_path() {
        let (graph, n) = diamond();
        assert!(has_augmenting_path(&graph, n[0], n[3]).unwrap());
        assert_eq!(min_cut(&graph, n[0]).unwrap().source_side().count(), 4);
    }

    #[test]
    fn test_verify_flow_detects_imbalance() {
        let (mut graph, n) = diamond();
        graph.push_flow(n[0], n[1], 2).unwrap();
        graph.push_flow(n[1], n[3], 1).unwrap();

        assert_eq!(
            verify_flow(&graph, n[0], n[3]),
            Err(FlowError::Unbalanced { node: 1 })
        );

        graph.push_flow(n[1], n[2], 1).unwrap();
        graph.push_flow(n[2], n[3], 1).unwrap();
        assert_eq!(verify_flow(&graph, n[0], n[3]), Ok(()));
    }
}
