use std::collections::VecDeque;

use log::{debug, trace};

use crate::{
    AugmentStats, CapacitatedGraph, Cost, Flow, FlowGraph, NodeHandle, Result, edge::ResidualArc,
};

/// Maximum flow by Dinic's algorithm.
///
/// Every phase layers the residual graph by BFS distance from the source and
/// then saturates a blocking flow along arcs that advance exactly one layer.
/// Per-node current-arc pointers make each phase linear in the number of
/// arcs. The flow already stored in `graph` is cleared first; on return it
/// holds a maximum flow.
pub fn dinic<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<F::Wide>
where
    F: Flow,
    C: Cost,
{
    dinic_with_stats(graph, source, sink).map(|(value, _)| value)
}

/// [`dinic`], also reporting the number of phases and augmenting paths.
pub fn dinic_with_stats<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<(F::Wide, AugmentStats)>
where
    F: Flow,
    C: Cost,
{
    graph.check_terminals(source, sink)?;
    graph.clear_flow();

    let mut layers = LevelGraph::new(graph.node_count());
    let mut total = F::zero().widen();
    let mut stats = AugmentStats::default();

    while layers.rebuild(graph, source.index, sink.index) {
        stats.phases += 1;
        let before = total;
        loop {
            let pushed = layers.augment(graph, source.index, sink.index);
            if pushed == F::zero() {
                break;
            }
            total = total + pushed.widen();
            stats.augmentations += 1;
        }
        trace!("phase {}: blocking flow {:?}", stats.phases, total - before);
    }

    debug!(
        "dinic: {} phases, {} augmentations, max flow {:?}",
        stats.phases, stats.augmentations, total
    );
    Ok((total, stats))
}

/// BFS layering of the residual graph plus the per-node arc pointers used
/// while searching it.
struct LevelGraph {
    level: Vec<Option<usize>>,
    next_arc: Vec<usize>,
    /// Arcs from the source to the node currently being advanced.
    path: Vec<ResidualArc>,
}

impl LevelGraph {
    fn new(node_count: usize) -> Self {
        LevelGraph {
            level: vec![None; node_count],
            next_arc: vec![0; node_count],
            path: Vec::new(),
        }
    }

    /// Recomputes the layers and rewinds the arc pointers. Returns whether the
    /// sink is still reachable.
    fn rebuild<F, C>(&mut self, graph: &FlowGraph<F, C>, source: usize, sink: usize) -> bool
    where
        F: Flow,
        C: Cost,
    {
        self.level.fill(None);
        self.next_arc.fill(0);
        self.level[source] = Some(0);

        let mut queue = VecDeque::new();
        queue.push_back((source, 0));

        while let Some((u, depth)) = queue.pop_front() {
            for &arc in graph.arcs(u) {
                let v = graph.head(arc);
                if self.level[v].is_none() && graph.residual(arc) > F::zero() {
                    self.level[v] = Some(depth + 1);
                    queue.push_back((v, depth + 1));
                }
            }
        }

        self.level[sink].is_some()
    }

    /// Finds one layered path from `source` to `sink` and augments along it
    /// by its bottleneck, which is returned. Zero means the blocking flow is
    /// complete.
    ///
    /// The search keeps the current path on an explicit stack: it advances
    /// along the arc under `next_arc[u]` when that arc is admissible and
    /// retreats from nodes whose arcs are exhausted. Arcs that cannot carry
    /// more flow in this phase are skipped for good by advancing `next_arc`.
    fn augment<F, C>(&mut self, graph: &mut FlowGraph<F, C>, source: usize, sink: usize) -> F
    where
        F: Flow,
        C: Cost,
    {
        self.path.clear();
        let mut u = source;

        while u != sink {
            match self.admissible_arc(graph, u) {
                Some(arc) => {
                    self.path.push(arc);
                    u = graph.head(arc);
                }
                None => {
                    // Dead end: drop the arc that led here.
                    let Some(arc) = self.path.pop() else {
                        return F::zero();
                    };
                    u = graph.head(arc.reverse());
                    self.next_arc[u] += 1;
                }
            }
        }

        let bottleneck = self
            .path
            .iter()
            .map(|&arc| graph.residual(arc))
            .min()
            .unwrap_or_else(F::zero);
        for &arc in &self.path {
            graph.augment(arc, bottleneck);
        }
        bottleneck
    }

    /// The first arc at or after `next_arc[u]` that has residual capacity and
    /// leads one layer deeper.
    fn admissible_arc<F, C>(&mut self, graph: &FlowGraph<F, C>, u: usize) -> Option<ResidualArc>
    where
        F: Flow,
        C: Cost,
    {
        let depth = self.level[u]?;
        while let Some(&arc) = graph.arcs(u).get(self.next_arc[u]) {
            if graph.residual(arc) > F::zero() && self.level[graph.head(arc)] == Some(depth + 1) {
                return Some(arc);
            }
            self.next_arc[u] += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlowError, fixtures};

    #[test]
    fn test_reference_networks() {
        for network in fixtures::flow_networks() {
            let mut graph = network.graph();
            let source = graph.node(network.source).unwrap();
            let sink = graph.node(network.sink).unwrap();

            assert_eq!(
                dinic(&mut graph, source, sink).unwrap(),
                network.max_flow,
                "{}",
                network.name
            );
            fixtures::assert_valid_max_flow(&graph, source, sink, network.max_flow);
        }
    }

    #[test]
    fn test_large_capacities() {
        let c: i64 = 100_000_000;
        let inf: i64 = 1_000_000_000_000_000;

        let mut graph: FlowGraph<i64> = FlowGraph::with_nodes(10);
        let n: Vec<_> = graph.nodes().collect();
        let (source, sink) = (n[8], n[9]);

        for i in 0..4 {
            graph.add_edge(source, n[i], c).unwrap();
            graph.add_edge(n[i], n[i + 4], inf).unwrap();
        }
        graph.add_edge(n[4], sink, c + 2).unwrap();
        graph.add_edge(n[5], sink, c - 2).unwrap();
        graph.add_edge(n[6], sink, c - 1).unwrap();
        graph.add_edge(n[7], sink, c + 1).unwrap();
        for (u, v) in [(0, 6), (0, 7), (1, 7), (2, 7), (4, 1), (4, 2), (5, 3), (6, 3)] {
            graph.add_edge(n[u], n[v], inf).unwrap();
        }

        let value = dinic(&mut graph, source, sink).unwrap();
        assert_eq!(value, i128::from(4 * c - 2));
        fixtures::assert_valid_max_flow(&graph, source, sink, value);
    }

    #[test]
    fn test_worst_case_needs_one_phase() {
        let network = fixtures::worst_case_network();
        let mut graph = network.graph();
        let source = graph.node(network.source).unwrap();
        let sink = graph.node(network.sink).unwrap();

        let (value, stats) = dinic_with_stats(&mut graph, source, sink).unwrap();
        assert_eq!(value, 2000);
        assert_eq!(stats.phases, 1);
        assert_eq!(stats.augmentations, 2);
    }

    #[test]
    fn test_long_path_does_not_recurse() {
        let length = 200_000;
        let mut graph: FlowGraph<u8> = FlowGraph::with_nodes(length);
        let n: Vec<_> = graph.nodes().collect();
        for hop in n.windows(2) {
            graph.add_edge(hop[0], hop[1], 1).unwrap();
        }

        let (value, stats) = dinic_with_stats(&mut graph, n[0], n[length - 1]).unwrap();
        assert_eq!(value, 1);
        assert_eq!(stats.phases, 1);
    }

    #[test]
    fn test_bipartite_matching() {
        // Left 1..=3, right 4..=6, source 0, sink 7.
        let mut graph: FlowGraph<u32> = FlowGraph::with_nodes(8);
        let n: Vec<_> = graph.nodes().collect();
        for left in 1..=3 {
            graph.add_edge(n[0], n[left], 1).unwrap();
        }
        for right in 4..=6 {
            graph.add_edge(n[right], n[7], 1).unwrap();
        }
        for (l, r) in [(1, 4), (1, 5), (2, 4), (3, 4)] {
            graph.add_edge(n[l], n[r], 1).unwrap();
        }

        assert_eq!(dinic(&mut graph, n[0], n[7]).unwrap(), 2);
    }

    #[test]
    fn test_parallel_edges_carry_flow_independently() {
        let mut graph: FlowGraph<i64> = FlowGraph::with_nodes(3);
        let n: Vec<_> = graph.nodes().collect();
        graph.add_edge(n[0], n[1], 10).unwrap();
        let thin = graph.add_edge(n[1], n[2], 3).unwrap();
        let wide = graph.add_edge(n[1], n[2], 4).unwrap();

        assert_eq!(dinic(&mut graph, n[0], n[2]).unwrap(), 7);
        assert_eq!(graph.get_flow(thin), 3);
        assert_eq!(graph.get_flow(wide), 4);
    }

    #[test]
    fn test_rejects_source_equal_to_sink() {
        let mut graph: FlowGraph<i64> = FlowGraph::with_nodes(2);
        let a = graph.node(1).unwrap();
        assert_eq!(dinic(&mut graph, a, a), Err(FlowError::SourceIsSink(1)));
    }

    #[test]
    fn test_no_path() {
        let mut graph: FlowGraph<i64> = FlowGraph::with_nodes(3);
        let n: Vec<_> = graph.nodes().collect();
        graph.add_edge(n[0], n[1], 10).unwrap();

        assert_eq!(dinic(&mut graph, n[0], n[2]).unwrap(), 0);
    }
}
