use std::collections::VecDeque;

use log::{debug, trace};
use num::Zero;

use crate::{AugmentStats, CapacitatedGraph, NodeHandle, Result, Wide};

/// Maximum flow by repeatedly augmenting along a shortest (fewest arcs)
/// residual path, found with a breadth-first search.
///
/// Runs on any [`CapacitatedGraph`]. The flow already stored in `graph` is
/// cleared first; on return it holds a maximum flow.
pub fn edmonds_karp<G>(
    graph: &mut G,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<Wide<G::Capacity>>
where
    G: CapacitatedGraph,
{
    edmonds_karp_with_stats(graph, source, sink).map(|(value, _)| value)
}

/// [`edmonds_karp`], also reporting how many augmenting paths it used.
pub fn edmonds_karp_with_stats<G>(
    graph: &mut G,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<(Wide<G::Capacity>, AugmentStats)>
where
    G: CapacitatedGraph,
{
    graph.check_terminals(source, sink)?;
    graph.clear_flow();

    let mut total = <Wide<G::Capacity>>::zero();
    let mut stats = AugmentStats::default();

    while let Some(path) = shortest_augmenting_path(graph, source, sink) {
        let bottleneck = path
            .iter()
            .map(|&arc| graph.arc_residual(arc))
            .min()
            .unwrap_or_else(<Wide<G::Capacity>>::zero);

        for &arc in &path {
            graph.push_arc(arc, bottleneck);
        }

        total = total + bottleneck;
        stats.phases += 1;
        stats.augmentations += 1;
        trace!(
            "augmenting path of {} arcs carries {:?}",
            path.len(),
            bottleneck
        );
    }

    debug!(
        "edmonds-karp: {} augmentations, max flow {:?}",
        stats.augmentations, total
    );
    Ok((total, stats))
}

/// Breadth-first search over arcs with positive residual capacity, visiting
/// every arc at most once. Returns the arcs from `source` to `sink`.
fn shortest_augmenting_path<G>(
    graph: &G,
    source: NodeHandle,
    sink: NodeHandle,
) -> Option<Vec<G::Arc>>
where
    G: CapacitatedGraph,
{
    let n = graph.node_count();
    let mut reached = vec![false; n];
    let mut via: Vec<Option<(NodeHandle, G::Arc)>> = vec![None; n];
    reached[source.index] = true;

    let mut queue = VecDeque::from([source]);

    'search: while let Some(u) = queue.pop_front() {
        for position in 0..graph.degree(u) {
            let arc = graph.arc(u, position);
            let v = graph.arc_head(arc);
            if !reached[v.index] && graph.arc_residual(arc) > <Wide<G::Capacity>>::zero() {
                reached[v.index] = true;
                via[v.index] = Some((u, arc));
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }
    }

    let mut path = Vec::new();
    let mut node = sink;
    while node != source {
        let (tail, arc) = via[node.index]?;
        path.push(arc);
        node = tail;
    }
    path.reverse();
    Some(path)
}
