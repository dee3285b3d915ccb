//! Goldberg-Tarjan push-relabel maximum flow.
//!
//! The solver keeps a preflow (flow that may pile up at nodes as excess) and
//! a height label per node. Active nodes, those with excess other than the
//! source and the sink, are discharged one at a time: excess is pushed along
//! admissible arcs (`height(u) == height(v) + 1`) and the node is relabelled
//! whenever none is left. Which active node is discharged next is decided by
//! a [`SelectionPolicy`]; the result never depends on it, only the running
//! time does.

use std::collections::VecDeque;

use log::{debug, trace};
use num::Zero;

use crate::{CapacitatedGraph, Flow, NodeHandle, Result, Wide};

/// Order in which active nodes are discharged.
pub trait SelectionPolicy {
    /// Empties the policy and sizes it for `node_count` nodes.
    fn reset(&mut self, node_count: usize);

    /// Registers a node that just became active at the given height.
    fn activate(&mut self, node: usize, height: usize);

    fn next_active(&mut self) -> Option<usize>;
}

/// First in, first out. O(V³) overall.
#[derive(Debug, Default)]
pub struct Fifo {
    queue: VecDeque<usize>,
}

impl SelectionPolicy for Fifo {
    fn reset(&mut self, _node_count: usize) {
        self.queue.clear();
    }

    fn activate(&mut self, node: usize, _height: usize) {
        self.queue.push_back(node);
    }

    fn next_active(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }
}

/// Always discharges an active node of maximum height. O(V²√E) overall.
#[derive(Debug, Default)]
pub struct HighestLabel {
    buckets: Vec<Vec<usize>>,
    highest: usize,
}

impl SelectionPolicy for HighestLabel {
    fn reset(&mut self, node_count: usize) {
        // Heights never exceed 2V - 1.
        self.buckets = vec![Vec::new(); 2 * node_count.max(1)];
        self.highest = 0;
    }

    fn activate(&mut self, node: usize, height: usize) {
        if height >= self.buckets.len() {
            self.buckets.resize_with(height + 1, Vec::new);
        }
        self.buckets[height].push(node);
        self.highest = self.highest.max(height);
    }

    fn next_active(&mut self) -> Option<usize> {
        loop {
            if let Some(node) = self.buckets.get_mut(self.highest)?.pop() {
                return Some(node);
            }
            if self.highest == 0 {
                return None;
            }
            self.highest -= 1;
        }
    }
}

/// Operation counters of the last solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushRelabelStats {
    pub pushes: usize,
    pub relabels: usize,
    pub discharges: usize,
}

/// Push-relabel solver parameterised by its selection policy.
#[derive(Debug, Default)]
pub struct PushRelabel<P: SelectionPolicy> {
    policy: P,
    stats: PushRelabelStats,
}

impl<P: SelectionPolicy + Default> PushRelabel<P> {
    pub fn new() -> Self {
        PushRelabel {
            policy: P::default(),
            stats: PushRelabelStats::default(),
        }
    }
}

impl<P: SelectionPolicy> PushRelabel<P> {
    pub fn with_policy(policy: P) -> Self {
        PushRelabel {
            policy,
            stats: PushRelabelStats::default(),
        }
    }

    pub fn stats(&self) -> PushRelabelStats {
        self.stats
    }

    /// Computes a maximum flow from `source` to `sink`. The flow already
    /// stored in `graph` is cleared first; on return it holds a maximum flow.
    pub fn solve<G>(
        &mut self,
        graph: &mut G,
        source: NodeHandle,
        sink: NodeHandle,
    ) -> Result<Wide<G::Capacity>>
    where
        G: CapacitatedGraph,
    {
        graph.check_terminals(source, sink)?;
        graph.clear_flow();

        let n = graph.node_count();
        self.policy.reset(n);
        self.stats = PushRelabelStats::default();

        let mut preflow = Preflow {
            source: source.index,
            sink: sink.index,
            height: vec![0; n],
            excess: vec![<Wide<G::Capacity>>::zero(); n],
            current: vec![0; n],
        };
        preflow.height[source.index] = n;

        // Saturate every arc out of the source.
        for position in 0..graph.degree(source) {
            let arc = graph.arc(source, position);
            let v = graph.arc_head(arc);
            if v == source {
                continue;
            }
            let residual = graph.arc_residual(arc);
            if residual > <Wide<G::Capacity>>::zero() {
                graph.push_arc(arc, residual);
                preflow.receive(v.index, residual, &mut self.policy);
            }
        }

        while let Some(u) = self.policy.next_active() {
            self.stats.discharges += 1;
            preflow.discharge(graph, u, &mut self.policy, &mut self.stats);
        }

        let value = preflow.excess[sink.index];
        debug!(
            "push-relabel: {} pushes, {} relabels, max flow {:?}",
            self.stats.pushes, self.stats.relabels, value
        );
        Ok(value)
    }
}

/// Maximum flow by push-relabel with FIFO selection.
pub fn push_relabel<G>(
    graph: &mut G,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<Wide<G::Capacity>>
where
    G: CapacitatedGraph,
{
    PushRelabel::<Fifo>::new().solve(graph, source, sink)
}

/// Maximum flow by push-relabel with highest-label selection.
pub fn push_relabel_highest_label<G>(
    graph: &mut G,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<Wide<G::Capacity>>
where
    G: CapacitatedGraph,
{
    PushRelabel::<HighestLabel>::new().solve(graph, source, sink)
}

/// Heights and excesses, the latter in the wide accumulator type `W`.
struct Preflow<W> {
    source: usize,
    sink: usize,
    height: Vec<usize>,
    excess: Vec<W>,
    /// Position among the arcs of `u` of the next candidate arc.
    current: Vec<usize>,
}

impl<W: Flow> Preflow<W> {
    /// Credits `amount` of excess to `node`, activating it if it was idle.
    fn receive<P: SelectionPolicy>(&mut self, node: usize, amount: W, policy: &mut P) {
        let was_idle = self.excess[node] == W::zero();
        self.excess[node] = self.excess[node] + amount;
        if was_idle && node != self.source && node != self.sink {
            policy.activate(node, self.height[node]);
        }
    }

    /// Pushes and relabels until `u` has no excess left.
    fn discharge<G, P>(
        &mut self,
        graph: &mut G,
        u: usize,
        policy: &mut P,
        stats: &mut PushRelabelStats,
    ) where
        G: CapacitatedGraph,
        G::Capacity: Flow<Wide = W>,
        P: SelectionPolicy,
    {
        let from = NodeHandle { index: u };
        let degree = graph.degree(from);

        while self.excess[u] > W::zero() {
            if self.current[u] == degree {
                if !self.relabel(graph, u) {
                    break;
                }
                stats.relabels += 1;
                continue;
            }

            let arc = graph.arc(from, self.current[u]);
            let to = graph.arc_head(arc).index;
            let residual = graph.arc_residual(arc);
            if residual > W::zero() && self.height[u] == self.height[to] + 1 {
                let amount = self.excess[u].min(residual);
                graph.push_arc(arc, amount);
                self.excess[u] = self.excess[u] - amount;
                self.receive(to, amount, policy);
                stats.pushes += 1;
            } else {
                self.current[u] += 1;
            }
        }
    }

    /// Lifts `u` one above its lowest residual neighbour and rewinds its arc
    /// pointer. Returns `false` if `u` has no residual arc at all.
    fn relabel<G>(&mut self, graph: &G, u: usize) -> bool
    where
        G: CapacitatedGraph,
        G::Capacity: Flow<Wide = W>,
    {
        let from = NodeHandle { index: u };
        let lowest = (0..graph.degree(from))
            .map(|position| graph.arc(from, position))
            .filter(|&arc| graph.arc_head(arc) != from && graph.arc_residual(arc) > W::zero())
            .map(|arc| self.height[graph.arc_head(arc).index])
            .min();

        let Some(lowest) = lowest else {
            return false;
        };

        trace!("relabel {}: {} -> {}", u, self.height[u], lowest + 1);
        self.height[u] = lowest + 1;
        self.current[u] = 0;
        true
    }
}
