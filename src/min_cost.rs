//! Minimum cost flow by successive shortest paths.
//!
//! Flow is always sent along a cheapest augmenting path of the residual
//! graph. Bellman-Ford computes the first set of node potentials, so edge
//! costs may be negative; every following path is found by Dijkstra on the
//! reduced costs `cost(u, v) + potential(u) - potential(v)`, which stay
//! non-negative once the potentials are shifted by the new distances.

use std::{cmp::Reverse, collections::BinaryHeap};

use log::{debug, trace};

use crate::{
    CapacitatedGraph, Cost, Flow, FlowError, FlowGraph, NodeHandle, Result, edge::ResidualArc,
};

/// Amount of flow sent and what it cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowCost<F, C> {
    pub flow: F,
    pub cost: C,
}

/// A run of flow sent at one constant cost per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<F, C> {
    start_flow: F,
    start_cost: C,
    amount: F,
    unit_cost: C,
}

/// Minimum cost of every flow amount from zero up to the maximum flow.
///
/// Stored as the piecewise linear function traced by the successive
/// shortest paths; unit costs are non-decreasing from one segment to the
/// next, so the function is convex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable<F, C> {
    segments: Vec<Segment<F, C>>,
}

impl<F, C> CostTable<F, C>
where
    F: Flow,
    C: Cost,
{
    pub fn max_flow(&self) -> F {
        self.segments
            .last()
            .map_or(F::zero(), |segment| segment.start_flow + segment.amount)
    }

    /// Minimum cost of sending exactly `amount` units, or `None` if more than
    /// the maximum flow is requested.
    pub fn cost(&self, amount: F) -> Option<C> {
        if amount < F::zero() || amount > self.max_flow() {
            return None;
        }
        if amount == F::zero() {
            return Some(C::zero());
        }

        let segment = self
            .segments
            .iter()
            .find(|segment| amount <= segment.start_flow + segment.amount)?;
        Some(segment.start_cost + segment.unit_cost * C::from_flow(amount - segment.start_flow))
    }

    /// `(flow, cost)` at every point where the cost per unit changes,
    /// starting with `(0, 0)`.
    pub fn breakpoints(&self) -> impl Iterator<Item = (F, C)> + '_ {
        std::iter::once((F::zero(), C::zero())).chain(self.segments.iter().map(|segment| {
            (
                segment.start_flow + segment.amount,
                segment.start_cost + segment.unit_cost * C::from_flow(segment.amount),
            )
        }))
    }

    /// Cost per unit of each augmentation, in the order they were made.
    pub fn unit_costs(&self) -> impl Iterator<Item = C> + '_ {
        self.segments.iter().map(|segment| segment.unit_cost)
    }
}

/// Sends up to `target` units (the maximum flow if `None`) from `source` to
/// `sink` at minimum cost. The flow already stored in `graph` is cleared
/// first; on return it holds the computed flow. Amounts are counted in the
/// wide accumulator type.
pub fn min_cost_flow<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
    target: Option<F::Wide>,
) -> Result<FlowCost<F::Wide, C>>
where
    F: Flow,
    C: Cost,
{
    let mut solver = SuccessiveShortestPaths::new(graph, source, sink)?;
    Ok(solver.run(target, |_, _| {}))
}

/// Minimum cost of sending exactly `amount` units, or `None` if the network
/// cannot carry that much.
pub fn min_cost_for<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
    amount: F::Wide,
) -> Result<Option<C>>
where
    F: Flow,
    C: Cost,
{
    let sent = min_cost_flow(graph, source, sink, Some(amount))?;
    Ok((sent.flow == amount).then_some(sent.cost))
}

/// Minimum cost for every flow amount up to the maximum flow, computed in a
/// single run.
pub fn cost_table<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
) -> Result<CostTable<F::Wide, C>>
where
    F: Flow,
    C: Cost,
{
    let mut segments = Vec::new();
    let mut solver = SuccessiveShortestPaths::new(graph, source, sink)?;
    let mut flow = F::zero().widen();
    let mut cost = C::zero();

    solver.run(None, |amount, unit_cost| {
        segments.push(Segment {
            start_flow: flow,
            start_cost: cost,
            amount,
            unit_cost,
        });
        flow = flow + amount;
        cost = cost + unit_cost * C::from_flow(amount);
    });

    Ok(CostTable { segments })
}

struct ShortestPath<F, C> {
    arcs: Vec<ResidualArc>,
    bottleneck: F,
    unit_cost: C,
}

struct SuccessiveShortestPaths<'a, F, C>
where
    F: Flow,
    C: Cost,
{
    graph: &'a mut FlowGraph<F, C>,
    source: usize,
    sink: usize,
    potential: Vec<C>,
}

impl<'a, F, C> SuccessiveShortestPaths<'a, F, C>
where
    F: Flow,
    C: Cost,
{
    fn new(
        graph: &'a mut FlowGraph<F, C>,
        source: NodeHandle,
        sink: NodeHandle,
    ) -> Result<Self> {
        graph.check_terminals(source, sink)?;
        graph.clear_flow();

        let potential = initial_potentials(graph, source.index)?;
        Ok(SuccessiveShortestPaths {
            graph,
            source: source.index,
            sink: sink.index,
            potential,
        })
    }

    /// Augments along cheapest paths until `target` units are sent or the
    /// sink becomes unreachable. `on_path` sees every augmentation as
    /// `(amount, cost per unit)`.
    fn run(
        &mut self,
        target: Option<F::Wide>,
        mut on_path: impl FnMut(F::Wide, C),
    ) -> FlowCost<F::Wide, C> {
        let mut sent = FlowCost {
            flow: F::zero().widen(),
            cost: C::zero(),
        };
        let mut paths = 0usize;

        loop {
            let remaining = match target {
                Some(target) if sent.flow >= target => break,
                Some(target) => Some(target - sent.flow),
                None => None,
            };
            let Some(path) = self.next_path() else {
                break;
            };

            let amount = match remaining {
                Some(left) if left < path.bottleneck.widen() => F::narrow(left),
                _ => path.bottleneck,
            };
            for &arc in &path.arcs {
                self.graph.augment(arc, amount);
            }

            sent.flow = sent.flow + amount.widen();
            sent.cost = sent.cost + path.unit_cost * C::from_flow(amount);
            paths += 1;
            trace!(
                "path of {} arcs: {:?} units at {:?} each",
                path.arcs.len(),
                amount,
                path.unit_cost
            );
            on_path(amount.widen(), path.unit_cost);
        }

        debug!(
            "successive shortest paths: {} paths, flow {:?}, cost {:?}",
            paths, sent.flow, sent.cost
        );
        sent
    }

    /// Dijkstra on reduced costs. Shifts the potentials by the distances found
    /// and returns the cheapest residual path to the sink, if any.
    fn next_path(&mut self) -> Option<ShortestPath<F, C>> {
        let n = self.graph.node_count();
        let mut dist: Vec<Option<C>> = vec![None; n];
        let mut via: Vec<Option<ResidualArc>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[self.source] = Some(C::zero());
        heap.push(Reverse((C::zero(), self.source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if dist[u].is_some_and(|best| d > best) {
                continue;
            }
            for &arc in self.graph.arcs(u) {
                if self.graph.residual(arc) == F::zero() {
                    continue;
                }
                let v = self.graph.head(arc);
                let reduced = self.graph.arc_cost(arc) + self.potential[u] - self.potential[v];
                let candidate = d + reduced;
                if dist[v].is_none_or(|best| candidate < best) {
                    dist[v] = Some(candidate);
                    via[v] = Some(arc);
                    heap.push(Reverse((candidate, v)));
                }
            }
        }

        dist[self.sink]?;

        for (potential, distance) in self.potential.iter_mut().zip(&dist) {
            if let Some(distance) = distance {
                *potential = *potential + *distance;
            }
        }

        let mut arcs = Vec::new();
        let mut node = self.sink;
        while node != self.source {
            let arc = via[node]?;
            arcs.push(arc);
            node = self.graph.head(arc.reverse());
        }
        arcs.reverse();

        let bottleneck = arcs
            .iter()
            .map(|&arc| self.graph.residual(arc))
            .min()
            .unwrap_or_else(F::zero);
        let unit_cost = arcs.iter().map(|&arc| self.graph.arc_cost(arc)).sum();

        Some(ShortestPath {
            arcs,
            bottleneck,
            unit_cost,
        })
    }
}

/// Bellman-Ford distances from `source` over arcs with residual capacity.
/// Nodes it cannot reach get potential zero; they stay unreachable for the
/// rest of the run.
fn initial_potentials<F, C>(graph: &FlowGraph<F, C>, source: usize) -> Result<Vec<C>>
where
    F: Flow,
    C: Cost,
{
    let n = graph.node_count();
    let mut distances: Vec<Option<C>> = vec![None; n];
    distances[source] = Some(C::zero());

    // Relax |V| times; an update in the last round means a negative cycle.
    for round in 0..n {
        let mut updated = false;

        for u in 0..n {
            let Some(distance) = distances[u] else {
                continue;
            };
            for &arc in graph.arcs(u) {
                if graph.residual(arc) == F::zero() {
                    continue;
                }
                let v = graph.head(arc);
                let candidate = distance + graph.arc_cost(arc);
                if distances[v].is_none_or(|best| candidate < best) {
                    if round == n - 1 {
                        return Err(FlowError::NegativeCycle);
                    }
                    distances[v] = Some(candidate);
                    updated = true;
                }
            }
        }

        if !updated {
            break;
        }
    }

    Ok(distances
        .into_iter()
        .map(|distance| distance.unwrap_or_else(C::zero))
        .collect())
}
