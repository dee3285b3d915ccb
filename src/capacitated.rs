use num::Zero;

use crate::{Flow, FlowError, NodeHandle, Result, Wide};

/// The capability shared by the sparse and the dense graph representations:
/// add capacity, walk the residual arcs leaving a node and move flow along
/// them.
///
/// Engines written against this trait (Edmonds-Karp, push-relabel) run on
/// either representation. Residual amounts are reported in the wide
/// accumulator type, so sums over parallel edges never overflow.
pub trait CapacitatedGraph {
    /// Capacity and flow amounts.
    type Capacity: Flow;

    /// What `add_edge` hands back to identify the new edge.
    type Edge;

    /// One direction of a stored edge in the residual graph.
    type Arc: Copy;

    fn node_count(&self) -> usize;

    fn add_edge(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        capacity: Self::Capacity,
    ) -> Result<Self::Edge>;

    /// Number of residual arcs leaving `node`, saturated ones included.
    fn degree(&self, node: NodeHandle) -> usize;

    /// The arc at `position` among the `degree(node)` arcs leaving `node`.
    fn arc(&self, node: NodeHandle, position: usize) -> Self::Arc;

    fn arc_head(&self, arc: Self::Arc) -> NodeHandle;

    fn arc_residual(&self, arc: Self::Arc) -> Wide<Self::Capacity>;

    /// Moves `amount` units along `arc`. The caller guarantees that `amount`
    /// does not exceed the residual capacity of the arc.
    fn push_arc(&mut self, arc: Self::Arc, amount: Wide<Self::Capacity>);

    /// Resets every edge to zero flow.
    fn clear_flow(&mut self);

    fn node(&self, index: usize) -> Result<NodeHandle> {
        let node_count = self.node_count();
        if index < node_count {
            Ok(NodeHandle { index })
        } else {
            Err(FlowError::InvalidNode {
                node: index,
                node_count,
            })
        }
    }

    /// Rejects out-of-range terminals and `source == sink`.
    fn check_terminals(&self, source: NodeHandle, sink: NodeHandle) -> Result<()> {
        self.node(source.index)?;
        self.node(sink.index)?;
        if source == sink {
            return Err(FlowError::SourceIsSink(source.index));
        }
        Ok(())
    }

    /// Total residual capacity from `from` to `to`, over all parallel edges
    /// and reverse flow.
    fn residual_capacity(&self, from: NodeHandle, to: NodeHandle) -> Wide<Self::Capacity> {
        (0..self.degree(from))
            .map(|position| self.arc(from, position))
            .filter(|&arc| self.arc_head(arc) == to)
            .fold(<Wide<Self::Capacity>>::zero(), |total, arc| total + self.arc_residual(arc))
    }

    /// Moves `amount` units from `from` to `to` in the residual graph,
    /// spread over parallel arcs in order.
    ///
    /// Fails without changing anything if the residual capacity is smaller
    /// than `amount`.
    fn push_flow(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        amount: Wide<Self::Capacity>,
    ) -> Result<()> {
        if self.residual_capacity(from, to) < amount {
            return Err(FlowError::InsufficientCapacity {
                from: from.index,
                to: to.index,
            });
        }

        let zero = <Wide<Self::Capacity>>::zero();
        let mut remaining = amount;
        for position in 0..self.degree(from) {
            if remaining == zero {
                break;
            }
            let arc = self.arc(from, position);
            if self.arc_head(arc) != to {
                continue;
            }
            let sent = remaining.min(self.arc_residual(arc));
            if sent > zero {
                self.push_arc(arc, sent);
                remaining = remaining - sent;
            }
        }

        Ok(())
    }
}
