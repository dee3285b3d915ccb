use crate::{
    CapacitatedGraph, Cost, EdgeHandle, Flow, FlowEdge, FlowError, NodeHandle, Result,
    edge::ResidualArc,
};

/// Sparse flow network: an edge list plus, for every node, the residual arcs
/// leaving it.
///
/// Every stored edge contributes a forward arc at its tail and a backward arc
/// at its head. Parallel edges stay separate.
#[derive(Clone, Debug)]
pub struct FlowGraph<F, C = i64>
where
    F: Flow,
    C: Cost,
{
    edges: Vec<FlowEdge<F, C>>,
    adjacency: Vec<Vec<ResidualArc>>,
}

impl<F, C> Default for FlowGraph<F, C>
where
    F: Flow,
    C: Cost,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<F, C> FlowGraph<F, C>
where
    F: Flow,
    C: Cost,
{
    pub fn new() -> Self {
        FlowGraph {
            edges: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn with_nodes(node_count: usize) -> Self {
        FlowGraph {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Builds a graph with one edge per positive entry of a square capacity
    /// matrix.
    pub fn from_capacity_matrix(rows: &[Vec<F>]) -> Result<Self> {
        let n = rows.len();
        let mut graph = Self::with_nodes(n);

        for (u, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(FlowError::MalformedMatrix {
                    row: u,
                    len: row.len(),
                    expected: n,
                });
            }
            for (v, &capacity) in row.iter().enumerate() {
                if capacity != F::zero() {
                    graph.add_edge(
                        NodeHandle { index: u },
                        NodeHandle { index: v },
                        capacity,
                    )?;
                }
            }
        }

        Ok(graph)
    }

    pub fn add_node(&mut self) -> NodeHandle {
        let index = self.adjacency.len();
        self.adjacency.push(Vec::new());
        NodeHandle { index }
    }

    pub fn node(&self, index: usize) -> Result<NodeHandle> {
        <Self as CapacitatedGraph>::node(self, index)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeHandle> {
        (0..self.adjacency.len()).map(|index| NodeHandle { index })
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds an edge with zero cost.
    pub fn add_edge(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        capacity: F,
    ) -> Result<EdgeHandle> {
        self.add_edge_with_cost(from, to, capacity, C::zero())
    }

    pub fn add_edge_with_cost(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        capacity: F,
        cost: C,
    ) -> Result<EdgeHandle> {
        self.node(from.index)?;
        self.node(to.index)?;
        if capacity < F::zero() {
            return Err(FlowError::NegativeCapacity {
                from: from.index,
                to: to.index,
            });
        }

        let index = self.edges.len();
        self.edges.push(FlowEdge {
            from,
            to,
            capacity,
            flow: F::zero(),
            cost,
        });
        self.adjacency[from.index].push(ResidualArc::forward(index));
        self.adjacency[to.index].push(ResidualArc::backward(index));

        Ok(EdgeHandle { index })
    }

    pub fn edge(&self, edge: EdgeHandle) -> &FlowEdge<F, C> {
        &self.edges[edge.index]
    }

    pub fn get_flow(&self, edge: EdgeHandle) -> F {
        self.edges[edge.index].flow
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeHandle, &FlowEdge<F, C>)> {
        self.edges
            .iter()
            .enumerate()
            .map(|(index, edge)| (EdgeHandle { index }, edge))
    }

    /// Per-edge flow assignment, in insertion order.
    pub fn flows(&self) -> impl Iterator<Item = (EdgeHandle, F)> + '_ {
        self.edges().map(|(handle, edge)| (handle, edge.flow))
    }

    /// Sum of `flow * cost` over all edges.
    ///
    /// # Panics
    ///
    /// Panics if the flow on an edge does not fit in the cost type, e.g. a
    /// `u64` flow above `i64::MAX` with the default cost type.
    pub fn total_cost(&self) -> C {
        self.edges
            .iter()
            .map(|edge| C::from_flow(edge.flow) * edge.cost)
            .sum()
    }

    /// Flow entering `node` minus flow leaving it. Signed, so it is reported
    /// in the cost type.
    ///
    /// # Panics
    ///
    /// Panics if the flow on an incident edge does not fit in the cost type.
    /// Solvers track excess in [`Flow::Wide`] and never call this.
    pub fn excess(&self, node: NodeHandle) -> C {
        self.adjacency[node.index]
            .iter()
            .map(|&arc| {
                let flow = C::from_flow(self.edges[arc.edge()].flow);
                if arc.is_forward() { -flow } else { flow }
            })
            .sum()
    }

    pub fn clear_flow(&mut self) {
        for edge in &mut self.edges {
            edge.flow = F::zero();
        }
    }

    pub(crate) fn arcs(&self, node: usize) -> &[ResidualArc] {
        &self.adjacency[node]
    }

    pub(crate) fn head(&self, arc: ResidualArc) -> usize {
        let edge = &self.edges[arc.edge()];
        if arc.is_forward() {
            edge.to.index
        } else {
            edge.from.index
        }
    }

    pub(crate) fn residual(&self, arc: ResidualArc) -> F {
        let edge = &self.edges[arc.edge()];
        if arc.is_forward() {
            edge.capacity - edge.flow
        } else {
            edge.flow
        }
    }

    pub(crate) fn arc_cost(&self, arc: ResidualArc) -> C {
        let cost = self.edges[arc.edge()].cost;
        if arc.is_forward() { cost } else { -cost }
    }

    /// Sends `amount` along a single residual arc. The caller guarantees
    /// `amount <= residual(arc)`.
    pub(crate) fn augment(&mut self, arc: ResidualArc, amount: F) {
        debug_assert!(amount <= self.residual(arc));
        let edge = &mut self.edges[arc.edge()];
        if arc.is_forward() {
            edge.flow = edge.flow + amount;
        } else {
            edge.flow = edge.flow - amount;
        }
    }
}

impl<F, C> CapacitatedGraph for FlowGraph<F, C>
where
    F: Flow,
    C: Cost,
{
    type Capacity = F;
    type Edge = EdgeHandle;
    type Arc = ResidualArc;

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn add_edge(
        &mut self,
        from: NodeHandle,
        to: NodeHandle,
        capacity: F,
    ) -> Result<EdgeHandle> {
        FlowGraph::add_edge(self, from, to, capacity)
    }

    fn degree(&self, node: NodeHandle) -> usize {
        self.adjacency[node.index].len()
    }

    fn arc(&self, node: NodeHandle, position: usize) -> ResidualArc {
        self.adjacency[node.index][position]
    }

    fn arc_head(&self, arc: ResidualArc) -> NodeHandle {
        NodeHandle {
            index: self.head(arc),
        }
    }

    fn arc_residual(&self, arc: ResidualArc) -> F::Wide {
        self.residual(arc).widen()
    }

    fn push_arc(&mut self, arc: ResidualArc, amount: F::Wide) {
        self.augment(arc, F::narrow(amount));
    }

    fn clear_flow(&mut self) {
        FlowGraph::clear_flow(self);
    }
}
