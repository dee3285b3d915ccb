use crate::{
    Cost, Flow, FlowGraph, NodeHandle, Result, Wide, dinic, edmonds_karp, push_relabel,
    push_relabel_highest_label,
};

/// Work done by an augmenting-path solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AugmentStats {
    /// Searches of the residual graph that reached the sink. Edmonds-Karp
    /// runs one per augmenting path, Dinic one per level graph.
    pub phases: usize,
    /// Augmenting paths saturated.
    pub augmentations: usize,
}

/// Maximum flow algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxFlowAlgorithm {
    /// Shortest augmenting paths found by BFS
    EdmondsKarp,
    /// Blocking flows on BFS level graphs
    Dinic,
    /// Push-relabel with FIFO vertex selection
    PushRelabelFifo,
    /// Push-relabel with highest label selection
    PushRelabelHighestLabel,
}

impl MaxFlowAlgorithm {
    pub const ALL: [MaxFlowAlgorithm; 4] = [
        MaxFlowAlgorithm::EdmondsKarp,
        MaxFlowAlgorithm::Dinic,
        MaxFlowAlgorithm::PushRelabelFifo,
        MaxFlowAlgorithm::PushRelabelHighestLabel,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaxFlowAlgorithm::EdmondsKarp => "Edmonds-Karp",
            MaxFlowAlgorithm::Dinic => "Dinic",
            MaxFlowAlgorithm::PushRelabelFifo => "Push-Relabel FIFO",
            MaxFlowAlgorithm::PushRelabelHighestLabel => "Push-Relabel Highest Label",
        }
    }
}

/// Computes a maximum flow from `source` to `sink` with the chosen algorithm
/// and leaves the flow assignment in `graph`.
pub fn max_flow<F, C>(
    graph: &mut FlowGraph<F, C>,
    source: NodeHandle,
    sink: NodeHandle,
    algorithm: MaxFlowAlgorithm,
) -> Result<Wide<F>>
where
    F: Flow,
    C: Cost,
{
    match algorithm {
        MaxFlowAlgorithm::EdmondsKarp => edmonds_karp(graph, source, sink),
        MaxFlowAlgorithm::Dinic => dinic(graph, source, sink),
        MaxFlowAlgorithm::PushRelabelFifo => push_relabel(graph, source, sink),
        MaxFlowAlgorithm::PushRelabelHighestLabel => {
            push_relabel_highest_label(graph, source, sink)
        }
    }
}
