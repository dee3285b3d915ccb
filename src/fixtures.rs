//! Reference networks shared by the solver tests.

use crate::{CapacityMatrix, FlowGraph, NodeHandle, cut};

pub(crate) struct FlowNetwork {
    pub(crate) name: &'static str,
    pub(crate) capacity: Vec<Vec<i64>>,
    pub(crate) source: usize,
    pub(crate) sink: usize,
    pub(crate) max_flow: i128,
}

impl FlowNetwork {
    pub(crate) fn matrix(&self) -> CapacityMatrix<i64> {
        CapacityMatrix::from_rows(self.capacity.clone()).unwrap()
    }

    pub(crate) fn graph(&self) -> FlowGraph<i64> {
        FlowGraph::from_capacity_matrix(&self.capacity).unwrap()
    }
}

/// The network on which plain Ford-Fulkerson may alternate through the
/// unit-capacity middle edge 2000 times.
pub(crate) fn worst_case_network() -> FlowNetwork {
    FlowNetwork {
        name: "ford-fulkerson worst case",
        capacity: vec![
            vec![0, 1000, 1000, 0],
            vec![0, 0, 1, 1000],
            vec![0, 0, 0, 1000],
            vec![0, 0, 0, 0],
        ],
        source: 0,
        sink: 3,
        max_flow: 2000,
    }
}

pub(crate) fn flow_networks() -> Vec<FlowNetwork> {
    vec![
        FlowNetwork {
            name: "cp-algorithms article",
            capacity: vec![
                vec![0, 7, 0, 0, 4, 0],
                vec![0, 0, 5, 3, 0, 0],
                vec![0, 0, 0, 0, 0, 8],
                vec![0, 0, 3, 0, 0, 5],
                vec![0, 3, 0, 2, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
            ],
            source: 0,
            sink: 5,
            max_flow: 10,
        },
        FlowNetwork {
            name: "wikipedia edmonds-karp",
            capacity: vec![
                vec![0, 3, 0, 3, 0, 0, 0],
                vec![0, 0, 4, 0, 0, 0, 0],
                vec![3, 0, 0, 1, 2, 0, 0],
                vec![0, 0, 0, 0, 2, 6, 0],
                vec![0, 1, 0, 0, 0, 0, 1],
                vec![0, 0, 0, 0, 0, 0, 9],
                vec![0, 0, 0, 0, 0, 0, 0],
            ],
            source: 0,
            sink: 6,
            max_flow: 5,
        },
        worst_case_network(),
        FlowNetwork {
            name: "brilliant.org",
            capacity: vec![
                vec![0, 16, 0, 13, 0, 0],
                vec![0, 0, 12, 10, 0, 0],
                vec![0, 0, 0, 9, 0, 20],
                vec![0, 4, 0, 0, 14, 0],
                vec![0, 0, 7, 0, 0, 4],
                vec![0, 0, 0, 0, 0, 0],
            ],
            source: 0,
            sink: 5,
            max_flow: 23,
        },
        FlowNetwork {
            name: "eight nodes",
            capacity: vec![
                vec![0, 10, 5, 15, 0, 0, 0, 0],
                vec![0, 0, 4, 0, 9, 15, 0, 0],
                vec![0, 0, 0, 4, 0, 8, 0, 0],
                vec![0, 0, 0, 0, 0, 0, 16, 0],
                vec![0, 0, 0, 0, 0, 15, 0, 10],
                vec![0, 0, 0, 0, 0, 0, 15, 10],
                vec![0, 0, 6, 0, 0, 0, 0, 10],
                vec![0, 0, 0, 0, 0, 0, 0, 0],
            ],
            source: 0,
            sink: 7,
            max_flow: 28,
        },
        FlowNetwork {
            name: "stanford cs97si",
            capacity: vec![
                vec![0, 0, 10, 0, 0, 12],
                vec![0, 0, 0, 4, 0, 7],
                vec![4, 14, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 0, 0],
                vec![16, 0, 12, 0, 0, 0],
                vec![0, 0, 9, 20, 0, 0],
            ],
            source: 4,
            sink: 3,
            max_flow: 23,
        },
    ]
}

/// Builds a graph from `(from, to, capacity, cost)` tuples.
pub(crate) fn cost_graph(
    node_count: usize,
    edges: &[(usize, usize, i64, i64)],
) -> FlowGraph<i64, i64> {
    let mut graph = FlowGraph::with_nodes(node_count);
    for &(from, to, capacity, cost) in edges {
        let from = graph.node(from).unwrap();
        let to = graph.node(to).unwrap();
        graph.add_edge_with_cost(from, to, capacity, cost).unwrap();
    }
    graph
}

/// Asserts feasibility, optimality and min-cut duality of the flow stored in
/// `graph`.
pub(crate) fn assert_valid_max_flow(
    graph: &FlowGraph<i64, i64>,
    source: NodeHandle,
    sink: NodeHandle,
    value: i128,
) {
    cut::verify_flow(graph, source, sink).unwrap();
    assert_eq!(i128::from(graph.excess(sink)), value);
    assert_eq!(i128::from(graph.excess(source)), -value);

    let cut = cut::min_cut(graph, source).unwrap();
    assert!(!cut.contains(sink), "augmenting path left in residual graph");
    assert_eq!(cut.capacity(), value);
}
