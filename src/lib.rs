mod capacitated;
mod cost;
pub mod cut;
mod dinic;
mod edge;
mod edmonds_karp;
mod error;
mod flow;
mod graph;
mod matrix;
mod max_flow;
pub mod min_cost;
mod node;
pub mod push_relabel;

#[cfg(test)]
mod fixtures;

pub use capacitated::CapacitatedGraph;
pub use cost::Cost;
pub use dinic::{dinic, dinic_with_stats};
pub use edge::*;
pub use edmonds_karp::{edmonds_karp, edmonds_karp_with_stats};
pub use error::{FlowError, Result};
pub use flow::{Flow, Wide};
pub use graph::*;
pub use matrix::{CapacityMatrix, MatrixArc};
pub use max_flow::*;
pub use min_cost::{CostTable, FlowCost, cost_table, min_cost_flow, min_cost_for};
pub use node::*;
pub use push_relabel::{PushRelabel, push_relabel, push_relabel_highest_label};
