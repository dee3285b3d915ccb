use log::{error, info};
use network_flow::{FlowGraph, MaxFlowAlgorithm, Result, cost_table, max_flow, min_cost_flow};

const HIGHLY_PREFER: i64 = 1;
const PREFER: i64 = 10;
const NEUTRAL: i64 = 100;
const AVOID: i64 = 1000;

const UNLIMITED: i64 = 1_000_000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = route_energy().and_then(|_| compare_max_flow()) {
        error!("{err}");
        std::process::exit(1);
    }
}

/// Routes supply to demand at minimum total preference cost.
fn route_energy() -> Result<()> {
    let mut graph: FlowGraph<i64, i64> = FlowGraph::new();

    let source = graph.add_node();
    let sink = graph.add_node();
    let solar = graph.add_node();
    let grid_source = graph.add_node();
    let grid_sink = graph.add_node();
    let battery_source = graph.add_node();
    let battery_sink = graph.add_node();
    let charger = graph.add_node();

    let routes = [
        ("Solar -> Charger", solar, charger, HIGHLY_PREFER),
        ("Solar -> Grid", solar, grid_sink, AVOID),
        ("Solar -> Battery", solar, battery_sink, PREFER),
        ("Grid -> Charger", grid_source, charger, AVOID),
        ("Grid -> Battery", grid_source, battery_sink, NEUTRAL),
        ("Battery -> Charger", battery_source, charger, PREFER),
        ("Battery -> Grid", battery_source, grid_sink, NEUTRAL),
    ];
    let mut routed = Vec::with_capacity(routes.len());
    for (name, from, to, cost) in routes {
        routed.push((name, graph.add_edge_with_cost(from, to, UNLIMITED, cost)?));
    }

    // Supply
    graph.add_edge_with_cost(source, solar, 40, NEUTRAL)?;
    graph.add_edge_with_cost(source, grid_source, 30, NEUTRAL)?;
    graph.add_edge_with_cost(source, battery_source, 10, NEUTRAL)?;

    // Demand
    graph.add_edge_with_cost(charger, sink, 20, NEUTRAL)?;
    graph.add_edge_with_cost(battery_sink, sink, 50, NEUTRAL)?;
    graph.add_edge_with_cost(grid_sink, sink, 10, NEUTRAL)?;

    let sent = min_cost_flow(&mut graph, source, sink, None)?;
    info!("routed {} units at cost {}", sent.flow, sent.cost);
    for (name, edge) in routed {
        info!("{name}: {}", graph.get_flow(edge));
    }

    let table = cost_table(&mut graph, source, sink)?;
    for (flow, cost) in table.breakpoints() {
        info!("cost curve: {flow} units -> {cost}");
    }

    Ok(())
}

/// Solves one network with every max-flow algorithm.
fn compare_max_flow() -> Result<()> {
    let mut graph: FlowGraph<i64> = FlowGraph::from_capacity_matrix(&[
        vec![0, 16, 0, 13, 0, 0],
        vec![0, 0, 12, 10, 0, 0],
        vec![0, 0, 0, 9, 0, 20],
        vec![0, 4, 0, 0, 14, 0],
        vec![0, 0, 7, 0, 0, 4],
        vec![0, 0, 0, 0, 0, 0],
    ])?;
    let source = graph.node(0)?;
    let sink = graph.node(5)?;

    for algorithm in MaxFlowAlgorithm::ALL {
        let value = max_flow(&mut graph, source, sink, algorithm)?;
        info!("{}: max flow {}", algorithm.name(), value);
    }

    Ok(())
}
