//! Integration tests for the weighted push-relabel engine: the six concrete
//! scenarios and the round-trip/equivalence laws, constructed directly as
//! supply/demand vectors over a single source/sink pair (the common case
//! used by the test corpus).

use weighted_push_relabel::dinic::Dinic;
use weighted_push_relabel::edge::InputEdge;
use weighted_push_relabel::max_flow::{MaxFlow, ResidualEdgeData};
use weighted_push_relabel::solver::solve_without_observer;
use weighted_push_relabel::weight::{TopologicalRankWeight, UnitWeight};

fn single_pair(n: usize, s: usize, t: usize, value: i64) -> (Vec<i64>, Vec<i64>) {
    let mut supply = vec![0; n];
    let mut demand = vec![0; n];
    supply[s] = value;
    demand[t] = value;
    (supply, demand)
}

fn reference_max_flow(n: usize, edges: &[(usize, usize, i64)], s: usize, t: usize) -> i32 {
    let input_edges: Vec<InputEdge<ResidualEdgeData>> = edges
        .iter()
        .map(|&(u, v, c)| InputEdge::new(u, v, ResidualEdgeData::new(c as i32)))
        .collect();
    let _ = n;
    let mut solver = Dinic::from_edge_list(input_edges, s, t);
    solver.run();
    solver.max_flow().expect("dinic run")
}

#[test]
fn scenario_1_six_node_textbook() {
    let n = 6;
    let edges = vec![
        (0, 1, 16),
        (0, 2, 13),
        (1, 2, 10),
        (2, 1, 4),
        (1, 3, 12),
        (2, 4, 14),
        (3, 2, 9),
        (4, 3, 7),
        (3, 5, 20),
        (4, 5, 4),
    ];
    let (supply, demand) = single_pair(n, 0, 5, 23);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 6).unwrap();
    assert_eq!(result.routed_flow, 23);
}

#[test]
fn scenario_2_small_dag_with_bottleneck() {
    let n = 5;
    let edges = vec![(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1), (3, 4, 1)];
    let (supply, demand) = single_pair(n, 0, 4, 1);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 5).unwrap();
    assert_eq!(result.routed_flow, 1);
}

#[test]
fn scenario_3_fractional_discouraging_instance() {
    let n = 4;
    let edges = vec![(0, 1, 5), (2, 1, 1), (1, 2, 6), (2, 3, 7)];
    let (supply, demand) = single_pair(n, 0, 3, 5);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 4).unwrap();
    assert_eq!(result.routed_flow, 5);
}

#[test]
fn scenario_4_topological_rank_weight_matches_unit_weight() {
    // scenario 2's DAG, under a topological-rank weight oracle.
    let n = 5;
    let edges = vec![(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1), (3, 4, 1)];
    let ranks = vec![0, 1, 1, 2, 3];
    let sources: Vec<_> = edges.iter().map(|&(u, _, _)| u).collect();
    let targets: Vec<_> = edges.iter().map(|&(_, v, _)| v).collect();
    let weight = TopologicalRankWeight::new(ranks, sources, targets);

    let (supply, demand) = single_pair(n, 0, 4, 1);
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, n as i64).unwrap();
    assert_eq!(result.routed_flow, 1);
}

#[test]
fn scenario_5_dead_vertex_forcing() {
    let n = 3;
    let edges = vec![(0, 1, 1)];
    let (supply, demand) = single_pair(n, 0, 2, 1);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 3).unwrap();
    assert_eq!(result.routed_flow, 0);
}

#[test]
fn scenario_6_reverse_edge_usage() {
    let n = 6;
    let edges = vec![
        (0, 1, 1),
        (0, 3, 1),
        (1, 2, 1),
        (3, 2, 1),
        (1, 4, 1),
        (4, 5, 1),
        (2, 5, 1),
    ];
    let (supply, demand) = single_pair(n, 0, 5, 2);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 3).unwrap();
    assert_eq!(result.routed_flow, 2);
}

#[test]
fn boundary_empty_edge_set_is_zero_flow() {
    let n = 2;
    let supply = vec![0, 0];
    let demand = vec![0, 0];
    let weight = UnitWeight;
    let result = solve_without_observer(n, &[], &supply, &demand, &weight, 1).unwrap();
    assert_eq!(result.routed_flow, 0);
}

#[test]
fn boundary_single_edge_saturates_to_capacity() {
    let n = 2;
    let edges = vec![(0, 1, 7)];
    let (supply, demand) = single_pair(n, 0, 1, 7);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 1).unwrap();
    assert_eq!(result.routed_flow, 7);
    assert_eq!(result.flow[0], 7);
}

#[test]
fn boundary_path_graph_bottleneck() {
    let n = 4;
    let edges = vec![(0, 1, 3), (1, 2, 5), (2, 3, 2)];
    let (supply, demand) = single_pair(n, 0, 3, 2);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 4).unwrap();
    assert_eq!(result.routed_flow, 2);
}

#[test]
fn boundary_parallel_edges_sum_capacity() {
    let n = 2;
    let edges = vec![(0, 1, 4), (0, 1, 7)];
    let (supply, demand) = single_pair(n, 0, 1, 11);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 1).unwrap();
    assert_eq!(result.routed_flow, 11);
}

#[test]
fn round_trip_matches_reference_solver_on_six_node_textbook() {
    let n = 6;
    let edges = vec![
        (0, 1, 16),
        (0, 2, 13),
        (1, 2, 10),
        (2, 1, 4),
        (1, 3, 12),
        (2, 4, 14),
        (3, 2, 9),
        (4, 3, 7),
        (3, 5, 20),
        (4, 5, 4),
    ];
    let (supply, demand) = single_pair(n, 0, 5, 23);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 6).unwrap();
    let reference = reference_max_flow(n, &edges, 0, 5);
    assert_eq!(result.routed_flow, reference as i64);
}

#[test]
fn determinism_two_runs_agree() {
    let n = 6;
    let edges = vec![
        (0, 1, 16),
        (0, 2, 13),
        (1, 2, 10),
        (2, 1, 4),
        (1, 3, 12),
        (2, 4, 14),
        (3, 2, 9),
        (4, 3, 7),
        (3, 5, 20),
        (4, 5, 4),
    ];
    let (supply, demand) = single_pair(n, 0, 5, 23);
    let weight = UnitWeight;
    let a = solve_without_observer(n, &edges, &supply, &demand, &weight, 6).unwrap();
    let b = solve_without_observer(n, &edges, &supply, &demand, &weight, 6).unwrap();
    assert_eq!(a.flow, b.flow);
    assert_eq!(a.routed_flow, b.routed_flow);
}

#[test]
fn low_height_parameter_routes_a_feasible_but_possibly_suboptimal_flow() {
    let n = 6;
    let edges = vec![
        (0, 1, 16),
        (0, 2, 13),
        (1, 2, 10),
        (2, 1, 4),
        (1, 3, 12),
        (2, 4, 14),
        (3, 2, 9),
        (4, 3, 7),
        (3, 5, 20),
        (4, 5, 4),
    ];
    let (supply, demand) = single_pair(n, 0, 5, 23);
    let weight = UnitWeight;
    let result = solve_without_observer(n, &edges, &supply, &demand, &weight, 1).unwrap();
    assert!(result.routed_flow <= 23);
    for (edge, &(_, _, c)) in edges.iter().enumerate() {
        assert!(result.flow[edge] >= 0 && result.flow[edge] <= c);
    }
}
