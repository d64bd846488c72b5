// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The six concrete scenarios from the tunnel/colouring data model, each checked against both
//! decision procedures (brute force and SAT reduction), confirming they agree.

use tunnel_graphs::colouring::{brute_force as colouring_brute_force, ColouredGraph};
use tunnel_graphs::encode::{colouring as colouring_encode, tunnel as tunnel_encode};
use tunnel_graphs::graph::{Graph, SimpleGraph};
use tunnel_graphs::solver::reference::ReferenceSolver;
use tunnel_graphs::solver::{SolveResult, SolverContext};
use tunnel_graphs::tunnel::{brute_force, TunnelNetwork};
use tunnel_graphs::{StackAction, StackSymbol};

fn chain(nodes: &[(&str, &str, &str)], edges: &[(usize, usize)]) -> SimpleGraph {
    let mut g = SimpleGraph::new();
    let mut indices = Vec::new();
    for (name, shape, label) in nodes {
        let idx = g.add_node(*name);
        if !shape.is_empty() {
            g.set_attribute(idx, "shape", *shape);
        }
        if !label.is_empty() {
            g.set_attribute(idx, "label", *label);
        }
        indices.push(idx);
    }
    for &(s, t) in edges {
        g.add_edge(indices[s], indices[t]);
    }
    g
}

fn sat_length<G: Graph>(network: &TunnelNetwork<G>, l_max: usize) -> Option<usize> {
    for l in 1..=l_max {
        let mut solver = ReferenceSolver::new();
        let formula = tunnel_encode::encode(&mut solver, network, l);
        if let SolveResult::Sat(_) = solver.solve(formula) {
            return Some(l);
        }
    }
    None
}

#[test]
fn scenario_1_trivial_transmit() {
    let g = chain(
        &[("A", "square", "4→4"), ("B", "invtriangle", "")],
        &[(0, 1)],
    );
    let network = TunnelNetwork::new(&g).unwrap();

    let (l, steps) = brute_force::search(&network, 1);
    assert_eq!(l, 1);
    assert_eq!(steps[0].action, StackAction::Transmit4);
    assert_eq!(sat_length(&network, 1), Some(1));
}

#[test]
fn scenario_2_push_pop_minimum() {
    let g = chain(
        &[
            ("A", "square", "4↑44"),
            ("B", "", "4→4"),
            ("C", "invtriangle", "44↓4"),
        ],
        &[(0, 1), (1, 2)],
    );
    let network = TunnelNetwork::new(&g).unwrap();

    let (l, steps) = brute_force::search(&network, 5);
    assert_eq!(l, 2);
    assert_eq!(steps[0].action, StackAction::Push44);
    assert_eq!(steps[1].action, StackAction::Pop44);

    let mut stack = vec![StackSymbol::BOTTOM];
    let after_push = tunnel_graphs::action::apply(steps[0].action, &stack).unwrap();
    assert_eq!(after_push, vec![StackSymbol::V4, StackSymbol::V4]);
    stack = after_push;
    let after_pop = tunnel_graphs::action::apply(steps[1].action, &stack).unwrap();
    assert_eq!(after_pop, vec![StackSymbol::V4]);

    assert_eq!(sat_length(&network, 5), Some(2));
}

#[test]
fn scenario_3_ipv6_tunnelling() {
    let g = chain(
        &[
            ("A", "square", "4↑46"),
            ("B", "", "6→6"),
            ("C", "", "6→6"),
            ("D", "invtriangle", "64↓6"),
        ],
        &[(0, 1), (1, 2), (2, 3)],
    );
    let network = TunnelNetwork::new(&g).unwrap();

    let (l, steps) = brute_force::search(&network, 5);
    assert_eq!(l, 3);

    let mut stack = vec![StackSymbol::BOTTOM];
    let mut trace = vec![stack.clone()];
    for step in &steps {
        stack = tunnel_graphs::action::apply(step.action, &stack).unwrap();
        trace.push(stack.clone());
    }
    assert_eq!(
        trace,
        vec![
            vec![StackSymbol::V4],
            vec![StackSymbol::V4, StackSymbol::V6],
            vec![StackSymbol::V4, StackSymbol::V6],
            vec![StackSymbol::V4],
        ]
    );

    assert_eq!(sat_length(&network, 5), Some(3));
}

#[test]
fn scenario_4_no_solution_within_bound() {
    let g = chain(
        &[("A", "square", "4→4"), ("B", "invtriangle", "6→6")],
        &[(0, 1)],
    );
    let network = TunnelNetwork::new(&g).unwrap();

    let (l, steps) = brute_force::search(&network, 4);
    assert_eq!(l, 0);
    assert!(steps.is_empty());
    assert_eq!(sat_length(&network, 4), None);
}

fn triangle() -> SimpleGraph {
    let mut g = SimpleGraph::new();
    let a = g.add_node("A");
    let b = g.add_node("B");
    let c = g.add_node("C");
    g.add_edge(a, b);
    g.add_edge(b, c);
    g.add_edge(c, a);
    g
}

fn bipartite_k23() -> SimpleGraph {
    let mut g = SimpleGraph::new();
    let left: Vec<usize> = (0..2).map(|i| g.add_node(format!("L{i}"))).collect();
    let right: Vec<usize> = (0..3).map(|i| g.add_node(format!("R{i}"))).collect();
    for &l in &left {
        for &r in &right {
            g.add_edge(l, r);
        }
    }
    g
}

#[test]
fn scenario_5_colouring_triangle_is_unsat_for_two_colours() {
    let g = triangle();

    let mut coloured = ColouredGraph::new(&g);
    assert!(!colouring_brute_force::search(&mut coloured, 2));
    for node in 0..g.num_nodes() {
        assert_eq!(coloured.colour(node).unwrap(), -1);
    }

    let mut solver = ReferenceSolver::new();
    let formula = colouring_encode::encode(&mut solver, &g, 2);
    assert!(matches!(solver.solve(formula), SolveResult::Unsat));
}

#[test]
fn scenario_6_colouring_bipartite_is_sat_with_distinct_endpoints() {
    let g = bipartite_k23();

    let mut coloured = ColouredGraph::new(&g);
    assert!(colouring_brute_force::search(&mut coloured, 2));
    for node in 0..g.num_nodes() {
        for neighbour in g.neighbours(node) {
            assert_ne!(
                coloured.colour(node).unwrap(),
                coloured.colour(neighbour).unwrap()
            );
        }
    }

    let mut solver = ReferenceSolver::new();
    let formula = colouring_encode::encode(&mut solver, &g, 2);
    let mut sat_coloured = ColouredGraph::new(&g);
    match solver.solve(formula) {
        SolveResult::Sat(model) => {
            colouring_encode::decode(&mut solver, &model, &mut sat_coloured, 2).unwrap()
        }
        _ => panic!("expected SAT"),
    }
    for node in 0..g.num_nodes() {
        for neighbour in g.neighbours(node) {
            assert_ne!(
                sat_coloured.colour(node).unwrap(),
                sat_coloured.colour(neighbour).unwrap()
            );
        }
    }
}
