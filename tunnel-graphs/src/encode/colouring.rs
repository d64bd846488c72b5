// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The *k*-colouring SAT reduction: variables `c(n,k)` ("node `n` has colour `k`"), with an
//! exactly-one clause per node and a mutual-exclusion clause per edge per colour.

use itertools::Itertools;

use crate::colouring::ColouredGraph;
use crate::error::ColouringError;
use crate::graph::Graph;
use crate::solver::{eval, Formula, SolverContext};

fn var_c<S: SolverContext>(solver: &mut S, node: usize, colour: usize) -> Formula {
    solver.variable(&format!("c({node},{colour})"))
}

/// Two nodes are adjacent, for colouring purposes, if either directed edge between them is
/// present — colouring treats the underlying graph as undirected.
fn adjacent<G: Graph>(graph: &G, a: usize, b: usize) -> bool {
    graph.has_edge(a, b) || graph.has_edge(b, a)
}

/// Builds the formula satisfiable iff `graph` is `k`-colourable.
pub fn encode<G: Graph, S: SolverContext>(solver: &mut S, graph: &G, k: usize) -> Formula {
    let n = graph.num_nodes();
    let mut clauses: Vec<Formula> = Vec::new();

    for node in 0..n {
        let colour_vars: Vec<Formula> = (0..k).map(|c| var_c(solver, node, c)).collect();
        clauses.push(solver.or(&colour_vars));
        for (&ci, &cj) in colour_vars.iter().tuple_combinations() {
            let not_i = solver.not(ci);
            let not_j = solver.not(cj);
            clauses.push(solver.or(&[not_i, not_j]));
        }
    }

    for (n1, n2) in (0..n).tuple_combinations() {
        if !adjacent(graph, n1, n2) {
            continue;
        }
        for colour in 0..k {
            let c1 = var_c(solver, n1, colour);
            let not_c1 = solver.not(c1);
            let c2 = var_c(solver, n2, colour);
            let not_c2 = solver.not(c2);
            clauses.push(solver.or(&[not_c1, not_c2]));
        }
    }

    solver.and(&clauses)
}

/// Reads the unique true `c(n,k)` for each node of a satisfying model and stores it.
pub fn decode<G: Graph, S: SolverContext>(
    solver: &mut S,
    model: &S::Model,
    graph: &mut ColouredGraph<G>,
    k: usize,
) -> Result<(), ColouringError> {
    let n = graph.num_nodes();
    for node in 0..n {
        let mut found: Option<usize> = None;
        for colour in 0..k {
            let var = var_c(solver, node, colour);
            if eval(model, var, &format!("c({node},{colour})")) {
                if found.is_some() {
                    return Err(ColouringError::DecoderInvariantViolated(format!(
                        "node {node} has more than one true colour variable"
                    )));
                }
                found = Some(colour);
            }
        }
        let colour = found.ok_or_else(|| {
            ColouringError::DecoderInvariantViolated(format!(
                "node {node} has no true colour variable"
            ))
        })?;
        graph
            .set_colour(node, colour as i32)
            .expect("node index came from graph.num_nodes()");
    }
    Ok(())
}
