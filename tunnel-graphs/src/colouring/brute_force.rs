// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Brute-force *k*-colouring by backtracking node assignment.

use crate::colouring::ColouredGraph;
use crate::graph::Graph;

/// Attempts to colour `graph` with `k` colours, assigning nodes `0..N-1` in order and pruning as
/// soon as a coloured neighbour shares a candidate colour.
///
/// Returns `true` and leaves `graph`'s colours set on success. Returns `false` and resets every
/// node back to `-1` on failure.
pub fn search<G: Graph>(graph: &mut ColouredGraph<G>, k: i32) -> bool {
    if assign(graph, 0, k) {
        true
    } else {
        graph.reset();
        false
    }
}

fn assign<G: Graph>(graph: &mut ColouredGraph<G>, node: usize, k: i32) -> bool {
    if node == graph.num_nodes() {
        return true;
    }
    for colour in 0..k {
        if is_safe(graph, node, colour) {
            graph.set_colour(node, colour).expect("node is in range");
            if assign(graph, node + 1, k) {
                return true;
            }
            graph.set_colour(node, -1).expect("node is in range");
        }
    }
    false
}

fn is_safe<G: Graph>(graph: &ColouredGraph<G>, node: usize, colour: i32) -> bool {
    // Colouring is on an undirected graph's incidence, but the underlying Graph is directed;
    // check both edge directions so an edge recorded either way is still respected.
    for other in 0..graph.num_nodes() {
        if other != node
            && (graph.graph().has_edge(node, other) || graph.graph().has_edge(other, node))
            && graph.colour(other).unwrap_or(-1) == colour
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;

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
    fn triangle_is_not_2_colourable() {
        let g = triangle();
        let mut cg = ColouredGraph::new(&g);
        assert!(!search(&mut cg, 2));
        for node in 0..cg.num_nodes() {
            assert_eq!(cg.colour(node).unwrap(), -1);
        }
    }

    #[test]
    fn bipartite_graph_is_2_colourable_with_distinct_endpoints() {
        let g = bipartite_k23();
        let mut cg = ColouredGraph::new(&g);
        assert!(search(&mut cg, 2));
        for node in 0..g.num_nodes() {
            for neighbour in g.neighbours(node) {
                assert_ne!(cg.colour(node).unwrap(), cg.colour(neighbour).unwrap());
            }
        }
    }
}
