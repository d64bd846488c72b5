// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Iterative-deepening brute-force search for a valid simple path through a [`TunnelNetwork`].

use crate::action::{apply, StackAction};
use crate::graph::Graph;
use crate::symbol::StackSymbol;
use crate::tunnel::TunnelNetwork;

/// One step of a found path: the edge it traverses and the action taken on it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Step {
    pub source: usize,
    pub target: usize,
    pub action: StackAction,
}

/// Searches for the shortest valid simple path of length `1..=l_max`.
///
/// Returns `(0, Vec::new())` if no such path exists. Otherwise returns `(l, steps)` with
/// `steps.len() == l`, for the smallest `l` admitting a valid simple path.
///
/// Iteration order is fixed: for `l = 1, 2, ..., l_max`, neighbours are tried in ascending index
/// order and actions in declaration order ([`StackAction::ALL`]), so the result is deterministic.
pub fn search<G: Graph>(network: &TunnelNetwork<G>, l_max: usize) -> (usize, Vec<Step>) {
    let n = network.num_nodes();
    for l in 1..=l_max {
        let mut visited = vec![false; n];
        let mut steps = Vec::with_capacity(l);
        let mut stack = vec![StackSymbol::BOTTOM];
        if dfs(network, &mut visited, &mut steps, &mut stack, network.initial(), 0, l) {
            return (l, steps);
        }
    }
    (0, Vec::new())
}

fn dfs<G: Graph>(
    network: &TunnelNetwork<G>,
    visited: &mut [bool],
    steps: &mut Vec<Step>,
    stack: &mut Vec<StackSymbol>,
    u: usize,
    p: usize,
    l: usize,
) -> bool {
    if u == network.r#final() && p >= 1 && stack.len() == 1 && stack[0] == StackSymbol::BOTTOM {
        return true;
    }
    if p == l {
        return false;
    }

    visited[u] = true;
    for v in network.neighbours(u) {
        if visited[v] {
            continue;
        }
        for action in StackAction::ALL {
            if !network.has_action(u, action) {
                continue;
            }
            if let Some(new_stack) = apply(action, stack) {
                let saved_stack = stack.clone();
                *stack = new_stack;
                steps.push(Step {
                    source: u,
                    target: v,
                    action,
                });
                if dfs(network, visited, steps, stack, v, p + 1, l) {
                    return true;
                }
                steps.pop();
                *stack = saved_stack;
            }
        }
    }
    visited[u] = false;
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;
    use crate::tunnel::TunnelNetwork;

    fn build(nodes: &[(&str, &str, &str)], edges: &[(usize, usize)]) -> SimpleGraph {
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

    #[test]
    fn trivial_transmit() {
        let g = build(
            &[("A", "square", "4→4"), ("B", "invtriangle", "")],
            &[(0, 1)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let (l, steps) = search(&network, 1);
        assert_eq!(l, 1);
        assert_eq!(
            steps,
            vec![Step {
                source: 0,
                target: 1,
                action: StackAction::Transmit4,
            }]
        );
    }

    #[test]
    fn push_pop_minimum() {
        let g = build(
            &[
                ("A", "square", "4↑44"),
                ("B", "", "4→4"),
                ("C", "invtriangle", "44↓4"),
            ],
            &[(0, 1), (1, 2)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let (l, steps) = search(&network, 5);
        assert_eq!(l, 2);
        assert_eq!(steps[0].action, StackAction::Push44);
        assert_eq!(steps[1].action, StackAction::Pop44);
    }

    #[test]
    fn ipv6_tunnelling() {
        // push(6, 4) is token "4↑46"; pop(6, 4) is token "64↓6" (per the data model's token table).
        let g = build(
            &[
                ("A", "square", "4↑46"),
                ("B", "", "6→6"),
                ("C", "", "6→6"),
                ("D", "invtriangle", "64↓6"),
            ],
            &[(0, 1), (1, 2), (2, 3)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let (l, steps) = search(&network, 5);
        assert_eq!(l, 3);
        assert_eq!(steps[0].action, StackAction::Push46);
        assert_eq!(steps[2].action, StackAction::Pop64);
    }

    #[test]
    fn no_solution_within_bound_returns_zero() {
        let g = build(
            &[("A", "square", "4→4"), ("B", "invtriangle", "6→6")],
            &[(0, 1)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let (l, steps) = search(&network, 3);
        assert_eq!(l, 0);
        assert!(steps.is_empty());
    }

    #[test]
    fn simplicity_no_repeated_source_node() {
        let g = build(
            &[
                ("A", "square", "4↑44"),
                ("B", "", "4→4"),
                ("C", "invtriangle", "44↓4"),
            ],
            &[(0, 1), (1, 2)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let (_, steps) = search(&network, 5);
        let mut sources: Vec<usize> = steps.iter().map(|s| s.source).collect();
        let before = sources.len();
        sources.sort_unstable();
        sources.dedup();
        assert_eq!(sources.len(), before);
    }
}
