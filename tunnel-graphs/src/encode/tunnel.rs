// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Encodes bounded tunnel-network reachability as a propositional formula, and decodes a
//! satisfying model back into a path.
//!
//! Variables: `x(u,p,h)` ("at position `p` the path is at node `u` with stack-top index `h`"),
//! `y4(p,h)` and `y6(p,h)` ("cell `h` of the stack at position `p` holds `4`/`6`"). The eight
//! clause families below follow the data model's clause numbering; only clause family 8
//! ("transitions") has any real complexity, since it folds in both the choice of action and its
//! effect on the stack.

use itertools::Itertools;

use crate::action::{ActionKind, StackAction};
use crate::error::TunnelError;
use crate::graph::Graph;
use crate::solver::{eval, Formula, SolverContext};
use crate::symbol::StackSymbol;
use crate::tunnel::brute_force::Step;
use crate::tunnel::TunnelNetwork;

/// The maximum stack-top index reachable by an `l`-step path: only pushes grow the stack, and
/// `l/2` pushes require as many matching pops to return to height 1.
pub fn stack_height_bound(l: usize) -> usize {
    l / 2 + 1
}

fn var_x<S: SolverContext>(solver: &mut S, u: usize, p: usize, h: usize) -> Formula {
    solver.variable(&format!("x({u},{p},{h})"))
}

fn var_y<S: SolverContext>(solver: &mut S, symbol: StackSymbol, p: usize, h: usize) -> Formula {
    match symbol {
        StackSymbol::V4 => solver.variable(&format!("y4({p},{h})")),
        StackSymbol::V6 => solver.variable(&format!("y6({p},{h})")),
    }
}

fn carry_forward<S: SolverContext>(solver: &mut S, p: usize, h: usize) -> Formula {
    let y4p = var_y(solver, StackSymbol::V4, p, h);
    let y4p1 = var_y(solver, StackSymbol::V4, p + 1, h);
    let iff4 = solver.iff(y4p, y4p1);
    let y6p = var_y(solver, StackSymbol::V6, p, h);
    let y6p1 = var_y(solver, StackSymbol::V6, p + 1, h);
    let iff6 = solver.iff(y6p, y6p1);
    solver.and(&[iff4, iff6])
}

fn empty_cell<S: SolverContext>(solver: &mut S, p: usize, h: usize) -> Formula {
    let y4 = var_y(solver, StackSymbol::V4, p, h);
    let not_y4 = solver.not(y4);
    let y6 = var_y(solver, StackSymbol::V6, p, h);
    let not_y6 = solver.not(y6);
    solver.and(&[not_y4, not_y6])
}

/// Builds the conjunction of clause family 8's `valid(action, u, p, h_s)` predicate, or `None` if
/// `action` cannot apply at stack-top index `h_s` under the current height bound (a push at the
/// ceiling, or a pop at height 0).
fn valid_action<G: Graph, S: SolverContext>(
    solver: &mut S,
    network: &TunnelNetwork<G>,
    u: usize,
    p: usize,
    h_s: usize,
    h_bound: usize,
    action: StackAction,
) -> Option<Formula> {
    let top_before_lit = var_y(solver, action.top_before(), p, h_s);

    let h_s_prime = match action.kind() {
        ActionKind::Transmit => h_s,
        ActionKind::Push => {
            let candidate = h_s + 1;
            if candidate >= h_bound {
                return None;
            }
            candidate
        }
        ActionKind::Pop => {
            if h_s == 0 {
                return None;
            }
            h_s - 1
        }
    };

    let successor_literals: Vec<Formula> = (0..network.num_nodes())
        .filter(|&v| network.is_edge(u, v))
        .map(|v| var_x(solver, v, p + 1, h_s_prime))
        .collect();
    let successor_existence = solver.or(&successor_literals);

    let mut parts = vec![top_before_lit, successor_existence];

    match action.kind() {
        ActionKind::Transmit => {
            for h in 0..h_bound {
                let carry = carry_forward(solver, p, h);
                parts.push(carry);
            }
        }
        ActionKind::Push => {
            let pushed = action.pushed().expect("push action has a pushed symbol");
            let pushed_lit = var_y(solver, pushed, p + 1, h_s_prime);
            parts.push(pushed_lit);
            let other_lit = var_y(solver, pushed.other(), p + 1, h_s_prime);
            let not_other = solver.not(other_lit);
            parts.push(not_other);
            for h in 0..h_bound {
                if h == h_s_prime {
                    continue;
                }
                if h > h_s_prime {
                    let empty = empty_cell(solver, p + 1, h);
                    parts.push(empty);
                } else {
                    let carry = carry_forward(solver, p, h);
                    parts.push(carry);
                }
            }
        }
        ActionKind::Pop => {
            for h in 0..h_bound {
                if h == h_s {
                    let empty = empty_cell(solver, p + 1, h);
                    parts.push(empty);
                } else {
                    let carry = carry_forward(solver, p, h);
                    parts.push(carry);
                }
            }
        }
    }

    Some(solver.and(&parts))
}

/// Builds `φ(L)`: satisfiable iff `network` admits a valid simple path of length exactly `l`.
pub fn encode<G: Graph, S: SolverContext>(
    solver: &mut S,
    network: &TunnelNetwork<G>,
    l: usize,
) -> Formula {
    let n = network.num_nodes();
    let h_bound = stack_height_bound(l);
    let mut clauses: Vec<Formula> = Vec::new();

    // 1. Uniqueness of state.
    for p in 0..=l {
        let mut all_x = Vec::with_capacity(n * h_bound);
        for u in 0..n {
            for h in 0..h_bound {
                all_x.push(var_x(solver, u, p, h));
            }
        }
        clauses.push(solver.or(&all_x));
        for (&xi, &xj) in all_x.iter().tuple_combinations() {
            let not_i = solver.not(xi);
            let not_j = solver.not(xj);
            clauses.push(solver.or(&[not_i, not_j]));
        }
    }

    // 2. Stack cells are consistent.
    for p in 0..=l {
        for h in 0..h_bound {
            let y4 = var_y(solver, StackSymbol::V4, p, h);
            let not_y4 = solver.not(y4);
            let y6 = var_y(solver, StackSymbol::V6, p, h);
            let not_y6 = solver.not(y6);
            clauses.push(solver.or(&[not_y4, not_y6]));
        }
    }

    // 3. No gaps.
    for p in 0..=l {
        for h in 0..h_bound {
            for h2 in (h + 1)..h_bound {
                let empty_h = empty_cell(solver, p, h);
                let empty_h2 = empty_cell(solver, p, h2);
                clauses.push(solver.implies(empty_h, empty_h2));
            }
        }
    }

    // 4. Initial condition.
    {
        clauses.push(var_x(solver, network.initial(), 0, 0));
        clauses.push(var_y(solver, StackSymbol::V4, 0, 0));
        let y6_0 = var_y(solver, StackSymbol::V6, 0, 0);
        clauses.push(solver.not(y6_0));
        for h in 1..h_bound {
            let y4 = var_y(solver, StackSymbol::V4, 0, h);
            clauses.push(solver.not(y4));
            let y6 = var_y(solver, StackSymbol::V6, 0, h);
            clauses.push(solver.not(y6));
        }
    }

    // 5. Final condition.
    {
        clauses.push(var_x(solver, network.r#final(), l, 0));
        clauses.push(var_y(solver, StackSymbol::V4, l, 0));
        let y6_0 = var_y(solver, StackSymbol::V6, l, 0);
        clauses.push(solver.not(y6_0));
        for h in 1..h_bound {
            let y4 = var_y(solver, StackSymbol::V4, l, h);
            clauses.push(solver.not(y4));
            let y6 = var_y(solver, StackSymbol::V6, l, h);
            clauses.push(solver.not(y6));
        }
    }

    // 6. Edge constraint.
    for p in 0..l {
        for u in 0..n {
            for v in 0..n {
                if network.is_edge(u, v) {
                    continue;
                }
                for h1 in 0..h_bound {
                    for h2 in 0..h_bound {
                        let xu = var_x(solver, u, p, h1);
                        let not_xu = solver.not(xu);
                        let xv = var_x(solver, v, p + 1, h2);
                        let not_xv = solver.not(xv);
                        clauses.push(solver.or(&[not_xu, not_xv]));
                    }
                }
            }
        }
    }

    // 7. Simplicity.
    for u in 0..n {
        for (p1, p2) in (0..=l).tuple_combinations() {
            for h1 in 0..h_bound {
                for h2 in 0..h_bound {
                    let x1 = var_x(solver, u, p1, h1);
                    let not_x1 = solver.not(x1);
                    let x2 = var_x(solver, u, p2, h2);
                    let not_x2 = solver.not(x2);
                    clauses.push(solver.or(&[not_x1, not_x2]));
                }
            }
        }
    }

    // 8. Transitions.
    for p in 0..l {
        for u in 0..n {
            for h_s in 0..h_bound {
                let x_u_p_hs = var_x(solver, u, p, h_s);
                let mut disjuncts = Vec::new();
                for action in StackAction::ALL {
                    if !network.has_action(u, action) {
                        continue;
                    }
                    if let Some(valid) = valid_action(solver, network, u, p, h_s, h_bound, action)
                    {
                        disjuncts.push(valid);
                    }
                }
                let rhs = solver.or(&disjuncts);
                clauses.push(solver.implies(x_u_p_hs, rhs));
            }
        }
    }

    solver.and(&clauses)
}

fn top_symbol<S: SolverContext>(
    solver: &mut S,
    model: &S::Model,
    p: usize,
    h: usize,
) -> Result<StackSymbol, TunnelError> {
    let y4 = var_y(solver, StackSymbol::V4, p, h);
    let is4 = eval(model, y4, &format!("y4({p},{h})"));
    let y6 = var_y(solver, StackSymbol::V6, p, h);
    let is6 = eval(model, y6, &format!("y6({p},{h})"));
    match (is4, is6) {
        (true, false) => Ok(StackSymbol::V4),
        (false, true) => Ok(StackSymbol::V6),
        _ => Err(TunnelError::DecoderInvariantViolated(format!(
            "position {p} height {h} does not hold exactly one stack symbol"
        ))),
    }
}

fn push_action(top_before: StackSymbol, pushed: StackSymbol) -> StackAction {
    use StackSymbol::{V4, V6};
    match (top_before, pushed) {
        (V4, V4) => StackAction::Push44,
        (V4, V6) => StackAction::Push46,
        (V6, V4) => StackAction::Push64,
        (V6, V6) => StackAction::Push66,
    }
}

fn pop_action(top_before: StackSymbol, below: StackSymbol) -> StackAction {
    use StackSymbol::{V4, V6};
    match (top_before, below) {
        (V4, V4) => StackAction::Pop44,
        (V4, V6) => StackAction::Pop46,
        (V6, V4) => StackAction::Pop64,
        (V6, V6) => StackAction::Pop66,
    }
}

/// Reconstructs the path a satisfying model of `φ(L)` describes.
pub fn decode<G: Graph, S: SolverContext>(
    solver: &mut S,
    model: &S::Model,
    network: &TunnelNetwork<G>,
    l: usize,
) -> Result<Vec<Step>, TunnelError> {
    let n = network.num_nodes();
    let h_bound = stack_height_bound(l);

    let mut positions: Vec<(usize, usize)> = Vec::with_capacity(l + 1);
    for p in 0..=l {
        let mut found: Option<(usize, usize)> = None;
        for u in 0..n {
            for h in 0..h_bound {
                let x = var_x(solver, u, p, h);
                if eval(model, x, &format!("x({u},{p},{h})")) {
                    if found.is_some() {
                        return Err(TunnelError::DecoderInvariantViolated(format!(
                            "position {p} has more than one true state variable"
                        )));
                    }
                    found = Some((u, h));
                }
            }
        }
        positions.push(found.ok_or_else(|| {
            TunnelError::DecoderInvariantViolated(format!(
                "position {p} has no true state variable"
            ))
        })?);
    }

    let mut steps = Vec::with_capacity(l);
    for p in 0..l {
        let (u_p, h_p) = positions[p];
        let (u_p1, h_p1) = positions[p + 1];
        let delta = h_p1 as i64 - h_p as i64;
        let action = match delta {
            0 => {
                let top = top_symbol(solver, model, p, h_p)?;
                match top {
                    StackSymbol::V4 => StackAction::Transmit4,
                    StackSymbol::V6 => StackAction::Transmit6,
                }
            }
            1 => {
                let a = top_symbol(solver, model, p, h_p)?;
                let b = top_symbol(solver, model, p + 1, h_p1)?;
                push_action(a, b)
            }
            -1 => {
                let b = top_symbol(solver, model, p, h_p)?;
                let a = top_symbol(solver, model, p + 1, h_p1)?;
                pop_action(b, a)
            }
            _ => {
                return Err(TunnelError::DecoderInvariantViolated(format!(
                    "position {p}: stack height changed by {delta}, expected -1, 0 or 1"
                )))
            }
        };
        steps.push(Step {
            source: u_p,
            target: u_p1,
            action,
        });
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SimpleGraph;
    use crate::solver::reference::ReferenceSolver;
    use crate::solver::SolveResult;
    use crate::tunnel::brute_force;

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

    #[test]
    fn trivial_transmit_is_satisfiable_and_decodes() {
        let g = chain(
            &[("A", "square", "4→4"), ("B", "invtriangle", "")],
            &[(0, 1)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let mut solver = ReferenceSolver::new();
        let formula = encode(&mut solver, &network, 1);
        match solver.solve(formula) {
            SolveResult::Sat(model) => {
                let steps = decode(&mut solver, &model, &network, 1).unwrap();
                assert_eq!(steps.len(), 1);
                assert_eq!(steps[0].source, 0);
                assert_eq!(steps[0].target, 1);
                assert_eq!(steps[0].action, StackAction::Transmit4);
            }
            _ => panic!("expected SAT"),
        }
    }

    #[test]
    fn no_solution_within_bound_is_unsat() {
        let g = chain(
            &[("A", "square", "4→4"), ("B", "invtriangle", "6→6")],
            &[(0, 1)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let mut solver = ReferenceSolver::new();
        let formula = encode(&mut solver, &network, 1);
        assert!(matches!(solver.solve(formula), SolveResult::Unsat));
    }

    #[test]
    fn decoded_path_passes_brute_force_soundness_check() {
        let g = chain(
            &[
                ("A", "square", "4↑44"),
                ("B", "", "4→4"),
                ("C", "invtriangle", "44↓4"),
            ],
            &[(0, 1), (1, 2)],
        );
        let network = TunnelNetwork::new(&g).unwrap();
        let mut solver = ReferenceSolver::new();
        let formula = encode(&mut solver, &network, 2);
        let steps = match solver.solve(formula) {
            SolveResult::Sat(model) => decode(&mut solver, &model, &network, 2).unwrap(),
            _ => panic!("expected SAT"),
        };

        let mut stack = vec![StackSymbol::BOTTOM];
        for step in &steps {
            assert!(network.is_edge(step.source, step.target));
            assert!(network.has_action(step.source, step.action));
            stack = crate::action::apply(step.action, &stack).expect("action applies");
        }
        assert_eq!(stack, vec![StackSymbol::BOTTOM]);

        let (bf_l, _) = brute_force::search(&network, 2);
        assert_eq!(bf_l, steps.len());
    }
}
