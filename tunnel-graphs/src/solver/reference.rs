// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! A self-contained reference [`SolverContext`] implementation: Tseitin transformation to CNF,
//! solved by a textbook DPLL search (unit propagation, then branch on the first unassigned
//! variable). It is correctness-first, not performance-first — a real deployment swaps in a
//! binding to an external SAT/SMT solver behind the same trait.

use fxhash::FxHashMap;

use crate::solver::{Formula, Model, SolveResult, SolverContext};

#[derive(Clone, Debug)]
enum Node {
    Var(usize),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Not(Formula),
    Implies(Formula, Formula),
    Iff(Formula, Formula),
}

/// The reference [`SolverContext`]. Construct with [`ReferenceSolver::new`].
#[derive(Default)]
pub struct ReferenceSolver {
    nodes: Vec<Node>,
    var_names: Vec<String>,
    var_by_name: FxHashMap<String, Formula>,
}

impl ReferenceSolver {
    pub fn new() -> ReferenceSolver {
        ReferenceSolver::default()
    }

    fn push(&mut self, node: Node) -> Formula {
        let handle = Formula(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }

    fn node(&self, formula: Formula) -> &Node {
        &self.nodes[formula.0 as usize]
    }
}

impl SolverContext for ReferenceSolver {
    type Model = ReferenceModel;

    fn variable(&mut self, name: &str) -> Formula {
        if let Some(&handle) = self.var_by_name.get(name) {
            return handle;
        }
        let index = self.var_names.len();
        self.var_names.push(name.to_string());
        let handle = self.push(Node::Var(index));
        self.var_by_name.insert(name.to_string(), handle);
        handle
    }

    fn and(&mut self, args: &[Formula]) -> Formula {
        self.push(Node::And(args.to_vec()))
    }

    fn or(&mut self, args: &[Formula]) -> Formula {
        self.push(Node::Or(args.to_vec()))
    }

    fn not(&mut self, arg: Formula) -> Formula {
        self.push(Node::Not(arg))
    }

    fn implies(&mut self, antecedent: Formula, consequent: Formula) -> Formula {
        self.push(Node::Implies(antecedent, consequent))
    }

    fn iff(&mut self, left: Formula, right: Formula) -> Formula {
        self.push(Node::Iff(left, right))
    }

    fn solve(&mut self, formula: Formula) -> SolveResult<ReferenceModel> {
        let mut builder = CnfBuilder::new(self.var_names.len());
        let root_literal = builder.literal_for(self, formula);
        builder.clauses.push(vec![root_literal]);

        match dpll(&builder.clauses, builder.num_vars) {
            Some(assignment) => SolveResult::Sat(ReferenceModel {
                assignment,
                var_by_name: self.var_by_name.clone(),
                nodes: self.nodes.clone(),
            }),
            None => SolveResult::Unsat,
        }
    }
}

/// A satisfying assignment for a [`ReferenceSolver`] formula.
pub struct ReferenceModel {
    assignment: Vec<bool>,
    var_by_name: FxHashMap<String, Formula>,
    nodes: Vec<Node>,
}

impl ReferenceModel {
    /// Looks up the value of the variable named `name`, independent of the [`Formula`] handle it
    /// was constructed with. Returns `None` if no such variable was ever created.
    pub fn value_by_name(&self, name: &str) -> Option<bool> {
        let handle = *self.var_by_name.get(name)?;
        self.value(handle)
    }
}

impl Model for ReferenceModel {
    fn value(&self, formula: Formula) -> Option<bool> {
        match self.nodes.get(formula.0 as usize)? {
            Node::Var(index) => self.assignment.get(*index).copied(),
            _ => None,
        }
    }
}

/// Flattens a [`ReferenceSolver`] formula DAG into CNF via Tseitin transformation, introducing one
/// auxiliary variable per compound subformula and caching by [`Formula`] handle so shared
/// subformulas are only encoded once.
struct CnfBuilder {
    clauses: Vec<Vec<i64>>,
    num_vars: usize,
    cache: FxHashMap<Formula, i64>,
}

impl CnfBuilder {
    fn new(num_original_vars: usize) -> CnfBuilder {
        CnfBuilder {
            clauses: Vec::new(),
            num_vars: num_original_vars,
            cache: FxHashMap::default(),
        }
    }

    fn fresh_var(&mut self) -> i64 {
        self.num_vars += 1;
        self.num_vars as i64
    }

    /// Returns the DIMACS-style literal (1-indexed, negative for negation) that represents the
    /// truth value of `formula`, adding whatever clauses are needed to define it.
    fn literal_for(&mut self, solver: &ReferenceSolver, formula: Formula) -> i64 {
        if let Some(&literal) = self.cache.get(&formula) {
            return literal;
        }
        let literal = match solver.node(formula).clone() {
            Node::Var(index) => (index + 1) as i64,
            Node::Not(arg) => -self.literal_for(solver, arg),
            Node::And(args) => {
                let arg_literals: Vec<i64> =
                    args.iter().map(|&a| self.literal_for(solver, a)).collect();
                let t = self.fresh_var();
                for &a in &arg_literals {
                    self.clauses.push(vec![-t, a]);
                }
                let mut clause: Vec<i64> = arg_literals.iter().map(|&a| -a).collect();
                clause.push(t);
                self.clauses.push(clause);
                t
            }
            Node::Or(args) => {
                let arg_literals: Vec<i64> =
                    args.iter().map(|&a| self.literal_for(solver, a)).collect();
                let t = self.fresh_var();
                let mut clause = vec![-t];
                clause.extend(arg_literals.iter().copied());
                self.clauses.push(clause);
                for &a in &arg_literals {
                    self.clauses.push(vec![-a, t]);
                }
                t
            }
            Node::Implies(antecedent, consequent) => {
                let a = self.literal_for(solver, antecedent);
                let b = self.literal_for(solver, consequent);
                let t = self.fresh_var();
                // t <-> (¬a ∨ b)
                self.clauses.push(vec![-t, -a, b]);
                self.clauses.push(vec![a, t]);
                self.clauses.push(vec![-b, t]);
                t
            }
            Node::Iff(left, right) => {
                let a = self.literal_for(solver, left);
                let b = self.literal_for(solver, right);
                let t = self.fresh_var();
                self.clauses.push(vec![-t, -a, b]);
                self.clauses.push(vec![-t, a, -b]);
                self.clauses.push(vec![t, a, b]);
                self.clauses.push(vec![t, -a, -b]);
                t
            }
        };
        self.cache.insert(formula, literal);
        literal
    }
}

/// Solves a CNF instance (1-indexed literals, `num_vars` variables) by unit propagation plus
/// branch-on-first-unassigned-variable DPLL. Returns the assignment for variables `1..=num_vars`
/// (0-indexed in the result) on success.
fn dpll(clauses: &[Vec<i64>], num_vars: usize) -> Option<Vec<bool>> {
    let mut assignment: Vec<Option<bool>> = vec![None; num_vars];
    if search(clauses, &mut assignment) {
        Some(assignment.into_iter().map(|v| v.unwrap_or(false)).collect())
    } else {
        None
    }
}

fn clause_status(clause: &[i64], assignment: &[Option<bool>]) -> ClauseStatus {
    let mut unassigned = None;
    let mut unassigned_count = 0;
    for &lit in clause {
        let idx = (lit.unsigned_abs() - 1) as usize;
        match assignment[idx] {
            Some(value) if (lit > 0) == value => return ClauseStatus::Satisfied,
            Some(_) => {}
            None => {
                unassigned_count += 1;
                unassigned = Some(lit);
            }
        }
    }
    match unassigned_count {
        0 => ClauseStatus::Conflict,
        1 => ClauseStatus::Unit(unassigned.expect("count says one literal is unassigned")),
        _ => ClauseStatus::Undetermined,
    }
}

enum ClauseStatus {
    Satisfied,
    Conflict,
    Unit(i64),
    Undetermined,
}

fn unit_propagate(clauses: &[Vec<i64>], assignment: &mut Vec<Option<bool>>) -> bool {
    loop {
        let mut propagated = false;
        for clause in clauses {
            match clause_status(clause, assignment) {
                ClauseStatus::Conflict => return false,
                ClauseStatus::Unit(lit) => {
                    let idx = (lit.unsigned_abs() - 1) as usize;
                    assignment[idx] = Some(lit > 0);
                    propagated = true;
                }
                ClauseStatus::Satisfied | ClauseStatus::Undetermined => {}
            }
        }
        if !propagated {
            return true;
        }
    }
}

fn search(clauses: &[Vec<i64>], assignment: &mut Vec<Option<bool>>) -> bool {
    if !unit_propagate(clauses, assignment) {
        return false;
    }

    let mut branch_var = None;
    for clause in clauses {
        match clause_status(clause, assignment) {
            ClauseStatus::Conflict => return false,
            ClauseStatus::Satisfied => {}
            _ if branch_var.is_none() => {
                branch_var = clause
                    .iter()
                    .map(|&l| (l.unsigned_abs() - 1) as usize)
                    .find(|&idx| assignment[idx].is_none());
            }
            _ => {}
        }
    }

    let var = match branch_var {
        Some(v) => v,
        None => return true,
    };

    for &value in &[true, false] {
        let mut trial = assignment.clone();
        trial[var] = Some(value);
        if search(clauses, &mut trial) {
            *assignment = trial;
            return true;
        }
    }
    false
}
