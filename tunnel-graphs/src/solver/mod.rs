// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The boolean SAT/SMT façade the encoder builds formulas against.
//!
//! This module defines only the seam: a context that hands out named variables and the five
//! connectives, and a `solve` operation returning [`SolveResult`]. [`reference`] ships the one
//! concrete backend this crate carries; an embedding application is free to swap in a binding to
//! an external solver by implementing [`SolverContext`] itself.

pub mod reference;

use log::warn;

/// An opaque handle to a boolean formula (possibly just a variable) within one [`SolverContext`].
/// Handles from different contexts, or from a context that has since been dropped, are not
/// interchangeable.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Formula(pub(crate) u32);

/// The outcome of one `solve` call.
pub enum SolveResult<M> {
    Unsat,
    Sat(M),
    Unknown,
}

/// A satisfying assignment returned by a successful `solve`.
pub trait Model {
    /// The truth value `formula` takes in this model, or `None` if the model does not speak to
    /// it (e.g. it names a variable the solver never had reason to assign).
    fn value(&self, formula: Formula) -> Option<bool>;
}

/// Evaluates `formula` in `model`, treating an undefined value as `false` and logging a warning,
/// per the façade contract.
pub fn eval<M: Model>(model: &M, formula: Formula, description: &str) -> bool {
    match model.value(formula) {
        Some(value) => value,
        None => {
            warn!("variable `{description}` is undefined in the model; treating as false");
            false
        }
    }
}

/// A boolean-formula construction and solving context.
///
/// Implementations own the arena backing [`Formula`] handles; a handle is only meaningful to the
/// context that produced it. `variable` must be idempotent: two calls with the same name return
/// handles to the same underlying variable.
pub trait SolverContext {
    type Model: Model;

    fn variable(&mut self, name: &str) -> Formula;
    fn and(&mut self, args: &[Formula]) -> Formula;
    fn or(&mut self, args: &[Formula]) -> Formula;
    fn not(&mut self, arg: Formula) -> Formula;
    fn implies(&mut self, antecedent: Formula, consequent: Formula) -> Formula;
    fn iff(&mut self, left: Formula, right: Formula) -> Formula;
    fn solve(&mut self, formula: Formula) -> SolveResult<Self::Model>;
}
