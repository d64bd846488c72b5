// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! `tunnel-graphs` decides reachability in a _tunnel network_: a directed graph whose nodes are
//! annotated with the stack operations they may perform on a packet carrying an IPv4/IPv6
//! encapsulation stack. Given a network, an initial node, a final node, and a length bound `L`,
//! the crate answers whether a _simple_ path of length at most `L` exists along which the stack,
//! starting as `[4]`, is transformed back to exactly `[4]` by the time the final node is reached —
//! and if so, produces one.
//!
//! Two independent decision procedures are provided for this question:
//!
//! - [`tunnel::brute_force`], an iterative-deepening depth-first search over `(node, stack)`
//!   configurations;
//! - [`encode::tunnel`], a reduction to a propositional formula handed to a
//!   [`solver::SolverContext`], together with the decoder that reconstructs a path from a
//!   satisfying model.
//!
//! A second, structurally analogous pair solves graph _k_-colouring ([`colouring`],
//! [`encode::colouring`]): it shares the same solver façade and exercises the same encoding idioms
//! (per-entity existence, mutual exclusion, edge constraints) at a much smaller scale.
//!
//! The crate does not parse graph description files, render DOT output, or embed a particular
//! SAT/SMT solver; those concerns live in collaborating crates (see `tunnel-graphs-cli`). What it
//! assumes from its environment is just the [`graph::Graph`] trait (a read-only directed graph
//! with string names and attributes) and the [`solver::SolverContext`] trait (a boolean-formula
//! façade). A reference implementation of the latter ships in [`solver::reference`] so the crate
//! is usable standalone.

pub mod action;
pub mod arena;
pub mod colouring;
pub mod encode;
pub mod error;
pub mod graph;
pub mod solver;
pub mod symbol;
pub mod tunnel;

pub use action::{ActionSet, StackAction};
pub use error::{ColouringError, TunnelError};
pub use symbol::StackSymbol;
pub use tunnel::TunnelNetwork;
