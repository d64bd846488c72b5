// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Error types for the tunnel and colouring problems.
//!
//! Each area of the crate reports failure through its own `thiserror` enum rather than a single
//! catch-all type, so that callers can match on exactly the failures that area can produce.

use thiserror::Error;

/// Errors that can occur while constructing or solving a [`crate::tunnel::TunnelNetwork`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TunnelError {
    /// The underlying graph's `shape` attributes did not unambiguously designate both an initial
    /// (`square`) and a final (`invtriangle`) node.
    #[error("graph does not unambiguously designate both an initial and a final node via `shape`")]
    AmbiguousTermini,

    /// A node or edge index passed across the API was out of range.
    #[error("node index {0} is out of range for a network with {1} nodes")]
    NodeOutOfRange(usize, usize),

    /// The SAT/SMT model returned by the solver violated an invariant the decoder depends on
    /// (more than one, or no, `(node, height)` pair was true at some path position, or a stack
    /// height changed by something other than -1, 0, or +1 between consecutive positions). This
    /// is a contract violation by the encoder or the solver, not a recoverable input error.
    #[error("solver model violates decoder invariant: {0}")]
    DecoderInvariantViolated(String),
}

/// Errors that can occur while constructing or solving a [`crate::colouring::ColouredGraph`]
/// problem.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ColouringError {
    /// A node or colour index passed across the API was out of range.
    #[error("node index {0} is out of range for a graph with {1} nodes")]
    NodeOutOfRange(usize, usize),

    /// The SAT model violated the decoder's exactly-one-colour invariant for some node.
    #[error("solver model violates decoder invariant: {0}")]
    DecoderInvariantViolated(String),
}
