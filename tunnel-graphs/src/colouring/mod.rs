// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The *k*-colouring twin of the tunnel-network problem: same data shape (graph + brute force +
//! SAT reduction), used to exercise the encoder idioms on a much smaller structure.

pub mod brute_force;

use crate::error::ColouringError;
use crate::graph::Graph;

/// A graph with a mutable per-node colour, defaulting to `-1` (unset).
pub struct ColouredGraph<'g, G: Graph> {
    graph: &'g G,
    colours: Vec<i32>,
}

impl<'g, G: Graph> ColouredGraph<'g, G> {
    pub fn new(graph: &'g G) -> ColouredGraph<'g, G> {
        ColouredGraph {
            graph,
            colours: vec![-1; graph.num_nodes()],
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn colour(&self, node: usize) -> Result<i32, ColouringError> {
        self.colours
            .get(node)
            .copied()
            .ok_or(ColouringError::NodeOutOfRange(node, self.num_nodes()))
    }

    pub fn set_colour(&mut self, node: usize, colour: i32) -> Result<(), ColouringError> {
        if node >= self.colours.len() {
            return Err(ColouringError::NodeOutOfRange(node, self.num_nodes()));
        }
        self.colours[node] = colour;
        Ok(())
    }

    /// Resets every node's colour back to `-1`.
    pub fn reset(&mut self) {
        self.colours.iter_mut().for_each(|c| *c = -1);
    }
}
