// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The tunnel network model: a read-only [`Graph`] enriched with per-node action masks and
//! designated initial/final nodes.

pub mod brute_force;

use log::warn;

use crate::action::{ActionSet, StackAction};
use crate::error::TunnelError;
use crate::graph::Graph;

/// The separator node `label` attributes are tokenized on. This matches the original parser's
/// `\n"` delimiter literally (backslash, `n`, double quote), since node labels are lifted straight
/// out of a DOT attribute string without unescaping.
const LABEL_SEPARATOR: &str = "\\n\"";

/// A directed graph whose nodes may each perform some subset of the ten stack actions, with a
/// distinguished initial and final node.
///
/// `TunnelNetwork` borrows the [`Graph`] it was built from; it never copies or mutates it. It is
/// built once, from a graph's `shape` and `label` attributes, and is immutable for the rest of its
/// lifetime except for the test-only setters documented below.
pub struct TunnelNetwork<'g, G: Graph> {
    graph: &'g G,
    initial: usize,
    r#final: usize,
    action_masks: Vec<ActionSet>,
}

impl<'g, G: Graph> TunnelNetwork<'g, G> {
    /// Builds a `TunnelNetwork` from `graph`'s `shape` and `label` node attributes.
    ///
    /// `shape = "square"` designates the initial node, `shape = "invtriangle"` the final node;
    /// at least one of each must be present, or construction fails with
    /// [`TunnelError::AmbiguousTermini`] (see Open Question (c) in the design notes: this
    /// implementation treats a missing terminus as an input error rather than silently defaulting
    /// to node 0). `label`, when present, is tokenized on [`LABEL_SEPARATOR`] and each recognised
    /// token sets the corresponding bit of that node's action mask (see
    /// [`StackAction::from_token`]); unrecognised tokens are ignored.
    pub fn new(graph: &'g G) -> Result<TunnelNetwork<'g, G>, TunnelError> {
        let n = graph.num_nodes();
        let mut initial: Option<usize> = None;
        let mut r#final: Option<usize> = None;
        let mut action_masks = vec![ActionSet::empty(); n];

        for node in 0..n {
            match graph.node_attribute(node, "shape") {
                Some("square") => initial = Some(node),
                Some("invtriangle") => r#final = Some(node),
                _ => {}
            }
            if let Some(label) = graph.node_attribute(node, "label") {
                for token in label.split(LABEL_SEPARATOR) {
                    if let Some(action) = StackAction::from_token(token) {
                        action_masks[node] |= action;
                    }
                }
            }
        }

        let (initial, r#final) = match (initial, r#final) {
            (Some(i), Some(f)) => (i, f),
            _ => return Err(TunnelError::AmbiguousTermini),
        };

        Ok(TunnelNetwork {
            graph,
            initial,
            r#final,
            action_masks,
        })
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.num_edges()
    }

    pub fn is_edge(&self, source: usize, target: usize) -> bool {
        self.graph.has_edge(source, target)
    }

    pub fn neighbours(&self, node: usize) -> Vec<usize> {
        self.graph.neighbours(node)
    }

    pub fn node_name(&self, node: usize) -> &str {
        self.graph.node_name(node)
    }

    pub fn has_action(&self, node: usize, action: StackAction) -> bool {
        self.action_masks[node].contains(action)
    }

    pub fn actions(&self, node: usize) -> ActionSet {
        self.action_masks[node]
    }

    pub fn initial(&self) -> usize {
        self.initial
    }

    pub fn r#final(&self) -> usize {
        self.r#final
    }

    pub fn name(&self) -> Option<&str> {
        self.graph.name()
    }

    /// Overrides the initial node. Test-only: does not re-validate the rest of the network, and a
    /// caller that sets an out-of-range index will see later operations panic.
    pub fn set_initial(&mut self, initial: usize) {
        if initial >= self.num_nodes() {
            warn!("set_initial: {} is out of range for {} nodes", initial, self.num_nodes());
        }
        self.initial = initial;
    }

    /// Overrides the final node. Test-only, see [`TunnelNetwork::set_initial`].
    pub fn set_final(&mut self, r#final: usize) {
        if r#final >= self.num_nodes() {
            warn!("set_final: {} is out of range for {} nodes", r#final, self.num_nodes());
        }
        self.r#final = r#final;
    }
}
