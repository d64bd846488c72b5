// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! The read-only graph view the core depends on.
//!
//! The core never parses graph description files and never mutates a graph once built; it only
//! asks of its input the handful of things [`Graph`] exposes. [`SimpleGraph`] is a minimal, owned
//! implementation good enough to build networks in tests and in the CLI collaborator; a real
//! embedding application is free to implement [`Graph`] directly over whatever representation its
//! own parser produces.

use fxhash::FxHashMap;

use crate::arena::{Arena, Handle};

/// A read-only directed graph with string node names and string-valued per-node attributes.
///
/// Nodes are addressed by a dense index `0..num_nodes()`, matching the data model's convention.
pub trait Graph {
    fn num_nodes(&self) -> usize;

    /// Whether `(source, target)` is an edge of the graph.
    fn has_edge(&self, source: usize, target: usize) -> bool;

    /// The textual name of `node`, as it would appear in a DOT rendering.
    fn node_name(&self, node: usize) -> &str;

    /// The value of attribute `key` on `node`, if the parser recorded one.
    fn node_attribute(&self, node: usize, key: &str) -> Option<&str>;

    /// The total number of edges. The default implementation is O(N²); implementations backed by
    /// an adjacency list should override it.
    fn num_edges(&self) -> usize {
        let n = self.num_nodes();
        let mut count = 0;
        for u in 0..n {
            for v in 0..n {
                if self.has_edge(u, v) {
                    count += 1;
                }
            }
        }
        count
    }

    /// The neighbours of `node`, in ascending index order. The default implementation scans all
    /// nodes; implementations backed by an adjacency list should override it.
    fn neighbours(&self, node: usize) -> Vec<usize> {
        (0..self.num_nodes())
            .filter(|&v| self.has_edge(node, v))
            .collect()
    }

    /// The name of the graph as a whole, if the parser recorded one (e.g. a DOT `digraph` name).
    fn name(&self) -> Option<&str> {
        None
    }
}

struct NodeData {
    name: String,
    attributes: FxHashMap<String, String>,
}

/// An owned, in-memory [`Graph`] implementation, built incrementally with [`SimpleGraph::add_node`]
/// and [`SimpleGraph::add_edge`].
pub struct SimpleGraph {
    nodes: Arena<NodeData>,
    adjacency: Vec<Vec<usize>>,
    name: Option<String>,
}

impl SimpleGraph {
    pub fn new() -> SimpleGraph {
        SimpleGraph {
            nodes: Arena::new(),
            adjacency: Vec::new(),
            name: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Adds a node named `name` and returns its index.
    pub fn add_node(&mut self, name: impl Into<String>) -> usize {
        let handle: Handle<NodeData> = self.nodes.add(NodeData {
            name: name.into(),
            attributes: FxHashMap::default(),
        });
        self.adjacency.push(Vec::new());
        handle.as_usize()
    }

    /// Sets attribute `key` to `value` on `node`.
    pub fn set_attribute(&mut self, node: usize, key: impl Into<String>, value: impl Into<String>) {
        let handle: Handle<NodeData> = Handle::new(node as u32);
        self.nodes
            .get_mut(handle)
            .attributes
            .insert(key.into(), value.into());
    }

    /// Adds a directed edge from `source` to `target`.
    pub fn add_edge(&mut self, source: usize, target: usize) {
        if !self.adjacency[source].contains(&target) {
            self.adjacency[source].push(target);
            self.adjacency[source].sort_unstable();
        }
    }
}

impl Graph for SimpleGraph {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn has_edge(&self, source: usize, target: usize) -> bool {
        self.adjacency
            .get(source)
            .map(|targets| targets.contains(&target))
            .unwrap_or(false)
    }

    fn node_name(&self, node: usize) -> &str {
        &self.nodes.get(Handle::new(node as u32)).name
    }

    fn node_attribute(&self, node: usize, key: &str) -> Option<&str> {
        self.nodes
            .get(Handle::new(node as u32))
            .attributes
            .get(key)
            .map(String::as_str)
    }

    fn num_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    fn neighbours(&self, node: usize) -> Vec<usize> {
        self.adjacency[node].clone()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
