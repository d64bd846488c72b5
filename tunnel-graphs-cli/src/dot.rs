// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! A minimal reader and writer for the subset of DOT this workspace's examples use: a `digraph`
//! block containing `node [attr=value, ...];` declarations and `source -> target;` edges. This is
//! a convenience grammar for the worked examples, not a general DOT implementation.

use thiserror::Error;
use tunnel_graphs::graph::SimpleGraph;

#[derive(Debug, Error)]
pub enum DotError {
    #[error("expected a `digraph` block")]
    MissingDigraph,
    #[error("unterminated statement: `{0}`")]
    UnterminatedStatement(String),
    #[error("edge statement `{0}` does not reference known nodes")]
    UnknownEdgeEndpoint(String),
}

/// Parses a small DOT-like subset into a [`SimpleGraph`].
///
/// Recognised statements, one per `;`-terminated segment inside the `digraph NAME { ... }` block:
/// - `ident [key=value, key="quoted value", ...];` declares (or updates) a node's attributes.
/// - `ident -> ident;` declares an edge, implicitly declaring either endpoint if not already seen.
pub fn parse(input: &str) -> Result<SimpleGraph, DotError> {
    let body = input
        .split_once('{')
        .and_then(|(_, rest)| rest.rsplit_once('}').map(|(body, _)| body))
        .ok_or(DotError::MissingDigraph)?;

    let name = input
        .split_once("digraph")
        .map(|(_, rest)| rest.split_once('{').map_or(rest, |(name, _)| name).trim())
        .filter(|n| !n.is_empty());

    let mut graph = SimpleGraph::new();
    if let Some(name) = name {
        graph.set_name(name);
    }
    let mut index_of = std::collections::HashMap::new();

    for raw_statement in body.split(';') {
        let statement = raw_statement.trim();
        if statement.is_empty() {
            continue;
        }
        if let Some((source, target)) = statement.split_once("->") {
            let source = source.trim();
            let target = target.trim();
            let source_idx = *index_of
                .entry(source.to_string())
                .or_insert_with(|| graph.add_node(source));
            let target_idx = *index_of
                .entry(target.to_string())
                .or_insert_with(|| graph.add_node(target));
            graph.add_edge(source_idx, target_idx);
        } else if let Some((node, attrs)) = statement.split_once('[') {
            let node = node.trim();
            let attrs = attrs
                .trim_end()
                .strip_suffix(']')
                .ok_or_else(|| DotError::UnterminatedStatement(statement.to_string()))?;
            let node_idx = *index_of
                .entry(node.to_string())
                .or_insert_with(|| graph.add_node(node));
            for pair in attrs.split(',') {
                let pair = pair.trim();
                if pair.is_empty() {
                    continue;
                }
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| DotError::UnterminatedStatement(statement.to_string()))?;
                let value = value.trim().trim_matches('"');
                graph.set_attribute(node_idx, key.trim(), value);
            }
        } else {
            index_of
                .entry(statement.to_string())
                .or_insert_with(|| graph.add_node(statement));
        }
    }

    Ok(graph)
}

/// A single rendered edge: source/target node names and an optional label (the action taken, for
/// a tunnel path; unused for a colouring rendering).
pub struct DotEdge {
    pub source: String,
    pub target: String,
    pub label: Option<String>,
}

/// Renders a `digraph` highlighting `edges` as the found solution, in declaration order.
pub fn emit(name: &str, edges: &[DotEdge]) -> String {
    let mut out = format!("digraph {name} {{\n");
    for edge in edges {
        match &edge.label {
            Some(label) => out.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                edge.source, edge.target, label
            )),
            None => out.push_str(&format!("  \"{}\" -> \"{}\";\n", edge.source, edge.target)),
        }
    }
    out.push_str("}\n");
    out
}
