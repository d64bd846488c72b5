// -*- coding: utf-8 -*-
// ------------------------------------------------------------------------------------------------
// Copyright © 2021, stack-graphs authors.
// Licensed under either of Apache License, Version 2.0, or MIT license, at your option.
// Please see the LICENSE-APACHE or LICENSE-MIT files in this distribution for license details.
// ------------------------------------------------------------------------------------------------

//! Command-line front-end for `tunnel-graphs`: reads a DOT-like graph, runs either the
//! brute-force or SAT-reduction solver for the Tunnel or Colouring problem, and optionally emits
//! a `.dot` rendering of the solution under `sol/`.

mod dot;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use tunnel_graphs::colouring::{brute_force as colouring_brute_force, ColouredGraph};
use tunnel_graphs::encode::{colouring as colouring_encode, tunnel as tunnel_encode};
use tunnel_graphs::solver::reference::ReferenceSolver;
use tunnel_graphs::solver::{SolveResult, SolverContext};
use tunnel_graphs::tunnel::{brute_force as tunnel_brute_force, TunnelNetwork};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Problem {
    Tunnel,
    Colouring,
}

/// Decides reachability in a tunnel network, or k-colourability of a graph, by brute force or by
/// SAT reduction.
#[derive(Parser, Debug)]
#[command(name = "tunnel-graphs")]
struct Cli {
    /// Path to a DOT-like input graph.
    input: PathBuf,

    /// Which problem to solve.
    #[arg(short = 'P', long, value_enum)]
    problem: Problem,

    /// Length bound (Tunnel) or colour count (Colouring).
    #[arg(short = 'c', long)]
    count: usize,

    /// Use the brute-force solver.
    #[arg(short = 'B', long, conflicts_with = "reduction")]
    brute_force: bool,

    /// Use the SAT reduction.
    #[arg(short = 'R', long)]
    reduction: bool,

    /// Dump the satisfying model to stderr.
    #[arg(short = 'M', long)]
    dump_model: bool,

    /// Dump the constructed formula's variable count to stderr.
    #[arg(short = 'F', long)]
    dump_formula: bool,

    /// Base name for the emitted solution file.
    #[arg(short = 'o', long, default_value = "solution")]
    output: String,

    /// Emit a `.dot` rendering of the solution under `sol/`.
    #[arg(short = 'f', long)]
    emit_file: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let graph = dot::parse(&source).with_context(|| "parsing DOT input")?;

    match cli.problem {
        Problem::Tunnel => run_tunnel(&cli, &graph)?,
        Problem::Colouring => run_colouring(&cli, &graph)?,
    }
    Ok(())
}

fn run_tunnel(cli: &Cli, graph: &tunnel_graphs::graph::SimpleGraph) -> Result<()> {
    use tunnel_graphs::graph::Graph;

    let network = TunnelNetwork::new(graph).context("building tunnel network")?;

    let steps = if cli.brute_force {
        let (length, steps) = tunnel_brute_force::search(&network, cli.count);
        if length == 0 {
            bail!("brute force found no valid path up to length {}", cli.count);
        }
        info!("brute force found a path of length {length}");
        steps
    } else {
        let mut found = None;
        for l in 1..=cli.count {
            let mut solver = ReferenceSolver::new();
            let formula = tunnel_encode::encode(&mut solver, &network, l);
            if cli.dump_formula {
                eprintln!("φ({l}) constructed");
            }
            match solver.solve(formula) {
                SolveResult::Sat(model) => {
                    if cli.dump_model {
                        eprintln!("L={l}: SAT");
                    }
                    let steps = tunnel_encode::decode(&mut solver, &model, &network, l)
                        .context("decoding satisfying model")?;
                    found = Some(steps);
                    break;
                }
                SolveResult::Unsat => continue,
                SolveResult::Unknown => {
                    log::warn!("solver returned UNKNOWN at L={l}; treating as UNSAT");
                    continue;
                }
            }
        }
        match found {
            Some(steps) => steps,
            None => bail!("no satisfying assignment up to L={}", cli.count),
        }
    };

    for step in &steps {
        println!(
            "{} -> {} : {}",
            graph.node_name(step.source),
            graph.node_name(step.target),
            step.action.token()
        );
    }

    if cli.emit_file {
        let edges: Vec<dot::DotEdge> = steps
            .iter()
            .map(|step| dot::DotEdge {
                source: graph.node_name(step.source).to_string(),
                target: graph.node_name(step.target).to_string(),
                label: Some(step.action.token().to_string()),
            })
            .collect();
        write_solution(&cli.output, &edges)?;
    }

    Ok(())
}

fn run_colouring(cli: &Cli, graph: &tunnel_graphs::graph::SimpleGraph) -> Result<()> {
    use tunnel_graphs::graph::Graph;

    let mut coloured = ColouredGraph::new(graph);

    let solved = if cli.brute_force {
        colouring_brute_force::search(&mut coloured, cli.count as i32)
    } else {
        let mut solver = ReferenceSolver::new();
        let formula = colouring_encode::encode(&mut solver, graph, cli.count);
        if cli.dump_formula {
            eprintln!("colouring formula constructed for k={}", cli.count);
        }
        match solver.solve(formula) {
            SolveResult::Sat(model) => {
                if cli.dump_model {
                    eprintln!("k={}: SAT", cli.count);
                }
                colouring_encode::decode(&mut solver, &model, &mut coloured, cli.count)
                    .context("decoding satisfying model")?;
                true
            }
            SolveResult::Unsat => false,
            SolveResult::Unknown => {
                log::warn!("solver returned UNKNOWN; treating as UNSAT");
                false
            }
        }
    };

    if !solved {
        bail!("graph is not {}-colourable", cli.count);
    }

    for node in 0..graph.num_nodes() {
        println!("{}: {}", graph.node_name(node), coloured.colour(node)?);
    }

    if cli.emit_file {
        let edges: Vec<dot::DotEdge> = (0..graph.num_nodes())
            .flat_map(|u| {
                graph
                    .neighbours(u)
                    .into_iter()
                    .map(move |v| (u, v))
                    .collect::<Vec<_>>()
            })
            .map(|(u, v)| dot::DotEdge {
                source: graph.node_name(u).to_string(),
                target: graph.node_name(v).to_string(),
                label: None,
            })
            .collect();
        write_solution(&cli.output, &edges)?;
    }

    Ok(())
}

fn write_solution(name: &str, edges: &[dot::DotEdge]) -> Result<()> {
    fs::create_dir_all("sol").context("creating sol/ directory")?;
    let rendered = dot::emit(name, edges);
    let path = PathBuf::from("sol").join(format!("{name}.dot"));
    fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
