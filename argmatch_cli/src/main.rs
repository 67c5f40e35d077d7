//! argmatch CLI
//!
//! Loads a pattern and a target graph and times repeated subgraph
//! isomorphism searches, printing the solution count and the average time
//! per trial and to the first solution.

#[global_allocator]
/// Global allocator using jemalloc.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod bench;

use argmatch_common::{AttributedGraph, Empty, load_graph};
use clap::Parser;
use tracing::info;

use args::{Args, Command, RunArgs};

/// Node attributes are integers; edges carry nothing.
type Graph = AttributedGraph<i32, Empty>;

/// Executes the argmatch benchmark.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments
/// 3. Loads both graphs
/// 4. Runs timed trials
/// 5. Prints the report
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run(run) => run_benchmark(&run),
    }
}

fn run_benchmark(run: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = run.format.clone().into();
    let pattern: Graph = load_graph(&run.pattern, format)?;
    let target: Graph = load_graph(&run.target, format)?;
    info!(
        pattern_nodes = pattern.node_count(),
        target_nodes = target.node_count(),
        "graphs loaded"
    );

    let report = bench::run_trials(&pattern, &target, run.to_config(), run.budget())?;
    info!(trials = report.trials, states = report.stats.states_explored, "trials complete");

    if run.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
