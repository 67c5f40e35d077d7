use std::path::PathBuf;
use std::time::Duration;

use argmatch_common::{Config, GraphFormat, MatchKind, OrderingStrategy};
use clap::{Parser, Subcommand};

/// argmatch - subgraph isomorphism benchmarking over attributed graphs
#[derive(Parser, Debug)]
#[command(name = "argmatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search a pattern in a target repeatedly and report average timings
    Run(RunArgs),
}

/// Arguments of `argmatch run`
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the pattern graph
    pub pattern: PathBuf,

    /// Path to the target graph
    pub target: PathBuf,

    /// Keep running trials until this many seconds have passed
    #[arg(default_value_t = 1.0)]
    pub min_run_time: f64,

    /// Encoding of both graph files
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// Require target edges between matched nodes to exist in the pattern
    #[arg(long, default_value_t = false)]
    pub induced: bool,

    /// Match probability estimate used to order pattern nodes
    #[arg(long, value_enum, default_value = "class")]
    pub ordering: OrderingArg,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl RunArgs {
    /// Convert command-line arguments into the search configuration
    pub fn to_config(&self) -> Config {
        let match_kind = if self.induced {
            MatchKind::Induced
        } else {
            MatchKind::Monomorphism
        };
        Config::builder()
            .match_kind(match_kind)
            .ordering(self.ordering.clone().into())
            .unlimited()
            .build()
    }

    /// The run time budget; negative or non-finite values mean a single trial.
    pub fn budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.min_run_time).unwrap_or(Duration::ZERO)
    }
}

/// Command-line argument wrapper for GraphFormat
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum FormatArg {
    /// Line oriented text with attributes
    #[value(name = "text")]
    Text,
    /// Little-endian 16-bit words, no attributes
    #[value(name = "binary")]
    Binary,
    /// Undirected GFU
    #[value(name = "gfu")]
    Gfu,
}

impl From<FormatArg> for GraphFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => GraphFormat::Text,
            FormatArg::Binary => GraphFormat::Binary,
            FormatArg::Gfu => GraphFormat::Gfu,
        }
    }
}

/// Command-line argument wrapper for OrderingStrategy
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OrderingArg {
    /// Class population in the target
    #[value(name = "class")]
    Class,
    /// Class population weighted by degree
    #[value(name = "degree")]
    Degree,
}

impl From<OrderingArg> for OrderingStrategy {
    fn from(arg: OrderingArg) -> Self {
        match arg {
            OrderingArg::Class => OrderingStrategy::ClassPopulation,
            OrderingArg::Degree => OrderingStrategy::DegreeWeighted,
        }
    }
}
