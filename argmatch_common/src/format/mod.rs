//! On-disk graph encodings.
//!
//! Three encodings are supported, each bit-compatible with the graph databases
//! commonly used to benchmark subgraph isomorphism solvers:
//! - [`text`]: line oriented, with node and edge attributes.
//! - [`binary`]: little-endian 16-bit words, no attributes.
//! - [`gfu`]: token oriented undirected graphs with node attributes.

pub mod binary;
pub mod gfu;
pub mod text;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AttributedGraph, FormatError, TextAttr};

pub use binary::{read_binary, write_binary};
pub use gfu::read_gfu;
pub use text::{read_text, write_text};

/// Upper bound on the nodes reserved up front from a declared count; larger
/// graphs grow as their records are read.
pub(crate) const MAX_PREALLOCATED_NODES: usize = 1 << 16;

/// Selects a loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphFormat {
    /// See [`text`].
    #[default]
    Text,
    /// See [`binary`].
    Binary,
    /// See [`gfu`].
    Gfu,
}

/// Load a graph file in the given encoding.
///
/// Encodings without attributes fill in `N::default()` and `E::default()`.
///
/// # Errors
/// Any [`FormatError`] raised while opening or decoding the file.
pub fn load_graph<N, E>(
    path: impl AsRef<Path>,
    format: GraphFormat,
) -> Result<AttributedGraph<N, E>, FormatError>
where
    N: TextAttr + Default,
    E: TextAttr + Default,
{
    let path = path.as_ref();
    let start = std::time::Instant::now();
    let reader = BufReader::new(File::open(path)?);

    let graph = match format {
        GraphFormat::Text => read_text(reader)?,
        GraphFormat::Binary => read_binary(reader)?,
        GraphFormat::Gfu => read_gfu(reader)?,
    };

    info!(
        "loaded {:?} graph {} in {:?}: {} nodes, {} edges",
        format,
        path.display(),
        start.elapsed(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
