//! Error types for graph construction and loading.
//!
//! Loading errors are fatal: a loader either yields a complete graph or one of
//! these errors, never a partially built graph.

use std::fmt;

use thiserror::Error;

use crate::graph::{Direction, NodeId};

/// Errors raised by graph accessors and by the builder.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node id outside `0..node_count`.
    #[error("node {node} out of range (graph has {count} nodes)")]
    NodeOutOfRange {
        /// The offending node id.
        node: NodeId,
        /// Number of nodes in the graph.
        count: usize,
    },

    /// An adjacency position outside `0..degree` for the given node.
    #[error("{direction}-edge {index} out of range for node {node} (degree {degree})")]
    EdgeOutOfRange {
        /// Node whose adjacency was queried.
        node: NodeId,
        /// Requested position.
        index: usize,
        /// Degree of `node` in `direction`.
        degree: usize,
        /// Which adjacency list was queried.
        direction: Direction,
    },

    /// A second edge for an ordered pair that already has one.
    #[error("duplicate edge {src} -> {dst}")]
    DuplicateEdge {
        /// Source node.
        src: NodeId,
        /// Destination node.
        dst: NodeId,
    },
}

/// Position inside an encoded graph, used to point at malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line number of a text file.
    Line(usize),
    /// 0-based index of a 16-bit word in a binary file.
    Word(usize),
    /// 0-based index of a whitespace separated token.
    Token(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(n) => write!(f, "line {n}"),
            Self::Word(n) => write!(f, "word {n}"),
            Self::Token(n) => write!(f, "token {n}"),
        }
    }
}

/// Errors that abort loading or writing an encoded graph.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input ended before the declared content was read.
    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof {
        /// What the loader was about to read.
        expected: &'static str,
    },

    /// A record could not be parsed.
    #[error("malformed input at {location}: {reason}")]
    Malformed {
        /// Where the bad record starts.
        location: Location,
        /// Human readable explanation.
        reason: String,
    },

    /// A node record declared an id different from its insertion position.
    #[error("node id mismatch at {location}: expected {expected}, found {found}")]
    IdMismatch {
        /// Where the node record starts.
        location: Location,
        /// The id the node will receive.
        expected: NodeId,
        /// The id written in the file.
        found: NodeId,
    },

    /// The decoded records describe an invalid graph.
    #[error("invalid graph at {location}: {source}")]
    Graph {
        /// Where the offending record starts.
        location: Location,
        /// Underlying builder error.
        #[source]
        source: GraphError,
    },

    /// The graph cannot be expressed in the requested encoding.
    #[error("graph not representable: {0}")]
    Unrepresentable(String),

    /// Underlying reader or writer failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Create a malformed-input error.
    pub fn malformed(location: Location, reason: impl Into<String>) -> Self {
        Self::Malformed {
            location,
            reason: reason.into(),
        }
    }

    /// Wrap a builder error with its position in the input.
    pub const fn graph(location: Location, source: GraphError) -> Self {
        Self::Graph { location, source }
    }
}
