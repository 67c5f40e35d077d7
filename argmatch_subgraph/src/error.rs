use std::fmt;

use argmatch_common::NodeId;
use thiserror::Error;

/// Which side of the search an input belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphRole {
    /// The graph being searched for.
    Pattern,
    /// The graph being searched in.
    Target,
}

impl fmt::Display for GraphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => write!(f, "pattern"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Inconsistent inputs handed to [`crate::SearchProblem::new`].
///
/// These are checked once before the search starts; the search itself has no
/// failure mode, rejecting a candidate is ordinary control flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The visiting order does not cover the pattern exactly.
    #[error("visiting order has {found} entries but the pattern has {expected} nodes")]
    OrderLengthMismatch {
        /// Pattern node count.
        expected: usize,
        /// Entries in the order.
        found: usize,
    },

    /// The visiting order names a node twice or a node that does not exist.
    #[error("visiting order is not a permutation: node {node} {problem}")]
    OrderNotPermutation {
        /// The offending entry.
        node: NodeId,
        /// What is wrong with it.
        problem: OrderProblem,
    },

    /// A class array has fewer entries than its graph has nodes.
    #[error("{role} class array has {found} entries but the {role} graph has {expected} nodes")]
    ClassesTooShort {
        /// Graph the classes belong to.
        role: GraphRole,
        /// Node count of that graph.
        expected: usize,
        /// Entries in the class array.
        found: usize,
    },

    /// The pattern was classified against a different target table.
    #[error(
        "pattern classes were built against a table of {pattern_table} classes, \
         the target classification has {target_table}"
    )]
    ClassTableMismatch {
        /// Target class count seen by the pattern classification.
        pattern_table: usize,
        /// Target class count of the target classification.
        target_table: usize,
    },
}

/// Why a visiting order entry is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderProblem {
    /// The id is not a pattern node.
    OutOfRange,
    /// The id occurs more than once.
    Repeated,
}

impl fmt::Display for OrderProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "is out of range"),
            Self::Repeated => write!(f, "appears more than once"),
        }
    }
}
