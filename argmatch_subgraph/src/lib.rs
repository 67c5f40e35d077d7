//! Subgraph isomorphism search over attributed directed graphs.
//!
//! Given a pattern and a target [`AttributedGraph`](argmatch_common::AttributedGraph),
//! the search enumerates every injective mapping of pattern nodes onto
//! target nodes such that node attributes agree and every pattern edge maps
//! onto a target edge with an equal attribute (and, in induced mode, every
//! target edge between mapped nodes comes from a pattern edge).
//!
//! The pipeline is:
//! 1. [`NodeClassifier::classify`] the target, then
//!    [`NodeClassifier::classify_against`] the pattern;
//! 2. [`NodeSorter::sort_nodes`] the pattern into a visiting order;
//! 3. [`SearchProblem::new`] to validate and precompute candidates;
//! 4. [`SearchProblem::run`] with a [`Visitor`].
//!
//! [`Matcher`] and [`find_subgraphs`] bundle these steps.
//!
//! ```
//! use argmatch_common::{Config, Empty, GraphBuilder};
//! use argmatch_subgraph::find_subgraphs;
//!
//! let mut b = GraphBuilder::new();
//! let (x, y, z) = (b.insert_node('a'), b.insert_node('b'), b.insert_node('b'));
//! b.insert_edge(x, y, Empty).unwrap();
//! b.insert_edge(x, z, Empty).unwrap();
//! let target = b.build();
//!
//! let mut b = GraphBuilder::new();
//! let (p, q) = (b.insert_node('a'), b.insert_node('b'));
//! b.insert_edge(p, q, Empty).unwrap();
//! let pattern = b.build();
//!
//! let found = find_subgraphs(&pattern, &target, Config::default()).unwrap();
//! assert_eq!(found.len(), 2);
//! ```

mod classifier;
mod error;
mod mapping;
mod matcher;
pub mod order;
mod search;
mod state;
mod visitor;

pub use crate::classifier::*;
pub use crate::error::*;
pub use crate::mapping::*;
pub use crate::matcher::*;
pub use crate::order::{
    ClassPopulationProbability, DegreeWeightedProbability, MatchProbability, NodeSorter,
};
pub use crate::search::*;
pub use crate::state::*;
pub use crate::visitor::*;
