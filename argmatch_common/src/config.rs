//! Configuration for the subgraph isomorphism search.
//!
//! This module exposes a small, stable surface for consumers (for example,
//! the `argmatch_cli` crate) to parameterize how matching should behave.
//!
//! The three knobs are:
//! - match_kind: plain subgraph monomorphism (only pattern edges are checked)
//!   or induced matching (pattern non-edges must also be target non-edges).
//! - ordering: which match probability estimate drives the visiting order.
//! - limit: stop after this many solutions in the convenience entry points.
//!
//! Quick examples
//!
//! Default, all monomorphisms with class-population ordering:
//! ```
//! use argmatch_common::Config;
//! let cfg = Config::default();
//! ```
//!
//! First induced match only:
//! ```
//! use argmatch_common::{Config, MatchKind};
//! let cfg = Config::builder().match_kind(MatchKind::Induced).limit(1).build();
//! assert_eq!(cfg.limit, Some(1));
//! ```

use serde::{Deserialize, Serialize};

/// Which mappings count as matches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// Every pattern edge must exist in the target; target edges between
    /// matched nodes that the pattern lacks are allowed.
    #[default]
    Monomorphism,
    /// Additionally, every target edge between matched nodes must exist in
    /// the pattern.
    Induced,
}

/// Which match probability estimate orders the pattern nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingStrategy {
    /// Probability proportional to the target population of the node class.
    #[default]
    ClassPopulation,
    /// Class population scaled by how many target nodes have at least the
    /// pattern node's degree.
    DegreeWeighted,
}

/// Global search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Monomorphism or induced matching.
    pub match_kind: MatchKind,
    /// Visiting order estimate.
    pub ordering: OrderingStrategy,
    /// Maximum number of solutions to report, `None` for all.
    pub limit: Option<usize>,
}

impl Config {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// True for induced matching.
    #[must_use]
    pub const fn induced(&self) -> bool {
        matches!(self.match_kind, MatchKind::Induced)
    }
}

/// Builder for [`Config`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the match kind.
    #[must_use]
    pub const fn match_kind(mut self, match_kind: MatchKind) -> Self {
        self.config.match_kind = match_kind;
        self
    }

    /// Shorthand for `match_kind(MatchKind::Induced)`.
    #[must_use]
    pub const fn induced(self) -> Self {
        self.match_kind(MatchKind::Induced)
    }

    /// Set the ordering strategy.
    #[must_use]
    pub const fn ordering(mut self, ordering: OrderingStrategy) -> Self {
        self.config.ordering = ordering;
        self
    }

    /// Stop after `limit` solutions.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Report every solution.
    #[must_use]
    pub const fn unlimited(mut self) -> Self {
        self.config.limit = None;
        self
    }

    /// Finish building.
    #[must_use]
    pub const fn build(self) -> Config {
        self.config
    }
}
