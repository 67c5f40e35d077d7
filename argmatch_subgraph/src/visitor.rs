//! Solution callbacks.
//!
//! The search hands every complete mapping to a [`Visitor`]. Returning
//! [`ControlFlow::Break`] stops the search at once; [`ControlFlow::Continue`]
//! keeps enumerating. Any `FnMut(&Solution<'_>) -> ControlFlow<()>` closure
//! is a visitor.

use std::ops::ControlFlow;

use argmatch_common::NodeId;

use crate::{Mapping, SearchStats};

/// A complete mapping, borrowed from the search for the duration of one
/// [`Visitor::visit`] call.
#[derive(Clone, Copy, Debug)]
pub struct Solution<'s> {
    pattern_to_target: &'s [NodeId],
    target_to_pattern: &'s [Option<NodeId>],
    stats: &'s SearchStats,
}

impl<'s> Solution<'s> {
    pub(crate) const fn new(
        pattern_to_target: &'s [NodeId],
        target_to_pattern: &'s [Option<NodeId>],
        stats: &'s SearchStats,
    ) -> Self {
        Self {
            pattern_to_target,
            target_to_pattern,
            stats,
        }
    }

    /// Image of every pattern node, indexed by pattern id.
    #[must_use]
    pub const fn pattern_to_target(&self) -> &'s [NodeId] {
        self.pattern_to_target
    }

    /// Preimage of every target node, `None` for target nodes outside the
    /// match.
    #[must_use]
    pub const fn target_to_pattern(&self) -> &'s [Option<NodeId>] {
        self.target_to_pattern
    }

    /// Counters of the running search, this solution included.
    #[must_use]
    pub const fn stats(&self) -> &'s SearchStats {
        self.stats
    }

    /// Copy the mapping out of the search.
    #[must_use]
    pub fn to_mapping(&self) -> Mapping {
        Mapping::new(self.pattern_to_target.to_vec())
    }
}

/// Receives every solution of a search.
pub trait Visitor {
    /// Called once per complete mapping.
    fn visit(&mut self, solution: &Solution<'_>) -> ControlFlow<()>;
}

impl<F> Visitor for F
where
    F: FnMut(&Solution<'_>) -> ControlFlow<()>,
{
    fn visit(&mut self, solution: &Solution<'_>) -> ControlFlow<()> {
        self(solution)
    }
}

/// Keeps every solution.
#[derive(Clone, Debug, Default)]
pub struct CollectAll {
    /// Solutions in discovery order.
    pub mappings: Vec<Mapping>,
}

impl Visitor for CollectAll {
    fn visit(&mut self, solution: &Solution<'_>) -> ControlFlow<()> {
        self.mappings.push(solution.to_mapping());
        ControlFlow::Continue(())
    }
}

/// Keeps the first `limit` solutions, then stops the search.
#[derive(Clone, Debug)]
pub struct FirstN {
    limit: usize,
    /// Solutions in discovery order, at most `limit` of them.
    pub mappings: Vec<Mapping>,
}

impl FirstN {
    /// Stop after `limit` solutions.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self {
            limit,
            mappings: Vec::new(),
        }
    }
}

impl Visitor for FirstN {
    fn visit(&mut self, solution: &Solution<'_>) -> ControlFlow<()> {
        if self.mappings.len() < self.limit {
            self.mappings.push(solution.to_mapping());
        }
        if self.mappings.len() >= self.limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Counts solutions without storing them.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountOnly {
    /// Solutions seen so far.
    pub count: u64,
}

impl Visitor for CountOnly {
    fn visit(&mut self, _solution: &Solution<'_>) -> ControlFlow<()> {
        self.count += 1;
        ControlFlow::Continue(())
    }
}
