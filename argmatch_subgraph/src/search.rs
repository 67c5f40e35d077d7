//! Depth-first search over partial mappings.
//!
//! The search keeps one cursor per depth on an explicit stack: the cursor at
//! depth `k` is the position in the candidate list of `order[k]` where
//! enumeration resumes after backtracking. Candidate lists are computed once
//! per pattern class and hold the target nodes of compatible classes in
//! ascending id order, so enumeration is deterministic.

use std::collections::BTreeMap;

use argmatch_common::{AttributedGraph, Config, NodeId};
use tracing::{debug, trace};

use crate::{
    Classes, ClassId, ConfigError, GraphRole, MatchState, OrderProblem, Solution, Visitor,
};

/// Counters of one search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Pairs pushed onto the mapping.
    pub states_explored: u64,
    /// Candidates handed to the feasibility check.
    pub candidates_tried: u64,
    /// Frames left after exhausting their candidates.
    pub backtracks: u64,
    /// Complete mappings reported so far.
    pub solutions: u64,
    /// Largest mapping size reached.
    pub deepest: usize,
}

/// Result of [`SearchProblem::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Solutions handed to the visitor.
    pub solutions: u64,
    /// True when the visitor stopped the search.
    pub stopped_early: bool,
    /// Counters at the end of the call.
    pub stats: SearchStats,
}

/// A validated pattern/target pair, ready to be searched any number of times.
#[derive(Clone, Debug)]
pub struct SearchProblem<'a, N, E> {
    pattern: &'a AttributedGraph<N, E>,
    target: &'a AttributedGraph<N, E>,
    order: &'a [NodeId],
    /// Candidate target nodes per distinct pattern class, ascending.
    candidates: Vec<Vec<NodeId>>,
    /// Index into `candidates` for every depth.
    candidates_at: Vec<usize>,
    induced: bool,
}

fn check_order(order: &[NodeId], pattern_size: usize) -> Result<(), ConfigError> {
    if order.len() != pattern_size {
        return Err(ConfigError::OrderLengthMismatch {
            expected: pattern_size,
            found: order.len(),
        });
    }
    let mut seen = vec![false; pattern_size];
    for &node in order {
        let problem = match seen.get_mut(node) {
            None => OrderProblem::OutOfRange,
            Some(true) => OrderProblem::Repeated,
            Some(slot) => {
                *slot = true;
                continue;
            }
        };
        return Err(ConfigError::OrderNotPermutation { node, problem });
    }
    Ok(())
}

fn check_classes<N, E>(
    classes: &Classes<N>,
    graph: &AttributedGraph<N, E>,
    role: GraphRole,
) -> Result<(), ConfigError> {
    if classes.len() < graph.node_count() {
        return Err(ConfigError::ClassesTooShort {
            role,
            expected: graph.node_count(),
            found: classes.len(),
        });
    }
    Ok(())
}

impl<'a, N: PartialEq, E: PartialEq> SearchProblem<'a, N, E> {
    /// Validate the inputs and precompute candidate lists.
    ///
    /// `pattern_classes` must come from
    /// [`crate::NodeClassifier::classify_against`] with `target_classes`, and
    /// `order` must be a permutation of the pattern's nodes.
    ///
    /// # Errors
    /// A [`ConfigError`] naming the first inconsistency found.
    pub fn new(
        pattern: &'a AttributedGraph<N, E>,
        target: &'a AttributedGraph<N, E>,
        pattern_classes: &Classes<N>,
        target_classes: &Classes<N>,
        order: &'a [NodeId],
        config: &Config,
    ) -> Result<Self, ConfigError> {
        check_classes(pattern_classes, pattern, GraphRole::Pattern)?;
        check_classes(target_classes, target, GraphRole::Target)?;
        if pattern_classes.target_class_count() != target_classes.target_class_count() {
            return Err(ConfigError::ClassTableMismatch {
                pattern_table: pattern_classes.target_class_count(),
                target_table: target_classes.target_class_count(),
            });
        }
        check_order(order, pattern.node_count())?;

        let mut list_of_class: BTreeMap<ClassId, usize> = BTreeMap::new();
        let mut candidates = Vec::new();
        let mut candidates_at = Vec::with_capacity(order.len());
        for &node in order {
            let class = pattern_classes.class_of(node);
            let index = *list_of_class.entry(class).or_insert_with(|| {
                candidates.push(candidate_nodes(class, pattern_classes, target_classes, target));
                candidates.len() - 1
            });
            candidates_at.push(index);
        }

        debug!(
            pattern = pattern.node_count(),
            target = target.node_count(),
            lists = candidates.len(),
            induced = config.induced(),
            "search problem ready"
        );

        Ok(Self {
            pattern,
            target,
            order,
            candidates,
            candidates_at,
            induced: config.induced(),
        })
    }

    /// The visiting order.
    #[must_use]
    pub const fn order(&self) -> &'a [NodeId] {
        self.order
    }

    /// Candidate target nodes of the pattern node visited at `depth`.
    ///
    /// # Panics
    /// If `depth` is not below the pattern size.
    #[must_use]
    pub fn candidates_at(&self, depth: usize) -> &[NodeId] {
        &self.candidates[self.candidates_at[depth]]
    }

    /// Enumerate every mapping, handing each to `visitor` until it breaks.
    ///
    /// Each call starts from a fresh state, so a problem can be run
    /// repeatedly or from several threads at once.
    pub fn run<V: Visitor + ?Sized>(&self, visitor: &mut V) -> SearchOutcome {
        let n = self.order.len();
        let mut stats = SearchStats::default();
        let mut state = MatchState::new(self.pattern, self.target, self.induced);
        let mut images: Vec<NodeId> = vec![0; n];

        if n == 0 {
            stats.solutions = 1;
            let solution = Solution::new(&images, state.target_to_pattern(), &stats);
            let stopped_early = visitor.visit(&solution).is_break();
            return SearchOutcome {
                solutions: 1,
                stopped_early,
                stats,
            };
        }
        if n > self.target.node_count() {
            debug!("pattern larger than target, nothing to search");
            return SearchOutcome::default();
        }

        let mut stopped_early = false;
        let mut cursors: Vec<usize> = Vec::with_capacity(n);
        cursors.push(0);

        while let Some(&cursor) = cursors.last() {
            let depth = cursors.len() - 1;
            let pattern_node = self.order[depth];
            let candidates = self.candidates_at(depth);

            let mut next = cursor;
            let mut accepted = None;
            while let Some(&target_node) = candidates.get(next) {
                next += 1;
                if state.is_target_used(target_node) {
                    continue;
                }
                stats.candidates_tried += 1;
                if state.is_feasible(pattern_node, target_node) {
                    accepted = Some(target_node);
                    break;
                }
                trace!(depth, pattern_node, target_node, "candidate rejected");
            }
            cursors[depth] = next;

            let Some(target_node) = accepted else {
                cursors.pop();
                state.pop();
                stats.backtracks += 1;
                continue;
            };

            state.push(pattern_node, target_node);
            stats.states_explored += 1;
            stats.deepest = stats.deepest.max(state.depth());
            if !state.is_complete() {
                cursors.push(0);
                continue;
            }

            stats.solutions += 1;
            for &(p, t) in state.pairs() {
                images[p] = t;
            }
            trace!(solution = stats.solutions, "complete mapping");
            let solution = Solution::new(&images, state.target_to_pattern(), &stats);
            let flow = visitor.visit(&solution);
            state.pop();
            if flow.is_break() {
                stopped_early = true;
                break;
            }
        }

        debug!(
            solutions = stats.solutions,
            states = stats.states_explored,
            stopped_early,
            "search finished"
        );
        SearchOutcome {
            solutions: stats.solutions,
            stopped_early,
            stats,
        }
    }
}

/// Target nodes whose class can host `class`, ascending.
fn candidate_nodes<N: PartialEq, E>(
    class: ClassId,
    pattern_classes: &Classes<N>,
    target_classes: &Classes<N>,
    target: &AttributedGraph<N, E>,
) -> Vec<NodeId> {
    let mut hosts = vec![false; pattern_classes.target_class_count()];
    for target_class in pattern_classes.compatible_classes(class) {
        hosts[target_class] = true;
    }
    target
        .nodes()
        .filter(|&node| hosts.get(target_classes.class_of(node)).copied().unwrap_or(false))
        .collect()
}
