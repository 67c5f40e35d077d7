//! Visiting order of the pattern nodes.
//!
//! The order is greedy: the next node is the one most connected to the nodes
//! already placed, so that edge checks prune early, and among equally
//! connected nodes the one least likely to match.

use std::cmp::Ordering;

use argmatch_common::{AttributedGraph, NodeId};
use tracing::debug;

use crate::ClassId;

mod probability;

pub use probability::{ClassPopulationProbability, DegreeWeightedProbability, MatchProbability};

/// Computes a visiting order from a [`MatchProbability`] estimate.
#[derive(Clone, Debug, Default)]
pub struct NodeSorter<P = ClassPopulationProbability> {
    strategy: P,
}

/// Per node ranking data, compared in priority order.
#[derive(Clone, Copy, Debug)]
struct Rank {
    /// Edges to already placed nodes, either direction.
    links: usize,
    probability: f64,
    degree: usize,
}

impl Rank {
    /// `Greater` when `self` should be placed before `other`.
    fn precedence(&self, other: &Self) -> Ordering {
        self.links
            .cmp(&other.links)
            .then_with(|| other.probability.total_cmp(&self.probability))
            .then_with(|| self.degree.cmp(&other.degree))
    }
}

impl<P: MatchProbability> NodeSorter<P> {
    /// Sorter driven by `strategy`.
    pub const fn new(strategy: P) -> Self {
        Self { strategy }
    }

    /// The estimate in use.
    pub const fn strategy(&self) -> &P {
        &self.strategy
    }

    /// Order the nodes of `pattern`.
    ///
    /// `classes` holds the class of every pattern node and `populations` the
    /// number of target nodes each class may map onto, out of `target_size`.
    /// Ties on every criterion go to the lowest node id, so the result is a
    /// deterministic permutation of the pattern's nodes.
    ///
    /// # Panics
    /// If `classes` is shorter than the pattern.
    #[contracts::debug_ensures(ret.len() == pattern.node_count())]
    pub fn sort_nodes<N, E>(
        &self,
        pattern: &AttributedGraph<N, E>,
        classes: &[ClassId],
        populations: &[usize],
        target_size: usize,
    ) -> Vec<NodeId> {
        let n = pattern.node_count();
        let mut ranks: Vec<Rank> = pattern
            .nodes()
            .map(|node| Rank {
                links: 0,
                probability: self
                    .strategy
                    .probability(classes[node], populations, target_size),
                degree: pattern.successors(node).len() + pattern.predecessors(node).len(),
            })
            .collect();
        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while order.len() < n {
            let mut best: Option<NodeId> = None;
            for node in (0..n).filter(|&node| !placed[node]) {
                let better = best.is_none_or(|b| ranks[node].precedence(&ranks[b]) == Ordering::Greater);
                if better {
                    best = Some(node);
                }
            }
            let Some(next) = best else { break };

            placed[next] = true;
            order.push(next);
            for &neighbor in pattern.successors(next).iter().chain(pattern.predecessors(next)) {
                if !placed[neighbor] {
                    ranks[neighbor].links += 1;
                }
            }
        }

        debug!(?order, "pattern visiting order");
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeClassifier;
    use argmatch_common::{Empty, GraphBuilder};
    use rstest::rstest;

    fn build(nodes: &[u8], edges: &[(usize, usize)]) -> AttributedGraph<u8, Empty> {
        let mut b = GraphBuilder::new();
        for &attr in nodes {
            b.insert_node(attr);
        }
        for &(src, dst) in edges {
            b.insert_edge(src, dst, Empty).unwrap();
        }
        b.build()
    }

    fn order_for(pattern: &AttributedGraph<u8, Empty>, target: &AttributedGraph<u8, Empty>) -> Vec<NodeId> {
        let target_classes = NodeClassifier::classify(target);
        let classes = NodeClassifier::classify_against(pattern, &target_classes);
        let populations = classes.compatible_populations(&target_classes);
        NodeSorter::new(ClassPopulationProbability).sort_nodes(
            pattern,
            classes.as_slice(),
            &populations,
            target.node_count(),
        )
    }

    #[test]
    fn rarest_node_goes_first_then_neighbours() {
        // Target: many 1s, a single 2.
        let target = build(&[1, 1, 1, 1, 2], &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        // Pattern path 1 -> 1 -> 2.
        let pattern = build(&[1, 1, 2], &[(0, 1), (1, 2)]);
        assert_eq!(order_for(&pattern, &target), vec![2, 1, 0]);
    }

    #[rstest]
    #[case::empty(&[], &[])]
    #[case::isolated(&[0, 0, 0], &[])]
    #[case::cycle(&[0, 0, 0, 0], &[(0, 1), (1, 2), (2, 3), (3, 0)])]
    #[case::self_loop(&[0, 0], &[(0, 0), (0, 1)])]
    fn order_is_a_permutation(#[case] nodes: &[u8], #[case] edges: &[(usize, usize)]) {
        let pattern = build(nodes, edges);
        let mut order = order_for(&pattern, &pattern);
        order.sort_unstable();
        assert_eq!(order, (0..nodes.len()).collect::<Vec<_>>());
    }

    #[test]
    fn ties_break_on_degree_then_id() {
        let target = build(&[0; 6], &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5)]);
        // Nodes 1 and 2 tie on probability and degree; the lower id wins.
        let pattern = build(&[0, 0, 0], &[(1, 2)]);
        let order = order_for(&pattern, &target);
        assert_eq!(order[0], 1);
        assert_eq!(order[1], 2);
        assert_eq!(order[2], 0);
    }

    #[test]
    fn unmatchable_node_is_placed_first() {
        let target = build(&[0, 0], &[(0, 1)]);
        let pattern = build(&[0, 0, 7], &[(0, 1)]);
        assert_eq!(order_for(&pattern, &target)[0], 2);
    }
}
