//! Partial mapping between pattern and target plus the bookkeeping the
//! feasibility rules read.
//!
//! Alongside the two core maps the state tracks, for both graphs:
//! - terminal marks: the depth at which a node first became a successor
//!   (`out`) or predecessor (`in`) of a mapped node, `0` while it is neither;
//! - free counts: the number of unmapped successors and predecessors of every
//!   node.
//!
//! Both are updated on [`MatchState::push`] and undone on [`MatchState::pop`],
//! so one state serves a whole depth-first search.

use argmatch_common::{AttributedGraph, NodeId};

/// Marks and free counts of one graph.
#[derive(Clone, Debug)]
struct Side {
    /// Image of every node on the other side.
    core: Vec<Option<NodeId>>,
    /// Depth at which the node entered the out-terminal set, or `0`.
    term_out: Vec<usize>,
    /// Depth at which the node entered the in-terminal set, or `0`.
    term_in: Vec<usize>,
    /// Unmapped successors per node.
    free_out: Vec<usize>,
    /// Unmapped predecessors per node.
    free_in: Vec<usize>,
}

impl Side {
    fn new<N, E>(graph: &AttributedGraph<N, E>) -> Self {
        let n = graph.node_count();
        Self {
            core: vec![None; n],
            term_out: vec![0; n],
            term_in: vec![0; n],
            free_out: graph.nodes().map(|node| graph.successors(node).len()).collect(),
            free_in: graph.nodes().map(|node| graph.predecessors(node).len()).collect(),
        }
    }

    fn map<N, E>(&mut self, graph: &AttributedGraph<N, E>, node: NodeId, image: NodeId, depth: usize) {
        self.core[node] = Some(image);
        for &succ in graph.successors(node) {
            if self.term_out[succ] == 0 {
                self.term_out[succ] = depth;
            }
            self.free_in[succ] -= 1;
        }
        for &pred in graph.predecessors(node) {
            if self.term_in[pred] == 0 {
                self.term_in[pred] = depth;
            }
            self.free_out[pred] -= 1;
        }
    }

    fn unmap<N, E>(&mut self, graph: &AttributedGraph<N, E>, node: NodeId, depth: usize) {
        self.core[node] = None;
        for &succ in graph.successors(node) {
            if self.term_out[succ] == depth {
                self.term_out[succ] = 0;
            }
            self.free_in[succ] += 1;
        }
        for &pred in graph.predecessors(node) {
            if self.term_in[pred] == depth {
                self.term_in[pred] = 0;
            }
            self.free_out[pred] += 1;
        }
    }

    /// Unmapped neighbours of `node` among `neighbors`, split by terminal
    /// membership: `[total, in out-terminal set, in in-terminal set]`.
    fn frontier(&self, neighbors: &[NodeId]) -> [usize; 3] {
        let mut counts = [0; 3];
        for &other in neighbors {
            if self.core[other].is_some() {
                continue;
            }
            counts[0] += 1;
            if self.term_out[other] != 0 {
                counts[1] += 1;
            }
            if self.term_in[other] != 0 {
                counts[2] += 1;
            }
        }
        counts
    }
}

/// Partial injective mapping from pattern nodes to target nodes.
#[derive(Clone, Debug)]
pub struct MatchState<'g, N, E> {
    pattern: &'g AttributedGraph<N, E>,
    target: &'g AttributedGraph<N, E>,
    induced: bool,
    /// Pattern side; `core` maps pattern to target.
    left: Side,
    /// Target side; `core` maps target to pattern.
    right: Side,
    /// Mapped pairs in push order.
    pairs: Vec<(NodeId, NodeId)>,
}

impl<'g, N, E> MatchState<'g, N, E> {
    /// The empty mapping. With `induced`, target edges between mapped nodes
    /// must also exist in the pattern.
    pub fn new(
        pattern: &'g AttributedGraph<N, E>,
        target: &'g AttributedGraph<N, E>,
        induced: bool,
    ) -> Self {
        Self {
            pattern,
            target,
            induced,
            left: Side::new(pattern),
            right: Side::new(target),
            pairs: Vec::with_capacity(pattern.node_count()),
        }
    }

    /// Number of mapped pairs.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.pairs.len()
    }

    /// True once every pattern node is mapped.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pairs.len() == self.pattern.node_count()
    }

    /// Image of `pattern_node`, if mapped.
    #[must_use]
    pub fn image_of(&self, pattern_node: NodeId) -> Option<NodeId> {
        self.left.core[pattern_node]
    }

    /// True when some pattern node maps onto `target_node`.
    #[must_use]
    pub fn is_target_used(&self, target_node: NodeId) -> bool {
        self.right.core[target_node].is_some()
    }

    /// Pattern to target map; `None` for unmapped pattern nodes.
    #[must_use]
    pub fn pattern_to_target(&self) -> &[Option<NodeId>] {
        &self.left.core
    }

    /// Target to pattern map; `None` for unused target nodes.
    #[must_use]
    pub fn target_to_pattern(&self) -> &[Option<NodeId>] {
        &self.right.core
    }

    /// Mapped pairs in the order they were pushed.
    #[must_use]
    pub fn pairs(&self) -> &[(NodeId, NodeId)] {
        &self.pairs
    }

    /// Extend the mapping with `pattern_node -> target_node`.
    ///
    /// The pair must be feasible; see [`Self::is_feasible`].
    #[contracts::debug_requires(self.image_of(pattern_node).is_none())]
    #[contracts::debug_requires(!self.is_target_used(target_node))]
    #[contracts::debug_ensures(self.image_of(pattern_node) == Some(target_node))]
    #[contracts::debug_ensures(self.depth() == old(self.depth()) + 1)]
    pub fn push(&mut self, pattern_node: NodeId, target_node: NodeId) {
        self.pairs.push((pattern_node, target_node));
        let depth = self.pairs.len();
        self.left.map(self.pattern, pattern_node, target_node, depth);
        self.right.map(self.target, target_node, pattern_node, depth);
    }

    /// Undo the most recent [`Self::push`] and return its pair.
    #[contracts::debug_ensures(ret.is_none() || self.depth() + 1 == old(self.depth()))]
    pub fn pop(&mut self) -> Option<(NodeId, NodeId)> {
        let depth = self.pairs.len();
        let (pattern_node, target_node) = self.pairs.pop()?;
        self.left.unmap(self.pattern, pattern_node, depth);
        self.right.unmap(self.target, target_node, depth);
        Some((pattern_node, target_node))
    }
}

impl<N, E: PartialEq> MatchState<'_, N, E> {
    /// True when `pattern_node -> target_node` can extend the mapping.
    ///
    /// Checks, in order and stopping at the first failure: degrees, edges to
    /// mapped nodes (attributes included, self-loops as edges to the node
    /// itself), the reverse edge check in induced mode, and the look-ahead
    /// counts of unmapped neighbours. Class compatibility is the caller's
    /// concern; candidates come from compatible classes only.
    #[must_use]
    pub fn is_feasible(&self, pattern_node: NodeId, target_node: NodeId) -> bool {
        let (p, t) = (pattern_node, target_node);
        let (pattern, target) = (self.pattern, self.target);

        if pattern.successors(p).len() > target.successors(t).len()
            || pattern.predecessors(p).len() > target.predecessors(t).len()
        {
            return false;
        }

        let image = |node: NodeId| if node == p { Some(t) } else { self.left.core[node] };
        for (succ, attr) in pattern.out_edges(p) {
            let Some(target_succ) = image(succ) else { continue };
            if target.edge_attr(t, target_succ) != Some(attr) {
                return false;
            }
        }
        for (pred, attr) in pattern.in_edges(p).filter(|&(pred, _)| pred != p) {
            let Some(target_pred) = self.left.core[pred] else { continue };
            if target.edge_attr(target_pred, t) != Some(attr) {
                return false;
            }
        }

        if self.induced && !self.target_edges_in_pattern(p, t) {
            return false;
        }

        self.look_ahead(p, t)
    }

    /// Every target edge between `t` and a mapped node (or `t` itself) has a
    /// pattern counterpart at `p`.
    fn target_edges_in_pattern(&self, p: NodeId, t: NodeId) -> bool {
        let (pattern, target) = (self.pattern, self.target);
        let preimage = |node: NodeId| if node == t { Some(p) } else { self.right.core[node] };

        let forward = target
            .successors(t)
            .iter()
            .filter_map(|&succ| preimage(succ))
            .all(|pattern_succ| pattern.has_edge(p, pattern_succ));
        forward
            && target
                .predecessors(t)
                .iter()
                .filter(|&&pred| pred != t)
                .filter_map(|&pred| self.right.core[pred])
                .all(|pattern_pred| pattern.has_edge(pattern_pred, p))
    }

    /// Unmapped neighbours of `p` must fit among the unmapped neighbours of
    /// `t`, overall and within each terminal set, in both directions.
    fn look_ahead(&self, p: NodeId, t: NodeId) -> bool {
        let (pattern, target) = (self.pattern, self.target);
        if self.left.free_out[p] > self.right.free_out[t] || self.left.free_in[p] > self.right.free_in[t] {
            return false;
        }

        let fits = |pattern_counts: [usize; 3], target_counts: [usize; 3]| {
            pattern_counts
                .iter()
                .zip(target_counts)
                .all(|(&needed, available)| needed <= available)
        };
        fits(
            self.left.frontier(pattern.successors(p)),
            self.right.frontier(target.successors(t)),
        ) && fits(
            self.left.frontier(pattern.predecessors(p)),
            self.right.frontier(target.predecessors(t)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmatch_common::{Empty, GraphBuilder};

    fn build<E: Clone>(nodes: usize, edges: &[(usize, usize, E)]) -> AttributedGraph<u8, E> {
        let mut b = GraphBuilder::new();
        for _ in 0..nodes {
            b.insert_node(0);
        }
        for (src, dst, attr) in edges {
            b.insert_edge(*src, *dst, attr.clone()).unwrap();
        }
        b.build()
    }

    #[test]
    fn push_and_pop_restore_everything() {
        let pattern = build(2, &[(0, 1, Empty)]);
        let target = build(3, &[(0, 1, Empty), (1, 2, Empty)]);
        let mut state = MatchState::new(&pattern, &target, false);
        let fresh = state.clone();

        state.push(0, 1);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.image_of(0), Some(1));
        assert!(state.is_target_used(1));
        assert_eq!(state.right.term_out[2], 1);
        assert_eq!(state.right.term_in[0], 1);
        assert_eq!(state.left.free_in[1], 0);

        assert_eq!(state.pop(), Some((0, 1)));
        assert_eq!(state.left.core, fresh.left.core);
        assert_eq!(state.right.term_out, fresh.right.term_out);
        assert_eq!(state.right.term_in, fresh.right.term_in);
        assert_eq!(state.right.free_in, fresh.right.free_in);
        assert_eq!(state.pop(), None);
    }

    #[test]
    fn terminal_marks_keep_the_earliest_depth() {
        let pattern = build(3, &[(0, 2, Empty), (1, 2, Empty)]);
        let target = build(3, &[(0, 2, Empty), (1, 2, Empty)]);
        let mut state = MatchState::new(&pattern, &target, false);
        state.push(0, 0);
        state.push(1, 1);
        assert_eq!(state.left.term_out[2], 1);
        state.pop();
        assert_eq!(state.left.term_out[2], 1);
        state.pop();
        assert_eq!(state.left.term_out[2], 0);
    }

    #[test]
    fn edge_attributes_must_agree() {
        let pattern = build(2, &[(0, 1, 'x')]);
        let target = build(2, &[(0, 1, 'y')]);
        let mut state = MatchState::new(&pattern, &target, false);
        assert!(state.is_feasible(0, 0));
        state.push(0, 0);
        assert!(!state.is_feasible(1, 1));
    }

    #[test]
    fn self_loop_needs_a_self_loop() {
        let pattern = build(1, &[(0, 0, Empty)]);
        let target = build(2, &[(0, 1, Empty), (1, 0, Empty), (1, 1, Empty)]);
        let state = MatchState::new(&pattern, &target, false);
        assert!(!state.is_feasible(0, 0));
        assert!(state.is_feasible(0, 1));
    }

    #[test]
    fn induced_rejects_extra_target_edges() {
        let pattern = build(2, &[(0, 1, Empty)]);
        let target = build(2, &[(0, 1, Empty), (1, 0, Empty)]);

        let mut plain = MatchState::new(&pattern, &target, false);
        plain.push(0, 0);
        assert!(plain.is_feasible(1, 1));

        let mut induced = MatchState::new(&pattern, &target, true);
        induced.push(0, 0);
        assert!(!induced.is_feasible(1, 1));
    }

    #[test]
    fn look_ahead_counts_free_neighbours() {
        // Pattern node 0 has two successors; target node 0 only one.
        let pattern = build(4, &[(0, 1, Empty), (0, 2, Empty)]);
        let target = build(4, &[(0, 1, Empty), (2, 1, Empty), (2, 3, Empty)]);
        let mut state = MatchState::new(&pattern, &target, false);
        assert!(!state.is_feasible(0, 0));
        assert!(state.is_feasible(0, 2));

        // Once the isolated pattern node takes target 3, target node 2 has a
        // single free successor left.
        state.push(3, 3);
        assert!(!state.is_feasible(0, 2));
    }
}
