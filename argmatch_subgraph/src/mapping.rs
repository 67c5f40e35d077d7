use std::fmt;

use argmatch_common::{AttributedGraph, NodeId};
use itertools::Itertools;

/// An owned complete mapping of pattern nodes onto target nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mapping {
    /// Image of every pattern node, indexed by pattern id.
    pattern_to_target: Vec<NodeId>,
}

impl Mapping {
    /// Wrap an image array indexed by pattern id.
    #[must_use]
    pub const fn new(pattern_to_target: Vec<NodeId>) -> Self {
        Self { pattern_to_target }
    }

    /// Number of mapped pattern nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pattern_to_target.len()
    }

    /// True for the mapping of the empty pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern_to_target.is_empty()
    }

    /// Image of `pattern_node`.
    #[must_use]
    pub fn get(&self, pattern_node: NodeId) -> Option<NodeId> {
        self.pattern_to_target.get(pattern_node).copied()
    }

    /// Image array indexed by pattern id.
    #[must_use]
    pub fn as_slice(&self) -> &[NodeId] {
        &self.pattern_to_target
    }

    /// `(pattern, target)` pairs by ascending pattern id.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pattern_to_target.iter().copied().enumerate()
    }

    /// Target nodes covered by the mapping, ascending.
    #[must_use]
    pub fn target_nodes(&self) -> Vec<NodeId> {
        self.pattern_to_target.iter().copied().sorted_unstable().collect()
    }

    /// True when no two pattern nodes share an image.
    #[must_use]
    pub fn is_injective(&self) -> bool {
        self.pattern_to_target.iter().all_unique()
    }

    /// True when every pattern edge maps onto a target edge with an equal
    /// attribute and every pattern node onto a node with an equal attribute.
    #[must_use]
    pub fn preserves<N: PartialEq, E: PartialEq>(
        &self,
        pattern: &AttributedGraph<N, E>,
        target: &AttributedGraph<N, E>,
    ) -> bool {
        let nodes_agree = self.pairs().all(|(p, t)| {
            t < target.node_count() && pattern.node_attrs().get(p) == target.node_attrs().get(t)
        });
        nodes_agree
            && pattern.edges().all(|(src, dst, attr)| {
                target.edge_attr(self.pattern_to_target[src], self.pattern_to_target[dst]) == Some(attr)
            })
    }
}

impl From<Vec<NodeId>> for Mapping {
    fn from(pattern_to_target: Vec<NodeId>) -> Self {
        Self::new(pattern_to_target)
    }
}

impl fmt::Display for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.pairs().map(|(p, t)| format!("{p}->{t}")).join(", ");
        write!(f, "{{{pairs}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_pairs() {
        assert_eq!(Mapping::new(vec![3, 0, 7]).to_string(), "{0->3, 1->0, 2->7}");
        assert_eq!(Mapping::default().to_string(), "{}");
    }

    #[test]
    fn injectivity() {
        assert!(Mapping::new(vec![2, 0, 1]).is_injective());
        assert!(!Mapping::new(vec![2, 0, 2]).is_injective());
        assert_eq!(Mapping::new(vec![2, 0, 1]).target_nodes(), vec![0, 1, 2]);
    }
}
