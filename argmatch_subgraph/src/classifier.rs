//! Structural node classes.
//!
//! A node's signature is its in-degree, out-degree and attribute. Nodes of one
//! graph with equal signatures share a class number. Pattern graphs are
//! classified against the target's table so that class numbers are comparable
//! across the two graphs: a pattern signature already known to the target
//! reuses its number, an unknown one gets a fresh number past the target's
//! classes.
//!
//! Compatibility is dominance: a pattern class may map onto a target class
//! with the same attribute and at least the same degree in each direction. A
//! fresh class that no target class dominates is unmatchable.

use std::collections::BTreeMap;

use argmatch_common::{AttributedGraph, NodeId};
use tracing::debug;

/// Class number, meaningful only relative to the table it was drawn from.
pub type ClassId = usize;

/// Structural signature shared by every node of a class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature<N> {
    /// Number of predecessors.
    pub in_degree: usize,
    /// Number of successors.
    pub out_degree: usize,
    /// Node attribute.
    pub attr: N,
}

impl<N: Clone> Signature<N> {
    fn of<E>(graph: &AttributedGraph<N, E>, node: NodeId) -> Self {
        Self {
            in_degree: graph.predecessors(node).len(),
            out_degree: graph.successors(node).len(),
            attr: graph.node_attrs()[node].clone(),
        }
    }
}

impl<N: PartialEq> Signature<N> {
    /// True when a node with this signature may be mapped onto a node with
    /// signature `host`.
    #[must_use]
    pub fn fits_into(&self, host: &Self) -> bool {
        host.in_degree >= self.in_degree
            && host.out_degree >= self.out_degree
            && self.attr == host.attr
    }
}

/// Signatures by class number, bucketed by degree pair.
#[derive(Clone, Debug)]
struct ClassTable<N> {
    signatures: Vec<Signature<N>>,
    by_degree: BTreeMap<(usize, usize), Vec<ClassId>>,
}

impl<N: PartialEq + Clone> ClassTable<N> {
    const fn new() -> Self {
        Self {
            signatures: Vec::new(),
            by_degree: BTreeMap::new(),
        }
    }

    /// The first `len` classes of this table.
    fn prefix(&self, len: usize) -> Self {
        let mut table = Self::new();
        for signature in self.signatures.iter().take(len) {
            table.insert(signature.clone());
        }
        table
    }

    fn lookup(&self, signature: &Signature<N>) -> Option<ClassId> {
        self.by_degree
            .get(&(signature.in_degree, signature.out_degree))?
            .iter()
            .copied()
            .find(|&class| self.signatures[class].attr == signature.attr)
    }

    fn insert(&mut self, signature: Signature<N>) -> ClassId {
        let class = self.signatures.len();
        self.by_degree
            .entry((signature.in_degree, signature.out_degree))
            .or_default()
            .push(class);
        self.signatures.push(signature);
        class
    }

    fn lookup_or_insert(&mut self, signature: Signature<N>) -> ClassId {
        match self.lookup(&signature) {
            Some(class) => class,
            None => self.insert(signature),
        }
    }

    /// Classes below `limit` that `signature` fits into, in ascending order.
    fn hosts(&self, signature: &Signature<N>, limit: usize) -> Vec<ClassId> {
        let mut hosts: Vec<ClassId> = self
            .by_degree
            .range((signature.in_degree, signature.out_degree)..)
            .filter(|((_, out_degree), _)| *out_degree >= signature.out_degree)
            .flat_map(|(_, classes)| classes.iter().copied())
            .filter(|&class| class < limit && signature.fits_into(&self.signatures[class]))
            .collect();
        hosts.sort_unstable();
        hosts
    }
}

/// Class assignment of one graph together with the table it refers to.
#[derive(Clone, Debug)]
pub struct Classes<N> {
    class_of: Vec<ClassId>,
    table: ClassTable<N>,
    /// Classes `0..target_class_count` belong to the target table.
    target_class_count: usize,
    /// Nodes of the classified graph per class.
    populations: Vec<usize>,
    unmatchable: Vec<bool>,
}

impl<N> Classes<N> {
    /// Class of `node`.
    ///
    /// # Panics
    /// If `node` is not a node of the classified graph.
    #[must_use]
    pub fn class_of(&self, node: NodeId) -> ClassId {
        self.class_of[node]
    }

    /// Class of every node, indexed by node id.
    #[must_use]
    pub fn as_slice(&self) -> &[ClassId] {
        &self.class_of
    }

    /// Number of classified nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_of.len()
    }

    /// True when the classified graph had no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_of.is_empty()
    }

    /// Number of classes in the table, target classes included.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.table.signatures.len()
    }

    /// Number of classes drawn from the target table.
    ///
    /// Equal to [`Self::class_count`] for an intrinsic classification.
    #[must_use]
    pub const fn target_class_count(&self) -> usize {
        self.target_class_count
    }

    /// Signature shared by the nodes of `class`.
    ///
    /// # Panics
    /// If `class` is not in the table.
    #[must_use]
    pub fn signature(&self, class: ClassId) -> &Signature<N> {
        &self.table.signatures[class]
    }

    /// True when no target class can host nodes of `class`.
    #[must_use]
    pub fn is_unmatchable(&self, class: ClassId) -> bool {
        self.unmatchable.get(class).copied().unwrap_or(true)
    }

    /// Nodes of the classified graph per class.
    #[must_use]
    pub fn populations(&self) -> &[usize] {
        &self.populations
    }
}

impl<N: PartialEq> Classes<N> {
    /// True when nodes of `class` may map onto target nodes of `target_class`.
    #[must_use]
    pub fn is_compatible(&self, class: ClassId, target_class: ClassId) -> bool {
        target_class < self.target_class_count
            && class < self.class_count()
            && self.table.signatures[class].fits_into(&self.table.signatures[target_class])
    }

    /// Target classes compatible with `class`, ascending.
    #[must_use]
    pub fn compatible_classes(&self, class: ClassId) -> Vec<ClassId> {
        (0..self.target_class_count)
            .filter(|&target_class| self.is_compatible(class, target_class))
            .collect()
    }

    /// For every class of this table, the number of target nodes it may map
    /// onto: the summed populations of its compatible target classes.
    ///
    /// `target` is the classification this one was built against.
    #[must_use]
    pub fn compatible_populations(&self, target: &Self) -> Vec<usize> {
        (0..self.class_count())
            .map(|class| {
                self.compatible_classes(class)
                    .into_iter()
                    .map(|target_class| target.populations.get(target_class).copied().unwrap_or(0))
                    .sum()
            })
            .collect()
    }
}

/// Computes [`Classes`] for a graph.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeClassifier;

impl NodeClassifier {
    /// Classify `graph` on its own, numbering classes in first-seen node order.
    pub fn classify<N, E>(graph: &AttributedGraph<N, E>) -> Classes<N>
    where
        N: PartialEq + Clone,
    {
        let mut table = ClassTable::new();
        let class_of: Vec<ClassId> = graph
            .nodes()
            .map(|node| table.lookup_or_insert(Signature::of(graph, node)))
            .collect();

        let class_count = table.signatures.len();
        debug!(
            nodes = graph.node_count(),
            classes = class_count,
            "classified graph"
        );

        Classes {
            populations: count_members(&class_of, class_count),
            unmatchable: vec![false; class_count],
            target_class_count: class_count,
            class_of,
            table,
        }
    }

    /// Classify a pattern `graph` against the table of `target`.
    ///
    /// Signatures the target knows keep their class numbers. New ones are
    /// numbered from `target.target_class_count()` upwards, and marked
    /// unmatchable when no target class can host them.
    pub fn classify_against<N, E>(graph: &AttributedGraph<N, E>, target: &Classes<N>) -> Classes<N>
    where
        N: PartialEq + Clone,
    {
        let target_class_count = target.target_class_count;
        let mut table = target.table.prefix(target_class_count);
        let class_of: Vec<ClassId> = graph
            .nodes()
            .map(|node| table.lookup_or_insert(Signature::of(graph, node)))
            .collect();

        let class_count = table.signatures.len();
        let mut unmatchable = vec![false; class_count];
        for class in target_class_count..class_count {
            let hosts = table.hosts(&table.signatures[class], target_class_count);
            unmatchable[class] = hosts.is_empty();
        }

        let sentinels = unmatchable.iter().filter(|&&u| u).count();
        debug!(
            nodes = graph.node_count(),
            fresh = class_count - target_class_count,
            unmatchable = sentinels,
            "classified pattern against target table"
        );

        Classes {
            populations: count_members(&class_of, class_count),
            unmatchable,
            target_class_count,
            class_of,
            table,
        }
    }
}

fn count_members(class_of: &[ClassId], class_count: usize) -> Vec<usize> {
    let mut populations = vec![0; class_count];
    for &class in class_of {
        populations[class] += 1;
    }
    populations
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmatch_common::{Empty, GraphBuilder};

    fn build(nodes: &[char], edges: &[(usize, usize)]) -> AttributedGraph<char, Empty> {
        let mut b = GraphBuilder::new();
        for &attr in nodes {
            b.insert_node(attr);
        }
        for &(src, dst) in edges {
            b.insert_edge(src, dst, Empty).unwrap();
        }
        b.build()
    }

    #[test]
    fn equal_signatures_share_a_class() {
        // Two disjoint a -> b edges plus an isolated a.
        let g = build(&['a', 'b', 'a', 'b', 'a'], &[(0, 1), (2, 3)]);
        let classes = NodeClassifier::classify(&g);
        assert_eq!(classes.as_slice(), &[0, 1, 0, 1, 2]);
        assert_eq!(classes.populations(), &[2, 2, 1]);
        assert_eq!(classes.target_class_count(), 3);
    }

    #[test]
    fn attribute_and_direction_both_matter() {
        let g = build(&['a', 'a', 'b'], &[(0, 1), (2, 0)]);
        let classes = NodeClassifier::classify(&g);
        // (in, out): node 0 (1, 1), node 1 (1, 0), node 2 (0, 1).
        assert_eq!(classes.as_slice(), &[0, 1, 2]);
        assert_eq!(
            classes.signature(2),
            &Signature {
                in_degree: 0,
                out_degree: 1,
                attr: 'b'
            }
        );
    }

    #[test]
    fn pattern_reuses_known_signatures() {
        let target = NodeClassifier::classify(&build(&['a', 'b', 'b'], &[(0, 1), (0, 2)]));
        let pattern = NodeClassifier::classify_against(&build(&['b'], &[]), &target);
        // A lone b (0, 0) is unknown to the target, whose b nodes have in-degree 1.
        assert_eq!(pattern.class_of(0), 2);
        assert!(!pattern.is_unmatchable(2));
        assert_eq!(pattern.compatible_classes(2), vec![1]);

        let pattern = NodeClassifier::classify_against(&build(&['a', 'b'], &[(0, 1)]), &target);
        // a has (0, 1) here but (0, 2) in the target: fresh yet dominated.
        assert_eq!(pattern.as_slice(), &[2, 1]);
        assert!(pattern.is_compatible(2, 0));
        assert!(pattern.is_compatible(1, 1));
        assert!(!pattern.is_compatible(1, 0));
    }

    #[test]
    fn undominated_signature_is_unmatchable() {
        let target = NodeClassifier::classify(&build(&['a', 'a'], &[(0, 1)]));
        let pattern = NodeClassifier::classify_against(&build(&['a', 'a', 'a'], &[(0, 1), (0, 2)]), &target);
        let hub = pattern.class_of(0);
        assert!(hub >= target.class_count());
        assert!(pattern.is_unmatchable(hub));
        assert!(pattern.compatible_classes(hub).is_empty());

        let missing_attr = NodeClassifier::classify_against(&build(&['z'], &[]), &target);
        assert!(missing_attr.is_unmatchable(missing_attr.class_of(0)));
    }

    #[test]
    fn compatible_populations_sum_hosts() {
        // Target: a hub with three leaves, one of which points back.
        let target = NodeClassifier::classify(&build(
            &['a', 'a', 'a', 'a'],
            &[(0, 1), (0, 2), (0, 3), (3, 0)],
        ));
        let pattern = NodeClassifier::classify_against(&build(&['a', 'a'], &[(0, 1)]), &target);
        let populations = pattern.compatible_populations(&target);
        // Pattern source (0, 1) fits the hub (1, 3) and the returning leaf (1, 1).
        assert_eq!(populations[pattern.class_of(0)], 2);
        // Pattern sink (1, 0) fits every node with an incoming edge.
        assert_eq!(populations[pattern.class_of(1)], 4);
    }

    #[test]
    fn nested_classification_keeps_only_target_classes() {
        let target = NodeClassifier::classify(&build(&['a'], &[]));
        let first = NodeClassifier::classify_against(&build(&['b'], &[]), &target);
        let second = NodeClassifier::classify_against(&build(&['c', 'b'], &[]), &first);
        assert_eq!(second.target_class_count(), 1);
        assert_eq!(second.as_slice(), &[1, 2]);
    }
}
