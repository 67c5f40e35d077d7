//! Incremental construction of an [`AttributedGraph`].

use std::collections::HashSet;

use contracts::*;

use crate::{AttributedGraph, GraphError, NodeId};

/// Collects nodes and edges, then freezes them into an [`AttributedGraph`].
///
/// Node ids are handed out sequentially from 0. A second edge for an ordered
/// pair that already has one is rejected with [`GraphError::DuplicateEdge`].
#[derive(Clone, Debug)]
pub struct GraphBuilder<N, E> {
    node_attrs: Vec<N>,
    edges: Vec<(NodeId, NodeId, E)>,
    seen: HashSet<(NodeId, NodeId)>,
}

impl<N, E> Default for GraphBuilder<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> GraphBuilder<N, E> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            node_attrs: Vec::new(),
            edges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Creates an empty builder with room for `nodes` nodes.
    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            node_attrs: Vec::with_capacity(nodes),
            edges: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Number of nodes inserted so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_attrs.len()
    }

    /// Number of edges inserted so far.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds a node and returns its id.
    #[debug_ensures(ret + 1 == self.node_count())]
    pub fn insert_node(&mut self, attr: N) -> NodeId {
        self.node_attrs.push(attr);
        self.node_attrs.len() - 1
    }

    /// True when the edge `src -> dst` was already inserted.
    #[must_use]
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.seen.contains(&(src, dst))
    }

    /// Adds the directed edge `src -> dst`.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] if either endpoint has not been inserted,
    /// [`GraphError::DuplicateEdge`] if the ordered pair already has an edge.
    pub fn insert_edge(&mut self, src: NodeId, dst: NodeId, attr: E) -> Result<(), GraphError> {
        let count = self.node_count();
        for node in [src, dst] {
            if node >= count {
                return Err(GraphError::NodeOutOfRange { node, count });
            }
        }
        if !self.seen.insert((src, dst)) {
            return Err(GraphError::DuplicateEdge { src, dst });
        }
        self.edges.push((src, dst, attr));
        Ok(())
    }

    /// Freezes the builder into an immutable graph.
    #[must_use]
    pub fn build(self) -> AttributedGraph<N, E> {
        AttributedGraph::from_parts(self.node_attrs, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential() {
        let mut b: GraphBuilder<&str, ()> = GraphBuilder::new();
        assert_eq!(b.insert_node("a"), 0);
        assert_eq!(b.insert_node("b"), 1);
        assert_eq!(b.insert_node("c"), 2);
        assert_eq!(b.build().node_count(), 3);
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut b: GraphBuilder<(), u8> = GraphBuilder::new();
        b.insert_node(());
        b.insert_node(());
        b.insert_edge(0, 1, 1).unwrap();
        assert_eq!(
            b.insert_edge(0, 1, 2),
            Err(GraphError::DuplicateEdge { src: 0, dst: 1 })
        );
        // the reverse pair is a different edge
        b.insert_edge(1, 0, 3).unwrap();

        let g = b.build();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_attr(0, 1), Some(&1));
    }

    #[test]
    fn self_loops_are_allowed_once() {
        let mut b: GraphBuilder<(), ()> = GraphBuilder::new();
        b.insert_node(());
        b.insert_edge(0, 0, ()).unwrap();
        assert!(b.insert_edge(0, 0, ()).is_err());
        let g = b.build();
        assert_eq!(g.successors(0), &[0]);
        assert_eq!(g.predecessors(0), &[0]);
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let mut b: GraphBuilder<(), ()> = GraphBuilder::new();
        b.insert_node(());
        assert_eq!(
            b.insert_edge(0, 4, ()),
            Err(GraphError::NodeOutOfRange { node: 4, count: 1 })
        );
        assert_eq!(b.edge_count(), 0);
    }
}
