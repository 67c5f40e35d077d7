//! Immutable attributed directed graph.
//!
//! Nodes are the contiguous ids `0..node_count` in insertion order. Every node
//! and every directed edge carries one attribute. Adjacency is kept in both
//! directions in insertion order, plus a per-node index sorted by destination
//! so that edge lookups during matching are logarithmic.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::GraphError;

/// Index of a node inside one graph.
pub type NodeId = usize;

/// Direction of an adjacency list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edges leaving the node.
    Out,
    /// Edges entering the node.
    In,
}

impl Direction {
    /// Both directions, outgoing first.
    pub const BOTH: [Self; 2] = [Self::Out, Self::In];

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Out => Self::In,
            Self::In => Self::Out,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Out => write!(f, "out"),
            Self::In => write!(f, "in"),
        }
    }
}

/// A frozen directed graph with node attributes `N` and edge attributes `E`.
///
/// Built through [`crate::GraphBuilder`]; there is no way to mutate it
/// afterwards, so a graph may be shared freely between concurrent searches.
#[derive(Clone, Debug)]
pub struct AttributedGraph<N, E> {
    node_attrs: Vec<N>,
    edge_attrs: Vec<E>,
    /// Destination of every outgoing edge, per node, in insertion order.
    successors: Vec<Vec<NodeId>>,
    /// Edge ids parallel to `successors`.
    out_edge_ids: Vec<Vec<usize>>,
    /// Source of every incoming edge, per node, in insertion order.
    predecessors: Vec<Vec<NodeId>>,
    /// Edge ids parallel to `predecessors`.
    in_edge_ids: Vec<Vec<usize>>,
    /// `(destination, edge id)` per node, sorted by destination.
    out_lookup: Vec<Vec<(NodeId, usize)>>,
}

impl<N, E> AttributedGraph<N, E> {
    /// Freeze a set of nodes and edges.
    ///
    /// Callers guarantee that every endpoint is a valid node id and that no
    /// ordered pair appears twice; the builder enforces both.
    pub(crate) fn from_parts(node_attrs: Vec<N>, edges: Vec<(NodeId, NodeId, E)>) -> Self {
        let n = node_attrs.len();
        let mut successors = vec![Vec::new(); n];
        let mut out_edge_ids = vec![Vec::new(); n];
        let mut predecessors = vec![Vec::new(); n];
        let mut in_edge_ids = vec![Vec::new(); n];
        let mut out_lookup = vec![Vec::new(); n];
        let mut edge_attrs = Vec::with_capacity(edges.len());

        for (edge_id, (src, dst, attr)) in edges.into_iter().enumerate() {
            successors[src].push(dst);
            out_edge_ids[src].push(edge_id);
            predecessors[dst].push(src);
            in_edge_ids[dst].push(edge_id);
            out_lookup[src].push((dst, edge_id));
            edge_attrs.push(attr);
        }

        for lookup in &mut out_lookup {
            lookup.sort_unstable_by_key(|&(dst, _)| dst);
        }

        Self {
            node_attrs,
            edge_attrs,
            successors,
            out_edge_ids,
            predecessors,
            in_edge_ids,
            out_lookup,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_attrs.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_attrs.len()
    }

    /// True for the graph without nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_attrs.is_empty()
    }

    /// All node ids in ascending order.
    #[must_use]
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.node_count()
    }

    fn check_node(&self, node: NodeId) -> Result<(), GraphError> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                count: self.node_count(),
            })
        }
    }

    /// Attribute of `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] for an invalid id.
    pub fn node_attr(&self, node: NodeId) -> Result<&N, GraphError> {
        self.check_node(node)?;
        Ok(&self.node_attrs[node])
    }

    /// Attributes of all nodes, indexed by id.
    #[must_use]
    pub fn node_attrs(&self) -> &[N] {
        &self.node_attrs
    }

    /// Number of edges leaving `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] for an invalid id.
    pub fn out_degree(&self, node: NodeId) -> Result<usize, GraphError> {
        self.check_node(node)?;
        Ok(self.successors[node].len())
    }

    /// Number of edges entering `node`.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] for an invalid id.
    pub fn in_degree(&self, node: NodeId) -> Result<usize, GraphError> {
        self.check_node(node)?;
        Ok(self.predecessors[node].len())
    }

    /// The `index`-th outgoing edge of `node`: its destination and attribute.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] or [`GraphError::EdgeOutOfRange`].
    pub fn out_edge(&self, node: NodeId, index: usize) -> Result<(NodeId, &E), GraphError> {
        self.edge_at(node, index, Direction::Out)
    }

    /// The `index`-th incoming edge of `node`: its source and attribute.
    ///
    /// # Errors
    /// [`GraphError::NodeOutOfRange`] or [`GraphError::EdgeOutOfRange`].
    pub fn in_edge(&self, node: NodeId, index: usize) -> Result<(NodeId, &E), GraphError> {
        self.edge_at(node, index, Direction::In)
    }

    fn edge_at(
        &self,
        node: NodeId,
        index: usize,
        direction: Direction,
    ) -> Result<(NodeId, &E), GraphError> {
        self.check_node(node)?;
        let (ends, ids) = match direction {
            Direction::Out => (&self.successors[node], &self.out_edge_ids[node]),
            Direction::In => (&self.predecessors[node], &self.in_edge_ids[node]),
        };
        match (ends.get(index), ids.get(index)) {
            (Some(&other), Some(&edge_id)) => Ok((other, &self.edge_attrs[edge_id])),
            _ => Err(GraphError::EdgeOutOfRange {
                node,
                index,
                degree: ends.len(),
                direction,
            }),
        }
    }

    /// Destinations of the edges leaving `node`, in insertion order.
    ///
    /// # Panics
    /// If `node` is not a valid id.
    #[must_use]
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.successors[node]
    }

    /// Sources of the edges entering `node`, in insertion order.
    ///
    /// # Panics
    /// If `node` is not a valid id.
    #[must_use]
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.predecessors[node]
    }

    /// Adjacent nodes of `node` in the given direction.
    ///
    /// # Panics
    /// If `node` is not a valid id.
    #[must_use]
    pub fn neighbors(&self, node: NodeId, direction: Direction) -> &[NodeId] {
        match direction {
            Direction::Out => self.successors(node),
            Direction::In => self.predecessors(node),
        }
    }

    /// Outgoing edges of `node` as `(destination, attribute)`, in insertion order.
    ///
    /// # Panics
    /// If `node` is not a valid id.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.successors[node]
            .iter()
            .zip(&self.out_edge_ids[node])
            .map(|(&dst, &edge_id)| (dst, &self.edge_attrs[edge_id]))
    }

    /// Incoming edges of `node` as `(source, attribute)`, in insertion order.
    ///
    /// # Panics
    /// If `node` is not a valid id.
    pub fn in_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.predecessors[node]
            .iter()
            .zip(&self.in_edge_ids[node])
            .map(|(&src, &edge_id)| (src, &self.edge_attrs[edge_id]))
    }

    /// Attribute of the edge `src -> dst`, if present.
    ///
    /// # Panics
    /// If `src` is not a valid id.
    #[must_use]
    pub fn edge_attr(&self, src: NodeId, dst: NodeId) -> Option<&E> {
        let lookup = &self.out_lookup[src];
        lookup
            .binary_search_by_key(&dst, |&(d, _)| d)
            .ok()
            .map(|pos| &self.edge_attrs[lookup[pos].1])
    }

    /// True when the edge `src -> dst` exists.
    ///
    /// # Panics
    /// If `src` is not a valid id.
    #[must_use]
    pub fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.edge_attr(src, dst).is_some()
    }

    /// Every edge as `(src, dst, attr)`, grouped by source in id order and
    /// in insertion order within a source.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &E)> + '_ {
        self.successors.iter().enumerate().flat_map(move |(src, dsts)| {
            dsts.iter()
                .zip(&self.out_edge_ids[src])
                .map(move |(&dst, &edge_id)| (src, dst, &self.edge_attrs[edge_id]))
        })
    }
}
