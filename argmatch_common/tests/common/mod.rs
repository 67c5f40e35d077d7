#![allow(dead_code)]

use std::sync::OnceLock;

use argmatch_common::{AttributedGraph, GraphBuilder};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a graph from node attributes and `(src, dst, attr)` triples.
pub fn graph<N, E: Clone>(nodes: Vec<N>, edges: &[(usize, usize, E)]) -> AttributedGraph<N, E> {
    let mut builder = GraphBuilder::new();
    for attr in nodes {
        builder.insert_node(attr);
    }
    for (src, dst, attr) in edges {
        builder
            .insert_edge(*src, *dst, attr.clone())
            .expect("test edge should be valid");
    }
    builder.build()
}

/// Edges of a graph as sorted `(src, dst, attr)` triples.
pub fn sorted_edges<N, E: Clone + Ord>(g: &AttributedGraph<N, E>) -> Vec<(usize, usize, E)> {
    let mut edges: Vec<_> = g.edges().map(|(s, d, a)| (s, d, a.clone())).collect();
    edges.sort();
    edges
}
