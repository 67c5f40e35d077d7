#![allow(dead_code)]

use std::sync::OnceLock;

use argmatch_common::{AttributedGraph, GraphBuilder, MatchKind, NodeId};

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

/// Every mapping of `pattern` into `target`, found by trying all injective
/// assignments. Sorted.
pub fn brute_force<N: PartialEq, E: PartialEq>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    kind: MatchKind,
) -> Vec<Vec<NodeId>> {
    let mut found = Vec::new();
    let mut current = Vec::with_capacity(pattern.node_count());
    let mut used = vec![false; target.node_count()];
    extend(pattern, target, kind, &mut current, &mut used, &mut found);
    found.sort();
    found
}

fn extend<N: PartialEq, E: PartialEq>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    kind: MatchKind,
    current: &mut Vec<NodeId>,
    used: &mut [bool],
    found: &mut Vec<Vec<NodeId>>,
) {
    if current.len() == pattern.node_count() {
        if is_match(pattern, target, kind, current) {
            found.push(current.clone());
        }
        return;
    }
    for t in target.nodes() {
        if used[t] {
            continue;
        }
        used[t] = true;
        current.push(t);
        extend(pattern, target, kind, current, used, found);
        current.pop();
        used[t] = false;
    }
}

fn is_match<N: PartialEq, E: PartialEq>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    kind: MatchKind,
    map: &[NodeId],
) -> bool {
    let nodes_agree = pattern
        .nodes()
        .all(|p| pattern.node_attrs()[p] == target.node_attrs()[map[p]]);
    let edges_agree = pattern
        .edges()
        .all(|(src, dst, attr)| target.edge_attr(map[src], map[dst]) == Some(attr));
    let no_extra_edges = match kind {
        MatchKind::Monomorphism => true,
        MatchKind::Induced => pattern.nodes().all(|u| {
            pattern
                .nodes()
                .all(|v| !target.has_edge(map[u], map[v]) || pattern.has_edge(u, v))
        }),
    };
    nodes_agree && edges_agree && no_extra_edges
}
