#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use argmatch_common::{AttributedGraph, Config, Empty};
use argmatch_subgraph::{CountOnly, Matcher, find_subgraphs};
use rayon::prelude::*;

mod common;

use common::{graph, init_test_logger};

/// A ring of `n` nodes with chords to the node two steps ahead.
fn ring_with_chords(n: usize) -> AttributedGraph<u8, Empty> {
    let mut edges = Vec::new();
    for i in 0..n {
        edges.push((i, (i + 1) % n, Empty));
        edges.push((i, (i + 2) % n, Empty));
    }
    graph(vec![0; n], &edges)
}

fn triangle() -> AttributedGraph<u8, Empty> {
    graph(vec![0; 3], &[(0, 1, Empty), (1, 2, Empty), (0, 2, Empty)])
}

#[test]
fn concurrent_searches_agree() {
    init_test_logger();
    let target = ring_with_chords(40);
    let pattern = triangle();
    let expected = find_subgraphs(&pattern, &target, Config::default()).unwrap();
    assert_eq!(expected.len(), 40);

    let results: Vec<_> = (0..8)
        .into_par_iter()
        .map(|_| find_subgraphs(&pattern, &target, Config::default()).unwrap())
        .collect();
    assert!(results.iter().all(|r| *r == expected));
}

#[test]
fn one_problem_runs_on_many_threads() {
    let target = ring_with_chords(25);
    let pattern = triangle();
    let matcher = Matcher::new(&pattern, &target, Config::default());
    let problem = matcher.problem().unwrap();

    let counts: Vec<u64> = (0..8)
        .into_par_iter()
        .map(|_| {
            let mut counter = CountOnly::default();
            problem.run(&mut counter).solutions
        })
        .collect();
    assert!(counts.iter().all(|&c| c == 25));
}
