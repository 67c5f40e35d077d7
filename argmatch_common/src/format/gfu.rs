//! GFU encoding of undirected graphs with node attributes.
//!
//! Whitespace separated tokens: a graph name, the node count, one attribute
//! per node, the edge count, then one `u v` pair per undirected edge. Each
//! pair becomes the two directed edges `u -> v` and `v -> u` carrying
//! `E::default()`; a self-loop becomes a single edge.

use std::io::Read;
use std::str::FromStr;

use tracing::debug;

use super::MAX_PREALLOCATED_NODES;
use crate::{AttributedGraph, FormatError, GraphBuilder, Location, NodeId, TextAttr};

struct Tokens {
    tokens: Vec<String>,
    position: usize,
}

impl Tokens {
    fn new(input: &str) -> Self {
        Self {
            tokens: input.split_whitespace().map(str::to_owned).collect(),
            position: 0,
        }
    }

    fn next_token(&mut self, expected: &'static str) -> Result<(Location, &str), FormatError> {
        let location = Location::Token(self.position);
        let token = self
            .tokens
            .get(self.position)
            .ok_or(FormatError::UnexpectedEof { expected })?;
        self.position += 1;
        Ok((location, token.as_str()))
    }

    fn next_parsed<T: FromStr>(&mut self, expected: &'static str) -> Result<(Location, T), FormatError>
    where
        T::Err: std::fmt::Display,
    {
        let (location, token) = self.next_token(expected)?;
        token
            .parse()
            .map(|value| (location, value))
            .map_err(|e| FormatError::malformed(location, format!("invalid {expected} '{token}': {e}")))
    }
}

/// Decode a graph from the GFU encoding.
///
/// A pair whose directed edge already exists (for instance an undirected edge
/// listed in both orientations) is not inserted again.
///
/// # Errors
/// [`FormatError::UnexpectedEof`] on truncated input,
/// [`FormatError::Malformed`] on unparsable tokens and
/// [`FormatError::Graph`] for endpoints that do not exist.
pub fn read_gfu<N, E, R>(mut reader: R) -> Result<AttributedGraph<N, E>, FormatError>
where
    N: TextAttr,
    E: Default,
    R: Read,
{
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let mut tokens = Tokens::new(&input);

    let (_, name) = tokens.next_token("graph name")?;
    let name = name.to_owned();
    let (_, count): (_, usize) = tokens.next_parsed("node count")?;

    let mut builder = GraphBuilder::with_capacity(count.min(MAX_PREALLOCATED_NODES));
    for _ in 0..count {
        let (location, token) = tokens.next_token("node attribute")?;
        let attr = N::parse_attr(Some(token)).map_err(|reason| FormatError::malformed(location, reason))?;
        builder.insert_node(attr);
    }

    let (_, edges): (_, usize) = tokens.next_parsed("edge count")?;
    let mut skipped = 0usize;
    for _ in 0..edges {
        let (location, u): (_, NodeId) = tokens.next_parsed("edge endpoint")?;
        let (_, v): (_, NodeId) = tokens.next_parsed("edge endpoint")?;

        for (src, dst) in [(u, v), (v, u)] {
            if builder.has_edge(src, dst) {
                skipped += 1;
                continue;
            }
            builder
                .insert_edge(src, dst, E::default())
                .map_err(|e| FormatError::graph(location, e))?;
        }
    }

    debug!(
        "gfu graph '{}': {} nodes, {} undirected edges, {} repeated directions skipped",
        name, count, edges, skipped
    );
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Empty;

    #[test]
    fn pairs_become_two_directed_edges() {
        let input = "#mol\n3\n7\n8\n7\n2\n0 1\n1 2\n";
        let g: AttributedGraph<i32, Empty> = read_gfu(input.as_bytes()).unwrap();
        assert_eq!(g.node_attrs(), &[7, 8, 7]);
        assert_eq!(g.edge_count(), 4);
        for (u, v) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert!(g.has_edge(u, v), "missing {u} -> {v}");
        }
    }

    #[test]
    fn self_loop_is_inserted_once() {
        let input = "g 1 5 1 0 0";
        let g: AttributedGraph<i32, Empty> = read_gfu(input.as_bytes()).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(0, 0));
    }

    #[test]
    fn missing_pair_is_fatal() {
        let input = "g 2 1 1 2 0 1";
        let err = read_gfu::<i32, Empty, _>(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedEof {
                expected: "edge endpoint"
            }
        ));
    }

    #[test]
    fn huge_node_count_runs_out_of_input() {
        let input = "g 18446744073709551615 1";
        let err = read_gfu::<i32, Empty, _>(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedEof {
                expected: "node attribute"
            }
        ));
    }

    #[test]
    fn unknown_endpoint_is_fatal() {
        let input = "g 2 1 1 1 0 9";
        let err = read_gfu::<i32, Empty, _>(input.as_bytes()).unwrap_err();
        assert!(matches!(err, FormatError::Graph { .. }));
    }
}
