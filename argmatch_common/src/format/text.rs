//! Line oriented text encoding with node and edge attributes.
//!
//! Blank lines and lines whose first non-blank character is `#` are ignored.
//! The first significant line holds the node count. Then one line per node,
//! `id attr`, where `id` must equal the node's 0-based position. Then, for
//! every node in id order, a line with its outgoing edge count followed by
//! that many `src dst attr` lines.
//!
//! ```text
//! # Number of nodes
//! 3
//!
//! # Node attributes
//! 0 27
//! 1 42
//! 2 13
//!
//! # Edges coming out of node 0
//! 2
//! 0 1 24
//! 0 2 73
//!
//! # Edges coming out of node 1
//! 1
//! 1 2 66
//!
//! # Edges coming out of node 2
//! 0
//! ```

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::trace;

use super::MAX_PREALLOCATED_NODES;
use crate::{AttributedGraph, FormatError, GraphBuilder, Location, NodeId, TextAttr};

/// Significant-line reader that tracks line numbers.
struct Records<R> {
    lines: io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }

    /// The next line that is neither blank nor a comment.
    fn next_record(&mut self, expected: &'static str) -> Result<(Location, String), FormatError> {
        loop {
            let Some(line) = self.lines.next() else {
                return Err(FormatError::UnexpectedEof { expected });
            };
            let line = line?;
            self.line_no += 1;

            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok((Location::Line(self.line_no), line));
        }
    }
}

fn parse_field<T: FromStr>(
    token: Option<&str>,
    location: Location,
    what: &str,
) -> Result<T, FormatError>
where
    T::Err: std::fmt::Display,
{
    let token = token.ok_or_else(|| FormatError::malformed(location, format!("missing {what}")))?;
    token
        .parse()
        .map_err(|e| FormatError::malformed(location, format!("invalid {what} '{token}': {e}")))
}

/// Decode a graph from the text encoding.
///
/// A non-positive node count yields the empty graph.
///
/// # Errors
/// [`FormatError::UnexpectedEof`] on truncated input,
/// [`FormatError::IdMismatch`] when a node record is out of order,
/// [`FormatError::Malformed`] on unparsable records and
/// [`FormatError::Graph`] for edges the builder rejects.
pub fn read_text<N, E, R>(reader: R) -> Result<AttributedGraph<N, E>, FormatError>
where
    N: TextAttr,
    E: TextAttr,
    R: BufRead,
{
    let mut records = Records::new(reader);

    let (location, header) = records.next_record("node count")?;
    let declared: i64 = parse_field(header.split_whitespace().next(), location, "node count")?;
    let count = usize::try_from(declared).unwrap_or(0);

    let mut builder = GraphBuilder::with_capacity(count.min(MAX_PREALLOCATED_NODES));

    for expected in 0..count {
        let (location, line) = records.next_record("node record")?;
        let mut tokens = line.split_whitespace();
        let found: NodeId = parse_field(tokens.next(), location, "node id")?;
        if found != expected {
            return Err(FormatError::IdMismatch {
                location,
                expected,
                found,
            });
        }
        let attr = N::parse_attr(tokens.next())
            .map_err(|reason| FormatError::malformed(location, reason))?;
        builder.insert_node(attr);
    }

    for node in 0..count {
        let (location, line) = records.next_record("edge count")?;
        let edges: usize = parse_field(line.split_whitespace().next(), location, "edge count")?;

        for _ in 0..edges {
            let (location, line) = records.next_record("edge record")?;
            let mut tokens = line.split_whitespace();
            let src: NodeId = parse_field(tokens.next(), location, "source id")?;
            let dst: NodeId = parse_field(tokens.next(), location, "destination id")?;
            let attr = E::parse_attr(tokens.next())
                .map_err(|reason| FormatError::malformed(location, reason))?;
            builder
                .insert_edge(src, dst, attr)
                .map_err(|e| FormatError::graph(location, e))?;
        }
        trace!(node, edges, "read edge block");
    }

    Ok(builder.build())
}

/// One record: `prefix` followed by the attribute token, if any.
///
/// Tokens the reader would split or skip are refused.
fn record(
    prefix: String,
    attr: &impl TextAttr,
    what: impl FnOnce() -> String,
) -> Result<String, FormatError> {
    let Some(token) = attr.to_token() else {
        return Ok(prefix);
    };
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(FormatError::Unrepresentable(format!(
            "{} attribute '{token}' is not a single token",
            what()
        )));
    }
    Ok([prefix, token].join(" "))
}

/// Encode a graph in the text format readable by [`read_text`].
///
/// # Errors
/// [`FormatError::Unrepresentable`] when an attribute token is empty or
/// contains whitespace, and [`FormatError::Io`] for writer failures. Nothing
/// is written once an attribute is refused.
pub fn write_text<N, E, W>(graph: &AttributedGraph<N, E>, mut out: W) -> Result<(), FormatError>
where
    N: TextAttr,
    E: TextAttr,
    W: Write,
{
    let mut lines = vec![graph.node_count().to_string()];
    for (id, attr) in graph.node_attrs().iter().enumerate() {
        lines.push(record(id.to_string(), attr, || format!("node {id}"))?);
    }

    for node in graph.nodes() {
        lines.push(graph.successors(node).len().to_string());
        for (dst, attr) in graph.out_edges(node) {
            lines.push(record(format!("{node} {dst}"), attr, || {
                format!("edge {node} -> {dst}")
            })?);
        }
    }

    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
