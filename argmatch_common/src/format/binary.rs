//! Binary encoding without attributes.
//!
//! The file is a sequence of little-endian 16-bit words. The first word is the
//! node count. Then, for each node, one word with the number of edges leaving
//! that node followed by one word per edge holding its destination.
//!
//! ```text
//! 03 00     Number of nodes (3)
//! 00 00     Number of edges out of node 0 (0)
//! 02 00     Number of edges out of node 1 (2)
//! 00 00     Target of the first edge of node 1 (edge 1 -> 0)
//! 02 00     Target of the second edge of node 1 (edge 1 -> 2)
//! 01 00     Number of edges out of node 2 (1)
//! 00 00     Target of the first (and only) edge of node 2 (edge 2 -> 0)
//! ```

use std::io::{self, Read, Write};

use crate::{AttributedGraph, FormatError, GraphBuilder, Location};

struct Words<R> {
    reader: R,
    position: usize,
}

impl<R: Read> Words<R> {
    const fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    fn next_word(&mut self, expected: &'static str) -> Result<(Location, u16), FormatError> {
        let mut buf = [0u8; 2];
        self.reader.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => FormatError::UnexpectedEof { expected },
            _ => FormatError::Io(e),
        })?;
        let location = Location::Word(self.position);
        self.position += 1;
        Ok((location, u16::from_le_bytes(buf)))
    }
}

/// Decode a graph from the binary encoding.
///
/// Every node receives `N::default()` and every edge `E::default()`.
///
/// # Errors
/// [`FormatError::UnexpectedEof`] on truncated input and
/// [`FormatError::Graph`] for out-of-range or duplicate edges.
pub fn read_binary<N, E, R>(reader: R) -> Result<AttributedGraph<N, E>, FormatError>
where
    N: Default,
    E: Default,
    R: Read,
{
    let mut words = Words::new(reader);
    let (_, count) = words.next_word("node count")?;
    let count = usize::from(count);

    let mut builder = GraphBuilder::with_capacity(count);
    for _ in 0..count {
        builder.insert_node(N::default());
    }

    for src in 0..count {
        let (_, edges) = words.next_word("edge count")?;
        for _ in 0..edges {
            let (location, dst) = words.next_word("edge target")?;
            builder
                .insert_edge(src, usize::from(dst), E::default())
                .map_err(|e| FormatError::graph(location, e))?;
        }
    }

    Ok(builder.build())
}

fn word(value: usize, what: &str) -> Result<[u8; 2], FormatError> {
    u16::try_from(value)
        .map(u16::to_le_bytes)
        .map_err(|_| FormatError::Unrepresentable(format!("{what} {value} exceeds 16 bits")))
}

/// Encode a graph in the binary format readable by [`read_binary`].
///
/// Attributes are dropped.
///
/// # Errors
/// [`FormatError::Unrepresentable`] when a count or id does not fit in 16
/// bits, or [`FormatError::Io`] from the writer.
pub fn write_binary<N, E, W>(graph: &AttributedGraph<N, E>, mut out: W) -> Result<(), FormatError>
where
    W: Write,
{
    out.write_all(&word(graph.node_count(), "node count")?)?;
    for node in graph.nodes() {
        let successors = graph.successors(node);
        out.write_all(&word(successors.len(), "edge count")?)?;
        for &dst in successors {
            out.write_all(&word(dst, "node id")?)?;
        }
    }
    out.flush()?;
    Ok(())
}
