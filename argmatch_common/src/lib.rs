//! Common graph model and shared types for the argmatch workspace.
//!
//! This crate provides the immutable attributed graph consumed by the matching
//! engine, the builder used to construct it, loaders and writers for the
//! supported on-disk encodings, and the search configuration.

mod attr;
mod builder;
mod config;
mod error;
pub mod format;
mod graph;

pub use crate::attr::*;
pub use crate::builder::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::format::{GraphFormat, load_graph};
pub use crate::graph::*;
