//! Decoder for the subset of the Graphviz dot language used by topology snapshots.
//!
//! The producer writes petgraph's `Dot` output (`0 [ label = "..." ]`, `0 -> 1 [ label = "3" ]`);
//! hand-written files with chains, default attribute statements and comments are accepted too.

pub(crate) mod error;
pub(crate) mod lexer;
pub(crate) mod parser;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{TopoError, TopoResult};
use crate::graph::frame::TopologyFrame;

/// Decode a dot document held in memory.
pub fn decode_dot_str(src: &str) -> TopoResult<TopologyFrame> {
    parser::parse_dot(src).map_err(|e| TopoError::decode(e.to_string()))
}

/// Read and decode one dot file.
pub fn decode_dot_file(path: &Path) -> TopoResult<TopologyFrame> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("read dot file '{}'", path.display()))?;
    parser::parse_dot(&src)
        .map_err(|e| TopoError::decode(format!("'{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../../tests/unit/graph/dot/decode.rs"]
mod tests;
