use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef as _;

/// A peer in one topology snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerNode {
    /// Node identifier as written in the dot file.
    pub id: String,
    /// Optional `label` attribute.
    pub label: Option<String>,
}

impl PeerNode {
    /// Text drawn next to the node: its `label`, or the id when unlabelled.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// One decoded snapshot: a directed multigraph keyed by peer id.
///
/// Node enumeration order is first-appearance order in the source, and parallel edges are
/// kept as separate edges. Edge attributes are not kept.
#[derive(Clone, Debug, Default)]
pub struct TopologyFrame {
    graph: DiGraph<PeerNode, ()>,
    by_id: HashMap<String, NodeIndex>,
    directed: bool,
}

impl TopologyFrame {
    /// Create an empty frame.
    pub fn new(directed: bool) -> Self {
        Self {
            graph: DiGraph::new(),
            by_id: HashMap::new(),
            directed,
        }
    }

    /// `false` when decoded from an undirected `graph` document.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Return the node for `id`, inserting it at the end of the enumeration if new.
    pub fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&ix) = self.by_id.get(id) {
            return ix;
        }
        let ix = self.graph.add_node(PeerNode {
            id: id.to_owned(),
            label: None,
        });
        self.by_id.insert(id.to_owned(), ix);
        ix
    }

    /// Set the `label` attribute of an existing or new node.
    pub fn set_node_label(&mut self, id: &str, label: impl Into<String>) {
        let ix = self.ensure_node(id);
        self.graph[ix].label = Some(label.into());
    }

    /// Append an edge, creating endpoints as needed. Parallel edges are kept.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        self.graph.add_edge(a, b, ());
    }

    /// Whether an edge `from -> to` exists; either orientation counts in undirected frames.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.by_id.get(from), self.by_id.get(to)) else {
            return false;
        };
        self.graph.contains_edge(a, b) || (!self.directed && self.graph.contains_edge(b, a))
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges, parallel edges counted individually.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in enumeration order.
    pub fn nodes(&self) -> impl Iterator<Item = &PeerNode> + '_ {
        self.graph.node_indices().map(move |ix| &self.graph[ix])
    }

    /// `(from_id, to_id)` pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.graph.edge_references().map(move |e| {
            (
                self.graph[e.source()].id.as_str(),
                self.graph[e.target()].id.as_str(),
            )
        })
    }

    /// `(from_position, to_position)` pairs in insertion order.
    pub fn edge_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Position of `id` in this frame's node enumeration.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).map(|ix| ix.index())
    }

    /// Whether the frame contains `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Borrow the underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<PeerNode, ()> {
        &self.graph
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/frame.rs"]
mod tests;
