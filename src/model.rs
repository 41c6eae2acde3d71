//! The immutable graph snapshot published to consumers.
//!
//! A [`GraphSnapshot`] is assembled once at the end of a refresh and never
//! mutated afterwards. Consumers (layout, rendering, statistics) hold an
//! `Arc<GraphSnapshot>` and can keep reading it while the engine builds a
//! replacement; swapping in the replacement is a pointer store, so no reader
//! ever observes a half-built graph.
//!
//! Construction enforces the no-dangling-edge invariant: any edge whose
//! endpoints are not both present in the node set is discarded before the
//! snapshot exists.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::{
    error::NotegraphError,
    properties::{Edge, Node, NodeId},
};

/// An immutable, validated graph of one corpus build.
///
/// Node records are kept in registration order. The adjacency structure is a
/// [`petgraph`] undirected graph built once at construction; it indexes nodes
/// by id, so the occasional duplicate-id heading record shares one adjacency
/// slot with its twin.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(skip_serializing)]
    adjacency: UnGraph<NodeId, f32>,
    #[serde(skip_serializing)]
    index: HashMap<NodeId, NodeIndex>,
}

impl GraphSnapshot {
    /// Assemble a snapshot from build output.
    ///
    /// Edges referencing an id absent from `nodes` are dropped. The resolver
    /// should never emit one, so a drop is logged as a software error rather
    /// than silently ignored.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut adjacency = UnGraph::default();
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::new();
        for node in &nodes {
            index
                .entry(node.id.clone())
                .or_insert_with(|| adjacency.add_node(node.id.clone()));
        }

        let edges: Vec<Edge> = edges
            .into_iter()
            .filter(|edge| {
                let kept = index.contains_key(&edge.source) && index.contains_key(&edge.target);
                if !kept {
                    tracing::error!(
                        "Discarding dangling {:?} edge {} -> {}",
                        edge.kind,
                        edge.source,
                        edge.target
                    );
                }
                kept
            })
            .collect();

        for edge in &edges {
            adjacency.add_edge(index[&edge.source], index[&edge.target], edge.weight);
        }

        GraphSnapshot {
            nodes,
            edges,
            adjacency,
            index,
        }
    }

    /// All node records, in registration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, local edges first, then resolved references in intent
    /// order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The most recently registered record for an id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().rev().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges incident to the node, counting each edge once per
    /// endpoint and irrespective of direction. Unknown ids have degree 0.
    pub fn degree(&self, id: &NodeId) -> usize {
        self.index
            .get(id)
            .map(|idx| self.adjacency.edges(*idx).count())
            .unwrap_or(0)
    }

    /// Ids adjacent to the node, in edge registration order.
    pub fn neighbors(&self, id: &NodeId) -> Vec<NodeId> {
        let Some(idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = self
            .adjacency
            .neighbors(*idx)
            .map(|n| self.adjacency[n].clone())
            .collect();
        // petgraph yields neighbors newest-first.
        out.reverse();
        out
    }

    /// Serialize the node/edge lists for the render boundary.
    pub fn to_json(&self) -> Result<serde_json::Value, NotegraphError> {
        Ok(serde_json::to_value(self)?)
    }
}
