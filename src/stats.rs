//! Corpus-level metrics derived from a graph snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    model::GraphSnapshot,
    properties::{EdgeKind, NodeKind},
};

/// Summary metrics for one build, computed from the published snapshot so
/// they always agree with what consumers can observe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// File nodes, degraded ones included.
    pub file_count: usize,
    /// Heading and Subheading node records combined.
    pub heading_count: usize,
    /// Distinct tag nodes.
    pub tag_count: usize,
    /// All edges of all kinds.
    pub edge_count: usize,
    /// Resolved cross-document Reference edges.
    pub reference_count: usize,
    /// Mean degree over connected nodes (degree > 0), rounded to one decimal
    /// place. `0.0` for an edgeless graph.
    pub average_degree: f64,
}

impl GraphStats {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> Self {
        let mut stats = GraphStats::default();
        for node in snapshot.nodes() {
            match node.kind {
                NodeKind::File => stats.file_count += 1,
                NodeKind::Heading | NodeKind::Subheading => stats.heading_count += 1,
                NodeKind::Tag => stats.tag_count += 1,
            }
        }

        stats.edge_count = snapshot.edge_count();
        stats.reference_count = snapshot
            .edges()
            .iter()
            .filter(|e| e.kind == EdgeKind::Reference)
            .count();

        // Degree is an id-level property, so duplicate heading records must
        // not be counted twice.
        let mut seen = HashSet::new();
        let mut connected = 0usize;
        let mut degree_total = 0usize;
        for node in snapshot.nodes() {
            if !seen.insert(&node.id) {
                continue;
            }
            let degree = snapshot.degree(&node.id);
            if degree > 0 {
                connected += 1;
                degree_total += degree;
            }
        }
        if connected > 0 {
            let mean = degree_total as f64 / connected as f64;
            stats.average_degree = (mean * 10.0).round() / 10.0;
        }

        stats
    }
}
