//! Pass 1: per-document node creation and link-intent collection.
//!
//! The builder walks documents in the order the corpus provider supplies
//! them, creating File/Heading/Tag nodes and the edges whose endpoints are
//! both local to one document (Contains, Hierarchy). Cross-document
//! references cannot be resolved yet because the target document may not
//! have been visited, so each one is recorded as a [`LinkIntent`] and
//! handed to [`resolver`](crate::codec::resolver) once the registry is
//! complete.
//!
//! All builder state is local to one build invocation. Nothing persists
//! between refreshes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    codec::{
        diagnostic::BuildDiagnostic,
        md::{self, DocumentFacts},
    },
    config::GraphConfig,
    properties::{Edge, EdgeKind, Node, NodeId, NodeKind},
};

/// An unresolved reference recorded during Pass 1 and consumed during
/// Pass 2. Not part of the exposed graph model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkIntent {
    /// Id of the File node the reference was written in.
    pub source: NodeId,
    /// The target exactly as written in the document.
    pub raw_target: String,
    /// Either [`EdgeKind::Reference`] or [`EdgeKind::Tagged`].
    pub kind: EdgeKind,
}

impl LinkIntent {
    pub fn reference(source: NodeId, raw_target: impl Into<String>) -> Self {
        LinkIntent {
            source,
            raw_target: raw_target.into(),
            kind: EdgeKind::Reference,
        }
    }

    pub fn tagged(source: NodeId, tag: impl Into<String>) -> Self {
        LinkIntent {
            source,
            raw_target: tag.into(),
            kind: EdgeKind::Tagged,
        }
    }
}

/// Insertion-ordered node table with an id index.
///
/// Records are kept in a `Vec` so that build output is deterministic for a
/// given corpus order. The index maps each id to its most recent record:
/// two headings with identical text in one document synthesize the same id
/// and both records are kept, colliding on id. That ambiguity is inherited
/// from the source data model and deliberately not papered over with a
/// disambiguation scheme.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeRegistry {
    /// Append a node record. If the id already exists the index is repointed
    /// at the new record but the old record stays in the table.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).and_then(|idx| self.nodes.get(*idx))
    }

    /// All records in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// File nodes in insertion order. Resolution heuristics scan these.
    pub fn file_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::File)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

/// Output of a completed Pass 1, ready for resolution.
#[derive(Debug, Default)]
pub struct Pass1Output {
    pub registry: NodeRegistry,
    /// Edges whose endpoints were both local to one document.
    pub local_edges: Vec<Edge>,
    pub intents: Vec<LinkIntent>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

/// Stateful Pass 1 builder. Feed it documents in corpus order, then call
/// [`GraphBuilder::finish`].
#[derive(Debug)]
pub struct GraphBuilder {
    config: GraphConfig,
    registry: NodeRegistry,
    local_edges: Vec<Edge>,
    intents: Vec<LinkIntent>,
    diagnostics: Vec<BuildDiagnostic>,
}

impl GraphBuilder {
    pub fn new(config: GraphConfig) -> Self {
        GraphBuilder {
            config,
            registry: NodeRegistry::default(),
            local_edges: Vec::new(),
            intents: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Register a document whose content could not be retrieved.
    ///
    /// The File node is still created (same kind, flagged degraded) so it can
    /// be a reference target, but it carries no structural children.
    pub fn add_unreadable_document(&mut self, path: &str) {
        tracing::debug!("Registering degraded file node for {path}");
        self.registry.insert(Node::degraded_file(path));
    }

    /// Process one document: create its nodes, its local edges, and its link
    /// intents. A partial extraction failure is recorded as a diagnostic and
    /// whatever facts were extracted are still used.
    pub fn add_document(&mut self, path: &str, content: &str) {
        let file_id = self.registry.insert(Node::file(path));

        let facts = md::extract_facts(content);
        if let Some(message) = &facts.error {
            self.diagnostics
                .push(BuildDiagnostic::parse_error(path, message.clone()));
        }

        self.add_headings(path, &file_id, &facts);

        for target in facts.wiki_links.iter().chain(facts.md_links.iter()) {
            self.intents
                .push(LinkIntent::reference(file_id.clone(), target.clone()));
        }

        // Tag nodes have no forward-reference problem (the tag text is the
        // id), so they are created eagerly. The Tagged edge still flows
        // through the intent list for uniform Pass 2 handling.
        for tag in &facts.tags {
            let tag_id = NodeId::tag(tag);
            if !self.registry.contains(&tag_id) {
                self.registry.insert(Node::tag(tag));
            }
            self.intents.push(LinkIntent::tagged(file_id.clone(), tag));
        }
    }

    /// Create heading nodes, Contains edges, and Hierarchy edges for one
    /// document, honoring the heading configuration.
    ///
    /// Hierarchy uses a single trailing pointer, not a nesting stack: heading
    /// *i* links to heading *i+1* only when the level increases. For
    /// `H1, H2, H3, H2b` this yields H1->H2 and H2->H3, and H2b gets no
    /// hierarchy edge back to H1. Layout code depends on this exact shape.
    fn add_headings(&mut self, path: &str, file_id: &NodeId, facts: &DocumentFacts) {
        let admitted: Vec<_> = facts
            .headings
            .iter()
            .filter(|h| self.config.admits_heading(h.level))
            .collect();

        let mut previous: Option<(NodeId, u8)> = None;
        for heading in admitted {
            let heading_id = self
                .registry
                .insert(Node::heading(path, &heading.text, heading.level));

            // Both endpoints are local, so Contains needs no deferral.
            self.local_edges.push(Edge::new(
                file_id.clone(),
                heading_id.clone(),
                EdgeKind::Contains,
            ));

            if let Some((prev_id, prev_level)) = previous.take() {
                if heading.level > prev_level {
                    self.local_edges
                        .push(Edge::new(prev_id, heading_id.clone(), EdgeKind::Hierarchy));
                }
            }
            previous = Some((heading_id, heading.level));
        }
    }

    /// Complete Pass 1 and hand the accumulated state to the resolver.
    pub fn finish(self) -> Pass1Output {
        tracing::debug!(
            "Pass 1 complete: {} nodes, {} local edges, {} intents",
            self.registry.len(),
            self.local_edges.len(),
            self.intents.len()
        );
        Pass1Output {
            registry: self.registry,
            local_edges: self.local_edges,
            intents: self.intents,
            diagnostics: self.diagnostics,
        }
    }
}
