//! Basic building blocks for assembling graph snapshots: node and edge kinds,
//! deterministic node identifiers, and the node/edge records themselves.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The category of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A source document.
    File,
    /// A level-1 heading within a document.
    Heading,
    /// A level-2..6 heading within a document.
    Subheading,
    /// A `#tag` occurrence. Tag nodes are corpus-global: the tag text is the
    /// identity, independent of which documents use it.
    Tag,
}

/// The category of a graph relationship.
///
/// Each kind carries a fixed weight consumed by downstream layout code; the
/// core treats the value as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// File owns heading.
    Contains,
    /// Heading nests under heading.
    Hierarchy,
    /// File links to file.
    Reference,
    /// File marked with tag.
    Tagged,
}

impl EdgeKind {
    /// Fixed per-kind layout weight in `(0, 1]`.
    pub fn weight(&self) -> f32 {
        match self {
            EdgeKind::Contains => 0.5,
            EdgeKind::Hierarchy => 0.3,
            EdgeKind::Reference => 0.7,
            EdgeKind::Tagged => 0.4,
        }
    }
}

/// A node identifier, globally unique within a build.
///
/// Ids are synthesized deterministically per kind:
///
/// - File: `file:<path>`
/// - Heading/Subheading: `heading:<path>:<text>`
/// - Tag: `tag:<text>`
///
/// Two headings with identical text in the same document synthesize the same
/// id; the builder keeps both records. See
/// [`NodeRegistry`](crate::codec::builder::NodeRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn file(path: &str) -> Self {
        NodeId(format!("file:{path}"))
    }

    pub fn heading(path: &str, text: &str) -> Self {
        NodeId(format!("heading:{path}:{text}"))
    }

    pub fn tag(text: &str) -> Self {
        NodeId(format!("tag:{text}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        NodeId(raw)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        NodeId(raw.to_string())
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Display text: file base name without extension, heading text, or
    /// `#tag`.
    pub label: String,
    /// Markdown heading depth 1-6. Present only on Heading/Subheading nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Owning document path. Present on File, Heading, and Subheading nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    /// Set on File nodes whose content could not be read. The node still
    /// participates in the graph (it can be a reference target) but carries
    /// no structural children.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degraded: bool,
}

impl Node {
    /// Create a File node for a corpus path.
    pub fn file(path: &str) -> Self {
        Node {
            id: NodeId::file(path),
            kind: NodeKind::File,
            label: file_label(path),
            level: None,
            source_file: Some(path.to_string()),
            degraded: false,
        }
    }

    /// Create a File node for a document whose content could not be read.
    pub fn degraded_file(path: &str) -> Self {
        let mut node = Node::file(path);
        node.degraded = true;
        node
    }

    /// Create a Heading (level 1) or Subheading (level 2-6) node.
    pub fn heading(path: &str, text: &str, level: u8) -> Self {
        Node {
            id: NodeId::heading(path, text),
            kind: if level == 1 {
                NodeKind::Heading
            } else {
                NodeKind::Subheading
            },
            label: text.to_string(),
            level: Some(level),
            source_file: Some(path.to_string()),
            degraded: false,
        }
    }

    /// Create a Tag node.
    pub fn tag(text: &str) -> Self {
        Node {
            id: NodeId::tag(text),
            kind: NodeKind::Tag,
            label: format!("#{text}"),
            level: None,
            source_file: None,
            degraded: false,
        }
    }
}

/// A typed, weighted graph edge between two node ids.
///
/// Invariant: in any published [`GraphSnapshot`](crate::model::GraphSnapshot)
/// both endpoints reference nodes present in the same build. The resolver and
/// snapshot constructor enforce this; no dangling edge is ever exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub weight: f32,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId, kind: EdgeKind) -> Self {
        Edge {
            weight: kind.weight(),
            source,
            target,
            kind,
        }
    }
}

/// Document category reported by the corpus provider. The engine only
/// consumes markdown-like documents; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Markdown,
    Other,
}

impl DocumentKind {
    /// Classify a path by extension (`.md` / `.markdown`).
    pub fn from_path(path: &str) -> Self {
        let base = path.rsplit('/').next().unwrap_or(path);
        match base.rsplit_once('.') {
            Some((_, ext)) if ext.eq_ignore_ascii_case("md") => DocumentKind::Markdown,
            Some((_, ext)) if ext.eq_ignore_ascii_case("markdown") => DocumentKind::Markdown,
            _ => DocumentKind::Other,
        }
    }

    pub fn is_markdown(&self) -> bool {
        matches!(self, DocumentKind::Markdown)
    }
}

/// Derive a File node label: base name with any extension stripped.
pub(crate) fn file_label(path: &str) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}
