//! Diagnostic types for graph builds.
//!
//! Diagnostics represent non-fatal issues discovered while building: a
//! document that could not be read, a document whose structural extraction
//! partially failed, or a link whose target does not exist in the corpus.
//! They are collected and surfaced to the caller as data alongside the
//! snapshot, never thrown.

use serde::{Deserialize, Serialize};

use crate::properties::NodeId;

/// A reference that did not match any File node during resolution.
///
/// Recorded for observability only; unresolved intents produce no edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedLink {
    /// Id of the node containing the reference (always a File node).
    pub source: NodeId,
    /// The target exactly as written in the document.
    pub raw_target: String,
}

/// Diagnostic information produced during a graph build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuildDiagnostic {
    /// A document's content could not be retrieved. The document still gets
    /// a degraded File node and the build continues.
    ReadError { path: String, message: String },

    /// Structural extraction partially failed for a document. Whatever facts
    /// were extracted before the failure are still used.
    ParseError { path: String, message: String },

    /// A link intent whose target could not be matched to any File node.
    UnresolvedLink(UnresolvedLink),

    /// An informational message about the build.
    Info(String),
}

impl BuildDiagnostic {
    pub fn read_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::Info(message.into())
    }

    pub fn is_unresolved_link(&self) -> bool {
        matches!(self, Self::UnresolvedLink(_))
    }

    pub fn as_unresolved_link(&self) -> Option<&UnresolvedLink> {
        match self {
            Self::UnresolvedLink(unresolved) => Some(unresolved),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadError { path, message } => {
                write!(f, "Read error for {path}: {message}")
            }
            Self::ParseError { path, message } => {
                write!(f, "Parse error in {path}: {message}")
            }
            Self::UnresolvedLink(unresolved) => {
                write!(
                    f,
                    "Unresolved link in {}: '{}'",
                    unresolved.source, unresolved.raw_target
                )
            }
            Self::Info(msg) => write!(f, "Info: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_accessors() {
        let unresolved = BuildDiagnostic::UnresolvedLink(UnresolvedLink {
            source: NodeId::file("a.md"),
            raw_target: "missing".to_string(),
        });
        assert!(unresolved.is_unresolved_link());
        assert_eq!(
            unresolved.as_unresolved_link().map(|u| u.raw_target.as_str()),
            Some("missing")
        );

        let read = BuildDiagnostic::read_error("a.md", "permission denied");
        assert!(!read.is_unresolved_link());
        assert!(read.as_unresolved_link().is_none());
    }

    #[test]
    fn test_display_formats() {
        let diag = BuildDiagnostic::parse_error("b.md", "bad pattern");
        assert_eq!(format!("{diag}"), "Parse error in b.md: bad pattern");
    }
}
