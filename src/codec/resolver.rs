//! Pass 2: link-intent resolution against the complete node registry.
//!
//! Resolution is a pure function over `(registry, intents)`. It runs only
//! after every document has been visited, so forward references resolve
//! regardless of the order documents were ingested in, and it is independent
//! of how Pass 1 was parallelized.
//!
//! Only File nodes are reference targets; headings are never matched. The
//! attempt order below decides which ambiguous targets resolve and which
//! don't, so it must not be reordered:
//!
//! 1. exact basename match (extension-stripped target against
//!    extension-stripped file basenames, first file in corpus order wins)
//! 2. path-suffix match (`/<raw>.md`, then `/<raw>`)
//! 3. direct id probe (`file:<raw>`)
//!
//! A miss after all attempts drops the intent, records an
//! [`UnresolvedLink`] warning, and produces no edge.

use crate::{
    codec::{
        builder::{LinkIntent, NodeRegistry},
        diagnostic::UnresolvedLink,
    },
    properties::{Edge, EdgeKind, NodeId},
};

/// Finalized edges plus the intents that failed to resolve.
#[derive(Debug, Default)]
pub struct Resolution {
    pub edges: Vec<Edge>,
    pub unresolved: Vec<UnresolvedLink>,
}

/// Strip a trailing `.md` extension. Other extensions are left alone; a
/// `.markdown` target only resolves when written exactly.
fn strip_md_suffix(name: &str) -> &str {
    name.strip_suffix(".md").unwrap_or(name)
}

/// Normalize a raw reference target: drop a trailing `.md`, then take the
/// final path segment.
fn normalize_target(raw: &str) -> &str {
    let stripped = strip_md_suffix(raw);
    stripped.rsplit('/').next().unwrap_or(stripped)
}

/// Extension-stripped base name of a file path, as used for attempt (1).
fn file_basename(path: &str) -> &str {
    strip_md_suffix(path.rsplit('/').next().unwrap_or(path))
}

/// Resolve one Reference intent target to a File node id, or `None`.
fn resolve_file_target(registry: &NodeRegistry, raw: &str) -> Option<NodeId> {
    let normalized = normalize_target(raw);

    // 1. Exact basename match, first file in corpus order wins.
    for node in registry.file_nodes() {
        let path = node.source_file.as_deref().unwrap_or_default();
        if file_basename(path) == normalized {
            return Some(node.id.clone());
        }
    }

    // 2. Path-suffix match against the target as written.
    let with_ext = format!("/{raw}.md");
    let bare = format!("/{raw}");
    for node in registry.file_nodes() {
        let path = node.source_file.as_deref().unwrap_or_default();
        if path.ends_with(&with_ext) || path.ends_with(&bare) {
            return Some(node.id.clone());
        }
    }

    // 3. Direct id probe, for targets written as exact ids.
    let probe = NodeId::file(raw);
    if registry.contains(&probe) {
        return Some(probe);
    }

    None
}

/// Consume the Pass 1 intent list, emitting an edge per resolvable intent
/// and a warning per miss.
pub fn resolve_intents(registry: &NodeRegistry, intents: Vec<LinkIntent>) -> Resolution {
    let mut resolution = Resolution::default();

    for intent in intents {
        let target = match intent.kind {
            EdgeKind::Reference => resolve_file_target(registry, &intent.raw_target),
            EdgeKind::Tagged => {
                let tag_id = NodeId::tag(&intent.raw_target);
                registry.contains(&tag_id).then_some(tag_id)
            }
            // Contains/Hierarchy edges never go through the intent list.
            _ => None,
        };

        match target {
            Some(target) => {
                resolution
                    .edges
                    .push(Edge::new(intent.source, target, intent.kind));
            }
            None => {
                tracing::debug!(
                    "Dropping unresolvable {:?} intent '{}' from {}",
                    intent.kind,
                    intent.raw_target,
                    intent.source
                );
                resolution.unresolved.push(UnresolvedLink {
                    source: intent.source,
                    raw_target: intent.raw_target,
                });
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Node;

    fn registry_of(paths: &[&str]) -> NodeRegistry {
        let mut registry = NodeRegistry::default();
        for path in paths {
            registry.insert(Node::file(path));
        }
        registry
    }

    #[test]
    fn test_basename_match_strips_md() {
        let registry = registry_of(&["docs/b.md"]);
        assert_eq!(
            resolve_file_target(&registry, "b"),
            Some(NodeId::file("docs/b.md"))
        );
        assert_eq!(
            resolve_file_target(&registry, "b.md"),
            Some(NodeId::file("docs/b.md"))
        );
        assert_eq!(
            resolve_file_target(&registry, "elsewhere/b"),
            Some(NodeId::file("docs/b.md"))
        );
    }

    #[test]
    fn test_first_basename_match_wins_in_corpus_order() {
        let registry = registry_of(&["z/b.md", "notes/b.md"]);
        // Even though "notes/b" names the second file's path exactly, the
        // basename attempt runs first and scans in corpus order.
        assert_eq!(
            resolve_file_target(&registry, "notes/b"),
            Some(NodeId::file("z/b.md"))
        );
    }

    #[test]
    fn test_path_suffix_fallback() {
        // Basename of "c.md.md" is "c.md", so attempt (1) misses for the
        // target "c.md" and the suffix attempt picks it up.
        let registry = registry_of(&["x/c.md.md"]);
        assert_eq!(
            resolve_file_target(&registry, "c.md"),
            Some(NodeId::file("x/c.md.md"))
        );
    }

    #[test]
    fn test_markdown_extension_not_stripped() {
        let registry = registry_of(&["docs/b.markdown"]);
        // Only `.md` is stripped during normalization, so the bare name
        // misses while the exact name matches.
        assert_eq!(resolve_file_target(&registry, "b"), None);
        assert_eq!(
            resolve_file_target(&registry, "b.markdown"),
            Some(NodeId::file("docs/b.markdown"))
        );
    }

    #[test]
    fn test_unresolved_intent_drops_without_edge() {
        let registry = registry_of(&["a.md"]);
        let intents = vec![LinkIntent::reference(NodeId::file("a.md"), "nonexistent")];
        let resolution = resolve_intents(&registry, intents);

        assert!(resolution.edges.is_empty());
        assert_eq!(resolution.unresolved.len(), 1);
        assert_eq!(resolution.unresolved[0].source, "file:a.md");
        assert_eq!(resolution.unresolved[0].raw_target, "nonexistent");
    }

    #[test]
    fn test_headings_are_never_reference_targets() {
        let mut registry = registry_of(&["a.md"]);
        registry.insert(Node::heading("a.md", "Topic", 1));
        let intents = vec![LinkIntent::reference(NodeId::file("a.md"), "Topic")];
        let resolution = resolve_intents(&registry, intents);

        assert!(resolution.edges.is_empty());
        assert_eq!(resolution.unresolved.len(), 1);
    }

    #[test]
    fn test_tagged_intent_resolves_by_id() {
        let mut registry = registry_of(&["a.md"]);
        registry.insert(Node::tag("ethics"));
        let intents = vec![LinkIntent::tagged(NodeId::file("a.md"), "ethics")];
        let resolution = resolve_intents(&registry, intents);

        assert_eq!(resolution.edges.len(), 1);
        let edge = &resolution.edges[0];
        assert_eq!(edge.kind, EdgeKind::Tagged);
        assert_eq!(edge.target, "tag:ethics");
        assert_eq!(edge.weight, 0.4);
    }

    #[test]
    fn test_degraded_file_is_a_valid_target() {
        let mut registry = NodeRegistry::default();
        registry.insert(Node::degraded_file("broken.md"));
        assert_eq!(
            resolve_file_target(&registry, "broken"),
            Some(NodeId::file("broken.md"))
        );
    }
}
