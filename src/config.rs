//! Build configuration recognized by the graph engine.

use serde::{Deserialize, Serialize};

/// Options controlling which structural nodes a build produces.
///
/// When `include_headings` is false no Heading/Subheading nodes and no
/// Contains/Hierarchy edges are created; tag and reference extraction is
/// unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Create nodes for level-1 headings.
    pub include_headings: bool,
    /// Also create nodes for level-2..6 headings. Only meaningful when
    /// `include_headings` is set.
    pub include_subheadings: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            include_headings: false,
            include_subheadings: false,
        }
    }
}

impl GraphConfig {
    /// Whether a heading of the given markdown level produces a node under
    /// this configuration.
    pub fn admits_heading(&self, level: u8) -> bool {
        self.include_headings && (level == 1 || self.include_subheadings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_exclude_headings() {
        let config = GraphConfig::default();
        assert!(!config.admits_heading(1));
        assert!(!config.admits_heading(3));
    }

    #[test]
    fn test_headings_without_subheadings() {
        let config = GraphConfig {
            include_headings: true,
            include_subheadings: false,
        };
        assert!(config.admits_heading(1));
        assert!(!config.admits_heading(2));
    }

    #[test]
    fn test_subheadings_require_headings() {
        let config = GraphConfig {
            include_headings: false,
            include_subheadings: true,
        };
        assert!(!config.admits_heading(2));
    }
}
