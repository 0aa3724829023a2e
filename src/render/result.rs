//! Statistics over a rendered presentation tree.

use serde::{Deserialize, Serialize};

use crate::model::{ContainerKind, PresentationNode, PresentationTree, TextContent};

/// Counts collected from a presentation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of text leaves
    pub text_count: u32,

    /// Number of generic containers
    pub container_count: u32,

    /// Number of pressable containers
    pub pressable_count: u32,

    /// Number of media leaves
    pub media_count: u32,

    /// Number of nodes that open a reference (text or container)
    pub link_count: u32,

    /// Deepest nesting level (top-level nodes are 1)
    pub max_depth: u32,

    /// Character count of literal text (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a tree.
    pub fn collect(tree: &PresentationTree) -> Self {
        let mut stats = Self::new();
        for (depth, node) in tree.walk() {
            stats.add_node(depth as u32 + 1, node);
        }
        stats
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> u32 {
        self.text_count + self.container_count + self.pressable_count + self.media_count
    }

    fn add_node(&mut self, depth: u32, node: &PresentationNode) {
        self.max_depth = self.max_depth.max(depth);
        if node.activation().is_some() {
            self.link_count += 1;
        }

        match node {
            PresentationNode::Text(leaf) => {
                self.text_count += 1;
                if let TextContent::Literal(text) = &leaf.content {
                    self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
                }
            }
            PresentationNode::Container(container) => match container.kind {
                ContainerKind::Generic => self.container_count += 1,
                ContainerKind::Pressable(_) => self.pressable_count += 1,
                ContainerKind::Media(_) => self.media_count += 1,
            },
        }
    }
}

impl PresentationTree {
    /// Collect statistics over this tree.
    pub fn stats(&self) -> RenderStats {
        RenderStats::collect(self)
    }
}
