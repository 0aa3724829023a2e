//! Text-only classification of rendered children.

use crate::model::PresentationNode;

/// Check whether every node is a text leaf.
///
/// An empty sequence is text-only so that an empty block collapses into
/// an empty text leaf.
pub fn is_text_only(nodes: &[PresentationNode]) -> bool {
    nodes.iter().all(PresentationNode::is_text)
}
