//! Textual outline of a presentation tree.
//!
//! One line per node, `"<key> - <kind>"`, indented two spaces per level.
//! The same format backs the debug tree logger.

use crate::model::{PresentationNode, PresentationTree, TextContent};

/// Render the outline of a tree as a string.
pub fn outline(tree: &PresentationTree) -> String {
    let mut output = String::new();
    for (depth, node) in tree.walk() {
        output.push_str(&outline_line(depth, node));
        output.push('\n');
    }
    output
}

/// Log every node of a tree at debug level.
pub(crate) fn log_tree(tree: &PresentationTree) {
    for (depth, node) in tree.walk() {
        log::debug!("{}", outline_line(depth, node));
    }
}

fn outline_line(depth: usize, node: &PresentationNode) -> String {
    let mut line = format!("{}{} - {}", "  ".repeat(depth), node.key(), node.kind_name());

    if !node.styles().is_empty() {
        let styles: Vec<&str> = node.styles().iter().map(|role| role.name()).collect();
        line.push_str(&format!(" [{}]", styles.join(", ")));
    }

    if let PresentationNode::Text(leaf) = node {
        if let TextContent::Literal(text) = &leaf.content {
            line.push_str(&format!(" {:?}", text));
        }
    }
    if let Some(activation) = node.activation() {
        line.push_str(&format!(" -> {}", activation.href));
    }

    line
}
