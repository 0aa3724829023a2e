//! Presentation tree types handed to the host view layer.

use serde::Serialize;

use super::Role;
use crate::error::Result;

/// The output of a render pass: the ordered top-level presentation nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PresentationTree {
    /// Top-level nodes in document order
    pub nodes: Vec<PresentationNode>,
}

impl PresentationTree {
    /// Create a tree from top-level nodes.
    pub fn new(nodes: Vec<PresentationNode>) -> Self {
        Self { nodes }
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, pre-order walk yielding `(depth, node)` pairs.
    ///
    /// Top-level nodes have depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.nodes)
    }

    /// Find a node by key.
    pub fn find(&self, key: &str) -> Option<&PresentationNode> {
        self.walk().map(|(_, node)| node).find(|node| node.key() == key)
    }

    /// Concatenated literal text of the whole tree.
    pub fn plain_text(&self) -> String {
        self.nodes.iter().map(PresentationNode::plain_text).collect()
    }
}

/// Iterator returned by [`PresentationTree::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a PresentationNode)>,
}

impl<'a> Walk<'a> {
    fn new(nodes: &'a [PresentationNode]) -> Self {
        Self {
            stack: nodes.iter().rev().map(|node| (0, node)).collect(),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a PresentationNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// A single presentation node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationNode {
    /// An inline text run.
    Text(TextLeaf),
    /// A structural container.
    Container(Container),
}

impl PresentationNode {
    /// Stable key of the node within its render pass.
    pub fn key(&self) -> &str {
        match self {
            PresentationNode::Text(leaf) => &leaf.key,
            PresentationNode::Container(container) => &container.key,
        }
    }

    /// Style roles applied to the node, in cascade order.
    pub fn styles(&self) -> &[Role] {
        match self {
            PresentationNode::Text(leaf) => &leaf.styles,
            PresentationNode::Container(container) => &container.styles,
        }
    }

    /// Nested presentation nodes.
    pub fn children(&self) -> &[PresentationNode] {
        match self {
            PresentationNode::Text(leaf) => match &leaf.content {
                TextContent::Literal(_) => &[],
                TextContent::Runs(runs) => runs,
            },
            PresentationNode::Container(container) => &container.children,
        }
    }

    /// Check if this node is a text leaf.
    pub fn is_text(&self) -> bool {
        matches!(self, PresentationNode::Text(_))
    }

    /// Get the text leaf if this is one.
    pub fn as_text(&self) -> Option<&TextLeaf> {
        match self {
            PresentationNode::Text(leaf) => Some(leaf),
            PresentationNode::Container(_) => None,
        }
    }

    /// Get the container if this is one.
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            PresentationNode::Text(_) => None,
            PresentationNode::Container(container) => Some(container),
        }
    }

    /// Activation attached to the node, if pressable.
    pub fn activation(&self) -> Option<&Activation> {
        match self {
            PresentationNode::Text(leaf) => leaf.activation.as_ref(),
            PresentationNode::Container(container) => match &container.kind {
                ContainerKind::Pressable(activation) => Some(activation),
                _ => None,
            },
        }
    }

    /// Short host kind name: `text`, `view`, `pressable` or `media`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            PresentationNode::Text(_) => "text",
            PresentationNode::Container(container) => match container.kind {
                ContainerKind::Generic => "view",
                ContainerKind::Pressable(_) => "pressable",
                ContainerKind::Media(_) => "media",
            },
        }
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            PresentationNode::Text(TextLeaf {
                content: TextContent::Literal(text),
                ..
            }) => text.clone(),
            _ => self.children().iter().map(Self::plain_text).collect(),
        }
    }
}

impl From<TextLeaf> for PresentationNode {
    fn from(leaf: TextLeaf) -> Self {
        PresentationNode::Text(leaf)
    }
}

impl From<Container> for PresentationNode {
    fn from(container: Container) -> Self {
        PresentationNode::Container(container)
    }
}

/// An inline text run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLeaf {
    pub key: String,
    pub styles: Vec<Role>,
    pub content: TextContent,

    /// Set when pressing the text opens a reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,

    /// Line limit with tail ellipsis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

impl TextLeaf {
    /// Create a leaf holding a literal string.
    pub fn literal(key: impl Into<String>, styles: Vec<Role>, text: impl Into<String>) -> Self {
        Self::with_content(key, styles, TextContent::Literal(text.into()))
    }

    /// Create a leaf holding nested runs.
    pub fn runs(key: impl Into<String>, styles: Vec<Role>, runs: Vec<PresentationNode>) -> Self {
        Self::with_content(key, styles, TextContent::Runs(runs))
    }

    fn with_content(key: impl Into<String>, styles: Vec<Role>, content: TextContent) -> Self {
        Self {
            key: key.into(),
            styles,
            content,
            activation: None,
            max_lines: None,
        }
    }

    /// Attach an activation.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = Some(activation);
        self
    }

    /// Limit the leaf to a number of lines.
    pub fn with_max_lines(mut self, lines: u32) -> Self {
        self.max_lines = Some(lines);
        self
    }
}

/// Content of a text leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextContent {
    /// A literal string.
    Literal(String),
    /// Nested runs rendered inline.
    Runs(Vec<PresentationNode>),
}

/// A structural container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    pub key: String,
    #[serde(flatten)]
    pub kind: ContainerKind,
    pub styles: Vec<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PresentationNode>,
}

impl Container {
    /// Create a generic container.
    pub fn generic(
        key: impl Into<String>,
        styles: Vec<Role>,
        children: Vec<PresentationNode>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: ContainerKind::Generic,
            styles,
            children,
        }
    }

    /// Create a pressable container.
    pub fn pressable(
        key: impl Into<String>,
        styles: Vec<Role>,
        activation: Activation,
        children: Vec<PresentationNode>,
    ) -> Self {
        Self {
            key: key.into(),
            kind: ContainerKind::Pressable(activation),
            styles,
            children,
        }
    }

    /// Create a media container.
    pub fn media(key: impl Into<String>, styles: Vec<Role>, source: MediaSource) -> Self {
        Self {
            key: key.into(),
            kind: ContainerKind::Media(source),
            styles,
            children: Vec::new(),
        }
    }
}

/// Host primitive a container maps to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerKind {
    /// Plain layout container.
    Generic,
    /// Container that opens a reference when pressed.
    Pressable(Activation),
    /// Media leaf.
    Media(MediaSource),
}

/// Source description of a media leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub media: MediaKind,
}

impl MediaSource {
    /// Create an image source.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            title: None,
            media: MediaKind::Image,
        }
    }
}

/// Embed kind of a media leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image
    Image,
    /// Embedded video player
    Video,
}

/// Opens link targets on behalf of the host.
pub trait ReferenceOpener {
    /// Open a reference; an error means the target is broken or unsupported.
    fn open(&self, href: &str) -> Result<()>;
}

impl<F> ReferenceOpener for F
where
    F: Fn(&str) -> Result<()>,
{
    fn open(&self, href: &str) -> Result<()> {
        self(href)
    }
}

/// What happens when a pressable node is activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activation {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Activation {
    /// Create an activation opening `href`.
    pub fn open(href: impl Into<String>, title: Option<String>) -> Self {
        Self {
            href: href.into(),
            title,
        }
    }

    /// Hand the reference to `opener`.
    ///
    /// Failures are logged and absorbed; activation never fails.
    pub fn activate(&self, opener: &dyn ReferenceOpener) {
        if let Err(e) = opener.open(&self.href) {
            log::warn!("Failed to open reference {}: {}", self.href, e);
        }
    }
}
