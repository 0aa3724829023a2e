//! Syntax tree types produced by a Markdown parser.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Literal payloads that upstream parsers emit for missing values.
const SENTINEL_TEXTS: [&str; 3] = ["", "null", "undefined"];

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// A parsed document: the ordered top-level syntax nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntaxTree {
    /// Top-level nodes in document order
    pub nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree from top-level nodes.
    pub fn from_nodes(nodes: Vec<SyntaxNode>) -> Self {
        Self { nodes }
    }

    /// Load a tree from its JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(Error::InvalidTree(
                "expected a JSON array of nodes at the top level".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Load a tree from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize the tree to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add a top-level node.
    pub fn push(&mut self, node: SyntaxNode) {
        self.nodes.push(node);
    }

    /// Number of top-level nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest nesting level (top-level nodes are depth 1).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&SyntaxNode, usize)> = self.nodes.iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            for child in node.children() {
                stack.push((child, depth + 1));
            }
        }
        max
    }
}

/// A single node of the syntax tree.
///
/// Untagged text appears as a bare string, elements as tagged objects and
/// missing values as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyntaxNode {
    /// A missing value.
    Null,
    /// Untagged literal text.
    Text(String),
    /// A tagged element.
    Element(Element),
}

impl SyntaxNode {
    /// Create an untagged text node.
    pub fn text(text: impl Into<String>) -> Self {
        SyntaxNode::Text(text.into())
    }

    /// Create an element node with children.
    pub fn element(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Element(Element::new(kind).with_children(children))
    }

    /// Create a heading of the given level.
    pub fn heading(level: u8, children: Vec<SyntaxNode>) -> Self {
        Self::element(NodeKind::heading(level), children)
    }

    /// Create a generic block (paragraph).
    pub fn block(children: Vec<SyntaxNode>) -> Self {
        Self::element(NodeKind::Block, children)
    }

    /// Create a block quote.
    pub fn quote(children: Vec<SyntaxNode>) -> Self {
        Self::element(NodeKind::Quote, children)
    }

    /// Create an ordered or unordered list.
    pub fn list(ordered: bool, items: Vec<SyntaxNode>) -> Self {
        let kind = if ordered {
            NodeKind::OrderedList
        } else {
            NodeKind::UnorderedList
        };
        Self::element(kind, items)
    }

    /// Create a list item.
    pub fn item(children: Vec<SyntaxNode>) -> Self {
        Self::element(NodeKind::ListItem, children)
    }

    /// Create a link.
    pub fn link(href: impl Into<String>, children: Vec<SyntaxNode>) -> Self {
        let mut element = Element::new(NodeKind::Link).with_children(children);
        element.href = Some(href.into());
        SyntaxNode::Element(element)
    }

    /// Create a media node.
    pub fn media(src: impl Into<String>, alt: impl Into<String>) -> Self {
        let mut element = Element::new(NodeKind::Media);
        element.src = Some(src.into());
        element.alt = Some(alt.into());
        SyntaxNode::Element(element)
    }

    /// Create an inline code span.
    pub fn code(text: impl Into<String>) -> Self {
        SyntaxNode::Element(Element::new(NodeKind::InlineCode).with_text(text))
    }

    /// Create a thematic break.
    pub fn rule() -> Self {
        SyntaxNode::Element(Element::new(NodeKind::Rule))
    }

    /// Check whether the node carries anything to render.
    ///
    /// Missing values and the sentinel literals `""`, `"null"` and
    /// `"undefined"` are treated as absent.
    pub fn is_renderable(&self) -> bool {
        match self {
            SyntaxNode::Null => false,
            SyntaxNode::Text(text) => !SENTINEL_TEXTS.contains(&text.as_str()),
            SyntaxNode::Element(_) => true,
        }
    }

    /// Get the element if this node is tagged.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            SyntaxNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Child nodes (empty for text and literal payloads).
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Element(element) => element.children.nodes(),
            _ => &[],
        }
    }

    /// Concatenated literal text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        match self {
            SyntaxNode::Null => String::new(),
            SyntaxNode::Text(text) => text.clone(),
            SyntaxNode::Element(element) => match &element.children {
                NodeData::Text(text) => text.clone(),
                NodeData::Children(children) => {
                    children.iter().map(SyntaxNode::plain_text).collect()
                }
            },
        }
    }
}

impl From<&str> for SyntaxNode {
    fn from(text: &str) -> Self {
        SyntaxNode::text(text)
    }
}

impl From<Element> for SyntaxNode {
    fn from(element: Element) -> Self {
        SyntaxNode::Element(element)
    }
}

/// A tagged syntax node with kind-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Node kind tag
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Literal payload or child nodes
    #[serde(default, skip_serializing_if = "NodeData::is_empty")]
    pub children: NodeData,

    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Link or media title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Media source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Media alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Element {
    /// Create an element with no payload.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: NodeData::default(),
            href: None,
            title: None,
            src: None,
            alt: None,
        }
    }

    /// Set child nodes.
    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = NodeData::Children(children);
        self
    }

    /// Set a literal text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children = NodeData::Text(text.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

// Deep trees would overflow the stack with the derived recursive drop, so
// descendants are unlinked onto a heap stack first.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = match &mut self.children {
            NodeData::Children(children) if !children.is_empty() => std::mem::take(children),
            _ => return,
        };
        while let Some(mut node) = pending.pop() {
            if let SyntaxNode::Element(element) = &mut node {
                if let NodeData::Children(children) = &mut element.children {
                    pending.append(children);
                }
            }
        }
    }
}

/// Payload of an element: a literal string or ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeData {
    /// Literal text payload.
    Text(String),
    /// Ordered child nodes.
    Children(Vec<SyntaxNode>),
}

impl NodeData {
    /// Child nodes, empty for a literal payload.
    pub fn nodes(&self) -> &[SyntaxNode] {
        match self {
            NodeData::Text(_) => &[],
            NodeData::Children(children) => children,
        }
    }

    /// Check if the payload carries nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            NodeData::Text(text) => text.is_empty(),
            NodeData::Children(children) => children.is_empty(),
        }
    }
}

impl Default for NodeData {
    fn default() -> Self {
        NodeData::Children(Vec::new())
    }
}

/// Kind tag of a syntax element.
///
/// Serialized as the short tag used by Markdown AST producers
/// (`"h1"`, `"ul"`, `"a"`, ...). Unrecognized tags are preserved in
/// [`NodeKind::Unknown`] so the renderer can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Explicitly tagged plain text
    Text,
    /// Heading level 1-6
    Heading(u8),
    /// Thematic break
    Rule,
    /// Generic block (paragraph)
    Block,
    /// Unordered list
    UnorderedList,
    /// Ordered list
    OrderedList,
    /// List item
    ListItem,
    /// Hyperlink
    Link,
    /// Image or other media
    Media,
    /// Emphasis
    Emphasis,
    /// Strong emphasis
    Strong,
    /// Strikethrough
    Strikethrough,
    /// Underline
    Underline,
    /// Inline code span
    InlineCode,
    /// Block quote
    Quote,
    /// Caller-provided pass-through content
    Custom,
    /// Any other tag
    Unknown(String),
}

impl NodeKind {
    /// Create a heading kind, clamping the level to 1-6.
    pub fn heading(level: u8) -> Self {
        NodeKind::Heading(level.clamp(1, 6))
    }

    /// The tag string of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Text => "text",
            NodeKind::Heading(level) => HEADING_TAGS[usize::from((*level).clamp(1, 6)) - 1],
            NodeKind::Rule => "hr",
            NodeKind::Block => "div",
            NodeKind::UnorderedList => "ul",
            NodeKind::OrderedList => "ol",
            NodeKind::ListItem => "li",
            NodeKind::Link => "a",
            NodeKind::Media => "img",
            NodeKind::Emphasis => "em",
            NodeKind::Strong => "strong",
            NodeKind::Strikethrough => "del",
            NodeKind::Underline => "u",
            NodeKind::InlineCode => "code",
            NodeKind::Quote => "blockquote",
            NodeKind::Custom => "custom",
            NodeKind::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "text" => NodeKind::Text,
            "hr" => NodeKind::Rule,
            "div" => NodeKind::Block,
            "ul" => NodeKind::UnorderedList,
            "ol" => NodeKind::OrderedList,
            "li" => NodeKind::ListItem,
            "a" => NodeKind::Link,
            "img" => NodeKind::Media,
            "em" => NodeKind::Emphasis,
            "strong" => NodeKind::Strong,
            "del" => NodeKind::Strikethrough,
            "u" => NodeKind::Underline,
            "code" => NodeKind::InlineCode,
            "blockquote" => NodeKind::Quote,
            "custom" => NodeKind::Custom,
            other => match HEADING_TAGS.iter().position(|t| *t == other) {
                Some(index) => NodeKind::Heading(index as u8 + 1),
                None => NodeKind::Unknown(other.to_string()),
            },
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from(tag.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
