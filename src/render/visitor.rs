//! Visitor pattern for overriding per-kind rendering.
//!
//! A visitor gets one call per renderable kind and decides whether the
//! default renderer runs, is replaced by the visitor's own node, or is
//! skipped altogether.
//!
//! # Example
//!
//! ```
//! use mdview::model::{Container, PresentationNode, Role};
//! use mdview::render::visitor::{RenderVisitor, VisitorAction};
//!
//! struct BoxedLinks;
//!
//! impl RenderVisitor for BoxedLinks {
//!     fn visit_link(
//!         &self,
//!         _href: &str,
//!         _title: Option<&str>,
//!         children: &[PresentationNode],
//!         key: &str,
//!     ) -> VisitorAction {
//!         let node = Container::generic(key, vec![Role::Link], children.to_vec());
//!         VisitorAction::Replace(node.into())
//!     }
//! }
//! ```

use std::sync::Arc;

use regex::Regex;

use crate::error::Result;
use crate::model::{Container, MediaKind, MediaSource, PresentationNode, Role, TextLeaf};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with the visitor's node.
    Replace(PresentationNode),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&PresentationNode> {
        match self {
            VisitorAction::Replace(node) => Some(node),
            _ => None,
        }
    }
}

/// Trait for overriding how individual node kinds render.
///
/// Every method returns `VisitorAction::Continue` by default, which runs
/// the built-in renderer. Children handed to a method are already
/// rendered.
pub trait RenderVisitor: Send + Sync {
    /// Called for a media node.
    fn visit_media(
        &self,
        src: &str,
        alt: Option<&str>,
        title: Option<&str>,
        key: &str,
    ) -> VisitorAction {
        let _ = (src, alt, title, key);
        VisitorAction::Continue
    }

    /// Called for a link with its rendered children.
    fn visit_link(
        &self,
        href: &str,
        title: Option<&str>,
        children: &[PresentationNode],
        key: &str,
    ) -> VisitorAction {
        let _ = (href, title, children, key);
        VisitorAction::Continue
    }

    /// Called for a list with its rendered items.
    fn visit_list(&self, ordered: bool, items: &[PresentationNode], key: &str) -> VisitorAction {
        let _ = (ordered, items, key);
        VisitorAction::Continue
    }

    /// Called for a list item with its rendered body.
    ///
    /// `index` is the zero-based position among the list's items.
    fn visit_list_item(
        &self,
        ordered: bool,
        index: usize,
        children: &[PresentationNode],
        key: &str,
    ) -> VisitorAction {
        let _ = (ordered, index, children, key);
        VisitorAction::Continue
    }

    /// Called for the bullet or number in front of a list item.
    fn visit_list_bullet(&self, ordered: bool, index: usize) -> VisitorAction {
        let _ = (ordered, index);
        VisitorAction::Continue
    }

    /// Called for a block whose children include structure.
    fn visit_block(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        let _ = (children, key);
        VisitorAction::Continue
    }

    /// Called for a block quote.
    fn visit_block_quote(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        let _ = (children, key);
        VisitorAction::Continue
    }

    /// Called for a block whose children are all text.
    fn visit_plain_block_text(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        let _ = (children, key);
        VisitorAction::Continue
    }

    /// Called with the default text leaf for text, heading and emphasis
    /// nodes.
    fn visit_text(&self, leaf: &TextLeaf) -> VisitorAction {
        let _ = leaf;
        VisitorAction::Continue
    }

    /// Called for a thematic break.
    fn visit_rule(&self, key: &str) -> VisitorAction {
        let _ = key;
        VisitorAction::Continue
    }
}

/// Default visitor that performs no customization.
///
/// All visit methods return `VisitorAction::Continue`.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl RenderVisitor for DefaultVisitor {}

/// Visitor that drops all media.
#[derive(Debug, Clone, Default)]
pub struct SkipMediaVisitor;

impl RenderVisitor for SkipMediaVisitor {
    fn visit_media(
        &self,
        _src: &str,
        _alt: Option<&str>,
        _title: Option<&str>,
        _key: &str,
    ) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that turns media pointing at video hosts into video embeds.
#[derive(Debug, Clone)]
pub struct VideoEmbedVisitor {
    pattern: Regex,
}

impl VideoEmbedVisitor {
    /// URLs of common video hosts.
    pub const DEFAULT_PATTERN: &'static str =
        r"^https?://(?:www\.|m\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/|vimeo\.com/)[\w-]+";

    /// Create a visitor matching the default video hosts.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(Self::DEFAULT_PATTERN).expect("default pattern is valid"),
        }
    }

    /// Create a visitor matching a custom URL pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Check if a source should become a video embed.
    pub fn matches(&self, src: &str) -> bool {
        self.pattern.is_match(src)
    }
}

impl Default for VideoEmbedVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderVisitor for VideoEmbedVisitor {
    fn visit_media(
        &self,
        src: &str,
        alt: Option<&str>,
        title: Option<&str>,
        key: &str,
    ) -> VisitorAction {
        if !self.matches(src) {
            return VisitorAction::Continue;
        }

        let source = MediaSource {
            src: src.to_string(),
            alt: alt.map(str::to_string),
            title: title.map(str::to_string),
            media: MediaKind::Video,
        };
        let node = Container::media(format!("video_{}", key), vec![Role::Image], source);
        VisitorAction::Replace(node.into())
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
#[derive(Clone, Default)]
pub struct CompositeVisitor {
    visitors: Vec<Arc<dyn RenderVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: RenderVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Arc::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    fn first_action(&self, visit: impl Fn(&dyn RenderVisitor) -> VisitorAction) -> VisitorAction {
        for visitor in &self.visitors {
            let action = visit(visitor.as_ref());
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl std::fmt::Debug for CompositeVisitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeVisitor")
            .field("visitors", &self.visitors.len())
            .finish()
    }
}

impl RenderVisitor for CompositeVisitor {
    fn visit_media(
        &self,
        src: &str,
        alt: Option<&str>,
        title: Option<&str>,
        key: &str,
    ) -> VisitorAction {
        self.first_action(|v| v.visit_media(src, alt, title, key))
    }

    fn visit_link(
        &self,
        href: &str,
        title: Option<&str>,
        children: &[PresentationNode],
        key: &str,
    ) -> VisitorAction {
        self.first_action(|v| v.visit_link(href, title, children, key))
    }

    fn visit_list(&self, ordered: bool, items: &[PresentationNode], key: &str) -> VisitorAction {
        self.first_action(|v| v.visit_list(ordered, items, key))
    }

    fn visit_list_item(
        &self,
        ordered: bool,
        index: usize,
        children: &[PresentationNode],
        key: &str,
    ) -> VisitorAction {
        self.first_action(|v| v.visit_list_item(ordered, index, children, key))
    }

    fn visit_list_bullet(&self, ordered: bool, index: usize) -> VisitorAction {
        self.first_action(|v| v.visit_list_bullet(ordered, index))
    }

    fn visit_block(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        self.first_action(|v| v.visit_block(children, key))
    }

    fn visit_block_quote(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        self.first_action(|v| v.visit_block_quote(children, key))
    }

    fn visit_plain_block_text(&self, children: &[PresentationNode], key: &str) -> VisitorAction {
        self.first_action(|v| v.visit_plain_block_text(children, key))
    }

    fn visit_text(&self, leaf: &TextLeaf) -> VisitorAction {
        self.first_action(|v| v.visit_text(leaf))
    }

    fn visit_rule(&self, key: &str) -> VisitorAction {
        self.first_action(|v| v.visit_rule(key))
    }
}
