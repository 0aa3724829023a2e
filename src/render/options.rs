//! Rendering options and configuration.

use std::fmt;
use std::sync::Arc;

use super::visitor::RenderVisitor;
use crate::model::StyleTable;

/// Default bound on syntax tree nesting.
///
/// Each level costs a few recursive render frames; 128 levels fit a 2 MiB
/// thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for a render pass.
#[derive(Clone)]
pub struct RenderOptions {
    /// Report unsupported nodes and log the finished tree
    pub debug: bool,

    /// Start from the built-in style table
    pub use_default_styles: bool,

    /// Style overrides, replacing defaults per role
    pub markdown_styles: StyleTable,

    /// Parse the source in inline mode (no paragraphs)
    pub parse_inline: bool,

    /// Limit collapsed text blocks to a single ellipsized line
    pub render_inline: bool,

    /// Glyph used for unordered list bullets
    pub list_marker: char,

    /// Nodes nested deeper than this are dropped (values below 1 act as 1)
    pub max_depth: usize,

    /// Per-kind rendering overrides
    pub visitor: Option<Arc<dyn RenderVisitor>>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable the built-in style table.
    pub fn with_default_styles(mut self, use_defaults: bool) -> Self {
        self.use_default_styles = use_defaults;
        self
    }

    /// Set style overrides.
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.markdown_styles = styles;
        self
    }

    /// Enable or disable inline parsing.
    pub fn with_parse_inline(mut self, inline: bool) -> Self {
        self.parse_inline = inline;
        self
    }

    /// Enable or disable single-line text blocks.
    pub fn with_render_inline(mut self, inline: bool) -> Self {
        self.render_inline = inline;
        self
    }

    /// Set the unordered list bullet glyph.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the nesting limit (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Set the override visitor.
    pub fn with_visitor<V: RenderVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Arc::new(visitor));
        self
    }

    /// Resolve the style table for a render pass.
    pub fn resolve_styles(&self) -> StyleTable {
        StyleTable::resolve_with_defaults(self.use_default_styles, &self.markdown_styles)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            debug: false,
            use_default_styles: true,
            markdown_styles: StyleTable::new(),
            parse_inline: false,
            render_inline: false,
            list_marker: '•',
            max_depth: DEFAULT_MAX_DEPTH,
            visitor: None,
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("debug", &self.debug)
            .field("use_default_styles", &self.use_default_styles)
            .field("markdown_styles", &self.markdown_styles)
            .field("parse_inline", &self.parse_inline)
            .field("render_inline", &self.render_inline)
            .field("list_marker", &self.list_marker)
            .field("max_depth", &self.max_depth)
            .field("visitor", &self.visitor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, Style};
    use crate::render::visitor::SkipMediaVisitor;

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(!options.debug);
        assert!(options.use_default_styles);
        assert!(options.markdown_styles.is_empty());
        assert!(!options.parse_inline);
        assert!(options.visitor.is_none());
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_debug(true)
            .with_render_inline(true)
            .with_list_marker('-')
            .with_max_depth(0)
            .with_visitor(SkipMediaVisitor);

        assert!(options.debug);
        assert!(options.render_inline);
        assert_eq!(options.list_marker, '-');
        assert_eq!(options.max_depth, 1);
        assert!(options.visitor.is_some());
    }

    #[test]
    fn test_resolve_styles() {
        let overrides = StyleTable::new().with(Role::Text, Style::new().with("color", "#111"));

        let resolved = RenderOptions::new().with_styles(overrides.clone()).resolve_styles();
        assert_eq!(resolved.get(Role::Text), overrides.get(Role::Text));
        assert!(resolved.get(Role::H1).is_some());

        let bare = RenderOptions::new()
            .with_default_styles(false)
            .with_styles(overrides.clone())
            .resolve_styles();
        assert_eq!(bare, overrides);
    }
}
