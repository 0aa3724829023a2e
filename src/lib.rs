//! # mdview
//!
//! Markdown rendering into presentation trees for host view hierarchies.
//!
//! This library walks a parsed Markdown syntax tree and produces a tree of
//! text leaves and containers (generic, pressable, media) that a host UI
//! layer can composite directly.
//!
//! ## Quick Start
//!
//! ```
//! use mdview::{render_markdown, RenderOptions};
//!
//! let tree = render_markdown("# Hello\n\nSome *styled* text.", &RenderOptions::default());
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.nodes[1].kind_name(), "text");
//! ```
//!
//! ## Features
//!
//! - **Style cascade**: headings, emphasis and links accumulate style roles
//!   down to the text leaves
//! - **Inline collapsing**: blocks whose content is only text become a
//!   single text run instead of a boxed container
//! - **Overrides**: a [`RenderVisitor`] can replace or skip any kind
//! - **Robust input**: malformed and unknown nodes are dropped, never fatal
//! - **Parser front end**: `pulldown-cmark` based (feature `parser`)

pub mod error;
pub mod model;
#[cfg(feature = "parser")]
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Activation, Container, ContainerKind, MediaKind, MediaSource, NodeKind, PresentationNode,
    PresentationTree, ReferenceOpener, Role, Style, StyleTable, SyntaxNode, SyntaxTree, TextLeaf,
};
#[cfg(feature = "parser")]
pub use parser::ParseOptions;
pub use render::{
    is_text_only, JsonFormat, RenderContext, RenderOptions, RenderStats, RenderVisitor,
    VisitorAction,
};

/// Render a syntax tree, resolving styles from the options.
///
/// # Example
///
/// ```
/// use mdview::{render_tree, RenderOptions, SyntaxNode, SyntaxTree};
///
/// let tree = SyntaxTree::from_nodes(vec![SyntaxNode::block(vec!["Hello".into()])]);
/// let output = render_tree(&tree, &RenderOptions::default());
/// assert!(output.nodes[0].is_text());
/// ```
pub fn render_tree(tree: &SyntaxTree, options: &RenderOptions) -> PresentationTree {
    render::render(tree, &options.resolve_styles(), options)
}

/// Parse Markdown source and render it.
#[cfg(feature = "parser")]
pub fn render_markdown(source: &str, options: &RenderOptions) -> PresentationTree {
    let tree = parser::parse(source, &parse_options(options));
    render_tree(&tree, options)
}

/// Render a JSON syntax tree to a JSON presentation tree.
///
/// # Example
///
/// ```
/// use mdview::{render_json, JsonFormat, RenderOptions};
///
/// let json = render_json(r#"[{"type": "h1", "children": ["Hi"]}]"#, &RenderOptions::default(), JsonFormat::Compact)?;
/// assert!(json.contains("\"h1\""));
/// # Ok::<(), mdview::Error>(())
/// ```
pub fn render_json(json: &str, options: &RenderOptions, format: JsonFormat) -> Result<String> {
    let tree = SyntaxTree::from_json(json)?;
    render::to_json(&render_tree(&tree, options), format)
}

#[cfg(feature = "parser")]
fn parse_options(options: &RenderOptions) -> ParseOptions {
    ParseOptions::new()
        .with_inline(options.parse_inline)
        .with_max_depth(options.max_depth)
}

/// A Markdown view holding its current syntax tree and resolved styles.
///
/// The tree is replaced when the source changes and the style table is
/// re-resolved when the overrides change; every [`render`](Self::render)
/// recomputes the full presentation tree.
///
/// # Example
///
/// ```
/// use mdview::{MarkdownView, RenderOptions};
///
/// let mut view = MarkdownView::new(RenderOptions::default());
/// assert!(view.set_source("- one\n- two"));
/// assert!(!view.set_source("- one\n- two"));
/// let tree = view.render();
/// assert_eq!(tree.nodes[0].key(), "list_0");
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownView {
    options: RenderOptions,
    styles: StyleTable,
    tree: SyntaxTree,
    #[cfg(feature = "parser")]
    source: Option<String>,
}

impl MarkdownView {
    /// Create an empty view.
    pub fn new(options: RenderOptions) -> Self {
        let styles = options.resolve_styles();
        Self {
            options,
            styles,
            tree: SyntaxTree::new(),
            #[cfg(feature = "parser")]
            source: None,
        }
    }

    /// Create a view over an existing syntax tree.
    pub fn with_tree(options: RenderOptions, tree: SyntaxTree) -> Self {
        let mut view = Self::new(options);
        view.tree = tree;
        view
    }

    /// Replace the source text, reparsing only when it changed.
    ///
    /// Returns `true` when the view needs to re-render.
    #[cfg(feature = "parser")]
    pub fn set_source(&mut self, source: &str) -> bool {
        if self.source.as_deref() == Some(source) {
            return false;
        }
        self.tree = parser::parse(source, &parse_options(&self.options));
        self.source = Some(source.to_string());
        true
    }

    /// Switch between block and inline parsing, reparsing the current
    /// source when the flag changed.
    ///
    /// Returns `true` when the view needs to re-render.
    #[cfg(feature = "parser")]
    pub fn set_parse_inline(&mut self, inline: bool) -> bool {
        if self.options.parse_inline == inline {
            return false;
        }
        self.options.parse_inline = inline;
        match &self.source {
            Some(source) => {
                self.tree = parser::parse(source, &parse_options(&self.options));
                true
            }
            None => false,
        }
    }

    /// Replace the syntax tree wholesale.
    pub fn set_tree(&mut self, tree: SyntaxTree) {
        self.tree = tree;
        #[cfg(feature = "parser")]
        {
            self.source = None;
        }
    }

    /// Replace the style overrides, re-resolving only when they changed.
    ///
    /// Returns `true` when the view needs to re-render.
    pub fn set_styles(&mut self, overrides: StyleTable) -> bool {
        if self.options.markdown_styles == overrides {
            return false;
        }
        self.options.markdown_styles = overrides;
        self.styles = self.options.resolve_styles();
        true
    }

    /// Render the current tree.
    pub fn render(&self) -> PresentationTree {
        render::render(&self.tree, &self.styles, &self.options)
    }

    /// The current syntax tree.
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    /// The resolved style table.
    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    /// The render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Default for MarkdownView {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
