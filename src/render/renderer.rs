//! Recursive renderer turning syntax trees into presentation trees.

use std::iter;

use crate::model::{
    Activation, Container, Element, MediaKind, MediaSource, NodeData, NodeKind, PresentationNode,
    PresentationTree, Role, StyleTable, SyntaxNode, SyntaxTree, TextLeaf,
};

use super::classify::is_text_only;
use super::context::RenderContext;
use super::outline;
use super::visitor::{DefaultVisitor, RenderVisitor, VisitorAction};
use super::RenderOptions;

/// Render a syntax tree against a resolved style table.
///
/// The pass is deterministic and never fails: malformed or unsupported
/// nodes are dropped from the output.
pub fn render(tree: &SyntaxTree, styles: &StyleTable, options: &RenderOptions) -> PresentationTree {
    TreeRenderer::new(styles, options).render(tree)
}

/// Renderer for a single pass.
///
/// Holds only borrowed configuration; all per-branch state travels in
/// [`RenderContext`] values.
pub struct TreeRenderer<'a> {
    styles: &'a StyleTable,
    options: &'a RenderOptions,
    visitor: &'a dyn RenderVisitor,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer for one pass.
    pub fn new(styles: &'a StyleTable, options: &'a RenderOptions) -> Self {
        let visitor: &'a dyn RenderVisitor = match &options.visitor {
            Some(visitor) => visitor.as_ref(),
            None => &DefaultVisitor,
        };
        Self {
            styles,
            options,
            visitor,
        }
    }

    /// Render a whole tree.
    pub fn render(&self, tree: &SyntaxTree) -> PresentationTree {
        let nodes = self.render_nodes(&tree.nodes, None, &RenderContext::new(), 1);
        let tree = PresentationTree::new(nodes);

        if self.options.debug {
            log::debug!("==== LOGGING NODE TREE ===");
            outline::log_tree(&tree);
        }

        tree
    }

    /// Render a sequence of siblings under one context.
    pub fn render_nodes(
        &self,
        nodes: &[SyntaxNode],
        parent_key: Option<&str>,
        context: &RenderContext,
        depth: usize,
    ) -> Vec<PresentationNode> {
        nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let key = child_key(parent_key, index);
                self.render_node(node, &key, index, context, depth)
            })
            .collect()
    }

    /// Dispatch a single node to the renderer for its kind.
    pub fn render_node(
        &self,
        node: &SyntaxNode,
        key: &str,
        index: usize,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        if !node.is_renderable() {
            return None;
        }
        let max_depth = self.options.max_depth.max(1);
        if depth > max_depth {
            log::warn!("Dropping node {} nested deeper than {} levels", key, max_depth);
            return None;
        }

        let element = match node {
            SyntaxNode::Element(element) => element,
            SyntaxNode::Text(text) => return self.render_literal(text, key, context),
            SyntaxNode::Null => return None,
        };

        match &element.kind {
            NodeKind::Heading(level) => {
                self.render_text(element, key, &context.with_style(Role::heading(*level)), depth)
            }
            NodeKind::Text => self.render_text(element, key, context, depth),
            NodeKind::Rule => self.render_rule(key),
            NodeKind::Block => self.render_block(element, key, context, depth),
            NodeKind::Quote => self.render_block(element, key, &context.with_quote(true), depth),
            NodeKind::UnorderedList => self.render_list(element, key, false, context, depth),
            NodeKind::OrderedList => self.render_list(element, key, true, context, depth),
            NodeKind::ListItem => self.render_list_item(element, key, index, context, depth),
            NodeKind::Link => self.render_link(element, key, depth),
            NodeKind::Media => self.render_media(element, key),
            NodeKind::Emphasis => {
                self.render_text(element, key, &context.with_style(Role::Em), depth)
            }
            NodeKind::Strong => {
                self.render_text(element, key, &context.with_style(Role::Strong), depth)
            }
            NodeKind::Strikethrough => {
                self.render_text(element, key, &context.with_style(Role::Del), depth)
            }
            NodeKind::Underline => {
                self.render_text(element, key, &context.with_style(Role::U), depth)
            }
            NodeKind::InlineCode => self.render_code(element, key, context, depth),
            NodeKind::Custom => self.render_custom(element, key, context, depth),
            NodeKind::Unknown(tag) => {
                if self.options.debug {
                    log::debug!("Node type {} is not supported", tag);
                }
                None
            }
        }
    }

    fn render_literal(
        &self,
        text: &str,
        key: &str,
        context: &RenderContext,
    ) -> Option<PresentationNode> {
        let leaf = TextLeaf::literal(key, self.text_styles(Role::Text, context), text);
        self.finish_text(leaf)
    }

    fn render_text(
        &self,
        element: &Element,
        key: &str,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        let styles = self.text_styles(Role::Text, context);
        let leaf = match &element.children {
            NodeData::Text(text) => TextLeaf::literal(key, styles, text.as_str()),
            NodeData::Children(children) => TextLeaf::runs(
                key,
                styles,
                self.render_nodes(children, Some(key), context, depth + 1),
            ),
        };
        self.finish_text(leaf)
    }

    fn finish_text(&self, leaf: TextLeaf) -> Option<PresentationNode> {
        if let Some(result) = overridden(self.visitor.visit_text(&leaf)) {
            return result;
        }
        Some(leaf.into())
    }

    fn render_code(
        &self,
        element: &Element,
        key: &str,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        let styles = self.text_styles(Role::Code, context);
        let leaf = match &element.children {
            NodeData::Text(text) => TextLeaf::literal(key, styles, text.as_str()),
            NodeData::Children(children) => TextLeaf::runs(
                key,
                styles,
                self.render_nodes(children, Some(key), context, depth + 1),
            ),
        };
        Some(leaf.into())
    }

    fn render_rule(&self, key: &str) -> Option<PresentationNode> {
        if let Some(result) = overridden(self.visitor.visit_rule(key)) {
            return result;
        }
        let rule = Container::generic(format!("hr_{}", key), self.style_refs(&[Role::Hr]), Vec::new());
        Some(rule.into())
    }

    fn render_block(
        &self,
        element: &Element,
        key: &str,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        // The quote flag applies to this block only; descendants see it cleared.
        let is_quote = context.is_inside_quote();
        let cleared;
        let context = if is_quote {
            cleared = context.with_quote(false);
            &cleared
        } else {
            context
        };

        let children = self.render_nodes(element.children.nodes(), Some(key), context, depth + 1);
        let text_only = is_text_only(&children);

        if is_quote {
            if let Some(result) = overridden(self.visitor.visit_block_quote(&children, key)) {
                return result;
            }
            let body = if text_only {
                vec![TextLeaf::runs(format!("blockQuoteText_{}", key), Vec::new(), children).into()]
            } else {
                children
            };
            let quote = Container::generic(
                format!("blockQuote_{}", key),
                self.style_refs(&[Role::Block, Role::BlockQuote]),
                body,
            );
            return Some(quote.into());
        }

        if text_only {
            if let Some(result) = overridden(self.visitor.visit_plain_block_text(&children, key)) {
                return result;
            }
            let mut leaf =
                TextLeaf::runs(format!("block_{}", key), self.style_refs(&[Role::Block]), children);
            if self.options.render_inline {
                leaf = leaf.with_max_lines(1);
            }
            Some(leaf.into())
        } else {
            if let Some(result) = overridden(self.visitor.visit_block(&children, key)) {
                return result;
            }
            let block =
                Container::generic(format!("block_{}", key), self.style_refs(&[Role::Block]), children);
            Some(block.into())
        }
    }

    fn render_list(
        &self,
        element: &Element,
        key: &str,
        ordered: bool,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        let context = context.with_ordered(ordered);

        // Items are numbered by their position among rendered items so the
        // sequence stays contiguous around dropped siblings.
        let mut ordinal = 0;
        let mut items = Vec::new();
        for (index, child) in element.children.nodes().iter().enumerate() {
            let is_item = child
                .as_element()
                .is_some_and(|e| e.kind == NodeKind::ListItem);
            let item_key = child_key(Some(key), index);
            if let Some(node) = self.render_node(child, &item_key, ordinal, &context, depth + 1) {
                items.push(node);
                if is_item {
                    ordinal += 1;
                }
            }
        }

        if let Some(result) = overridden(self.visitor.visit_list(ordered, &items, key)) {
            return result;
        }
        let list = Container::generic(format!("list_{}", key), self.style_refs(&[Role::List]), items);
        Some(list.into())
    }

    fn render_list_item(
        &self,
        element: &Element,
        key: &str,
        index: usize,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        let ordered = context.is_ordered();
        let children = self.render_nodes(element.children.nodes(), Some(key), context, depth + 1);

        if let Some(result) =
            overridden(self.visitor.visit_list_item(ordered, index, &children, key))
        {
            return result;
        }

        let content_key = format!("listItemContent_{}", key);
        let body: PresentationNode = if is_text_only(&children) {
            let styles = self.style_refs(&[Role::ListItemContent, Role::ListItemTextContent]);
            TextLeaf::runs(content_key, styles, children).into()
        } else {
            Container::generic(content_key, self.style_refs(&[Role::ListItemContent]), children)
                .into()
        };

        let mut parts = Vec::with_capacity(2);
        parts.extend(self.render_list_bullet(ordered, index));
        parts.push(body);

        let item = Container::generic(format!("listItem_{}", key), self.style_refs(&[Role::ListItem]), parts);
        Some(item.into())
    }

    fn render_list_bullet(&self, ordered: bool, index: usize) -> Option<PresentationNode> {
        if let Some(result) = overridden(self.visitor.visit_list_bullet(ordered, index)) {
            return result;
        }

        let key = format!("listBullet_{}", index);
        let bullet = if ordered {
            TextLeaf::literal(key, self.style_refs(&[Role::ListItemNumber]), format!("{}.", index + 1))
        } else {
            TextLeaf::literal(
                key,
                self.style_refs(&[Role::ListItemBullet]),
                self.options.list_marker.to_string(),
            )
        };
        Some(bullet.into())
    }

    fn render_link(&self, element: &Element, key: &str, depth: usize) -> Option<PresentationNode> {
        // Links start their own cascade instead of inheriting the caller's.
        let context = RenderContext::extend(None, Role::Link);
        let children = self.render_nodes(element.children.nodes(), Some(key), &context, depth + 1);

        let href = element.href.as_deref().unwrap_or_default();
        let title = element.title.as_deref();
        if let Some(result) = overridden(self.visitor.visit_link(href, title, &children, key)) {
            return result;
        }

        let activation = Activation::open(href, element.title.clone());
        let wrapper_key = format!("linkWrapper_{}", key);
        let styles = self.style_refs(&[Role::LinkWrapper]);
        if is_text_only(&children) {
            Some(TextLeaf::runs(wrapper_key, styles, children).with_activation(activation).into())
        } else {
            Some(Container::pressable(wrapper_key, styles, activation, children).into())
        }
    }

    fn render_media(&self, element: &Element, key: &str) -> Option<PresentationNode> {
        let src = element.src.as_deref().unwrap_or_default();
        let alt = element.alt.as_deref();
        let title = element.title.as_deref();
        if let Some(result) = overridden(self.visitor.visit_media(src, alt, title, key)) {
            return result;
        }

        let source = MediaSource {
            src: src.to_string(),
            alt: element.alt.clone(),
            title: element.title.clone(),
            media: MediaKind::Image,
        };
        let media = Container::media(format!("image_{}", key), self.style_refs(&[Role::Image]), source);
        let wrapper = Container::generic(
            format!("imageWrapper_{}", key),
            self.style_refs(&[Role::ImageWrapper]),
            vec![media.into()],
        );
        Some(wrapper.into())
    }

    fn render_custom(
        &self,
        element: &Element,
        key: &str,
        context: &RenderContext,
        depth: usize,
    ) -> Option<PresentationNode> {
        let mut children =
            self.render_nodes(element.children.nodes(), Some(key), context, depth + 1);
        if children.len() == 1 {
            return children.pop();
        }
        if self.options.debug {
            log::debug!(
                "Custom node {} rendered {} children, expected exactly one",
                key,
                children.len()
            );
        }
        None
    }

    /// Roles that have a style in the resolved table, in order.
    fn style_refs(&self, roles: &[Role]) -> Vec<Role> {
        roles
            .iter()
            .copied()
            .filter(|role| self.styles.get(*role).is_some())
            .collect()
    }

    /// A base text role followed by the cascaded context styles.
    fn text_styles(&self, base: Role, context: &RenderContext) -> Vec<Role> {
        iter::once(base)
            .chain(context.styles().iter().copied())
            .filter(|role| self.styles.get(*role).is_some())
            .collect()
    }
}

/// Key of the child at `index`: `parent_index`, or the bare index at the root.
fn child_key(parent_key: Option<&str>, index: usize) -> String {
    match parent_key {
        Some(parent) if !parent.is_empty() => format!("{}_{}", parent, index),
        _ => index.to_string(),
    }
}

/// Map a visitor action to an early result, or `None` to run the default.
fn overridden(action: VisitorAction) -> Option<Option<PresentationNode>> {
    match action {
        VisitorAction::Continue => None,
        VisitorAction::Replace(node) => Some(Some(node)),
        VisitorAction::Skip => Some(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_default(nodes: Vec<SyntaxNode>) -> PresentationTree {
        let options = RenderOptions::default();
        render(&SyntaxTree::from_nodes(nodes), &options.resolve_styles(), &options)
    }

    #[test]
    fn test_child_key() {
        assert_eq!(child_key(None, 3), "3");
        assert_eq!(child_key(Some(""), 3), "3");
        assert_eq!(child_key(Some("0_1"), 2), "0_1_2");
    }

    #[test]
    fn test_heading_cascade() {
        let tree = render_default(vec![SyntaxNode::heading(
            2,
            vec![SyntaxNode::element(NodeKind::Strong, vec!["bold".into()])],
        )]);

        let heading = tree.nodes[0].as_text().unwrap();
        assert_eq!(heading.key, "0");
        assert_eq!(heading.styles, vec![Role::Text, Role::H2]);

        let strong = tree.nodes[0].children()[0].as_text().unwrap();
        assert_eq!(strong.key, "0_0");
        assert_eq!(strong.styles, vec![Role::Text, Role::H2, Role::Strong]);

        let literal = tree.nodes[0].children()[0].children()[0].as_text().unwrap();
        assert_eq!(literal.styles, vec![Role::Text, Role::H2, Role::Strong]);
    }

    #[test]
    fn test_sentinel_nodes_dropped() {
        let tree = render_default(vec![
            SyntaxNode::Null,
            "".into(),
            "null".into(),
            "undefined".into(),
            "kept".into(),
        ]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nodes[0].key(), "4");
    }

    #[test]
    fn test_rule() {
        let tree = render_default(vec![SyntaxNode::rule()]);
        let rule = tree.nodes[0].as_container().unwrap();
        assert_eq!(rule.key, "hr_0");
        assert_eq!(rule.styles, vec![Role::Hr]);
        assert!(rule.children.is_empty());
    }

    #[test]
    fn test_code_uses_code_role() {
        let tree = render_default(vec![SyntaxNode::element(
            NodeKind::Emphasis,
            vec![SyntaxNode::code("x + 1")],
        )]);
        let code = tree.nodes[0].children()[0].as_text().unwrap();
        assert_eq!(code.styles, vec![Role::Code, Role::Em]);
        assert_eq!(tree.plain_text(), "x + 1");
    }

    #[test]
    fn test_styles_without_table_entry_are_omitted() {
        let options = RenderOptions::new().with_default_styles(false);
        let tree = render(
            &SyntaxTree::from_nodes(vec![SyntaxNode::block(vec!["plain".into()])]),
            &options.resolve_styles(),
            &options,
        );
        assert!(tree.nodes[0].styles().is_empty());
        assert!(tree.nodes[0].children()[0].styles().is_empty());
    }

    #[test]
    fn test_custom_passes_single_child() {
        let tree = render_default(vec![
            SyntaxNode::element(NodeKind::Custom, vec![SyntaxNode::rule()]),
            SyntaxNode::element(NodeKind::Custom, vec!["a".into(), "b".into()]),
        ]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nodes[0].key(), "hr_0_0");
    }

    #[test]
    fn test_render_inline_limits_lines() {
        let options = RenderOptions::new().with_render_inline(true);
        let tree = render(
            &SyntaxTree::from_nodes(vec![SyntaxNode::block(vec!["long".into()])]),
            &options.resolve_styles(),
            &options,
        );
        assert_eq!(tree.nodes[0].as_text().unwrap().max_lines, Some(1));
    }

    #[test]
    fn test_depth_guard() {
        let mut node = SyntaxNode::text("deep");
        for _ in 0..10 {
            node = SyntaxNode::block(vec![node]);
        }
        let options = RenderOptions::new().with_max_depth(4);
        let tree = render(
            &SyntaxTree::from_nodes(vec![node, "sibling".into()]),
            &options.resolve_styles(),
            &options,
        );

        assert_eq!(tree.len(), 2);
        let max_depth = tree.walk().map(|(depth, _)| depth).max().unwrap();
        assert_eq!(max_depth, 3);
        assert_eq!(tree.plain_text(), "sibling");
    }

    #[test]
    fn test_zero_max_depth_acts_as_one() {
        let options = RenderOptions {
            max_depth: 0,
            ..RenderOptions::default()
        };
        let tree = render(
            &SyntaxTree::from_nodes(vec![SyntaxNode::block(vec!["nested".into()]), "top".into()]),
            &options.resolve_styles(),
            &options,
        );

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.nodes[0].key(), "block_0");
        assert!(tree.nodes[0].children().is_empty());
        assert_eq!(tree.plain_text(), "top");
    }
}
