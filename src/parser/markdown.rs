//! Event-to-tree conversion on top of `pulldown-cmark`.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag};

use super::ParseOptions;
use crate::model::{Element, NodeData, NodeKind, SyntaxNode, SyntaxTree};

/// Parse Markdown source into a syntax tree.
///
/// The source is terminated with a blank line before parsing so the last
/// block is always closed.
pub fn parse(source: &str, options: &ParseOptions) -> SyntaxTree {
    let block_source = format!("{}\n\n", source);

    let mut cmark_options = Options::empty();
    if options.strikethrough {
        cmark_options.insert(Options::ENABLE_STRIKETHROUGH);
    }

    let mut builder = TreeBuilder::new(options.inline, options.max_depth);
    for event in Parser::new_ext(&block_source, cmark_options) {
        builder.push(event);
    }
    builder.finish()
}

/// An open tag; `element` is `None` for tags whose content is spliced into
/// the parent.
struct Frame {
    element: Option<Element>,
    children: Vec<SyntaxNode>,
}

struct TreeBuilder {
    inline: bool,
    max_depth: usize,
    /// Open frames that carry an element.
    depth: usize,
    root: Vec<SyntaxNode>,
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new(inline: bool, max_depth: usize) -> Self {
        Self {
            inline,
            max_depth: max_depth.max(1),
            depth: 0,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(),
            Event::Text(text) => self.append(SyntaxNode::text(text.into_string())),
            Event::Code(code) => self.append(SyntaxNode::code(code.into_string())),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.append(SyntaxNode::text(html.into_string()))
            }
            Event::SoftBreak => self.append(SyntaxNode::text(" ")),
            Event::HardBreak => self.append(SyntaxNode::text("\n")),
            Event::Rule => self.append(SyntaxNode::rule()),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let element = match tag {
            Tag::Paragraph if self.inline => None,
            Tag::Paragraph => Some(Element::new(NodeKind::Block)),
            Tag::Heading { level, .. } => Some(Element::new(NodeKind::heading(heading_level(level)))),
            Tag::BlockQuote(_) => Some(Element::new(NodeKind::Quote)),
            Tag::CodeBlock(_) => Some(Element::new(NodeKind::InlineCode)),
            Tag::List(Some(_)) => Some(Element::new(NodeKind::OrderedList)),
            Tag::List(None) => Some(Element::new(NodeKind::UnorderedList)),
            Tag::Item => Some(Element::new(NodeKind::ListItem)),
            Tag::Emphasis => Some(Element::new(NodeKind::Emphasis)),
            Tag::Strong => Some(Element::new(NodeKind::Strong)),
            Tag::Strikethrough => Some(Element::new(NodeKind::Strikethrough)),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut element = Element::new(NodeKind::Link);
                element.href = Some(dest_url.into_string());
                element.title = non_empty(title);
                Some(element)
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let mut element = Element::new(NodeKind::Media);
                element.src = Some(dest_url.into_string());
                element.title = non_empty(title);
                Some(element)
            }
            _ => None,
        };

        // Past the nesting limit, content is spliced into the deepest element.
        let element = element.filter(|_| self.depth < self.max_depth);
        if element.is_some() {
            self.depth += 1;
        }
        self.stack.push(Frame {
            element,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        let Some(mut element) = frame.element else {
            for child in frame.children {
                self.append(child);
            }
            return;
        };
        self.depth -= 1;

        match element.kind {
            NodeKind::Media => {
                let alt: String = frame.children.iter().map(SyntaxNode::plain_text).collect();
                element.alt = non_empty(CowStr::from(alt));
            }
            NodeKind::InlineCode => {
                let code: String = frame.children.iter().map(SyntaxNode::plain_text).collect();
                element.children = NodeData::Text(code);
            }
            _ => element.children = NodeData::Children(frame.children),
        }
        self.append(SyntaxNode::Element(element));
    }

    fn append(&mut self, node: SyntaxNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => self.root.push(node),
        }
    }

    fn finish(mut self) -> SyntaxTree {
        // Unbalanced input: close whatever is still open.
        while !self.stack.is_empty() {
            self.close();
        }
        SyntaxTree::from_nodes(self.root)
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn non_empty(text: CowStr<'_>) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.into_string())
    }
}
