//! Integration tests for the render pass.

use mdview::model::{ContainerKind, NodeKind, PresentationNode, TextContent};
use mdview::render::{render, is_text_only, RenderContext};
use mdview::{render_tree, RenderOptions, Role, SyntaxNode, SyntaxTree};

fn render_nodes(nodes: Vec<SyntaxNode>) -> mdview::PresentationTree {
    render_tree(&SyntaxTree::from_nodes(nodes), &RenderOptions::default())
}

fn literal(node: &PresentationNode) -> &str {
    match &node.as_text().expect("text leaf").content {
        TextContent::Literal(text) => text,
        TextContent::Runs(_) => panic!("Expected literal text in {}", node.key()),
    }
}

#[test]
fn test_paragraph_collapses_to_text() {
    let tree = render_nodes(vec![SyntaxNode::block(vec![
        "Hello ".into(),
        SyntaxNode::element(NodeKind::Strong, vec!["world".into()]),
    ])]);

    assert_eq!(tree.len(), 1);
    let block = tree.nodes[0].as_text().expect("paragraph should be a text leaf");
    assert_eq!(block.key, "block_0");
    assert_eq!(block.styles, vec![Role::Block]);
    assert!(block.max_lines.is_none());
    assert_eq!(tree.plain_text(), "Hello world");
}

#[test]
fn test_structured_block_is_container() {
    let tree = render_nodes(vec![SyntaxNode::block(vec![
        "Look: ".into(),
        SyntaxNode::media("cat.png", "A cat"),
    ])]);

    let block = tree.nodes[0].as_container().expect("block should be a container");
    assert_eq!(block.key, "block_0");
    assert_eq!(block.kind, ContainerKind::Generic);
    assert_eq!(block.children.len(), 2);
    assert_eq!(block.children[1].key(), "imageWrapper_0_1");
    assert_eq!(block.children[1].children()[0].kind_name(), "media");
}

#[test]
fn test_empty_block_is_empty_text() {
    let tree = render_nodes(vec![SyntaxNode::block(Vec::new())]);
    let block = tree.nodes[0].as_text().unwrap();
    assert_eq!(block.content, TextContent::Runs(Vec::new()));
}

#[test]
fn test_nested_quotes_and_sibling() {
    let tree = render_nodes(vec![
        SyntaxNode::quote(vec![
            SyntaxNode::block(vec!["outer".into()]),
            SyntaxNode::quote(vec![SyntaxNode::block(vec!["inner".into()])]),
        ]),
        SyntaxNode::block(vec!["after".into()]),
    ]);

    assert_eq!(tree.len(), 2);

    let outer = tree.nodes[0].as_container().unwrap();
    assert_eq!(outer.key, "blockQuote_0");
    assert_eq!(outer.styles, vec![Role::Block, Role::BlockQuote]);

    // A plain block directly inside the quote does not get quote styling.
    let outer_paragraph = &outer.children[0];
    assert_eq!(outer_paragraph.key(), "block_0_0");
    assert_eq!(outer_paragraph.styles(), &[Role::Block]);

    // The nested quote is styled again.
    let inner = outer.children[1].as_container().unwrap();
    assert_eq!(inner.key, "blockQuote_0_1");
    assert_eq!(inner.styles, vec![Role::Block, Role::BlockQuote]);
    assert_eq!(inner.children[0].styles(), &[Role::Block]);

    let after = &tree.nodes[1];
    assert_eq!(after.key(), "block_1");
    assert_eq!(after.styles(), &[Role::Block]);
    assert!(!after.styles().contains(&Role::BlockQuote));
}

#[test]
fn test_text_only_quote_wraps_text_run() {
    let tree = render_nodes(vec![SyntaxNode::quote(vec!["quoted".into()])]);
    let quote = tree.nodes[0].as_container().unwrap();
    assert_eq!(quote.children.len(), 1);
    assert!(quote.children[0].is_text());
    assert_eq!(quote.children[0].plain_text(), "quoted");
}

#[test]
fn test_ordered_list_numbering() {
    let tree = render_nodes(vec![SyntaxNode::list(
        true,
        vec![
            SyntaxNode::item(vec!["plain".into()]),
            SyntaxNode::item(vec![
                SyntaxNode::block(vec!["nested".into()]),
                SyntaxNode::list(false, vec![SyntaxNode::item(vec!["deep".into()])]),
            ]),
            SyntaxNode::Null,
            SyntaxNode::item(vec![SyntaxNode::media("x.png", "x")]),
        ],
    )]);

    let list = tree.nodes[0].as_container().unwrap();
    assert_eq!(list.key, "list_0");
    assert_eq!(list.styles, vec![Role::List]);
    assert_eq!(list.children.len(), 3);

    let bullets: Vec<&str> = list
        .children
        .iter()
        .map(|item| literal(&item.children()[0]))
        .collect();
    assert_eq!(bullets, vec!["1.", "2.", "3."]);

    // Text-only body collapses; structured bodies stay containers.
    let first_body = &list.children[0].children()[1];
    assert!(first_body.is_text());
    assert_eq!(first_body.key(), "listItemContent_0_0");
    assert_eq!(
        first_body.styles(),
        &[Role::ListItemContent, Role::ListItemTextContent]
    );
    assert!(!list.children[1].children()[1].is_text());
    assert_eq!(list.children[2].key(), "listItem_0_3");
}

#[test]
fn test_unordered_list_bullets() {
    let tree = render_nodes(vec![SyntaxNode::list(
        false,
        vec![
            SyntaxNode::item(vec!["a".into()]),
            SyntaxNode::item(vec!["b".into()]),
        ],
    )]);
    let list = tree.nodes[0].as_container().unwrap();
    for item in &list.children {
        let bullet = &item.children()[0];
        assert_eq!(literal(bullet), "•");
        assert_eq!(bullet.styles(), &[Role::ListItemBullet]);
    }
    assert_eq!(list.children[1].children()[0].key(), "listBullet_1");
}

#[test]
fn test_custom_list_marker() {
    let options = RenderOptions::new().with_list_marker('-');
    let tree = render_tree(
        &SyntaxTree::from_nodes(vec![SyntaxNode::list(
            false,
            vec![SyntaxNode::item(vec!["a".into()])],
        )]),
        &options,
    );
    let bullet = &tree.nodes[0].children()[0].children()[0];
    assert_eq!(literal(bullet), "-");
}

#[test]
fn test_unknown_kind_dropped() {
    let unknown = SyntaxNode::element(NodeKind::from("foobar"), vec!["ignored".into()]);
    let tree = render_nodes(vec![
        SyntaxNode::block(vec!["before".into()]),
        unknown,
        SyntaxNode::block(vec!["after".into()]),
    ]);

    let keys: Vec<&str> = tree.nodes.iter().map(|n| n.key()).collect();
    assert_eq!(keys, vec!["block_0", "block_2"]);
    assert_eq!(tree.plain_text(), "beforeafter");
}

#[test]
fn test_unknown_kind_with_debug() {
    let options = RenderOptions::new().with_debug(true);
    let tree = render_tree(
        &SyntaxTree::from_nodes(vec![
            SyntaxNode::element(NodeKind::from("foobar"), Vec::new()),
            "text".into(),
        ]),
        &options,
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_text_only_link_collapses() {
    let mut link = SyntaxNode::link("https://example.com", vec!["site".into()]);
    if let SyntaxNode::Element(element) = &mut link {
        element.title = Some("Example".to_string());
    }
    let tree = render_nodes(vec![SyntaxNode::block(vec![link])]);

    let leaf = tree.nodes[0].children()[0].as_text().expect("link should collapse");
    assert_eq!(leaf.key, "linkWrapper_0_0");
    assert_eq!(leaf.styles, vec![Role::LinkWrapper]);
    let activation = leaf.activation.as_ref().unwrap();
    assert_eq!(activation.href, "https://example.com");
    assert_eq!(activation.title.as_deref(), Some("Example"));

    let label = &tree.nodes[0].children()[0].children()[0];
    assert_eq!(label.styles(), &[Role::Text, Role::Link]);
}

#[test]
fn test_structured_link_is_pressable() {
    let tree = render_nodes(vec![SyntaxNode::link(
        "https://example.com",
        vec![SyntaxNode::media("banner.png", "Banner")],
    )]);

    let container = tree.nodes[0].as_container().expect("link should be a container");
    assert!(matches!(container.kind, ContainerKind::Pressable(_)));
    assert_eq!(tree.nodes[0].activation().unwrap().href, "https://example.com");
}

#[test]
fn test_link_starts_fresh_cascade() {
    let tree = render_nodes(vec![SyntaxNode::element(
        NodeKind::Strong,
        vec![SyntaxNode::link("#a", vec!["x".into()])],
    )]);
    let label = &tree.nodes[0].children()[0].children()[0];
    assert_eq!(label.styles(), &[Role::Text, Role::Link]);
}

#[test]
fn test_render_is_deterministic() {
    let tree = SyntaxTree::from_nodes(vec![
        SyntaxNode::heading(1, vec!["Title".into()]),
        SyntaxNode::quote(vec![SyntaxNode::block(vec!["q".into()])]),
        SyntaxNode::list(true, vec![SyntaxNode::item(vec!["a".into()])]),
        SyntaxNode::link("#x", vec![SyntaxNode::media("a.png", "a")]),
        SyntaxNode::rule(),
    ]);
    let options = RenderOptions::default();
    let styles = options.resolve_styles();

    let first = render(&tree, &styles, &options);
    let second = render(&tree, &styles, &options);
    assert_eq!(first, second);
}

#[test]
fn test_cascade_properties() {
    assert!(is_text_only(&[]));

    let base = RenderContext::new().with_style(Role::H1);
    let extended = RenderContext::extend(
        Some(&RenderContext::extend(Some(&base), Role::Em)),
        Role::Strong,
    );
    assert_eq!(base.styles(), &[Role::H1]);
    assert_eq!(extended.styles(), &[Role::H1, Role::Em, Role::Strong]);
}

#[test]
fn test_render_from_json_tree() {
    let json = r#"[
        {"type": "h2", "children": ["Notes"]},
        {"type": "ul", "children": [
            {"type": "li", "children": ["first"]},
            {"type": "li", "children": ["undefined", "second"]}
        ]},
        "null",
        {"type": "foobar", "children": ["x"]}
    ]"#;
    let tree = SyntaxTree::from_json(json).unwrap();
    let output = render_tree(&tree, &RenderOptions::default());

    assert_eq!(output.len(), 2);
    assert_eq!(output.nodes[0].styles(), &[Role::Text, Role::H2]);
    assert_eq!(output.find("listItem_1_1").unwrap().plain_text(), "•second");
}

#[test]
fn test_deep_quotes_are_truncated() {
    let mut node = SyntaxNode::block(vec!["innermost".into()]);
    for _ in 0..256 {
        node = SyntaxNode::quote(vec![node]);
    }
    let tree = SyntaxTree::from_nodes(vec![node, SyntaxNode::block(vec!["after".into()])]);
    let output = render_tree(&tree, &RenderOptions::default());

    assert_eq!(output.len(), 2);
    assert_eq!(output.nodes[1].key(), "block_1");
    assert_eq!(output.plain_text(), "after");

    let quotes = output
        .walk()
        .filter(|(_, node)| node.key().starts_with("blockQuote_"))
        .count();
    assert_eq!(quotes, mdview::render::DEFAULT_MAX_DEPTH);
}

#[test]
fn test_load_tree_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.json");
    std::fs::write(&path, r#"[{"type": "hr"}]"#).unwrap();

    let tree = SyntaxTree::from_path(&path).unwrap();
    assert_eq!(render_tree(&tree, &RenderOptions::default()).nodes[0].key(), "hr_0");

    assert!(SyntaxTree::from_path(dir.path().join("missing.json")).is_err());
}

#[cfg(feature = "parser")]
#[test]
fn test_render_markdown_document() {
    let source = "# Title\n\n1. one\n2. **two**\n3. three\n\n> quoted\n\n[link](https://example.com)";
    let tree = mdview::render_markdown(source, &RenderOptions::default());

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.nodes[0].styles(), &[Role::Text, Role::H1]);

    let bullets: Vec<String> = tree.nodes[1]
        .children()
        .iter()
        .map(|item| item.children()[0].plain_text())
        .collect();
    assert_eq!(bullets, vec!["1.", "2.", "3."]);

    assert_eq!(tree.nodes[2].key(), "blockQuote_2");
    assert!(tree.nodes[3].is_text());
    assert_eq!(
        tree.nodes[3].children()[0].activation().unwrap().href,
        "https://example.com"
    );
}
