//! Integration tests for the Markdown front end.

#![cfg(feature = "parser")]

use mdview::model::NodeKind;
use mdview::parser::{parse, ParseOptions};
use mdview::{render_markdown, MarkdownView, RenderOptions, Role, StyleTable, Style, SyntaxTree};

#[test]
fn test_parse_nested_structure() {
    let tree = parse(
        "> quote with\n> - a list\n> - [link](#anchor)\n",
        &ParseOptions::default(),
    );
    assert_eq!(tree.len(), 1);

    let quote = tree.nodes[0].as_element().unwrap();
    assert_eq!(quote.kind, NodeKind::Quote);
    let kinds: Vec<&NodeKind> = quote
        .children
        .nodes()
        .iter()
        .filter_map(|n| n.as_element().map(|e| &e.kind))
        .collect();
    assert_eq!(kinds, vec![&NodeKind::Block, &NodeKind::UnorderedList]);
    assert!(tree.depth() >= 4);
}

#[test]
fn test_parsed_tree_json_round_trip() {
    let tree = parse("# Title\n\n*a* and `b`", &ParseOptions::default());
    let json = tree.to_json().unwrap();
    assert!(json.contains("\"type\": \"h1\""));
    assert_eq!(SyntaxTree::from_json(&json).unwrap(), tree);
}

#[test]
fn test_strikethrough_toggle() {
    let with = parse("~~gone~~", &ParseOptions::default());
    let without = parse("~~gone~~", &ParseOptions::new().with_strikethrough(false));

    let first = |tree: &SyntaxTree| tree.nodes[0].children()[0].as_element().map(|e| e.kind.clone());
    assert_eq!(first(&with), Some(NodeKind::Strikethrough));
    assert_eq!(first(&without), None);
}

#[test]
fn test_render_inline_source() {
    let options = RenderOptions::new().with_parse_inline(true);
    let tree = render_markdown("Hello **bold** world", &options);

    assert_eq!(tree.len(), 3);
    assert!(tree.nodes.iter().all(|n| n.is_text()));
    assert_eq!(tree.nodes[1].styles(), &[Role::Text, Role::Strong]);
    assert_eq!(tree.plain_text(), "Hello bold world");
}

#[test]
fn test_markdown_view_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.md");
    std::fs::write(&path, "## Notes\n\n---\n").unwrap();

    let mut view = MarkdownView::default();
    let source = std::fs::read_to_string(&path).unwrap();
    assert!(view.set_source(&source));

    let tree = view.render();
    assert_eq!(tree.nodes[0].styles(), &[Role::Text, Role::H2]);
    assert_eq!(tree.nodes[1].key(), "hr_1");

    // Replacing the styles with an empty override keeps the defaults.
    assert!(!view.set_styles(StyleTable::new()));
    let overrides = StyleTable::new().with(Role::Hr, Style::new().with("height", 2));
    assert!(view.set_styles(overrides));
    assert_eq!(
        view.styles().get(Role::Hr).and_then(|s| s.get("height")),
        Some(&serde_json::json!(2))
    );
}
