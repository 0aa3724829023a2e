//! Model types for the render pipeline.
//!
//! The syntax tree is the read-only input produced by a Markdown parser,
//! the presentation tree is the output handed to the host view layer, and
//! the style table maps semantic roles to host style values.

mod presentation;
mod style;
mod syntax;

pub use presentation::{
    Activation, Container, ContainerKind, MediaKind, MediaSource, PresentationNode,
    PresentationTree, ReferenceOpener, TextContent, TextLeaf, Walk,
};
pub use style::{Role, Style, StyleTable};
pub use syntax::{Element, NodeData, NodeKind, SyntaxNode, SyntaxTree};
