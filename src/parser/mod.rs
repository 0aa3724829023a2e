//! Markdown parsing front end.
//!
//! Produces [`SyntaxTree`](crate::model::SyntaxTree) values from Markdown
//! source using `pulldown-cmark`.

mod markdown;
mod options;

pub use markdown::parse;
pub use options::ParseOptions;
