//! Rendering module turning syntax trees into presentation trees.

mod classify;
mod context;
mod json;
mod options;
mod outline;
mod renderer;
mod result;
pub mod visitor;

pub use classify::is_text_only;
pub use context::RenderContext;
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_MAX_DEPTH};
pub use outline::outline;
pub use renderer::{render, TreeRenderer};
pub use result::RenderStats;
pub use visitor::{
    CompositeVisitor, DefaultVisitor, RenderVisitor, SkipMediaVisitor, VideoEmbedVisitor,
    VisitorAction,
};
