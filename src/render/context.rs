//! Per-branch rendering context.

use crate::model::Role;

/// Immutable value threaded through the recursion.
///
/// Carries the styles accumulated for descendant text plus transient
/// flags. Every derivation returns a new value; the parent's context is
/// never changed, so siblings can keep rendering under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    styles: Vec<Role>,
    ordered: bool,
    inside_quote: bool,
}

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend an optional context with one more style.
    ///
    /// With no context this starts a fresh cascade of `[style]`.
    pub fn extend(context: Option<&RenderContext>, style: Role) -> RenderContext {
        match context {
            Some(context) => context.with_style(style),
            None => RenderContext {
                styles: vec![style],
                ..RenderContext::default()
            },
        }
    }

    /// Derive a context with `style` appended; flags are kept.
    pub fn with_style(&self, style: Role) -> RenderContext {
        let mut styles = Vec::with_capacity(self.styles.len() + 1);
        styles.extend_from_slice(&self.styles);
        styles.push(style);
        RenderContext {
            styles,
            ..self.clone()
        }
    }

    /// Derive a context with the list ordering flag set.
    pub fn with_ordered(&self, ordered: bool) -> RenderContext {
        RenderContext {
            ordered,
            ..self.clone()
        }
    }

    /// Derive a context with the one-shot quote flag set or cleared.
    pub fn with_quote(&self, inside_quote: bool) -> RenderContext {
        RenderContext {
            inside_quote,
            ..self.clone()
        }
    }

    /// Accumulated styles, outermost first.
    pub fn styles(&self) -> &[Role] {
        &self.styles
    }

    /// Whether the enclosing list is ordered.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Whether the next block renderer is a quote entry point.
    pub fn is_inside_quote(&self) -> bool {
        self.inside_quote
    }
}
