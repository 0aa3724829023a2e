//! Parsing options and configuration.

use crate::render::DEFAULT_MAX_DEPTH;

/// Options for parsing Markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse in inline mode: paragraphs are flattened into their parent
    pub inline: bool,

    /// Recognize `~~strikethrough~~`
    pub strikethrough: bool,

    /// Elements nested deeper than this are spliced into their parent
    pub max_depth: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable inline mode.
    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    /// Enable inline mode.
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    /// Enable or disable strikethrough.
    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Set the element nesting limit (at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            inline: false,
            strikethrough: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
