//! Error types for mdview library.

use std::io;
use thiserror::Error;

/// Result type alias for mdview operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around a render pass.
///
/// The render pass itself never fails; these errors come from loading
/// inputs, serializing outputs and activating references.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The syntax tree input is not usable.
    #[error("Invalid syntax tree: {0}")]
    InvalidTree(String),

    /// The style table input is not usable.
    #[error("Invalid style table: {0}")]
    InvalidStyles(String),

    /// A URL pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A reference could not be opened.
    #[error("Cannot open reference '{href}': {reason}")]
    OpenReference {
        /// The reference that was activated
        href: String,
        /// Why the opener refused it
        reason: String,
    },

    /// Error during output serialization.
    #[error("Rendering error: {0}")]
    Render(String),
}
