//! Error types for grafica operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering a plot.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid plot configuration (missing dimensions, data, or aesthetics).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No viable scale could be constructed for a required dimension.
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// A programmatic brush extent had an invalid shape or mixed bounds.
    #[error("Invalid brush extent: {0}")]
    BrushExtent(String),

    /// Rendering error reported by the render pipeline.
    #[error("Rendering error: {0}")]
    Rendering(String),
}
