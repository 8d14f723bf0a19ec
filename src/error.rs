use thiserror::Error;

/// Failures of the render surface.
///
/// `InvalidSize` at construction time is the initialization failure: the
/// host shows a notice and keeps running without a canvas.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface size {width}x{height} cannot be drawn to")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to rasterize stage: {0}")]
    Rasterize(String),
}

/// Failures while producing or handing off an export. Always recoverable.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("rasterization failed: {0}")]
    Raster(#[from] SurfaceError),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("file handoff failed: {0}")]
    Handoff(String),
}

/// Failures of a transliteration lookup. Never shown to the user; the text
/// editor treats them as "no suggestions".
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider answered with status {0}")]
    Status(String),

    #[error("unexpected response shape")]
    Malformed,
}

/// Errors returned from executing a [`crate::Command`]
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("no canvas is available")]
    NoCanvas,
}
