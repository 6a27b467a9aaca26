//! Error types for the handwriting renderer

use thiserror::Error;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading assets, rendering or exporting
#[derive(Error, Debug)]
pub enum Error {
    /// A required asset (the background template) is not available
    #[error("Asset missing: {0}")]
    AssetMissing(String),

    /// Unexpected failure while resolving or pasting a glyph
    #[error("Rendering failed: {0}")]
    RenderFailure(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to encode a rendered page
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    /// I/O error while reading assets or writing pages
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An asset could not be decoded as an image
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
}

impl Error {
    /// Whether this error means the background template was absent
    pub fn is_asset_missing(&self) -> bool {
        matches!(self, Error::AssetMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn asset_missing_is_detected() {
        assert!(Error::AssetMissing("background".into()).is_asset_missing());
        assert!(!Error::RenderFailure("x".into()).is_asset_missing());
    }
}
