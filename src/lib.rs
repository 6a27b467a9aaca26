//! Handscript
//!
//! Renders text as handwriting-style images by pasting one pre-rendered glyph
//! bitmap per character onto a copy of a background sheet.
//!
//! # Overview
//!
//! - **Glyph compositor** ([`rendering::compositor::render`]): fixed-advance
//!   glyph placement with line wrapping and a fallback glyph for characters
//!   that have no asset of their own
//! - **Chunk splitter** ([`chunking`]): cuts long text into fixed-size chunks
//!   and renders one page per chunk; a failing chunk never aborts the others
//! - **Asset stores** ([`assets`]): in-memory or directory-backed sources of
//!   glyph bitmaps
//!
//! # Example
//!
//! ```no_run
//! use handscript::{DirectoryAssetStore, RenderConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DirectoryAssetStore::new("font");
//! let config = RenderConfig::default();
//!
//! let conversion = handscript::text_to_images("Dear diary,\nToday...", 500, &store, &config)?;
//! println!("{} pages, {} failed", conversion.succeeded(), conversion.failed());
//! handscript::rendering::raster::write_pages("out", &conversion.pages)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod assets;
pub mod chunking;
pub mod rendering;

pub use assets::{AssetKey, AssetStore, DirectoryAssetStore, Glyph, MemoryAssetStore};
pub use chunking::{
    split, text_to_images, text_to_images_with_cancel, ChunkFailure, Conversion, FailureKind,
    TextChunk,
};
pub use rendering::compositor::render;
pub use rendering::{EncodedPage, Placement, RenderedPage};

/// Fixed layout distances, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    /// Vertical distance between consecutive lines
    pub line_height: u32,
    /// Minimum horizontal room that must remain after a glyph, otherwise the
    /// cursor wraps to the next line
    pub wrap_threshold: u32,
    /// Advance used for a space when the asset set has no space glyph
    pub space_advance: u32,
}

impl LayoutMetrics {
    pub fn validate(&self) -> Result<()> {
        if self.line_height == 0 {
            return Err(Error::ConfigError("line_height must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            line_height: 140,
            wrap_threshold: 115,
            space_advance: 20,
        }
    }
}

/// What happens when a glyph would be pasted below the bottom of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Pixels outside the canvas are dropped
    #[default]
    Clip,
    /// The canvas grows downward by whole background tiles
    Grow,
    /// The chunk fails with [`Error::RenderFailure`]
    Reject,
}

/// How glyph pixels are combined with the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasteMode {
    /// Glyph pixels (alpha included) overwrite the canvas
    #[default]
    Replace,
    /// Glyph pixels are alpha-blended over the canvas
    AlphaBlend,
}

/// Configuration for rendering text to pages
///
/// The defaults reproduce the classic asset set: 140px lines, a 115px wrap
/// threshold, 20px spaces and 500 characters per page.
///
/// # Examples
///
/// ```
/// let cfg = handscript::RenderConfig::default();
/// assert_eq!(cfg.metrics.line_height, 140);
/// assert_eq!(cfg.chars_per_chunk, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Layout distances
    pub metrics: LayoutMetrics,
    /// Behaviour for pastes below the canvas
    pub overflow: OverflowPolicy,
    /// Pixel combination mode
    pub paste: PasteMode,
    /// Maximum number of characters rendered onto one page
    pub chars_per_chunk: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            overflow: OverflowPolicy::default(),
            paste: PasteMode::default(),
            chars_per_chunk: 500,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| Error::ConfigError(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        chunking::chunk_size(self.chars_per_chunk)?;
        self.metrics.validate()
    }
}

/// Render `text` using the chunk size from `config`
pub fn convert<S: AssetStore + ?Sized>(
    text: &str,
    store: &S,
    config: &RenderConfig,
) -> Result<Conversion> {
    text_to_images(text, config.chars_per_chunk, store, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.metrics.line_height, 140);
        assert_eq!(config.metrics.wrap_threshold, 115);
        assert_eq!(config.metrics.space_advance, 20);
        assert_eq!(config.overflow, OverflowPolicy::Clip);
        assert_eq!(config.paste, PasteMode::Replace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RenderConfig::from_json(
            r#"{ "overflow": "grow", "metrics": { "line_height": 90 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.overflow, OverflowPolicy::Grow);
        assert_eq!(cfg.metrics.line_height, 90);
        assert_eq!(cfg.metrics.wrap_threshold, 115);
        assert_eq!(cfg.chars_per_chunk, 500);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = RenderConfig::from_json(r#"{ "chars_per_chunk": 0 }"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        let err = RenderConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = RenderConfig {
            paste: PasteMode::AlphaBlend,
            overflow: OverflowPolicy::Reject,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("alpha_blend"));
        assert_eq!(RenderConfig::from_json(&json).unwrap(), cfg);
    }
}
