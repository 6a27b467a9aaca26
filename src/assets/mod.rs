//! Glyph assets and the stores that provide them
//!
//! The compositor never touches the filesystem itself: it asks an
//! [`AssetStore`] for the background template, the fallback glyph and one
//! glyph per code point. A store answers `Ok(None)` when an asset simply does
//! not exist and `Err(..)` when it exists but could not be read or decoded.

use std::borrow::Cow;
use std::fmt;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::Result;

pub mod directory;
pub mod memory;

pub use directory::DirectoryAssetStore;
pub use memory::MemoryAssetStore;

/// An immutable RGBA bitmap for one rendered character (or the background sheet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    image: RgbaImage,
}

impl Glyph {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Decode any supported raster format into a glyph
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from(img))
    }

    /// A glyph filled with a single colour; handy for synthetic asset sets.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::new(RgbaImage::from_pixel(width, height, Rgba(rgba)))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl From<DynamicImage> for Glyph {
    fn from(img: DynamicImage) -> Self {
        Self::new(img.to_rgba8())
    }
}

impl From<RgbaImage> for Glyph {
    fn from(image: RgbaImage) -> Self {
        Self::new(image)
    }
}

/// Identifies an asset inside a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// The background sheet every page is cloned from
    Background,
    /// Substitute glyph for characters without a dedicated asset
    Fallback,
    /// Glyph for a single Unicode code point
    CodePoint(u32),
}

impl AssetKey {
    pub fn for_char(ch: char) -> Self {
        AssetKey::CodePoint(ch as u32)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Background => f.write_str("background"),
            AssetKey::Fallback => f.write_str("default"),
            AssetKey::CodePoint(cp) => write!(f, "{}", cp),
        }
    }
}

/// Read-only source of glyph bitmaps.
///
/// Stores that keep decoded glyphs around hand out borrowed values; stores
/// that decode on demand return owned ones.
pub trait AssetStore {
    /// Look up an asset. `Ok(None)` means not found.
    fn lookup(&self, key: AssetKey) -> Result<Option<Cow<'_, Glyph>>>;

    fn background(&self) -> Result<Option<Cow<'_, Glyph>>> {
        self.lookup(AssetKey::Background)
    }

    fn fallback(&self) -> Result<Option<Cow<'_, Glyph>>> {
        self.lookup(AssetKey::Fallback)
    }
}

impl<T: AssetStore + ?Sized> AssetStore for &T {
    fn lookup(&self, key: AssetKey) -> Result<Option<Cow<'_, Glyph>>> {
        (**self).lookup(key)
    }
}

impl<T: AssetStore + ?Sized> AssetStore for Box<T> {
    fn lookup(&self, key: AssetKey) -> Result<Option<Cow<'_, Glyph>>> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_keys_display_like_file_stems() {
        assert_eq!(AssetKey::Background.to_string(), "background");
        assert_eq!(AssetKey::Fallback.to_string(), "default");
        assert_eq!(AssetKey::for_char('A').to_string(), "65");
        assert_eq!(AssetKey::for_char('é'), AssetKey::CodePoint(233));
    }

    #[test]
    fn solid_glyph_has_requested_size() {
        let g = Glyph::solid(12, 7, [1, 2, 3, 255]);
        assert_eq!(g.width(), 12);
        assert_eq!(g.height(), 7);
        assert_eq!(g.image().get_pixel(11, 6).0, [1, 2, 3, 255]);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(Glyph::decode(b"definitely not a png").is_err());
    }
}
