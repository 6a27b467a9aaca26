//! Rendering: glyph layout, canvas painting and PNG output

pub mod compositor;
pub mod layout;
pub mod paint;
pub mod raster;

use image::RgbaImage;

use crate::Result;

/// Where one glyph ended up on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub ch: char,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// The fallback glyph was used because `ch` had no asset
    pub fallback: bool,
}

/// One finished page: the canvas plus the glyph placements that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    image: RgbaImage,
    placements: Vec<Placement>,
}

impl RenderedPage {
    pub fn new(image: RgbaImage, placements: Vec<Placement>) -> Self {
        Self { image, placements }
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

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// SHA-256 over the dimensions and raw RGBA pixels, hex encoded
    pub fn digest(&self) -> String {
        raster::digest(&self.image)
    }

    pub fn encode_png(&self) -> Result<EncodedPage> {
        raster::encode_png(&self.image)
    }
}

/// A page encoded as PNG bytes, ready for display or download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl EncodedPage {
    /// `data:` URI suitable for inline display
    pub fn to_data_uri(&self) -> String {
        use base64::Engine as _;
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}
