//! PNG encoding, pixel digests and page export

use std::fs;
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use log::debug;
use sha2::{Digest, Sha256};

use crate::rendering::{EncodedPage, RenderedPage};
use crate::{Error, Result};

/// Encode an RGBA canvas as PNG. Identical pixels always give identical bytes.
pub fn encode_png(image: &RgbaImage) -> Result<EncodedPage> {
    let (width, height) = image.dimensions();
    let mut png_data = Vec::new();
    PngEncoder::new(&mut png_data)
        .write_image(image.as_raw(), width, height, ColorType::Rgba8)
        .map_err(|e| Error::EncodeError(e.to_string()))?;
    Ok(EncodedPage {
        width,
        height,
        png_data,
    })
}

pub fn digest(image: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_be_bytes());
    hasher.update(image.height().to_be_bytes());
    hasher.update(image.as_raw());
    hex::encode(hasher.finalize())
}

/// File name for the page at `index` (0-based); parts are numbered from 1.
pub fn page_file_name(index: usize) -> String {
    format!("handwriting_output_part_{}.png", index + 1)
}

/// Write every page into `dir` as PNG, creating the directory if needed.
pub fn write_pages<P: AsRef<Path>>(dir: P, pages: &[RenderedPage]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(pages.len());
    for (i, page) in pages.iter().enumerate() {
        let path = dir.join(page_file_name(i));
        let encoded = page.encode_png()?;
        fs::write(&path, &encoded.png_data)?;
        debug!("wrote {} ({}x{})", path.display(), encoded.width, encoded.height);
        written.push(path);
    }
    Ok(written)
}
