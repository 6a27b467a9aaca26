use image::{imageops, RgbaImage};

use crate::assets::Glyph;
use crate::{Error, OverflowPolicy, PasteMode, Result};

/// Page canvas that glyphs are pasted onto
pub struct Canvas<'t> {
    image: RgbaImage,
    template: &'t Glyph,
    overflow: OverflowPolicy,
    mode: PasteMode,
}

impl<'t> Canvas<'t> {
    /// Start a fresh canvas as a copy of the background template
    pub fn from_template(template: &'t Glyph, overflow: OverflowPolicy, mode: PasteMode) -> Self {
        Self {
            image: template.image().clone(),
            template,
            overflow,
            mode,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Paste `glyph` with its top-left corner at `(x, y)`.
    ///
    /// Anything right of the canvas is always clipped; the overflow policy
    /// only governs the bottom edge.
    pub fn paste(&mut self, glyph: &Glyph, x: u32, y: u32) -> Result<()> {
        let bottom = u64::from(y) + u64::from(glyph.height());
        if bottom > u64::from(self.height()) {
            match self.overflow {
                OverflowPolicy::Clip => {}
                OverflowPolicy::Grow => {
                    let needed = u32::try_from(bottom).map_err(|_| {
                        Error::RenderFailure(format!("canvas cannot grow to {} rows", bottom))
                    })?;
                    self.grow_to(needed);
                }
                OverflowPolicy::Reject => {
                    return Err(Error::RenderFailure(format!(
                        "glyph at ({}, {}) with height {} extends past canvas height {}",
                        x,
                        y,
                        glyph.height(),
                        self.height()
                    )));
                }
            }
        }

        let (x, y) = (i64::from(x), i64::from(y));
        match self.mode {
            PasteMode::Replace => imageops::replace(&mut self.image, glyph.image(), x, y),
            PasteMode::AlphaBlend => imageops::overlay(&mut self.image, glyph.image(), x, y),
        }
        Ok(())
    }

    /// Extend the canvas downward with whole copies of the template until it
    /// is at least `min_height` rows tall.
    fn grow_to(&mut self, min_height: u32) {
        let width = self.width();
        let tile = self.template.height();
        let mut grown = if tile == 0 {
            RgbaImage::new(width, min_height)
        } else {
            let tiles = min_height.div_ceil(tile);
            let mut img = RgbaImage::new(width, tiles.saturating_mul(tile));
            for t in 0..tiles {
                imageops::replace(&mut img, self.template.image(), 0, i64::from(t) * i64::from(tile));
            }
            img
        };
        imageops::replace(&mut grown, &self.image, 0, 0);
        log::trace!("canvas grew from {} to {} rows", self.height(), grown.height());
        self.image = grown;
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [u8; 4] = [255, 255, 255, 255];
    const INK: [u8; 4] = [10, 20, 30, 255];

    fn sheet() -> Glyph {
        Glyph::solid(50, 40, WHITE)
    }

    #[test]
    fn paste_replaces_pixels() {
        let bg = sheet();
        let mut canvas = Canvas::from_template(&bg, OverflowPolicy::Clip, PasteMode::Replace);
        canvas.paste(&Glyph::solid(5, 5, [0, 0, 0, 0]), 10, 10).unwrap();
        let img = canvas.into_image();
        // replace keeps the glyph's transparent pixels
        assert_eq!(img.get_pixel(12, 12).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(9, 9).0, WHITE);
        // the template itself is untouched
        assert_eq!(bg.image().get_pixel(12, 12).0, WHITE);
    }

    #[test]
    fn alpha_blend_keeps_background_under_transparency() {
        let bg = sheet();
        let mut canvas = Canvas::from_template(&bg, OverflowPolicy::Clip, PasteMode::AlphaBlend);
        canvas.paste(&Glyph::solid(5, 5, [0, 0, 0, 0]), 10, 10).unwrap();
        canvas.paste(&Glyph::solid(5, 5, INK), 20, 10).unwrap();
        let img = canvas.into_image();
        assert_eq!(img.get_pixel(12, 12).0, WHITE);
        assert_eq!(img.get_pixel(22, 12).0, INK);
    }

    #[test]
    fn clip_drops_pixels_outside() {
        let bg = sheet();
        let mut canvas = Canvas::from_template(&bg, OverflowPolicy::Clip, PasteMode::Replace);
        canvas.paste(&Glyph::solid(10, 10, INK), 45, 35).unwrap();
        canvas.paste(&Glyph::solid(10, 10, INK), 0, 400).unwrap();
        let img = canvas.into_image();
        assert_eq!(img.dimensions(), (50, 40));
        assert_eq!(img.get_pixel(49, 39).0, INK);
    }

    #[test]
    fn grow_extends_with_template_tiles() {
        let bg = sheet();
        let mut canvas = Canvas::from_template(&bg, OverflowPolicy::Grow, PasteMode::Replace);
        canvas.paste(&Glyph::solid(10, 10, INK), 0, 75).unwrap();
        let img = canvas.into_image();
        assert_eq!(img.dimensions(), (50, 120));
        assert_eq!(img.get_pixel(5, 80).0, INK);
        assert_eq!(img.get_pixel(30, 100).0, WHITE);
    }

    #[test]
    fn reject_fails_below_the_bottom_edge() {
        let bg = sheet();
        let mut canvas = Canvas::from_template(&bg, OverflowPolicy::Reject, PasteMode::Replace);
        assert!(canvas.paste(&Glyph::solid(10, 10, INK), 0, 30).is_ok());
        let err = canvas.paste(&Glyph::solid(10, 10, INK), 0, 31).unwrap_err();
        assert!(matches!(err, Error::RenderFailure(_)));
        // horizontal overflow is clipped, not rejected
        assert!(canvas.paste(&Glyph::solid(10, 10, INK), 45, 0).is_ok());
    }
}
