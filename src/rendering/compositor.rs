//! Glyph compositor: lays one chunk of text out onto a copy of the background.

use std::borrow::Cow;

use log::trace;

use super::layout::{decide, is_line_break, Cursor, GlyphLookup, Step};
use super::paint::Canvas;
use super::{Placement, RenderedPage};
use crate::assets::{AssetKey, AssetStore, Glyph};
use crate::{Error, RenderConfig, Result};

/// Render `chunk` onto a fresh copy of `background`.
///
/// Line feeds and carriage returns start a new line. Characters without a
/// glyph use the store's fallback glyph, or are skipped if there is none;
/// spaces without a glyph advance by `space_advance`. Any lookup error other
/// than "not found", or a paste rejected by the overflow policy, fails the
/// whole chunk.
pub fn render<S: AssetStore + ?Sized>(
    chunk: &str,
    background: &Glyph,
    store: &S,
    config: &RenderConfig,
) -> Result<RenderedPage> {
    let metrics = &config.metrics;
    let sheet_width = background.width();
    let mut canvas = Canvas::from_template(background, config.overflow, config.paste);
    let mut cursor = Cursor::new();
    let mut placements = Vec::new();
    // resolved on first use, at most once per chunk
    let mut fallback: Option<Option<Cow<'_, Glyph>>> = None;

    for ch in chunk.chars() {
        if is_line_break(ch) {
            cursor.line_break(metrics);
            continue;
        }

        let own = store
            .lookup(AssetKey::for_char(ch))
            .map_err(|e| Error::RenderFailure(format!("glyph for {:?}: {}", ch, e)))?;
        let lookup = GlyphLookup::classify(ch, own.as_deref());

        if lookup == GlyphLookup::NotFoundOther && fallback.is_none() {
            let resolved = store
                .fallback()
                .map_err(|e| Error::RenderFailure(format!("fallback glyph: {}", e)))?;
            fallback = Some(resolved);
        }
        let fallback_glyph = fallback.as_ref().and_then(|f| f.as_deref());

        match decide(lookup, fallback_glyph, metrics) {
            Step::Place {
                glyph,
                fallback: used_fallback,
            } => {
                if used_fallback {
                    trace!("no glyph for {:?}, using fallback", ch);
                }
                canvas.paste(glyph, cursor.x, cursor.y)?;
                placements.push(Placement {
                    ch,
                    x: cursor.x,
                    y: cursor.y,
                    width: glyph.width(),
                    height: glyph.height(),
                    fallback: used_fallback,
                });
                cursor.advance(glyph.width());
                cursor.wrap_after_glyph(sheet_width, metrics);
            }
            Step::Advance(dx) => {
                cursor.advance(dx);
                cursor.wrap_after_space(sheet_width, metrics);
            }
            Step::Skip => trace!("no glyph and no fallback for {:?}, skipped", ch),
        }
    }

    Ok(RenderedPage::new(canvas.into_image(), placements))
}
