//! Cursor movement and the per-character placement decision.
//!
//! Everything here is pure: no asset lookups and no pixels, so the fallback
//! policy can be tested without an asset store.

use crate::assets::Glyph;
use crate::LayoutMetrics;

const SPACE: char = ' ';

/// Current placement position on a page, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: u32,
    pub y: u32,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the start of the next line
    pub fn line_break(&mut self, metrics: &LayoutMetrics) {
        self.x = 0;
        self.y = self.y.saturating_add(metrics.line_height);
    }

    pub fn advance(&mut self, dx: u32) {
        self.x = self.x.saturating_add(dx);
    }

    /// Wrap after a glyph was placed: the cursor ran past the sheet, or less
    /// than `wrap_threshold` pixels remain. Returns whether it wrapped.
    pub fn wrap_after_glyph(&mut self, sheet_width: u32, metrics: &LayoutMetrics) -> bool {
        if self.x > sheet_width || sheet_width - self.x < metrics.wrap_threshold {
            self.line_break(metrics);
            return true;
        }
        false
    }

    /// Spaces only wrap once the cursor is actually past the sheet
    pub fn wrap_after_space(&mut self, sheet_width: u32, metrics: &LayoutMetrics) -> bool {
        if self.x > sheet_width {
            self.line_break(metrics);
            return true;
        }
        false
    }
}

pub fn is_line_break(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

/// Outcome of looking up a character's own glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphLookup<'g> {
    Found(&'g Glyph),
    NotFoundSpace,
    NotFoundOther,
}

impl<'g> GlyphLookup<'g> {
    pub fn classify(ch: char, found: Option<&'g Glyph>) -> Self {
        match found {
            Some(glyph) => GlyphLookup::Found(glyph),
            None if ch == SPACE => GlyphLookup::NotFoundSpace,
            None => GlyphLookup::NotFoundOther,
        }
    }
}

/// What the compositor should do for one (non line-break) character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'g> {
    /// Paste `glyph` at the cursor and advance by its width
    Place { glyph: &'g Glyph, fallback: bool },
    /// Move the cursor without painting
    Advance(u32),
    /// Nothing to draw and no movement
    Skip,
}

/// `fallback` is only consulted for [`GlyphLookup::NotFoundOther`].
pub fn decide<'g>(
    lookup: GlyphLookup<'g>,
    fallback: Option<&'g Glyph>,
    metrics: &LayoutMetrics,
) -> Step<'g> {
    match lookup {
        GlyphLookup::Found(glyph) => Step::Place { glyph, fallback: false },
        GlyphLookup::NotFoundSpace => Step::Advance(metrics.space_advance),
        GlyphLookup::NotFoundOther => match fallback {
            Some(glyph) => Step::Place { glyph, fallback: true },
            None => Step::Skip,
        },
    }
}
