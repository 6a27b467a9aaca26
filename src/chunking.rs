//! Splitting long text into page-sized chunks and rendering each one.
//!
//! Chunk sizes count characters (Unicode scalar values), never bytes, so a
//! chunk boundary can not fall inside a multi-byte character. A chunk that
//! fails to render is reported in [`Conversion::failures`] and the remaining
//! chunks still render.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::assets::AssetStore;
use crate::rendering::compositor::render;
use crate::rendering::RenderedPage;
use crate::{Error, RenderConfig, Result};

/// A contiguous slice of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk<'a> {
    /// Position of this chunk in the sequence
    pub index: usize,
    /// Offset of the first character, counted in characters
    pub char_offset: usize,
    pub text: &'a str,
}

impl TextChunk<'_> {
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Checked chunk size; zero is a configuration error
pub(crate) fn chunk_size(chars_per_chunk: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(chars_per_chunk)
        .ok_or_else(|| Error::ConfigError("chars_per_chunk must be at least 1".into()))
}

/// Cut `text` into consecutive chunks of `chars_per_chunk` characters; the
/// last chunk holds whatever remains. Empty input gives no chunks.
pub fn split(text: &str, chars_per_chunk: NonZeroUsize) -> Vec<TextChunk<'_>> {
    let n = chars_per_chunk.get();
    let mut chunks = Vec::new();
    let mut rest = text;
    let mut char_offset = 0;

    while !rest.is_empty() {
        let end = rest
            .char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (head, tail) = rest.split_at(end);
        let chunk = TextChunk {
            index: chunks.len(),
            char_offset,
            text: head,
        };
        char_offset += chunk.char_len();
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The background template was not available
    AssetMissing,
    /// Resolving, decoding or pasting a glyph failed
    RenderFailure,
}

/// Why one chunk produced no page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFailure {
    pub index: usize,
    pub kind: FailureKind,
    pub message: String,
}

impl ChunkFailure {
    pub fn new(index: usize, err: &Error) -> Self {
        let kind = if err.is_asset_missing() {
            FailureKind::AssetMissing
        } else {
            FailureKind::RenderFailure
        };
        Self {
            index,
            kind,
            message: err.to_string(),
        }
    }
}

/// Result of rendering a whole text
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    /// Rendered pages in chunk order; failed chunks are absent
    pub pages: Vec<RenderedPage>,
    /// One entry per failed chunk, in chunk order
    pub failures: Vec<ChunkFailure>,
    /// Number of chunks the text was split into
    pub chunk_count: usize,
    /// Rendering stopped early because the cancel flag was raised
    pub cancelled: bool,
}

impl Conversion {
    pub fn succeeded(&self) -> usize {
        self.pages.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.failures.is_empty()
    }

    fn fail_all(&mut self, err: &Error) {
        warn!("no pages can be rendered: {}", err);
        let template = ChunkFailure::new(0, err);
        self.failures = (0..self.chunk_count)
            .map(|index| ChunkFailure {
                index,
                ..template.clone()
            })
            .collect();
    }
}

/// Split `text` into chunks of `chars_per_chunk` characters and render one
/// page per chunk.
///
/// Only an invalid chunk size or configuration is an error; everything that
/// goes wrong while rendering is reported per chunk in the returned
/// [`Conversion`].
pub fn text_to_images<S: AssetStore + ?Sized>(
    text: &str,
    chars_per_chunk: usize,
    store: &S,
    config: &RenderConfig,
) -> Result<Conversion> {
    text_to_images_with_cancel(text, chars_per_chunk, store, config, &AtomicBool::new(false))
}

/// Like [`text_to_images`], but checks `cancel` before each chunk and stops
/// early once it is set.
pub fn text_to_images_with_cancel<S: AssetStore + ?Sized>(
    text: &str,
    chars_per_chunk: usize,
    store: &S,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<Conversion> {
    let size = chunk_size(chars_per_chunk)?;
    config.metrics.validate()?;

    let chunks = split(text, size);
    let mut conversion = Conversion {
        chunk_count: chunks.len(),
        ..Default::default()
    };
    if chunks.is_empty() {
        return Ok(conversion);
    }

    let background = match store.background() {
        Ok(Some(bg)) => bg,
        Ok(None) => {
            conversion.fail_all(&Error::AssetMissing("background template not found".into()));
            return Ok(conversion);
        }
        Err(e) => {
            conversion.fail_all(&Error::RenderFailure(format!("background template: {}", e)));
            return Ok(conversion);
        }
    };

    for chunk in &chunks {
        if cancel.load(Ordering::Relaxed) {
            info!("cancelled after {} of {} chunks", chunk.index, chunks.len());
            conversion.cancelled = true;
            break;
        }
        debug!(
            "rendering chunk {}/{} ({} chars)",
            chunk.index + 1,
            chunks.len(),
            chunk.char_len()
        );
        match render(chunk.text, &background, store, config) {
            Ok(page) => conversion.pages.push(page),
            Err(e) => {
                warn!("chunk {} failed: {}", chunk.index, e);
                conversion.failures.push(ChunkFailure::new(chunk.index, &e));
            }
        }
    }

    Ok(conversion)
}
