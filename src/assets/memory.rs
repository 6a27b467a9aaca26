use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use super::{AssetKey, AssetStore, DirectoryAssetStore, Glyph};
use crate::Result;

/// In-memory asset store, used by tests and for eagerly loaded directories
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: HashMap<AssetKey, Glyph>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Eagerly load every recognised file from an asset directory
    /// using the default file naming (`bg.png`, `default.png`, `<code>.png`).
    pub fn from_dir<P: AsRef<Path>>(path: P) -> Result<Self> {
        DirectoryAssetStore::new(path.as_ref()).load_all()
    }

    pub fn insert(&mut self, key: AssetKey, glyph: Glyph) -> Option<Glyph> {
        self.assets.insert(key, glyph)
    }

    pub fn with_background(mut self, glyph: Glyph) -> Self {
        self.insert(AssetKey::Background, glyph);
        self
    }

    pub fn with_fallback(mut self, glyph: Glyph) -> Self {
        self.insert(AssetKey::Fallback, glyph);
        self
    }

    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.insert(AssetKey::for_char(ch), glyph);
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn contains(&self, key: AssetKey) -> bool {
        self.assets.contains_key(&key)
    }
}

impl AssetStore for MemoryAssetStore {
    fn lookup(&self, key: AssetKey) -> Result<Option<Cow<'_, Glyph>>> {
        Ok(self.assets.get(&key).map(Cow::Borrowed))
    }
}
