//! Filesystem-backed asset store.
//!
//! Layout of an asset directory:
//! - `bg.png`: the background sheet
//! - `default.png`: the fallback glyph
//! - `<code point>.png`: one glyph per character, e.g. `65.png` for `A`
//!
//! Files are read and decoded on every lookup, so the store holds no pixel
//! data. Use [`DirectoryAssetStore::load_all`] to decode everything up front.

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use super::{AssetKey, AssetStore, Glyph, MemoryAssetStore};
use crate::Result;

#[derive(Debug, Clone)]
pub struct DirectoryAssetStore {
    root: PathBuf,
    background_file: String,
    fallback_file: String,
    extension: String,
}

impl DirectoryAssetStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            background_file: "bg.png".to_string(),
            fallback_file: "default.png".to_string(),
            extension: "png".to_string(),
        }
    }

    pub fn with_background_file(mut self, name: impl Into<String>) -> Self {
        self.background_file = name.into();
        self
    }

    pub fn with_fallback_file(mut self, name: impl Into<String>) -> Self {
        self.fallback_file = name.into();
        self
    }

    /// Extension used for per-code-point glyph files (without the dot)
    pub fn with_extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = ext.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an asset would be read from
    pub fn path_for(&self, key: AssetKey) -> PathBuf {
        match key {
            AssetKey::Background => self.root.join(&self.background_file),
            AssetKey::Fallback => self.root.join(&self.fallback_file),
            AssetKey::CodePoint(cp) => self.root.join(format!("{}.{}", cp, self.extension)),
        }
    }

    /// Map a file name in the directory back to the asset it holds
    pub fn key_for_file_name(&self, name: &str) -> Option<AssetKey> {
        if name == self.background_file {
            return Some(AssetKey::Background);
        }
        if name == self.fallback_file {
            return Some(AssetKey::Fallback);
        }
        let (stem, ext) = name.rsplit_once('.')?;
        if ext != self.extension {
            return None;
        }
        stem.parse::<u32>().ok().map(AssetKey::CodePoint)
    }

    /// Decode every recognised file into a [`MemoryAssetStore`].
    /// Unrecognised files are ignored.
    pub fn load_all(&self) -> Result<MemoryAssetStore> {
        let mut store = MemoryAssetStore::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(key) = name.to_str().and_then(|n| self.key_for_file_name(n)) else {
                debug!("skipping unrecognised asset file {:?}", entry.path());
                continue;
            };
            let bytes = fs::read(entry.path())?;
            store.insert(key, Glyph::decode(&bytes)?);
        }
        debug!("loaded {} assets from {}", store.len(), self.root.display());
        Ok(store)
    }

    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl AssetStore for DirectoryAssetStore {
    fn lookup(&self, key: AssetKey) -> Result<Option<Cow<'_, Glyph>>> {
        let path = self.path_for(key);
        match self.read(&path)? {
            Some(bytes) => Ok(Some(Cow::Owned(Glyph::decode(&bytes)?))),
            None => Ok(None),
        }
    }
}
