//! Boundary entry points exposed to the host runtime.
//!
//! Every entry point follows the same shape: resolve the plugin handle
//! (failing fast with [`Error::InvalidHandle`](crate::Error::InvalidHandle)
//! for a dead token), invoke the plugin, and on success encode the result
//! into host records. A plugin that cannot parse the file is reported as a
//! plain `Ok(false)` or `Ok(None)`; the host record is left exactly as it
//! was, never partially filled.
//!
//! All calls are synchronous and self-contained: transfer buffers live for
//! the duration of one call, and nothing here retains a reference into a
//! model after the call returns.

mod registry;

pub use registry::{PluginHandle, PluginRegistry};

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::FormatPlugin;
use crate::model::BookModel;
use crate::storage::{DEFAULT_BLOCK_SIZE, MemoryStorage, PagedStorage, TextStorage};
use crate::transfer::{self, BookModelSnapshot, BookSnapshot, CoverImage};

/// Extension of model block files written under the cache directory.
const MODEL_BLOCK_EXTENSION: &str = "pmb";

/// The native side of the boundary: a plugin registry plus the storage
/// policy for the models those plugins build.
pub struct Bridge {
    registry: PluginRegistry,
    cache_dir: Option<PathBuf>,
    block_size: usize,
}

impl Bridge {
    /// A bridge that pages model text to block files under `cache_dir`.
    ///
    /// Each book gets its own subdirectory, named after the file stem; the
    /// transferred storage descriptor points there, and the directory is
    /// expected to outlive the call so the receiver can reopen it.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: PluginRegistry::new(),
            cache_dir: Some(cache_dir.into()),
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// A bridge that keeps model text in memory. For tests and hosts without
    /// a filesystem; the storage descriptor of transferred models is empty.
    pub fn in_memory() -> Self {
        Self {
            registry: PluginRegistry::new(),
            cache_dir: None,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Register a plugin, transferring ownership to the bridge. The returned
    /// handle is the only way the host refers to it from now on.
    pub fn register(&mut self, plugin: Box<dyn FormatPlugin>) -> PluginHandle {
        self.registry.register(plugin)
    }

    /// Dispose the plugin behind `handle`. Further calls with this handle
    /// fail with the invalid-handle fault.
    pub fn dispose(&mut self, handle: PluginHandle) -> Result<()> {
        self.registry.dispose(handle)
    }

    /// Probe whether the plugin can handle the file at `path`.
    pub fn accepts_file(&self, handle: PluginHandle, path: &Path) -> Result<bool> {
        let plugin = self.registry.resolve(handle)?;
        Ok(plugin.accepts_file(path))
    }

    /// Read book metadata into `record`.
    ///
    /// On `Ok(true)` the record holds the freshly encoded fields (empty
    /// strings transferred as absent). On `Ok(false)` the record is
    /// untouched.
    pub fn read_meta_info(
        &self,
        handle: PluginHandle,
        path: &Path,
        record: &mut BookSnapshot,
    ) -> Result<bool> {
        let plugin = self.registry.resolve(handle)?;
        let mut book = transfer::decode_book(record);
        if !plugin.read_meta_info(path, &mut book) {
            return Ok(false);
        }
        *record = transfer::encode_book(&book);
        Ok(true)
    }

    /// Parse the document body and attach its flattened text stream to
    /// `record`.
    ///
    /// On `Ok(true)`, `record.text` holds a self-contained snapshot; the
    /// native model is dropped before this returns. On `Ok(false)` nothing
    /// is attached.
    pub fn read_model(
        &self,
        handle: PluginHandle,
        path: &Path,
        record: &mut BookModelSnapshot,
    ) -> Result<bool> {
        let plugin = self.registry.resolve(handle)?;
        let book = transfer::decode_book(&record.book);
        let storage = self.model_storage(path)?;
        let mut model = BookModel::new(book, storage);
        if !plugin.read_model(path, &mut model) {
            return Ok(false);
        }
        record.text = Some(transfer::flatten(model.text_model_mut())?);
        Ok(true)
    }

    /// Extract the cover image.
    ///
    /// Cover extraction is not wired through the plugin interface yet: every
    /// call reports no cover. The handle is still validated, so lifecycle
    /// bugs surface the same way as on the other entry points.
    pub fn read_cover(&self, handle: PluginHandle, _path: &Path) -> Result<Option<CoverImage>> {
        self.registry.resolve(handle)?;
        Ok(None)
    }

    /// Extract the book annotation.
    ///
    /// Like [`read_cover`](Self::read_cover), a stub: always absent until
    /// the plugin interface grows annotation extraction.
    pub fn read_annotation(&self, handle: PluginHandle, _path: &Path) -> Result<Option<String>> {
        self.registry.resolve(handle)?;
        Ok(None)
    }

    fn model_storage(&self, path: &Path) -> Result<Box<dyn TextStorage>> {
        match &self.cache_dir {
            Some(dir) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "model".to_string());
                let storage = PagedStorage::create(
                    dir.join(stem),
                    MODEL_BLOCK_EXTENSION,
                    self.block_size,
                )?;
                Ok(Box::new(storage))
            }
            None => Ok(Box::new(MemoryStorage::new(self.block_size))),
        }
    }
}
