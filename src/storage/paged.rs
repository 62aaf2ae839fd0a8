use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::storage::TextStorage;

/// Default block size. Large enough that typical paragraphs fit with room to
/// spare, small enough that the receiver can page blocks in lazily.
pub const DEFAULT_BLOCK_SIZE: usize = 8192;

/// File-backed block storage.
///
/// Blocks are numbered files under one directory: `0.<ext>`, `1.<ext>`, and
/// so on. A block file is written once, when it is full (or on flush), and
/// never rewritten, so a receiver may start reading completed blocks while
/// the writer is still appending.
pub struct PagedStorage {
    dir: PathBuf,
    dir_name: String,
    extension: String,
    block_size: usize,
    /// Completed blocks already written to disk.
    blocks_written: u32,
    /// In-progress block, not yet on disk.
    current: Vec<u8>,
}

impl PagedStorage {
    /// Create storage in `dir`, creating the directory if needed.
    ///
    /// Existing block files in the directory are ignored and will be
    /// overwritten; use [`open`](Self::open) to continue from existing blocks.
    pub fn create(dir: impl AsRef<Path>, extension: &str, block_size: usize) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir_name: dir.to_string_lossy().into_owned(),
            dir,
            extension: extension.to_string(),
            block_size,
            blocks_written: 0,
            current: Vec::with_capacity(block_size),
        })
    }

    /// Open existing storage, counting the block files already present.
    ///
    /// This is the receiver-side entry: after a transfer, the snapshot's
    /// storage descriptor names the directory and extension to pass here.
    pub fn open(dir: impl AsRef<Path>, extension: &str, block_size: usize) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut blocks = 0u32;
        while dir.join(format!("{blocks}.{extension}")).is_file() {
            blocks += 1;
        }
        Ok(Self {
            dir_name: dir.to_string_lossy().into_owned(),
            dir,
            extension: extension.to_string(),
            block_size,
            blocks_written: blocks,
            current: Vec::with_capacity(block_size),
        })
    }

    /// Path of the block file with the given index.
    pub fn block_path(&self, index: u32) -> PathBuf {
        self.dir.join(format!("{index}.{}", self.extension))
    }

    /// Read a completed block back from disk.
    pub fn read_block(&self, index: u32) -> Result<Vec<u8>> {
        Ok(fs::read(self.block_path(index))?)
    }

    fn write_current(&mut self) -> Result<()> {
        if self.current.is_empty() {
            return Ok(());
        }
        let path = self.block_path(self.blocks_written);
        let mut file = fs::File::create(path)?;
        file.write_all(&self.current)?;
        self.blocks_written += 1;
        self.current.clear();
        Ok(())
    }
}

impl TextStorage for PagedStorage {
    fn append(&mut self, bytes: &[u8]) -> Result<(u32, u32)> {
        // A paragraph never spans blocks: if it does not fit what remains of
        // the current block, the current block is completed first. Paragraphs
        // larger than the block size get an oversized block of their own.
        if !self.current.is_empty() && self.current.len() + bytes.len() > self.block_size {
            self.write_current()?;
        }
        let position = (self.blocks_written, self.current.len() as u32);
        self.current.extend_from_slice(bytes);
        Ok(position)
    }

    fn flush(&mut self) -> Result<()> {
        self.write_current()
    }

    fn directory_name(&self) -> &str {
        &self.dir_name
    }

    fn file_extension(&self) -> &str {
        &self.extension
    }

    fn block_count(&self) -> u32 {
        if self.current.is_empty() {
            self.blocks_written
        } else {
            self.blocks_written + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_within_one_block() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = PagedStorage::create(dir.path(), "pmb", 64).unwrap();

        assert_eq!(storage.append(b"hello").unwrap(), (0, 0));
        assert_eq!(storage.append(b"world").unwrap(), (0, 5));
        assert_eq!(storage.block_count(), 1);

        storage.flush().unwrap();
        assert_eq!(storage.block_count(), 1);
        assert_eq!(storage.read_block(0).unwrap(), b"helloworld");
    }

    #[test]
    fn test_append_starts_new_block_when_full() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = PagedStorage::create(dir.path(), "pmb", 8).unwrap();

        assert_eq!(storage.append(b"aaaaaa").unwrap(), (0, 0));
        // 6 + 4 > 8: completes block 0, lands at the start of block 1
        assert_eq!(storage.append(b"bbbb").unwrap(), (1, 0));
        storage.flush().unwrap();

        assert_eq!(storage.block_count(), 2);
        assert_eq!(storage.read_block(0).unwrap(), b"aaaaaa");
        assert_eq!(storage.read_block(1).unwrap(), b"bbbb");
    }

    #[test]
    fn test_oversized_paragraph_gets_own_block() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = PagedStorage::create(dir.path(), "pmb", 8).unwrap();

        assert_eq!(storage.append(b"0123456789abcdef").unwrap(), (0, 0));
        storage.flush().unwrap();
        assert_eq!(storage.read_block(0).unwrap(), b"0123456789abcdef");
    }

    #[test]
    fn test_empty_append_reports_position_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = PagedStorage::create(dir.path(), "pmb", 64).unwrap();

        storage.append(b"abc").unwrap();
        assert_eq!(storage.append(b"").unwrap(), (0, 3));
        assert_eq!(storage.block_count(), 1);
    }

    #[test]
    fn test_flush_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = PagedStorage::create(dir.path(), "pmb", 64).unwrap();

        storage.append(b"abc").unwrap();
        storage.flush().unwrap();
        storage.flush().unwrap();

        assert_eq!(storage.block_count(), 1);
        assert!(!storage.block_path(1).exists());
    }

    #[test]
    fn test_open_counts_existing_blocks() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut storage = PagedStorage::create(dir.path(), "pmb", 8).unwrap();
            storage.append(b"aaaaaa").unwrap();
            storage.append(b"bbbb").unwrap();
            storage.flush().unwrap();
        }

        let reopened = PagedStorage::open(dir.path(), "pmb", 8).unwrap();
        assert_eq!(reopened.block_count(), 2);
        assert_eq!(reopened.read_block(1).unwrap(), b"bbbb");
    }
}
