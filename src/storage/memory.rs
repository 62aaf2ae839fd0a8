use crate::error::Result;
use crate::storage::TextStorage;

/// In-memory block storage.
///
/// Same block layout as [`PagedStorage`](crate::storage::PagedStorage), but
/// blocks live in a `Vec` instead of on disk. Used for tests and for hosts
/// (such as WASM) without a filesystem; the storage descriptor carries an
/// empty directory name, so a separate process cannot reopen it.
pub struct MemoryStorage {
    block_size: usize,
    blocks: Vec<Vec<u8>>,
    current: Vec<u8>,
}

impl MemoryStorage {
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            blocks: Vec::new(),
            current: Vec::with_capacity(block_size),
        }
    }

    /// Completed blocks, in order.
    pub fn blocks(&self) -> &[Vec<u8>] {
        &self.blocks
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(crate::storage::DEFAULT_BLOCK_SIZE)
    }
}

impl TextStorage for MemoryStorage {
    fn append(&mut self, bytes: &[u8]) -> Result<(u32, u32)> {
        if !self.current.is_empty() && self.current.len() + bytes.len() > self.block_size {
            let full = std::mem::replace(&mut self.current, Vec::with_capacity(self.block_size));
            self.blocks.push(full);
        }
        let position = (self.blocks.len() as u32, self.current.len() as u32);
        self.current.extend_from_slice(bytes);
        Ok(position)
    }

    fn flush(&mut self) -> Result<()> {
        if !self.current.is_empty() {
            let full = std::mem::replace(&mut self.current, Vec::new());
            self.blocks.push(full);
        }
        Ok(())
    }

    fn directory_name(&self) -> &str {
        ""
    }

    fn file_extension(&self) -> &str {
        ""
    }

    fn block_count(&self) -> u32 {
        if self.current.is_empty() {
            self.blocks.len() as u32
        } else {
            self.blocks.len() as u32 + 1
        }
    }
}
