//! # pont
//!
//! A bridge that exposes a native document-parsing engine's text model to a
//! host runtime that cannot share the engine's in-memory object graph.
//!
//! A parsed book's paragraph-indexed text structure (growable entry buffers,
//! per-paragraph metadata, a paged allocator for large text bodies) is
//! flattened into five primitive parallel arrays plus a handful of scalars
//! that a foreign runtime can reconstruct and index without understanding the
//! engine's object layout.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pont::{Bridge, BookModelSnapshot};
//! use pont::format::PlainTextPlugin;
//!
//! let mut bridge = Bridge::in_memory();
//! let handle = bridge.register(Box::new(PlainTextPlugin::new()));
//!
//! let path = std::path::Path::new("book.txt");
//! if bridge.accepts_file(handle, path).unwrap() {
//!     let mut record = BookModelSnapshot::default();
//!     if bridge.read_model(handle, path, &mut record).unwrap() {
//!         let text = record.text.unwrap();
//!         println!("{} paragraphs", text.paragraph_count);
//!     }
//! }
//! ```
//!
//! ## Transfer layout
//!
//! Paragraph data crosses the boundary as structure-of-arrays, not as a list
//! of paragraph records: `start_entry_indices`, `start_entry_offsets`,
//! `paragraph_lengths`, `text_sizes`, and `kinds` are five co-indexed arrays
//! of identical length. Position *i* across all five describes paragraph *i*.
//! Large text bodies stay in paged block storage on disk; the snapshot names
//! the directory, file extension, and block count so the receiver can reopen
//! the same blocks without a re-copy.

pub mod bridge;
pub mod format;
pub mod model;
pub mod storage;
pub mod transfer;

mod error;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use bridge::{Bridge, PluginHandle};
pub use error::{Error, Result};
pub use model::{Author, Book, BookModel, ParagraphKind, TextModel};
pub use transfer::{
    BookModelSnapshot, BookSnapshot, CoverImage, SeriesInfo, StorageDescriptor, TextModelSnapshot,
    flatten,
};
