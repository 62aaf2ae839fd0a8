//! Format plugins: the parsing side of the bridge.
//!
//! A plugin owns the format-specific rules for one document format. The
//! bridge only cares about the yes/no outcome of each operation: `false`
//! means "this plugin cannot parse this file" and is an expected, recoverable
//! result (the caller tries the next plugin), never an error.

mod plain;

pub use plain::{PlainTextPlugin, parse_plain_text};

use std::path::Path;

use crate::model::{Book, BookModel};

/// Polymorphic interface for format-specific backends.
pub trait FormatPlugin: Send + Sync {
    /// Short format name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Cheap probe: whether this plugin can handle the file at `path`.
    /// Must not do a full parse.
    fn accepts_file(&self, path: &Path) -> bool;

    /// Extract metadata into `book`.
    ///
    /// On `false` the bridge discards `book` entirely, so implementations
    /// need not undo partial writes.
    fn read_meta_info(&self, path: &Path, book: &mut Book) -> bool;

    /// Parse the document body into `model`'s text stream.
    ///
    /// Implementations append paragraphs and may leave the model unflushed;
    /// the transfer encoder finalizes it. On `false` the bridge discards the
    /// model.
    fn read_model(&self, path: &Path, model: &mut BookModel) -> bool;
}
