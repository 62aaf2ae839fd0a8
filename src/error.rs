//! Error types for bridge operations.

use thiserror::Error;

/// Errors that can occur while transferring a model across the boundary.
///
/// Only lifecycle and environment problems surface here. A plugin that cannot
/// parse a file is not an error: boundary calls report that as a plain
/// `Ok(false)` and the caller is free to try another plugin.
#[derive(Error, Debug)]
pub enum Error {
    /// The handle does not name a live plugin: it was never issued, or the
    /// plugin behind it has been disposed. Indicates a caller bug, never
    /// converted into a plain `false` result.
    #[error("invalid plugin handle: {0:#x}")]
    InvalidHandle(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
