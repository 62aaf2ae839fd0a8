//! Receiver-side record types.
//!
//! Everything here is a self-contained value: owned strings and owned
//! buffers, never a view into the native model. A snapshot stays valid after
//! the model that produced it is mutated or dropped.

use crate::model::Author;

/// Location of a stream's paged block storage.
///
/// The one piece of state that crosses the boundary by reference rather than
/// by value: the receiver reopens the named directory instead of receiving
/// the (possibly huge) text bytes inline.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct StorageDescriptor {
    pub directory_name: String,
    pub file_extension: String,
    pub block_count: i32,
}

/// Flattened form of one text stream.
///
/// The five arrays are co-indexed and all have `paragraph_count` elements;
/// position *i* across all five describes paragraph *i*. `kinds` holds raw
/// [`ParagraphKind`](crate::model::ParagraphKind) wire codes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TextModelSnapshot {
    /// Stream id within the book; absent for the body stream.
    pub id: Option<String>,
    /// Language tag; absent when the stream has none.
    pub language: Option<String>,
    pub paragraph_count: i32,
    pub start_entry_indices: Vec<i32>,
    pub start_entry_offsets: Vec<i32>,
    pub paragraph_lengths: Vec<i32>,
    pub text_sizes: Vec<i32>,
    pub kinds: Vec<u8>,
    pub storage: StorageDescriptor,
}

/// Series membership of a book.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct SeriesInfo {
    pub title: String,
    pub index: f32,
}

/// Flattened book metadata.
///
/// Optional fields use `None` for "absent"; a field whose native value was
/// the empty string is transferred as absent, by convention. The receiver
/// cannot distinguish "explicitly empty" from "not set" — a deliberate,
/// documented limit of the wire format.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BookSnapshot {
    pub title: Option<String>,
    pub language: Option<String>,
    pub encoding: Option<String>,
    pub series: Option<SeriesInfo>,
    pub authors: Vec<Author>,
    pub tags: Vec<String>,
}

/// Host record a `read_model` call attaches a flattened stream to.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct BookModelSnapshot {
    pub book: BookSnapshot,
    pub text: Option<TextModelSnapshot>,
}

/// A cover image extracted from a book file.
#[derive(Debug, Clone)]
pub struct CoverImage {
    pub data: Vec<u8>,
    pub media_type: String,
}
