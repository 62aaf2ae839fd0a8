//! Flattening of native models into receiver-side snapshots.

use crate::error::Result;
use crate::model::{Book, TextModel};
use crate::transfer::{BookSnapshot, SeriesInfo, StorageDescriptor, TextModelSnapshot};

/// The empty string is the native model's "not set" sentinel; on the wire it
/// becomes an explicit absent marker.
fn absent_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Flatten a text model into a self-contained snapshot.
///
/// The model is flushed first, unconditionally: the arrays of an unflushed
/// model lag behind by the paragraph under construction, and reading them
/// directly would silently truncate the stream. Since the flush is
/// idempotent, callers that already flushed lose nothing.
///
/// Every array is copied by value. The snapshot never aliases model storage,
/// so the model may be mutated or dropped immediately after this returns.
/// A model with zero paragraphs flattens to five empty arrays, which is a
/// valid snapshot, not an error.
pub fn flatten(model: &mut TextModel) -> Result<TextModelSnapshot> {
    model.flush()?;

    let storage = model.storage();
    let descriptor = StorageDescriptor {
        directory_name: storage.directory_name().to_string(),
        file_extension: storage.file_extension().to_string(),
        block_count: storage.block_count() as i32,
    };

    Ok(TextModelSnapshot {
        id: absent_if_empty(model.id()),
        language: absent_if_empty(model.language()),
        paragraph_count: model.paragraph_count() as i32,
        start_entry_indices: model.start_entry_indices().to_vec(),
        start_entry_offsets: model.start_entry_offsets().to_vec(),
        paragraph_lengths: model.paragraph_lengths().to_vec(),
        text_sizes: model.text_sizes().to_vec(),
        kinds: model.kinds().to_vec(),
        storage: descriptor,
    })
}

/// Copy book metadata, field by field, into its wire form.
///
/// Empty title, language, and encoding become absent; a book with an empty
/// series title has no series at all, so the index is dropped with it.
pub fn encode_book(book: &Book) -> BookSnapshot {
    BookSnapshot {
        title: absent_if_empty(book.title()),
        language: absent_if_empty(book.language()),
        encoding: absent_if_empty(book.encoding()),
        series: absent_if_empty(book.series_title()).map(|title| SeriesInfo {
            title,
            index: book.index_in_series(),
        }),
        authors: book.authors().to_vec(),
        tags: book.tags().to_vec(),
    }
}

/// Rebuild a native book from a host record, the inverse of [`encode_book`].
///
/// Used when the host hands an existing record back across the boundary:
/// absent fields become the empty-string sentinel again.
pub fn decode_book(snapshot: &BookSnapshot) -> Book {
    let mut book = Book::new();
    book.set_title(snapshot.title.as_deref().unwrap_or(""));
    book.set_language(snapshot.language.as_deref().unwrap_or(""));
    book.set_encoding(snapshot.encoding.as_deref().unwrap_or(""));
    if let Some(series) = &snapshot.series {
        book.set_series_info(&series.title, series.index);
    }
    for author in &snapshot.authors {
        book.add_author(&author.name, &author.sort_key);
    }
    for tag in &snapshot.tags {
        book.add_tag(tag);
    }
    book
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParagraphKind;
    use crate::storage::MemoryStorage;

    fn model() -> TextModel {
        TextModel::new("", "", Box::new(MemoryStorage::new(64)))
    }

    #[test]
    fn test_flatten_zero_paragraphs_is_valid() {
        let mut m = model();
        let snapshot = flatten(&mut m).unwrap();

        assert_eq!(snapshot.paragraph_count, 0);
        assert!(snapshot.start_entry_indices.is_empty());
        assert!(snapshot.start_entry_offsets.is_empty());
        assert!(snapshot.paragraph_lengths.is_empty());
        assert!(snapshot.text_sizes.is_empty());
        assert!(snapshot.kinds.is_empty());
    }

    #[test]
    fn test_flatten_flushes_pending_paragraph() {
        let mut unflushed = model();
        unflushed.begin_paragraph(ParagraphKind::Text).unwrap();
        unflushed.add_text("tail");

        let mut flushed = model();
        flushed.begin_paragraph(ParagraphKind::Text).unwrap();
        flushed.add_text("tail");
        flushed.flush().unwrap();

        // The encoder's implicit flush makes both models transfer the same.
        let a = flatten(&mut unflushed).unwrap();
        let b = flatten(&mut flushed).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.paragraph_count, 1);
    }

    #[test]
    fn test_flatten_arrays_are_aligned() {
        let mut m = model();
        m.begin_paragraph(ParagraphKind::Text).unwrap();
        m.add_text("one");
        m.begin_paragraph(ParagraphKind::Image).unwrap();
        m.add_image("cover");
        m.begin_paragraph(ParagraphKind::SectionBreak).unwrap();

        let snapshot = flatten(&mut m).unwrap();
        let n = snapshot.paragraph_count as usize;
        assert_eq!(n, 3);
        assert_eq!(snapshot.start_entry_indices.len(), n);
        assert_eq!(snapshot.start_entry_offsets.len(), n);
        assert_eq!(snapshot.paragraph_lengths.len(), n);
        assert_eq!(snapshot.text_sizes.len(), n);
        assert_eq!(snapshot.kinds.len(), n);
        assert_eq!(
            snapshot.kinds,
            vec![
                ParagraphKind::Text.as_byte(),
                ParagraphKind::Image.as_byte(),
                ParagraphKind::SectionBreak.as_byte(),
            ]
        );
    }

    #[test]
    fn test_flatten_empty_id_and_language_are_absent() {
        let mut m = model();
        let snapshot = flatten(&mut m).unwrap();
        assert_eq!(snapshot.id, None);
        assert_eq!(snapshot.language, None);

        let mut tagged = TextModel::new("notes", "en", Box::new(MemoryStorage::new(64)));
        let snapshot = flatten(&mut tagged).unwrap();
        assert_eq!(snapshot.id.as_deref(), Some("notes"));
        assert_eq!(snapshot.language.as_deref(), Some("en"));
    }

    #[test]
    fn test_flatten_snapshot_outlives_model() {
        let mut m = model();
        m.begin_paragraph(ParagraphKind::Text).unwrap();
        m.add_text("persistent");
        let snapshot = flatten(&mut m).unwrap();
        drop(m);

        assert_eq!(snapshot.paragraph_count, 1);
        assert_eq!(snapshot.text_sizes, vec![10]);
    }

    #[test]
    fn test_encode_book_empty_fields_are_absent() {
        let book = Book::new();
        let snapshot = encode_book(&book);
        assert_eq!(snapshot.title, None);
        assert_eq!(snapshot.language, None);
        assert_eq!(snapshot.encoding, None);
        assert_eq!(snapshot.series, None);
        assert!(snapshot.authors.is_empty());
        assert!(snapshot.tags.is_empty());
    }

    #[test]
    fn test_encode_book_copies_fields() {
        let mut book = Book::new();
        book.set_title("T");
        book.set_language("en");
        book.set_encoding("UTF-8");
        book.set_series_info("Saga", 2.0);
        book.add_author("A. Author", "Author, A.");
        book.add_tag("fiction");

        let snapshot = encode_book(&book);
        assert_eq!(snapshot.title.as_deref(), Some("T"));
        assert_eq!(snapshot.language.as_deref(), Some("en"));
        assert_eq!(snapshot.encoding.as_deref(), Some("UTF-8"));
        let series = snapshot.series.unwrap();
        assert_eq!(series.title, "Saga");
        assert_eq!(series.index, 2.0);
        assert_eq!(snapshot.authors[0].sort_key, "Author, A.");
        assert_eq!(snapshot.tags, vec!["fiction".to_string()]);
    }

    #[test]
    fn test_encode_book_empty_series_title_drops_index() {
        let mut book = Book::new();
        book.set_series_info("", 4.0);
        let snapshot = encode_book(&book);
        assert_eq!(snapshot.series, None);
    }
}
