//! End-to-end transfer of real files through the plain-text plugin.

use std::fs;
use std::path::Path;

use pont::format::PlainTextPlugin;
use pont::storage::PagedStorage;
use pont::storage::TextStorage;
use pont::{BookModelSnapshot, Bridge, ParagraphKind};

fn write_fixture(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_transfer_with_paged_storage() {
    let books = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();
    let path = write_fixture(
        books.path(),
        "voyage.txt",
        b"Chapter one begins here.\n\nIt continues with a second paragraph.\n",
    );

    let mut bridge = Bridge::new(cache.path()).with_block_size(64);
    let handle = bridge.register(Box::new(PlainTextPlugin::new()));

    assert!(bridge.accepts_file(handle, &path).unwrap());

    let mut record = BookModelSnapshot::default();
    assert!(bridge.read_meta_info(handle, &path, &mut record.book).unwrap());
    assert_eq!(record.book.title.as_deref(), Some("voyage"));
    assert_eq!(record.book.encoding.as_deref(), Some("UTF-8"));

    assert!(bridge.read_model(handle, &path, &mut record).unwrap());
    let text = record.text.unwrap();

    assert_eq!(text.paragraph_count, 3);
    assert_eq!(
        text.kinds,
        vec![
            ParagraphKind::Text.as_byte(),
            ParagraphKind::EmptyLine.as_byte(),
            ParagraphKind::Text.as_byte(),
        ]
    );

    // The descriptor names real storage: reopening it must see exactly the
    // blocks the transfer reported.
    assert_eq!(text.storage.file_extension, "pmb");
    assert!(text.storage.directory_name.contains("voyage"));
    assert!(text.storage.block_count >= 1);

    let reopened = PagedStorage::open(
        &text.storage.directory_name,
        &text.storage.file_extension,
        64,
    )
    .unwrap();
    assert_eq!(reopened.block_count() as i32, text.storage.block_count);
}

#[test]
fn test_transfer_empty_file_yields_zero_paragraphs() {
    let books = tempfile::tempdir().unwrap();
    let path = write_fixture(books.path(), "empty.txt", b"");

    let mut bridge = Bridge::in_memory();
    let handle = bridge.register(Box::new(PlainTextPlugin::new()));

    let mut record = BookModelSnapshot::default();
    assert!(bridge.read_model(handle, &path, &mut record).unwrap());

    let text = record.text.unwrap();
    assert_eq!(text.paragraph_count, 0);
    assert!(text.start_entry_indices.is_empty());
    assert!(text.start_entry_offsets.is_empty());
    assert!(text.paragraph_lengths.is_empty());
    assert!(text.text_sizes.is_empty());
    assert!(text.kinds.is_empty());
}

#[test]
fn test_meta_info_failure_for_missing_file() {
    let mut bridge = Bridge::in_memory();
    let handle = bridge.register(Box::new(PlainTextPlugin::new()));

    let mut record = BookModelSnapshot::default();
    let missing = Path::new("/nonexistent/book.txt");
    assert!(!bridge.read_meta_info(handle, missing, &mut record.book).unwrap());
    assert_eq!(record.book.title, None);
}

#[test]
fn test_legacy_encoding_is_reported_in_metadata() {
    let books = tempfile::tempdir().unwrap();
    // Windows-1252 e-acute, not valid UTF-8
    let path = write_fixture(books.path(), "caf\u{e9}.txt", b"R\xE9sum\xE9 of a life.\n");

    let mut bridge = Bridge::in_memory();
    let handle = bridge.register(Box::new(PlainTextPlugin::new()));

    let mut record = BookModelSnapshot::default();
    assert!(bridge.read_meta_info(handle, &path, &mut record.book).unwrap());
    assert_eq!(record.book.encoding.as_deref(), Some("windows-1252"));

    assert!(bridge.read_model(handle, &path, &mut record).unwrap());
    let text = record.text.unwrap();
    assert_eq!(text.paragraph_count, 1);
    assert_eq!(text.text_sizes, vec![17]); // "Résumé of a life." in chars
}
