//! Plain-text format plugin.
//!
//! The simplest real plugin: paragraphs are runs of non-blank lines, blank
//! lines separate them. Exists both as a usable format backend and as the
//! reference for how a plugin drives the model-building API.

use std::fs;
use std::io::Read;
use std::path::Path;

use memchr::memchr_iter;

use crate::format::FormatPlugin;
use crate::model::{Book, BookModel, ParagraphKind, TextModel};
use crate::util::decode_text;

/// How much of the file the metadata probe reads to detect the encoding.
const ENCODING_PROBE_BYTES: usize = 4096;

#[derive(Debug, Default)]
pub struct PlainTextPlugin;

impl PlainTextPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl FormatPlugin for PlainTextPlugin {
    fn name(&self) -> &'static str {
        "plain text"
    }

    fn accepts_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.eq_ignore_ascii_case("txt"))
            .unwrap_or(false)
    }

    fn read_meta_info(&self, path: &Path, book: &mut Book) -> bool {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            return false;
        };

        // Sniff the encoding from a prefix; the full read happens in
        // read_model.
        let mut probe = vec![0u8; ENCODING_PROBE_BYTES];
        let n = match fs::File::open(path).and_then(|mut f| f.read(&mut probe)) {
            Ok(n) => n,
            Err(_) => return false,
        };
        let (_, encoding) = decode_text(&probe[..n], None);

        book.set_title(stem);
        book.set_encoding(encoding);
        true
    }

    fn read_model(&self, path: &Path, model: &mut BookModel) -> bool {
        let Ok(data) = fs::read(path) else {
            return false;
        };
        let hint = if model.book().encoding().is_empty() {
            None
        } else {
            Some(model.book().encoding().to_string())
        };
        let Ok(encoding) = parse_plain_text(&data, hint.as_deref(), model.text_model_mut()) else {
            return false;
        };
        if model.book().encoding().is_empty() {
            model.book_mut().set_encoding(encoding);
        }
        true
    }
}

/// Decode `data` and append its paragraphs to `model`.
///
/// Runs of non-blank lines become one text paragraph each (lines joined with
/// a single space); each run of blank lines between them becomes one
/// empty-line paragraph. The model is left unflushed. Returns the name of the
/// encoding used.
pub fn parse_plain_text(
    data: &[u8],
    encoding_hint: Option<&str>,
    model: &mut TextModel,
) -> crate::Result<&'static str> {
    let (text, encoding) = decode_text(data, encoding_hint);
    let text: &str = &text;
    let bytes = text.as_bytes();

    let mut paragraph = String::new();
    let mut produced_any = false;
    let mut in_blank_run = false;
    let mut line_start = 0;

    // memchr never splits a UTF-8 sequence: '\n' is ASCII, so every match is
    // a char boundary.
    for line_end in memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len())) {
        let line = text[line_start..line_end].trim();
        line_start = line_end + 1;

        if line.is_empty() {
            if !paragraph.is_empty() {
                model.begin_paragraph(ParagraphKind::Text)?;
                model.add_text(&paragraph);
                paragraph.clear();
                produced_any = true;
            }
            in_blank_run = true;
            continue;
        }

        // A blank run at the start of the file is not a separator.
        if in_blank_run && produced_any {
            model.begin_paragraph(ParagraphKind::EmptyLine)?;
        }
        in_blank_run = false;

        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(line);
    }
    if !paragraph.is_empty() {
        model.begin_paragraph(ParagraphKind::Text)?;
        model.add_text(&paragraph);
    }

    Ok(encoding)
}
