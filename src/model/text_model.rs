//! In-memory text model built incrementally by format plugins.
//!
//! A model is one logical text stream of a book (body text, footnotes, ...).
//! Paragraphs are described by five co-indexed arrays; the serialized entry
//! bytes themselves go to block storage. A paragraph under construction is
//! buffered and only committed to the arrays by the next `begin_paragraph` or
//! by [`TextModel::flush`] — readers must flush before touching the arrays,
//! or they see the stream truncated by one paragraph.

use crate::error::Result;
use crate::model::ParagraphKind;
use crate::storage::TextStorage;

// Entry tags inside a serialized paragraph.
const ENTRY_TEXT: u8 = 0x01;
const ENTRY_CONTROL: u8 = 0x02;
const ENTRY_IMAGE: u8 = 0x03;

/// One text stream of a document.
pub struct TextModel {
    id: String,
    language: String,

    // Per-paragraph arrays, always the same length. Position i across all
    // five describes paragraph i.
    start_entry_indices: Vec<i32>,
    start_entry_offsets: Vec<i32>,
    paragraph_lengths: Vec<i32>,
    text_sizes: Vec<i32>,
    kinds: Vec<u8>,

    storage: Box<dyn TextStorage>,

    // Paragraph under construction.
    pending_kind: Option<ParagraphKind>,
    pending_buf: Vec<u8>,
    pending_entries: u32,
    pending_text_size: u32,
}

impl TextModel {
    /// Create an empty model backed by the given storage.
    ///
    /// `id` distinguishes this stream within the book and may be empty (the
    /// body text stream conventionally has an empty id).
    pub fn new(id: &str, language: &str, storage: Box<dyn TextStorage>) -> Self {
        Self {
            id: id.to_string(),
            language: language.to_string(),
            start_entry_indices: Vec::new(),
            start_entry_offsets: Vec::new(),
            paragraph_lengths: Vec::new(),
            text_sizes: Vec::new(),
            kinds: Vec::new(),
            storage,
            pending_kind: None,
            pending_buf: Vec::new(),
            pending_entries: 0,
            pending_text_size: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set the stream language, e.g. once a plugin has detected it.
    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Number of committed paragraphs. A paragraph under construction is not
    /// counted until the model is flushed.
    pub fn paragraph_count(&self) -> usize {
        self.kinds.len()
    }

    pub fn start_entry_indices(&self) -> &[i32] {
        &self.start_entry_indices
    }

    pub fn start_entry_offsets(&self) -> &[i32] {
        &self.start_entry_offsets
    }

    pub fn paragraph_lengths(&self) -> &[i32] {
        &self.paragraph_lengths
    }

    pub fn text_sizes(&self) -> &[i32] {
        &self.text_sizes
    }

    pub fn kinds(&self) -> &[u8] {
        &self.kinds
    }

    pub fn storage(&self) -> &dyn TextStorage {
        self.storage.as_ref()
    }

    /// Start a new paragraph, committing the one under construction.
    pub fn begin_paragraph(&mut self, kind: ParagraphKind) -> Result<()> {
        self.commit_pending()?;
        self.pending_kind = Some(kind);
        Ok(())
    }

    /// Append a text run to the current paragraph.
    ///
    /// Starts a [`ParagraphKind::Text`] paragraph implicitly if none is in
    /// progress. Each call contributes one entry; the text size accounts
    /// decoded characters, not UTF-8 bytes.
    pub fn add_text(&mut self, text: &str) {
        if self.pending_kind.is_none() {
            self.pending_kind = Some(ParagraphKind::Text);
        }
        self.pending_buf.push(ENTRY_TEXT);
        self.pending_buf
            .extend_from_slice(&(text.len() as u32).to_le_bytes());
        self.pending_buf.extend_from_slice(text.as_bytes());
        self.pending_entries += 1;
        self.pending_text_size += text.chars().count() as u32;
    }

    /// Append a control entry (style or structural directive) to the current
    /// paragraph.
    pub fn add_control(&mut self, code: u8, start: bool) {
        if self.pending_kind.is_none() {
            self.pending_kind = Some(ParagraphKind::Control);
        }
        self.pending_buf
            .extend_from_slice(&[ENTRY_CONTROL, code, start as u8]);
        self.pending_entries += 1;
    }

    /// Append an image reference entry to the current paragraph.
    pub fn add_image(&mut self, ref_id: &str) {
        if self.pending_kind.is_none() {
            self.pending_kind = Some(ParagraphKind::Image);
        }
        self.pending_buf.push(ENTRY_IMAGE);
        self.pending_buf
            .extend_from_slice(&(ref_id.len() as u16).to_le_bytes());
        self.pending_buf.extend_from_slice(ref_id.as_bytes());
        self.pending_entries += 1;
    }

    /// Finalize the model: commit the paragraph under construction and flush
    /// the backing storage.
    ///
    /// Idempotent. The model must be flushed before its arrays are read;
    /// [`crate::transfer::flatten`] does this unconditionally.
    pub fn flush(&mut self) -> Result<()> {
        self.commit_pending()?;
        self.storage.flush()
    }

    fn commit_pending(&mut self) -> Result<()> {
        let Some(kind) = self.pending_kind.take() else {
            return Ok(());
        };
        let (block, offset) = self.storage.append(&self.pending_buf)?;
        self.start_entry_indices.push(block as i32);
        self.start_entry_offsets.push(offset as i32);
        self.paragraph_lengths.push(self.pending_entries as i32);
        self.text_sizes.push(self.pending_text_size as i32);
        self.kinds.push(kind.as_byte());
        self.pending_buf.clear();
        self.pending_entries = 0;
        self.pending_text_size = 0;
        Ok(())
    }
}

impl std::fmt::Debug for TextModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextModel")
            .field("id", &self.id)
            .field("language", &self.language)
            .field("paragraphs", &self.kinds.len())
            .field("pending", &self.pending_kind)
            .finish()
    }
}
