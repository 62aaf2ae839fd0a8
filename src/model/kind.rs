//! Paragraph kind wire codes.
//!
//! The receiving runtime decodes kinds by raw byte value, not by name, so the
//! numeric codes below are part of the transfer protocol and must never be
//! renumbered. New kinds get new codes; retired kinds keep their slot.

/// Structural role of a paragraph, encoded as a single byte on the wire.
///
/// Every paragraph has exactly one kind. The set is closed: there is no
/// "unknown" code, and non-text paragraphs (images, structural breaks) are
/// first-class members.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphKind {
    /// Regular text paragraph.
    Text = 0,
    /// Paragraph whose single purpose is to display an image.
    Image = 1,
    /// Vertical gap between text paragraphs.
    EmptyLine = 2,
    /// Boundary between two sections of the document.
    SectionBreak = 3,
    /// Marks the end of the text stream.
    EndOfText = 4,
    /// Non-rendered paragraph carrying styling or structural directives.
    Control = 5,
}

impl ParagraphKind {
    /// Wire code for this kind.
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Inverse of [`as_byte`](Self::as_byte); `None` for codes this protocol
    /// version does not define.
    pub fn from_byte(byte: u8) -> Option<ParagraphKind> {
        match byte {
            0 => Some(ParagraphKind::Text),
            1 => Some(ParagraphKind::Image),
            2 => Some(ParagraphKind::EmptyLine),
            3 => Some(ParagraphKind::SectionBreak),
            4 => Some(ParagraphKind::EndOfText),
            5 => Some(ParagraphKind::Control),
            _ => None,
        }
    }
}
