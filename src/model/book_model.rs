use crate::model::{Book, TextModel};
use crate::storage::TextStorage;

/// A book together with its body text stream.
///
/// Plugins populate this during `read_model`. One book may in principle carry
/// several streams (body, footnotes); the bridge transfers the body stream.
pub struct BookModel {
    book: Book,
    text_model: TextModel,
}

impl BookModel {
    /// Create a model for `book`, with the body stream backed by `storage`.
    ///
    /// The body stream has the conventional empty id and inherits the book's
    /// language.
    pub fn new(book: Book, storage: Box<dyn TextStorage>) -> Self {
        let text_model = TextModel::new("", book.language(), storage);
        Self { book, text_model }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut Book {
        &mut self.book
    }

    pub fn text_model(&self) -> &TextModel {
        &self.text_model
    }

    pub fn text_model_mut(&mut self) -> &mut TextModel {
        &mut self.text_model
    }
}
