//! Book metadata populated by format plugins.

/// An author credit: display name plus the key the library sorts by.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Author {
    pub name: String,
    pub sort_key: String,
}

/// Native-side book record.
///
/// Plugins fill this during `read_meta_info`. Absence is represented by the
/// empty string here; the transfer encoder turns empty optional fields into
/// explicit absent markers for the host (see [`crate::transfer`]).
#[derive(Debug, Clone, Default)]
pub struct Book {
    title: String,
    language: String,
    encoding: String,
    series_title: String,
    index_in_series: f32,
    authors: Vec<Author>,
    tags: Vec<String>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn set_encoding(&mut self, encoding: &str) {
        self.encoding = encoding.to_string();
    }

    pub fn series_title(&self) -> &str {
        &self.series_title
    }

    pub fn index_in_series(&self) -> f32 {
        self.index_in_series
    }

    pub fn set_series_info(&mut self, title: &str, index: f32) {
        self.series_title = title.to_string();
        self.index_in_series = index;
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Add an author, deriving the sort key from the last word of the name
    /// when none is given. Blank names and exact duplicates are ignored.
    pub fn add_author(&mut self, name: &str, sort_key: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let sort_key = sort_key.trim();
        let sort_key = if sort_key.is_empty() {
            name.rsplit(char::is_whitespace)
                .next()
                .unwrap_or(name)
                .to_string()
        } else {
            sort_key.to_string()
        };

        let author = Author {
            name: name.to_string(),
            sort_key,
        };
        if !self.authors.contains(&author) {
            self.authors.push(author);
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Add a tag, ignoring duplicates.
    pub fn add_tag(&mut self, tag: &str) {
        if !tag.is_empty() && !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }
}
