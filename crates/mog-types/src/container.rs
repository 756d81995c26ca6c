use std::fmt;

use serde::{Deserialize, Serialize};

/// The grouping unit a clause belongs to: one verse of one chapter of one book.
///
/// `book` is the book's ordinal in textual order as assigned by the corpus,
/// so the derived ordering (`book` → `chapter` → `verse`) is textual order and
/// contiguous ranges of containers map onto contiguous ranges of text.
///
/// The human-readable form (`Genesis.1.4`) needs the corpus book table; the
/// `Display` impl prints the ordinal form (`#0.1.4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContainerId {
    /// Book ordinal in textual order.
    pub book: u16,
    /// Chapter number within the book.
    pub chapter: u32,
    /// Verse number within the chapter.
    pub verse: u32,
}

impl ContainerId {
    /// Create a container identifier.
    pub const fn new(book: u16, chapter: u32, verse: u32) -> Self {
        Self {
            book,
            chapter,
            verse,
        }
    }

    /// Smallest container of a book.
    pub const fn book_start(book: u16) -> Self {
        Self::new(book, 0, 0)
    }

    /// Largest container of a book.
    pub const fn book_end(book: u16) -> Self {
        Self::new(book, u32::MAX, u32::MAX)
    }

    /// Smallest container of a chapter.
    pub const fn chapter_start(book: u16, chapter: u32) -> Self {
        Self::new(book, chapter, 0)
    }

    /// Largest container of a chapter.
    pub const fn chapter_end(book: u16, chapter: u32) -> Self {
        Self::new(book, chapter, u32::MAX)
    }

    /// Render with an explicit book name, e.g. `Genesis.1.4`.
    pub fn label(&self, book_name: &str) -> String {
        format!("{}.{}.{}", book_name, self.chapter, self.verse)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}.{}", self.book, self.chapter, self.verse)
    }
}
