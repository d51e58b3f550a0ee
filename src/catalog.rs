use indexmap::IndexMap;
use tracing::debug;

use crate::{
    book::Book,
    error::{LibraryError, RecordKind, Result},
};

/// The owned collection of books, keyed by ISBN
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Books by ISBN, in insertion order
    books: IndexMap<String, Book>,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a book
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateKey` if a book with the same ISBN exists
    pub fn add(&mut self, book: Book) -> Result<()> {
        if self.books.contains_key(book.isbn()) {
            return Err(LibraryError::DuplicateKey {
                record: RecordKind::Book,
                key: book.isbn().to_string(),
            });
        }
        debug!(isbn = book.isbn(), title = book.title(), "book added");
        self.books.insert(book.isbn().to_string(), book);
        Ok(())
    }

    /// Delete a book that is on the shelf
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the ISBN is unknown and
    /// `LibraryError::ResourceBusy` if the book is on loan
    pub fn remove(&mut self, isbn: &str) -> Result<Book> {
        let book = self.get(isbn)?;
        if !book.is_available() {
            return Err(LibraryError::ResourceBusy {
                record: RecordKind::Book,
                key: isbn.to_string(),
            });
        }
        let removed = self.books.shift_remove(isbn).ok_or_else(|| LibraryError::book_not_found(isbn))?;
        debug!(isbn, "book removed");
        Ok(removed)
    }

    /// Look up a book by ISBN
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the ISBN is unknown
    pub fn get(&self, isbn: &str) -> Result<&Book> {
        self.books.get(isbn).ok_or_else(|| LibraryError::book_not_found(isbn))
    }

    /// Whether a book with this ISBN exists
    #[must_use]
    pub fn contains(&self, isbn: &str) -> bool {
        self.books.contains_key(isbn)
    }

    /// Change a book's category
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the ISBN is unknown
    pub fn set_category(&mut self, isbn: &str, category: &str) -> Result<()> {
        self.get_mut(isbn)?.set_category(category);
        debug!(isbn, category, "category updated");
        Ok(())
    }

    /// Set or clear a book's adaptation annotation
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the ISBN is unknown
    pub fn set_adaptation(&mut self, isbn: &str, adaptation: Option<&str>) -> Result<()> {
        self.get_mut(isbn)?.set_adaptation(adaptation);
        debug!(isbn, ?adaptation, "adaptation updated");
        Ok(())
    }

    /// Books whose title contains `needle`, ignoring case
    #[must_use]
    pub fn find_by_title(&self, needle: &str) -> Vec<&Book> {
        let needle = needle.to_lowercase();
        self.books.values().filter(|b| b.title().to_lowercase().contains(&needle)).collect()
    }

    /// Books whose author contains `needle`, ignoring case
    #[must_use]
    pub fn find_by_author(&self, needle: &str) -> Vec<&Book> {
        let needle = needle.to_lowercase();
        self.books.values().filter(|b| b.author().to_lowercase().contains(&needle)).collect()
    }

    /// Books whose category equals `category`, ignoring case
    #[must_use]
    pub fn find_by_category(&self, category: &str) -> Vec<&Book> {
        let category = category.to_lowercase();
        self.books.values().filter(|b| b.category().to_lowercase() == category).collect()
    }

    /// Books whose adaptation contains `needle`, ignoring case.
    /// Books without an adaptation never match.
    #[must_use]
    pub fn find_by_adaptation(&self, needle: &str) -> Vec<&Book> {
        let needle = needle.to_lowercase();
        self.books
            .values()
            .filter(|b| b.adaptation().is_some_and(|a| a.to_lowercase().contains(&needle)))
            .collect()
    }

    /// All books in the order they were added
    pub fn list(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Number of books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Flip a book's availability. Only the ledger calls this.
    pub(crate) fn set_available(&mut self, isbn: &str, available: bool) -> Result<()> {
        self.get_mut(isbn)?.set_available(available);
        Ok(())
    }

    /// Mutable lookup
    fn get_mut(&mut self, isbn: &str) -> Result<&mut Book> {
        self.books.get_mut(isbn).ok_or_else(|| LibraryError::book_not_found(isbn))
    }
}
