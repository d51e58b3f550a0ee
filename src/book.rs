/// A catalog entry
///
/// Title, author and ISBN are fixed at construction. Category and
/// adaptation can be edited through the catalog, and the availability flag
/// belongs to the lending ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique identifier, catalog key
    isbn: String,
    /// Book title
    title: String,
    /// Book author
    author: String,
    /// Shelf category
    category: String,
    /// Screen adaptation this book was turned into, if any
    adaptation: Option<String>,
    /// Whether the book is on the shelf
    available: bool,
}

impl Book {
    /// Create a new, available book
    #[must_use]
    pub fn new(isbn: &str, title: &str, author: &str, category: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            adaptation: None,
            available: true,
        }
    }

    /// Attach an adaptation annotation at construction time
    #[must_use]
    pub fn with_adaptation(mut self, adaptation: &str) -> Self {
        self.adaptation = Some(adaptation.to_string());
        self
    }

    /// The book's ISBN
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// The book's title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book's author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The book's category
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The adaptation annotation, if any
    #[must_use]
    pub fn adaptation(&self) -> Option<&str> {
        self.adaptation.as_deref()
    }

    /// Whether the book can be loaned right now
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Replace the category
    pub(crate) fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    /// Replace or clear the adaptation
    pub(crate) fn set_adaptation(&mut self, adaptation: Option<&str>) {
        self.adaptation = adaptation.map(str::to_string);
    }

    /// Flip the shelf flag
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}
