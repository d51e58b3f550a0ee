use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    book::Book,
    catalog::Catalog,
    error::{LibraryError, Result},
    events::LendingEvent,
    ledger::LendingLedger,
    library::Library,
    membership::Membership,
};

/// Serializable form of a book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookRecord {
    /// Unique identifier
    pub isbn: String,
    /// Book title
    pub title: String,
    /// Book author
    pub author: String,
    /// Shelf category
    pub category: String,
    /// Adaptation annotation
    pub adaptation: Option<String>,
    /// Whether the book was on the shelf when captured
    pub available: bool,
}

/// Serializable form of a borrower
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BorrowerRecord {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// ISBNs held when captured, in loan order
    pub loaned_isbns: Vec<String>,
}

/// Serializable representation of the whole library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Snapshot {
    /// Library display name
    pub name: String,
    /// Every book
    pub books: Vec<BookRecord>,
    /// Every borrower
    pub borrowers: Vec<BorrowerRecord>,
    /// Recorded lending history
    #[serde(default)]
    pub history: Vec<LendingEvent>,
}

impl Snapshot {
    /// Copy the library's current state
    #[must_use]
    pub fn capture(library: &Library) -> Self {
        let books = library
            .catalog()
            .list()
            .map(|book| BookRecord {
                isbn: book.isbn().to_string(),
                title: book.title().to_string(),
                author: book.author().to_string(),
                category: book.category().to_string(),
                adaptation: book.adaptation().map(str::to_string),
                available: book.is_available(),
            })
            .collect();
        let borrowers = library
            .membership()
            .list()
            .map(|borrower| BorrowerRecord {
                id: borrower.id().to_string(),
                name: borrower.name().to_string(),
                loaned_isbns: borrower.loans().to_vec(),
            })
            .collect();

        Self {
            name: library.name().to_string(),
            books,
            borrowers,
            history: library.ledger().history().to_vec(),
        }
    }

    /// Rebuild a library through the public add/register/loan operations
    ///
    /// Loans are replayed from the borrower records; the availability flags
    /// in the book records must agree with them.
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Load` if:
    /// - Two books or two borrowers share an identifier
    /// - A borrower lists a book that is missing or listed twice
    /// - A book is marked unavailable but no borrower holds it, or the reverse
    pub fn restore(self) -> Result<Library> {
        let mut catalog = Catalog::new();
        for record in &self.books {
            let mut book = Book::new(&record.isbn, &record.title, &record.author, &record.category);
            if let Some(adaptation) = &record.adaptation {
                book = book.with_adaptation(adaptation);
            }
            catalog.add(book).map_err(replay_error)?;
        }

        let mut membership = Membership::new();
        for record in &self.borrowers {
            membership.register(&record.name, &record.id).map_err(replay_error)?;
        }

        let mut replay = LendingLedger::new();
        for record in &self.borrowers {
            for isbn in &record.loaned_isbns {
                replay.loan(&mut catalog, &mut membership, isbn, &record.id).map_err(replay_error)?;
            }
        }

        for record in &self.books {
            let available = catalog.get(&record.isbn).map_err(replay_error)?.is_available();
            if available != record.available {
                return Err(LibraryError::Load(format!(
                    "book {} is marked {} but the borrower records disagree",
                    record.isbn,
                    if record.available { "available" } else { "on loan" }
                )));
            }
        }

        Ok(Library::from_parts(
            &self.name,
            catalog,
            membership,
            LendingLedger::with_history(self.history),
        ))
    }

    /// Save the snapshot as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Persistence` if:
    /// - The snapshot cannot be serialized to JSON
    /// - The file cannot be created
    /// - The data cannot be written to the file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| LibraryError::Persistence(e.to_string()))?;

        info!(path = %path.display(), books = self.books.len(), "saving snapshot");

        let mut file = File::create(path)
            .map_err(|e| LibraryError::Persistence(format!("Failed to create file: {e}")))?;

        file.write_all(serialized.as_bytes())
            .map_err(|e| LibraryError::Persistence(format!("Failed to write to file: {e}")))?;

        Ok(())
    }

    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    ///
    /// Returns a `LibraryError::Load` if:
    /// - The file does not exist
    /// - The file cannot be opened
    /// - The file cannot be read
    /// - The JSON parsing fails
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "loading snapshot");

        if !path.exists() {
            return Err(LibraryError::Load(format!("File does not exist: {}", path.display())));
        }

        let mut file = File::open(path)
            .map_err(|e| LibraryError::Load(format!("Failed to open file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| LibraryError::Load(format!("Failed to read file: {e}")))?;

        serde_json::from_str(&contents)
            .map_err(|e| LibraryError::Load(format!("Failed to parse JSON: {e}")))
    }
}

/// A rejected replay step means the snapshot itself is inconsistent
#[allow(clippy::needless_pass_by_value)]
fn replay_error(err: LibraryError) -> LibraryError {
    LibraryError::Load(format!("Snapshot cannot be replayed: {err}"))
}

#[cfg(test)]
mod tests;
