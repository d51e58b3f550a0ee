use std::fmt;

use thiserror::Error;

/// The kind of record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A catalog entry, keyed by ISBN
    Book,
    /// A registered borrower, keyed by borrower id
    Borrower,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book => write!(f, "book"),
            Self::Borrower => write!(f, "borrower"),
        }
    }
}

/// Coarse classification of a [`LibraryError`], for callers that only care
/// about which rule was violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An identifier is already in use
    DuplicateKey,
    /// No entry exists for an identifier
    NotFound,
    /// The entry is referenced by an open loan
    ResourceBusy,
    /// The book is already out
    AlreadyLoaned,
    /// The book is not in the named borrower's loans
    NotOnLoan,
    /// Snapshot could not be written
    Persistence,
    /// Snapshot could not be read or replayed
    Load,
    /// Configuration file could not be used
    Config,
}

/// Error type for every fallible library operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Insertion with an identifier that is already present
    #[error("{record} {key} is already registered")]
    DuplicateKey { record: RecordKind, key: String },
    /// Lookup by identifier found nothing
    #[error("{record} {key} not found")]
    NotFound { record: RecordKind, key: String },
    /// Removal blocked by an open loan
    #[error("{record} {key} is busy with an open loan")]
    ResourceBusy { record: RecordKind, key: String },
    /// Loan attempted on a book that is already out
    #[error("book {isbn} is already on loan")]
    AlreadyLoaned { isbn: String },
    /// Return attempted for a book the borrower does not hold
    #[error("book {isbn} is not on loan to borrower {borrower_id}")]
    NotOnLoan { isbn: String, borrower_id: String },
    /// Error occurred while saving a snapshot
    #[error("persistence error: {0}")]
    Persistence(String),
    /// Error occurred while loading a snapshot
    #[error("load error: {0}")]
    Load(String),
    /// Error occurred while reading configuration
    #[error("config error: {0}")]
    Config(String),
}

impl LibraryError {
    /// Shorthand for a missing book
    pub(crate) fn book_not_found(isbn: &str) -> Self {
        Self::NotFound { record: RecordKind::Book, key: isbn.to_string() }
    }

    /// Shorthand for a missing borrower
    pub(crate) fn borrower_not_found(id: &str) -> Self {
        Self::NotFound { record: RecordKind::Borrower, key: id.to_string() }
    }

    /// The taxonomy kind of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ResourceBusy { .. } => ErrorKind::ResourceBusy,
            Self::AlreadyLoaned { .. } => ErrorKind::AlreadyLoaned,
            Self::NotOnLoan { .. } => ErrorKind::NotOnLoan,
            Self::Persistence(_) => ErrorKind::Persistence,
            Self::Load(_) => ErrorKind::Load,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = LibraryError> = std::result::Result<T, E>;
