use indexmap::IndexMap;
use tracing::debug;

use crate::{
    borrower::Borrower,
    error::{LibraryError, RecordKind, Result},
};

/// The owned collection of borrowers, keyed by borrower id
#[derive(Debug, Clone, Default)]
pub struct Membership {
    /// Borrowers by id, in registration order
    borrowers: IndexMap<String, Borrower>,
}

impl Membership {
    /// Create an empty membership roll
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new borrower with no loans
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateKey` if the id is taken
    pub fn register(&mut self, name: &str, id: &str) -> Result<()> {
        if self.borrowers.contains_key(id) {
            return Err(LibraryError::DuplicateKey {
                record: RecordKind::Borrower,
                key: id.to_string(),
            });
        }
        self.borrowers.insert(id.to_string(), Borrower::new(name, id));
        debug!(id, name, "borrower registered");
        Ok(())
    }

    /// Remove a borrower who holds nothing
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the id is unknown and
    /// `LibraryError::ResourceBusy` if the borrower still has loans
    pub fn deregister(&mut self, id: &str) -> Result<Borrower> {
        if !self.get(id)?.loans().is_empty() {
            return Err(LibraryError::ResourceBusy {
                record: RecordKind::Borrower,
                key: id.to_string(),
            });
        }
        let removed = self.borrowers.shift_remove(id).ok_or_else(|| LibraryError::borrower_not_found(id))?;
        debug!(id, "borrower deregistered");
        Ok(removed)
    }

    /// Look up a borrower by id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the id is unknown
    pub fn get(&self, id: &str) -> Result<&Borrower> {
        self.borrowers.get(id).ok_or_else(|| LibraryError::borrower_not_found(id))
    }

    /// All borrowers in registration order
    pub fn list(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }

    /// Number of registered borrowers
    #[must_use]
    pub fn len(&self) -> usize {
        self.borrowers.len()
    }

    /// Whether nobody is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.borrowers.is_empty()
    }

    /// Append an ISBN to a borrower's loans. Only the ledger calls this.
    pub(crate) fn record_loan(&mut self, id: &str, isbn: &str) -> Result<()> {
        self.get_mut(id)?.push_loan(isbn);
        Ok(())
    }

    /// Drop an ISBN from a borrower's loans. Only the ledger calls this.
    pub(crate) fn release_loan(&mut self, id: &str, isbn: &str) -> Result<()> {
        if self.get_mut(id)?.take_loan(isbn) {
            Ok(())
        } else {
            Err(LibraryError::NotOnLoan { isbn: isbn.to_string(), borrower_id: id.to_string() })
        }
    }

    /// Mutable lookup
    fn get_mut(&mut self, id: &str) -> Result<&mut Borrower> {
        self.borrowers.get_mut(id).ok_or_else(|| LibraryError::borrower_not_found(id))
    }
}
