use std::{fmt, rc::Rc};

use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    error::{LibraryError, Result},
    events::{EventKind, LendingEvent},
    membership::Membership,
    observers::LendingObserver,
};

/// Coordinates loans and returns between the catalog and the membership
/// roll, and keeps the append-only history of committed transitions.
///
/// The ledger owns no books or borrowers. Every operation takes the two
/// collections it coordinates and touches them only through their
/// crate-visible mutators, so a failed call leaves both unchanged.
#[derive(Default)]
pub struct LendingLedger {
    /// Committed events, oldest first
    history: Vec<LendingEvent>,
    /// Registered observers
    observers: Vec<Rc<dyn LendingObserver>>,
}

impl fmt::Debug for LendingLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LendingLedger")
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl LendingLedger {
    /// Create a ledger with an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger around a previously recorded history
    pub(crate) fn with_history(history: Vec<LendingEvent>) -> Self {
        Self { history, observers: Vec::new() }
    }

    /// Register an observer to be told about every committed transition
    pub fn register_observer(&mut self, observer: Rc<dyn LendingObserver>) {
        self.observers.push(observer);
    }

    /// Lend a book to a borrower
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the book or the borrower is unknown
    /// and `LibraryError::AlreadyLoaned` if the book is not on the shelf
    pub fn loan(
        &mut self,
        catalog: &mut Catalog,
        membership: &mut Membership,
        isbn: &str,
        borrower_id: &str,
    ) -> Result<()> {
        self.try_loan(catalog, membership, isbn, borrower_id)
            .inspect_err(|err| warn!(isbn, borrower_id, %err, "loan rejected"))
    }

    /// Take a book back from the borrower holding it
    ///
    /// Only the named borrower's loans are searched; a book held by someone
    /// else is reported as not on loan.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the book or the borrower is unknown
    /// and `LibraryError::NotOnLoan` if the borrower does not hold the book
    pub fn return_book(
        &mut self,
        catalog: &mut Catalog,
        membership: &mut Membership,
        isbn: &str,
        borrower_id: &str,
    ) -> Result<()> {
        self.try_return(catalog, membership, isbn, borrower_id)
            .inspect_err(|err| warn!(isbn, borrower_id, %err, "return rejected"))
    }

    /// Every committed transition, oldest first
    #[must_use]
    pub fn history(&self) -> &[LendingEvent] {
        &self.history
    }

    /// Loan without logging the rejection
    fn try_loan(
        &mut self,
        catalog: &mut Catalog,
        membership: &mut Membership,
        isbn: &str,
        borrower_id: &str,
    ) -> Result<()> {
        let book = catalog.get(isbn)?;
        membership.get(borrower_id)?;
        if !book.is_available() {
            return Err(LibraryError::AlreadyLoaned { isbn: isbn.to_string() });
        }

        catalog.set_available(isbn, false)?;
        if let Err(err) = membership.record_loan(borrower_id, isbn) {
            catalog.set_available(isbn, true)?;
            return Err(err);
        }

        self.commit(EventKind::Loan, catalog, membership, isbn, borrower_id)
    }

    /// Return without logging the rejection
    fn try_return(
        &mut self,
        catalog: &mut Catalog,
        membership: &mut Membership,
        isbn: &str,
        borrower_id: &str,
    ) -> Result<()> {
        catalog.get(isbn)?;
        if !membership.get(borrower_id)?.holds(isbn) {
            return Err(LibraryError::NotOnLoan {
                isbn: isbn.to_string(),
                borrower_id: borrower_id.to_string(),
            });
        }

        catalog.set_available(isbn, true)?;
        if let Err(err) = membership.release_loan(borrower_id, isbn) {
            catalog.set_available(isbn, false)?;
            return Err(err);
        }

        self.commit(EventKind::Return, catalog, membership, isbn, borrower_id)
    }

    /// Append the event for a transition that has been applied and notify observers
    fn commit(
        &mut self,
        kind: EventKind,
        catalog: &Catalog,
        membership: &Membership,
        isbn: &str,
        borrower_id: &str,
    ) -> Result<()> {
        let sequence = self.history.last().map_or(1, |last| last.sequence().saturating_add(1));
        let event = LendingEvent::new(sequence, kind, isbn, borrower_id);
        info!(sequence, ?kind, isbn, borrower_id, "transition committed");

        let book = catalog.get(isbn)?;
        let borrower = membership.get(borrower_id)?;
        for observer in &self.observers {
            observer.on_event(&event, book, borrower);
        }

        self.history.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
