use std::{collections::HashMap, rc::Rc};

use crate::{
    book::Book,
    borrower::Borrower,
    catalog::Catalog,
    error::Result,
    ledger::LendingLedger,
    membership::Membership,
    observers::LendingObserver,
    query::QueryEngine,
};

/// The whole record store: catalog, membership roll and lending ledger.
///
/// Built once by the entry point and passed to every operation. Hosts that
/// add concurrent callers must guard the whole value with one lock, since a
/// loan touches both collections.
#[derive(Debug, Default)]
pub struct Library {
    /// Display name
    name: String,
    /// Books
    catalog: Catalog,
    /// Borrowers
    membership: Membership,
    /// Loan coordination and history
    ledger: LendingLedger,
}

impl Library {
    /// Create an empty library
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    /// Assemble a library from restored components
    pub(crate) fn from_parts(
        name: &str,
        catalog: Catalog,
        membership: Membership,
        ledger: LendingLedger,
    ) -> Self {
        Self { name: name.to_string(), catalog, membership, ledger }
    }

    /// The library's display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read access to the catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read access to the membership roll
    #[must_use]
    pub fn membership(&self) -> &Membership {
        &self.membership
    }

    /// Read access to the ledger
    #[must_use]
    pub fn ledger(&self) -> &LendingLedger {
        &self.ledger
    }

    /// See [`Catalog::add`]
    ///
    /// # Errors
    ///
    /// Propagates the catalog's error
    pub fn add_book(&mut self, book: Book) -> Result<()> {
        self.catalog.add(book)
    }

    /// See [`Catalog::remove`]
    ///
    /// # Errors
    ///
    /// Propagates the catalog's error
    pub fn remove_book(&mut self, isbn: &str) -> Result<Book> {
        self.catalog.remove(isbn)
    }

    /// See [`Catalog::set_category`]
    ///
    /// # Errors
    ///
    /// Propagates the catalog's error
    pub fn set_category(&mut self, isbn: &str, category: &str) -> Result<()> {
        self.catalog.set_category(isbn, category)
    }

    /// See [`Catalog::set_adaptation`]
    ///
    /// # Errors
    ///
    /// Propagates the catalog's error
    pub fn set_adaptation(&mut self, isbn: &str, adaptation: Option<&str>) -> Result<()> {
        self.catalog.set_adaptation(isbn, adaptation)
    }

    /// See [`Membership::register`]
    ///
    /// # Errors
    ///
    /// Propagates the membership error
    pub fn register(&mut self, name: &str, id: &str) -> Result<()> {
        self.membership.register(name, id)
    }

    /// See [`Membership::deregister`]
    ///
    /// # Errors
    ///
    /// Propagates the membership error
    pub fn deregister(&mut self, id: &str) -> Result<Borrower> {
        self.membership.deregister(id)
    }

    /// See [`LendingLedger::loan`]
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error
    pub fn loan(&mut self, isbn: &str, borrower_id: &str) -> Result<()> {
        self.ledger.loan(&mut self.catalog, &mut self.membership, isbn, borrower_id)
    }

    /// See [`LendingLedger::return_book`]
    ///
    /// # Errors
    ///
    /// Propagates the ledger's error
    pub fn return_book(&mut self, isbn: &str, borrower_id: &str) -> Result<()> {
        self.ledger.return_book(&mut self.catalog, &mut self.membership, isbn, borrower_id)
    }

    /// Attach an observer to the ledger
    pub fn register_observer(&mut self, observer: Rc<dyn LendingObserver>) {
        self.ledger.register_observer(observer);
    }

    /// Read-only search and reporting
    #[must_use]
    pub fn query(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.catalog, &self.membership, &self.ledger)
    }

    /// Whether every unavailable book is held by exactly one borrower, every
    /// held book is unavailable, and no borrower holds a book twice
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut holders: HashMap<&str, usize> = HashMap::new();
        for borrower in self.membership.list() {
            for isbn in borrower.loans() {
                let count = holders.entry(isbn.as_str()).or_default();
                *count = count.saturating_add(1);
            }
        }
        let every_holding_known = holders.keys().all(|isbn| self.catalog.contains(isbn));
        every_holding_known
            && self.catalog.list().all(|book| {
                let held = holders.get(book.isbn()).copied().unwrap_or_default();
                if book.is_available() { held == 0 } else { held == 1 }
            })
    }
}
