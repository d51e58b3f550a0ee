use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{book::Book, catalog::Catalog, ledger::LendingLedger, membership::Membership};

/// Summary figures for the whole library
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Books in the catalog
    pub total_books: usize,
    /// Books on the shelf
    pub available_books: usize,
    /// Books out on loan
    pub loaned_books: usize,
    /// Registered borrowers
    pub borrowers: usize,
    /// Share of the catalog on loan, in percent rounded to two decimals
    pub loan_percentage: f64,
    /// Transitions recorded in the ledger history
    pub events_recorded: usize,
    /// Books per category, most common first
    pub categories: Vec<(String, usize)>,
    /// Books per adaptation, most common first
    pub adaptations: Vec<(String, usize)>,
}

/// Read-only reporting over the library's components
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    /// Books
    catalog: &'a Catalog,
    /// Borrowers
    membership: &'a Membership,
    /// Loan history
    ledger: &'a LendingLedger,
}

impl<'a> QueryEngine<'a> {
    /// Build a query view over the three components
    #[must_use]
    pub fn new(
        catalog: &'a Catalog,
        membership: &'a Membership,
        ledger: &'a LendingLedger,
    ) -> Self {
        Self { catalog, membership, ledger }
    }

    /// Books on the shelf, in catalog order
    #[must_use]
    pub fn available_books(&self) -> Vec<&'a Book> {
        self.catalog.list().filter(|b| b.is_available()).collect()
    }

    /// Books out on loan, in catalog order
    #[must_use]
    pub fn loaned_books(&self) -> Vec<&'a Book> {
        self.catalog.list().filter(|b| !b.is_available()).collect()
    }

    /// Books currently held by a borrower, in loan order.
    /// An unknown borrower holds nothing.
    #[must_use]
    pub fn borrower_loans(&self, borrower_id: &str) -> Vec<&'a Book> {
        self.membership.get(borrower_id).map_or_else(
            |_| Vec::new(),
            |borrower| {
                borrower.loans().iter().filter_map(|isbn| self.catalog.get(isbn).ok()).collect()
            },
        )
    }

    /// Books grouped under their adaptation, labels in ascending order.
    /// Books without an adaptation are left out.
    #[must_use]
    pub fn books_by_adaptation(&self) -> BTreeMap<&'a str, Vec<&'a Book>> {
        let mut groups: BTreeMap<&'a str, Vec<&'a Book>> = BTreeMap::new();
        for book in self.catalog.list() {
            if let Some(adaptation) = book.adaptation() {
                groups.entry(adaptation).or_default().push(book);
            }
        }
        groups
    }

    /// Counts, loan percentage and category/adaptation histograms
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let total_books = self.catalog.len();
        let available_books = self.catalog.list().filter(|b| b.is_available()).count();
        let loaned_books = total_books.saturating_sub(available_books);

        Statistics {
            total_books,
            available_books,
            loaned_books,
            borrowers: self.membership.len(),
            loan_percentage: percentage(loaned_books, total_books),
            events_recorded: self.ledger.history().len(),
            categories: histogram(self.catalog.list().map(Book::category)),
            adaptations: histogram(self.catalog.list().filter_map(Book::adaptation)),
        }
    }
}

/// `part` as a percentage of `whole`, two decimals; zero for an empty whole
#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = (part as f64 * 100.0) / whole as f64;
    (raw * 100.0).round() / 100.0
}

/// Count labels, most frequent first; ties keep the order of first appearance
fn histogram<S: AsRef<str>>(labels: impl Iterator<Item = S>) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for label in labels {
        let count = counts.entry(label.as_ref().to_string()).or_default();
        *count = count.saturating_add(1);
    }
    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}
