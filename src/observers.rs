use std::cell::RefCell;

use tracing::info;

use crate::{
    book::Book,
    borrower::Borrower,
    events::{EventKind, LendingEvent},
};

/// Trait for lending observation
pub trait LendingObserver {
    /// Called after a loan or return has been committed
    fn on_event(&self, event: &LendingEvent, book: &Book, borrower: &Borrower);
}

/// Logs all transitions that occur in the ledger
#[derive(Debug)]
pub struct TransitionLogger;

impl LendingObserver for TransitionLogger {
    fn on_event(&self, event: &LendingEvent, book: &Book, borrower: &Borrower) {
        info!(
            sequence = event.sequence(),
            kind = ?event.kind(),
            isbn = book.isbn(),
            borrower = borrower.id(),
            open_loans = borrower.loans().len(),
            "lending transition"
        );
    }
}

/// Builds a user-facing notice for every loan and return
#[derive(Debug, Default)]
pub struct NotificationService {
    /// Notices produced so far, oldest first
    sent: RefCell<Vec<String>>,
}

impl NotificationService {
    /// Create a service with no notices
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices produced so far, oldest first
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }
}

impl LendingObserver for NotificationService {
    fn on_event(&self, event: &LendingEvent, book: &Book, borrower: &Borrower) {
        let notice = match event.kind() {
            EventKind::Loan => {
                format!("'{}' has been loaned to {}", book.title(), borrower.name())
            }
            EventKind::Return => {
                format!("'{}' has been returned by {}", book.title(), borrower.name())
            }
        };
        info!(notice = %notice, "notification");
        self.sent.borrow_mut().push(notice);
    }
}
