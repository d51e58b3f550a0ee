use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two transitions the ledger records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A book left the shelf
    Loan,
    /// A book came back
    Return,
}

/// One committed loan or return, as recorded in the ledger history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LendingEvent {
    /// Position in the history, starting at 1
    sequence: u64,
    /// Which transition happened
    kind: EventKind,
    /// The book involved
    isbn: String,
    /// The borrower involved
    borrower_id: String,
    /// When the transition was committed
    recorded_at: DateTime<Utc>,
}

impl LendingEvent {
    /// Stamp a new event with the current time
    pub(crate) fn new(sequence: u64, kind: EventKind, isbn: &str, borrower_id: &str) -> Self {
        Self {
            sequence,
            kind,
            isbn: isbn.to_string(),
            borrower_id: borrower_id.to_string(),
            recorded_at: Utc::now(),
        }
    }

    /// Position in the history, starting at 1
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Which transition happened
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The book involved
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// The borrower involved
    #[must_use]
    pub fn borrower_id(&self) -> &str {
        &self.borrower_id
    }

    /// When the transition was committed
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
