//! Record store for a lending library.
//!
//! This crate manages books, borrowers and the loans between them, keeping
//! one invariant at all times: a book is off the shelf exactly when one
//! borrower holds it.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

pub mod book;
pub mod borrower;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod ledger;
pub mod library;
pub mod membership;
pub mod observers;
pub mod persistence;
pub mod query;
pub mod report;
pub mod sample;

pub use book::Book;
pub use borrower::Borrower;
pub use catalog::Catalog;
pub use config::LibraryConfig;
pub use error::{ErrorKind, LibraryError, RecordKind, Result};
pub use events::{EventKind, LendingEvent};
pub use ledger::LendingLedger;
pub use library::Library;
pub use membership::Membership;
pub use observers::{LendingObserver, NotificationService, TransitionLogger};
pub use persistence::Snapshot;
pub use query::{QueryEngine, Statistics};
pub use report::{Describe, Report};
