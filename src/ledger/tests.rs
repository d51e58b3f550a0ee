use std::rc::Rc;

use crate::{
    book::Book,
    catalog::Catalog,
    error::{ErrorKind, LibraryError},
    events::EventKind,
    ledger::LendingLedger,
    membership::Membership,
    observers::NotificationService,
};

/// Helper function to set up two books and two borrowers
fn setup_parts() -> (Catalog, Membership, LendingLedger) {
    let mut catalog = Catalog::new();
    catalog.add(Book::new("111", "The Magician's Nephew", "C.S. Lewis", "Fantasy")).unwrap();
    catalog.add(Book::new("222", "Prince Caspian", "C.S. Lewis", "Fantasy")).unwrap();

    let mut membership = Membership::new();
    membership.register("Digory Kirke", "U1").unwrap();
    membership.register("Polly Plummer", "U2").unwrap();

    (catalog, membership, LendingLedger::new())
}

#[test]
fn test_loan_flips_availability_and_records_event() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();

    ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap();

    assert!(!catalog.get("111").unwrap().is_available());
    assert_eq!(membership.get("U1").unwrap().loans(), ["111".to_string()]);
    assert_eq!(ledger.history().len(), 1);

    let event = ledger.history().first().unwrap();
    assert_eq!(event.sequence(), 1);
    assert_eq!(event.kind(), EventKind::Loan);
    assert_eq!(event.isbn(), "111");
    assert_eq!(event.borrower_id(), "U1");
}

#[test]
fn test_loan_unknown_book_or_borrower() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();

    let err = ledger.loan(&mut catalog, &mut membership, "999", "U1").unwrap_err();
    assert_eq!(err, LibraryError::book_not_found("999"));

    let err = ledger.loan(&mut catalog, &mut membership, "111", "U9").unwrap_err();
    assert_eq!(err, LibraryError::borrower_not_found("U9"));

    // Nothing moved
    assert!(catalog.get("111").unwrap().is_available());
    assert!(ledger.history().is_empty());
}

#[test]
fn test_second_loan_is_already_loaned() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();
    ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap();

    let err = ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap_err();
    assert_eq!(err, LibraryError::AlreadyLoaned { isbn: "111".to_string() });

    let err = ledger.loan(&mut catalog, &mut membership, "111", "U2").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyLoaned);

    assert_eq!(membership.get("U1").unwrap().loans().len(), 1);
    assert!(membership.get("U2").unwrap().loans().is_empty());
    assert_eq!(ledger.history().len(), 1);
}

#[test]
fn test_loan_then_return_round_trip() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();
    let catalog_before = catalog.clone();
    let membership_before = membership.clone();

    ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap();
    ledger.return_book(&mut catalog, &mut membership, "111", "U1").unwrap();

    assert_eq!(catalog.list().collect::<Vec<_>>(), catalog_before.list().collect::<Vec<_>>());
    assert_eq!(
        membership.list().collect::<Vec<_>>(),
        membership_before.list().collect::<Vec<_>>()
    );

    let kinds: Vec<EventKind> = ledger.history().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![EventKind::Loan, EventKind::Return]);
    let sequences: Vec<u64> = ledger.history().iter().map(|e| e.sequence()).collect();
    assert_eq!(sequences, vec![1, 2]);
}

#[test]
fn test_return_is_scoped_to_named_borrower() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();
    ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap();

    // U2 is registered but does not hold 111
    let err = ledger.return_book(&mut catalog, &mut membership, "111", "U2").unwrap_err();
    assert_eq!(
        err,
        LibraryError::NotOnLoan { isbn: "111".to_string(), borrower_id: "U2".to_string() }
    );

    assert!(!catalog.get("111").unwrap().is_available());
    assert_eq!(membership.get("U1").unwrap().loans(), ["111".to_string()]);
    assert_eq!(ledger.history().len(), 1);
}

#[test]
fn test_return_of_book_on_shelf_is_not_on_loan() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();

    let err = ledger.return_book(&mut catalog, &mut membership, "222", "U1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotOnLoan);
    assert!(catalog.get("222").unwrap().is_available());
    assert!(ledger.history().is_empty());
}

#[test]
fn test_return_unknown_book_or_borrower() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();
    ledger.loan(&mut catalog, &mut membership, "111", "U1").unwrap();

    let err = ledger.return_book(&mut catalog, &mut membership, "999", "U1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = ledger.return_book(&mut catalog, &mut membership, "111", "U9").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_observers_are_notified_of_committed_transitions_only() {
    let (mut catalog, mut membership, mut ledger) = setup_parts();
    let notifications = Rc::new(NotificationService::new());
    ledger.register_observer(notifications.clone());

    ledger.loan(&mut catalog, &mut membership, "222", "U2").unwrap();
    drop(ledger.loan(&mut catalog, &mut membership, "222", "U1"));
    ledger.return_book(&mut catalog, &mut membership, "222", "U2").unwrap();

    assert_eq!(
        notifications.sent(),
        vec![
            "'Prince Caspian' has been loaned to Polly Plummer".to_string(),
            "'Prince Caspian' has been returned by Polly Plummer".to_string(),
        ]
    );
}
