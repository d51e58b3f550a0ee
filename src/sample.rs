//! Demonstration data: adapted titles, a handful of borrowers and some open loans.

use crate::{book::Book, error::Result, library::Library};

/// (isbn, title, author, category, adaptation)
const BOOKS: [(&str, &str, &str, &str, &str); 12] = [
    ("9788496208964", "A Game of Thrones", "George R.R. Martin", "Epic Fantasy", "Game of Thrones (HBO)"),
    ("9788427202122", "The Hunger Games", "Suzanne Collins", "Dystopia/Adventure", "The Hunger Games (Film)"),
    (
        "9788478884452",
        "Harry Potter and the Philosopher's Stone",
        "J.K. Rowling",
        "Young Adult Fantasy",
        "Harry Potter (Film series)",
    ),
    ("9788445073803", "The Hobbit", "J.R.R. Tolkien", "Fantasy", "The Hobbit (Film trilogy)"),
    ("9788498890785", "The Witcher: The Last Wish", "Andrzej Sapkowski", "Fantasy", "The Witcher (Netflix)"),
    ("9788497594257", "Foundation", "Isaac Asimov", "Science Fiction", "Foundation (Apple TV+)"),
    ("9788498387087", "Outlander", "Diana Gabaldon", "Historical Romance", "Outlander (STARZ)"),
    ("9788498005516", "American Gods", "Neil Gaiman", "Contemporary Fantasy", "American Gods (STARZ)"),
    ("9788496940000", "Altered Carbon", "Richard Morgan", "Science Fiction", "Altered Carbon (Netflix)"),
    (
        "9788448006426",
        "Good Omens",
        "Terry Pratchett and Neil Gaiman",
        "Comic Fantasy",
        "Good Omens (Amazon Prime)",
    ),
    ("9788423353897", "The Handmaid's Tale", "Margaret Atwood", "Dystopia", "The Handmaid's Tale (Hulu)"),
    ("9788445076538", "I Am Legend", "Richard Matheson", "Horror/Science Fiction", "I Am Legend (Film)"),
];

/// (name, id)
const BORROWERS: [(&str, &str); 5] = [
    ("Ana Garcia", "U001"),
    ("Carlos Lopez", "U002"),
    ("Maria Rodriguez", "U003"),
    ("Pedro Sanchez", "U004"),
    ("Laura Martinez", "U005"),
];

/// (isbn, borrower id)
const LOANS: [(&str, &str); 6] = [
    ("9788498890785", "U001"),
    ("9788496208964", "U002"),
    ("9788498005516", "U003"),
    ("9788445076538", "U004"),
    ("9788423353897", "U005"),
    ("9788448006426", "U001"),
];

/// Populate a library with the demonstration data set
///
/// # Errors
///
/// Fails if the library already holds any of the sample identifiers. Records
/// added before the failing one stay in the library, so seed a fresh
/// `Library` and discard it on error.
pub fn seed(library: &mut Library) -> Result<()> {
    for (isbn, title, author, category, adaptation) in BOOKS {
        library.add_book(Book::new(isbn, title, author, category).with_adaptation(adaptation))?;
    }
    for (name, id) in BORROWERS {
        library.register(name, id)?;
    }
    for (isbn, id) in LOANS {
        library.loan(isbn, id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::seed;
    use crate::{error::ErrorKind, library::Library};

    #[test]
    fn test_seed_populates_consistent_library() {
        let mut library = Library::new("Sample");
        seed(&mut library).unwrap();

        let stats = library.query().statistics();
        assert_eq!(stats.total_books, 12);
        assert_eq!(stats.loaned_books, 6);
        assert_eq!(stats.borrowers, 5);
        assert!((stats.loan_percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(library.ledger().history().len(), 6);
        assert!(library.is_consistent());
    }

    #[test]
    fn test_seed_twice_is_rejected() {
        let mut library = Library::new("Sample");
        seed(&mut library).unwrap();
        let err = seed(&mut library).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_failed_seed_keeps_records_added_before_the_clash() {
        let mut library = Library::new("Sample");
        library.register("Someone Else", "U003").unwrap();

        let err = seed(&mut library).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
        assert_eq!(library.catalog().len(), 12);
        assert_eq!(library.membership().len(), 3);
        assert!(library.ledger().history().is_empty());
    }
}
