use std::collections::BTreeMap;

use crate::{
    book::Book,
    borrower::Borrower,
    events::{EventKind, LendingEvent},
    query::Statistics,
};

/// Anything that can summarize itself on one line
pub trait Describe {
    /// One-line human-readable description
    fn describe(&self) -> String;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl Describe for Book {
    fn describe(&self) -> String {
        let adaptation =
            self.adaptation().map(|a| format!(" - Adapted as: {a}")).unwrap_or_default();
        let status = if self.is_available() { "Available" } else { "On loan" };
        format!(
            "'{}' by {} - {} - ISBN: {}{adaptation} - {status}",
            self.title(),
            self.author(),
            self.category(),
            self.isbn()
        )
    }
}

impl Describe for Borrower {
    fn describe(&self) -> String {
        format!("Borrower: {} (ID: {}) - Books on loan: {}", self.name(), self.id(), self.loans().len())
    }
}

impl Describe for LendingEvent {
    fn describe(&self) -> String {
        let verb = match self.kind() {
            EventKind::Loan => "loaned to",
            EventKind::Return => "returned by",
        };
        format!(
            "#{} {} {verb} {} at {}",
            self.sequence(),
            self.isbn(),
            self.borrower_id(),
            self.recorded_at().format("%Y-%m-%d %H:%M:%S")
        )
    }
}

/// Text renderings of query results
#[derive(Debug)]
pub struct Report;

impl Report {
    /// Numbered list of descriptions, or `empty` when there is nothing to list
    #[must_use]
    pub fn numbered<T: Describe>(items: &[T], empty: &str) -> String {
        if items.is_empty() {
            return empty.to_string();
        }
        let mut out = String::new();
        for (i, item) in items.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i.saturating_add(1), item.describe()));
        }
        out
    }

    /// Statistics block with both histograms
    #[must_use]
    pub fn statistics(stats: &Statistics) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total books: {}\n", stats.total_books));
        out.push_str(&format!("Available books: {}\n", stats.available_books));
        out.push_str(&format!("Loaned books: {}\n", stats.loaned_books));
        out.push_str(&format!("Loan percentage: {:.2}%\n", stats.loan_percentage));
        out.push_str(&format!("Registered borrowers: {}\n", stats.borrowers));
        out.push_str(&format!("Recorded transitions: {}\n", stats.events_recorded));

        if !stats.categories.is_empty() {
            out.push_str("\nBooks by category:\n");
            for (category, count) in &stats.categories {
                out.push_str(&format!("- {category}: {count}\n"));
            }
        }
        if !stats.adaptations.is_empty() {
            out.push_str("\nBooks by adaptation:\n");
            for (adaptation, count) in &stats.adaptations {
                out.push_str(&format!("- {adaptation}: {count}\n"));
            }
        }
        out
    }

    /// Books listed under each adaptation heading
    #[must_use]
    pub fn adaptations(groups: &BTreeMap<&str, Vec<&Book>>) -> String {
        if groups.is_empty() {
            return "No books with a recorded adaptation.".to_string();
        }
        let mut out = String::new();
        let mut total = 0_usize;
        for (adaptation, books) in groups {
            out.push_str(&format!("== {} ==\n", adaptation.to_uppercase()));
            for (i, book) in books.iter().enumerate() {
                out.push_str(&format!("{}. {} by {}\n", i.saturating_add(1), book.title(), book.author()));
            }
            total = total.saturating_add(books.len());
        }
        out.push_str(&format!("\nTotal: {total} adapted books\n"));
        out
    }

    /// Generate a markdown table of the history
    #[must_use]
    pub fn history_table(events: &[LendingEvent]) -> String {
        if events.is_empty() {
            return "No transitions recorded yet.".to_string();
        }

        let mut table = String::from("| # | Event | ISBN | Borrower | When |\n");
        table.push_str("|---|-------|------|----------|------|\n");

        for event in events {
            let kind = match event.kind() {
                EventKind::Loan => "Loan",
                EventKind::Return => "Return",
            };
            table.push_str(&format!(
                "| {} | {kind} | {} | {} | {} |\n",
                event.sequence(),
                event.isbn(),
                event.borrower_id(),
                event.recorded_at().to_rfc3339()
            ));
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::{Describe, Report};
    use crate::{book::Book, library::Library};

    #[test]
    fn test_book_description_mentions_adaptation_and_status() {
        let book = Book::new("111", "Prince Caspian", "C.S. Lewis", "Fantasy")
            .with_adaptation("Prince Caspian (Film)");
        assert_eq!(
            book.describe(),
            "'Prince Caspian' by C.S. Lewis - Fantasy - ISBN: 111 - Adapted as: Prince Caspian (Film) - Available"
        );

        let plain = Book::new("222", "The Last Battle", "C.S. Lewis", "Fantasy");
        assert!(!plain.describe().contains("Adapted as"));
    }

    #[test]
    fn test_numbered_list_and_empty_message() {
        let mut library = Library::new("Test");
        library.register("Lucy Pevensie", "U1").unwrap();
        let borrowers: Vec<_> = library.membership().list().collect();

        assert_eq!(
            Report::numbered(&borrowers, "nobody"),
            "1. Borrower: Lucy Pevensie (ID: U1) - Books on loan: 0\n"
        );
        assert_eq!(Report::numbered::<Book>(&[], "nobody"), "nobody");
    }

    #[test]
    fn test_history_table_has_one_row_per_event() {
        let mut library = Library::new("Test");
        assert_eq!(Report::history_table(library.ledger().history()), "No transitions recorded yet.");

        library.register("Lucy Pevensie", "U1").unwrap();
        library.add_book(Book::new("111", "Prince Caspian", "C.S. Lewis", "Fantasy")).unwrap();
        library.loan("111", "U1").unwrap();
        library.return_book("111", "U1").unwrap();

        let table = Report::history_table(library.ledger().history());
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| 1 | Loan | 111 | U1 |"));
        assert!(table.contains("| 2 | Return | 111 | U1 |"));
    }

    #[test]
    fn test_statistics_block_formats_percentage() {
        let mut library = Library::new("Test");
        library.register("Lucy Pevensie", "U1").unwrap();
        library.add_book(Book::new("111", "Prince Caspian", "C.S. Lewis", "Fantasy")).unwrap();
        library.add_book(Book::new("222", "The Silver Chair", "C.S. Lewis", "Fantasy")).unwrap();
        library.loan("111", "U1").unwrap();

        let text = Report::statistics(&library.query().statistics());
        assert!(text.contains("Loan percentage: 50.00%"));
        assert!(text.contains("- Fantasy: 2"));
        assert!(!text.contains("Books by adaptation"));
    }
}
