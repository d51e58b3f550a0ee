/// A registered library member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borrower {
    /// Unique identifier, membership key
    id: String,
    /// Display name
    name: String,
    /// ISBNs currently held, in loan order
    loans: Vec<String>,
}

impl Borrower {
    /// Create a borrower with no loans
    pub(crate) fn new(name: &str, id: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), loans: Vec::new() }
    }

    /// The borrower's id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The borrower's name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISBNs currently on loan to this borrower, oldest first
    #[must_use]
    pub fn loans(&self) -> &[String] {
        &self.loans
    }

    /// Whether this borrower currently holds the given book
    #[must_use]
    pub fn holds(&self, isbn: &str) -> bool {
        self.loans.iter().any(|held| held == isbn)
    }

    /// Append a held ISBN
    pub(crate) fn push_loan(&mut self, isbn: &str) {
        self.loans.push(isbn.to_string());
    }

    /// Remove a held ISBN; `false` if this borrower did not hold it
    pub(crate) fn take_loan(&mut self, isbn: &str) -> bool {
        match self.loans.iter().position(|held| held == isbn) {
            Some(pos) => {
                self.loans.remove(pos);
                true
            }
            None => false,
        }
    }
}
