//! Command-line front end for the lending library.

use std::{path::PathBuf, process::ExitCode, rc::Rc};

use clap::{Parser, Subcommand};
use colored::Colorize;
use lending_library::{
    Book, Describe, Library, LibraryConfig, NotificationService, Report, Result, Snapshot,
    TransitionLogger, sample,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for the lending library
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, default_value = "library.config.json")]
    config: PathBuf,

    /// Snapshot file, overriding the configured one
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Name for a newly created library, overriding the configured one
    #[arg(long)]
    name: Option<String>,

    /// Operation to run
    #[command(subcommand)]
    command: Command,
}

/// One library operation per invocation
#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted loan/return walk-through on the sample data
    Demo,
    /// List every book
    Books,
    /// List every borrower
    Borrowers,
    /// Add a book to the catalog
    AddBook {
        /// Unique ISBN
        isbn: String,
        /// Title
        title: String,
        /// Author
        author: String,
        /// Category
        category: String,
        /// Screen adaptation, if any
        #[arg(long)]
        adaptation: Option<String>,
    },
    /// Remove a book that is on the shelf
    RemoveBook {
        /// ISBN of the book
        isbn: String,
    },
    /// Change a book's category
    SetCategory {
        /// ISBN of the book
        isbn: String,
        /// New category
        category: String,
    },
    /// Set or clear a book's adaptation
    SetAdaptation {
        /// ISBN of the book
        isbn: String,
        /// New adaptation; omit to clear it
        adaptation: Option<String>,
    },
    /// Register a borrower
    Register {
        /// Unique borrower id
        id: String,
        /// Borrower name
        name: String,
    },
    /// Deregister a borrower with no open loans
    Deregister {
        /// Borrower id
        id: String,
    },
    /// Lend a book
    Loan {
        /// ISBN of the book
        isbn: String,
        /// Borrower id
        borrower: String,
    },
    /// Take a book back from the borrower holding it
    Return {
        /// ISBN of the book
        isbn: String,
        /// Borrower id
        borrower: String,
    },
    /// Search the catalog
    Search {
        /// Title contains
        #[arg(long)]
        title: Option<String>,
        /// Author contains
        #[arg(long)]
        author: Option<String>,
        /// Category equals
        #[arg(long)]
        category: Option<String>,
        /// Adaptation contains
        #[arg(long)]
        adaptation: Option<String>,
        /// Exact ISBN
        #[arg(long)]
        isbn: Option<String>,
    },
    /// List books on the shelf
    Available,
    /// List books out on loan
    Loaned,
    /// List the books a borrower holds
    Loans {
        /// Borrower id
        id: String,
    },
    /// Show library statistics
    Stats,
    /// List books grouped by adaptation
    Adaptations,
    /// Show the lending history
    History,
}

impl Command {
    /// Whether the command changes the store and needs saving
    fn mutates(&self) -> bool {
        matches!(
            self,
            Self::AddBook { .. }
                | Self::RemoveBook { .. }
                | Self::SetCategory { .. }
                | Self::SetAdaptation { .. }
                | Self::Register { .. }
                | Self::Deregister { .. }
                | Self::Loan { .. }
                | Self::Return { .. }
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match LibraryConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Open the store, run one command, save if it changed anything
fn run(cli: Cli, config: &LibraryConfig) -> Result<()> {
    let name = cli.name.unwrap_or_else(|| config.library_name.clone());

    if matches!(cli.command, Command::Demo) {
        return demo(&name);
    }

    let snapshot_path = cli.snapshot.unwrap_or_else(|| config.snapshot_path.clone());
    let mut library = if snapshot_path.exists() {
        Snapshot::load_from_file(&snapshot_path)?.restore()?
    } else {
        let mut library = Library::new(&name);
        if config.seed_sample_data {
            sample::seed(&mut library)?;
        }
        library
    };

    let notifications = Rc::new(NotificationService::new());
    library.register_observer(Rc::new(TransitionLogger));
    library.register_observer(notifications.clone());

    let mutates = cli.command.mutates();
    execute(&mut library, cli.command)?;

    for notice in notifications.sent() {
        println!("{} {notice}", "notice:".cyan());
    }
    if mutates {
        Snapshot::capture(&library).save_to_file(&snapshot_path)?;
    }
    Ok(())
}

/// Dispatch a single command against an open library
fn execute(library: &mut Library, command: Command) -> Result<()> {
    match command {
        Command::Demo => demo(library.name())?,
        Command::Books => {
            let books: Vec<&Book> = library.catalog().list().collect();
            println!("{}", format!("Catalog of {}", library.name()).bold());
            print!("{}", Report::numbered(&books, "No books in the library.\n"));
        }
        Command::Borrowers => {
            let borrowers: Vec<_> = library.membership().list().collect();
            print!("{}", Report::numbered(&borrowers, "No registered borrowers.\n"));
        }
        Command::AddBook { isbn, title, author, category, adaptation } => {
            let mut book = Book::new(&isbn, &title, &author, &category);
            if let Some(adaptation) = adaptation {
                book = book.with_adaptation(&adaptation);
            }
            library.add_book(book)?;
            success(&format!("Book {isbn} added"));
        }
        Command::RemoveBook { isbn } => {
            let book = library.remove_book(&isbn)?;
            success(&format!("Removed '{}'", book.title()));
        }
        Command::SetCategory { isbn, category } => {
            library.set_category(&isbn, &category)?;
            success(&format!("Book {isbn} is now filed under {category}"));
        }
        Command::SetAdaptation { isbn, adaptation } => {
            library.set_adaptation(&isbn, adaptation.as_deref())?;
            success(&format!("Adaptation of book {isbn} updated"));
        }
        Command::Register { id, name } => {
            library.register(&name, &id)?;
            success(&format!("Borrower {id} registered"));
        }
        Command::Deregister { id } => {
            let borrower = library.deregister(&id)?;
            success(&format!("{} deregistered", borrower.name()));
        }
        Command::Loan { isbn, borrower } => {
            library.loan(&isbn, &borrower)?;
            success(&format!("Book {isbn} loaned to {borrower}"));
        }
        Command::Return { isbn, borrower } => {
            library.return_book(&isbn, &borrower)?;
            success(&format!("Book {isbn} returned by {borrower}"));
        }
        Command::Search { title, author, category, adaptation, isbn } => {
            let catalog = library.catalog();
            let results: Vec<&Book> = if let Some(isbn) = isbn {
                catalog.get(&isbn).ok().into_iter().collect()
            } else if let Some(title) = title {
                catalog.find_by_title(&title)
            } else if let Some(author) = author {
                catalog.find_by_author(&author)
            } else if let Some(category) = category {
                catalog.find_by_category(&category)
            } else if let Some(adaptation) = adaptation {
                catalog.find_by_adaptation(&adaptation)
            } else {
                catalog.list().collect()
            };
            print!("{}", Report::numbered(&results, "No results found.\n"));
        }
        Command::Available => {
            let books = library.query().available_books();
            print!("{}", Report::numbered(&books, "No books available.\n"));
            println!("Total: {} available", books.len());
        }
        Command::Loaned => {
            let books = library.query().loaned_books();
            print!("{}", Report::numbered(&books, "No books on loan.\n"));
            println!("Total: {} on loan", books.len());
        }
        Command::Loans { id } => {
            let borrower = library.membership().get(&id)?;
            println!("{}", borrower.describe().bold());
            let books = library.query().borrower_loans(&id);
            print!("{}", Report::numbered(&books, "No books on loan.\n"));
        }
        Command::Stats => {
            println!("{}", format!("Statistics for {}", library.name()).bold());
            print!("{}", Report::statistics(&library.query().statistics()));
        }
        Command::Adaptations => {
            print!("{}", Report::adaptations(&library.query().books_by_adaptation()));
        }
        Command::History => {
            print!("{}", Report::history_table(library.ledger().history()));
        }
    }
    Ok(())
}

/// Walk through a loan, a rejected second loan, a return and a removal
fn demo(name: &str) -> Result<()> {
    println!("{}", "Lending Library Demonstration".green().bold());
    println!("=====================================\n");

    let mut library = Library::new(name);
    let notifications = Rc::new(NotificationService::new());
    library.register_observer(notifications.clone());
    sample::seed(&mut library)?;
    print!("{}", Report::statistics(&library.query().statistics()));

    println!("{}", "\nLending a book that is on the shelf...".yellow().bold());
    library.register("Lucy Pevensie", "U1")?;
    library.add_book(
        Book::new("111", "The Lion, the Witch and the Wardrobe", "C.S. Lewis", "Fantasy")
            .with_adaptation("The Chronicles of Narnia (Film)"),
    )?;
    library.loan("111", "U1")?;
    println!("{}", library.catalog().get("111")?.describe());

    println!("{}", "\nLending it again...".yellow().bold());
    if let Err(err) = library.loan("111", "U1") {
        println!("Rejected: {err}");
    }

    println!("{}", "\nReturning and removing it...".yellow().bold());
    library.return_book("111", "U1")?;
    let removed = library.remove_book("111")?;
    println!("Removed: {}", removed.describe());

    println!("{}", "\nNotifications:".yellow().bold());
    for notice in notifications.sent() {
        println!("- {notice}");
    }

    println!("\n{}", "History:".yellow().bold());
    print!("{}", Report::history_table(library.ledger().history()));

    println!("\n{}", "Demonstration complete!".green().bold());
    Ok(())
}

/// Print a success line
fn success(message: &str) {
    println!("{} {message}", "ok:".green().bold());
}
