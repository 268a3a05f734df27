//! Catalog seeds: a declarative description of a catalog replayed into a
//! fresh [`Library`].
//!
//! ```yaml
//! books:
//!   - id: "1"
//!     title: Amos Daragon Tome 1
//!     author: { name: Julien, nationality: Canadien }
//! borrowers:
//!   - { id: "1", name: Luc }
//! loans:
//!   - { book: "1", borrower: "1" }
//! ```
//!
//! Seeds are input only. Nothing here writes a library back to disk.

use std::path::Path;

use serde::Deserialize;

use crate::error::SeedError;
use crate::library::Library;
use crate::types::{Author, BookId, Borrower, BorrowerId};

/// Root of a catalog seed file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub books: Vec<BookSeed>,
    #[serde(default)]
    pub borrowers: Vec<BorrowerSeed>,
    #[serde(default)]
    pub loans: Vec<LoanSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookSeed {
    pub id: String,
    pub title: String,
    pub author: AuthorSeed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorSeed {
    pub name: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BorrowerSeed {
    pub id: String,
    pub name: String,
}

/// A book checked out to a borrower when the seed is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoanSeed {
    pub book: String,
    pub borrower: String,
}

impl CatalogSeed {
    /// The stock demo catalog: two authors, two borrowers, two books out.
    ///
    /// Ids 3, 5 and 6 repeat titles already listed for their author, so those
    /// authors end up with fewer works than books.
    pub fn demo() -> Self {
        let julien = author("Julien", "Canadien");
        let alex = author("Alex", "Canadien");
        Self {
            books: vec![
                book("1", "Amos daragon tome 1", &julien),
                book("2", "Amos daragon tome 2", &julien),
                book("3", "Amos daragon tome 1", &julien),
                book("4", "La construction pour les nulls et ju", &alex),
                book("5", "La construction pour les nulls et ju", &alex),
                book("6", "Amos daragon tome 1", &alex),
            ],
            borrowers: vec![
                BorrowerSeed {
                    id: "1".into(),
                    name: "Luc".into(),
                },
                BorrowerSeed {
                    id: "2".into(),
                    name: "Charles".into(),
                },
            ],
            loans: vec![
                LoanSeed {
                    book: "1".into(),
                    borrower: "1".into(),
                },
                LoanSeed {
                    book: "3".into(),
                    borrower: "2".into(),
                },
            ],
        }
    }

    /// Replay the seed through the public library operations, in order:
    /// books, then borrowers, then loans.
    pub fn build(&self) -> Result<Library, SeedError> {
        let mut library = Library::new();
        for entry in &self.books {
            let author = Author::new(entry.author.name.as_str(), entry.author.nationality.as_str())?;
            library.add_book(entry.id.as_str(), entry.title.as_str(), author)?;
        }
        for entry in &self.borrowers {
            library.add_borrower(Borrower::new(entry.id.as_str(), entry.name.as_str())?)?;
        }
        for loan in &self.loans {
            library.checkout(
                &BookId::from(loan.book.as_str()),
                &BorrowerId::from(loan.borrower.as_str()),
            )?;
        }
        tracing::debug!(
            books = library.book_count(),
            authors = library.author_count(),
            borrowers = library.borrower_count(),
            "catalog seed built"
        );
        Ok(library)
    }
}

/// Load a seed from a YAML file.
///
/// Returns `SeedError::SeedNotFound` if absent,
/// `SeedError::Parse` (with path + line context) if malformed YAML.
pub fn load_seed_at(path: &Path) -> Result<CatalogSeed, SeedError> {
    if !path.exists() {
        return Err(SeedError::SeedNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| SeedError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn author(name: &str, nationality: &str) -> AuthorSeed {
    AuthorSeed {
        name: name.into(),
        nationality: nationality.into(),
    }
}

fn book(id: &str, title: &str, author: &AuthorSeed) -> BookSeed {
    BookSeed {
        id: id.into(),
        title: title.into(),
        author: author.clone(),
    }
}
