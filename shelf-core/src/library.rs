//! The catalog orchestrator.
//!
//! [`Library`] owns every [`Book`], [`Author`] and [`Borrower`]. Entities refer
//! to each other by key, so there is exactly one live instance of each and a
//! state change (a book going out, a work being appended) is visible through
//! every path that reaches it.
//!
//! All mutating operations take `&mut self`: the whole library is a single
//! critical section, and every check-then-act sequence below runs to completion
//! before anything else can observe the maps.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::LibraryError;
use crate::types::{Author, AuthorKey, Book, BookId, Borrower, BorrowerId};

/// Books, authors and borrowers, plus the lending rules that tie them together.
#[derive(Debug, Default, Clone)]
pub struct Library {
    books: BTreeMap<BookId, Book>,
    authors: BTreeMap<AuthorKey, Author>,
    borrowers: BTreeMap<BorrowerId, Borrower>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // 1. Registration
    // -----------------------------------------------------------------------

    /// Add a book written by `author`.
    ///
    /// If an author with the same `(name, nationality)` is already registered,
    /// the passed-in value is dropped and the book is bound to the registered
    /// instance. The work is appended to the author's works unless a work with
    /// the same title is already listed.
    ///
    /// The id is checked before the author registry is touched, so a rejected
    /// call leaves the library exactly as it was.
    pub fn add_book(
        &mut self,
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: Author,
    ) -> Result<(), LibraryError> {
        let book = Book::new(id.into(), title.into(), &author)?;
        if self.books.contains_key(book.id()) {
            return Err(LibraryError::DuplicateKey {
                kind: "book",
                id: book.id().0.clone(),
            });
        }

        let canonical = match self.authors.entry(author.key()) {
            Entry::Occupied(entry) => {
                debug!(author = %entry.key(), "reusing registered author");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                debug!(author = %entry.key(), "registering author");
                entry.insert(author.unlisted())
            }
        };

        let title_listed = canonical
            .works()
            .iter()
            .filter_map(|work| self.books.get(work))
            .any(|work| work.title() == book.title());
        if !title_listed {
            canonical.add_work(&book);
        }

        debug!(book = %book.id(), title = book.title(), "book added");
        self.books.insert(book.id().clone(), book);
        Ok(())
    }

    /// Register a borrower. Rejects an id that is already taken.
    pub fn add_borrower(&mut self, borrower: Borrower) -> Result<(), LibraryError> {
        match self.borrowers.entry(borrower.id().clone()) {
            Entry::Occupied(entry) => Err(LibraryError::DuplicateKey {
                kind: "borrower",
                id: entry.key().0.clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(borrower = %entry.key(), name = borrower.name(), "borrower added");
                entry.insert(borrower);
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // 2. Search
    // -----------------------------------------------------------------------

    /// Case-insensitive substring match on book title or author name.
    ///
    /// An empty result is reported as [`LibraryError::NotFound`] rather than an
    /// empty map; callers for whom zero matches is fine should match on it.
    pub fn search(&self, query: &str) -> Result<BTreeMap<BookId, &Book>, LibraryError> {
        let needle = query.to_lowercase();
        let found: BTreeMap<BookId, &Book> = self
            .books
            .iter()
            .filter(|(_, book)| {
                book.title().to_lowercase().contains(&needle)
                    || book.author().name.to_lowercase().contains(&needle)
            })
            .map(|(id, book)| (id.clone(), book))
            .collect();

        if found.is_empty() {
            return Err(LibraryError::NotFound {
                kind: "book matching",
                id: query.to_owned(),
            });
        }
        debug!(query, matches = found.len(), "search");
        Ok(found)
    }

    // -----------------------------------------------------------------------
    // 3. Lending
    // -----------------------------------------------------------------------

    /// Lend `book_id` to `borrower_id`.
    ///
    /// Fails with `NotFound` for an unknown borrower, then for an unknown book,
    /// then with `InvalidState` if the book is already out.
    pub fn checkout(
        &mut self,
        book_id: &BookId,
        borrower_id: &BorrowerId,
    ) -> Result<(), LibraryError> {
        let borrower = self
            .borrowers
            .get_mut(borrower_id)
            .ok_or_else(|| not_found("borrower", &borrower_id.0))?;
        let book = self
            .books
            .get_mut(book_id)
            .ok_or_else(|| not_found("book", &book_id.0))?;
        if !book.is_available() {
            return Err(LibraryError::InvalidState {
                id: book_id.0.clone(),
                reason: "is not available",
            });
        }

        borrower.take(book_id.clone());
        book.set_available(false);
        info!(book = %book_id, borrower = %borrower_id, "checked out");
        Ok(())
    }

    /// Take `book_id` back from `borrower_id`.
    ///
    /// Same existence checks as [`checkout`](Self::checkout). Fails with
    /// `InvalidState` if the book is not out, or is out with someone else.
    pub fn return_book(
        &mut self,
        book_id: &BookId,
        borrower_id: &BorrowerId,
    ) -> Result<(), LibraryError> {
        let borrower = self
            .borrowers
            .get_mut(borrower_id)
            .ok_or_else(|| not_found("borrower", &borrower_id.0))?;
        let book = self
            .books
            .get_mut(book_id)
            .ok_or_else(|| not_found("book", &book_id.0))?;
        if book.is_available() {
            return Err(LibraryError::InvalidState {
                id: book_id.0.clone(),
                reason: "was not checked out",
            });
        }
        if !borrower.give_back(book_id) {
            return Err(LibraryError::InvalidState {
                id: book_id.0.clone(),
                reason: "is held by another borrower",
            });
        }

        book.set_available(true);
        info!(book = %book_id, borrower = %borrower_id, "returned");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 4. Read access
    // -----------------------------------------------------------------------

    pub fn book(&self, id: &BookId) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn borrower(&self, id: &BorrowerId) -> Option<&Borrower> {
        self.borrowers.get(id)
    }

    pub fn author(&self, key: &AuthorKey) -> Option<&Author> {
        self.authors.get(key)
    }

    /// The canonical author instance a book is bound to.
    pub fn author_of(&self, book: &Book) -> Option<&Author> {
        self.authors.get(book.author())
    }

    /// Resolve an author's works to the books themselves, in insertion order.
    pub fn works_of(&self, author: &Author) -> Vec<&Book> {
        author
            .works()
            .iter()
            .filter_map(|id| self.books.get(id))
            .collect()
    }

    /// The borrower currently holding `book_id`, if it is out.
    pub fn holder_of(&self, book_id: &BookId) -> Option<&Borrower> {
        self.borrowers.values().find(|b| b.holds(book_id))
    }

    /// All books, ordered by id.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All authors, ordered by `(name, nationality)`.
    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    /// All borrowers, ordered by id.
    pub fn borrowers(&self) -> impl Iterator<Item = &Borrower> {
        self.borrowers.values()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn borrower_count(&self) -> usize {
        self.borrowers.len()
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn not_found(kind: &'static str, id: &str) -> LibraryError {
    LibraryError::NotFound {
        kind,
        id: id.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn author(name: &str) -> Author {
        Author::new(name, "Canadien").expect("author")
    }

    fn bid(id: &str) -> BookId {
        BookId::from(id)
    }

    fn uid(id: &str) -> BorrowerId {
        BorrowerId::from(id)
    }

    fn lending_library() -> Library {
        let mut lib = Library::new();
        lib.add_book("1", "Amos Daragon Tome 1", author("Julien"))
            .expect("add book");
        lib.add_borrower(Borrower::new("1", "Luc").expect("borrower"))
            .expect("add borrower");
        lib.add_borrower(Borrower::new("2", "Charles").expect("borrower"))
            .expect("add borrower");
        lib
    }

    #[test]
    fn add_book_registers_author_once() {
        let mut lib = Library::new();
        lib.add_book("1", "Amos Daragon Tome 1", author("Julien")).expect("1");
        lib.add_book("2", "Amos Daragon Tome 2", author("Julien")).expect("2");
        assert_eq!(lib.author_count(), 1);
        let julien = lib.author(&author("Julien").key()).expect("registered");
        assert_eq!(julien.works(), &[bid("1"), bid("2")]);
    }

    #[test]
    fn invalid_title_does_not_register_author() {
        let mut lib = Library::new();
        let err = lib.add_book("1", "", author("Julien")).unwrap_err();
        assert_eq!(err, LibraryError::InvalidArgument { field: "title" });
        assert_eq!(lib.author_count(), 0);
        assert_eq!(lib.book_count(), 0);
    }

    #[test]
    fn add_borrower_rejects_duplicate_id() {
        let mut lib = lending_library();
        let err = lib
            .add_borrower(Borrower::new("1", "Someone").expect("borrower"))
            .unwrap_err();
        assert_eq!(
            err,
            LibraryError::DuplicateKey {
                kind: "borrower",
                id: "1".into()
            }
        );
        assert_eq!(lib.borrower(&uid("1")).map(Borrower::name), Some("Luc"));
    }

    #[test]
    fn checkout_checks_borrower_before_book() {
        let mut lib = lending_library();
        let err = lib.checkout(&bid("99"), &uid("99")).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { kind: "borrower", .. }));
        let err = lib.checkout(&bid("99"), &uid("1")).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { kind: "book", .. }));
    }

    #[test]
    fn return_by_wrong_borrower_leaves_loan_intact() {
        let mut lib = lending_library();
        lib.checkout(&bid("1"), &uid("1")).expect("checkout");
        let err = lib.return_book(&bid("1"), &uid("2")).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidState { .. }));
        assert!(!lib.book(&bid("1")).expect("book").is_available());
        assert_eq!(lib.holder_of(&bid("1")).map(Borrower::id), Some(&uid("1")));
    }

    #[test]
    fn holder_of_tracks_loans() {
        let mut lib = lending_library();
        assert!(lib.holder_of(&bid("1")).is_none());
        lib.checkout(&bid("1"), &uid("2")).expect("checkout");
        assert_eq!(lib.holder_of(&bid("1")).map(Borrower::name), Some("Charles"));
        lib.return_book(&bid("1"), &uid("2")).expect("return");
        assert!(lib.holder_of(&bid("1")).is_none());
    }

    #[test]
    fn search_error_names_the_query() {
        let lib = lending_library();
        let err = lib.search("Non Existant Book").unwrap_err();
        assert!(err.to_string().contains("Non Existant Book"), "got: {err}");
    }
}
