//! Domain types for the lending catalog.
//!
//! Cross-entity references are keys, never copies: a [`Book`] names its author
//! by [`AuthorKey`], and [`Author`] / [`Borrower`] list books by [`BookId`].
//! The [`Library`](crate::Library) owns the single live instance behind each key.

use std::fmt;

use crate::error::LibraryError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for a book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(pub String);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed identifier for a registered borrower.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BorrowerId(pub String);

impl fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BorrowerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BorrowerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Value-equality identity of an author: the `(name, nationality)` pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthorKey {
    pub name: String,
    pub nationality: String,
}

impl fmt::Display for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.nationality)
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// An author and the works registered under them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    nationality: String,
    works: Vec<BookId>,
}

impl Author {
    /// Build an author with no works. Both fields must be non-empty.
    pub fn new(
        name: impl Into<String>,
        nationality: impl Into<String>,
    ) -> Result<Self, LibraryError> {
        let name = non_empty(name.into(), "name")?;
        let nationality = non_empty(nationality.into(), "nationality")?;
        Ok(Self {
            name,
            nationality,
            works: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nationality(&self) -> &str {
        &self.nationality
    }

    /// Ids of the author's works, in insertion order.
    pub fn works(&self) -> &[BookId] {
        &self.works
    }

    pub fn key(&self) -> AuthorKey {
        AuthorKey {
            name: self.name.clone(),
            nationality: self.nationality.clone(),
        }
    }

    /// The same author with no works. Work ids only mean something inside the
    /// library that listed them, so registration starts from an empty list.
    pub(crate) fn unlisted(mut self) -> Self {
        self.works.clear();
        self
    }

    /// Append `book` to the works list. Title dedup is the library's job.
    pub(crate) fn add_work(&mut self, book: &Book) {
        self.works.push(book.id.clone());
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Author(name='{}', nationality='{}', works={})",
            self.name,
            self.nationality,
            self.works.len()
        )
    }
}

/// A catalog entry. Only `available` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: AuthorKey,
    available: bool,
}

impl Book {
    /// Books are only ever created by [`Library::add_book`](crate::Library::add_book).
    pub(crate) fn new(id: BookId, title: String, author: &Author) -> Result<Self, LibraryError> {
        let id = BookId(non_empty(id.0, "book id")?);
        let title = non_empty(title, "title")?;
        Ok(Self {
            id,
            title,
            author: author.key(),
            available: true,
        })
    }

    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Key of the canonical author in the owning library.
    pub fn author(&self) -> &AuthorKey {
        &self.author
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book(id={}, title='{}', author='{}', available={})",
            self.id, self.title, self.author.name, self.available
        )
    }
}

/// A library member and the books they currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borrower {
    id: BorrowerId,
    name: String,
    borrowed: Vec<BookId>,
}

impl Borrower {
    /// Build a borrower holding nothing. Both fields must be non-empty.
    pub fn new(id: impl Into<BorrowerId>, name: impl Into<String>) -> Result<Self, LibraryError> {
        let id = BorrowerId(non_empty(id.into().0, "borrower id")?);
        let name = non_empty(name.into(), "name")?;
        Ok(Self {
            id,
            name,
            borrowed: Vec::new(),
        })
    }

    pub fn id(&self) -> &BorrowerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Books currently checked out, oldest first.
    pub fn borrowed(&self) -> &[BookId] {
        &self.borrowed
    }

    pub fn holds(&self, book: &BookId) -> bool {
        self.borrowed.contains(book)
    }

    pub(crate) fn take(&mut self, book: BookId) {
        self.borrowed.push(book);
    }

    /// Remove `book`; returns `false` if this borrower did not hold it.
    pub(crate) fn give_back(&mut self, book: &BookId) -> bool {
        match self.borrowed.iter().position(|held| held == book) {
            Some(idx) => {
                self.borrowed.remove(idx);
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Borrower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Borrower(id={}, name='{}', borrowed={})",
            self.id,
            self.name,
            self.borrowed.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn non_empty(value: String, field: &'static str) -> Result<String, LibraryError> {
    if value.trim().is_empty() {
        return Err(LibraryError::InvalidArgument { field });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
