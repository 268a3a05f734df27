//! Shelf core library — catalog types, lending operations, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the `Author` / `Book` / `Borrower` entities
//! - [`library`] — [`Library`], the catalog orchestrator
//! - [`seed`] — declarative catalogs replayed into a fresh library
//! - [`error`] — [`LibraryError`], [`SeedError`]

pub mod error;
pub mod library;
pub mod seed;
pub mod types;

pub use error::{LibraryError, SeedError};
pub use library::Library;
pub use seed::{load_seed_at, CatalogSeed};
pub use types::{Author, AuthorKey, Book, BookId, Borrower, BorrowerId};
