//! `shelf demo` — walk through the stock catalog.

use anyhow::{Context, Result};
use clap::Args;

use shelf_core::{BookId, BorrowerId, CatalogSeed};

use super::{report::print_catalog, search::print_matches};

const DEMO_QUERY: &str = "ju";

/// Arguments for `shelf demo` (none; the walkthrough is fixed).
#[derive(Args, Debug)]
pub struct DemoArgs {}

impl DemoArgs {
    pub fn run(self) -> Result<()> {
        let mut library = CatalogSeed::demo()
            .build()
            .context("failed to build demo catalog")?;
        print_catalog(&library);

        let (book, borrower) = (BookId::from("3"), BorrowerId::from("2"));
        library
            .return_book(&book, &borrower)
            .with_context(|| format!("borrower {borrower} could not return book {book}"))?;
        println!("✓ Borrower {borrower} returned book {book}");
        print_catalog(&library);

        print_matches(&library, DEMO_QUERY)
    }
}
