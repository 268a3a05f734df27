//! `shelf search <query>` — title / author lookup.

use anyhow::{bail, Context, Result};
use clap::Args;
use tabled::{settings::Style, Table};

use shelf_core::{Library, LibraryError};

use super::report::{BookJson, BookRow};
use super::CatalogArgs;

/// Arguments for `shelf search`.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Substring of a title or an author name.
    pub query: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn run(self) -> Result<()> {
        let library = self.catalog.load()?;
        if self.json {
            return print_json(&library, &self.query);
        }
        print_matches(&library, &self.query)
    }
}

fn print_json(library: &Library, query: &str) -> Result<()> {
    let books: Vec<BookJson> = match library.search(query) {
        Ok(found) => found
            .values()
            .map(|b| BookJson::from_book(library, b))
            .collect(),
        Err(LibraryError::NotFound { .. }) => bail!("no book matches '{query}'"),
        Err(err) => return Err(err.into()),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&books).context("failed to serialize search JSON")?
    );
    Ok(())
}

/// Print matches as a table; no match is an error.
pub(crate) fn print_matches(library: &Library, query: &str) -> Result<()> {
    let found = library
        .search(query)
        .with_context(|| format!("no book matches '{query}'"))?;

    println!("{} match(es) for '{query}'", found.len());
    let rows: Vec<BookRow> = found
        .values()
        .map(|b| BookRow::from_book(library, b))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
