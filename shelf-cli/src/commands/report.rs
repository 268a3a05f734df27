//! `shelf report` — catalog overview.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use shelf_core::{Book, Library};

use super::CatalogArgs;

/// Arguments for `shelf report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    pub fn run(self) -> Result<()> {
        let library = self.catalog.load()?;
        if self.json {
            return print_json(&library);
        }
        print_catalog(&library);
        Ok(())
    }
}

#[derive(Serialize)]
struct ReportJson {
    summary: SummaryJson,
    authors: Vec<AuthorJson>,
    books: Vec<BookJson>,
    borrowers: Vec<BorrowerJson>,
}

#[derive(Serialize)]
struct SummaryJson {
    books: usize,
    authors: usize,
    borrowers: usize,
    on_loan: usize,
}

#[derive(Serialize)]
struct AuthorJson {
    name: String,
    nationality: String,
    works: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct BookJson {
    id: String,
    title: String,
    author: String,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    borrower: Option<String>,
}

#[derive(Serialize)]
struct BorrowerJson {
    id: String,
    name: String,
    borrowed: Vec<String>,
}

#[derive(Tabled)]
pub(crate) struct BookRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "author")]
    author: String,
    #[tabled(rename = "status")]
    status: String,
}

#[derive(Tabled)]
struct BorrowerRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "borrowed")]
    borrowed: String,
}

impl BookJson {
    pub(crate) fn from_book(library: &Library, book: &Book) -> Self {
        Self {
            id: book.id().0.clone(),
            title: book.title().to_owned(),
            author: book.author().name.clone(),
            available: book.is_available(),
            borrower: library.holder_of(book.id()).map(|b| b.id().0.clone()),
        }
    }
}

impl BookRow {
    pub(crate) fn from_book(library: &Library, book: &Book) -> Self {
        let status = match library.holder_of(book.id()) {
            Some(holder) => format!("{} out ({})", "■".red().bold(), holder.name()),
            None => format!("{} available", "■".green().bold()),
        };
        Self {
            id: book.id().0.clone(),
            title: book.title().to_owned(),
            author: book.author().to_string(),
            status,
        }
    }
}

fn print_json(library: &Library) -> Result<()> {
    let payload = ReportJson {
        summary: SummaryJson {
            books: library.book_count(),
            authors: library.author_count(),
            borrowers: library.borrower_count(),
            on_loan: library.books().filter(|b| !b.is_available()).count(),
        },
        authors: library
            .authors()
            .map(|a| AuthorJson {
                name: a.name().to_owned(),
                nationality: a.nationality().to_owned(),
                works: library
                    .works_of(a)
                    .into_iter()
                    .map(|w| w.title().to_owned())
                    .collect(),
            })
            .collect(),
        books: library
            .books()
            .map(|b| BookJson::from_book(library, b))
            .collect(),
        borrowers: library
            .borrowers()
            .map(|b| BorrowerJson {
                id: b.id().0.clone(),
                name: b.name().to_owned(),
                borrowed: b.borrowed().iter().map(|id| id.0.clone()).collect(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize report JSON")?
    );
    Ok(())
}

/// Human-readable catalog overview: books, works per author, borrowers.
pub(crate) fn print_catalog(library: &Library) {
    let on_loan = library.books().filter(|b| !b.is_available()).count();
    println!(
        "Shelf v{} | {} books | {} authors | {} borrowers | {} on loan",
        env!("CARGO_PKG_VERSION"),
        library.book_count(),
        library.author_count(),
        library.borrower_count(),
        on_loan,
    );

    let separator = "■".repeat(67).bright_black().to_string();
    println!("{separator}");

    if library.book_count() == 0 {
        println!("No books registered.");
    } else {
        println!("{}", "BOOKS".bold());
        let rows: Vec<BookRow> = library
            .books()
            .map(|b| BookRow::from_book(library, b))
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    println!("{separator}");

    println!("{}", "WORKS".bold());
    for author in library.authors() {
        println!("{author}");
        for work in library.works_of(author) {
            println!("  - {}", work.title());
        }
    }
    println!("{separator}");

    if library.borrower_count() == 0 {
        println!("No borrowers registered.");
    } else {
        println!("{}", "BORROWERS".bold());
        let rows: Vec<BorrowerRow> = library
            .borrowers()
            .map(|b| BorrowerRow {
                id: b.id().0.clone(),
                name: b.name().to_owned(),
                borrowed: borrowed_titles(library, b.borrowed()),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    println!("{separator}");
}

fn borrowed_titles(library: &Library, ids: &[shelf_core::BookId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .filter_map(|id| library.book(id))
        .map(|b| b.title().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}
