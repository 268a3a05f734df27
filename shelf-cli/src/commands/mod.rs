pub mod demo;
pub mod report;
pub mod search;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use shelf_core::{load_seed_at, CatalogSeed, Library};

/// Where the catalog comes from. Shared by every read-only command.
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// YAML catalog seed. Defaults to the built-in demo catalog.
    #[arg(long, short = 'c', env = "SHELF_CATALOG", value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self) -> Result<Library> {
        let seed = match self.catalog.as_ref() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading catalog seed");
                load_seed_at(path)
                    .with_context(|| format!("failed to load catalog '{}'", path.display()))?
            }
            None => CatalogSeed::demo(),
        };
        seed.build().context("failed to build catalog")
    }
}
