//! Command handlers for the `wayfinder` binary.
//!
//! Each handler opens the graph store through [`CommandContext`], calls into
//! `wayfinder-lib`, and prints the result with [`crate::output::emit`].

pub mod floors;
pub mod graph;
pub mod rooms;
pub mod route;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use wayfinder_lib::{resolve_database_path, GraphStore};

use crate::output::{emit, OutputFormat, Render};
use crate::terminal::ColorPalette;

/// Global options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub db: Option<PathBuf>,
    pub format: OutputFormat,
}

impl CommandContext {
    pub fn new(db: Option<PathBuf>, format: OutputFormat) -> Self {
        Self { db, format }
    }

    /// Database file the store lives in.
    pub fn database_path(&self) -> Result<PathBuf> {
        resolve_database_path(self.db.as_deref())
            .context("failed to resolve the graph database path")
    }

    /// Open (creating if needed) the graph store.
    pub fn open_store(&self) -> Result<GraphStore> {
        let path = self.database_path()?;
        open_at(&path)
    }

    pub fn emit<T>(&self, value: &T) -> Result<()>
    where
        T: Serialize + Render + ?Sized,
    {
        emit(self.format, value)
    }
}

fn open_at(path: &Path) -> Result<GraphStore> {
    debug!(path = %path.display(), "opening graph store");
    let display = path.display();
    GraphStore::open(path).with_context(|| format!("failed to open graph database at {display}"))
}

/// Report from `wayfinder init`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub path: PathBuf,
    pub floors: usize,
}

impl Render for StoreStatus {
    fn render(&self, palette: &ColorPalette) -> String {
        format!(
            "{} {} ({} floor(s))\n",
            palette.paint(palette.success, "Graph store ready at"),
            self.path.display(),
            self.floors
        )
    }
}

/// Create the database file and schema if they do not exist yet.
pub fn handle_init(ctx: &CommandContext) -> Result<()> {
    let path = ctx.database_path()?;
    let store = open_at(&path)?;
    let floors = store.floor_count().context("failed to count floors")?;
    ctx.emit(&StoreStatus { path, floors })
}
