//! Embedded `path → url` table backed by redb.

use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, TableDefinition, TableError};
use thiserror::Error;

use crate::routing::Mapping;

/// Name of the single table holding all redirects.
pub const ROUTES_TABLE: &str = "UrlBucket";

const ROUTES: TableDefinition<&str, &str> = TableDefinition::new(ROUTES_TABLE);

/// Redirects written to a freshly created store.
pub const DEFAULT_SEED: &[(&str, &str)] = &[
    (
        "/urlshort-godoc",
        "https://godoc.org/github.com/gophercises/urlshort",
    ),
    ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
];

/// Errors raised by the route store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be created or opened, or another process holds it.
    #[error("cannot open route store at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: redb::DatabaseError,
    },

    #[error("route store has no `{0}` table")]
    MissingTable(&'static str),

    #[error("route store transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("route store table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("route store storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("route store commit failed: {0}")]
    Commit(#[from] redb::CommitError),
}

/// Handle to the on-disk route table.
///
/// The file lock is held for as long as this value lives.
pub struct RouteStore {
    db: Database,
    path: PathBuf,
}

impl std::fmt::Debug for RouteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteStore").field("path", &self.path).finish()
    }
}

impl RouteStore {
    /// Open the store at `path`, creating the file if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let db = Database::create(&path).map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Route store opened");
        Ok(Self { db, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the routes table has been created (and therefore seeded).
    pub fn is_seeded(&self) -> Result<bool, StoreError> {
        let txn = self.db.begin_read()?;
        match txn.open_table(ROUTES) {
            Ok(_) => Ok(true),
            Err(TableError::TableDoesNotExist(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Seed the store with [`DEFAULT_SEED`] unless it already has a routes table.
    ///
    /// Returns `true` when this call wrote the seed.
    pub fn ensure_seeded(&self) -> Result<bool, StoreError> {
        self.ensure_seeded_with(DEFAULT_SEED)
    }

    /// Seed the store with `seed` unless it already has a routes table.
    ///
    /// All pairs are written in one transaction: either every pair lands or none do.
    pub fn ensure_seeded_with(&self, seed: &[(&str, &str)]) -> Result<bool, StoreError> {
        if self.is_seeded()? {
            tracing::debug!(path = %self.path.display(), "Route store already seeded");
            return Ok(false);
        }

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(ROUTES)?;
            for (path, url) in seed {
                table.insert(*path, *url)?;
            }
        }
        txn.commit()?;

        tracing::info!(
            path = %self.path.display(),
            entries = seed.len(),
            "Route store seeded with default redirects"
        );
        Ok(true)
    }

    /// Read every stored redirect.
    pub fn load_all(&self) -> Result<Mapping, StoreError> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(ROUTES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Err(StoreError::MissingTable(ROUTES_TABLE)),
            Err(e) => return Err(e.into()),
        };

        let mut routes = Mapping::new();
        for entry in table.iter()? {
            let (path, url) = entry?;
            routes.insert(path.value().to_string(), url.value().to_string());
        }

        tracing::debug!(path = %self.path.display(), entries = routes.len(), "Routes loaded from store");
        Ok(routes)
    }
}
