//! Storage layer for the futebol app
//!
//! Two interchangeable backends sit behind the [`Store`] trait:
//! - `schema` / `queries`: relational store on SQLite, referential rules
//!   declared as foreign keys
//! - `document`: keyed JSON document collections, referential rules applied
//!   by the adapter itself
//! - `models`: Data structures shared by both
//!
//! Both backends follow the same delete policy: removing a user removes their
//! user teams, removing a user team or a player removes the roster entries
//! pointing at it, and removing an official team turns its players into free
//! agents.

pub mod document;
pub mod models;
pub mod queries;
pub mod schema;


use crate::cli::types::EntityKind;
use crate::error::{FutebolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

// Re-export the main types and store structs for easy access
pub use document::DocumentStore;
pub use models::*;
pub use schema::RelationalStore;

/// Which backend a store is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Relational,
    Document,
}

impl BackendKind {
    /// File name used when no database path is configured.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            BackendKind::Relational => "futebol.db",
            BackendKind::Document => "futebol.json",
        }
    }
}

impl FromStr for BackendKind {
    type Err = FutebolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "relational" | "sqlite" => Ok(BackendKind::Relational),
            "document" | "json" => Ok(BackendKind::Document),
            other => Err(FutebolError::Config {
                message: format!("unknown backend '{}' (expected relational or document)", other),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Relational => write!(f, "relational"),
            BackendKind::Document => write!(f, "document"),
        }
    }
}

/// Storage operations every backend provides.
///
/// Ids passed in and out are raw `u64` values scoped by `kind`; the typed
/// wrappers live on the records themselves.
pub trait Store {
    fn backend(&self) -> BackendKind;

    /// One more than the current maximum id of `kind`, or 1 when empty.
    fn next_id(&self, kind: EntityKind) -> Result<u64>;

    /// Store a record under a fresh id and return that id.
    ///
    /// Fails with `DuplicateKey` on an email, short-code or roster-pair
    /// collision.
    fn insert(&mut self, record: NewRecord) -> Result<u64>;

    fn find_by_id(&self, kind: EntityKind, id: u64) -> Result<Option<Record>>;

    /// All records of `kind` ascending by `order_by`, ties broken by id.
    fn find_all(&self, kind: EntityKind, order_by: SortField) -> Result<Vec<Record>>;

    fn exists(&self, kind: EntityKind, id: u64) -> Result<bool> {
        Ok(self.find_by_id(kind, id)?.is_some())
    }

    /// Remove one record, applying the cascade policy. Returns whether it existed.
    fn delete(&mut self, kind: EntityKind, id: u64) -> Result<bool>;

    /// Remove every record of `kind`, applying the cascade policy to dependants.
    fn clear(&mut self, kind: EntityKind) -> Result<()>;

    /// Materialize every collection in id order.
    fn snapshot(&self) -> Result<Snapshot> {
        let mut records = Vec::new();
        for kind in EntityKind::ALL {
            records.extend(self.find_all(kind, SortField::Id)?);
        }
        Ok(Snapshot::from_records(records))
    }
}

/// Open the requested backend at `path`, creating it if missing.
pub fn open_store(backend: BackendKind, path: &Path) -> Result<Box<dyn Store>> {
    tracing::debug!(%backend, path = %path.display(), "opening store");
    match backend {
        BackendKind::Relational => Ok(Box::new(RelationalStore::open(path)?)),
        BackendKind::Document => Ok(Box::new(DocumentStore::open(path)?)),
    }
}

/// Open the requested backend without touching disk.
pub fn open_in_memory(backend: BackendKind) -> Result<Box<dyn Store>> {
    match backend {
        BackendKind::Relational => Ok(Box::new(RelationalStore::new_in_memory()?)),
        BackendKind::Document => Ok(Box::new(DocumentStore::new_in_memory())),
    }
}

pub(crate) fn check_sort_field(kind: EntityKind, field: SortField) -> Result<()> {
    if field.applies_to(kind) {
        Ok(())
    } else {
        Err(FutebolError::validation(
            "order_by",
            format!("{} records cannot be ordered by {}", kind, field.column()),
        ))
    }
}
