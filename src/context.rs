//! Data-access context handed to callers.
//!
//! `DataContext` owns the open store for as long as the caller keeps it, and
//! exposes the three boundary operations: `register`, `list` and `query`.

use crate::cli::types::{EntityKind, QueryName};
use crate::config::AppConfig;
use crate::error::Result;
use crate::query::{AliasTable, QueryEngine, QueryParams, QueryRows};
use crate::repository::{EntityRepository, Registration};
use crate::storage::{open_in_memory, open_store, BackendKind, Record, Store};

pub struct DataContext {
    repository: EntityRepository,
    engine: QueryEngine,
}

impl DataContext {
    pub fn new(store: Box<dyn Store>, aliases: AliasTable) -> Self {
        Self {
            repository: EntityRepository::new(store),
            engine: QueryEngine::new(aliases),
        }
    }

    /// Open the backend described by `config`.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let path = config.database_path()?;
        let store = open_store(config.backend, &path)?;
        Ok(Self::new(store, config.aliases.clone()))
    }

    /// Empty in-memory context with the default alias table.
    pub fn in_memory(backend: BackendKind) -> Result<Self> {
        Ok(Self::new(open_in_memory(backend)?, AliasTable::default()))
    }

    pub fn register(&mut self, registration: Registration) -> Result<u64> {
        self.repository.register(registration)
    }

    pub fn list(&self, kind: EntityKind) -> Result<Vec<Record>> {
        self.repository.list(kind)
    }

    pub fn query(&self, name: QueryName, params: QueryParams) -> Result<QueryRows> {
        self.engine.run(self.repository.store(), name, params)
    }

    pub fn delete(&mut self, kind: EntityKind, id: u64) -> Result<bool> {
        self.repository.delete(kind, id)
    }

    pub fn repository(&self) -> &EntityRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut EntityRepository {
        &mut self.repository
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }
}
