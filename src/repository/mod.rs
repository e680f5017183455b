//! Entity repository: validated, reference-checked access to a [`Store`].
//!
//! The repository is the only write path. It validates registration forms,
//! confirms that every referenced record exists (the document backend has no
//! foreign keys of its own), then hands the record to the backend. The check
//! and the insert are two steps and are not transactional; the relational
//! backend backs them with foreign keys, the document backend relies on the
//! single-writer model.

pub mod forms;


use crate::cli::types::EntityKind;
use crate::error::{FutebolError, Result};
use crate::storage::{
    BackendKind, NewRecord, OfficialTeam, Player, Record, RosterEntry, Snapshot, SortField,
    Store, User, UserTeam,
};

pub use forms::{
    OfficialTeamForm, PlayerForm, Registration, RosterEntryForm, UserForm, UserTeamForm,
};

pub struct EntityRepository {
    store: Box<dyn Store>,
}

impl EntityRepository {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> BackendKind {
        self.store.backend()
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Validate a registration form and store it, returning the new id.
    pub fn register(&mut self, registration: Registration) -> Result<u64> {
        let kind = registration.kind();
        let record = registration.validate().inspect_err(|e| {
            tracing::warn!(%kind, error = %e, "rejected registration");
        })?;
        self.insert(record)
    }

    /// Store an already-validated record after checking its references.
    pub fn insert(&mut self, record: NewRecord) -> Result<u64> {
        let kind = record.kind();

        for (ref_kind, ref_id) in record.references() {
            if !self.store.exists(ref_kind, ref_id)? {
                tracing::warn!(%kind, missing = %ref_kind, id = ref_id, "dangling reference");
                return Err(FutebolError::Reference {
                    kind: ref_kind,
                    id: ref_id,
                });
            }
        }

        match self.store.insert(record) {
            Ok(id) => {
                tracing::info!(%kind, id, backend = %self.store.backend(), "registered");
                Ok(id)
            }
            Err(e) => {
                if e.is_recoverable() {
                    tracing::warn!(%kind, error = %e, "insert refused");
                }
                Err(e)
            }
        }
    }

    pub fn next_id(&self, kind: EntityKind) -> Result<u64> {
        self.store.next_id(kind)
    }

    pub fn find_by_id(&self, kind: EntityKind, id: u64) -> Result<Option<Record>> {
        self.store.find_by_id(kind, id)
    }

    pub fn find_all(&self, kind: EntityKind, order_by: SortField) -> Result<Vec<Record>> {
        self.store.find_all(kind, order_by)
    }

    pub fn exists(&self, kind: EntityKind, id: u64) -> Result<bool> {
        self.store.exists(kind, id)
    }

    /// All records of `kind` in natural order: by name, roster entries by id.
    pub fn list(&self, kind: EntityKind) -> Result<Vec<Record>> {
        self.store.find_all(kind, SortField::natural(kind))
    }

    /// Delete one record; dependants follow the cascade policy.
    pub fn delete(&mut self, kind: EntityKind, id: u64) -> Result<bool> {
        let removed = self.store.delete(kind, id)?;
        if removed {
            tracing::info!(%kind, id, "deleted");
        }
        Ok(removed)
    }

    pub fn clear(&mut self, kind: EntityKind) -> Result<()> {
        tracing::info!(%kind, "clearing");
        self.store.clear(kind)
    }

    /// Clear every kind, dependants first.
    pub fn clear_all(&mut self) -> Result<()> {
        for kind in EntityKind::ALL.into_iter().rev() {
            self.clear(kind)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        self.store.snapshot()
    }

    pub fn users(&self) -> Result<Vec<User>> {
        Ok(self
            .list(EntityKind::User)?
            .into_iter()
            .filter_map(|r| match r {
                Record::User(u) => Some(u),
                _ => None,
            })
            .collect())
    }

    pub fn official_teams(&self) -> Result<Vec<OfficialTeam>> {
        Ok(self
            .list(EntityKind::OfficialTeam)?
            .into_iter()
            .filter_map(|r| match r {
                Record::OfficialTeam(t) => Some(t),
                _ => None,
            })
            .collect())
    }

    pub fn players(&self) -> Result<Vec<Player>> {
        Ok(self
            .list(EntityKind::Player)?
            .into_iter()
            .filter_map(|r| match r {
                Record::Player(p) => Some(p),
                _ => None,
            })
            .collect())
    }

    pub fn user_teams(&self) -> Result<Vec<UserTeam>> {
        Ok(self
            .list(EntityKind::UserTeam)?
            .into_iter()
            .filter_map(|r| match r {
                Record::UserTeam(t) => Some(t),
                _ => None,
            })
            .collect())
    }

    pub fn roster_entries(&self) -> Result<Vec<RosterEntry>> {
        Ok(self
            .list(EntityKind::RosterEntry)?
            .into_iter()
            .filter_map(|r| match r {
                Record::RosterEntry(e) => Some(e),
                _ => None,
            })
            .collect())
    }
}
