//! Document store: keyed collections persisted as one JSON document
//!
//! Collections are kept in memory in id order and written back after every
//! mutation. The store enforces the unique keys (email, short-code, roster
//! pair) and the delete policy itself; reference checks on insert are done
//! by the repository.

use super::{check_sort_field, models::*, BackendKind, Store};
use crate::cli::types::EntityKind;
use crate::error::{FutebolError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct DocumentStore {
    path: Option<PathBuf>,
    collections: Snapshot,
}

impl DocumentStore {
    /// Load the document at `path`, starting empty when the file does not exist
    pub fn open(path: &Path) -> Result<Self> {
        let collections = match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Snapshot::default(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| FutebolError::Storage {
                    message: format!("{} is not a valid document store: {}", path.display(), e),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Snapshot::default(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            users = collections.users.len(),
            players = collections.players.len(),
            "loaded document store"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            collections,
        })
    }

    /// Store that never touches disk
    pub fn new_in_memory() -> Self {
        Self {
            path: None,
            collections: Snapshot::default(),
        }
    }

    /// Write the collections back, replacing the file atomically
    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.collections)?;
        let tmp_path = path.with_extension("json.tmp");
        let mut f = fs::File::create(&tmp_path)?;
        f.write_all(contents.as_bytes())?;
        f.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    /// Persist a mutation, or put `previous` back when the write fails so
    /// memory never holds records the file does not
    fn commit(&mut self, previous: Snapshot) -> Result<()> {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "document write failed, change discarded");
            self.collections = previous;
            return Err(e);
        }
        Ok(())
    }

    fn records(&self, kind: EntityKind) -> Vec<Record> {
        let c = &self.collections;
        match kind {
            EntityKind::User => c.users.iter().cloned().map(Record::User).collect(),
            EntityKind::OfficialTeam => c
                .official_teams
                .iter()
                .cloned()
                .map(Record::OfficialTeam)
                .collect(),
            EntityKind::Player => c.players.iter().cloned().map(Record::Player).collect(),
            EntityKind::UserTeam => c.user_teams.iter().cloned().map(Record::UserTeam).collect(),
            EntityKind::RosterEntry => c
                .roster_entries
                .iter()
                .cloned()
                .map(Record::RosterEntry)
                .collect(),
        }
    }

    fn max_id(&self, kind: EntityKind) -> u64 {
        let c = &self.collections;
        let ids: Box<dyn Iterator<Item = u64> + '_> = match kind {
            EntityKind::User => Box::new(c.users.iter().map(|r| r.id.as_u64())),
            EntityKind::OfficialTeam => Box::new(c.official_teams.iter().map(|r| r.id.as_u64())),
            EntityKind::Player => Box::new(c.players.iter().map(|r| r.id.as_u64())),
            EntityKind::UserTeam => Box::new(c.user_teams.iter().map(|r| r.id.as_u64())),
            EntityKind::RosterEntry => Box::new(c.roster_entries.iter().map(|r| r.id.as_u64())),
        };
        ids.max().unwrap_or(0)
    }

    /// Emulates the unique indexes of a document database
    fn violates_unique_key(&self, record: &NewRecord) -> bool {
        let c = &self.collections;
        match record {
            NewRecord::User(u) => c.users.iter().any(|existing| existing.email == u.email),
            NewRecord::OfficialTeam(t) => c
                .official_teams
                .iter()
                .any(|existing| existing.short_code == t.short_code),
            NewRecord::RosterEntry(e) => c.roster_entries.iter().any(|existing| {
                existing.user_team_id == e.user_team_id && existing.player_id == e.player_id
            }),
            NewRecord::Player(_) | NewRecord::UserTeam(_) => false,
        }
    }

    /// Remove one record and its dependants without persisting
    fn remove(&mut self, kind: EntityKind, id: u64) -> bool {
        let c = &mut self.collections;
        match kind {
            EntityKind::User => {
                let before = c.users.len();
                c.users.retain(|u| u.id.as_u64() != id);
                let owned: BTreeSet<u64> = c
                    .user_teams
                    .iter()
                    .filter(|t| t.user_id.as_u64() == id)
                    .map(|t| t.id.as_u64())
                    .collect();
                c.user_teams.retain(|t| !owned.contains(&t.id.as_u64()));
                c.roster_entries
                    .retain(|e| !owned.contains(&e.user_team_id.as_u64()));
                c.users.len() != before
            }
            EntityKind::OfficialTeam => {
                let before = c.official_teams.len();
                c.official_teams.retain(|t| t.id.as_u64() != id);
                for player in c.players.iter_mut() {
                    if player.official_team_id.map(|t| t.as_u64()) == Some(id) {
                        player.official_team_id = None;
                    }
                }
                c.official_teams.len() != before
            }
            EntityKind::Player => {
                let before = c.players.len();
                c.players.retain(|p| p.id.as_u64() != id);
                c.roster_entries.retain(|e| e.player_id.as_u64() != id);
                c.players.len() != before
            }
            EntityKind::UserTeam => {
                let before = c.user_teams.len();
                c.user_teams.retain(|t| t.id.as_u64() != id);
                c.roster_entries.retain(|e| e.user_team_id.as_u64() != id);
                c.user_teams.len() != before
            }
            EntityKind::RosterEntry => {
                let before = c.roster_entries.len();
                c.roster_entries.retain(|e| e.id.as_u64() != id);
                c.roster_entries.len() != before
            }
        }
    }
}

impl Store for DocumentStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Document
    }

    fn next_id(&self, kind: EntityKind) -> Result<u64> {
        Ok(self.max_id(kind) + 1)
    }

    fn insert(&mut self, record: NewRecord) -> Result<u64> {
        if self.violates_unique_key(&record) {
            return Err(FutebolError::DuplicateKey {
                kind: record.kind(),
                key: record.unique_key().unwrap_or_else(|| "id".to_string()),
            });
        }

        // `&mut self` makes this the only writer, so max + 1 cannot race
        let id = self.next_id(record.kind())?;
        let previous = self.collections.clone();
        let c = &mut self.collections;
        match record.into_record(id) {
            Record::User(u) => c.users.push(u),
            Record::OfficialTeam(t) => c.official_teams.push(t),
            Record::Player(p) => c.players.push(p),
            Record::UserTeam(t) => c.user_teams.push(t),
            Record::RosterEntry(e) => c.roster_entries.push(e),
        }

        self.commit(previous)?;
        Ok(id)
    }

    fn find_by_id(&self, kind: EntityKind, id: u64) -> Result<Option<Record>> {
        Ok(self.records(kind).into_iter().find(|r| r.id() == id))
    }

    fn find_all(&self, kind: EntityKind, order_by: SortField) -> Result<Vec<Record>> {
        check_sort_field(kind, order_by)?;

        let mut records = self.records(kind);
        records.sort_by(|a, b| {
            a.sort_key(order_by)
                .cmp(&b.sort_key(order_by))
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(records)
    }

    fn delete(&mut self, kind: EntityKind, id: u64) -> Result<bool> {
        let previous = self.collections.clone();
        let removed = self.remove(kind, id);
        if removed {
            self.commit(previous)?;
        }
        Ok(removed)
    }

    fn clear(&mut self, kind: EntityKind) -> Result<()> {
        let previous = self.collections.clone();
        let ids: Vec<u64> = self.records(kind).iter().map(Record::id).collect();
        for id in ids {
            self.remove(kind, id);
        }
        self.commit(previous)
    }
}
