//! Basic CRUD operations for the relational store

use super::{check_sort_field, models::*, schema::RelationalStore, BackendKind, Store};
use crate::cli::types::{
    EntityKind, OfficialTeamId, PlayerId, RosterEntryId, Sex, UserId, UserTeamId, MAX_ID,
};
use crate::error::{FutebolError, Result};
use chrono::NaiveDate;
use rusqlite::{ffi, params, ErrorCode, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column list selected for each table, in `row_to_record` order
fn columns(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => {
            "id, name, email, password, sex, phone, birth_date, preferred_team"
        }
        EntityKind::OfficialTeam => "id, name, short_code, short_label",
        EntityKind::Player => "id, name, position, official_team_id",
        EntityKind::UserTeam => "id, name, user_id",
        EntityKind::RosterEntry => "id, user_team_id, player_id",
    }
}

impl RelationalStore {
    fn insert_row(&self, record: &NewRecord) -> rusqlite::Result<usize> {
        match record {
            NewRecord::User(u) => self.conn.execute(
                "INSERT INTO users
                 (name, email, password, sex, phone, birth_date, preferred_team)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    u.name,
                    u.email,
                    u.password.expose(),
                    u.sex.code(),
                    u.phone,
                    u.birth_date.format(DATE_FORMAT).to_string(),
                    u.preferred_team
                ],
            ),
            NewRecord::OfficialTeam(t) => self.conn.execute(
                "INSERT INTO official_teams (name, short_code, short_label) VALUES (?, ?, ?)",
                params![t.name, t.short_code, t.short_label],
            ),
            NewRecord::Player(p) => self.conn.execute(
                "INSERT INTO players (name, position, official_team_id) VALUES (?, ?, ?)",
                params![
                    p.name,
                    p.position,
                    p.official_team_id.map(|id| id.as_u64())
                ],
            ),
            NewRecord::UserTeam(t) => self.conn.execute(
                "INSERT INTO user_teams (name, user_id) VALUES (?, ?)",
                params![t.name, t.user_id.as_u64()],
            ),
            NewRecord::RosterEntry(e) => self.conn.execute(
                "INSERT INTO roster_entries (user_team_id, player_id) VALUES (?, ?)",
                params![e.user_team_id.as_u64(), e.player_id.as_u64()],
            ),
        }
    }

    /// Translate a failed insert into the error taxonomy
    fn classify_insert_error(&self, err: rusqlite::Error, record: &NewRecord) -> FutebolError {
        let extended_code = match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                e.extended_code
            }
            _ => return err.into(),
        };

        match extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                FutebolError::DuplicateKey {
                    kind: record.kind(),
                    key: record.unique_key().unwrap_or_else(|| "id".to_string()),
                }
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                // SQLite does not say which reference failed; look it up
                for (kind, id) in record.references() {
                    match self.exists(kind, id) {
                        Ok(false) => return FutebolError::Reference { kind, id },
                        Ok(true) => continue,
                        Err(lookup) => return lookup,
                    }
                }
                err.into()
            }
            _ => err.into(),
        }
    }

    /// Helper to convert a database row into a record of `kind`
    fn row_to_record(kind: EntityKind, row: &Row) -> rusqlite::Result<Record> {
        let record = match kind {
            EntityKind::User => {
                let sex: String = row.get(4)?;
                let sex = sex.parse::<Sex>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                let birth_date: String = row.get(6)?;
                let birth_date = NaiveDate::parse_from_str(&birth_date, DATE_FORMAT)
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            6,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;

                Record::User(User {
                    id: UserId::new(row.get(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    password: Password::new(row.get::<_, String>(3)?),
                    sex,
                    phone: row.get(5)?,
                    birth_date,
                    preferred_team: row.get(7)?,
                })
            }
            EntityKind::OfficialTeam => Record::OfficialTeam(OfficialTeam {
                id: OfficialTeamId::new(row.get(0)?),
                name: row.get(1)?,
                short_code: row.get(2)?,
                short_label: row.get(3)?,
            }),
            EntityKind::Player => Record::Player(Player {
                id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
                position: row.get(2)?,
                official_team_id: row.get::<_, Option<u64>>(3)?.map(OfficialTeamId::new),
            }),
            EntityKind::UserTeam => Record::UserTeam(UserTeam {
                id: UserTeamId::new(row.get(0)?),
                name: row.get(1)?,
                user_id: UserId::new(row.get(2)?),
            }),
            EntityKind::RosterEntry => Record::RosterEntry(RosterEntry {
                id: RosterEntryId::new(row.get(0)?),
                user_team_id: UserTeamId::new(row.get(1)?),
                player_id: PlayerId::new(row.get(2)?),
            }),
        };
        Ok(record)
    }
}

impl Store for RelationalStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Relational
    }

    fn next_id(&self, kind: EntityKind) -> Result<u64> {
        let query = format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {}", kind.collection());
        let next: u64 = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(next)
    }

    fn insert(&mut self, record: NewRecord) -> Result<u64> {
        // An id SQLite cannot bind cannot name an existing row
        if let Some((kind, id)) = record
            .references()
            .into_iter()
            .find(|(_, id)| *id > MAX_ID)
        {
            return Err(FutebolError::Reference { kind, id });
        }

        // INTEGER PRIMARY KEY without AUTOINCREMENT allocates max(id) + 1
        match self.insert_row(&record) {
            Ok(_) => Ok(self.conn.last_insert_rowid() as u64),
            Err(e) => Err(self.classify_insert_error(e, &record)),
        }
    }

    fn find_by_id(&self, kind: EntityKind, id: u64) -> Result<Option<Record>> {
        if id > MAX_ID {
            return Ok(None);
        }
        let query = format!(
            "SELECT {} FROM {} WHERE id = ?",
            columns(kind),
            kind.collection()
        );
        let mut stmt = self.conn.prepare(&query)?;

        let result = stmt.query_row(params![id], |row| Self::row_to_record(kind, row));

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_all(&self, kind: EntityKind, order_by: SortField) -> Result<Vec<Record>> {
        check_sort_field(kind, order_by)?;

        let order = match order_by {
            SortField::Id => "id".to_string(),
            field => format!("{}, id", field.column()),
        };
        let query = format!(
            "SELECT {} FROM {} ORDER BY {}",
            columns(kind),
            kind.collection(),
            order
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([], |row| Self::row_to_record(kind, row))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn exists(&self, kind: EntityKind, id: u64) -> Result<bool> {
        if id > MAX_ID {
            return Ok(false);
        }
        let query = format!("SELECT COUNT(*) FROM {} WHERE id = ?", kind.collection());
        let count: i64 = self.conn.query_row(&query, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn delete(&mut self, kind: EntityKind, id: u64) -> Result<bool> {
        if id > MAX_ID {
            return Ok(false);
        }
        // Cascades and SET NULL are carried by the foreign keys
        let query = format!("DELETE FROM {} WHERE id = ?", kind.collection());
        let rows_affected = self.conn.execute(&query, params![id])?;
        Ok(rows_affected > 0)
    }

    fn clear(&mut self, kind: EntityKind) -> Result<()> {
        let query = format!("DELETE FROM {}", kind.collection());
        self.conn.execute(&query, [])?;
        Ok(())
    }
}
