//! Data models for the storage layer

use crate::cli::types::{
    EntityKind, OfficialTeamId, PlayerId, RosterEntryId, Sex, UserId, UserTeamId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Password kept exactly as the user typed it.
///
/// No hashing is applied; this mirrors the behaviour of the data this crate
/// interoperates with and is a known weak point. `Debug` output is redacted
/// and the CLI never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub sex: Sex,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    /// Free-text label, e.g. "FURIA"; resolved to a short-code by the query engine.
    pub preferred_team: Option<String>,
}

/// Real-world team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfficialTeam {
    pub id: OfficialTeamId,
    pub name: String,
    pub short_code: String,
    pub short_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    /// `None` means free agent.
    pub official_team_id: Option<OfficialTeamId>,
}

/// Fantasy team owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserTeam {
    pub id: UserTeamId,
    pub name: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: RosterEntryId,
    pub user_team_id: UserTeamId,
    pub player_id: PlayerId,
}

/// Validated user waiting for an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Password,
    pub sex: Sex,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub preferred_team: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOfficialTeam {
    pub name: String,
    pub short_code: String,
    pub short_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPlayer {
    pub name: String,
    pub position: String,
    pub official_team_id: Option<OfficialTeamId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserTeam {
    pub name: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRosterEntry {
    pub user_team_id: UserTeamId,
    pub player_id: PlayerId,
}

/// A stored record of any kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    User(User),
    OfficialTeam(OfficialTeam),
    Player(Player),
    UserTeam(UserTeam),
    RosterEntry(RosterEntry),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::User(_) => EntityKind::User,
            Record::OfficialTeam(_) => EntityKind::OfficialTeam,
            Record::Player(_) => EntityKind::Player,
            Record::UserTeam(_) => EntityKind::UserTeam,
            Record::RosterEntry(_) => EntityKind::RosterEntry,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Record::User(r) => r.id.as_u64(),
            Record::OfficialTeam(r) => r.id.as_u64(),
            Record::Player(r) => r.id.as_u64(),
            Record::UserTeam(r) => r.id.as_u64(),
            Record::RosterEntry(r) => r.id.as_u64(),
        }
    }

    /// Value of `field` used for ordering, `None` when the kind lacks it.
    pub(crate) fn sort_key(&self, field: SortField) -> Option<&str> {
        match (self, field) {
            (Record::User(u), SortField::Name) => Some(&u.name),
            (Record::User(u), SortField::Email) => Some(&u.email),
            (Record::OfficialTeam(t), SortField::Name) => Some(&t.name),
            (Record::OfficialTeam(t), SortField::ShortCode) => Some(&t.short_code),
            (Record::Player(p), SortField::Name) => Some(&p.name),
            (Record::Player(p), SortField::Position) => Some(&p.position),
            (Record::UserTeam(t), SortField::Name) => Some(&t.name),
            _ => None,
        }
    }
}

/// A validated record waiting for an id
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    User(NewUser),
    OfficialTeam(NewOfficialTeam),
    Player(NewPlayer),
    UserTeam(NewUserTeam),
    RosterEntry(NewRosterEntry),
}

impl NewRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::User(_) => EntityKind::User,
            NewRecord::OfficialTeam(_) => EntityKind::OfficialTeam,
            NewRecord::Player(_) => EntityKind::Player,
            NewRecord::UserTeam(_) => EntityKind::UserTeam,
            NewRecord::RosterEntry(_) => EntityKind::RosterEntry,
        }
    }

    /// Foreign references this record carries, parents first.
    pub fn references(&self) -> Vec<(EntityKind, u64)> {
        match self {
            NewRecord::User(_) | NewRecord::OfficialTeam(_) => Vec::new(),
            NewRecord::Player(p) => p
                .official_team_id
                .map(|id| (EntityKind::OfficialTeam, id.as_u64()))
                .into_iter()
                .collect(),
            NewRecord::UserTeam(t) => vec![(EntityKind::User, t.user_id.as_u64())],
            NewRecord::RosterEntry(e) => vec![
                (EntityKind::UserTeam, e.user_team_id.as_u64()),
                (EntityKind::Player, e.player_id.as_u64()),
            ],
        }
    }

    /// Readable form of the uniqueness key this record claims, if any.
    pub(crate) fn unique_key(&self) -> Option<String> {
        match self {
            NewRecord::User(u) => Some(format!("email {}", u.email)),
            NewRecord::OfficialTeam(t) => Some(format!("short code {}", t.short_code)),
            NewRecord::RosterEntry(e) => Some(format!(
                "player {} on user team {}",
                e.player_id, e.user_team_id
            )),
            NewRecord::Player(_) | NewRecord::UserTeam(_) => None,
        }
    }

    /// Attach an id, producing the stored form.
    pub(crate) fn into_record(self, id: u64) -> Record {
        match self {
            NewRecord::User(u) => Record::User(User {
                id: UserId::new(id),
                name: u.name,
                email: u.email,
                password: u.password,
                sex: u.sex,
                phone: u.phone,
                birth_date: u.birth_date,
                preferred_team: u.preferred_team,
            }),
            NewRecord::OfficialTeam(t) => Record::OfficialTeam(OfficialTeam {
                id: OfficialTeamId::new(id),
                name: t.name,
                short_code: t.short_code,
                short_label: t.short_label,
            }),
            NewRecord::Player(p) => Record::Player(Player {
                id: PlayerId::new(id),
                name: p.name,
                position: p.position,
                official_team_id: p.official_team_id,
            }),
            NewRecord::UserTeam(t) => Record::UserTeam(UserTeam {
                id: UserTeamId::new(id),
                name: t.name,
                user_id: t.user_id,
            }),
            NewRecord::RosterEntry(e) => Record::RosterEntry(RosterEntry {
                id: RosterEntryId::new(id),
                user_team_id: e.user_team_id,
                player_id: e.player_id,
            }),
        }
    }
}

/// Field a listing is ordered by. Ties are always broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Email,
    ShortCode,
    Position,
}

impl SortField {
    /// Natural listing order for a kind.
    pub fn natural(kind: EntityKind) -> Self {
        match kind {
            EntityKind::RosterEntry => SortField::Id,
            _ => SortField::Name,
        }
    }

    pub(crate) fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::ShortCode => "short_code",
            SortField::Position => "position",
        }
    }

    pub fn applies_to(&self, kind: EntityKind) -> bool {
        matches!(
            (self, kind),
            (SortField::Id, _)
                | (SortField::Name, EntityKind::User)
                | (SortField::Name, EntityKind::OfficialTeam)
                | (SortField::Name, EntityKind::Player)
                | (SortField::Name, EntityKind::UserTeam)
                | (SortField::Email, EntityKind::User)
                | (SortField::ShortCode, EntityKind::OfficialTeam)
                | (SortField::Position, EntityKind::Player)
        )
    }
}

/// Every collection materialized at one point in time, in id order.
///
/// Also the on-disk layout of the document store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub official_teams: Vec<OfficialTeam>,
    pub players: Vec<Player>,
    pub user_teams: Vec<UserTeam>,
    pub roster_entries: Vec<RosterEntry>,
}

impl Snapshot {
    /// Sort records into their collections.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut snapshot = Snapshot::default();
        for record in records {
            match record {
                Record::User(u) => snapshot.users.push(u),
                Record::OfficialTeam(t) => snapshot.official_teams.push(t),
                Record::Player(p) => snapshot.players.push(p),
                Record::UserTeam(t) => snapshot.user_teams.push(t),
                Record::RosterEntry(e) => snapshot.roster_entries.push(e),
            }
        }
        snapshot
    }
}
