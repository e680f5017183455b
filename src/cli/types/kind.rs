//! Entity kinds and the names of the canonical read views.

use crate::error::{FutebolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five record types held by every backend.
///
/// Order matters: `EntityKind::ALL` lists parents before dependants, so
/// inserting in that order never trips a reference check and clearing in
/// reverse order never leaves dangling rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    User,
    OfficialTeam,
    Player,
    UserTeam,
    RosterEntry,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::User,
        EntityKind::OfficialTeam,
        EntityKind::Player,
        EntityKind::UserTeam,
        EntityKind::RosterEntry,
    ];

    /// Table (relational) or collection (document) name.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::OfficialTeam => "official_teams",
            EntityKind::Player => "players",
            EntityKind::UserTeam => "user_teams",
            EntityKind::RosterEntry => "roster_entries",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::User => "user",
            EntityKind::OfficialTeam => "official team",
            EntityKind::Player => "player",
            EntityKind::UserTeam => "user team",
            EntityKind::RosterEntry => "roster entry",
        };
        write!(f, "{}", s)
    }
}

/// Names of the read views served by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum QueryName {
    PlayersWithTeam,
    Rosters,
    PositionCounts,
    FreeAgents,
    PreferredTeamMatches,
}

impl QueryName {
    pub const ALL: [QueryName; 5] = [
        QueryName::PlayersWithTeam,
        QueryName::Rosters,
        QueryName::PositionCounts,
        QueryName::FreeAgents,
        QueryName::PreferredTeamMatches,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryName::PlayersWithTeam => "players_with_team",
            QueryName::Rosters => "rosters",
            QueryName::PositionCounts => "position_counts",
            QueryName::FreeAgents => "free_agents",
            QueryName::PreferredTeamMatches => "preferred_team_matches",
        }
    }
}

impl fmt::Display for QueryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryName {
    type Err = FutebolError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        QueryName::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| FutebolError::validation("query", format!("unknown query '{}'", s)))
    }
}
